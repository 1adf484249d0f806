use crate::error::PatchError;
use crate::matcher::{count_occurrences, substitute};
use crate::operations::file_operations::{load, save};
use crate::types::{MissPolicy, PatchOutcome, PatchRequest, ReplaceMode};
use log::{debug, info, warn};

/// Runs `load -> substitute -> save` for one request.
///
/// Nothing is written on a dry run, when the search block is absent, or when
/// the replacement leaves the text unchanged.
pub fn apply_patch(req: &PatchRequest) -> Result<PatchOutcome, PatchError> {
    let path = &req.target;
    debug!("applying patch to {:?} ({:?})", path, req.mode);

    if req.search.is_empty() {
        return Err(PatchError::EmptySearch { path: path.clone() });
    }

    let content = load(path)?;

    let outcome = |match_count, written| PatchOutcome {
        target: path.clone(),
        match_count,
        written,
    };

    if req.dry_run {
        let found = count_occurrences(&content, &req.search);
        let match_count = match req.mode {
            ReplaceMode::All => found,
            ReplaceMode::First => found.min(1),
        };
        if match_count == 0 && req.on_miss == MissPolicy::Fail {
            return Err(PatchError::PatternNotFound { path: path.clone() });
        }
        if match_count == 0 {
            warn!("dry run: search block not found in {:?}", path);
        } else {
            info!("dry run: {} occurrence(s) would be replaced in {:?}", match_count, path);
        }
        return Ok(outcome(match_count, false));
    }

    let (patched, match_count) = substitute(&content, &req.search, &req.replace, req.mode);

    if match_count == 0 {
        return match req.on_miss {
            MissPolicy::Fail => Err(PatchError::PatternNotFound { path: path.clone() }),
            MissPolicy::Ignore => {
                warn!("search block not found in {:?}; file left unchanged", path);
                Ok(outcome(0, false))
            }
        };
    }

    if patched == content {
        info!("replacement is identical to search block; {:?} not rewritten", path);
        return Ok(outcome(match_count, false));
    }

    save(path, &patched)?;
    info!("replaced {} occurrence(s) in {:?}", match_count, path);
    Ok(outcome(match_count, true))
}
