use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplaceMode {
    #[default]
    All,
    First,
}

/// What to do when the search fragment does not occur in the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissPolicy {
    /// Leave the file alone and report success with a match count of 0.
    #[default]
    Ignore,
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatchRequest {
    pub target: PathBuf,
    pub search: String,
    pub replace: String,
    pub mode: ReplaceMode,
    pub on_miss: MissPolicy,
    pub dry_run: bool,
}

impl PatchRequest {
    pub fn new(
        target: impl Into<PathBuf>,
        search: impl Into<String>,
        replace: impl Into<String>,
    ) -> Self {
        Self {
            target: target.into(),
            search: search.into(),
            replace: replace.into(),
            mode: ReplaceMode::default(),
            on_miss: MissPolicy::default(),
            dry_run: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub target: PathBuf,
    pub match_count: usize,
    /// False on a dry run, on a miss, and when the new text equals the old.
    pub written: bool,
}
