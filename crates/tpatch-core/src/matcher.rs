use crate::types::ReplaceMode;

/// Counts non-overlapping literal occurrences of `search` in `text`.
pub fn count_occurrences(text: &str, search: &str) -> usize {
    if search.is_empty() {
        return 0;
    }
    text.matches(search).count()
}

/// Replaces literal occurrences of `search` with `replace`.
///
/// Matching is plain substring comparison, scanned left to right without
/// overlap. Returns the new text and how many occurrences were replaced.
/// `search` must be non-empty; callers check this before getting here.
pub fn substitute(text: &str, search: &str, replace: &str, mode: ReplaceMode) -> (String, usize) {
    if search.is_empty() {
        return (text.to_string(), 0);
    }

    let limit = match mode {
        ReplaceMode::All => usize::MAX,
        ReplaceMode::First => 1,
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut count = 0;

    for (idx, _) in text.match_indices(search).take(limit) {
        out.push_str(&text[last..idx]);
        out.push_str(replace);
        last = idx + search.len();
        count += 1;
    }
    out.push_str(&text[last..]);

    (out, count)
}
