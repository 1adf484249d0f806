pub mod error;
pub mod matcher;
pub mod operations;
pub mod types;

pub use error::PatchError;
pub use matcher::{count_occurrences, substitute};
pub use operations::{apply_patch, load, save, save_with};
pub use types::{MissPolicy, PatchOutcome, PatchRequest, ReplaceMode};
