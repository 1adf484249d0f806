pub mod file_operations;
pub mod patch_applicator;

pub use file_operations::{load, save, save_with};
pub use patch_applicator::apply_patch;
