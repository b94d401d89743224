pub mod merge;
pub mod publish;

pub use merge::{assign_unique_names, merge_template};
pub use publish::publish;
