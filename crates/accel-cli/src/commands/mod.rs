pub mod common;
pub mod completions;
pub mod path;
pub mod set;
pub mod show;
pub mod validate;
