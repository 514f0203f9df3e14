pub mod common;
pub mod entry;
pub mod overrides;
pub mod plan;
pub mod policy;
pub mod summary;
pub mod windows;
