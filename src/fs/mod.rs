//! File system abstraction used by the repository scanner

mod mock;
mod real;
mod r#trait;

pub use mock::MockFileSystem;
pub use r#trait::{FileSystem, WalkOptions};
pub use real::RealFileSystem;
