mod context;
mod scanner;

pub use context::{
    file_name, is_whitelisted, truncate_on_char_boundary, RepositoryInput, CONTENT_WHITELIST,
};
pub use scanner::{RepositoryScanner, ScanError};
