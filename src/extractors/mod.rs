// Code-based extraction of runtime configuration
//
// Extractors read the loaded manifest and source contents to derive the
// listening port, environment variables and declared dependencies.

pub mod dependencies;
pub mod env_vars;
pub mod port;

pub use dependencies::{extract_dependencies, ManifestError};
pub use env_vars::extract_env_vars;
pub use port::{resolve_port, PortSource, DEFAULT_PORT};
