//! Stack identification: typed identifiers plus the deterministic detectors that
//! resolve them from a [`RepositoryInput`](crate::bootstrap::RepositoryInput).
//!
//! All ID enums carry a `Custom(String)` variant so that values read back from
//! serialized profiles round-trip even when they name something unknown here.
//!
//! # Example
//!
//! ```no_run
//! use repobox::bootstrap::RepositoryInput;
//! use repobox::stack::{LanguageId, StackDetector};
//! use std::collections::BTreeMap;
//!
//! let input = RepositoryInput::new("/repo", ["app.py", "requirements.txt"], BTreeMap::new());
//! let detection = StackDetector::new().detect(&input);
//! assert_eq!(detection.primary_language, LanguageId::Python);
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod build_tools;
pub mod classifier;
pub mod detector;
pub mod framework;
pub mod framework_id;
pub mod language_id;
pub mod package_manager;
pub mod package_manager_id;
pub mod service_id;
pub mod services;

pub use detector::{StackDetection, StackDetector};
pub use framework_id::FrameworkId;
pub use language_id::{LanguageFamily, LanguageId};
pub use package_manager_id::PackageManagerId;
pub use service_id::ServiceId;
