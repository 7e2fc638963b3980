//! Output data structures

pub mod schema;

pub use schema::{ContainerConfigFile, Phase, RepositoryProfile};
