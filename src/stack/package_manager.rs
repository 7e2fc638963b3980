//! Package manager detection from root-level lockfiles and manifests

use super::{LanguageId, PackageManagerId};
use crate::bootstrap::RepositoryInput;
use tracing::debug;

/// Ordered (file, manager) pairs. Lockfiles come before the manifests they lock.
const PACKAGE_MANAGER_FILES: &[(&str, PackageManagerId)] = &[
    ("uv.lock", PackageManagerId::Uv),
    ("poetry.lock", PackageManagerId::Poetry),
    ("Pipfile.lock", PackageManagerId::Pipenv),
    ("Pipfile", PackageManagerId::Pipenv),
    ("yarn.lock", PackageManagerId::Yarn),
    ("pnpm-lock.yaml", PackageManagerId::Pnpm),
    ("bun.lockb", PackageManagerId::Bun),
    ("package-lock.json", PackageManagerId::Npm),
    ("package.json", PackageManagerId::Npm),
    ("requirements.txt", PackageManagerId::Pip),
    ("pyproject.toml", PackageManagerId::Pip),
    ("setup.py", PackageManagerId::Pip),
    ("pom.xml", PackageManagerId::Maven),
    ("build.gradle", PackageManagerId::Gradle),
    ("build.gradle.kts", PackageManagerId::Gradle),
    ("Cargo.toml", PackageManagerId::Cargo),
    ("go.mod", PackageManagerId::Go),
    ("composer.json", PackageManagerId::Composer),
    ("Gemfile", PackageManagerId::Bundler),
];

/// First existing root-level file wins. Entries of the primary language's
/// ecosystem are tried before all others.
pub fn detect_package_manager(input: &RepositoryInput, primary: &LanguageId) -> PackageManagerId {
    let family = primary.family();
    let (own, rest): (Vec<_>, Vec<_>) = PACKAGE_MANAGER_FILES
        .iter()
        .partition(|(_, pm)| pm.family() == Some(family));

    for (file, pm) in own.into_iter().chain(rest) {
        if input.has_root_file(file) {
            debug!(file, package_manager = %pm, "Detected package manager");
            return pm.clone();
        }
    }

    PackageManagerId::Unknown
}
