use super::LanguageFamily;

crate::define_id_enum_with_display! {
    /// Package manager identifier
    PackageManagerId {
        Uv => "uv" : "uv",
        Poetry => "poetry" : "Poetry",
        Pipenv => "pipenv" : "Pipenv",
        Pip => "pip" : "pip",
        Yarn => "yarn" : "Yarn",
        Pnpm => "pnpm" : "pnpm",
        Bun => "bun" : "Bun",
        Npm => "npm" : "npm",
        Maven => "maven" : "Maven",
        Gradle => "gradle" : "Gradle",
        Cargo => "cargo" : "Cargo",
        Go => "go" : "Go modules" | "gomod",
        Composer => "composer" : "Composer",
        Bundler => "bundler" : "Bundler" | "bundle",
        Unknown => "unknown" : "unknown",
    }
}

impl Default for PackageManagerId {
    fn default() -> Self {
        Self::Unknown
    }
}

impl PackageManagerId {
    pub fn family(&self) -> Option<LanguageFamily> {
        let family = match self {
            Self::Uv | Self::Poetry | Self::Pipenv | Self::Pip => LanguageFamily::Python,
            Self::Yarn | Self::Pnpm | Self::Bun | Self::Npm => LanguageFamily::JavaScript,
            Self::Maven | Self::Gradle => LanguageFamily::Java,
            Self::Cargo => LanguageFamily::Rust,
            Self::Go => LanguageFamily::Go,
            Self::Composer => LanguageFamily::Php,
            Self::Bundler => LanguageFamily::Ruby,
            Self::Unknown | Self::Custom(_) => return None,
        };
        Some(family)
    }

    /// Executable used in generated JavaScript commands
    pub fn node_cli(&self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
            _ => "npm",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&PackageManagerId::Uv).unwrap(), "\"uv\"");
        assert_eq!(
            serde_json::to_string(&PackageManagerId::Unknown).unwrap(),
            "\"unknown\""
        );
    }

    #[test]
    fn test_family() {
        assert_eq!(PackageManagerId::Yarn.family(), Some(LanguageFamily::JavaScript));
        assert_eq!(PackageManagerId::Unknown.family(), None);
    }

    #[test]
    fn test_node_cli() {
        assert_eq!(PackageManagerId::Pnpm.node_cli(), "pnpm");
        assert_eq!(PackageManagerId::Pip.node_cli(), "npm");
    }
}
