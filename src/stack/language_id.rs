crate::define_id_enum_with_display! {
    /// Programming language identifier
    LanguageId {
        Python => "Python" : "Python" | "python",
        JavaScript => "JavaScript" : "JavaScript" | "javascript" | "js",
        TypeScript => "TypeScript" : "TypeScript" | "typescript" | "ts",
        Java => "Java" : "Java" | "java",
        Go => "Go" : "Go" | "go" | "golang",
        Rust => "Rust" : "Rust" | "rust",
        Ruby => "Ruby" : "Ruby" | "ruby",
        Php => "PHP" : "PHP" | "php",
        CSharp => "C#" : "C#" | "csharp",
        Kotlin => "Kotlin" : "Kotlin" | "kotlin",
        Cpp => "C++" : "C++" | "cpp",
        C => "C" : "C" | "c",
        Swift => "Swift" : "Swift" | "swift",
        Dart => "Dart" : "Dart" | "dart",
        Scala => "Scala" : "Scala" | "scala",
        Elixir => "Elixir" : "Elixir" | "elixir",
        Shell => "Shell" : "Shell" | "shell" | "bash",
        Unknown => "unknown" : "unknown",
    }
}

impl Default for LanguageId {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Template family a language shares its container tooling with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    Python,
    JavaScript,
    Java,
    Go,
    Rust,
    Php,
    Ruby,
    Native,
    Other,
}

impl LanguageFamily {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::Java => "java",
            Self::Go => "go",
            Self::Rust => "rust",
            Self::Php => "php",
            Self::Ruby => "ruby",
            Self::Native => "native",
            Self::Other => "other",
        }
    }
}

impl LanguageId {
    /// Fixed extension table. Extensions are matched lowercase without the dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let lang = match ext {
            "py" | "pyw" => Self::Python,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" => Self::TypeScript,
            "java" => Self::Java,
            "kt" | "kts" => Self::Kotlin,
            "go" => Self::Go,
            "rs" => Self::Rust,
            "rb" => Self::Ruby,
            "php" => Self::Php,
            "cs" => Self::CSharp,
            "cpp" | "cc" | "cxx" | "hpp" => Self::Cpp,
            "c" | "h" => Self::C,
            "swift" => Self::Swift,
            "dart" => Self::Dart,
            "scala" => Self::Scala,
            "ex" | "exs" => Self::Elixir,
            "sh" => Self::Shell,
            _ => return None,
        };
        Some(lang)
    }

    pub fn family(&self) -> LanguageFamily {
        match self {
            Self::Python => LanguageFamily::Python,
            Self::JavaScript | Self::TypeScript => LanguageFamily::JavaScript,
            Self::Java | Self::Kotlin | Self::Scala => LanguageFamily::Java,
            Self::Go => LanguageFamily::Go,
            Self::Rust => LanguageFamily::Rust,
            Self::Php => LanguageFamily::Php,
            Self::Ruby => LanguageFamily::Ruby,
            Self::C | Self::Cpp => LanguageFamily::Native,
            _ => LanguageFamily::Other,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Language implied by a root-level manifest file name
    pub fn from_manifest(filename: &str) -> Option<Self> {
        let lang = match filename {
            "package.json" => Self::JavaScript,
            "requirements.txt" | "pyproject.toml" | "Pipfile" | "setup.py" => Self::Python,
            "pom.xml" | "build.gradle" | "build.gradle.kts" => Self::Java,
            "go.mod" => Self::Go,
            "Cargo.toml" => Self::Rust,
            "composer.json" => Self::Php,
            "Gemfile" => Self::Ruby,
            _ => return None,
        };
        Some(lang)
    }
}
