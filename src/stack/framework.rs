//! Framework detection: marker files first, then manifest content sniffing

use super::{FrameworkId, LanguageFamily, LanguageId};
use crate::bootstrap::RepositoryInput;
use tracing::debug;

/// Files whose mere presence at the root identifies a framework
const MARKER_FILES: &[(&str, FrameworkId)] = &[
    ("manage.py", FrameworkId::Django),
    ("next.config.js", FrameworkId::NextJs),
    ("next.config.mjs", FrameworkId::NextJs),
    ("next.config.ts", FrameworkId::NextJs),
    ("angular.json", FrameworkId::Angular),
    ("nuxt.config.js", FrameworkId::Nuxt),
    ("nuxt.config.ts", FrameworkId::Nuxt),
    ("gatsby-config.js", FrameworkId::Gatsby),
    ("vue.config.js", FrameworkId::Vue),
    ("artisan", FrameworkId::Laravel),
    ("config/application.rb", FrameworkId::Rails),
];

/// Keyword table for one manifest. Keywords are matched lowercase.
struct ManifestKeywords {
    manifest: &'static str,
    family: LanguageFamily,
    keywords: &'static [(&'static str, FrameworkId)],
}

const PYTHON_KEYWORDS: &[(&str, FrameworkId)] = &[
    ("django", FrameworkId::Django),
    ("flask", FrameworkId::Flask),
    ("fastapi", FrameworkId::FastApi),
    ("tornado", FrameworkId::Tornado),
    ("bottle", FrameworkId::Bottle),
];

const JVM_KEYWORDS: &[(&str, FrameworkId)] = &[
    ("spring-boot", FrameworkId::Spring),
    ("springframework", FrameworkId::Spring),
    ("quarkus", FrameworkId::Quarkus),
    ("micronaut", FrameworkId::Micronaut),
];

const SNIFF_TABLE: &[ManifestKeywords] = &[
    ManifestKeywords {
        manifest: "package.json",
        family: LanguageFamily::JavaScript,
        keywords: &[
            ("\"next\"", FrameworkId::NextJs),
            ("\"nuxt\"", FrameworkId::Nuxt),
            ("\"gatsby\"", FrameworkId::Gatsby),
            ("\"@angular/core\"", FrameworkId::Angular),
            ("\"@nestjs/core\"", FrameworkId::NestJs),
            ("\"vue\"", FrameworkId::Vue),
            ("\"react\"", FrameworkId::React),
            ("\"express\"", FrameworkId::Express),
            ("\"fastify\"", FrameworkId::Fastify),
        ],
    },
    ManifestKeywords {
        manifest: "requirements.txt",
        family: LanguageFamily::Python,
        keywords: PYTHON_KEYWORDS,
    },
    ManifestKeywords {
        manifest: "Pipfile",
        family: LanguageFamily::Python,
        keywords: PYTHON_KEYWORDS,
    },
    ManifestKeywords {
        manifest: "pyproject.toml",
        family: LanguageFamily::Python,
        keywords: PYTHON_KEYWORDS,
    },
    ManifestKeywords {
        manifest: "pom.xml",
        family: LanguageFamily::Java,
        keywords: JVM_KEYWORDS,
    },
    ManifestKeywords {
        manifest: "build.gradle",
        family: LanguageFamily::Java,
        keywords: JVM_KEYWORDS,
    },
    ManifestKeywords {
        manifest: "build.gradle.kts",
        family: LanguageFamily::Java,
        keywords: JVM_KEYWORDS,
    },
    ManifestKeywords {
        manifest: "Cargo.toml",
        family: LanguageFamily::Rust,
        keywords: &[
            ("actix-web", FrameworkId::Actix),
            ("axum", FrameworkId::Axum),
            ("rocket", FrameworkId::Rocket),
            ("warp", FrameworkId::Warp),
        ],
    },
    ManifestKeywords {
        manifest: "go.mod",
        family: LanguageFamily::Go,
        keywords: &[
            ("github.com/gin-gonic/gin", FrameworkId::Gin),
            ("github.com/labstack/echo", FrameworkId::Echo),
            ("github.com/gofiber/fiber", FrameworkId::Fiber),
            ("github.com/gorilla/mux", FrameworkId::Gorilla),
        ],
    },
    ManifestKeywords {
        manifest: "composer.json",
        family: LanguageFamily::Php,
        keywords: &[
            ("laravel/framework", FrameworkId::Laravel),
            ("symfony/", FrameworkId::Symfony),
        ],
    },
    ManifestKeywords {
        manifest: "Gemfile",
        family: LanguageFamily::Ruby,
        keywords: &[
            ("'rails'", FrameworkId::Rails),
            ("\"rails\"", FrameworkId::Rails),
            ("'sinatra'", FrameworkId::Sinatra),
            ("\"sinatra\"", FrameworkId::Sinatra),
        ],
    },
];

pub fn detect_framework(input: &RepositoryInput, primary: &LanguageId) -> FrameworkId {
    if let Some(framework) = detect_from_markers(input) {
        return framework;
    }
    if let Some(framework) = detect_from_manifests(input, primary.family()) {
        return framework;
    }
    FrameworkId::Generic
}

fn detect_from_markers(input: &RepositoryInput) -> Option<FrameworkId> {
    if input.has_root_file("pom.xml") && input.has_path_prefix("src/main/java/") {
        debug!(marker = "pom.xml + src/main/java/", "Detected framework spring");
        return Some(FrameworkId::Spring);
    }

    MARKER_FILES.iter().find_map(|(file, framework)| {
        if input.has_root_file(file) {
            debug!(marker = file, framework = %framework, "Detected framework from marker file");
            Some(framework.clone())
        } else {
            None
        }
    })
}

fn detect_from_manifests(input: &RepositoryInput, family: LanguageFamily) -> Option<FrameworkId> {
    let (own, rest): (Vec<_>, Vec<_>) = SNIFF_TABLE.iter().partition(|t| t.family == family);

    for table in own.into_iter().chain(rest) {
        let Some(content) = input.root_content(table.manifest) else {
            continue;
        };
        let content = content.to_lowercase();
        for (keyword, framework) in table.keywords {
            if content.contains(keyword) {
                debug!(
                    manifest = table.manifest,
                    keyword,
                    framework = %framework,
                    "Detected framework from manifest content"
                );
                return Some(framework.clone());
            }
        }
    }
    None
}
