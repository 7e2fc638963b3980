//! Build tool detection from marker files and package.json scripts

use crate::bootstrap::RepositoryInput;
use crate::extractors::dependencies::package_json_scripts;
use std::collections::BTreeSet;

/// Root-relative marker path to tool name
const BUILD_TOOL_MARKERS: &[(&str, &str)] = &[
    ("webpack.config.js", "webpack"),
    ("rollup.config.js", "rollup"),
    ("vite.config.js", "vite"),
    ("vite.config.ts", "vite"),
    ("gulpfile.js", "gulp"),
    ("Gruntfile.js", "grunt"),
    ("tsconfig.json", "typescript"),
    ("babel.config.js", "babel"),
    (".babelrc", "babel"),
    ("Makefile", "make"),
    ("CMakeLists.txt", "cmake"),
    ("build.gradle", "gradle"),
    ("build.gradle.kts", "gradle"),
    ("pom.xml", "maven"),
    ("Cargo.toml", "cargo"),
    ("go.mod", "go"),
    ("setup.py", "python setuptools"),
    ("pyproject.toml", "python build"),
    ("tox.ini", "tox"),
    ("Dockerfile", "docker"),
    ("docker-compose.yml", "docker-compose"),
    ("docker-compose.yaml", "docker-compose"),
    ("Jenkinsfile", "jenkins"),
    (".travis.yml", "travis-ci"),
    (".circleci/config.yml", "circleci"),
];

pub fn detect_build_tools(input: &RepositoryInput) -> BTreeSet<String> {
    let mut tools: BTreeSet<String> = BUILD_TOOL_MARKERS
        .iter()
        .filter(|(marker, _)| input.has_root_file(marker))
        .map(|(_, tool)| tool.to_string())
        .collect();

    if input.has_path_prefix(".github/workflows/") {
        tools.insert("github-actions".to_string());
    }

    if let Some(scripts) = input.root_content("package.json").and_then(package_json_scripts) {
        for script in ["build", "test", "start"] {
            if scripts.contains(script) {
                tools.insert(format!("npm {}", script));
            }
        }
    }

    tools
}
