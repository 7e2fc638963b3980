//! Repository scanner tests against real directories

mod support;

use repobox::{
    render_artifacts, AnalysisPipeline, ConfigFormat, RepoboxConfig, RepositoryScanner, ScanError,
};
use support::{temp_repo, write_file};

#[test]
fn test_scan_skips_excluded_directories() {
    let repo = temp_repo(&[
        ("app.py", "print('hi')\n"),
        ("requirements.txt", "flask\n"),
        ("node_modules/express/index.js", "module.exports = {}\n"),
        (".git/config", "[core]\n"),
        ("venv/lib/site.py", "\n"),
        ("src/util/helpers.py", "\n"),
    ]);

    let input = RepositoryScanner::new(RepoboxConfig::default())
        .scan(repo.path())
        .expect("Scan failed");

    assert_eq!(
        input.file_paths,
        ["app.py", "requirements.txt", "src/util/helpers.py"]
    );
    assert!(input.manifest_contents.contains_key("requirements.txt"));
    assert!(input.manifest_contents.contains_key("app.py"));
    assert!(!input.manifest_contents.contains_key("src/util/helpers.py"));
}

#[test]
fn test_scan_caps_content() {
    let repo = temp_repo(&[("package.json", "{}")]);
    let big = format!("{{\"name\": \"x\", \"description\": \"{}\"}}", "é".repeat(5000));
    write_file(repo.path(), "package.json", &big);

    let config = RepoboxConfig {
        max_content_bytes: 1001,
        ..RepoboxConfig::default()
    };
    let input = RepositoryScanner::new(config).scan(repo.path()).unwrap();

    let content = &input.manifest_contents["package.json"];
    assert!(content.len() <= 1001);
    assert!(content.starts_with("{\"name\""));
}

#[test]
fn test_scan_respects_max_files() {
    let files: Vec<(String, &str)> = (0..20).map(|i| (format!("file{:02}.go", i), "")).collect();
    let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), *c)).collect();
    let repo = temp_repo(&refs);

    let config = RepoboxConfig {
        max_files: 5,
        ..RepoboxConfig::default()
    };
    let input = RepositoryScanner::new(config).scan(repo.path()).unwrap();
    assert_eq!(input.file_paths.len(), 5);
}

#[test]
fn test_scan_missing_path() {
    let repo = temp_repo(&[]);
    let missing = repo.path().join("does-not-exist");
    let err = RepositoryScanner::new(RepoboxConfig::default())
        .scan(&missing)
        .unwrap_err();
    assert!(matches!(err, ScanError::NotFound(_)));
}

#[test]
fn test_scan_file_instead_of_directory() {
    let repo = temp_repo(&[("main.go", "package main\n")]);
    let err = RepositoryScanner::new(RepoboxConfig::default())
        .scan(&repo.path().join("main.go"))
        .unwrap_err();
    assert!(matches!(err, ScanError::NotADirectory(_)));
}

#[test]
fn test_analyze_path_end_to_end() {
    let repo = temp_repo(&[
        ("go.mod", "module example.com/svc\n\nrequire github.com/gin-gonic/gin v1.9.1\n"),
        (
            "main.go",
            "package main\n\nfunc main() {\n\tr := gin.Default()\n\tr.Run(\":9090\")\n}\n",
        ),
    ]);

    let profile = AnalysisPipeline::new(RepoboxConfig::default())
        .analyze_path(repo.path())
        .unwrap();
    assert_eq!(profile.framework.key(), "gin");
    assert_eq!(profile.port, 9090);
    assert!(profile.dockerfile_content.contains("EXPOSE 9090"));
}

#[test]
fn test_generated_artifacts_do_not_feed_the_next_scan() {
    let repo = temp_repo(&[
        ("package.json", r#"{"dependencies":{"express":"^4.18.0"}}"#),
        ("server.js", "const app = express();\napp.listen(3000);\n"),
    ]);
    let pipeline = AnalysisPipeline::new(RepoboxConfig::default());

    let first = pipeline.analyze_path(repo.path()).unwrap();
    assert_eq!(first.port, 3000);
    render_artifacts(&first, &repo.path().join("containerization"), ConfigFormat::Yaml).unwrap();

    write_file(repo.path(), "server.js", "const app = express();\napp.listen(4000);\n");
    let second = pipeline.analyze_path(repo.path()).unwrap();
    assert_eq!(second.port, 4000);
    assert!(second.dockerfile_content.contains("EXPOSE 4000"));

    let input = RepositoryScanner::new(RepoboxConfig::default())
        .scan(repo.path())
        .unwrap();
    assert!(input
        .file_paths
        .iter()
        .all(|p| !p.starts_with("containerization/")));
}
