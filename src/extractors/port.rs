//! Port extractor - deterministic extraction of the listening port from loaded content

use crate::bootstrap::RepositoryInput;
use crate::stack::FrameworkId;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

pub const DEFAULT_PORT: u16 = 8080;
const MIN_DETECTED_PORT: u16 = 1000;

/// Ordered (pattern, name) pairs. The first capture group is the port.
///
/// Assignments only count for the application's own port names; other
/// `*_PORT` settings such as `REDIS_PORT` describe backing services.
const PORT_PATTERNS: &[(&str, &str)] = &[
    (
        r#"(?i)(?:^|[^a-z0-9_.])(?:server[._]port|app_port|port)["']?\s*[=:]\s*(\d+)"#,
        "port assignment",
    ),
    (r"app\.listen\(\s*(\d+)", "app.listen"),
    (r"\.run\([^)]*?port\s*=\s*(\d+)", "run(port=)"),
    (r#"(?:ListenAndServe|\.Run)\(\s*"[^"]*:(\d+)""#, "go listen address"),
    (r"(?m)^\s*EXPOSE\s+(\d+)", "Dockerfile EXPOSE"),
    (r"--port[= ](\d+)", "--port flag"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSource {
    Detected,
    FrameworkDefault,
    Fallback,
}

fn port_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        PORT_PATTERNS
            .iter()
            .map(|(p, name)| (Regex::new(p).expect("valid regex"), *name))
            .collect()
    })
}

/// First in-range match of the highest-priority pattern, scanning contents in path order
pub fn detect_port_in_contents(input: &RepositoryInput) -> Option<u16> {
    for (re, name) in port_patterns() {
        for (path, content) in input.contents() {
            for cap in re.captures_iter(content) {
                let Some(port) = cap.get(1).and_then(|m| m.as_str().parse::<u16>().ok()) else {
                    continue;
                };
                if port >= MIN_DETECTED_PORT {
                    debug!(port, pattern = name, path, "Detected port");
                    return Some(port);
                }
            }
        }
    }
    None
}

/// Detected port, else the framework default, else 8080
pub fn resolve_port(input: &RepositoryInput, framework: &FrameworkId) -> (u16, PortSource) {
    if let Some(port) = detect_port_in_contents(input) {
        return (port, PortSource::Detected);
    }
    if let Some(port) = framework.default_port() {
        return (port, PortSource::FrameworkDefault);
    }
    (DEFAULT_PORT, PortSource::Fallback)
}
