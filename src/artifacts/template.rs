//! Minimal named-placeholder renderer for the fixed artifact templates.
//!
//! Placeholders look like `{{name}}`. Values come in three kinds:
//! - scalar text, single line, control characters rejected
//! - exec-form arrays, JSON-encoded so they are valid `CMD [...]` / `test: [...]`
//! - blocks, multi-line fragments that must be `&'static str`

use std::collections::BTreeMap;
use thiserror::Error;

/// Every placeholder name the templates may use
pub const KNOWN_PARAMETERS: &[&str] = &[
    "base_image",
    "builder_image",
    "runtime_image",
    "port",
    "cmd",
    "build_cmd",
    "setup_cmd",
    "health_check",
    "health_test",
    "install_block",
    "build_block",
];

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("Unknown template parameter '{0}'")]
    UnknownParameter(String),

    #[error("No value for template parameter '{0}'")]
    MissingParameter(String),

    #[error("Value for '{0}' contains control characters")]
    ControlCharacters(String),

    #[error("Exec-form value for '{0}' is empty")]
    EmptyExec(String),

    #[error("Unterminated placeholder at byte {0}")]
    Unterminated(usize),
}

fn check_known(name: &str) -> Result<(), TemplateError> {
    if KNOWN_PARAMETERS.contains(&name) {
        Ok(())
    } else {
        Err(TemplateError::UnknownParameter(name.to_string()))
    }
}

fn check_line(name: &str, value: &str) -> Result<(), TemplateError> {
    if value.chars().any(char::is_control) {
        return Err(TemplateError::ControlCharacters(name.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Default)]
pub struct TemplateParams {
    values: BTreeMap<&'static str, String>,
}

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, name: &str, value: String) -> Result<&mut Self, TemplateError> {
        let key = KNOWN_PARAMETERS
            .iter()
            .copied()
            .find(|k| *k == name)
            .ok_or_else(|| TemplateError::UnknownParameter(name.to_string()))?;
        self.values.insert(key, value);
        Ok(self)
    }

    /// Single-line scalar
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<&mut Self, TemplateError> {
        let value = value.into();
        check_line(name, &value)?;
        self.insert(name, value)
    }

    /// JSON array of strings, for exec-form instructions
    pub fn set_exec<S: AsRef<str>>(
        &mut self,
        name: &str,
        args: &[S],
    ) -> Result<&mut Self, TemplateError> {
        if args.is_empty() {
            return Err(TemplateError::EmptyExec(name.to_string()));
        }
        for arg in args {
            check_line(name, arg.as_ref())?;
        }
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        // a Vec<&str> always serializes
        let encoded = serde_json::to_string(&args).unwrap_or_default();
        self.insert(name, encoded)
    }

    /// Fixed multi-line fragment
    pub fn set_block(&mut self, name: &str, block: &'static str) -> Result<&mut Self, TemplateError> {
        self.insert(name, block.trim_end_matches('\n').to_string())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Renders `template`, substituting every `{{name}}`
pub fn render(template: &str, params: &TemplateParams) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 256);
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or(TemplateError::Unterminated(offset + start))?;
        let name = after[..end].trim();
        check_known(name)?;
        let value = params
            .get(name)
            .ok_or_else(|| TemplateError::MissingParameter(name.to_string()))?;
        out.push_str(value);

        let consumed = start + 2 + end + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Splits a generated command line into exec-form arguments
pub fn exec_args(command: &str) -> Vec<&str> {
    command.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_all() {
        let mut params = TemplateParams::new();
        params.set("port", "8000").unwrap();
        params.set_exec("cmd", &["python", "app.py"]).unwrap();
        let out = render("EXPOSE {{port}}\nCMD {{ cmd }}\n", &params).unwrap();
        assert_eq!(out, "EXPOSE 8000\nCMD [\"python\",\"app.py\"]\n");
    }

    #[test]
    fn test_missing_and_unknown() {
        let params = TemplateParams::new();
        assert_eq!(
            render("EXPOSE {{port}}", &params),
            Err(TemplateError::MissingParameter("port".to_string()))
        );
        assert_eq!(
            render("{{nope}}", &params),
            Err(TemplateError::UnknownParameter("nope".to_string()))
        );
        assert!(TemplateParams::new().set("nope", "x").is_err());
        assert_eq!(render("{{port", &params), Err(TemplateError::Unterminated(0)));
    }

    #[test]
    fn test_control_characters_rejected() {
        let mut params = TemplateParams::new();
        assert_eq!(
            params.set("health_check", "curl x\nRUN rm -rf /").unwrap_err(),
            TemplateError::ControlCharacters("health_check".to_string())
        );
        assert!(params.set_exec("cmd", &["ok", "bad\r"]).is_err());
    }

    #[test]
    fn test_exec_values_are_json_escaped() {
        let mut params = TemplateParams::new();
        params.set_exec("cmd", &["echo", "say \"hi\""]).unwrap();
        assert_eq!(params.get("cmd"), Some(r#"["echo","say \"hi\""]"#));
        assert!(params.set_exec::<&str>("cmd", &[]).is_err());
    }

    #[test]
    fn test_blocks_keep_newlines() {
        let mut params = TemplateParams::new();
        params.set_block("install_block", "RUN a\nRUN b\n").unwrap();
        let out = render("{{install_block}}\nCOPY . .", &params).unwrap();
        assert_eq!(out, "RUN a\nRUN b\nCOPY . .");
    }
}
