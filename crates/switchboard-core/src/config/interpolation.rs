//! `${VAR}` and `${VAR:-default}` expansion over raw TOML values

use std::sync::LazyLock;

use regex::{
    Captures,
    Regex,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterpolationError {
    #[error("Required environment variable not found: {0}")]
    RequiredVarNotFound(String),

    #[error("Interpolation nested too deeply")]
    RecursionLimit,
}

pub type InterpolationResult<T> = Result<T, InterpolationError>;

const MAX_DEPTH: usize = 10;

// The default may itself hold one `${...}` reference
static VAR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-((?:[^{}]|\$\{[^{}]*\})*))?\}")
        .expect("variable pattern is a valid regex")
});

pub fn interpolate(input: &str) -> InterpolationResult<String> {
    interpolate_at_depth(input, 0)
}

fn interpolate_at_depth(input: &str, depth: usize) -> InterpolationResult<String> {
    if depth > MAX_DEPTH {
        return Err(InterpolationError::RecursionLimit);
    }

    let mut failure = None;
    let expanded = VAR_PATTERN.replace_all(input, |caps: &Captures<'_>| {
        match resolve(caps, depth) {
            Ok(value) => value,
            Err(e) => {
                failure.get_or_insert(e);
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(caps: &Captures<'_>, depth: usize) -> InterpolationResult<String> {
    let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    if let Ok(value) = std::env::var(name) {
        return Ok(value);
    }
    match caps.get(2) {
        Some(default) => interpolate_at_depth(default.as_str(), depth + 1),
        None => Err(InterpolationError::RequiredVarNotFound(name.to_string())),
    }
}

/// Expands every string in the tree, keys excluded
pub fn interpolate_toml(value: &mut toml::Value) -> InterpolationResult<()> {
    match value {
        toml::Value::String(s) => *s = interpolate(s)?,
        toml::Value::Array(items) => {
            for item in items {
                interpolate_toml(item)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                interpolate_toml(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn has_variables(input: &str) -> bool {
    VAR_PATTERN.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(interpolate("https://api.example.com").unwrap(), "https://api.example.com");
    }

    #[test]
    fn test_variable_inside_text() {
        std::env::set_var("SWB_TEST_REGION", "eu-west-1");
        let result = interpolate("https://api.${SWB_TEST_REGION}.example.com").unwrap();
        assert_eq!(result, "https://api.eu-west-1.example.com");
        std::env::remove_var("SWB_TEST_REGION");
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        assert_eq!(
            interpolate("${SWB_TEST_NEVER_SET_7731}"),
            Err(InterpolationError::RequiredVarNotFound(
                "SWB_TEST_NEVER_SET_7731".to_string()
            ))
        );
    }

    #[test]
    fn test_defaults() {
        assert_eq!(interpolate("${SWB_TEST_UNSET_A:-480}").unwrap(), "480");
        assert_eq!(interpolate("a${SWB_TEST_UNSET_B:-}b").unwrap(), "ab");
    }

    #[test]
    fn test_set_variable_beats_default() {
        std::env::set_var("SWB_TEST_TOKEN", "secret");
        assert_eq!(interpolate("${SWB_TEST_TOKEN:-fallback}").unwrap(), "secret");
        std::env::remove_var("SWB_TEST_TOKEN");
    }

    #[test]
    fn test_nested_default() {
        std::env::set_var("SWB_TEST_INNER", "inner");
        assert_eq!(interpolate("${SWB_TEST_UNSET_C:-${SWB_TEST_INNER}}").unwrap(), "inner");
        std::env::remove_var("SWB_TEST_INNER");
    }

    #[test]
    fn test_interpolate_toml_tree() {
        std::env::set_var("SWB_TEST_TOML", "value");
        let mut value: toml::Value = toml::from_str(
            r#"
            key = "${SWB_TEST_TOML}"
            nested = { inner = "${SWB_TEST_UNSET_D:-fallback}" }
            list = ["${SWB_TEST_TOML}", "static"]
            number = 3
            "#,
        )
        .unwrap();

        interpolate_toml(&mut value).unwrap();

        assert_eq!(value["key"].as_str(), Some("value"));
        assert_eq!(value["nested"]["inner"].as_str(), Some("fallback"));
        assert_eq!(value["list"][0].as_str(), Some("value"));
        assert_eq!(value["number"].as_integer(), Some(3));
        std::env::remove_var("SWB_TEST_TOML");
    }

    #[test]
    fn test_has_variables() {
        assert!(has_variables("${VAR}"));
        assert!(has_variables("x${VAR:-y}z"));
        assert!(!has_variables("$VAR"));
    }
}
