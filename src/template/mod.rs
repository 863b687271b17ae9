//! Placeholder substitution for the scaffolding templates.
//!
//! Templates are opaque text containing `{{TOKEN}}` placeholders, where
//! `TOKEN` is made of ASCII letters, digits and underscores. Anything else,
//! including lone braces, is copied through untouched, so Dockerfiles and
//! YAML files need no escaping.
//!
//! # Error Handling
//!
//! Substitution is checked in both directions: a placeholder with no value
//! is an error, and so is a value whose token never appears in the template.
//! The second check catches templates that drifted away from the code that
//! renders them.

pub mod store;

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

pub use store::TemplateStore;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("Invalid placeholder regex")
});

/// Error type for template rendering failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder was found in the template but no value was provided.
    UndefinedToken {
        /// The token name, without braces.
        name: String,
        /// Byte offset of the placeholder in the template.
        position: usize,
    },
    /// A value was provided for a token the template never mentions.
    UnusedToken {
        /// The token name, without braces.
        name: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UndefinedToken { name, position } => {
                write!(
                    f,
                    "placeholder '{{{{{}}}}}' at position {} has no value",
                    name, position
                )
            }
            TemplateError::UnusedToken { name } => {
                write!(
                    f,
                    "value supplied for '{{{{{}}}}}' but the template has no such placeholder",
                    name
                )
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Render a template by substituting every `{{TOKEN}}` placeholder.
///
/// # Returns
///
/// * `Ok(String)` - The rendered text
/// * `Err(TemplateError)` - If a placeholder has no value, or a value has no placeholder
///
/// # Examples
///
/// ```ignore
/// let tokens = tokens([("PY_VER", "3.11")]);
/// let out = render_template("FROM python:{{PY_VER}}-slim", &tokens)?;
/// assert_eq!(out, "FROM python:3.11-slim");
/// ```
pub fn render_template(
    template: &str,
    tokens: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut result = String::with_capacity(template.len());
    let mut last_end = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let value = tokens
            .get(name.as_str())
            .ok_or_else(|| TemplateError::UndefinedToken {
                name: name.as_str().to_string(),
                position: whole.start(),
            })?;

        result.push_str(&template[last_end..whole.start()]);
        result.push_str(value);
        last_end = whole.end();
    }
    result.push_str(&template[last_end..]);

    // Report unused tokens in a stable order.
    let present = template_tokens(template);
    let mut supplied: Vec<&String> = tokens.keys().collect();
    supplied.sort();
    if let Some(unused) = supplied.into_iter().find(|k| !present.contains(k)) {
        return Err(TemplateError::UnusedToken {
            name: unused.clone(),
        });
    }

    Ok(result)
}

/// List the distinct placeholder names in a template, in order of first use.
pub fn template_tokens(template: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        if let Some(name) = caps.get(1)
            && !names.iter().any(|n| n == name.as_str())
        {
            names.push(name.as_str().to_string());
        }
    }
    names
}

/// Helper to create a token map from a list of key-value pairs.
pub fn tokens<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_substitution() {
        let t = tokens([("PY_VER", "3.11")]);
        let result = render_template("FROM python:{{PY_VER}}-slim\n", &t).unwrap();
        assert_eq!(result, "FROM python:3.11-slim\n");
    }

    #[test]
    fn test_no_placeholders() {
        let result = render_template("Just plain text", &HashMap::new()).unwrap();
        assert_eq!(result, "Just plain text");
    }

    #[test]
    fn test_empty_template() {
        let result = render_template("", &HashMap::new()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_multiple_occurrences() {
        let t = tokens([("WORKSPACE", "demo")]);
        let result =
            render_template("/workspaces/{{WORKSPACE}} {{WORKSPACE}}-dev", &t).unwrap();
        assert_eq!(result, "/workspaces/demo demo-dev");
    }

    #[test]
    fn test_adjacent_placeholders() {
        let t = tokens([("A", "1"), ("B", "2")]);
        let result = render_template("{{A}}{{B}}", &t).unwrap();
        assert_eq!(result, "12");
    }

    #[test]
    fn test_single_braces_are_literal() {
        let t = tokens([("NAME", "x")]);
        let result = render_template("{ \"name\": \"{{NAME}}\" }", &t).unwrap();
        assert_eq!(result, "{ \"name\": \"x\" }");
    }

    #[test]
    fn test_non_token_braces_are_literal() {
        // Shell and workflow syntax like `${{ matrix.python }}` must pass through.
        let result =
            render_template("python-version: ${{ matrix.python }}", &HashMap::new()).unwrap();
        assert_eq!(result, "python-version: ${{ matrix.python }}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let t = tokens([("NAME", "{{PY_VER}}")]);
        let result = render_template("{{NAME}}", &t).unwrap();
        assert_eq!(result, "{{PY_VER}}");
    }

    #[test]
    fn test_undefined_token_error() {
        let result = render_template("Hello {{NAME}}", &HashMap::new());
        assert_eq!(
            result.unwrap_err(),
            TemplateError::UndefinedToken {
                name: "NAME".to_string(),
                position: 6,
            }
        );
    }

    #[test]
    fn test_unused_token_error() {
        let t = tokens([("PY_VER", "3.11"), ("NAME", "demo")]);
        let result = render_template("FROM python:{{PY_VER}}", &t);
        assert_eq!(
            result.unwrap_err(),
            TemplateError::UnusedToken {
                name: "NAME".to_string()
            }
        );
    }

    #[test]
    fn test_empty_value_substitution() {
        let t = tokens([("EMPTY", "")]);
        let result = render_template("before{{EMPTY}}after", &t).unwrap();
        assert_eq!(result, "beforeafter");
    }

    #[test]
    fn test_unicode_in_template_and_values() {
        let t = tokens([("NAME", "日本語 🎉")]);
        let result = render_template("é {{NAME}} ü", &t).unwrap();
        assert_eq!(result, "é 日本語 🎉 ü");
    }

    #[test]
    fn test_template_tokens_in_first_use_order() {
        let names = template_tokens("{{B}} {{A}} {{B}} {{ C }} {{C_1}}");
        assert_eq!(names, vec!["B", "A", "C_1"]);
    }

    #[test]
    fn test_error_display() {
        let err = TemplateError::UndefinedToken {
            name: "PORTS".to_string(),
            position: 10,
        };
        assert_eq!(
            err.to_string(),
            "placeholder '{{PORTS}}' at position 10 has no value"
        );

        let err = TemplateError::UnusedToken {
            name: "NAME".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "value supplied for '{{NAME}}' but the template has no such placeholder"
        );
    }
}
