//! `{{variable}}` placeholder handling shared by built-in and custom templates.

use serde::{Deserialize, Serialize};

/// Result alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Placeholder name the built-in templates use for the caller's input.
pub const INPUT_VARIABLE: &str = "input";

/// Errors that can occur during template operations.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template definition itself is unusable.
    #[error("invalid template: {reason}")]
    Invalid {
        /// Reason for the failure.
        reason: String,
    },
}

/// Replaces every `{{input}}` placeholder in `template` with `input`.
///
/// Substitution is a single pass over the template, so placeholder-like text
/// inside `input` is copied verbatim and never expanded.
#[must_use]
pub fn interpolate(template: &str, input: &str) -> String {
    template.replace(&placeholder(INPUT_VARIABLE), input)
}

/// A caller-submitted template.
///
/// Custom templates are acknowledged but not stored; the service reports the
/// variables it found so callers can check their placeholders.
///
/// # Examples
///
/// ```
/// use writer_prompts::CustomTemplate;
///
/// let template = CustomTemplate::new("intro", "Write about {{topic}} for {{audience}}").unwrap();
/// assert_eq!(template.variables(), ["topic", "audience"]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomTemplate {
    name: String,
    content: String,
    variables: Vec<String>,
}

impl CustomTemplate {
    /// Creates a template, extracting its variable references.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Invalid`] if the name or content is empty.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> TemplateResult<Self> {
        let name = name.into();
        let content = content.into();
        if name.is_empty() {
            return Err(TemplateError::Invalid {
                reason: "template name must not be empty".to_owned(),
            });
        }
        if content.is_empty() {
            return Err(TemplateError::Invalid {
                reason: "template content must not be empty".to_owned(),
            });
        }

        let variables = extract_variable_refs(&content);
        Ok(Self {
            name,
            content,
            variables,
        })
    }

    /// Returns the template name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the distinct variable names in order of first appearance.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

fn placeholder(name: &str) -> String {
    format!("{{{{{name}}}}}")
}

/// Extracts distinct variable names from a template string.
fn extract_variable_refs(template: &str) -> Vec<String> {
    let mut vars: Vec<String> = Vec::new();
    let mut chars = template.chars().peekable();
    let mut in_var = false;
    let mut current_var = String::new();

    while let Some(ch) = chars.next() {
        if ch == '{' && chars.peek() == Some(&'{') {
            chars.next(); // consume second brace
            in_var = true;
            current_var.clear();
        } else if ch == '}' && in_var && chars.peek() == Some(&'}') {
            chars.next(); // consume second brace
            in_var = false;
            let name = current_var.trim();
            if !name.is_empty() && !vars.iter().any(|existing| existing == name) {
                vars.push(name.to_owned());
            }
            current_var.clear();
        } else if in_var {
            current_var.push(ch);
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_every_input_placeholder() {
        let rendered = interpolate("About {{input}}.\n\nAgain: {{input}}", "otters");
        assert_eq!(rendered, "About otters.\n\nAgain: otters");
    }

    #[test]
    fn interpolation_does_not_expand_placeholders_in_input() {
        let rendered = interpolate("Topic: {{input}}", "{{input}} twice");
        assert_eq!(rendered, "Topic: {{input}} twice");
    }

    #[test]
    fn extracts_variable_refs() {
        let vars = extract_variable_refs("Hello {{name}}, you are {{ age }} years old. {{name}}");
        assert_eq!(vars, vec!["name".to_owned(), "age".to_owned()]);
    }

    #[test]
    fn ignores_single_braces() {
        let vars = extract_variable_refs("fn main() { println!(\"{}\", {{code}}); }");
        assert_eq!(vars, vec!["code".to_owned()]);
    }

    #[test]
    fn custom_template_reports_distinct_variables() {
        let template =
            CustomTemplate::new("launch", "Announce {{product}} to {{audience}}, {{product}} first")
                .unwrap();
        assert_eq!(template.name(), "launch");
        assert_eq!(template.variables(), ["product", "audience"]);
    }

    #[test]
    fn rejects_empty_definitions() {
        let err = CustomTemplate::new("", "body").expect_err("empty name");
        assert!(matches!(err, TemplateError::Invalid { .. }));
        let err = CustomTemplate::new("name", "").expect_err("empty content");
        assert!(matches!(err, TemplateError::Invalid { .. }));
    }
}
