use serde_json::Value;

use crate::error::SpindleError;

/// Contract the framework consumes a template engine through.
///
/// A template is an arbitrary markup string with engine-defined placeholder
/// syntax; `render` resolves it against a JSON object (the store snapshot)
/// and returns the final HTML. The concrete engine is the host's choice —
/// the framework never inspects template syntax itself.
pub trait TemplateEngine: Send + Sync {
    /// Render `template` against `data`, returning HTML.
    fn render(&self, template: &str, data: &Value) -> Result<String, SpindleError>;
}

/// Reference engine: `{{ key }}` substitution against top-level keys.
///
/// Placeholders name a key in the data object; surrounding whitespace
/// inside the braces is ignored. Strings substitute unquoted, other values
/// substitute as their JSON text, missing keys substitute as the empty
/// string. An unterminated `{{` is an error.
pub struct PlaceholderEngine;

impl TemplateEngine for PlaceholderEngine {
    fn render(&self, template: &str, data: &Value) -> Result<String, SpindleError> {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or_else(|| SpindleError::Template("unterminated placeholder".into()))?;
            let key = after[..close].trim();
            match data.get(key) {
                Some(Value::String(s)) => out.push_str(s),
                Some(other) => out.push_str(&other.to_string()),
                None => {}
            }
            rest = &after[close + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ========================================================================
    // Substitution
    // ========================================================================

    #[test]
    fn substitutes_string_unquoted() {
        let html = PlaceholderEngine
            .render("<p>Hello {{name}}!</p>", &json!({"name": "alice"}))
            .unwrap();
        assert_eq!(html, "<p>Hello alice!</p>");
    }

    #[test]
    fn substitutes_number_as_json_text() {
        let html = PlaceholderEngine
            .render("count: {{count}}", &json!({"count": 42}))
            .unwrap();
        assert_eq!(html, "count: 42");
    }

    #[test]
    fn whitespace_inside_braces_is_ignored() {
        let html = PlaceholderEngine
            .render("{{ name }}", &json!({"name": "bob"}))
            .unwrap();
        assert_eq!(html, "bob");
    }

    #[test]
    fn missing_key_substitutes_empty() {
        let html = PlaceholderEngine
            .render("[{{ghost}}]", &json!({}))
            .unwrap();
        assert_eq!(html, "[]");
    }

    #[test]
    fn multiple_placeholders() {
        let html = PlaceholderEngine
            .render(
                "{{a}} + {{b}} = {{sum}}",
                &json!({"a": 1, "b": 2, "sum": 3}),
            )
            .unwrap();
        assert_eq!(html, "1 + 2 = 3");
    }

    #[test]
    fn template_without_placeholders_passes_through() {
        let html = PlaceholderEngine
            .render("<div>static</div>", &json!({"unused": 1}))
            .unwrap();
        assert_eq!(html, "<div>static</div>");
    }

    #[test]
    fn object_value_substitutes_as_json() {
        let html = PlaceholderEngine
            .render("{{user}}", &json!({"user": {"id": 1}}))
            .unwrap();
        assert_eq!(html, r#"{"id":1}"#);
    }

    // ========================================================================
    // Errors
    // ========================================================================

    #[test]
    fn unterminated_placeholder_is_error() {
        let err = PlaceholderEngine
            .render("broken {{name", &json!({"name": "x"}))
            .unwrap_err();
        assert!(matches!(err, SpindleError::Template(_)));
    }
}
