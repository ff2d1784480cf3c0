/*!
 * Message templates with `{{.Field}}` placeholders.
 *
 * A template is literal text interleaved with actions. An action names a
 * field path read from the template data:
 *
 * - `{{.Name}}` reads `Name` from the data object
 * - `{{.Order.Total}}` reads through nested objects
 * - `{{.}}` renders the data value itself
 * - `{{/* note */}}` is a comment and renders nothing
 *
 * A `-` next to a delimiter (`{{- .Name -}}`) trims the whitespace of the
 * adjacent text. Parsing and rendering are separate steps so that malformed
 * templates are rejected before any output is produced.
 */

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Default opening delimiter
pub const DEFAULT_LEFT_DELIM: &str = "{{";

/// Default closing delimiter
pub const DEFAULT_RIGHT_DELIM: &str = "}}";

/// Errors raised while parsing or rendering a template
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    /// An action was opened but never closed
    #[error("unclosed action starting at byte {offset}")]
    UnclosedAction { offset: usize },

    /// A comment was opened but never closed
    #[error("unclosed comment starting at byte {offset}")]
    UnclosedComment { offset: usize },

    /// An action with nothing inside
    #[error("empty action at byte {offset}")]
    EmptyAction { offset: usize },

    /// Action content that is not a field path
    #[error("unexpected '{token}' in action at byte {offset}")]
    UnexpectedToken { offset: usize, token: String },

    /// A referenced field is absent from the data
    #[error("field '{path}' not found in template data")]
    MissingField { path: String },

    /// A field path walks into a value that is not an object
    #[error("cannot read field '{path}' of a non-object value")]
    NotAnObject { path: String },

    /// The caller's params could not be turned into template data
    #[error("template data could not be serialized: {0}")]
    InvalidData(#[source] Arc<serde_json::Error>),
}

impl TemplateError {
    /// Whether the error was raised while parsing rather than rendering
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Self::UnclosedAction { .. }
                | Self::UnclosedComment { .. }
                | Self::EmptyAction { .. }
                | Self::UnexpectedToken { .. }
        )
    }
}

/// Options applied when substituting values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Escape `& < > " '` in substituted values
    #[serde(default)]
    pub escape_html: bool,
}

/// Dotted reference into the template data; no segments means `.`
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    fn parse(content: &str, offset: usize) -> Result<Self, TemplateError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(TemplateError::EmptyAction { offset });
        }

        let Some(path) = content.strip_prefix('.') else {
            let token = content.split_whitespace().next().unwrap_or(content);
            return Err(TemplateError::UnexpectedToken {
                offset,
                token: token.to_string(),
            });
        };

        if path.is_empty() {
            return Ok(Self { segments: Vec::new() });
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if !segments.iter().all(|s| is_identifier(s)) {
            return Err(TemplateError::UnexpectedToken {
                offset,
                token: content.to_string(),
            });
        }

        Ok(Self { segments })
    }

    fn prefix(&self, len: usize) -> String {
        self.segments[..len].iter().map(|s| format!(".{}", s)).collect()
    }

    fn resolve<'v>(&self, data: &'v Value) -> Result<&'v Value, TemplateError> {
        let mut current = data;
        for (i, segment) in self.segments.iter().enumerate() {
            let object = current.as_object().ok_or_else(|| TemplateError::NotAnObject {
                path: self.prefix(i + 1),
            })?;
            current = object.get(segment).ok_or_else(|| TemplateError::MissingField {
                path: self.prefix(i + 1),
            })?;
        }
        Ok(current)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Field(FieldPath),
}

enum Action<'s> {
    Comment,
    Field(&'s str),
}

/// A parsed template, ready to render against any data value
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse a template using the default `{{` `}}` delimiters
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        Self::parse_with_delims(source, DEFAULT_LEFT_DELIM, DEFAULT_RIGHT_DELIM)
    }

    /// Parse a template with custom delimiters; an empty delimiter means the default
    pub fn parse_with_delims(source: &str, left: &str, right: &str) -> Result<Self, TemplateError> {
        let left = if left.is_empty() { DEFAULT_LEFT_DELIM } else { left };
        let right = if right.is_empty() { DEFAULT_RIGHT_DELIM } else { right };

        let mut nodes = Vec::new();
        let mut pos = 0;
        let mut trim_next_text = false;

        while let Some(found) = source[pos..].find(left) {
            let action_start = pos + found;
            let mut text = &source[pos..action_start];
            if trim_next_text {
                text = text.trim_start();
            }

            let mut inner_start = action_start + left.len();
            if has_trim_marker(&source[inner_start..]) {
                text = text.trim_end();
                inner_start += 1;
            }
            push_text(&mut nodes, text);

            let (action, end, trim_right) = scan_action(source, action_start, inner_start, right)?;
            if let Action::Field(content) = action {
                nodes.push(Node::Field(FieldPath::parse(content, action_start)?));
            }

            pos = end;
            trim_next_text = trim_right;
        }

        let mut text = &source[pos..];
        if trim_next_text {
            text = text.trim_start();
        }
        push_text(&mut nodes, text);

        Ok(Self { nodes })
    }

    /// Whether the template contains any field reference
    pub fn has_fields(&self) -> bool {
        self.nodes.iter().any(|n| matches!(n, Node::Field(_)))
    }

    /// Render against a JSON data value
    pub fn render(&self, data: &Value, options: &RenderOptions) -> Result<String, TemplateError> {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Field(path) => {
                    let value = value_to_string(path.resolve(data)?);
                    if options.escape_html {
                        push_escaped(&mut out, &value);
                    } else {
                        out.push_str(&value);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Render against any serializable value, read as a JSON object
    pub fn render_serializable<P: Serialize + ?Sized>(
        &self,
        params: &P,
        options: &RenderOptions,
    ) -> Result<String, TemplateError> {
        let data = serde_json::to_value(params)
            .map_err(|e| TemplateError::InvalidData(Arc::new(e)))?;
        self.render(&data, options)
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

fn has_trim_marker(after_left: &str) -> bool {
    let mut chars = after_left.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| c.is_ascii_whitespace())
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text.to_string()));
    }
}

/// Find the end of the action opened at `action_start`.
///
/// Returns the action, the byte offset just past the closing delimiter and
/// whether the action ends with a trim marker.
fn scan_action<'s>(
    source: &'s str,
    action_start: usize,
    inner_start: usize,
    right: &str,
) -> Result<(Action<'s>, usize, bool), TemplateError> {
    let body = &source[inner_start..];
    let lead = body.len() - body.trim_start().len();

    if body[lead..].starts_with("/*") {
        let comment_start = inner_start + lead + 2;
        let comment_len = source[comment_start..]
            .find("*/")
            .ok_or(TemplateError::UnclosedComment { offset: action_start })?;
        let after = comment_start + comment_len + 2;
        let close = source[after..]
            .find(right)
            .ok_or(TemplateError::UnclosedComment { offset: action_start })?;

        let between = source[after..after + close].trim();
        if !between.is_empty() && between != "-" {
            return Err(TemplateError::UnexpectedToken {
                offset: action_start,
                token: between.to_string(),
            });
        }
        return Ok((Action::Comment, after + close + right.len(), between == "-"));
    }

    let close = body
        .find(right)
        .ok_or(TemplateError::UnclosedAction { offset: action_start })?;
    let mut content = &body[..close];
    let mut trim_right = false;
    if let Some(stripped) = content.strip_suffix('-') {
        if stripped.ends_with(|c: char| c.is_ascii_whitespace()) {
            content = stripped;
            trim_right = true;
        }
    }

    Ok((Action::Field(content), inner_start + close + right.len(), trim_right))
}

fn value_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(b) => Cow::Owned(b.to_string()),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(source: &str, data: Value) -> Result<String, TemplateError> {
        Template::parse(source)?.render(&data, &RenderOptions::default())
    }

    #[test]
    fn test_render_withoutPlaceholders_shouldReturnTextUnchanged() {
        let text = "Plain text with } and { and a lone }} closer";
        assert_eq!(render(text, json!({"Unused": 1})).unwrap(), text);
        assert_eq!(render(text, Value::Null).unwrap(), text);
    }

    #[test]
    fn test_render_withFields_shouldSubstituteStringForms() {
        let out = render(
            "{{.Name}} paid {{.Price}} ({{.Ratio}}, {{.Paid}})",
            json!({"Name": "Nick", "Price": 123, "Ratio": 1.5, "Paid": true}),
        )
        .unwrap();
        assert_eq!(out, "Nick paid 123 (1.5, true)");
    }

    #[test]
    fn test_render_withNestedPathAndDot_shouldResolve() {
        let out = render("{{.Order.Total}}", json!({"Order": {"Total": 42}})).unwrap();
        assert_eq!(out, "42");

        let out = render("value={{.}}", json!("scalar")).unwrap();
        assert_eq!(out, "value=scalar");
    }

    #[test]
    fn test_render_withTrimMarkers_shouldStripAdjacentWhitespace() {
        let out = render("a  {{- .X -}}  b", json!({"X": "-"})).unwrap();
        assert_eq!(out, "a-b");
    }

    #[test]
    fn test_render_withComment_shouldRenderNothing() {
        let out = render("a{{/* ignored }} text */}}b", json!({})).unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn test_parse_withUnclosedAction_shouldFailWithSyntaxError() {
        let err = Template::parse("Hello {{.Name").unwrap_err();
        assert!(matches!(err, TemplateError::UnclosedAction { offset: 6 }));
        assert!(err.is_syntax());
    }

    #[test]
    fn test_parse_withMalformedActions_shouldFail() {
        assert!(matches!(Template::parse("{{}}"), Err(TemplateError::EmptyAction { .. })));
        assert!(matches!(Template::parse("{{{.Name}}"), Err(TemplateError::UnexpectedToken { .. })));
        assert!(matches!(Template::parse("{{Name}}"), Err(TemplateError::UnexpectedToken { .. })));
        assert!(matches!(Template::parse("{{.A..B}}"), Err(TemplateError::UnexpectedToken { .. })));
        assert!(matches!(Template::parse("{{/* open }}"), Err(TemplateError::UnclosedComment { .. })));
    }

    #[test]
    fn test_render_withMissingField_shouldFailWithoutPartialOutput() {
        let err = render("Hi {{.Name}}, {{.Missing}}", json!({"Name": "x"})).unwrap_err();
        assert!(matches!(err, TemplateError::MissingField { ref path } if path == ".Missing"));
        assert!(!err.is_syntax());
    }

    #[test]
    fn test_render_withScalarData_shouldReportNotAnObject() {
        let err = render("{{.Name}}", json!(5)).unwrap_err();
        assert!(matches!(err, TemplateError::NotAnObject { ref path } if path == ".Name"));
    }

    #[test]
    fn test_render_withEscapeHtml_shouldEscapeValuesOnly() {
        let template = Template::parse("<b>{{.V}}</b>").unwrap();
        let options = RenderOptions { escape_html: true };
        let out = template.render(&json!({"V": "<a href='x'>&</a>"}), &options).unwrap();
        assert_eq!(out, "<b>&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;</b>");
    }

    #[test]
    fn test_parseWithDelims_shouldUseCustomDelimiters() {
        let template = Template::parse_with_delims("<<.N>> and {{.N}}", "<<", ">>").unwrap();
        let out = template.render(&json!({"N": 3}), &RenderOptions::default()).unwrap();
        assert_eq!(out, "3 and {{.N}}");
    }

    #[test]
    fn test_renderSerializable_withStruct_shouldReadFields() {
        #[derive(Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Delivery {
            date: String,
            price: i64,
        }

        let template = Template::parse("{{.Date}}/{{.Price}}").unwrap();
        let out = template
            .render_serializable(
                &Delivery { date: "demain".to_string(), price: 123 },
                &RenderOptions::default(),
            )
            .unwrap();
        assert_eq!(out, "demain/123");
        assert!(template.has_fields());
    }

    #[test]
    fn test_renderSerializable_withUnserializableParams_shouldKeepSerdeSource() {
        let mut params = std::collections::HashMap::new();
        params.insert((1, 2), "tuple keys are not valid JSON object keys");

        let template = Template::parse("{{.}}").unwrap();
        let err = template
            .render_serializable(&params, &RenderOptions::default())
            .unwrap_err();

        assert!(matches!(err, TemplateError::InvalidData(_)));
        assert!(!err.is_syntax());
        let source = std::error::Error::source(&err).expect("serde error kept as source");
        assert!(source.to_string().contains("key must be a string"));
    }
}
