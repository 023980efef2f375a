use rmcp::model::{CallToolResult, RawContent};
use serde_json::Value;

/// Marker that starts the value section of a markdown tool report
const RESULT_HEADING: &str = "### Result";

/// Extract the value of an evaluate call.
///
/// Structured content wins over text. Text is parsed as JSON when possible and
/// otherwise returned as a plain string.
pub fn pick_value(result: &CallToolResult) -> Option<Value> {
    if let Some(structured) = &result.structured_content {
        return Some(structured.clone());
    }

    let text = result.content.iter().find_map(|c| match &c.raw {
        RawContent::Text(t) => Some(t.text.as_str()),
        _ => None,
    })?;

    let payload = result_section(text).unwrap_or(text);
    Some(serde_json::from_str(payload.trim()).unwrap_or_else(|_| Value::String(payload.trim().to_string())))
}

/// Body of the `### Result` section, if the text is a markdown report
fn result_section(text: &str) -> Option<&str> {
    let start = text.find(RESULT_HEADING)? + RESULT_HEADING.len();
    let rest = &text[start..];
    let end = rest.find("\n###").unwrap_or(rest.len());
    Some(rest[..end].trim())
}

/// Coerce an evaluated value to a boolean the way the page would
pub fn as_bool(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" | "" => false,
            _ => true,
        },
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Image payload of a screenshot response: (base64 data, mime type)
pub fn pick_image(result: &CallToolResult) -> Option<(&str, &str)> {
    result.content.iter().find_map(|c| match &c.raw {
        RawContent::Image(image) => Some((image.data.as_str(), image.mime_type.as_str())),
        _ => None,
    })
}
