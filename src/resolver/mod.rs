//! Element resolution inside the page
//!
//! The resolver is a small script installed into the page as `window.__mdw`.
//! It maps human wording onto DOM nodes through ordered fallback tiers:
//!
//! - `byLabel`: `<label>` text (via `for`, else the next field sibling),
//!   then `aria-label`, then `placeholder`
//! - `clickByText`: exact button text, button text, input button
//!   value/name/title, any element's text, form submission, Enter key
//! - `visibleTextExists`: whitespace-normalized substring of `body.innerText`
//!
//! Every tier is a pure lookup; only the winning tier's action touches the page.
//! When several nodes match within one tier, the first in document order wins.
//!
//! The functions here only build the JavaScript expressions sent through the
//! evaluate tool.

use serde_json::Value;

/// Script installing `window.__mdw`. Idempotent.
pub const HELPERS_JS: &str = include_str!("helpers.js");

/// Whether the loaded document shows any text at all
pub const PAGE_HAS_TEXT: &str = "!!(document.body && document.body.innerText.length > 0)";

/// Full markup of the current page
pub const PAGE_HTML: &str = "document.documentElement.outerHTML";

/// Quote a string as a JavaScript literal
fn js_string(s: &str) -> String {
    Value::from(s).to_string()
}

/// Focus the field for `label`, set `value` and fire input/change. Evaluates to a boolean.
pub fn type_by_label(label: &str, value: &str) -> String {
    format!("window.__mdw.typeByLabel({}, {})", js_string(label), js_string(value))
}

/// Activate the best control for `caption`. Evaluates to a boolean.
pub fn click_by_text(caption: &str) -> String {
    format!("window.__mdw.clickByText({})", js_string(caption))
}

/// Evaluates to whether `text` is part of the visible body text
pub fn visible_text_exists(text: &str) -> String {
    format!("window.__mdw.visibleTextExists({})", js_string(text))
}

/// Name of the click tier that would fire for `caption`, or null
pub fn click_tier_for(caption: &str) -> String {
    format!("window.__mdw.clickTierFor({})", js_string(caption))
}

/// Name of the field tier that resolves `label`, or null
pub fn label_tier_for(label: &str) -> String {
    format!("window.__mdw.labelTierFor({})", js_string(label))
}

/// `id` of the element resolved for `label`, or null
pub fn by_label_id(label: &str) -> String {
    format!("(window.__mdw.byLabel({}) || {{}}).id || null", js_string(label))
}
