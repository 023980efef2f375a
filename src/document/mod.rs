//! Document parsing
//!
//! A document is loosely structured Markdown-ish text:
//!
//! ```text
//! suite: Login
//!
//! case: 正常ログイン
//! - /login に移動
//! - メールアドレス に user@example.com を入力
//! ```
//!
//! Steps are passed through verbatim (marker stripped, trimmed). Whether a step
//! means anything is decided later by the step classifier.

use serde::{Deserialize, Serialize};

/// Suite name used when the document has no `suite:` line
pub const DEFAULT_SUITE_NAME: &str = "Suite";

/// Case title used when the document has no `case:` markers
pub const DEFAULT_CASE_TITLE: &str = "default";

/// A named, ordered group of raw steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub title: String,
    pub steps: Vec<String>,
}

/// All cases parsed from one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,
    pub cases: Vec<Case>,
}

/// One step tagged with the case it belongs to, in execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatStep {
    pub case_title: String,
    pub step: String,
}

impl Suite {
    /// Parse a document into a suite
    pub fn parse(text: &str) -> Self {
        parse(text)
    }

    /// Steps of every case, flattened in execution order
    pub fn flat_steps(&self) -> Vec<FlatStep> {
        self.cases
            .iter()
            .flat_map(|case| {
                case.steps.iter().map(move |step| FlatStep { case_title: case.title.clone(), step: step.clone() })
            })
            .collect()
    }

    pub fn step_count(&self) -> usize {
        self.cases.iter().map(|c| c.steps.len()).sum()
    }
}

/// Parse raw document text into a [`Suite`]
pub fn parse(text: &str) -> Suite {
    let mut name = None;
    let mut cases: Vec<Case> = Vec::new();
    let mut all_bullets = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if name.is_none() {
            if let Some(rest) = trimmed.strip_prefix("suite:") {
                let rest = rest.trim();
                if !rest.is_empty() {
                    name = Some(rest.to_string());
                }
                continue;
            }
        }

        if let Some(rest) = trimmed.strip_prefix("case:") {
            cases.push(Case { title: rest.trim().to_string(), steps: Vec::new() });
            continue;
        }

        if let Some(step) = bullet_step(trimmed) {
            all_bullets.push(step.clone());
            // Bullets before the first case marker belong to no case
            if let Some(case) = cases.last_mut() {
                case.steps.push(step);
            }
        }
    }

    if cases.is_empty() {
        cases.push(Case { title: DEFAULT_CASE_TITLE.to_string(), steps: all_bullets });
    }

    Suite { name: name.unwrap_or_else(|| DEFAULT_SUITE_NAME.to_string()), cases }
}

/// Strip the leading `-` marker(s) of a bullet line
fn bullet_step(trimmed: &str) -> Option<String> {
    if !trimmed.starts_with('-') {
        return None;
    }
    Some(trimmed.trim_start_matches('-').trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN: &str = "suite: Login

case: 正常ログイン
- /login に移動
- メールアドレス に user@example.com を入力
- パスワード に pass を入力
- ログイン をクリック
- ダッシュボード が見える

case: パスワード誤りで失敗
- /login に移動
- パスワード に wrongpass を入力
";

    #[test]
    fn test_parse_suite_and_cases() {
        let suite = parse(LOGIN);
        assert_eq!(suite.name, "Login");
        assert_eq!(suite.cases.len(), 2);
        assert_eq!(suite.cases[0].title, "正常ログイン");
        assert_eq!(
            suite.cases[0].steps,
            vec![
                "/login に移動",
                "メールアドレス に user@example.com を入力",
                "パスワード に pass を入力",
                "ログイン をクリック",
                "ダッシュボード が見える",
            ]
        );
        assert_eq!(suite.cases[1].title, "パスワード誤りで失敗");
        assert_eq!(suite.cases[1].steps.len(), 2);
    }

    #[test]
    fn test_case_count_matches_markers() {
        let text = "case: a\n- one\ncase: b\ncase: c\n- two\n- three\n";
        let suite = parse(text);
        assert_eq!(suite.cases.len(), 3);
        assert!(suite.cases[1].steps.is_empty());
        assert_eq!(suite.cases[2].steps, vec!["two", "three"]);
    }

    #[test]
    fn test_first_line_case_marker() {
        let suite = parse("case: first\n- step");
        assert_eq!(suite.cases.len(), 1);
        assert_eq!(suite.cases[0].title, "first");
        assert_eq!(suite.cases[0].steps, vec!["step"]);
    }

    #[test]
    fn test_no_case_markers_gives_default_case() {
        let suite = parse("# heading\n- /top に移動\nsome prose\n  - nested bullet\n--- extra dashes\n");
        assert_eq!(suite.name, DEFAULT_SUITE_NAME);
        assert_eq!(suite.cases.len(), 1);
        assert_eq!(suite.cases[0].title, "default");
        assert_eq!(suite.cases[0].steps, vec!["/top に移動", "nested bullet", "extra dashes"]);
    }

    #[test]
    fn test_bullets_before_first_case_are_dropped() {
        let suite = parse("- orphan\ncase: real\n- kept\n");
        assert_eq!(suite.cases.len(), 1);
        assert_eq!(suite.cases[0].steps, vec!["kept"]);
    }

    #[test]
    fn test_nonsense_steps_pass_through() {
        let suite = parse("case: x\n-   do something odd   \r\n");
        assert_eq!(suite.cases[0].steps, vec!["do something odd"]);
    }

    #[test]
    fn test_flat_steps_preserve_order() {
        let suite = parse(LOGIN);
        let flat = suite.flat_steps();
        assert_eq!(flat.len(), suite.step_count());
        assert_eq!(flat[0].case_title, "正常ログイン");
        assert_eq!(flat[5].case_title, "パスワード誤りで失敗");
        assert_eq!(flat[5].step, "/login に移動");
    }

    #[test]
    fn test_flat_step_serializes_camel_case() {
        let flat = FlatStep { case_title: "c".into(), step: "s".into() };
        let json = serde_json::to_value(&flat).unwrap();
        assert_eq!(json, serde_json::json!({"caseTitle": "c", "step": "s"}));
    }
}
