use regex::{Captures, Regex};

/// A raw step interpreted as one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `/path に移動`
    Navigate(String),
    /// `<label> に <value> を入力`
    Fill { label: String, value: String },
    /// `<caption> をクリック`
    Click(String),
    /// `<text> が見える`
    AssertVisible(String),
    /// Matched no shape. Not an error.
    Unrecognized(String),
}

impl Step {
    pub fn kind(&self) -> &'static str {
        match self {
            Step::Navigate(_) => "navigate",
            Step::Fill { .. } => "fill",
            Step::Click(_) => "click",
            Step::AssertVisible(_) => "assert_visible",
            Step::Unrecognized(_) => "unrecognized",
        }
    }
}

/// One step shape: a whole-line pattern and the constructor for its captures
pub struct StepRule {
    pub name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> Step,
}

impl StepRule {
    /// Create a rule. The pattern is anchored to the whole line here.
    pub fn new(name: &'static str, pattern: &str, build: fn(&Captures<'_>) -> Step) -> Result<Self, regex::Error> {
        Ok(Self { name, pattern: Regex::new(&format!("^(?:{})$", pattern))?, build })
    }

    fn apply(&self, line: &str) -> Option<Step> {
        self.pattern.captures(line).map(|caps| (self.build)(&caps))
    }
}

fn capture(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index).map(|m| m.as_str().trim().to_string()).unwrap_or_default()
}

/// Ordered rule table; the first matching rule wins
pub struct StepClassifier {
    rules: Vec<StepRule>,
}

impl StepClassifier {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Classifier with the built-in shapes, in priority order
    pub fn with_defaults() -> Self {
        let mut classifier = Self::new();
        let defaults: [(&'static str, &str, fn(&Captures<'_>) -> Step); 4] = [
            ("navigate", r"((?:/|https?://)\S*)\s*に移動", |c| Step::Navigate(capture(c, 1))),
            ("fill", r"(.+)\s+に\s+(.+)\s+を入力", |c| Step::Fill { label: capture(c, 1), value: capture(c, 2) }),
            ("click", r"(.+)\s+をクリック", |c| Step::Click(capture(c, 1))),
            ("assert_visible", r"(.+)\s+が見える", |c| Step::AssertVisible(capture(c, 1))),
        ];
        for (name, pattern, build) in defaults {
            match StepRule::new(name, pattern, build) {
                Ok(rule) => classifier.register(rule),
                Err(e) => log::error!("Invalid built-in step pattern '{}': {}", name, e),
            }
        }
        classifier
    }

    /// Append a rule with the lowest priority
    pub fn register(&mut self, rule: StepRule) {
        self.rules.push(rule);
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn classify(&self, raw: &str) -> Step {
        let line = raw.trim();
        self.rules
            .iter()
            .find_map(|rule| rule.apply(line))
            .unwrap_or_else(|| Step::Unrecognized(line.to_string()))
    }
}

impl Default for StepClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}
