use crate::{error::{Result, RunnerError},
            mcp::{McpTransport, ToolTransport, pick_value, tools},
            resolver};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};
use std::{future::Future, time::Duration};

/// Page state a wait call blocks on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    Load,
    NetworkIdle,
}

impl WaitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Load => "load",
            WaitState::NetworkIdle => "networkidle",
        }
    }
}

/// Run an auxiliary call whose failure never affects a step outcome.
///
/// Failures (including timeouts) are logged at debug level and turned into `None`.
pub async fn best_effort<T>(what: &str, call: impl Future<Output = Result<T>>) -> Option<T> {
    match call.await {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring failed {}: {}", what, e);
            None
        }
    }
}

/// One live connection to the automation server, shared by every document in a run
pub struct Session<T: ToolTransport = McpTransport> {
    transport: T,

    /// Whether `window.__mdw` is installed in the current page context
    helpers_installed: bool,
}

impl<T: ToolTransport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, helpers_installed: false }
    }

    /// Invoke a tool. A result flagged `isError` is returned as [`RunnerError::ToolError`].
    pub async fn invoke(&self, tool: &str, args: Value) -> Result<CallToolResult> {
        log::debug!("-> {} {}", tool, args);
        let result = self.transport.call_tool(tool, args).await?;

        if result.is_error == Some(true) {
            let message = result
                .content
                .iter()
                .find_map(|c| match &c.raw {
                    RawContent::Text(t) => Some(t.text.clone()),
                    _ => None,
                })
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(RunnerError::ToolError { tool: tool.to_string(), message });
        }

        Ok(result)
    }

    /// Navigate the page. Any installed helpers are gone afterwards.
    pub async fn navigate(&mut self, url: &str) -> Result<()> {
        self.helpers_installed = false;
        self.invoke(tools::NAVIGATE, json!({ "url": url })).await?;
        Ok(())
    }

    pub async fn wait_for(&self, state: WaitState, timeout: Duration) -> Result<()> {
        self.invoke(tools::WAIT_FOR, json!({ "state": state.as_str(), "timeout": timeout.as_millis() as u64 }))
            .await?;
        Ok(())
    }

    /// Evaluate an expression in the page and return its value
    pub async fn evaluate(&self, expression: &str) -> Result<Option<Value>> {
        let result = self.invoke(tools::EVALUATE, json!({ "function": format!("() => ({})", expression) })).await?;
        Ok(pick_value(&result))
    }

    /// Run statements in the page, discarding any value
    pub async fn evaluate_statement(&self, code: &str) -> Result<()> {
        self.invoke(tools::EVALUATE, json!({ "function": format!("() => {{ {} }}", code) })).await?;
        Ok(())
    }

    /// Full-page screenshot
    pub async fn screenshot(&self) -> Result<CallToolResult> {
        self.invoke(tools::SCREENSHOT, json!({ "fullPage": true })).await
    }

    /// Current page markup, if the page returned a string
    pub async fn page_html(&self) -> Result<Option<String>> {
        Ok(match self.evaluate(resolver::PAGE_HTML).await? {
            Some(Value::String(html)) => Some(html),
            _ => None,
        })
    }

    /// Install the resolver helpers unless the current page already has them
    pub async fn ensure_helpers(&mut self) -> Result<()> {
        if self.helpers_installed {
            return Ok(());
        }
        self.evaluate_statement(resolver::HELPERS_JS).await?;
        self.helpers_installed = true;
        Ok(())
    }

    /// Forget the helpers after an action that may have replaced the page
    pub fn invalidate_helpers(&mut self) {
        self.helpers_installed = false;
    }

    pub fn helpers_installed(&self) -> bool {
        self.helpers_installed
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Close the connection
    pub async fn close(mut self) -> Result<()> {
        self.transport.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rmcp::model::Content;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<(String, Value)>>,
        fail_tool: Option<&'static str>,
    }

    #[async_trait]
    impl ToolTransport for Recorder {
        async fn call_tool(&self, name: &str, args: Value) -> Result<CallToolResult> {
            self.calls.lock().unwrap().push((name.to_string(), args));
            if self.fail_tool == Some(name) {
                return Ok(CallToolResult::error(vec![Content::text("Timeout 500ms exceeded")]));
            }
            Ok(CallToolResult::success(vec![Content::text("true")]))
        }

        async fn close(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_evaluate_wraps_expression() {
        let session = Session::new(Recorder::default());
        let value = session.evaluate("1 + 1 === 2").await.unwrap();
        assert_eq!(value, Some(json!(true)));

        let calls = session.transport().calls.lock().unwrap();
        assert_eq!(calls[0].0, tools::EVALUATE);
        assert_eq!(calls[0].1, json!({ "function": "() => (1 + 1 === 2)" }));
    }

    #[tokio::test]
    async fn test_evaluate_statement_wraps_body() {
        let session = Session::new(Recorder::default());
        session.evaluate_statement("window.x = 1;").await.unwrap();
        let calls = session.transport().calls.lock().unwrap();
        assert_eq!(calls[0].1, json!({ "function": "() => { window.x = 1; }" }));
    }

    #[tokio::test]
    async fn test_wait_for_args() {
        let session = Session::new(Recorder::default());
        session.wait_for(WaitState::NetworkIdle, Duration::from_millis(500)).await.unwrap();
        let calls = session.transport().calls.lock().unwrap();
        assert_eq!(calls[0], (tools::WAIT_FOR.to_string(), json!({ "state": "networkidle", "timeout": 500 })));
    }

    #[tokio::test]
    async fn test_tool_error_surfaces_and_best_effort_swallows() {
        let session = Session::new(Recorder { fail_tool: Some(tools::WAIT_FOR), ..Default::default() });

        let err = session.wait_for(WaitState::Load, Duration::from_millis(500)).await.unwrap_err();
        assert!(matches!(err, RunnerError::ToolError { ref message, .. } if message.contains("Timeout")));

        let swallowed = best_effort("wait", session.wait_for(WaitState::Load, Duration::from_millis(500))).await;
        assert!(swallowed.is_none());
    }

    #[tokio::test]
    async fn test_helpers_installed_once_per_page() {
        let mut session = Session::new(Recorder::default());
        session.ensure_helpers().await.unwrap();
        session.ensure_helpers().await.unwrap();
        assert_eq!(session.transport().calls.lock().unwrap().len(), 1);
        assert!(session.helpers_installed());

        session.navigate("http://127.0.0.1:8080/next").await.unwrap();
        assert!(!session.helpers_installed());
        session.ensure_helpers().await.unwrap();

        let calls = session.transport().calls.lock().unwrap();
        let installs = calls.iter().filter(|(name, _)| name == tools::EVALUATE).count();
        assert_eq!(installs, 2);
    }
}
