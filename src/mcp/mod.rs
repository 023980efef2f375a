//! MCP (Model Context Protocol) client side of the runner
//!
//! The browser itself lives behind an MCP tool server (Playwright MCP by default)
//! spawned as a child process and spoken to over stdio. Everything the runner
//! does to the page goes through [`ToolTransport::call_tool`].

pub mod value;

pub use value::{as_bool, pick_image, pick_value};

use crate::config::ServerCommand;
use crate::error::{Result, RunnerError};
use async_trait::async_trait;
use rmcp::{
    ServiceExt,
    model::{CallToolRequestParam, CallToolResult},
    service::{RoleClient, RunningService},
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use serde_json::Value;

/// Tool names consumed from the automation server
pub mod tools {
    pub const NAVIGATE: &str = "browser_navigate";
    pub const WAIT_FOR: &str = "browser_wait_for";
    pub const EVALUATE: &str = "browser_evaluate";
    pub const SCREENSHOT: &str = "browser_take_screenshot";
}

/// Request/response tool invocation against a remote server
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// Invoke `name` with a JSON object of arguments
    async fn call_tool(&self, name: &str, args: Value) -> Result<CallToolResult>;

    /// Close the connection. Called exactly once at the end of a run.
    async fn close(&mut self) -> Result<()>;
}

/// Live stdio connection to an MCP server child process
pub struct McpTransport {
    service: Option<RunningService<RoleClient, ()>>,
}

impl McpTransport {
    /// Spawn the server and complete the MCP handshake
    pub async fn spawn(command: &ServerCommand) -> Result<Self> {
        let child = TokioChildProcess::new(tokio::process::Command::new(&command.program).configure(|cmd| {
            cmd.args(&command.args);
        }))
        .map_err(|e| RunnerError::ConnectionFailed(format!("Failed to spawn '{}': {}", command.program, e)))?;

        let service = ()
            .serve(child)
            .await
            .map_err(|e| RunnerError::ConnectionFailed(e.to_string()))?;

        log::debug!("Connected to tool server: {} {}", command.program, command.args.join(" "));

        Ok(Self { service: Some(service) })
    }
}

#[async_trait]
impl ToolTransport for McpTransport {
    async fn call_tool(&self, name: &str, args: Value) -> Result<CallToolResult> {
        let service = self
            .service
            .as_ref()
            .ok_or_else(|| RunnerError::Transport { tool: name.to_string(), reason: "connection closed".to_string() })?;

        let params = CallToolRequestParam { name: name.to_string().into(), arguments: args.as_object().cloned() };

        service
            .call_tool(params)
            .await
            .map_err(|e| RunnerError::Transport { tool: name.to_string(), reason: e.to_string() })
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(service) = self.service.take() {
            service
                .cancel()
                .await
                .map_err(|e| RunnerError::ConnectionFailed(format!("Failed to close connection: {}", e)))?;
        }
        Ok(())
    }
}
