use crate::error::StepError;
use crate::mcp::ToolTransport;
use crate::resolver;
use crate::steps::StepContext;

/// Check that `text` appears in the rendered body. No screenshot on success.
pub async fn execute<T: ToolTransport>(ctx: &mut StepContext<'_, T>, text: &str) -> Result<(), StepError> {
    if ctx.resolve(&resolver::visible_text_exists(text)).await {
        Ok(())
    } else {
        Err(StepError::TextNotFound(text.to_string()))
    }
}
