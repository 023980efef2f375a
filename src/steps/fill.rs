use crate::browser::{WaitState, best_effort};
use crate::error::StepError;
use crate::mcp::ToolTransport;
use crate::resolver;
use crate::steps::StepContext;

/// Type `value` into the field labelled `label`
pub async fn execute<T: ToolTransport>(ctx: &mut StepContext<'_, T>, label: &str, value: &str) -> Result<(), StepError> {
    let found = ctx.resolve(&resolver::type_by_label(label, value)).await;

    if !found {
        ctx.capture_debug().await;
        return Err(StepError::TargetNotFound(label.to_string()));
    }

    best_effort("settle wait", ctx.session.wait_for(WaitState::NetworkIdle, ctx.config.waits.fill_settle)).await;
    best_effort("screenshot", ctx.session.screenshot()).await;

    Ok(())
}
