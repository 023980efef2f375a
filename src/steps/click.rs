use crate::browser::{WaitState, best_effort};
use crate::error::StepError;
use crate::mcp::ToolTransport;
use crate::resolver;
use crate::steps::StepContext;

/// Activate the control best matching `caption`
pub async fn execute<T: ToolTransport>(ctx: &mut StepContext<'_, T>, caption: &str) -> Result<(), StepError> {
    let clicked = ctx.resolve(&resolver::click_by_text(caption)).await;

    if !clicked {
        ctx.capture_debug().await;
        return Err(StepError::ClickTargetNotFound(caption.to_string()));
    }

    // A click may submit a form or follow a link
    ctx.session.invalidate_helpers();

    let waits = ctx.config.waits;
    best_effort("load wait", ctx.session.wait_for(WaitState::Load, waits.click_load)).await;
    best_effort("network idle wait", ctx.session.wait_for(WaitState::NetworkIdle, waits.click_idle)).await;
    best_effort("screenshot", ctx.session.screenshot()).await;

    Ok(())
}
