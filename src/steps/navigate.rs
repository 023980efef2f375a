use crate::browser::{WaitState, best_effort};
use crate::error::StepError;
use crate::mcp::{ToolTransport, as_bool};
use crate::resolver;
use crate::steps::StepContext;
use crate::steps::utils::{has_extension, resolve_url, with_html_suffix};
use std::time::Duration;

/// Position the page at `target`.
///
/// Never fails: a navigation that does not land anywhere useful shows up in
/// the steps that follow.
pub async fn execute<T: ToolTransport>(ctx: &mut StepContext<'_, T>, target: &str) -> Result<(), StepError> {
    let waits = ctx.config.waits;

    let url = match resolve_url(&ctx.config.base_url, target) {
        Ok(url) => url,
        Err(e) => {
            log::warn!("Cannot navigate to {}: {}", target, e);
            return Ok(());
        }
    };

    open(ctx, &url, waits.navigate_load).await;

    // Static servers often only serve `/login` as `/login.html`
    let has_text = best_effort("page text check", ctx.session.evaluate(resolver::PAGE_HAS_TEXT)).await;
    let looks_empty = has_text.is_some_and(|value| !as_bool(value.as_ref()));

    if looks_empty && !has_extension(target) {
        match with_html_suffix(&url) {
            Some(alt) => {
                log::info!("{} looks empty, retrying as {}", url, alt);
                open(ctx, &alt, waits.navigate_load).await;
            }
            None => log::debug!("No .html fallback for {}", url),
        }
    }

    best_effort("network idle wait", ctx.session.wait_for(WaitState::NetworkIdle, waits.navigate_idle)).await;
    best_effort("screenshot", ctx.session.screenshot()).await;

    if ctx.config.save_html {
        ctx.save_page().await;
    }

    Ok(())
}

async fn open<T: ToolTransport>(ctx: &mut StepContext<'_, T>, url: &str, load_timeout: Duration) {
    best_effort("navigate", ctx.session.navigate(url)).await;
    best_effort("load wait", ctx.session.wait_for(WaitState::Load, load_timeout)).await;
}
