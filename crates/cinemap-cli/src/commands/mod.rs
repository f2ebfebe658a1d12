pub mod best;
pub mod browse;
pub mod clear;
pub mod config;
pub mod context;
pub mod countries;
pub mod details;
pub mod explore;
pub mod genres;
pub mod prompts;
pub mod search;
pub mod ui;
pub mod watchlist;

use tokio_util::sync::CancellationToken;

/// Token that fires on the first Ctrl-C
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                if result.is_ok() {
                    tracing::info!("Interrupted, cancelling");
                    trigger.cancel();
                }
            }
            _ = trigger.cancelled() => {}
        }
    });
    token
}
