//! # Fallback Origin Controller
//!
//! Entry point: initialize the runtime, then watch `FallbackOrigin`
//! resources until SIGINT/SIGTERM.

use anyhow::Result;
use fallback_origin_controller::runtime::{initialize, run_watch_loop};

#[tokio::main]
async fn main() -> Result<()> {
    let init = initialize().await?;
    run_watch_loop(init.fallback_origins, init.reconciler, init.server_state).await
}
