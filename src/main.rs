/*
 * Responsibility
 * - tokio runtime boot
 * - app::run() call (no logic here)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    postdeck::app::run().await
}
