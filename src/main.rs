use anyhow::Context;
use gemchat::{
    app::App,
    clipboard::SystemClipboard,
    config::load_config,
    logging::init_logging,
    ui::run_ui,
    ChatSession, GeminiClient,
};
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = load_config().context("failed to load configuration")?;
    let _logger = init_logging(&config.log_level).context("failed to start logging")?;
    info!("using model {} at {}", config.model, config.api_base_url);

    let client = GeminiClient::new(&config)?;
    let session = Arc::new(ChatSession::new(Arc::new(client), config.typing_interval()));

    let (notice_tx, notice_rx) = mpsc::unbounded_channel();
    let mut app = App::new(session, config.bot_name.as_str(), config.model.as_str(), notice_tx);
    match SystemClipboard::new() {
        Ok(clipboard) => app = app.with_clipboard(Box::new(clipboard)),
        Err(e) => warn!("{}", e),
    }

    run_ui(app, notice_rx).await?;
    Ok(())
}
