mod bot;
mod config;
mod data;
mod engine;

use teloxide::Bot;

use crate::bot::messages::UpdateBuilder;
use crate::bot::sender;
use crate::data::calendar;
use crate::data::fetcher::PriceFetcher;
use crate::engine::schedule;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "afn_price_bot=info".into()),
        )
        .init();

    let cfg = config::Config::from_env()?;
    let bot = Bot::new(&cfg.bot_token);

    let now = chrono::Utc::now().with_timezone(&calendar::KABUL);
    let decision = schedule::evaluate(now);
    if !decision.should_send {
        tracing::info!("Not a scheduled send time");
        return Ok(());
    }

    let fetcher = PriceFetcher::new(config::VS_CURRENCY)?;
    let builder = UpdateBuilder::new(config::ASSETS, fetcher);
    let text = builder.build(decision.include_header, now).await;

    sender::send(&bot, sender::parse_recipient(&cfg.chat_id), &text).await?;
    tracing::info!("Crypto update sent");
    Ok(())
}
