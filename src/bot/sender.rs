use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Recipient};

/// A numeric id is a chat/channel id; anything else is treated as a
/// public @channel username, which Telegram also accepts.
pub fn parse_recipient(raw: &str) -> Recipient {
    match raw.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(raw.to_string()),
    }
}

/// Single delivery with Markdown rendering. A failure here is terminal
/// for the invocation: there is no fallback channel.
pub async fn send(bot: &Bot, chat: Recipient, text: &str) -> Result<()> {
    bot.send_message(chat, text)
        .parse_mode(ParseMode::Markdown)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_username_recipients() {
        assert!(matches!(
            parse_recipient("-1001234567890"),
            Recipient::Id(ChatId(-1001234567890))
        ));
        assert!(matches!(
            parse_recipient("@afn_prices"),
            Recipient::ChannelUsername(_)
        ));
    }
}
