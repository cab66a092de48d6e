//! Bot command parsing.

/// Commands the bot reacts to outside the questionnaire flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `/start`: show the welcome text.
    Start,
    /// `/test`: begin (or restart) the questionnaire.
    Test,
}

impl Command {
    /// Parse a leading `/start` or `/test`, with or without a `@botname` suffix.
    ///
    /// Any other text, unknown commands included, is not a command and is
    /// treated as an answer.
    pub fn parse(text: &str) -> Option<Self> {
        Self::parse_for(text, None)
    }

    /// Like [`Command::parse`], but a `@botname` suffix must name `bot_username`.
    ///
    /// Commands addressed to another bot in a group chat are not ours. The
    /// comparison ignores ASCII case, as Telegram usernames do.
    pub fn parse_for(text: &str, bot_username: Option<&str>) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = match (name.split_once('@'), bot_username) {
            (Some((name, target)), Some(me)) => {
                if !target.eq_ignore_ascii_case(me.trim_start_matches('@')) {
                    return None;
                }
                name
            }
            (Some((name, _)), None) => name,
            (None, _) => name,
        };

        match name {
            "start" => Some(Self::Start),
            "test" => Some(Self::Test),
            _ => None,
        }
    }

    /// Command name without the slash.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Test => "test",
        }
    }
}
