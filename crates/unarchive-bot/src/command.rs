/// Bot commands, independent of any transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    /// `/unarchive` or `/ua`, sent as a reply.
    Unarchive,
    Clean,
}

impl Command {
    /// Parse the leading `/command` of `text`.
    ///
    /// A `@mention` suffix must name `bot_name` when one is given. Anything
    /// after the command word is ignored.
    pub fn parse(text: &str, bot_name: Option<&str>) -> Option<Self> {
        let word = text.split_whitespace().next()?.strip_prefix('/')?;
        let (name, mention) = match word.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (word, None),
        };
        if let (Some(mention), Some(bot_name)) = (mention, bot_name)
            && !mention.eq_ignore_ascii_case(bot_name)
        {
            return None;
        }

        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "unarchive" | "ua" => Some(Self::Unarchive),
            "clean" => Some(Self::Clean),
            _ => None,
        }
    }
}
