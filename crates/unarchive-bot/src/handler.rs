//! Route inbound messages to commands and the pipeline.

use unarchive_archive::ArchiveKind;
use unarchive_fetch::HttpClient;

use crate::command::Command;
use crate::pipeline::Pipeline;
use crate::resolver::Rejection;
use crate::transport::{Attachment, Conversation, RequestContext, SourceMessage, Transport};

pub const WELCOME: &str = "Welcome! Send me a .zip, .rar, or .7z file to unarchive.";
pub const CLEANED: &str = "Cleanup complete. All files have been deleted from the specified directories.";

/// A chat message as the handler sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub conversation: Conversation,
    pub text: Option<String>,
    pub attachment: Option<Attachment>,
    pub reply_to_message: Option<Box<IncomingMessage>>,
}

impl IncomingMessage {
    pub fn text(conversation: Conversation, text: impl Into<String>) -> Self {
        Self {
            conversation,
            text: Some(text.into()),
            attachment: None,
            reply_to_message: None,
        }
    }

    pub fn attachment(conversation: Conversation, attachment: Attachment) -> Self {
        Self {
            conversation,
            text: None,
            attachment: Some(attachment),
            reply_to_message: None,
        }
    }

    pub fn replying_to(mut self, message: IncomingMessage) -> Self {
        self.reply_to_message = Some(Box::new(message));
        self
    }

    /// An attachment wins over text.
    pub fn source(&self) -> Option<SourceMessage> {
        match (&self.attachment, &self.text) {
            (Some(attachment), _) => Some(SourceMessage::Attachment(attachment.clone())),
            (None, Some(text)) => Some(SourceMessage::Text(text.clone())),
            (None, None) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Welcome,
    /// `/unarchive` sent without replying to anything.
    NotAReply,
    Unarchive(RequestContext),
    Clean,
    Ignore,
}

/// Decide what to do with `message`.
///
/// Uploads of a file with an archive extension are unpacked without a
/// command. Everything else that is not a known command is ignored.
pub fn route(message: &IncomingMessage, bot_name: Option<&str>) -> Action {
    let command = message
        .text
        .as_deref()
        .and_then(|text| Command::parse(text, bot_name));

    match command {
        Some(Command::Start) => Action::Welcome,
        Some(Command::Clean) => Action::Clean,
        Some(Command::Unarchive) => match &message.reply_to_message {
            Some(replied) => Action::Unarchive(RequestContext {
                conversation: message.conversation.clone(),
                source: replied.source(),
            }),
            None => Action::NotAReply,
        },
        None => match &message.attachment {
            Some(attachment)
                if attachment
                    .file_name
                    .as_deref()
                    .and_then(ArchiveKind::from_file_name)
                    .is_some() =>
            {
                Action::Unarchive(RequestContext {
                    conversation: message.conversation.clone(),
                    source: Some(SourceMessage::Attachment(attachment.clone())),
                })
            }
            _ => Action::Ignore,
        },
    }
}

/// Handle one inbound message. Failures end up as replies, never as errors.
pub async fn handle<T: Transport, C: HttpClient>(
    pipeline: &Pipeline<T, C>,
    message: &IncomingMessage,
    bot_name: Option<&str>,
) {
    let conversation = &message.conversation;
    match route(message, bot_name) {
        Action::Welcome => pipeline.reply(conversation, WELCOME).await,
        Action::NotAReply => {
            let text = Rejection::NoRecognizedSource.to_string();
            pipeline.reply(conversation, &text).await;
        }
        Action::Unarchive(ctx) => {
            pipeline.run(&ctx).await;
        }
        Action::Clean => match pipeline.clean() {
            Ok(()) => pipeline.reply(conversation, CLEANED).await,
            Err(e) => {
                tracing::error!(error = %e, "cleanup failed");
                pipeline
                    .reply(conversation, &format!("An error occurred: {e}"))
                    .await;
            }
        },
        Action::Ignore => {
            tracing::trace!(chat = conversation.chat_id, "message ignored");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat() -> Conversation {
        Conversation::new(42).replying_to(7)
    }

    fn document(name: &str) -> Attachment {
        Attachment {
            file_name: Some(name.into()),
            handle: "doc".into(),
            size: None,
        }
    }

    #[test]
    fn start_and_clean() {
        assert_eq!(route(&IncomingMessage::text(chat(), "/start"), None), Action::Welcome);
        assert_eq!(route(&IncomingMessage::text(chat(), "/clean"), None), Action::Clean);
    }

    #[test]
    fn unarchive_needs_a_reply() {
        assert_eq!(route(&IncomingMessage::text(chat(), "/ua"), None), Action::NotAReply);
    }

    #[test]
    fn unarchive_reply_to_link() {
        let link = IncomingMessage::text(chat(), "https://example.com/a.zip");
        let message = IncomingMessage::text(chat(), "/unarchive").replying_to(link);

        let Action::Unarchive(ctx) = route(&message, None) else {
            panic!("expected a request");
        };
        assert_eq!(
            ctx.source,
            Some(SourceMessage::Text("https://example.com/a.zip".into()))
        );
        assert_eq!(ctx.conversation, chat());
    }

    #[test]
    fn unarchive_reply_to_nothing_usable_still_runs() {
        let sticker = IncomingMessage {
            conversation: chat(),
            text: None,
            attachment: None,
            reply_to_message: None,
        };
        let message = IncomingMessage::text(chat(), "/ua").replying_to(sticker);

        let Action::Unarchive(ctx) = route(&message, None) else {
            panic!("expected a request");
        };
        assert_eq!(ctx.source, None);
    }

    #[test]
    fn archive_uploads_run_directly() {
        let upload = IncomingMessage::attachment(chat(), document("photos.zip"));
        assert!(matches!(route(&upload, None), Action::Unarchive(_)));

        let other = IncomingMessage::attachment(chat(), document("notes.pdf"));
        assert_eq!(route(&other, None), Action::Ignore);
    }

    #[test]
    fn plain_text_is_ignored() {
        assert_eq!(route(&IncomingMessage::text(chat(), "hello"), None), Action::Ignore);
    }
}
