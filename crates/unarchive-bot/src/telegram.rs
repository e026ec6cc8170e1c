//! Bot API transport over `teloxide`, with long polling.

use std::path::Path;
use std::sync::Arc;

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InputFile, MessageId, ReplyParameters};
use tokio::io::AsyncWriteExt;
use unarchive_fetch::ReqwestClient;

use crate::handler::{self, IncomingMessage};
use crate::pipeline::Pipeline;
use crate::transport::{Attachment, Conversation, Transport, TransportError};

pub type TelegramPipeline = Pipeline<TelegramTransport, ReqwestClient>;

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl Transport for TelegramTransport {
    async fn reply_text(&self, conversation: &Conversation, text: &str) -> Result<(), TransportError> {
        let mut req = self.bot.send_message(ChatId(conversation.chat_id), text);
        if let Some(reply_to) = conversation.reply_to {
            req.reply_parameters = Some(ReplyParameters::new(MessageId(reply_to)));
        }
        req.await.map_err(TransportError::request)?;
        Ok(())
    }

    async fn send_document(
        &self,
        conversation: &Conversation,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        let document = InputFile::file(path.to_path_buf()).file_name(file_name.to_string());
        let mut req = self.bot.send_document(ChatId(conversation.chat_id), document);
        if !caption.is_empty() {
            req.caption = Some(caption.to_string());
        }
        req.await.map_err(TransportError::request)?;
        Ok(())
    }

    async fn download_attachment(
        &self,
        attachment: &Attachment,
        destination: &Path,
    ) -> Result<u64, TransportError> {
        let file = self
            .bot
            .get_file(&attachment.handle)
            .await
            .map_err(TransportError::request)?;

        let mut out = tokio::fs::File::create(destination)
            .await
            .map_err(|e| TransportError::io(destination, e))?;
        self.bot
            .download_file(&file.path, &mut out)
            .await
            .map_err(TransportError::request)?;
        out.flush()
            .await
            .map_err(|e| TransportError::io(destination, e))?;

        Ok(u64::from(file.size))
    }
}

/// Convert a Bot API message, including the message it replies to.
pub fn incoming(message: &Message) -> IncomingMessage {
    IncomingMessage {
        conversation: Conversation::new(message.chat.id.0).replying_to(message.id.0),
        text: message.text().map(str::to_string),
        attachment: message.document().map(|document| Attachment {
            file_name: document.file_name.clone(),
            handle: document.file.id.to_string(),
            size: Some(u64::from(document.file.size)),
        }),
        reply_to_message: message.reply_to_message().map(|replied| Box::new(incoming(replied))),
    }
}

struct Shared {
    pipeline: Arc<TelegramPipeline>,
    bot_name: Option<String>,
}

async fn on_message(message: Message, shared: Arc<Shared>) -> ResponseResult<()> {
    let pipeline: &TelegramPipeline = &shared.pipeline;
    handler::handle(pipeline, &incoming(&message), shared.bot_name.as_deref()).await;
    Ok(())
}

/// Poll for updates until interrupted.
pub async fn dispatch(bot: Bot, pipeline: Arc<TelegramPipeline>, bot_name: Option<String>) {
    let shared = Arc::new(Shared { pipeline, bot_name });
    let handler = Update::filter_message().endpoint(on_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![shared])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}
