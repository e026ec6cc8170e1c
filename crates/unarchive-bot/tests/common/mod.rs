#![allow(dead_code)]

use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use unarchive_bot::{
    Attachment, Conversation, Pipeline, Transport, TransportError, WorkingDirs,
};
use unarchive_fetch::{BoxStream, FetchError, Fetcher, HttpClient, ResourceInfo};
use zip::write::SimpleFileOptions;

/// Something the bot sent to the chat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Document {
        file_name: String,
        caption: String,
        contents: Vec<u8>,
    },
}

/// Records outbound messages and serves attachments from memory.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<Sent>>,
    attachments: HashMap<String, Vec<u8>>,
    downloads: AtomicUsize,
}

impl RecordingTransport {
    pub fn with_attachment(mut self, handle: &str, data: Vec<u8>) -> Self {
        self.attachments.insert(handle.to_string(), data);
        self
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text(text) => Some(text),
                Sent::Document { .. } => None,
            })
            .collect()
    }

    /// `(file_name, caption)` of every document, in send order.
    pub fn documents(&self) -> Vec<(String, String)> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Document {
                    file_name, caption, ..
                } => Some((file_name, caption)),
                Sent::Text(_) => None,
            })
            .collect()
    }

    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

impl Transport for RecordingTransport {
    async fn reply_text(&self, _conversation: &Conversation, text: &str) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn send_document(
        &self,
        _conversation: &Conversation,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        let contents = std::fs::read(path).map_err(|e| TransportError::io(path, e))?;
        self.sent.lock().unwrap().push(Sent::Document {
            file_name: file_name.to_string(),
            caption: caption.to_string(),
            contents,
        });
        Ok(())
    }

    async fn download_attachment(
        &self,
        attachment: &Attachment,
        destination: &Path,
    ) -> Result<u64, TransportError> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        let data = self
            .attachments
            .get(&attachment.handle)
            .ok_or_else(|| TransportError::Request("file not found".into()))?;
        std::fs::write(destination, data).map_err(|e| TransportError::io(destination, e))?;
        Ok(data.len() as u64)
    }
}

/// Answers every URL with the same metadata and body.
#[derive(Default)]
pub struct MockClient {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
    pub head_status: Option<u16>,
    pub get_status: Option<u16>,
    pub heads: AtomicUsize,
    pub streams: AtomicUsize,
}

impl MockClient {
    pub fn serving(content_type: Option<&str>, body: Vec<u8>) -> Self {
        Self {
            content_type: content_type.map(str::to_string),
            body,
            ..Default::default()
        }
    }

    pub fn streams(&self) -> usize {
        self.streams.load(Ordering::SeqCst)
    }
}

impl HttpClient for MockClient {
    async fn stream(&self, _url: &str) -> unarchive_fetch::Result<BoxStream<'static, unarchive_fetch::Result<Bytes>>> {
        self.streams.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.get_status {
            return Err(FetchError::Status(code));
        }
        let chunks: Vec<unarchive_fetch::Result<Bytes>> = self
            .body
            .chunks(8192)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();
        Ok(Box::pin(futures_util::stream::iter(chunks)))
    }

    async fn head(&self, _url: &str) -> unarchive_fetch::Result<ResourceInfo> {
        self.heads.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.head_status {
            return Err(FetchError::Status(code));
        }
        Ok(ResourceInfo {
            content_type: self.content_type.clone(),
            content_length: Some(self.body.len() as u64),
        })
    }
}

pub type TestPipeline = Pipeline<RecordingTransport, MockClient>;

pub fn pipeline(root: &Path, transport: RecordingTransport, client: MockClient) -> TestPipeline {
    Pipeline::new(transport, Fetcher::new(client), WorkingDirs::new(root))
}

pub fn chat() -> Conversation {
    Conversation::new(1001).replying_to(5)
}

pub fn attachment(name: &str, handle: &str) -> Attachment {
    Attachment {
        file_name: Some(name.to_string()),
        handle: handle.to_string(),
        size: None,
    }
}

/// Zip with the given entries; `None` data adds a directory.
pub fn zip_bytes(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        match data {
            Some(data) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(data).unwrap();
            }
            None => writer.add_directory(*name, options).unwrap(),
        }
    }
    writer.finish().unwrap().into_inner()
}

pub fn sevenz_bytes(scratch: &Path, entries: &[(&str, &[u8])]) -> Vec<u8> {
    use sevenz_rust::{SevenZArchiveEntry, SevenZWriter};

    let path = scratch.join("fixture.7z");
    let mut writer = SevenZWriter::create(&path).unwrap();
    for (i, (name, data)) in entries.iter().enumerate() {
        let src = scratch.join(format!("src-{i}"));
        std::fs::write(&src, data).unwrap();
        writer
            .push_archive_entry(
                SevenZArchiveEntry::from_path(&src, name.to_string()),
                Some(File::open(&src).unwrap()),
            )
            .unwrap();
    }
    writer.finish().unwrap();
    std::fs::read(&path).unwrap()
}

/// No request left anything behind in the working directories.
pub fn assert_no_leftovers(dirs: &WorkingDirs) {
    for dir in dirs.all() {
        if dir.exists() {
            let left: Vec<_> = std::fs::read_dir(&dir)
                .unwrap()
                .map(|entry| entry.unwrap().path())
                .collect();
            assert!(left.is_empty(), "{} still holds {left:?}", dir.display());
        }
    }
}
