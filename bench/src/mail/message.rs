use crate::error::MailBenchError;
use bytes::Bytes;
use lettre::address::Envelope;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const SUBJECT: &str = "SMTP Benchmark";
pub const BODY: &str = "This is a test email for SMTP benchmarking.";
const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// A rendered email ready to be handed to the transport: the SMTP envelope plus
/// the formatted message bytes. Cheap to share between workers.
#[derive(Debug, Clone)]
pub struct MailUnit {
    envelope: Envelope,
    raw: Bytes,
}

impl MailUnit {
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn size_bytes(&self) -> u64 {
        self.raw.len() as u64
    }
}

impl From<Message> for MailUnit {
    fn from(message: Message) -> Self {
        Self {
            envelope: message.envelope().clone(),
            raw: Bytes::from(message.formatted()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageBuilder {
    from: String,
    to: String,
    attachments: Vec<PathBuf>,
}

impl MessageBuilder {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, attachments: impl IntoIterator<Item = PathBuf>) -> Self {
        self.attachments.extend(attachments);
        self
    }

    /// Number of attachments that will be loaded, empty paths excluded.
    pub fn attachments_count(&self) -> usize {
        self.attachment_paths().count()
    }

    pub async fn build(&self) -> Result<MailUnit, MailBenchError> {
        let from = self.from.parse::<Mailbox>()?;
        let to = self.to.parse::<Mailbox>()?;
        let builder = Message::builder().from(from).to(to).subject(SUBJECT);

        if self.attachments_count() == 0 {
            let message = builder
                .header(ContentType::TEXT_PLAIN)
                .body(String::from(BODY))?;
            return Ok(message.into());
        }

        let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)?;
        let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(String::from(BODY)));
        for path in self.attachment_paths() {
            let content = tokio::fs::read(path).await.map_err(|source| {
                MailBenchError::CannotReadAttachment {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            let filename = attachment_name(path);
            debug!("Attaching {filename} ({} bytes)", content.len());
            multipart =
                multipart.singlepart(Attachment::new(filename).body(content, content_type.clone()));
        }

        Ok(builder.multipart(multipart)?.into())
    }

    fn attachment_paths(&self) -> impl Iterator<Item = &Path> {
        self.attachments
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| !path.as_os_str().is_empty())
    }
}

fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
