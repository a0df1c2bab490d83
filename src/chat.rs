// Support chat stub: echoes the visitor's message and answers after a short delay

use crate::locale::Locale;
use crate::messages;
use crate::notification::NotificationGateway;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatAuthor {
    Visitor,
    Support,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: ChatAuthor,
    pub text: String,
}

#[derive(Clone)]
pub struct ChatSession {
    transcript: Arc<Mutex<Vec<ChatMessage>>>,
    notifier: Arc<NotificationGateway>,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new(notifier: Arc<NotificationGateway>, reply_delay: Duration) -> Self {
        Self {
            transcript: Arc::new(Mutex::new(Vec::new())),
            notifier,
            reply_delay,
        }
    }

    // Post a visitor message and schedule the support reply on a spawned task.
    // Blank messages, and calls made outside a tokio runtime, are ignored and
    // return `None`. Nothing cancels the reply task.
    pub fn send(&self, message: &str, locale: Locale) -> Option<JoinHandle<()>> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }
        let runtime = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(error = %e, "Chat message dropped, no async runtime");
                return None;
            }
        };

        self.transcript.lock().push(ChatMessage {
            author: ChatAuthor::Visitor,
            text: message.to_string(),
        });
        tracing::debug!(len = message.len(), "Chat message sent");

        let session = self.clone();
        Some(runtime.spawn(async move {
            tokio::time::sleep(session.reply_delay).await;
            let reply = messages::chat_reply(locale);
            session.transcript.lock().push(ChatMessage {
                author: ChatAuthor::Support,
                text: reply.to_string(),
            });
            session
                .notifier
                .notify(messages::chat_reply_title(locale), reply);
        }))
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::testing::RecordingBackend;

    fn session(backend: &RecordingBackend, delay_ms: u64) -> ChatSession {
        let notifier = Arc::new(NotificationGateway::new(Box::new(backend.clone()), "icon"));
        ChatSession::new(notifier, Duration::from_millis(delay_ms))
    }

    #[tokio::test]
    async fn test_blank_message_ignored() {
        let chat = session(&RecordingBackend::granted(), 0);
        assert!(chat.send("   ", Locale::En).is_none());
        assert!(chat.transcript().is_empty());
    }

    #[test]
    fn test_send_outside_runtime_is_ignored() {
        let backend = RecordingBackend::granted();
        let chat = session(&backend, 0);
        assert!(chat.send("hello", Locale::En).is_none());
        assert!(chat.transcript().is_empty());
        assert!(backend.shown().is_empty());
    }

    #[tokio::test]
    async fn test_reply_arrives_after_delay() {
        let backend = RecordingBackend::granted();
        let chat = session(&backend, 20);

        let handle = chat.send(" Is the ferry running? ", Locale::Vi).unwrap();
        assert_eq!(
            chat.transcript(),
            vec![ChatMessage {
                author: ChatAuthor::Visitor,
                text: "Is the ferry running?".to_string(),
            }]
        );

        handle.await.unwrap();
        let transcript = chat.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].author, ChatAuthor::Support);
        assert_eq!(transcript[1].text, "Tôi có thể giúp gì cho bạn hôm nay?");

        let shown = backend.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].title, "Phản hồi chat mới");
    }
}
