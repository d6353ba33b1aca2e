//! The user-visible notification channel.
//!
//! Every success or failure the user should see goes through exactly one
//! [`Notifier`]. The HTTP client raises notices; nothing else in the crate
//! does, so a failure is never reported twice.
//!
//! Three implementations are provided:
//!
//! - [`LogNotifier`] - writes notices to the `log` facade (the default)
//! - [`ChannelNotifier`] - forwards notices to a tokio channel for a UI loop
//! - any `Fn(Notice) + Send + Sync` closure

use tokio::sync::mpsc;

/// Whether a notice reports a success or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// One user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Receiver of user-visible notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<F> Notifier for F
where
    F: Fn(Notice) + Send + Sync,
{
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}

/// Writes notices to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Success => log::info!("{}", notice.message),
            NoticeKind::Error => log::error!("{}", notice.message),
        }
    }
}

/// Forwards notices to an unbounded tokio channel.
///
/// ```rust
/// use pvo::net::{ChannelNotifier, Notice, Notifier};
///
/// let (notifier, mut rx) = ChannelNotifier::new();
/// notifier.notify(Notice::success("saved"));
/// assert_eq!(rx.try_recv().unwrap().message, "saved");
/// ```
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // A dropped receiver means nobody is showing notices any more.
        if self.tx.send(notice).is_err() {
            log::debug!("notice receiver dropped");
        }
    }
}
