//! User-Visible Notices
//!
//! Terminal failures (failed move, failed save) surface as transient notices.
//! Engines emit through a sink callback; the toast component renders them.

use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// One transient message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Where engines push notices. Components hook this to the toast signals.
pub type NoticeSink = Rc<dyn Fn(Notice)>;

/// Sink that drops everything, for callers that do not render notices.
pub fn null_sink() -> NoticeSink {
    Rc::new(|_| {})
}
