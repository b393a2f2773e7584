use chrono::{DateTime, Local};

/// The one-line outcome of the most recent operation.
///
/// `is_error` only changes presentation; nothing reported here is fatal.
#[derive(Debug, Clone)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
    /// When the message was reported.
    pub at: DateTime<Local>,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message.into(), false)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message.into(), true)
    }

    fn new(message: String, is_error: bool) -> Self {
        Self {
            message,
            is_error,
            at: Local::now(),
        }
    }
}
