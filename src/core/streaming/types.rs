//! Type definitions for outbound streams

use actix_web::web;

/// Simple Event structure for SSE framing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Event type
    pub event: Option<String>,
    /// Event data, one `data:` line per line of text
    pub data: String,
    /// Comment text; a comment event carries nothing else
    pub comment: Option<String>,
}

impl Event {
    /// Create a new empty event
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event type
    pub fn event(mut self, event: &str) -> Self {
        self.event = Some(event.to_string());
        self
    }

    /// Set the event data
    pub fn data(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    /// Turn the event into a comment line
    pub fn comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Convert event to bytes for SSE transmission
    pub fn to_bytes(&self) -> web::Bytes {
        web::Bytes::from(self.to_string())
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(comment) = &self.comment {
            return write!(f, ":{}\n\n", comment);
        }
        if let Some(event) = &self.event {
            writeln!(f, "event: {}", event)?;
        }
        for line in self.data.split('\n') {
            writeln!(f, "data: {}", line)?;
        }
        writeln!(f)
    }
}

/// One unit of the client-facing stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFragment {
    /// Answer text, or an inline `[error] ...` notice
    Message(String),
    /// Keep-alive comment, ignored by clients
    Comment(String),
    /// End of the answer; always the last fragment
    Done,
}

impl OutboundFragment {
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    pub fn to_event(&self) -> Event {
        match self {
            Self::Message(text) => Event::new().event("message").data(text),
            Self::Comment(text) => Event::new().comment(text),
            Self::Done => Event::new().event("done"),
        }
    }
}

/// Lifecycle of one composed stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Init,
    Streaming,
    TimeoutFallback,
    EmptyFallback,
    Errored,
    Done,
}

impl ComposerState {
    pub fn is_terminal(self) -> bool {
        self == Self::Done
    }
}
