/// Context information for send operations to aid in debugging
#[derive(Debug, Clone, PartialEq)]
pub struct SendContext {
    /// Size of the message text in bytes
    pub message_size: usize,
    /// Correlation ID for tracing, usually the pair
    pub correlation_id: Option<String>,
    /// Target service hint, if available
    pub target: Option<String>,
}

impl SendContext {
    pub fn new(message_size: usize) -> Self {
        Self {
            message_size,
            correlation_id: None,
            target: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Send failed: {error} (size: {size}B, id: {correlation_id:?}, target: {target:?})",
            size = context.message_size,
            correlation_id = context.correlation_id,
            target = context.target)]
    SendFailed { error: String, context: SendContext },

    #[error("Rejected by endpoint with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SinkError {
    pub fn send_failed_with_context(msg: impl Into<String>, context: SendContext) -> Self {
        SinkError::SendFailed {
            error: msg.into(),
            context,
        }
    }
}
