/// Information about a sink for monitoring/debugging
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SinkMetadata {
    /// Human-readable sink name
    pub name: String,

    /// Sink type (telegram, collector)
    pub sink_type: String,

    /// Endpoint if applicable, never including credentials
    pub endpoint: Option<String>,

    /// Whether sends actually leave the process
    pub delivers: bool,

    pub messages_sent: u64,
    pub messages_failed: u64,
}

impl SinkMetadata {
    pub fn new(name: impl Into<String>, sink_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sink_type: sink_type.into(),
            endpoint: None,
            delivers: true,
            messages_sent: 0,
            messages_failed: 0,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_delivers(mut self, delivers: bool) -> Self {
        self.delivers = delivers;
        self
    }

    pub fn with_counts(mut self, sent: u64, failed: u64) -> Self {
        self.messages_sent = sent;
        self.messages_failed = failed;
        self
    }
}
