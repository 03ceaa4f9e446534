//! Alert messages

use types::EmittedSignal;

const ALERT_MARKER: &str = "[Actions] ✨";
const ALERT_RULE: &str = "🟢━━━━━━━━━━━━━━━━";

/// Wording of the alert headline and confidence line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertLabels {
    pub headline: String,
    pub confidence: String,
}

impl AlertLabels {
    pub fn new(headline: impl Into<String>, confidence: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            confidence: confidence.into(),
        }
    }
}

impl Default for AlertLabels {
    fn default() -> Self {
        Self::new("Strong signal", "Confidence")
    }
}

/// A plain-text, HTML-safe alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    /// Usually the pair, for log correlation
    pub correlation_id: Option<String>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            correlation_id: None,
        }
    }

    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Alert text for one emitted signal
    pub fn signal_alert(signal: &EmittedSignal, labels: &AlertLabels) -> Self {
        let text = format!(
            "{marker} {headline}\n{rule}\n{pair}: {direction}\n{label}: {confidence:.1}%\n{rule}",
            marker = ALERT_MARKER,
            headline = escape_html(&labels.headline),
            rule = ALERT_RULE,
            pair = escape_html(&signal.pair),
            direction = signal.direction,
            label = escape_html(&labels.confidence),
            confidence = signal.confidence * 100.0,
        );
        Self::new(text).with_correlation_id(signal.pair.clone())
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.text.len()
    }
}

/// Escape the characters Telegram's HTML parse mode treats as markup
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
