//! The uniform reporting contract returned by every reconciler operation
//!
//! The reconciler never logs or notifies on its own. It packages messages
//! into an [`Outcome`] and the external pipeline decides how and where each
//! channel is displayed or recorded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where the external pipeline should surface a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    /// Shown to the person who triggered the operation
    UserNotice,
    /// Recorded in the operational log
    OperationalLog,
}

/// Severity hint for operational-log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Notice,
    Warning,
    Error,
}

/// A single report entry with placeholder substitutions
///
/// The text carries `@placeholder` markers; substitutions map each marker to
/// its value. Keeping the two separate lets the pipeline localize or escape
/// the text before rendering. [`Message::rendered`] applies the substitutions
/// for callers that just want the final string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    text: String,
    substitutions: BTreeMap<String, String>,
    channel: Channel,
    severity: Option<Severity>,
}

impl Message {
    /// A message for the user-notice channel
    pub fn user_notice(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            substitutions: BTreeMap::new(),
            channel: Channel::UserNotice,
            severity: None,
        }
    }

    /// An error for the operational-log channel
    pub fn operational_error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            substitutions: BTreeMap::new(),
            channel: Channel::OperationalLog,
            severity: Some(Severity::Error),
        }
    }

    /// Bind a placeholder to its value
    pub fn with_substitution(mut self, placeholder: impl Into<String>, value: impl ToString) -> Self {
        self.substitutions
            .insert(placeholder.into(), value.to_string());
        self
    }

    /// The raw text with placeholders
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholder bindings
    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }

    /// The channel this message belongs on
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Severity hint, when one applies
    pub fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// The text with all placeholders substituted
    pub fn rendered(&self) -> String {
        let mut out = self.text.clone();
        for (placeholder, value) in &self.substitutions {
            out = out.replace(placeholder.as_str(), value);
        }
        out
    }
}

/// Result of the external attachment step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachReport {
    /// Whether the handle reference was embedded
    pub success: bool,
    /// The collaborator's report entry, passed through verbatim
    pub message: Message,
}

/// Aggregate result of a reconciler operation
///
/// Failure never propagates as an error value from the public operations; it
/// is always folded into an outcome so one object's failure cannot take down
/// processing of the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    success: bool,
    messages: Vec<Message>,
}

impl Outcome {
    /// A successful outcome with nothing to report
    pub fn ok() -> Self {
        Self {
            success: true,
            messages: Vec::new(),
        }
    }

    /// A failed outcome carrying a single message
    pub fn failure(message: Message) -> Self {
        Self {
            success: false,
            messages: vec![message],
        }
    }

    /// Append a message without touching the success flag
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Append a message and mark the outcome failed
    pub fn fail_with(&mut self, message: Message) {
        self.success = false;
        self.messages.push(message);
    }

    /// Mark the outcome failed
    pub fn mark_failed(&mut self) {
        self.success = false;
    }

    /// Whether the operation succeeded as a whole
    pub fn success(&self) -> bool {
        self.success
    }

    /// All accumulated messages, in emission order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}
