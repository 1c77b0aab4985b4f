use std::fmt;

/// Topic carrying outbound mail.
pub const MAIL_TOPIC: &str = "mail";

/// Out-of-band message for a user, delivered by a `Notifier`.
///
/// `message` may contain a freshly generated password and is redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Notification {
    pub topic: String,
    pub recipient: String,
    pub header: String,
    pub message: String,
}

impl Notification {
    /// Mail delivering a generated password to the account owner.
    pub fn password_reset(recipient: impl Into<String>, password: &str) -> Self {
        Self {
            topic: MAIL_TOPIC.to_string(),
            recipient: recipient.into(),
            header: "Password reset".to_string(),
            message: format!("Your new password: {password}"),
        }
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("topic", &self.topic)
            .field("recipient", &self.recipient)
            .field("header", &self.header)
            .field("message", &"<redacted>")
            .finish()
    }
}
