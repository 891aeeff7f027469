use std::fmt;

use serde::{Deserialize, Serialize};

/// Notification published once per accepted upload request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub filename: String,
    pub email: String,
}

impl NotificationEvent {
    pub fn new(filename: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            email: email.into(),
        }
    }

    /// Human-readable message text sent to topic subscribers.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A new file named {} was uploaded by {}.",
            self.filename, self.email
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_text() {
        let event = NotificationEvent::new("cat.png", "a@b.com");
        assert_eq!(
            event.message(),
            "A new file named cat.png was uploaded by a@b.com."
        );
    }
}
