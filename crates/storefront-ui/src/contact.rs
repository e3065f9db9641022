//! Contact form acknowledgement.

use storefront_commerce::NoticeKind;

use crate::render::html_escape;

/// Fields read from a submitted contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
}

impl ContactMessage {
    /// Missing fields read as empty, as an untouched form input would.
    pub fn from_fields(name: Option<String>, email: Option<String>, subject: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            subject: subject.unwrap_or_default(),
        }
    }

    /// Success notice shown after submitting. The form is reset afterwards.
    ///
    /// Shopper input is escaped because notices are inserted as markup.
    pub fn acknowledgement(&self) -> (String, NoticeKind) {
        (
            format!(
                "Thank you, {}! Your message about \"{}\" has been sent. We'll respond to {} within 24 hours.",
                html_escape(self.name.trim()),
                html_escape(self.subject.trim()),
                html_escape(self.email.trim()),
            ),
            NoticeKind::Success,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgement_text() {
        let message = ContactMessage::from_fields(
            Some("Dana".to_string()),
            Some("dana@example.com".to_string()),
            Some("Bulk order".to_string()),
        );
        let (text, kind) = message.acknowledgement();
        assert_eq!(
            text,
            "Thank you, Dana! Your message about \"Bulk order\" has been sent. \
             We'll respond to dana@example.com within 24 hours."
        );
        assert_eq!(kind, NoticeKind::Success);
    }

    #[test]
    fn test_input_is_escaped() {
        let message = ContactMessage::from_fields(Some("<b>x</b>".to_string()), None, None);
        let (text, _) = message.acknowledgement();
        assert!(text.starts_with("Thank you, &lt;b&gt;x&lt;/b&gt;!"));
        assert!(text.contains("about \"\" has been sent"));
    }
}
