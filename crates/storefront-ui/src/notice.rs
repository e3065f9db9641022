//! Transient notices.
//!
//! At most one notice is visible. Showing a new one replaces the old, and
//! each notice dismisses itself after a delay unless closed first. Every
//! notice gets a fresh id so a late expiry for a notice that is already
//! gone can be told apart and ignored.

use std::time::Duration;

use storefront_commerce::config::NoticeConfig;
use storefront_commerce::NoticeKind;

/// A visible notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    /// Inline markup.
    pub message: String,
    pub kind: NoticeKind,
}

/// Single-slot notice state.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    next_id: u64,
    current: Option<Notice>,
    auto_dismiss: Duration,
    fade: Duration,
}

impl NoticeBoard {
    pub fn new(config: &NoticeConfig) -> Self {
        Self {
            next_id: 1,
            current: None,
            auto_dismiss: Duration::from_millis(config.auto_dismiss_ms),
            fade: Duration::from_millis(config.fade_ms),
        }
    }

    /// Show a notice, replacing any visible one. Returns the new id.
    pub fn show(&mut self, message: impl Into<String>, kind: NoticeKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(Notice {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    /// Close the notice with `id` by hand. Returns false if it is no longer
    /// the visible one.
    pub fn dismiss(&mut self, id: u64) -> bool {
        self.take_if_current(id)
    }

    /// Auto-dismiss timer fired for `id`. Stale ids are ignored.
    pub fn expire(&mut self, id: u64) -> bool {
        self.take_if_current(id)
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }

    pub fn auto_dismiss(&self) -> Duration {
        self.auto_dismiss
    }

    pub fn fade(&self) -> Duration {
        self.fade
    }

    fn take_if_current(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(&NoticeConfig::default())
    }
}

/// Font Awesome icon for a notice kind.
pub fn icon_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "fa-check-circle",
        NoticeKind::Error => "fa-exclamation-circle",
        NoticeKind::Warning => "fa-exclamation-triangle",
        NoticeKind::Info => "fa-info-circle",
    }
}

/// Class list of the notice element.
pub fn notice_class(kind: NoticeKind) -> String {
    format!("custom-alert custom-alert-{}", kind.as_str())
}

/// Inner markup of the notice element. The message is inserted as-is.
pub fn render_notice(notice: &Notice) -> String {
    format!(
        r#"<div class="custom-alert-content">
    <div class="custom-alert-icon">
        <i class="fas {icon}"></i>
    </div>
    <div class="custom-alert-message">{message}</div>
    <button class="custom-alert-close">
        <i class="fas fa-times"></i>
    </button>
</div>"#,
        icon = icon_class(notice.kind),
        message = notice.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notice_replaces_old() {
        let mut board = NoticeBoard::default();
        let first = board.show("one", NoticeKind::Info);
        let second = board.show("two", NoticeKind::Error);

        assert_ne!(first, second);
        assert_eq!(board.current().map(|n| n.message.as_str()), Some("two"));
        assert!(!board.expire(first));
        assert!(board.current().is_some());
    }

    #[test]
    fn test_manual_dismiss_beats_timer() {
        let mut board = NoticeBoard::default();
        let id = board.show("saved", NoticeKind::Success);

        assert!(board.dismiss(id));
        assert!(board.current().is_none());
        assert!(!board.expire(id));
    }

    #[test]
    fn test_expiry_removes_current() {
        let mut board = NoticeBoard::default();
        let id = board.show("saved", NoticeKind::Success);
        assert!(board.expire(id));
        assert!(board.current().is_none());
        assert_eq!(board.auto_dismiss(), Duration::from_millis(4000));
        assert_eq!(board.fade(), Duration::from_millis(300));
    }

    #[test]
    fn test_markup() {
        let notice = Notice {
            id: 1,
            message: "Removed <strong>Vest</strong> from cart".to_string(),
            kind: NoticeKind::Warning,
        };
        let html = render_notice(&notice);
        assert!(html.contains("fa-exclamation-triangle"));
        assert!(html.contains("<strong>Vest</strong>"));
        assert_eq!(notice_class(NoticeKind::Info), "custom-alert custom-alert-info");
    }
}
