//! Product share links and copy-to-clipboard.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use storefront_commerce::config::ShareConfig;
use storefront_commerce::{NoticeKind, PresentationBinder};
use storefront_observability::StructuredLogger;

use crate::error::UiError;
use crate::timer::{MaybeSend, TaskHandle};

const COPIED_NOTICE: &str = "Product link copied to clipboard!";
const COPY_FAILED_NOTICE: &str = "Could not copy the product link";

/// Copy button contents.
pub const COPY_LABEL: &str = r#"<i class="fas fa-copy"></i>"#;
pub const COPIED_LABEL: &str = r#"<i class="fas fa-check"></i> Copied!"#;

/// `data-platform` value of the copy option, which the copy button handles.
const COPY_PLATFORM: &str = "copy";

/// Where a product can be shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareTarget {
    Facebook,
    Twitter,
    LinkedIn,
    WhatsApp,
    Email,
}

impl ShareTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareTarget::Facebook => "facebook",
            ShareTarget::Twitter => "twitter",
            ShareTarget::LinkedIn => "linkedin",
            ShareTarget::WhatsApp => "whatsapp",
            ShareTarget::Email => "email",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShareTarget::Facebook => "Facebook",
            ShareTarget::Twitter => "Twitter",
            ShareTarget::LinkedIn => "Linkedin",
            ShareTarget::WhatsApp => "Whatsapp",
            ShareTarget::Email => "Email",
        }
    }

    /// Email replaces the current location; the rest open a popup.
    pub fn opens_in_place(&self) -> bool {
        matches!(self, ShareTarget::Email)
    }

    /// Notice shown while sharing.
    pub fn notice(&self) -> String {
        format!("Sharing via {}...", self.display_name())
    }
}

impl fmt::Display for ShareTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareTarget {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "facebook" => Ok(ShareTarget::Facebook),
            "twitter" => Ok(ShareTarget::Twitter),
            "linkedin" => Ok(ShareTarget::LinkedIn),
            "whatsapp" => Ok(ShareTarget::WhatsApp),
            "email" => Ok(ShareTarget::Email),
            other => Err(UiError::UnknownShareTarget(other.to_string())),
        }
    }
}

/// The product being shared, as shown on its card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedProduct {
    pub name: String,
    /// Price text as displayed, e.g. `$89.99`.
    pub price: String,
    pub url: String,
}

impl SharedProduct {
    /// Product from a card's share button. The link is the current page
    /// with a `product` query naming it.
    pub fn from_card(name: Option<String>, price: Option<String>, page_url: &str) -> Self {
        let name = name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Product".to_string());
        let url = format!("{}?product={}", page_url, encode_uri_component(&name));
        Self {
            name,
            price: price.map(|p| p.trim().to_string()).unwrap_or_default(),
            url,
        }
    }

    pub fn share_text(&self) -> String {
        format!("Check out {} - {} at ProWork", self.name, self.price)
    }
}

/// Share URL for a target.
pub fn share_url(target: ShareTarget, product: &SharedProduct) -> String {
    let text = encode_uri_component(&product.share_text());
    let url = encode_uri_component(&product.url);
    match target {
        ShareTarget::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={}", url),
        ShareTarget::Twitter => format!("https://twitter.com/intent/tweet?text={}&url={}", text, url),
        ShareTarget::LinkedIn => {
            format!("https://www.linkedin.com/sharing/share-offsite/?url={}", url)
        }
        ShareTarget::WhatsApp => format!("https://wa.me/?text={}%20{}", text, url),
        ShareTarget::Email => format!(
            "mailto:?subject={}&body={}%0A%0A{}",
            encode_uri_component(&product.name),
            text,
            url
        ),
    }
}

/// A `data-platform` value. `None` for the copy option.
pub fn parse_platform(value: &str) -> Result<Option<ShareTarget>, UiError> {
    match value {
        COPY_PLATFORM => Ok(None),
        other => other.parse().map(Some),
    }
}

/// What a share option click does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareAction {
    pub target: ShareTarget,
    pub url: String,
    pub notice: String,
}

impl ShareAction {
    /// Replace the current location instead of opening a popup.
    pub fn opens_in_place(&self) -> bool {
        self.target.opens_in_place()
    }
}

/// The share modal: which product it shows and the copy button state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareModal {
    product: Option<SharedProduct>,
    copied: bool,
}

impl ShareModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, product: SharedProduct) {
        self.product = Some(product);
    }

    /// Close and forget the product and copied state.
    pub fn close(&mut self) {
        self.product = None;
        self.copied = false;
    }

    pub fn is_open(&self) -> bool {
        self.product.is_some()
    }

    pub fn product(&self) -> Option<&SharedProduct> {
        self.product.as_ref()
    }

    /// Value for the link input.
    pub fn link(&self) -> Option<&str> {
        self.product.as_ref().map(|p| p.url.as_str())
    }

    /// Returns whether the key closed the modal.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            true
        } else {
            false
        }
    }

    /// A click inside the modal element. Only the backdrop itself closes it.
    pub fn on_click(&mut self, on_backdrop: bool) -> bool {
        if on_backdrop && self.is_open() {
            self.close();
            true
        } else {
            false
        }
    }

    pub fn mark_copied(&mut self) {
        self.copied = true;
    }

    pub fn reset_copied(&mut self) {
        self.copied = false;
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn copy_label(&self) -> &'static str {
        if self.copied {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    /// Share the open product. `Ok(None)` when nothing is open or the
    /// option is the copy button.
    pub fn share(&self, platform: &str) -> Result<Option<ShareAction>, UiError> {
        let Some(product) = &self.product else {
            return Ok(None);
        };
        Ok(parse_platform(platform)?.map(|target| ShareAction {
            target,
            url: share_url(target, product),
            notice: target.notice(),
        }))
    }
}

/// Close the modal once the share window has had time to open, then hand
/// it to `apply`.
pub fn schedule_close<F>(
    modal: &Arc<Mutex<ShareModal>>,
    config: &ShareConfig,
    apply: F,
) -> Result<TaskHandle, UiError>
where
    F: FnOnce(&ShareModal) + MaybeSend + 'static,
{
    let modal = Arc::clone(modal);
    TaskHandle::spawn_once(Duration::from_millis(config.close_after_share_ms), move || {
        if let Ok(mut modal) = modal.lock() {
            modal.close();
            apply(&modal);
        }
    })
}

/// Put the copy button back to its icon.
pub fn schedule_copied_reset<F>(
    modal: &Arc<Mutex<ShareModal>>,
    config: &ShareConfig,
    apply: F,
) -> Result<TaskHandle, UiError>
where
    F: FnOnce(&ShareModal) + MaybeSend + 'static,
{
    let modal = Arc::clone(modal);
    TaskHandle::spawn_once(Duration::from_millis(config.copied_reset_ms), move || {
        if let Ok(mut modal) = modal.lock() {
            modal.reset_copied();
            apply(&modal);
        }
    })
}

/// Percent-encode everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, as
/// `encodeURIComponent` does.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// System clipboard.
#[async_trait(?Send)]
pub trait Clipboard {
    /// Asynchronous clipboard API.
    async fn write_text(&self, text: &str) -> Result<(), UiError>;

    /// Select-and-copy fallback.
    fn write_text_sync(&self, text: &str) -> Result<(), UiError>;
}

/// Which path put the link on the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    CopiedWithFallback,
    Failed(String),
}

/// Copy `url`, falling back to the synchronous path if the async one
/// fails.
pub async fn copy_to_clipboard<C>(clipboard: &C, logger: &StructuredLogger, url: &str) -> CopyOutcome
where
    C: Clipboard + ?Sized,
{
    match clipboard.write_text(url).await {
        Ok(()) => CopyOutcome::Copied,
        Err(async_error) => {
            logger
                .debug_builder("async clipboard failed, using fallback")
                .field("reason", async_error.to_string())
                .emit();
            match clipboard.write_text_sync(url) {
                Ok(()) => CopyOutcome::CopiedWithFallback,
                Err(e) => CopyOutcome::Failed(e.to_string()),
            }
        }
    }
}

/// Tell the shopper how a copy went.
pub fn report_copy<B>(outcome: &CopyOutcome, binder: &mut B, logger: &StructuredLogger)
where
    B: PresentationBinder + ?Sized,
{
    match outcome {
        CopyOutcome::Copied | CopyOutcome::CopiedWithFallback => {
            binder.show_notice(COPIED_NOTICE, NoticeKind::Success)
        }
        CopyOutcome::Failed(reason) => {
            logger
                .warn_builder("copy link failed")
                .field("reason", reason.as_str())
                .emit();
            binder.show_notice(COPY_FAILED_NOTICE, NoticeKind::Error);
        }
    }
}

/// [`copy_to_clipboard`] then [`report_copy`].
pub async fn copy_link<C, B>(
    clipboard: &C,
    binder: &mut B,
    logger: &StructuredLogger,
    url: &str,
) -> CopyOutcome
where
    C: Clipboard + ?Sized,
    B: PresentationBinder + ?Sized,
{
    let outcome = copy_to_clipboard(clipboard, logger, url).await;
    report_copy(&outcome, binder, logger);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::MarkupBinder;
    use crate::notice::NoticeBoard;
    use futures::executor::block_on;
    use std::cell::RefCell;

    fn product() -> SharedProduct {
        SharedProduct {
            name: "Hi-Vis Vest".to_string(),
            price: "$24.99".to_string(),
            url: "https://prowork.example/shop.html?p=vest&c=1".to_string(),
        }
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d/é"), "a%20b%26c%3Dd%2F%C3%A9");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn test_share_urls() {
        let p = product();
        assert_eq!(
            share_url(ShareTarget::Facebook, &p),
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fprowork.example%2Fshop.html%3Fp%3Dvest%26c%3D1"
        );
        assert!(share_url(ShareTarget::Twitter, &p).starts_with(
            "https://twitter.com/intent/tweet?text=Check%20out%20Hi-Vis%20Vest%20-%20%2424.99%20at%20ProWork&url="
        ));
        assert!(share_url(ShareTarget::WhatsApp, &p).contains("ProWork%20https%3A"));
        assert!(share_url(ShareTarget::Email, &p).starts_with("mailto:?subject=Hi-Vis%20Vest&body="));
        assert!(share_url(ShareTarget::Email, &p).contains("%0A%0Ahttps%3A"));
    }

    #[test]
    fn test_targets() {
        assert_eq!("linkedin".parse::<ShareTarget>().unwrap(), ShareTarget::LinkedIn);
        assert!("myspace".parse::<ShareTarget>().is_err());
        assert_eq!(ShareTarget::WhatsApp.notice(), "Sharing via Whatsapp...");
        assert!(ShareTarget::Email.opens_in_place());
        assert!(!ShareTarget::Twitter.opens_in_place());
    }

    #[test]
    fn test_product_from_card() {
        let p = SharedProduct::from_card(
            Some(" Steel Toe Boot ".to_string()),
            Some("$89.99".to_string()),
            "https://prowork.example/shop.html",
        );
        assert_eq!(p.name, "Steel Toe Boot");
        assert_eq!(p.url, "https://prowork.example/shop.html?product=Steel%20Toe%20Boot");

        let unnamed = SharedProduct::from_card(None, None, "https://x/");
        assert_eq!(unnamed.name, "Product");
        assert_eq!(unnamed.url, "https://x/?product=Product");
        assert_eq!(unnamed.price, "");
    }

    #[test]
    fn test_platforms() {
        assert_eq!(parse_platform("copy").unwrap(), None);
        assert_eq!(parse_platform("email").unwrap(), Some(ShareTarget::Email));
        assert!(parse_platform("myspace").is_err());
    }

    #[test]
    fn test_modal_open_and_dismiss() {
        let mut modal = ShareModal::new();
        assert!(!modal.on_key("Escape"));
        assert_eq!(modal.share("twitter").unwrap(), None);

        modal.open(product());
        assert!(modal.is_open());
        assert_eq!(modal.link(), Some(product().url.as_str()));
        assert!(!modal.on_key("Enter"));
        assert!(!modal.on_click(false));
        assert!(modal.is_open());
        assert!(modal.on_key("Escape"));
        assert!(!modal.is_open());

        modal.open(product());
        modal.mark_copied();
        assert!(modal.on_click(true));
        assert_eq!(modal.product(), None);
        assert_eq!(modal.copy_label(), COPY_LABEL);
    }

    #[test]
    fn test_modal_share_action() {
        let mut modal = ShareModal::new();
        modal.open(product());
        let action = modal.share("email").unwrap().unwrap();
        assert!(action.opens_in_place());
        assert_eq!(action.notice, "Sharing via Email...");
        assert_eq!(action.url, share_url(ShareTarget::Email, &product()));
        assert_eq!(modal.share("copy").unwrap(), None);
        assert!(modal.share("myspace").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copied_label_resets() {
        let modal = Arc::new(Mutex::new(ShareModal::new()));
        modal.lock().unwrap().open(product());
        modal.lock().unwrap().mark_copied();
        let _reset = schedule_copied_reset(&modal, &ShareConfig::default(), |_| {}).unwrap();

        tokio::time::sleep(Duration::from_millis(1999)).await;
        assert_eq!(modal.lock().unwrap().copy_label(), COPIED_LABEL);
        assert!(modal.lock().unwrap().is_copied());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(modal.lock().unwrap().copy_label(), COPY_LABEL);
        assert!(modal.lock().unwrap().is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_modal_closes_after_sharing() {
        let modal = Arc::new(Mutex::new(ShareModal::new()));
        modal.lock().unwrap().open(product());
        let closed = Arc::new(Mutex::new(false));
        let flag = Arc::clone(&closed);
        let _close = schedule_close(&modal, &ShareConfig::default(), move |m| {
            *flag.lock().unwrap() = !m.is_open();
        })
        .unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert!(modal.lock().unwrap().is_open());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!modal.lock().unwrap().is_open());
        assert!(*closed.lock().unwrap());
    }

    struct FakeClipboard {
        async_ok: bool,
        sync_ok: bool,
        written: RefCell<Vec<String>>,
    }

    impl FakeClipboard {
        fn new(async_ok: bool, sync_ok: bool) -> Self {
            Self {
                async_ok,
                sync_ok,
                written: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl Clipboard for FakeClipboard {
        async fn write_text(&self, text: &str) -> Result<(), UiError> {
            if self.async_ok {
                self.written.borrow_mut().push(text.to_string());
                Ok(())
            } else {
                Err(UiError::Clipboard("permission denied".to_string()))
            }
        }

        fn write_text_sync(&self, text: &str) -> Result<(), UiError> {
            if self.sync_ok {
                self.written.borrow_mut().push(text.to_string());
                Ok(())
            } else {
                Err(UiError::Clipboard("execCommand failed".to_string()))
            }
        }
    }

    fn copy(clipboard: &FakeClipboard) -> (CopyOutcome, MarkupBinder) {
        let mut binder = MarkupBinder::new(NoticeBoard::default());
        let logger = StructuredLogger::disabled();
        let outcome = block_on(copy_link(clipboard, &mut binder, &logger, "https://x/y"));
        (outcome, binder)
    }

    #[test]
    fn test_copy_prefers_async_clipboard() {
        let clipboard = FakeClipboard::new(true, true);
        let (outcome, binder) = copy(&clipboard);
        assert_eq!(outcome, CopyOutcome::Copied);
        assert_eq!(clipboard.written.borrow().len(), 1);
        assert_eq!(binder.notice().unwrap().message, COPIED_NOTICE);
    }

    #[test]
    fn test_copy_falls_back_to_sync() {
        let clipboard = FakeClipboard::new(false, true);
        let (outcome, binder) = copy(&clipboard);
        assert_eq!(outcome, CopyOutcome::CopiedWithFallback);
        assert_eq!(clipboard.written.borrow().as_slice(), ["https://x/y"]);
        assert_eq!(binder.notice().unwrap().kind, NoticeKind::Success);
    }

    #[test]
    fn test_copy_failure_is_reported() {
        let clipboard = FakeClipboard::new(false, false);
        let (outcome, binder) = copy(&clipboard);
        assert!(matches!(outcome, CopyOutcome::Failed(_)));
        assert_eq!(binder.notice().unwrap().kind, NoticeKind::Error);
    }
}
