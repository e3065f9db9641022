//! Browser binder.
//!
//! Writes straight into the live document. Every lookup may come back
//! empty, in which case the update is skipped.

use storefront_commerce::cart::{CartSummary, CombinedView};
use storefront_commerce::{CartConfig, CartSession, NoticeKind, PresentationBinder};
use storefront_observability::StructuredLogger;
use storefront_store::LocalStorage;
use web_sys::{Document, Element};

use crate::error::UiError;
use crate::notice::{notice_class, render_notice, NoticeBoard};
use crate::page::Page;
use crate::render::{render_cart_items, SummaryText};
use crate::selectors;
use crate::timer::TaskHandle;

const SHOW_DELAY_MS: u64 = 10;

/// Presentation binder over the page's DOM.
pub struct DomBinder {
    document: Document,
    notices: NoticeBoard,
    dismiss: Option<TaskHandle>,
    logger: StructuredLogger,
}

impl DomBinder {
    /// Bind to the current window's document.
    pub fn attach(notices: NoticeBoard, logger: StructuredLogger) -> Result<Self, UiError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| UiError::Dom("no document".to_string()))?;
        Ok(Self {
            document,
            notices,
            dismiss: None,
            logger,
        })
    }

    /// Close the visible notice now and cancel its timer.
    pub fn dismiss_notice(&mut self) {
        if let Some(mut timer) = self.dismiss.take() {
            timer.cancel();
        }
        if let Some(id) = self.notices.current().map(|n| n.id) {
            self.notices.dismiss(id);
        }
        if let Some(existing) = self.find(selectors::NOTICE) {
            existing.remove();
        }
    }

    fn find(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn set_text(&self, selector: &str, text: &str) {
        if let Some(element) = self.find(selector) {
            element.set_text_content(Some(text));
        }
    }

    fn mount_notice(&mut self, message: &str, kind: NoticeKind) -> Result<(), UiError> {
        let id = self.notices.show(message, kind);
        let Some(notice) = self.notices.current().cloned() else {
            return Ok(());
        };
        let body = self
            .document
            .body()
            .ok_or_else(|| UiError::Dom("no body".to_string()))?;

        let element = self.document.create_element("div").map_err(dom_error)?;
        let class = notice_class(kind);
        element.set_class_name(&class);
        element
            .set_attribute("data-notice-id", &id.to_string())
            .map_err(dom_error)?;
        element.set_inner_html(&render_notice(&notice));
        body.append_child(&element).map_err(dom_error)?;

        let shown = element.clone();
        let shown_class = format!("{} show", class);
        TaskHandle::spawn_once(std::time::Duration::from_millis(SHOW_DELAY_MS), move || {
            shown.set_class_name(&shown_class);
        })?
        .detach();

        let fade = self.notices.fade();
        let timer = TaskHandle::spawn_once(self.notices.auto_dismiss(), move || {
            element.set_class_name(&class);
            if let Ok(handle) = TaskHandle::spawn_once(fade, move || element.remove()) {
                handle.detach();
            }
        })?;
        // Replacing the handle cancels the previous notice's expiry.
        self.dismiss = Some(timer);
        Ok(())
    }
}

impl PresentationBinder for DomBinder {
    fn has_cart_view(&self) -> bool {
        self.find(selectors::CART_ITEMS).is_some()
    }

    fn render_combined_cart(&mut self, view: &CombinedView<'_>) {
        if let Some(container) = self.find(selectors::CART_ITEMS) {
            container.set_inner_html(&render_cart_items(view));
        }
    }

    fn update_badge(&mut self, units: u64) {
        let text = units.to_string();
        for selector in selectors::BADGES {
            self.set_text(selector, &text);
        }
    }

    fn update_summary(&mut self, summary: &CartSummary) {
        let text = SummaryText::from_summary(summary);
        for (selector, value) in text.fields() {
            self.set_text(selector, value);
        }
    }

    fn show_notice(&mut self, message: &str, kind: NoticeKind) {
        if let Some(existing) = self.find(selectors::NOTICE) {
            existing.remove();
        }
        if let Err(e) = self.mount_notice(message, kind) {
            self.logger
                .warn_builder("notice not shown")
                .field("reason", e.to_string())
                .emit();
        }
    }
}

/// The page the window is showing.
pub fn current_page() -> Page {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| Page::from_path(&path))
        .unwrap_or(Page::Other)
}

/// Open the cart for the current page against `localStorage`.
pub fn open_session(
    config: CartConfig,
    logger: StructuredLogger,
) -> Result<CartSession<LocalStorage, DomBinder>, UiError> {
    let store = LocalStorage::open().map_err(|e| UiError::Dom(e.to_string()))?;
    let logger = logger.with_page(current_page().as_str());
    let binder = DomBinder::attach(NoticeBoard::new(&config.notices), logger.clone())?;
    Ok(CartSession::open(config, store, binder, logger)?)
}

pub(crate) fn dom_error(value: wasm_bindgen::JsValue) -> UiError {
    UiError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
