//! Page entry point.
//!
//! Opens the cart against `localStorage` and attaches every control found
//! on the page. Cart rows are replaced on each render, so their controls
//! are handled by listeners on the items container rather than on the rows.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storefront_commerce::config::{AddToCartConfig, ShareConfig};
use storefront_commerce::{CartConfig, CartSession, NoticeKind};
use storefront_observability::StructuredLogger;
use storefront_store::LocalStorage;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, Element, Event, HtmlDocument, HtmlElement, HtmlFormElement, HtmlInputElement,
    KeyboardEvent, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
};

use crate::contact::ContactMessage;
use crate::controls::{checkout_with_follow_up, CartControl};
use crate::dom::{current_page, dom_error, open_session, DomBinder};
use crate::error::UiError;
use crate::events::{closest, event_element, listen, listen_passive, ListenerHandle};
use crate::faq::Accordion;
use crate::hero::{parallax_transform, start_rotation, HeroTimers, SlideStyle};
use crate::page::Page;
use crate::render::html_escape;
use crate::selectors::{self, has_classes};
use crate::share::{
    copy_to_clipboard, report_copy, schedule_close, schedule_copied_reset, Clipboard,
    CopyOutcome, ShareAction, ShareModal, SharedProduct,
};
use crate::shop::{
    add_to_cart, schedule_reset, AddToCartButton, CategoryFilter, FilterBar, FilterButton,
    ProductAttributes, ProductDetail, Wishlist,
};
use crate::timer::TaskHandle;

type SharedSession = Arc<Mutex<CartSession<LocalStorage, DomBinder>>>;

/// Pending timer slot. A new timer replaces (and cancels) the old one.
type Pending = Rc<RefCell<Option<TaskHandle>>>;

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Everything that has to outlive `start`.
struct App {
    _listeners: Vec<ListenerHandle>,
    _hero: Option<HeroTimers>,
}

#[wasm_bindgen(start)]
pub fn start() {
    let logger = StructuredLogger::new(session_id());
    match mount(CartConfig::default(), logger.clone()) {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(e) => logger
            .error_builder("storefront failed to start")
            .field("reason", e.to_string())
            .emit(),
    }
}

fn session_id() -> String {
    format!("{:x}", js_sys::Date::now() as u64)
}

fn mount(config: CartConfig, logger: StructuredLogger) -> Result<App, UiError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| UiError::Dom("no document".to_string()))?;
    let page = current_page();
    let session = Arc::new(Mutex::new(open_session(config.clone(), logger.clone())?));
    let mut wiring = Wiring {
        document,
        session,
        config,
        logger: logger.with_page(page.as_str()),
        listeners: Vec::new(),
    };

    wiring.notice_close()?;
    wiring.cart_controls()?;
    wiring.promotion()?;
    wiring.checkout()?;
    wiring.add_to_cart_buttons()?;
    wiring.filters()?;
    wiring.product_cards()?;
    wiring.wishlist()?;
    wiring.share()?;
    wiring.faq()?;
    wiring.contact_form()?;
    let hero = wiring.hero(page)?;

    wiring
        .logger
        .info_builder("storefront started")
        .field_u64("listeners", wiring.listeners.len() as u64)
        .emit();
    Ok(App {
        _listeners: wiring.listeners,
        _hero: hero,
    })
}

/// Run `f` on the cart unless another handler holds it.
fn with_session<R>(
    session: &SharedSession,
    logger: &StructuredLogger,
    f: impl FnOnce(&mut CartSession<LocalStorage, DomBinder>) -> R,
) -> Option<R> {
    match session.try_lock() {
        Ok(mut guard) => Some(f(&mut guard)),
        Err(_) => {
            logger.debug_builder("cart busy, event dropped").emit();
            None
        }
    }
}

fn notify(session: &SharedSession, logger: &StructuredLogger, message: &str, kind: NoticeKind) {
    with_session(session, logger, |s| s.binder_mut().show_notice(message, kind));
}

fn attr(element: &Element, name: &str) -> Option<String> {
    element.get_attribute(name)
}

fn text_of(element: &Element, selector: &str) -> Option<String> {
    element
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|e| e.text_content())
        .map(|t| t.trim().to_string())
}

fn set_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property(property, value);
    }
}

struct Wiring {
    document: Document,
    session: SharedSession,
    config: CartConfig,
    logger: StructuredLogger,
    listeners: Vec<ListenerHandle>,
}

impl Wiring {
    fn find(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn find_input(&self, selector: &str) -> Option<HtmlInputElement> {
        self.find(selector).and_then(|e| e.dyn_into().ok())
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn on(
        &mut self,
        target: &web_sys::EventTarget,
        event_name: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), UiError> {
        self.listeners.push(listen(target, event_name, handler)?);
        Ok(())
    }

    fn shared(&self) -> (SharedSession, StructuredLogger) {
        (Arc::clone(&self.session), self.logger.clone())
    }

    /// The notice is created per message, so its close button is handled
    /// from the body. A click on the notice backdrop closes it too.
    fn notice_close(&mut self) -> Result<(), UiError> {
        let Some(body) = self.document.body() else {
            return Ok(());
        };
        let (session, logger) = self.shared();
        self.on(&body, "click", move |event| {
            let on_close = closest(&event, selectors::NOTICE_CLOSE).is_some();
            let on_backdrop = event_element(&event)
                .map(|el| has_classes(&el.class_name(), selectors::NOTICE))
                .unwrap_or(false);
            if on_close || on_backdrop {
                with_session(&session, &logger, |s| s.binder_mut().dismiss_notice());
            }
        })
    }

    fn cart_controls(&mut self) -> Result<(), UiError> {
        let Some(container) = self.find(selectors::CART_ITEMS) else {
            return Ok(());
        };
        let buttons = [
            selectors::PLUS_BUTTON,
            selectors::MINUS_BUTTON,
            selectors::REMOVE_BUTTON,
        ]
        .join(", ");

        let (session, logger) = self.shared();
        self.on(&container, "click", move |event| {
            let control = closest(&event, &buttons).and_then(|el| {
                CartControl::from_element_attrs(
                    &el.class_name(),
                    attr(&el, selectors::PRODUCT_ID_ATTR).as_deref(),
                    attr(&el, selectors::CATEGORY_ATTR).as_deref(),
                )
            });
            if let Some(control) = control {
                apply_control(&session, &logger, &control);
            }
        })?;

        let (session, logger) = self.shared();
        self.on(&container, "change", move |event| {
            let Some(input) = closest(&event, selectors::QUANTITY_INPUT)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let control = CartControl::from_quantity_input(
                &input.value(),
                attr(&input, selectors::PRODUCT_ID_ATTR).as_deref(),
                attr(&input, selectors::CATEGORY_ATTR).as_deref(),
            );
            match control {
                Some(control) => apply_control(&session, &logger, &control),
                // Put the stored quantity back in the input.
                None => {
                    with_session(&session, &logger, |s| s.refresh());
                }
            }
        })
    }

    fn promotion(&mut self) -> Result<(), UiError> {
        let (Some(button), Some(input)) = (
            self.find(selectors::APPLY_PROMO),
            self.find_input(selectors::PROMO_INPUT),
        ) else {
            return Ok(());
        };
        let (session, logger) = self.shared();
        self.on(&button, "click", move |_| {
            with_session(&session, &logger, |s| s.apply_promotion(&input.value()));
        })
    }

    fn checkout(&mut self) -> Result<(), UiError> {
        let Some(button) = self.find(selectors::CHECKOUT_BUTTON) else {
            return Ok(());
        };
        let (session, logger) = self.shared();
        let pending = Pending::default();
        self.on(&button, "click", move |_| match checkout_with_follow_up(&session) {
            Ok(Some((_, follow_up))) => *pending.borrow_mut() = Some(follow_up),
            Ok(None) => {}
            Err(e) => logger
                .warn_builder("checkout failed")
                .field("reason", e.to_string())
                .emit(),
        })
    }

    fn add_to_cart_buttons(&mut self) -> Result<(), UiError> {
        for element in self.find_all(selectors::ADD_TO_CART) {
            let label = element.text_content().unwrap_or_default();
            let state = Arc::new(Mutex::new(AddToCartButton::new(label.trim())));
            let pending = Pending::default();
            let config: AddToCartConfig = self.config.add_to_cart.clone();
            let (session, logger) = self.shared();
            let button = element.clone();
            self.on(&element, "click", move |event| {
                event.stop_propagation();
                let Some(product) = ProductAttributes::from_attrs(
                    attr(&button, selectors::PRODUCT_ID_ATTR),
                    attr(&button, selectors::PRODUCT_NAME_ATTR),
                    attr(&button, selectors::PRODUCT_PRICE_ATTR),
                    attr(&button, selectors::PRODUCT_IMAGE_ATTR),
                    attr(&button, selectors::CATEGORY_ATTR),
                ) else {
                    return;
                };
                {
                    let Ok(mut label) = state.lock() else {
                        return;
                    };
                    match with_session(&session, &logger, |s| add_to_cart(s, &product, &mut label)) {
                        Some(Ok(_)) => show_label(&button, &label),
                        Some(Err(e)) => {
                            logger
                                .warn_builder("add to cart failed")
                                .field("id", product.id.as_str())
                                .field("reason", e.to_string())
                                .emit();
                            return;
                        }
                        None => return,
                    }
                }
                let shown = button.clone();
                match schedule_reset(&state, &config, move |b| show_label(&shown, b)) {
                    Ok(handle) => *pending.borrow_mut() = Some(handle),
                    Err(e) => logger
                        .warn_builder("label reset not scheduled")
                        .field("reason", e.to_string())
                        .emit(),
                }
            })?;
        }
        Ok(())
    }

    fn filters(&mut self) -> Result<(), UiError> {
        let buttons = self.find_all(selectors::FILTER_BUTTON);
        if buttons.is_empty() {
            return Ok(());
        }
        let bar = Rc::new(RefCell::new(FilterBar::new(
            buttons
                .iter()
                .map(|b| FilterButton {
                    filter: attr(b, selectors::FILTER_ATTR).unwrap_or_default(),
                    label: b.text_content().unwrap_or_default().trim().to_string(),
                })
                .collect(),
        )));
        let (session, logger) = self.shared();
        let view = Rc::new(FilterView {
            buttons,
            cards: self.find_all(selectors::PRODUCT_CARD),
            session,
            logger,
        });

        for (index, button) in view.buttons.iter().enumerate() {
            let (bar, shown) = (Rc::clone(&bar), Rc::clone(&view));
            self.on(button, "click", move |_| {
                let picked = bar.borrow_mut().click(index);
                if let Some((filter, notice)) = picked {
                    shown.show(&bar.borrow(), &filter, &notice);
                }
            })?;
        }

        for card in self.find_all(selectors::CATEGORY_CARD) {
            let category = attr(&card, selectors::CATEGORY_ATTR).unwrap_or_default();
            let (bar, shown) = (Rc::clone(&bar), Rc::clone(&view));
            let section = self.find(selectors::PRODUCTS_SECTION);
            self.on(&card, "click", move |_| {
                let picked = bar.borrow_mut().select_category(&category);
                if let Some((filter, notice)) = picked {
                    shown.show(&bar.borrow(), &filter, &notice);
                }
                if let Some(section) = &section {
                    let options = ScrollIntoViewOptions::new();
                    options.set_behavior(ScrollBehavior::Smooth);
                    section.scroll_into_view_with_scroll_into_view_options(&options);
                }
            })?;
        }
        Ok(())
    }

    fn product_cards(&mut self) -> Result<(), UiError> {
        for card in self.find_all(selectors::PRODUCT_CARD) {
            let (session, logger) = self.shared();
            let target = card.clone();
            self.on(&target, "click", move |event| {
                let inside_actions = closest(&event, selectors::PRODUCT_ACTIONS).is_some();
                let inside_add = closest(&event, selectors::ADD_TO_CART).is_some();
                if !ProductDetail::shows_on_click(inside_actions, inside_add) {
                    return;
                }
                let detail = ProductDetail::from_card(
                    text_of(&card, selectors::PRODUCT_NAME),
                    text_of(&card, selectors::PRODUCT_PRICE),
                    text_of(&card, selectors::PRODUCT_DESCRIPTION),
                );
                if let Some(detail) = detail {
                    let (message, kind) = detail.notice();
                    notify(&session, &logger, &message, kind);
                }
            })?;
        }
        Ok(())
    }

    fn wishlist(&mut self) -> Result<(), UiError> {
        let wishlist = Rc::new(RefCell::new(Wishlist::default()));
        for button in self.find_all(selectors::WISHLIST_BUTTON) {
            let (session, logger) = self.shared();
            let wishlist = Rc::clone(&wishlist);
            let target = button.clone();
            self.on(&target, "click", move |event| {
                event.stop_propagation();
                let name = button
                    .closest(selectors::PRODUCT_CARD)
                    .ok()
                    .flatten()
                    .and_then(|card| text_of(&card, selectors::PRODUCT_NAME));
                let icon = button.query_selector("i").ok().flatten();
                let (Some(name), Some(icon)) = (name, icon) else {
                    return;
                };
                let (added, message, kind) = wishlist.borrow_mut().toggle(&name, &html_escape(&name));
                set_class(&icon, "fas", added);
                set_class(&icon, "far", !added);
                set_style(&button, "color", if added { "var(--accent)" } else { "" });
                notify(&session, &logger, &message, kind);
            })?;
        }
        Ok(())
    }

    fn share(&mut self) -> Result<(), UiError> {
        let (Some(modal_element), Some(link_input)) = (
            self.find(selectors::SHARE_MODAL),
            self.find_input(selectors::SHARE_LINK_INPUT),
        ) else {
            return Ok(());
        };
        let modal = Arc::new(Mutex::new(ShareModal::new()));
        let view = Rc::new(ShareView {
            modal: modal_element.clone(),
            link_input: link_input.clone(),
            copy_button: self.find(selectors::COPY_LINK_BUTTON),
            body: self.document.body(),
        });
        let share_config: ShareConfig = self.config.share.clone();

        for button in self.find_all(selectors::SHARE_BUTTON) {
            let (modal, view) = (Arc::clone(&modal), Rc::clone(&view));
            let target = button.clone();
            self.on(&target, "click", move |event| {
                event.stop_propagation();
                let Some(card) = button.closest(selectors::PRODUCT_CARD).ok().flatten() else {
                    return;
                };
                let page_url = web_sys::window()
                    .and_then(|w| w.location().href().ok())
                    .unwrap_or_default();
                let product = SharedProduct::from_card(
                    text_of(&card, selectors::PRODUCT_NAME),
                    text_of(&card, selectors::PRODUCT_PRICE),
                    &page_url,
                );
                if let Ok(mut modal) = modal.lock() {
                    modal.open(product);
                    view.sync(&modal);
                };
            })?;
        }

        if let Some(close) = self.find(selectors::SHARE_MODAL_CLOSE) {
            let (modal, view) = (Arc::clone(&modal), Rc::clone(&view));
            self.on(&close, "click", move |_| {
                if let Ok(mut modal) = modal.lock() {
                    modal.close();
                    view.sync(&modal);
                };
            })?;
        }

        let (backdrop_modal, backdrop_view) = (Arc::clone(&modal), Rc::clone(&view));
        let backdrop = modal_element.clone();
        self.on(&modal_element, "click", move |event| {
            let on_backdrop = event_element(&event).map(|el| el == backdrop).unwrap_or(false);
            if let Ok(mut modal) = backdrop_modal.lock() {
                if modal.on_click(on_backdrop) {
                    backdrop_view.sync(&modal);
                }
            };
        })?;

        let (key_modal, key_view) = (Arc::clone(&modal), Rc::clone(&view));
        let document = self.document.clone();
        self.on(&document, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                return;
            };
            if let Ok(mut modal) = key_modal.lock() {
                if modal.on_key(&key) {
                    key_view.sync(&modal);
                }
            };
        })?;

        if let Some(copy_button) = self.find(selectors::COPY_LINK_BUTTON) {
            let (session, logger) = self.shared();
            let (modal, view) = (Arc::clone(&modal), Rc::clone(&view));
            let config = share_config.clone();
            let pending = Pending::default();
            let document = self.document.clone();
            self.on(&copy_button, "click", move |_| {
                let clipboard = DomClipboard {
                    document: document.clone(),
                    input: link_input.clone(),
                };
                let url = link_input.value();
                let (session, logger) = (Arc::clone(&session), logger.clone());
                let (modal, view, pending) = (Arc::clone(&modal), Rc::clone(&view), Rc::clone(&pending));
                let config = config.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = copy_to_clipboard(&clipboard, &logger, &url).await;
                    if !matches!(outcome, CopyOutcome::Failed(_)) {
                        if let Ok(mut modal) = modal.lock() {
                            modal.mark_copied();
                            view.sync(&modal);
                        }
                        let reset_view = Rc::clone(&view);
                        match schedule_copied_reset(&modal, &config, move |m| reset_view.sync(m)) {
                            Ok(handle) => *pending.borrow_mut() = Some(handle),
                            Err(e) => logger
                                .warn_builder("copy label reset not scheduled")
                                .field("reason", e.to_string())
                                .emit(),
                        }
                    }
                    with_session(&session, &logger, |s| report_copy(&outcome, s.binder_mut(), &logger));
                });
            })?;
        }

        let pending = Pending::default();
        for option in self.find_all(selectors::SHARE_OPTION) {
            let (session, logger) = self.shared();
            let (modal, view, pending) = (Arc::clone(&modal), Rc::clone(&view), Rc::clone(&pending));
            let config = share_config.clone();
            let target = option.clone();
            self.on(&target, "click", move |_| {
                let platform = attr(&option, selectors::PLATFORM_ATTR).unwrap_or_default();
                let action = match modal.lock() {
                    Ok(modal) => modal.share(&platform),
                    Err(_) => return,
                };
                let action = match action {
                    Ok(Some(action)) => action,
                    Ok(None) => return,
                    Err(e) => {
                        logger
                            .debug_builder("share option ignored")
                            .field("reason", e.to_string())
                            .emit();
                        return;
                    }
                };
                if let Err(e) = open_share(&action) {
                    logger
                        .warn_builder("share window not opened")
                        .field("target", action.target.as_str())
                        .field("reason", e.to_string())
                        .emit();
                }
                notify(&session, &logger, &action.notice, NoticeKind::Info);
                let close_view = Rc::clone(&view);
                match schedule_close(&modal, &config, move |m| close_view.sync(m)) {
                    Ok(handle) => *pending.borrow_mut() = Some(handle),
                    Err(e) => logger
                        .warn_builder("share modal close not scheduled")
                        .field("reason", e.to_string())
                        .emit(),
                }
            })?;
        }
        Ok(())
    }

    fn faq(&mut self) -> Result<(), UiError> {
        let items = Rc::new(self.find_all(selectors::FAQ_ITEM));
        let accordion = Rc::new(RefCell::new(Accordion::new(items.len())));
        for (index, item) in items.iter().enumerate() {
            let Some(question) = item.query_selector(selectors::FAQ_QUESTION).ok().flatten() else {
                continue;
            };
            let (items, accordion) = (Rc::clone(&items), Rc::clone(&accordion));
            self.on(&question, "click", move |_| {
                let mut accordion = accordion.borrow_mut();
                accordion.toggle(index);
                for (item, open) in items.iter().zip(accordion.states()) {
                    set_class(item, selectors::ACTIVE_CLASS, open);
                }
            })?;
        }
        Ok(())
    }

    fn contact_form(&mut self) -> Result<(), UiError> {
        let Some(form) = self
            .find(selectors::CONTACT_FORM)
            .and_then(|e| e.dyn_into::<HtmlFormElement>().ok())
        else {
            return Ok(());
        };
        let (session, logger) = self.shared();
        let target = form.clone();
        self.on(&target, "submit", move |event| {
            event.prevent_default();
            let field = |name: &str| -> Option<String> {
                let element = form
                    .query_selector(&format!("[name=\"{}\"]", name))
                    .ok()
                    .flatten()?;
                js_sys::Reflect::get(&element, &JsValue::from_str("value"))
                    .ok()?
                    .as_string()
            };
            let message = ContactMessage::from_fields(field("name"), field("email"), field("subject"));
            let (text, kind) = message.acknowledgement();
            notify(&session, &logger, &text, kind);
            form.reset();
        })
    }

    fn hero(&mut self, page: Page) -> Result<Option<HeroTimers>, UiError> {
        let slides = self.find_all(selectors::HERO_SLIDE);
        if !page.runs_hero(!slides.is_empty()) {
            return Ok(None);
        }

        if let Some(distortion) = self.find(selectors::DISTORTION) {
            let document = self.document.clone();
            self.listeners.push(listen_passive(&document, "mousemove", move |event| {
                let Some(pointer) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let Some(window) = web_sys::window() else {
                    return;
                };
                let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
                let transform = parallax_transform(
                    f64::from(pointer.client_x()),
                    f64::from(pointer.client_y()),
                    size(window.inner_width()),
                    size(window.inner_height()),
                );
                set_style(&distortion, "transform", &transform);
            })?);
        }

        if slides.is_empty() {
            return Ok(None);
        }
        let timers = start_rotation(&self.config.hero, move |styles: &[SlideStyle]| {
            for (slide, style) in slides.iter().zip(styles) {
                set_style(slide, "transform", &style.transform);
                set_style(slide, "filter", style.filter);
            }
        })?;
        Ok(Some(timers))
    }
}

fn apply_control(session: &SharedSession, logger: &StructuredLogger, control: &CartControl) {
    if let Some(Err(e)) = with_session(session, logger, |s| control.apply(s)) {
        logger
            .warn_builder("cart control failed")
            .field("id", control.id.as_str())
            .field("reason", e.to_string())
            .emit();
    }
}

fn show_label(button: &Element, state: &AddToCartButton) {
    button.set_text_content(Some(&state.label()));
    set_class(button, "added", state.is_added());
}

fn open_share(action: &ShareAction) -> Result<(), UiError> {
    let window = web_sys::window().ok_or_else(|| UiError::Dom("no window".to_string()))?;
    if action.opens_in_place() {
        window.location().set_href(&action.url).map_err(dom_error)
    } else {
        window
            .open_with_url_and_target_and_features(&action.url, "_blank", "width=600,height=400")
            .map(|_| ())
            .map_err(dom_error)
    }
}

/// Product cards and filter buttons driven by the [`FilterBar`].
struct FilterView {
    buttons: Vec<Element>,
    cards: Vec<Element>,
    session: SharedSession,
    logger: StructuredLogger,
}

impl FilterView {
    fn show(&self, bar: &FilterBar, filter: &CategoryFilter, notice: &str) {
        for (button, active) in self.buttons.iter().zip(bar.states()) {
            set_class(button, selectors::ACTIVE_CLASS, active);
        }
        let categories: Vec<String> = self
            .cards
            .iter()
            .map(|card| attr(card, selectors::CATEGORY_ATTR).unwrap_or_default())
            .collect();
        let visible = filter.visibility(categories.iter().map(String::as_str));
        for (card, visible) in self.cards.iter().zip(visible) {
            if visible {
                set_style(card, "display", "block");
                set_style(card, "animation", "fadeIn 0.5s ease forwards");
            } else {
                set_style(card, "display", "none");
            }
        }
        notify(&self.session, &self.logger, notice, NoticeKind::Info);
    }
}

/// Share modal elements mirroring a [`ShareModal`].
struct ShareView {
    modal: Element,
    link_input: HtmlInputElement,
    copy_button: Option<Element>,
    body: Option<HtmlElement>,
}

impl ShareView {
    fn sync(&self, state: &ShareModal) {
        let open = state.is_open();
        set_class(&self.modal, selectors::ACTIVE_CLASS, open);
        if let Some(link) = state.link() {
            self.link_input.set_value(link);
        }
        if let Some(body) = &self.body {
            let _ = body.style().set_property("overflow", if open { "hidden" } else { "" });
        }
        if let Some(button) = &self.copy_button {
            button.set_inner_html(state.copy_label());
            set_class(button, "copied", state.is_copied());
        }
    }
}

/// Async clipboard API with select-and-copy fallback on the link input.
struct DomClipboard {
    document: Document,
    input: HtmlInputElement,
}

fn clipboard_error(value: JsValue) -> UiError {
    UiError::Clipboard(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

#[async_trait(?Send)]
impl Clipboard for DomClipboard {
    async fn write_text(&self, text: &str) -> Result<(), UiError> {
        let window = web_sys::window().ok_or_else(|| UiError::Clipboard("no window".to_string()))?;
        let navigator = window.navigator();
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(clipboard_error)?;
        if clipboard.is_undefined() {
            return Err(UiError::Clipboard("clipboard API unavailable".to_string()));
        }
        let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(clipboard_error)?
            .dyn_into::<js_sys::Function>()
            .map_err(clipboard_error)?;
        let promise = write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(clipboard_error)?
            .dyn_into::<js_sys::Promise>()
            .map_err(clipboard_error)?;
        JsFuture::from(promise).await.map(|_| ()).map_err(clipboard_error)
    }

    fn write_text_sync(&self, _text: &str) -> Result<(), UiError> {
        self.input.select();
        let document = self
            .document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| UiError::Clipboard("not an HTML document".to_string()))?;
        match document.exec_command("copy") {
            Ok(true) => Ok(()),
            Ok(false) => Err(UiError::Clipboard("copy command refused".to_string())),
            Err(e) => Err(clipboard_error(e)),
        }
    }
}
