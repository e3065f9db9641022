//! DOM event listeners.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, Event, EventTarget};

use crate::dom::dom_error;
use crate::error::UiError;

/// A registered listener. Dropping it detaches the listener.
pub struct ListenerHandle {
    target: EventTarget,
    event_name: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_name, self.callback.as_ref().unchecked_ref());
    }
}

/// Listen for `event_name` on `target`.
pub fn listen(
    target: &EventTarget,
    event_name: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<ListenerHandle, UiError> {
    listen_with(target, event_name, false, handler)
}

/// Like [`listen`], marked passive. For pointer tracking.
pub fn listen_passive(
    target: &EventTarget,
    event_name: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<ListenerHandle, UiError> {
    listen_with(target, event_name, true, handler)
}

fn listen_with(
    target: &EventTarget,
    event_name: &'static str,
    passive: bool,
    handler: impl FnMut(Event) + 'static,
) -> Result<ListenerHandle, UiError> {
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback_and_add_event_listener_options(
            event_name,
            callback.as_ref().unchecked_ref(),
            &options,
        )
        .map_err(dom_error)?;
    Ok(ListenerHandle {
        target: target.clone(),
        event_name,
        callback,
    })
}

/// The element an event was dispatched to.
pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// Nearest ancestor of the event target (or the target) matching `selector`.
pub fn closest(event: &Event, selector: &str) -> Option<Element> {
    event_element(event).and_then(|el| el.closest(selector).ok().flatten())
}
