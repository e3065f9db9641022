//! Hero slideshow and pointer parallax.
//!
//! Page effects with no connection to the cart. The rotation is a plain
//! state machine; [`start_rotation`] drives it from timers and hands the
//! styles to whatever applies them.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use storefront_commerce::config::HeroConfig;

use crate::error::UiError;
use crate::timer::{MaybeSend, RepeatingTask, TaskHandle};

const BASE_FILTER: &str = "brightness(0.8)";
const NEXT_FILTER: &str = "brightness(0.8) hue-rotate(90deg)";
const OTHER_FILTER: &str = "brightness(0.8) hue-rotate(180deg)";

/// Inline style for one background slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideStyle {
    pub transform: String,
    pub filter: &'static str,
}

/// Which slide is in front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroRotation {
    current: usize,
    slide_count: usize,
}

impl HeroRotation {
    /// Rotation over `slide_count` slides, starting at the first.
    pub fn new(slide_count: usize) -> Self {
        Self {
            current: 0,
            slide_count,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Styles placing the current slide in view.
    pub fn styles(&self) -> Vec<SlideStyle> {
        if self.slide_count == 0 {
            return Vec::new();
        }
        let next = (self.current + 1) % self.slide_count;
        (0..self.slide_count)
            .map(|index| {
                let offset = (index as i64 - self.current as i64) * 100;
                let filter = if index == self.current {
                    BASE_FILTER
                } else if index == next {
                    NEXT_FILTER
                } else {
                    OTHER_FILTER
                };
                SlideStyle {
                    transform: format!("translateX({}%)", offset),
                    filter,
                }
            })
            .collect()
    }

    /// One tick: return the styles for the current slide, then move on to
    /// the next.
    pub fn advance(&mut self) -> Vec<SlideStyle> {
        let styles = self.styles();
        if self.slide_count > 0 {
            self.current = (self.current + 1) % self.slide_count;
        }
        styles
    }
}

/// Transform for the distortion layer, from the pointer position and the
/// viewport size. A zero-sized viewport gives the centered offset.
pub fn parallax_transform(client_x: f64, client_y: f64, width: f64, height: f64) -> String {
    let x = normalize(client_x, width);
    let y = normalize(client_y, height);
    format!(
        "translate({}px, {}px) scale(1.02)",
        x * 10.0 - 5.0,
        y * 10.0 - 5.0
    )
}

fn normalize(position: f64, extent: f64) -> f64 {
    if extent > 0.0 && position.is_finite() {
        position / extent
    } else {
        0.5
    }
}

/// Timers driving a rotation. Dropping it stops the slideshow.
#[derive(Debug)]
pub struct HeroTimers {
    pub first: TaskHandle,
    pub interval: TaskHandle,
}

/// Start the slideshow: one tick shortly after load, then one every
/// interval. `apply` receives the styles on each tick.
pub fn start_rotation<F>(config: &HeroConfig, apply: F) -> Result<HeroTimers, UiError>
where
    F: FnMut(&[SlideStyle]) + MaybeSend + 'static,
{
    let state = Arc::new(Mutex::new((HeroRotation::new(config.slide_count), apply)));
    let first = TaskHandle::spawn_once(
        Duration::from_millis(config.initial_delay_ms),
        tick(Arc::clone(&state)),
    )?;
    let interval = TaskHandle::spawn_repeating(
        Duration::from_millis(config.interval_ms),
        tick(state),
    )?;
    Ok(HeroTimers { first, interval })
}

fn tick<F>(state: Arc<Mutex<(HeroRotation, F)>>) -> impl RepeatingTask
where
    F: FnMut(&[SlideStyle]) + MaybeSend + 'static,
{
    move || {
        if let Ok(mut guard) = state.lock() {
            let (rotation, apply) = &mut *guard;
            let styles = rotation.advance();
            apply(&styles);
        }
    }
}
