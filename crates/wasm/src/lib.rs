//! JS-facing bridge around the carousel.
//!
//! Page payloads cross the boundary as JSON strings and are held as
//! [`serde_json::Value`], so the host can bind whatever shape it likes while
//! the equality gate on data changes still works. Fetch callbacks cannot be
//! invoked into JS from here, so `tick` instead *returns* the direction of a
//! fired fetch and the host reacts by calling `set_data`.

use serde_json::Value;
use swipedeck_core::{Carousel, PageHooks, SwipeDirection, TransitionPhase, render_carousel};
use swipedeck_protocol::Viewport;
use wasm_bindgen::prelude::*;

/// Availability flags pushed from JS, plus the fetch direction captured
/// during the last tick.
struct BridgeHooks {
    next_available: bool,
    prev_available: bool,
    pending: Option<SwipeDirection>,
}

impl PageHooks<Value> for BridgeHooks {
    fn is_next_available(&self) -> bool {
        self.next_available
    }

    fn is_prev_available(&self) -> bool {
        self.prev_available
    }

    fn fetch_next(&mut self, _current: &Value) {
        self.pending = Some(SwipeDirection::Next);
    }

    fn fetch_prev(&mut self, _current: &Value) {
        self.pending = Some(SwipeDirection::Previous);
    }
}

#[wasm_bindgen]
pub struct WasmCarousel {
    inner: Carousel<Value>,
    hooks: BridgeHooks,
}

#[wasm_bindgen]
impl WasmCarousel {
    /// Mount a carousel. `data_json` is the bound page payload as JSON, or
    /// absent for an empty mount; `now` is the host clock in seconds.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container_width: f64,
        content_ratio: f64,
        data_json: Option<String>,
        next_available: bool,
        prev_available: bool,
        now: f64,
    ) -> Result<WasmCarousel, JsError> {
        let data = parse_data(data_json)?;
        let hooks = BridgeHooks {
            next_available,
            prev_available,
            pending: None,
        };
        let inner = Carousel::new(container_width, content_ratio, data, &hooks, now);
        Ok(WasmCarousel { inner, hooks })
    }

    /// Push a new payload together with the availability flags that go with
    /// it. Equal payloads are ignored.
    pub fn set_data(
        &mut self,
        data_json: Option<String>,
        next_available: bool,
        prev_available: bool,
        now: f64,
    ) -> Result<(), JsError> {
        self.hooks.next_available = next_available;
        self.hooks.prev_available = prev_available;
        let data = parse_data(data_json)?;
        self.inner.set_data(data, &self.hooks, now);
        Ok(())
    }

    /// One horizontal drag sample: translation from the drag origin in
    /// logical pixels, negative = leftward.
    pub fn drag(&mut self, translation_x: f64, now: f64) {
        self.inner.drag(translation_x, now);
    }

    pub fn release(&mut self, now: f64) {
        self.inner.release(now);
    }

    /// Advance animations. Returns `"next"` or `"prev"` when the deferred
    /// fetch fired on this tick, so the host can load the neighboring page
    /// and answer with `set_data`.
    pub fn tick(&mut self, now: f64) -> Option<String> {
        self.hooks.pending = None;
        self.inner.tick(&mut self.hooks, now);
        self.hooks.pending.take().map(|direction| {
            match direction {
                SwipeDirection::Next => "next",
                SwipeDirection::Previous => "prev",
            }
            .to_owned()
        })
    }

    pub fn resize(&mut self, container_width: f64, content_ratio: f64) {
        self.inner.resize(container_width, content_ratio);
    }

    /// Render the current frame as a JSON array of draw commands. Slot
    /// content is left to the host; placeholder neighbors are drawn here.
    pub fn render(&self, width: f64, height: f64, dpr: f64, now: f64) -> Result<String, JsError> {
        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            width,
            height,
            dpr,
        };
        let commands = render_carousel(&self.inner, &viewport, now, |_| Vec::new());
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    }

    /// The payload to show right now (frozen during a transition), as JSON.
    pub fn displayed_json(&self) -> Result<Option<String>, JsError> {
        self.inner
            .displayed()
            .map(|value| serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string())))
            .transpose()
    }

    pub fn phase(&self) -> String {
        match self.inner.phase() {
            TransitionPhase::Idle => "idle",
            TransitionPhase::Dragging => "dragging",
            TransitionPhase::Committing => "committing",
            TransitionPhase::AwaitingFetch => "awaiting-fetch",
        }
        .to_owned()
    }

    pub fn is_in_swiping(&self) -> bool {
        self.inner.pager().is_in_swiping()
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.inner.pager().is_animating(now)
    }
}

fn parse_data(data_json: Option<String>) -> Result<Option<Value>, JsError> {
    data_json
        .map(|raw| serde_json::from_str(&raw).map_err(|e| JsError::new(&e.to_string())))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reports_a_fired_fetch_as_a_string() {
        let mut bridge = WasmCarousel::new(
            1000.0,
            0.7,
            Some("{\"page\":5}".to_owned()),
            true,
            true,
            0.0,
        )
        .unwrap();

        bridge.drag(-400.0, 0.1);
        bridge.release(0.11);
        assert_eq!(bridge.phase(), "awaiting-fetch");

        assert_eq!(bridge.tick(0.2), None);
        let fired = bridge.tick(1.0);
        assert_eq!(fired.as_deref(), Some("next"));
        assert!(bridge.is_in_swiping());

        bridge
            .set_data(Some("{\"page\":6}".to_owned()), true, true, 1.05)
            .unwrap();
        assert_eq!(bridge.phase(), "idle");
        assert_eq!(
            bridge.displayed_json().unwrap().as_deref(),
            Some("{\"page\":6}")
        );
    }

    #[test]
    fn equal_json_payload_is_ignored() {
        let mut bridge =
            WasmCarousel::new(1000.0, 0.7, Some("7".to_owned()), true, true, 0.0).unwrap();
        bridge
            .set_data(Some("7".to_owned()), true, true, 1.0)
            .unwrap();
        assert_eq!(bridge.phase(), "idle");
        assert_eq!(bridge.displayed_json().unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(WasmCarousel::new(1000.0, 0.7, Some("{not json".to_owned()), true, true, 0.0)
            .is_err());
    }
}
