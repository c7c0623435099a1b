//! Scroll-settle tracking for `DayTimeline`.
//!
//! Raw scroll events restart a debounce timer; when it fires with no further
//! scrolling, the day nearest the viewport center becomes the focused day
//! and any deferred centering request is applied.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use super::{now_ms, DayTimeline, SharedState, FOCUS_SETTLE_DELAY_MS};

#[cfg(target_arch = "wasm32")]
impl DayTimeline {
    pub(crate) fn schedule_scroll_settle_timeout(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        // Cancel any existing timer
        if let Some(timer_id) = s.scroll_settle_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        if s.scroll_settle_closure.is_none() {
            let weak_state = Rc::downgrade(state);
            let closure = Closure::wrap(Box::new(move || {
                if let Some(state) = weak_state.upgrade() {
                    DayTimeline::handle_scroll_settle(&state);
                }
            }) as Box<dyn FnMut()>);
            s.scroll_settle_closure = Some(closure);
        }
        let Some(callback) = s.scroll_settle_closure.as_ref() else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            i32::try_from(FOCUS_SETTLE_DELAY_MS).unwrap_or(i32::MAX),
        ) {
            Ok(id) => s.scroll_settle_timer = Some(id),
            Err(_) => s.scroll_settle_timer = None,
        }
    }

    pub(crate) fn handle_scroll_settle(state: &Rc<RefCell<SharedState>>) {
        let (iso, focus_callback, pending) = {
            let mut s = state.borrow_mut();
            s.scroll_settle_timer = None;
            // Check if scroll is still ongoing
            let elapsed = now_ms() - s.last_scroll_ms;
            if elapsed < f64::from(FOCUS_SETTLE_DELAY_MS) {
                // Still scrolling, reschedule
                drop(s);
                Self::schedule_scroll_settle_timeout(state);
                return;
            }
            let focused = s
                .viewport
                .nearest_to_center(&s.strip)
                .filter(|&index| s.selection.settle_focus(index));
            let iso = focused.map(|index| Self::iso_at(&s.range, index));
            let focus_callback = if iso.is_some() {
                s.focus_callback.clone()
            } else {
                None
            };
            let pending = s.pending_center.take();
            (iso, focus_callback, pending)
        }; // borrow dropped here - callbacks may call back into the viewer

        if let Some(iso) = iso {
            // Focus outline moved
            Self::render_cells(state);
            Self::invoke_date_callback(focus_callback, &iso);
        }
        if let Some((date, smooth)) = pending {
            Self::request_center(state, date, smooth);
        }
    }

    /// Clear the pending timeout and its closure. Called on teardown so a
    /// stale callback can never fire into freed state.
    pub(crate) fn cancel_scroll_settle(state: &Rc<RefCell<SharedState>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut s = state.borrow_mut();
        if let Some(timer_id) = s.scroll_settle_timer.take() {
            window.clear_timeout_with_handle(timer_id);
        }
        s.scroll_settle_closure = None;
    }
}
