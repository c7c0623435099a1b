//! Click and keyboard event handlers for `DayTimeline`.
//!
//! All methods here are `pub(crate)` helpers called from the closures wired
//! up in `mod.rs`.

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use super::{DayTimeline, SharedState};
#[cfg(target_arch = "wasm32")]
use crate::types::StepDirection;

#[cfg(target_arch = "wasm32")]
impl DayTimeline {
    /// Commit `index` as the selection, returning the ISO date plus the
    /// callbacks to fire once the state borrow has been dropped.
    pub(crate) fn commit_index_state(
        s: &mut SharedState,
        index: usize,
    ) -> (String, Option<Function>, Option<Function>) {
        let (selection_changed, focus_changed) = s.selection.commit(index);
        let iso = Self::iso_at(&s.range, index);
        let select_callback = if selection_changed {
            s.select_callback.clone()
        } else {
            None
        };
        let focus_callback = if focus_changed {
            s.focus_callback.clone()
        } else {
            None
        };
        (iso, select_callback, focus_callback)
    }

    pub(crate) fn invoke_date_callback(callback: Option<Function>, iso: &str) {
        if let Some(callback) = callback {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(iso));
        }
    }

    /// Click at a container-relative x offset: hit test the strip and commit
    /// the day under the pointer.
    pub(crate) fn internal_click(state: &Rc<RefCell<SharedState>>, offset_x: f32) {
        let committed = {
            let mut s = state.borrow_mut();
            let strip = s.strip;
            strip
                .index_at_x(s.viewport.scroll_x + offset_x)
                .map(|index| Self::commit_index_state(&mut s, index))
        }; // borrow dropped here - callbacks may call back into the viewer

        let Some((iso, select_callback, focus_callback)) = committed else {
            return;
        };
        Self::render_cells(state);
        Self::invoke_date_callback(focus_callback, &iso);
        Self::invoke_date_callback(select_callback, &iso);
    }

    /// Keyboard dispatch. Returns true when the key was handled (the caller
    /// prevents the default so the page does not scroll).
    pub(crate) fn internal_key_down(state: &Rc<RefCell<SharedState>>, key: &str) -> bool {
        match key {
            "ArrowLeft" | "ArrowRight" => {
                let direction = if key == "ArrowLeft" {
                    StepDirection::Back
                } else {
                    StepDirection::Forward
                };
                let stepped = {
                    let mut s = state.borrow_mut();
                    let total_days = s.strip.total_days();
                    s.selection.step(direction, total_days).map(|next| {
                        let commit = Self::commit_index_state(&mut s, next);
                        (commit, s.range.date_at(next))
                    })
                };
                // At the strip edge the key is consumed but nothing moves
                let Some(((iso, select_callback, focus_callback), date)) = stepped else {
                    return true;
                };
                Self::render_cells(state);
                Self::invoke_date_callback(focus_callback, &iso);
                Self::invoke_date_callback(select_callback, &iso);
                if let Some(date) = date {
                    Self::request_center(state, date, true);
                }
                true
            }
            "Enter" | " " => {
                let committed = {
                    let mut s = state.borrow_mut();
                    if s.selection.commit_focus() {
                        let iso = Self::iso_at(&s.range, s.selection.selected());
                        Some((iso, s.select_callback.clone()))
                    } else {
                        None
                    }
                };
                if let Some((iso, select_callback)) = committed {
                    Self::render_cells(state);
                    Self::invoke_date_callback(select_callback, &iso);
                }
                true
            }
            _ => false,
        }
    }
}
