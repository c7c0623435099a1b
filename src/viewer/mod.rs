//! Main DayTimeline struct - the primary entry point for the day-strip viewer.
//!
//! This module provides the WASM-exported `DayTimeline` struct that handles:
//! - Building the DOM scroll surface (native scroll container + sized spacer)
//! - Managing viewport state (scroll offset, materialized window)
//! - Rendering only the currently materializable day cells
//! - Handling user interactions (scroll, click, keyboard) and host callbacks
//!
//! Event handlers are registered when the viewer is created - no manual
//! JavaScript wiring required. The host supplies slot records and receives
//! `onDateSelect` / `onFocusChange` callbacks plus an imperative
//! `centerOnDate` handle.

mod events;
mod scroll;

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use web_sys::{
    HtmlDivElement, HtmlElement, KeyboardEvent, MouseEvent, ResizeObserver, ScrollBehavior,
    ScrollToOptions,
};

use chrono::NaiveDate;

#[cfg(target_arch = "wasm32")]
use crate::aggregate::AvailabilityLevel;
use crate::aggregate::SlotIndex;
use crate::calendar::{DateIndexMapper, TimelineRange};
use crate::layout::{StripLayout, Viewport};
#[cfg(not(target_arch = "wasm32"))]
use crate::types::StepDirection;
use crate::types::{DaySlot, SelectionState};

/// Quiet period (ms) after the last scroll event before the viewport center
/// becomes the focused day.
pub const FOCUS_SETTLE_DELAY_MS: u32 = 150;

/// Height of the strip in logical pixels.
#[cfg(target_arch = "wasm32")]
const STRIP_HEIGHT_PX: f32 = 88.0;

/// Cell background per availability level.
#[cfg(target_arch = "wasm32")]
fn level_background(level: AvailabilityLevel) -> &'static str {
    match level {
        AvailabilityLevel::Green => "#D7F0DC",
        AvailabilityLevel::Amber => "#FCEBC8",
        AvailabilityLevel::Red => "#F8D3D0",
        AvailabilityLevel::Grey => "#ECECEC",
    }
}

/// Accent used for the committed selection border.
#[cfg(target_arch = "wasm32")]
const SELECTED_ACCENT: &str = "#217346";

// Timing helper for settle bookkeeping.
#[cfg(target_arch = "wasm32")]
pub(crate) fn now_ms() -> f64 {
    if let Some(window) = web_sys::window() {
        if let Some(perf) = window.performance() {
            return perf.now();
        }
    }
    js_sys::Date::now()
}

#[cfg(target_arch = "wasm32")]
fn scroll_left_f64(element: &HtmlDivElement) -> f64 {
    js_sys::Reflect::get(element.as_ref(), &JsValue::from_str("scrollLeft"))
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(f64::from(element.scroll_left()))
}

#[cfg(target_arch = "wasm32")]
fn warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

/// Shared state that can be accessed by event handlers (wasm32 only)
#[cfg(target_arch = "wasm32")]
pub(crate) struct SharedState {
    pub(crate) range: TimelineRange,
    pub(crate) strip: StripLayout,
    pub(crate) viewport: Viewport,
    pub(crate) selection: SelectionState,
    pub(crate) slots: SlotIndex,
    pub(crate) day_width: f32,
    pub(crate) select_callback: Option<Function>,
    pub(crate) focus_callback: Option<Function>,
    pub(crate) scroll_settle_timer: Option<i32>,
    pub(crate) scroll_settle_closure: Option<Closure<dyn FnMut()>>,
    pub(crate) last_scroll_ms: f64,
    /// Center request parked while a user gesture is still settling.
    pub(crate) pending_center: Option<(NaiveDate, bool)>,
    pub(crate) scroll_container: Option<HtmlDivElement>,
    pub(crate) spacer: Option<HtmlDivElement>,
}

/// Everything needed to paint one day cell, extracted under the state borrow
/// so DOM mutation happens with no borrow held.
#[cfg(target_arch = "wasm32")]
struct CellPaint {
    x: f32,
    width: f32,
    weekday: String,
    day_of_month: String,
    meta: String,
    badges: String,
    background: &'static str,
    selected: bool,
    focused: bool,
    title: String,
}

/// The day-strip navigator exported to JavaScript.
#[wasm_bindgen]
pub struct DayTimeline {
    #[cfg(target_arch = "wasm32")]
    state: Rc<RefCell<SharedState>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    scroll_closure: Option<Closure<dyn FnMut(web_sys::Event)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    click_closure: Option<Closure<dyn FnMut(MouseEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    key_closure: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    #[cfg(target_arch = "wasm32")]
    #[allow(dead_code)]
    resize_closure: Option<Closure<dyn FnMut(js_sys::Array)>>,
    #[cfg(target_arch = "wasm32")]
    resize_observer: Option<ResizeObserver>,

    // Non-wasm32 fields (headless state for native tests)
    #[cfg(not(target_arch = "wasm32"))]
    range: TimelineRange,
    #[cfg(not(target_arch = "wasm32"))]
    strip: StripLayout,
    #[cfg(not(target_arch = "wasm32"))]
    viewport: Viewport,
    #[cfg(not(target_arch = "wasm32"))]
    selection: SelectionState,
    #[cfg(not(target_arch = "wasm32"))]
    slots: SlotIndex,
    #[cfg(not(target_arch = "wasm32"))]
    day_width: f32,
    #[cfg(not(target_arch = "wasm32"))]
    scroll_active: bool,
    #[cfg(not(target_arch = "wasm32"))]
    pending_center: Option<(NaiveDate, bool)>,
}

// ============================================================================
// WASM32 Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl DayTimeline {
    /// Create a new day strip inside `parent`.
    ///
    /// The strip is epoch-anchored at today in the tenant zone. The supplied
    /// selected date starts both selected and focused and is centered on
    /// first layout. Pass `0` for `day_width` to use the default cell width.
    ///
    /// # Errors
    /// Returns an error when `selected_date` is not a valid `YYYY-MM-DD`
    /// string. An unknown timezone falls back to the default tenant zone
    /// with a console warning instead of failing.
    #[wasm_bindgen(constructor)]
    pub fn new(
        parent: HtmlElement,
        tenant_tz: &str,
        selected_date: &str,
        day_width: f32,
    ) -> Result<DayTimeline, JsValue> {
        console_error_panic_hook::set_once();

        let tz = match DateIndexMapper::resolve_tz(tenant_tz) {
            Ok(tz) => tz,
            Err(_) => {
                warn(&format!(
                    "dayline: unknown timezone {tenant_tz:?}, using {}",
                    crate::calendar::FALLBACK_TZ.name()
                ));
                crate::calendar::FALLBACK_TZ
            }
        };
        let selected = DateIndexMapper::parse_iso(selected_date)?;

        let epoch = DateIndexMapper::today_in(tz);
        let mut range = TimelineRange::new(DateIndexMapper::new(epoch, tz));
        if !range.expand_to_include(selected) {
            warn(&format!(
                "dayline: selected date {selected} is outside the addressable range, starting at the epoch"
            ));
        }
        let selected_index = range
            .index_of(selected)
            .unwrap_or_else(|| Self::epoch_index(&range));

        let total_days = usize::try_from(range.total_days()).unwrap_or(0);
        let strip = StripLayout::new(day_width, total_days);
        let day_width = strip.day_width();

        let state = Rc::new(RefCell::new(SharedState {
            range,
            strip,
            viewport: Viewport::new(),
            selection: SelectionState::new(selected_index),
            slots: SlotIndex::default(),
            day_width,
            select_callback: None,
            focus_callback: None,
            scroll_settle_timer: None,
            scroll_settle_closure: None,
            last_scroll_ms: 0.0,
            pending_center: None,
            scroll_container: None,
            spacer: None,
        }));

        let (scroll_closure, click_closure, key_closure) =
            Self::setup_scroll_surface(&parent, &state);
        let (resize_closure, resize_observer) = Self::setup_resize_observer(&state);

        let viewer = DayTimeline {
            state,
            scroll_closure,
            click_closure,
            key_closure,
            resize_closure,
            resize_observer,
        };

        viewer.update_scroll_spacer();
        Self::render_cells(&viewer.state);
        // Bring the initial selection into view once layout has settled.
        Self::request_center(&viewer.state, selected, false);
        Ok(viewer)
    }

    /// Replace the slot list (an array of slot records).
    ///
    /// # Errors
    /// Returns an error when the value is not a decodable slot array.
    pub fn set_slots(&self, slots: JsValue) -> Result<(), JsValue> {
        let slots: Vec<DaySlot> = serde_wasm_bindgen::from_value(slots)
            .map_err(|e| JsValue::from_str(&format!("Slot decode error: {e}")))?;
        let index = SlotIndex::build(&slots);
        if index.skipped() > 0 {
            warn(&format!(
                "dayline: skipped {} slot(s) with unparseable dates",
                index.skipped()
            ));
        }
        self.state.borrow_mut().slots = index;
        Self::render_cells(&self.state);
        Ok(())
    }

    /// Host-driven selection change. Does not fire `onDateSelect` (the host
    /// already knows); centers the new selection.
    ///
    /// # Errors
    /// Returns an error when the date string is invalid.
    pub fn set_selected_date(&self, iso: &str) -> Result<(), JsValue> {
        let date = DateIndexMapper::parse_iso(iso)?;
        {
            let mut s = self.state.borrow_mut();
            if !Self::ensure_in_range(&mut s, date) {
                warn(&format!("dayline: {iso} is outside the addressable range"));
                return Ok(());
            }
            let Some(index) = s.range.index_of(date) else {
                return Ok(());
            };
            s.selection.commit(index);
        }
        Self::render_cells(&self.state);
        Self::request_center(&self.state, date, false);
        Ok(())
    }

    /// Host-driven focus change. Does not fire `onFocusChange` and does not
    /// touch the committed selection; out-of-range dates are ignored.
    ///
    /// # Errors
    /// Returns an error when the date string is invalid.
    pub fn set_focused_date(&self, iso: &str) -> Result<(), JsValue> {
        let date = DateIndexMapper::parse_iso(iso)?;
        {
            let mut s = self.state.borrow_mut();
            let Some(index) = s.range.index_of(date) else {
                return Ok(());
            };
            s.selection.settle_focus(index);
        }
        Self::render_cells(&self.state);
        Ok(())
    }

    /// Register the selection-commit callback (`onDateSelect(isoDate)`).
    pub fn set_on_date_select(&self, callback: Function) {
        self.state.borrow_mut().select_callback = Some(callback);
    }

    /// Register the focus-change callback (`onFocusChange(isoDate)`).
    pub fn set_on_focus_change(&self, callback: Function) {
        self.state.borrow_mut().focus_callback = Some(callback);
    }

    /// Currently committed selection as `YYYY-MM-DD`.
    pub fn selected_date(&self) -> String {
        let s = self.state.borrow();
        Self::iso_at(&s.range, s.selection.selected())
    }

    /// Day currently nearest the viewport center, as `YYYY-MM-DD`.
    pub fn focused_date(&self) -> String {
        let s = self.state.borrow();
        Self::iso_at(&s.range, s.selection.focused())
    }

    /// Aggregate summary for one day, as a plain JS object.
    ///
    /// # Errors
    /// Returns an error when the date string is invalid.
    pub fn aggregate_for(&self, iso: &str) -> Result<JsValue, JsValue> {
        let date = DateIndexMapper::parse_iso(iso)?;
        let aggregate = self.state.borrow().slots.aggregate_for(date);
        serde_wasm_bindgen::to_value(&aggregate)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// Center the strip on a date, expanding the range forward when needed.
    ///
    /// Out-of-range dates (including anything past the range cap) are logged
    /// and ignored - scroll state is left untouched and nothing throws. A
    /// request arriving while the user's own gesture is still settling is
    /// deferred until the gesture ends (last request wins).
    pub fn center_on_date(&self, iso: &str, smooth: bool) {
        let date = match DateIndexMapper::parse_iso(iso) {
            Ok(date) => date,
            Err(_) => {
                warn(&format!("dayline: centerOnDate got invalid date {iso:?}"));
                return;
            }
        };
        Self::request_center(&self.state, date, smooth);
    }

    /// Update the viewport width (logical pixels). Usually unnecessary - a
    /// ResizeObserver keeps the viewport in sync with the container.
    pub fn resize(&self, width: f32) {
        self.state.borrow_mut().viewport.resize(width);
        Self::render_cells(&self.state);
    }

    /// Tear down DOM nodes, listeners, and the settle timer.
    ///
    /// Safe to call more than once; the instance is inert afterwards.
    pub fn destroy(&mut self) {
        Self::cancel_scroll_settle(&self.state);
        if let Some(observer) = self.resize_observer.take() {
            observer.disconnect();
        }
        let container = {
            let mut s = self.state.borrow_mut();
            s.spacer = None;
            s.scroll_container.take()
        };
        if let Some(container) = container {
            container.remove();
        }
        self.scroll_closure = None;
        self.click_closure = None;
        self.key_closure = None;
        self.resize_closure = None;
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for DayTimeline {
    fn drop(&mut self) {
        // The settle timer must not outlive the state it captures.
        Self::cancel_scroll_settle(&self.state);
        if let Some(observer) = self.resize_observer.take() {
            observer.disconnect();
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl DayTimeline {
    pub(crate) fn epoch_index(range: &TimelineRange) -> usize {
        usize::try_from(range.days_before()).unwrap_or(0)
    }

    pub(crate) fn iso_at(range: &TimelineRange, index: usize) -> String {
        range
            .date_at(index)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// Grow the range (and the spacer) so `date` is addressable. Returns
    /// false when the date cannot be made addressable.
    pub(crate) fn ensure_in_range(s: &mut SharedState, date: NaiveDate) -> bool {
        if s.range.contains(date) {
            return true;
        }
        if !s.range.expand_to_include(date) {
            return false;
        }
        let total_days = usize::try_from(s.range.total_days()).unwrap_or(0);
        s.strip = StripLayout::new(s.day_width, total_days);
        true
    }

    /// Build the scroll container + spacer inside `parent` and wire the
    /// scroll, click, and keyboard listeners.
    #[allow(clippy::type_complexity)]
    fn setup_scroll_surface(
        parent: &HtmlElement,
        state: &Rc<RefCell<SharedState>>,
    ) -> (
        Option<Closure<dyn FnMut(web_sys::Event)>>,
        Option<Closure<dyn FnMut(MouseEvent)>>,
        Option<Closure<dyn FnMut(KeyboardEvent)>>,
    ) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return (None, None, None);
        };
        let Some(container) = document
            .create_element("div")
            .ok()
            .and_then(|e| e.dyn_into::<HtmlDivElement>().ok())
        else {
            return (None, None, None);
        };
        let Some(spacer) = document
            .create_element("div")
            .ok()
            .and_then(|e| e.dyn_into::<HtmlDivElement>().ok())
        else {
            return (None, None, None);
        };

        let container_style = container.style();
        let _ = container_style.set_property("position", "relative");
        let _ = container_style.set_property("overflow-x", "auto");
        let _ = container_style.set_property("overflow-y", "hidden");
        let _ = container_style.set_property("width", "100%");
        let _ = container_style.set_property("height", &format!("{STRIP_HEIGHT_PX}px"));
        let _ = container_style.set_property("outline", "none");
        // Focusable so arrow keys work without extra host wiring
        let _ = container.set_attribute("tabindex", "0");

        let spacer_style = spacer.style();
        let _ = spacer_style.set_property("position", "relative");
        let _ = spacer_style.set_property("height", "100%");

        let _ = container.append_child(&spacer);
        let _ = parent.append_child(&container);

        {
            let mut s = state.borrow_mut();
            let width = container.client_width();
            if width > 0 {
                s.viewport.resize(width as f32);
            }
            s.scroll_container = Some(container.clone());
            s.spacer = Some(spacer);
        }

        // Scroll event: sync viewport, repaint the materialized window, and
        // restart the settle timer that drives focus tracking.
        let state_for_scroll = Rc::clone(state);
        let container_for_scroll = container.clone();
        let scroll_closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            {
                let mut s = state_for_scroll.borrow_mut();
                s.last_scroll_ms = now_ms();
                let scroll_x = scroll_left_f64(&container_for_scroll);
                #[allow(clippy::cast_possible_truncation)]
                let scroll_x = scroll_x as f32;
                let strip = s.strip;
                s.viewport.set_scroll(scroll_x, &strip);
            }
            Self::render_cells(&state_for_scroll);
            Self::schedule_scroll_settle_timeout(&state_for_scroll);
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ = container
            .add_event_listener_with_callback("scroll", scroll_closure.as_ref().unchecked_ref());

        // Click: hit test against the strip and commit the day.
        let state_for_click = Rc::clone(state);
        let container_for_click = container.clone();
        let click_closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let rect = container_for_click.get_bounding_client_rect();
            #[allow(clippy::cast_possible_truncation)]
            let offset_x = (f64::from(event.client_x()) - rect.left()) as f32;
            Self::internal_click(&state_for_click, offset_x);
        }) as Box<dyn FnMut(MouseEvent)>);
        let _ = container
            .add_event_listener_with_callback("click", click_closure.as_ref().unchecked_ref());

        // Keyboard: single-day steps and focus commits.
        let state_for_key = Rc::clone(state);
        let key_closure = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if Self::internal_key_down(&state_for_key, &event.key()) {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(KeyboardEvent)>);
        let _ = container
            .add_event_listener_with_callback("keydown", key_closure.as_ref().unchecked_ref());

        (Some(scroll_closure), Some(click_closure), Some(key_closure))
    }

    /// Keep the viewport width in sync with the container element.
    #[allow(clippy::type_complexity)]
    fn setup_resize_observer(
        state: &Rc<RefCell<SharedState>>,
    ) -> (
        Option<Closure<dyn FnMut(js_sys::Array)>>,
        Option<ResizeObserver>,
    ) {
        let container = state.borrow().scroll_container.clone();
        let Some(container) = container else {
            return (None, None);
        };
        let state_for_resize = Rc::clone(state);
        let container_for_resize = container.clone();
        let resize_closure = Closure::wrap(Box::new(move |_entries: js_sys::Array| {
            let width = container_for_resize.client_width();
            if width > 0 {
                state_for_resize.borrow_mut().viewport.resize(width as f32);
                Self::render_cells(&state_for_resize);
            }
        }) as Box<dyn FnMut(js_sys::Array)>);
        let Ok(observer) = ResizeObserver::new(resize_closure.as_ref().unchecked_ref()) else {
            return (Some(resize_closure), None);
        };
        observer.observe(&container);
        (Some(resize_closure), Some(observer))
    }

    /// Size the spacer to the full strip width so native scrolling can reach
    /// every addressable day.
    pub(crate) fn update_scroll_spacer(&self) {
        Self::update_scroll_spacer_state(&self.state);
    }

    pub(crate) fn update_scroll_spacer_state(state: &Rc<RefCell<SharedState>>) {
        // Extract under the borrow, mutate DOM after dropping it.
        let (spacer, total_width) = {
            let s = state.borrow();
            (s.spacer.clone(), s.strip.total_width())
        };
        let Some(spacer) = spacer else {
            return;
        };
        let _ = spacer
            .style()
            .set_property("width", &format!("{total_width}px"));
    }

    /// Repaint the materialized day cells.
    ///
    /// Cell data is extracted while the state borrow is held, then the DOM
    /// is mutated borrow-free: DOM changes can synchronously fire scroll
    /// events whose closure needs `borrow_mut()`.
    pub(crate) fn render_cells(state: &Rc<RefCell<SharedState>>) {
        let (spacer, paints) = {
            let s = state.borrow();
            let Some(spacer) = s.spacer.clone() else {
                return;
            };
            let mut paints: Vec<CellPaint> = Vec::new();
            for item in s.viewport.items(&s.strip) {
                let Some(date) = s.range.date_at(item.index) else {
                    continue;
                };
                let aggregate = s.slots.aggregate_for(date);
                let flags = s.selection.flags(item.index);
                let meta = if aggregate.total_slots == 0 {
                    "-".to_string()
                } else {
                    format!("{:.0}/{:.0}", aggregate.remaining, aggregate.capacity_total)
                };
                let mut badges = String::new();
                if aggregate.has_blackouts {
                    badges.push('B');
                }
                if aggregate.has_restrictions {
                    badges.push('R');
                }
                if aggregate.has_notes {
                    badges.push('N');
                }
                let title = match &aggregate.first_slot_time {
                    Some(time) => format!(
                        "{date}: {} slot(s) from {time}, {:.0} of {:.0} remaining",
                        aggregate.total_slots, aggregate.remaining, aggregate.capacity_total
                    ),
                    None => format!("{date}: no slots"),
                };
                paints.push(CellPaint {
                    x: item.start,
                    width: item.size,
                    weekday: date.format("%a").to_string(),
                    day_of_month: date.format("%d %b").to_string(),
                    meta,
                    badges,
                    background: level_background(aggregate.level),
                    selected: flags.selected,
                    focused: flags.focused,
                    title,
                });
            }
            (spacer, paints)
        }; // borrow dropped here - safe to mutate DOM

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        spacer.set_inner_html("");
        for paint in paints {
            let Ok(cell) = document.create_element("div") else {
                continue;
            };
            let Some(cell) = cell.dyn_ref::<HtmlElement>().cloned() else {
                continue;
            };
            let style = cell.style();
            let _ = style.set_property("position", "absolute");
            let _ = style.set_property("top", "4px");
            let _ = style.set_property("bottom", "4px");
            let _ = style.set_property("left", &format!("{}px", paint.x));
            let _ = style.set_property("width", &format!("{}px", paint.width));
            let _ = style.set_property("box-sizing", "border-box");
            let _ = style.set_property("padding", "6px 4px");
            let _ = style.set_property("cursor", "pointer");
            let _ = style.set_property("user-select", "none");
            let _ = style.set_property("text-align", "center");
            let _ = style.set_property("font-family", "system-ui, -apple-system, sans-serif");
            let _ = style.set_property("font-size", "12px");
            let _ = style.set_property("background", paint.background);
            let _ = style.set_property("border-radius", "6px");
            if paint.selected {
                let _ = style.set_property("border", &format!("2px solid {SELECTED_ACCENT}"));
            } else {
                let _ = style.set_property("border", "1px solid #D0D0D0");
            }
            if paint.focused && !paint.selected {
                let _ = style.set_property("outline", "1px dashed #808080");
                let _ = style.set_property("outline-offset", "-3px");
            }
            let _ = cell.set_attribute("title", &paint.title);

            for (text, weight) in [
                (paint.weekday.as_str(), "400"),
                (paint.day_of_month.as_str(), "600"),
                (paint.meta.as_str(), "400"),
            ] {
                let Ok(line) = document.create_element("div") else {
                    continue;
                };
                line.set_text_content(Some(text));
                if let Some(line) = line.dyn_ref::<HtmlElement>() {
                    let _ = line.style().set_property("font-weight", weight);
                }
                let _ = cell.append_child(&line);
            }
            if !paint.badges.is_empty() {
                if let Ok(badge_line) = document.create_element("div") {
                    badge_line.set_text_content(Some(&paint.badges));
                    if let Some(el) = badge_line.dyn_ref::<HtmlElement>() {
                        let _ = el.style().set_property("font-size", "10px");
                        let _ = el.style().set_property("color", "#7A3030");
                        let _ = el.style().set_property("letter-spacing", "2px");
                    }
                    let _ = cell.append_child(&badge_line);
                }
            }
            let _ = spacer.append_child(&cell);
        }
    }

    /// Route a center request: defer while a user gesture is settling,
    /// otherwise expand the range and schedule the measured apply pass.
    pub(crate) fn request_center(state: &Rc<RefCell<SharedState>>, date: NaiveDate, smooth: bool) {
        {
            let mut s = state.borrow_mut();
            if s.scroll_container.is_none() {
                // Not attached yet: nothing to scroll
                return;
            }
            let gesture_active =
                s.last_scroll_ms > 0.0 && now_ms() - s.last_scroll_ms < f64::from(FOCUS_SETTLE_DELAY_MS);
            if gesture_active {
                // Last write wins once the gesture settles
                s.pending_center = Some((date, smooth));
                return;
            }
            if !Self::ensure_in_range(&mut s, date) {
                warn(&format!(
                    "dayline: centerOnDate target {date} is outside the addressable range"
                ));
                return;
            }
        }
        Self::update_scroll_spacer_state(state);
        Self::render_cells(state);

        // One scheduling turn before reading positions, so the spacer resize
        // above has been laid out.
        let state = Rc::clone(state);
        wasm_bindgen_futures::spawn_local(async move {
            Self::next_animation_frame().await;
            Self::apply_center(&state, date, smooth);
        });
    }

    /// Measured centering pass. Reads the target cell's offset (estimating
    /// `index * day_width` when the cell is not materialized) and writes the
    /// clamped scroll position.
    pub(crate) fn apply_center(state: &Rc<RefCell<SharedState>>, date: NaiveDate, smooth: bool) {
        let (container, target) = {
            let s = state.borrow();
            let Some(container) = s.scroll_container.clone() else {
                return;
            };
            let Some(index) = s.range.index_of(date) else {
                warn(&format!(
                    "dayline: centerOnDate target {date} left the addressable range"
                ));
                return;
            };
            let materialized = s
                .viewport
                .visible_days(&s.strip)
                .is_some_and(|(start, end)| index >= start && index <= end);
            let target = if materialized {
                s.viewport.centered_scroll_for(&s.strip, index)
            } else {
                // Estimate from uniform cell width, then clamp the same way
                let estimate = s.strip.x_for_index(index);
                let half_gap = (s.viewport.width - s.strip.day_width()) / 2.0;
                let raw = estimate - half_gap;
                raw.is_finite()
                    .then(|| raw.clamp(0.0, s.viewport.max_scroll(&s.strip)))
            };
            (container, target)
        }; // borrow dropped here - scroll_to fires a synchronous scroll event

        let Some(target) = target else {
            return;
        };
        let options = ScrollToOptions::new();
        options.set_left(f64::from(target));
        options.set_behavior(if smooth {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        });
        container.scroll_to_with_scroll_to_options(&options);
    }

    async fn next_animation_frame() {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let _ = window.request_animation_frame(&resolve);
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }
}

// ============================================================================
// Non-WASM32 Implementation (headless, for native tests)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
impl DayTimeline {
    /// Create a headless strip with an explicit epoch (deterministic tests).
    ///
    /// # Errors
    /// Fails on an invalid timezone, epoch, or selected date, or when the
    /// selected date cannot be made addressable.
    pub fn new_headless(
        tenant_tz: &str,
        epoch: &str,
        selected_date: &str,
        viewport_width: f32,
        day_width: f32,
    ) -> crate::error::Result<Self> {
        let tz = DateIndexMapper::resolve_tz(tenant_tz)?;
        let epoch = DateIndexMapper::parse_iso(epoch)?;
        let selected = DateIndexMapper::parse_iso(selected_date)?;

        let mut range = TimelineRange::new(DateIndexMapper::new(epoch, tz));
        if !range.expand_to_include(selected) {
            return Err(crate::error::DaylineError::Range(format!(
                "selected date {selected} is not addressable"
            )));
        }
        let selected_index = range.index_of(selected).ok_or_else(|| {
            crate::error::DaylineError::Range(format!("selected date {selected} is not addressable"))
        })?;

        let total_days = usize::try_from(range.total_days()).unwrap_or(0);
        let strip = StripLayout::new(day_width, total_days);
        let day_width = strip.day_width();
        let mut viewport = Viewport::new();
        viewport.resize(viewport_width);

        Ok(Self {
            range,
            strip,
            viewport,
            selection: SelectionState::new(selected_index),
            slots: SlotIndex::default(),
            day_width,
            scroll_active: false,
            pending_center: None,
        })
    }

    /// Replace the slot list.
    pub fn load_slots(&mut self, slots: &[DaySlot]) {
        self.slots = SlotIndex::build(slots);
    }

    /// Simulate a user scroll to an absolute offset. The gesture stays
    /// "active" until [`settle`](Self::settle) runs.
    pub fn scroll_to(&mut self, x: f32) {
        let strip = self.strip;
        self.viewport.set_scroll(x, &strip);
        self.scroll_active = true;
    }

    /// Simulate the debounce firing after a scroll gesture: focus moves to
    /// the day nearest the viewport center. Returns the newly focused ISO
    /// date when focus actually changed.
    pub fn settle(&mut self) -> Option<String> {
        self.scroll_active = false;
        let focus_change = self
            .viewport
            .nearest_to_center(&self.strip)
            .filter(|&index| self.selection.settle_focus(index))
            .map(|index| self.iso_at(index));
        if let Some((date, smooth)) = self.pending_center.take() {
            let _ = self.center_on_date(&date.format("%Y-%m-%d").to_string(), smooth);
        }
        focus_change
    }

    /// Simulate a click at a container-relative x offset. Returns the
    /// committed ISO date when the selection changed.
    pub fn click_at(&mut self, offset_x: f32) -> Option<String> {
        let index = self.strip.index_at_x(self.viewport.scroll_x + offset_x)?;
        let (selection_changed, _) = self.selection.commit(index);
        selection_changed.then(|| self.iso_at(index))
    }

    /// Simulate a key press. Returns the committed ISO date when the
    /// selection changed.
    pub fn key_down(&mut self, key: &str) -> Option<String> {
        match key {
            "ArrowLeft" | "ArrowRight" => {
                let direction = if key == "ArrowLeft" {
                    StepDirection::Back
                } else {
                    StepDirection::Forward
                };
                let next = self
                    .selection
                    .step(direction, self.strip.total_days())?;
                self.selection.commit(next);
                let iso = self.iso_at(next);
                let _ = self.center_on_date(&iso, false);
                Some(iso)
            }
            "Enter" | " " => {
                let changed = self.selection.commit_focus();
                changed.then(|| self.iso_at(self.selection.selected()))
            }
            _ => None,
        }
    }

    /// Center on a date. Returns false (leaving scroll untouched) for
    /// out-of-range targets; defers while a simulated gesture is active.
    pub fn center_on_date(&mut self, iso: &str, smooth: bool) -> bool {
        let Ok(date) = DateIndexMapper::parse_iso(iso) else {
            return false;
        };
        if self.scroll_active {
            self.pending_center = Some((date, smooth));
            return true;
        }
        if !self.range.contains(date) {
            if !self.range.expand_to_include(date) {
                return false;
            }
            let total_days = usize::try_from(self.range.total_days()).unwrap_or(0);
            self.strip = StripLayout::new(self.day_width, total_days);
        }
        let Some(index) = self.range.index_of(date) else {
            return false;
        };
        let strip = self.strip;
        let Some(target) = self.viewport.centered_scroll_for(&strip, index) else {
            return false;
        };
        self.viewport.set_scroll(target, &strip);
        true
    }

    /// Host-driven focus change; ignores out-of-range dates.
    pub fn set_focused_date(&mut self, iso: &str) {
        let Ok(date) = DateIndexMapper::parse_iso(iso) else {
            return;
        };
        if let Some(index) = self.range.index_of(date) {
            self.selection.settle_focus(index);
        }
    }

    /// Committed selection as `YYYY-MM-DD`.
    pub fn selected_date(&self) -> String {
        self.iso_at(self.selection.selected())
    }

    /// Focused day as `YYYY-MM-DD`.
    pub fn focused_date(&self) -> String {
        self.iso_at(self.selection.focused())
    }

    /// Aggregate summary for one day.
    pub fn aggregate_for(&self, date: NaiveDate) -> crate::aggregate::DayAggregate {
        self.slots.aggregate_for(date)
    }

    /// Current scroll offset.
    pub fn scroll_x(&self) -> f32 {
        self.viewport.scroll_x
    }

    /// Total addressable days.
    pub fn total_days(&self) -> usize {
        self.strip.total_days()
    }

    /// Forward span of the range, in days after the epoch.
    pub fn days_after(&self) -> i64 {
        self.range.days_after()
    }

    /// Inclusive materialized index range at the current scroll position.
    pub fn visible_days(&self) -> Option<(usize, usize)> {
        self.viewport.visible_days(&self.strip)
    }

    /// True when a center request is parked behind an active gesture.
    pub fn has_pending_center(&self) -> bool {
        self.pending_center.is_some()
    }

    fn iso_at(&self, index: usize) -> String {
        self.range
            .date_at(index)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
