//! Leptos DragDrop Utilities
//!
//! Card-to-column drag-and-drop for Leptos using mouse events.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    /// Card currently being dragged
    pub dragging_id_read: ReadSignal<Option<u32>>,
    pub dragging_id_write: WriteSignal<Option<u32>>,
    /// Column the pointer is currently over
    pub hover_column_read: ReadSignal<Option<u32>>,
    pub hover_column_write: WriteSignal<Option<u32>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending card id (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<u32>>,
    pub pending_id_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// True once the pointer has moved past the click/drag threshold.
fn exceeds_threshold(start_x: i32, start_y: i32, x: i32, y: i32) -> bool {
    let dx = (x - start_x).abs();
    let dy = (y - start_y).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// A drop happens only when an actual drag ends over a column.
fn resolve_drop(dragging_id: Option<u32>, hover_column: Option<u32>) -> Option<(u32, u32)> {
    Some((dragging_id?, hover_column?))
}

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_id_read, dragging_id_write) = signal(None::<u32>);
    let (hover_column_read, hover_column_write) = signal(None::<u32>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        hover_column_read,
        hover_column_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_id_write.set(None);
    dnd.hover_column_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for draggable cards
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, card_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            dnd.pending_id_write.set(Some(card_id));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
///
/// The listener is installed on the document and never removed. Bind it from
/// a scope that lives as long as the app; the captured signals must never be
/// disposed while the document can still emit events.
pub fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if pending.is_some() && dnd.dragging_id_read.get_untracked().is_none() {
            let start_x = dnd.start_x_read.get_untracked();
            let start_y = dnd.start_y_read.get_untracked();
            if exceeds_threshold(start_x, start_y, ev.client_x(), ev.client_y()) {
                dnd.dragging_id_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for column drop targets
pub fn make_on_column_mouseenter(dnd: DndSignals, column_id: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.hover_column_write.set(Some(column_id));
        }
    }
}

/// Create mouseleave handler for column drop targets
pub fn make_on_column_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.hover_column_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection
///
/// A drop resolves to exactly one `on_drop(card_id, column_id)` call, and only
/// when an actual drag (past the threshold) ended over a column.
///
/// Like [`bind_global_mousemove`], the listener is permanent: bind once from
/// a scope that lives as long as the app.
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, u32) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let hover_column = dnd.hover_column_read.get_untracked();

        // Clear pending state first
        dnd.pending_id_write.set(None);

        if let Some((dragged, column)) = resolve_drop(dragging_id, hover_column) {
            end_drag(&dnd);
            on_drop(dragged, column);
        } else {
            // Not dragging, or released outside any column - just end pending state
            end_drag(&dnd);
            // Click event will fire naturally on the element
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        // Exactly at the threshold is still a click
        assert!(!exceeds_threshold(100, 100, 105, 100));
        assert!(!exceeds_threshold(100, 100, 100, 95));
        // One past it on either axis starts the drag
        assert!(exceeds_threshold(100, 100, 106, 100));
        assert!(exceeds_threshold(100, 100, 100, 94));
    }

    #[test]
    fn test_drop_requires_drag_and_hover() {
        assert_eq!(resolve_drop(Some(7), Some(2)), Some((7, 2)));
        // Released without a drag, or outside any column: no drop
        assert_eq!(resolve_drop(None, Some(2)), None);
        assert_eq!(resolve_drop(Some(7), None), None);
        assert_eq!(resolve_drop(None, None), None);
    }
}
