//! Lead Card Component
//!
//! One draggable card on the board. Click opens the editor; a drag past the
//! movement threshold starts a stage move.

use leptos::prelude::*;

use leptos_dragdrop::*;

use crate::context::use_app_context;
use crate::models::Lead;

#[component]
pub fn LeadCard(lead: Lead, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();
    let id = lead.id;

    let on_mousedown = make_on_mousedown(dnd, id);

    let is_dragging = move || dnd.dragging_id_read.get() == Some(id);
    let card_class = move || {
        let mut c = String::from("lead-card");
        if is_dragging() {
            c.push_str(" dragging");
        }
        c
    };

    let on_click = move |_: web_sys::MouseEvent| {
        // A drag that just ended must not register as a click
        if dnd.drag_just_ended_read.get_untracked() {
            return;
        }
        ctx.select_lead(Some(id));
    };

    view! {
        <div
            class=card_class
            on:mousedown=on_mousedown
            on:click=on_click
        >
            <div class="lead-name">{lead.name.clone()}</div>
            {lead.company.clone().map(|company| view! {
                <div class="lead-company">{company}</div>
            })}
            <div class="lead-value">{format!("${:.2}", lead.value)}</div>
            {lead.source.clone().map(|source| view! {
                <span class="lead-source">{source}</span>
            })}
        </div>
    }
}
