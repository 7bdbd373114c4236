//! Stage Column Component
//!
//! One kanban column: header with name and live lead count, the cards in the
//! column, and the drop-target wiring.

use leptos::prelude::*;

use leptos_dragdrop::*;

use crate::components::LeadCard;
use crate::context::use_app_context;

#[component]
pub fn StageColumn(stage_id: u32, dnd: DndSignals) -> impl IntoView {
    let ctx = use_app_context();

    let name = move || {
        ctx.board_state
            .with(|b| b.stage(stage_id).map(|s| s.name.clone()).unwrap_or_default())
    };
    let count = move || ctx.board_state.with(|b| b.stage(stage_id).map(|s| s.count).unwrap_or(0));
    let leads = move || ctx.board_state.with(|b| b.leads_in_stage(stage_id));

    let on_mouseenter = make_on_column_mouseenter(dnd, stage_id);
    let on_mouseleave = make_on_column_mouseleave(dnd);

    let is_drop_target = move || dnd.hover_column_read.get() == Some(stage_id);
    let column_class = move || {
        let mut c = String::from("stage-column");
        if is_drop_target() {
            c.push_str(" drop-target");
        }
        c
    };

    view! {
        <div
            class=column_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <div class="stage-header">
                <span class="stage-name">{name}</span>
                <span class="stage-count">{count}</span>
            </div>

            <div class="stage-cards">
                <For
                    each=leads
                    key=|lead| {
                        // All rendered fields, so edits re-render the card
                        (
                            lead.id,
                            lead.stage_id,
                            lead.name.clone(),
                            lead.company.clone(),
                            lead.source.clone(),
                            lead.value.to_bits(),
                        )
                    }
                    children=move |lead| {
                        view! { <LeadCard lead=lead dnd=dnd /> }
                    }
                />
            </div>

            {move || if leads().is_empty() {
                view! { <div class="stage-empty">"No leads"</div> }.into_any()
            } else {
                view! { <div></div> }.into_any()
            }}
        </div>
    }
}
