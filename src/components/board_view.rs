//! Board View Component
//!
//! The pipeline kanban: stage columns in position order, lead cards with
//! drag-and-drop stage moves. A drop resolves to exactly one engine
//! `move_lead` call (wired globally in App); the engine handles no-ops,
//! the in-flight guard, optimistic apply and rollback.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::*;

use crate::components::{FilterBar, LeadEditor, StageColumn};
use crate::context::use_app_context;

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_app_context();

    // The DnD signals and global listeners are bound once in App; this view
    // is remounted by the auth gate and only wires per-column handlers
    let dnd = expect_context::<DndSignals>();

    // Fetch stages and leads whenever the trigger or the filters change
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let pipeline_id = ctx.pipeline_id.get();
        let filters = ctx.filters.get();
        spawn_local(async move {
            let board = ctx.board();
            match board.load(pipeline_id, &filters).await {
                Ok(()) => {
                    ctx.set_load_error(None);
                    ctx.publish_board();
                }
                Err(e) => ctx.set_load_error(Some(e.to_string())),
            }
        });
    });

    let stage_ids = move || {
        ctx.board_state
            .with(|b| b.stages.iter().map(|s| s.id).collect::<Vec<_>>())
    };

    view! {
        <div class="board">
            <FilterBar />

            {move || ctx.load_error.get().map(|msg| view! {
                <div class="board-error">
                    <p>{msg}</p>
                    <button on:click=move |_| ctx.reload()>"Retry"</button>
                </div>
            })}

            <div class="board-columns">
                <For
                    each=stage_ids
                    key=|id| *id
                    children=move |stage_id| {
                        view! { <StageColumn stage_id=stage_id dnd=dnd /> }
                    }
                />
            </div>

            <LeadEditor />
        </div>
    }
}
