//! Lead Editor Component
//!
//! Right-hand editor column for the selected lead. Edits only land locally
//! after the save call succeeds; nothing here is optimistic.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::models::{Lead, LeadPatch};

#[component]
pub fn LeadEditor() -> impl IntoView {
    let ctx = use_app_context();

    // Snapshot the lead once when the selection changes. The projection is
    // read untracked so a board republish (e.g. a drag settling) while the
    // editor is open cannot rebuild the form and drop unsaved edits.
    let selected = move || {
        let id = ctx.selected_lead.get()?;
        ctx.board_state.with_untracked(|b| b.lead(id).cloned())
    };

    view! {
        <div class="lead-editor-column">
            {move || selected().map(|lead| view! {
                <LeadEditorForm lead=lead />
            })}
        </div>
    }
}

#[component]
fn LeadEditorForm(lead: Lead) -> impl IntoView {
    let ctx = use_app_context();
    let lead_id = lead.id;

    let (name, set_name) = signal(lead.name.clone());
    let (company, set_company) = signal(lead.company.clone().unwrap_or_default());
    let (email, set_email) = signal(lead.email.clone().unwrap_or_default());
    let (phone, set_phone) = signal(lead.phone.clone().unwrap_or_default());
    let (value, set_value) = signal(format!("{}", lead.value));
    let (note, set_note) = signal(lead.note.clone().unwrap_or_default());
    let (busy, set_busy) = signal(false);

    let input_value = |setter: WriteSignal<String>| {
        move |ev: web_sys::Event| {
            let target = ev.target().unwrap();
            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
            setter.set(input.value());
        }
    };

    // Only changed fields go on the wire
    let original = StoredValue::new(lead);
    let build_patch = move || {
        let original = original.get_value();
        let mut patch = LeadPatch::default();
        let name = name.get();
        if name != original.name && !name.is_empty() {
            patch.name = Some(name);
        }
        let company = company.get();
        if company != original.company.clone().unwrap_or_default() {
            patch.company = Some(company);
        }
        let email = email.get();
        if email != original.email.clone().unwrap_or_default() {
            patch.email = Some(email);
        }
        let phone = phone.get();
        if phone != original.phone.clone().unwrap_or_default() {
            patch.phone = Some(phone);
        }
        if let Ok(parsed) = value.get().parse::<f64>() {
            if parsed != original.value {
                patch.value = Some(parsed);
            }
        }
        let note = note.get();
        if note != original.note.clone().unwrap_or_default() {
            patch.note = Some(note);
        }
        patch
    };

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let patch = build_patch();
        if patch.is_empty() {
            ctx.select_lead(None);
            return;
        }
        set_busy.set(true);
        spawn_local(async move {
            let board = ctx.board();
            if board.update_lead(lead_id, &patch).await.is_ok() {
                ctx.publish_board();
                ctx.select_lead(None);
            }
            // On failure the engine already emitted a notice; keep the
            // editor open so the user can retry
            set_busy.set(false);
        });
    };

    view! {
        <form class="lead-editor" on:submit=on_save>
            <div class="lead-editor-header">
                <h2>"Edit lead"</h2>
                <button type="button" on:click=move |_| ctx.select_lead(None)>"×"</button>
            </div>

            <label>"Name"</label>
            <input prop:value=move || name.get() on:input=input_value(set_name) />
            <label>"Company"</label>
            <input prop:value=move || company.get() on:input=input_value(set_company) />
            <label>"Email"</label>
            <input type="email" prop:value=move || email.get() on:input=input_value(set_email) />
            <label>"Phone"</label>
            <input prop:value=move || phone.get() on:input=input_value(set_phone) />
            <label>"Value"</label>
            <input type="number" step="0.01" prop:value=move || value.get() on:input=input_value(set_value) />
            <label>"Note"</label>
            <input prop:value=move || note.get() on:input=input_value(set_note) />

            <button type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Saving..." } else { "Save" }}
            </button>
        </form>
    }
}
