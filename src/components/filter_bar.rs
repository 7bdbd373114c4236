//! Filter Bar Component
//!
//! Date range, assigned sales and free-text search over the lead list.
//! Applying pushes the filters into context and triggers a reload.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;
use crate::models::LeadFilters;

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_app_context();

    let (date_from, set_date_from) = signal(String::new());
    let (date_to, set_date_to) = signal(String::new());
    let (assigned, set_assigned) = signal(String::new());
    let (search, set_search) = signal(String::new());

    let input_value = |setter: WriteSignal<String>| {
        move |ev: web_sys::Event| {
            let target = ev.target().unwrap();
            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
            setter.set(input.value());
        }
    };

    let apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.set_filters(LeadFilters {
            date_from: non_empty(date_from.get()),
            date_to: non_empty(date_to.get()),
            assigned_sales: non_empty(assigned.get()),
            search: non_empty(search.get()),
        });
    };

    let clear = move |_: web_sys::MouseEvent| {
        set_date_from.set(String::new());
        set_date_to.set(String::new());
        set_assigned.set(String::new());
        set_search.set(String::new());
        ctx.set_filters(LeadFilters::default());
    };

    view! {
        <form class="filter-bar" on:submit=apply>
            <input
                type="date"
                prop:value=move || date_from.get()
                on:input=input_value(set_date_from)
            />
            <input
                type="date"
                prop:value=move || date_to.get()
                on:input=input_value(set_date_to)
            />
            <input
                type="text"
                placeholder="Assigned sales"
                prop:value=move || assigned.get()
                on:input=input_value(set_assigned)
            />
            <input
                type="text"
                placeholder="Search leads..."
                prop:value=move || search.get()
                on:input=input_value(set_search)
            />
            <button type="submit">"Apply"</button>
            <button type="button" on:click=clear>"Clear"</button>
        </form>
    }
}
