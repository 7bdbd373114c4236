//! Login Form Component
//!
//! Email/password login through the two-step bridge exchange. Failures are
//! surfaced inline; the caller may simply retry with fresh credentials.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::context::use_app_context;

#[component]
pub fn LoginForm() -> impl IntoView {
    let ctx = use_app_context();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email = email.get();
        let password = password.get();
        if email.is_empty() || password.is_empty() {
            set_error.set(Some("Email and password are required.".to_string()));
            return;
        }

        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let auth = ctx.auth();
            match auth.login(&email, &password).await {
                Ok(user) => {
                    ctx.set_user(Some(user));
                    ctx.reload();
                }
                Err(e) => {
                    set_error.set(Some(e.to_string()));
                }
            }
            set_busy.set(false);
        });
    };

    let input_value = |setter: WriteSignal<String>| {
        move |ev: web_sys::Event| {
            let target = ev.target().unwrap();
            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
            setter.set(input.value());
        }
    };

    view! {
        <div class="login-page">
            <form class="login-form" on:submit=on_submit>
                <h1>"LeadFlow"</h1>

                {move || error.get().map(|msg| view! {
                    <div class="login-error">{msg}</div>
                })}

                <input
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=input_value(set_email)
                />
                <input
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=input_value(set_password)
                />

                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </form>
        </div>
    }
}
