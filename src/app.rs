//! LeadFlow Frontend App
//!
//! Wires the session store, REST adapter, auth bridge and board engine
//! together, runs the startup auth flow, and gates the board behind it.

use std::cell::Cell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_dragdrop::{bind_global_mouseup, create_dnd_signals};

use crate::api::HttpApi;
use crate::auth::{AuthBridge, StartupSession};
use crate::components::{BoardView, LoginForm, ToastList};
use crate::config::ApiConfig;
use crate::context::AppContext;
use crate::notify::{Notice, NoticeSink};
use crate::pipeline::PipelineBoard;
use crate::query;
use crate::session::{BrowserSession, SessionProvider};

#[component]
pub fn App() -> impl IntoView {
    // Wiring: one session store, one REST adapter behind all three ports
    let session: Rc<dyn SessionProvider> = Rc::new(BrowserSession::new());
    let api = Rc::new(HttpApi::new(ApiConfig::from_window(), session.clone()));
    let auth = Rc::new(AuthBridge::new(api.clone(), session));

    // Notice queue, shared between the engines' sink and the toast view
    let (notices, set_notices) = signal(Vec::<(u32, Notice)>::new());
    let next_notice_id = Cell::new(0u32);
    let sink: NoticeSink = Rc::new(move |notice| {
        let id = next_notice_id.get();
        next_notice_id.set(id + 1);
        set_notices.update(|list| list.push((id, notice)));
    });

    let board = Rc::new(PipelineBoard::new(api.clone(), api, sink));

    let ctx = AppContext::new(auth, board, (notices, set_notices));
    provide_context(ctx);

    // The document-level DnD listeners are registered once and never removed,
    // so they must only capture signals owned here at the root. The auth gate
    // below disposes and remounts the board view on every user change.
    let dnd = create_dnd_signals();
    provide_context(dnd);
    bind_global_mouseup(dnd, move |card_id, column_id| {
        spawn_local(async move {
            let board = ctx.board();
            let _ = board.move_lead(card_id, column_id).await;
            // Republish both on success and after a rollback
            ctx.publish_board();
        });
    });

    // Startup auth flow: bridge token first, stored session second.
    // A consumed bridge token is scrubbed from the URL either way.
    Effect::new(move |_| {
        spawn_local(async move {
            let token = query::bridge_token_from_location();
            let outcome = ctx.auth().startup(token.as_deref()).await;
            if outcome.scrub_url {
                query::scrub_bridge_token_from_location();
            }
            match outcome.session {
                StartupSession::Fresh(user) => {
                    ctx.set_user(Some(user));
                    ctx.finish_auth_loading();
                    ctx.reload();
                }
                StartupSession::Stale(user) => {
                    // Optimistically in, then verify in the background
                    ctx.set_user(Some(user));
                    ctx.finish_auth_loading();
                    ctx.reload();
                    match ctx.auth().verify_stored().await {
                        Ok(fresh) => ctx.set_user(Some(fresh)),
                        Err(_) => ctx.set_user(None),
                    }
                }
                StartupSession::None => {
                    ctx.set_user(None);
                    ctx.finish_auth_loading();
                }
            }
        });
    });

    let on_logout = move |_: web_sys::MouseEvent| {
        spawn_local(async move {
            ctx.auth().logout().await;
            ctx.set_user(None);
            ctx.select_lead(None);
        });
    };

    view! {
        <div class="app-layout">
            {move || {
                if ctx.auth_loading.get() {
                    view! { <div class="splash">"Loading..."</div> }.into_any()
                } else if let Some(user) = ctx.user.get() {
                    view! {
                        <main class="main-content">
                            <header class="top-bar">
                                <h1>"LeadFlow"</h1>
                                <span class="current-user">{user.name}</span>
                                <button on:click=on_logout>"Logout"</button>
                            </header>
                            <BoardView />
                        </main>
                    }.into_any()
                } else {
                    view! { <LoginForm /> }.into_any()
                }
            }}

            <ToastList />
        </div>
    }
}
