//! Toast Component
//!
//! Renders the transient notice queue. Notices auto-dismiss after a few
//! seconds or on click.

use leptos::prelude::*;
use leptos::task::spawn_local;

use gloo_timers::future::TimeoutFuture;

use crate::context::use_app_context;
use crate::notify::NoticeLevel;

const AUTO_DISMISS_MS: u32 = 4_000;

#[component]
pub fn ToastList() -> impl IntoView {
    let ctx = use_app_context();

    // Auto-dismiss whatever arrives
    let (seen, set_seen) = signal(0u32);
    Effect::new(move |_| {
        for (id, _) in ctx.notices.get() {
            if id < seen.get_untracked() {
                continue;
            }
            set_seen.set(id + 1);
            spawn_local(async move {
                TimeoutFuture::new(AUTO_DISMISS_MS).await;
                ctx.dismiss_notice(id);
            });
        }
    });

    view! {
        <div class="toast-list">
            <For
                each=move || ctx.notices.get()
                key=|(id, _)| *id
                children=move |(id, notice)| {
                    let class = match notice.level {
                        NoticeLevel::Error => "toast toast-error",
                        NoticeLevel::Info => "toast toast-info",
                    };
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss_notice(id)>
                            {notice.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
