//! LeadFlow Frontend Entry Point

mod api;
mod app;
mod auth;
mod board;
mod components;
mod config;
mod context;
mod error;
mod log;
mod models;
mod notify;
mod pipeline;
mod query;
mod session;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
