//! Application Context
//!
//! Shared state provided via Leptos Context API: the auth bridge, the board
//! engine, and the signals mirroring them into the view. The engine handles
//! are `Rc`s kept in local stored values so the context itself stays `Copy`.

use std::rc::Rc;

use leptos::prelude::*;

use crate::auth::AuthBridge;
use crate::board::BoardState;
use crate::models::{LeadFilters, SessionUser};
use crate::notify::Notice;
use crate::pipeline::PipelineBoard;

/// App-wide handles and signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Session authority; sole writer of the persisted session
    auth: StoredValue<Rc<AuthBridge>, LocalStorage>,
    /// Board engine owning the pipeline projection
    board: StoredValue<Rc<PipelineBoard>, LocalStorage>,

    /// Authenticated user, None while unauthenticated
    pub user: ReadSignal<Option<SessionUser>>,
    set_user: WriteSignal<Option<SessionUser>>,
    /// True until startup reaches a terminal auth state
    pub auth_loading: ReadSignal<bool>,
    set_auth_loading: WriteSignal<bool>,

    /// Trigger to re-fetch the board from the API - read
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
    /// View copy of the engine projection, republished after every mutation
    pub board_state: ReadSignal<BoardState>,
    set_board_state: WriteSignal<BoardState>,
    /// Board load failure message, shown with a manual retry
    pub load_error: ReadSignal<Option<String>>,
    set_load_error: WriteSignal<Option<String>>,

    /// Current pipeline (single-pipeline app for now)
    pub pipeline_id: ReadSignal<Option<u32>>,
    /// Active lead list filters
    pub filters: ReadSignal<LeadFilters>,
    set_filters: WriteSignal<LeadFilters>,
    /// Lead opened in the editor column
    pub selected_lead: ReadSignal<Option<u32>>,
    set_selected_lead: WriteSignal<Option<u32>>,

    /// Transient notices with dismiss ids
    pub notices: ReadSignal<Vec<(u32, Notice)>>,
    set_notices: WriteSignal<Vec<(u32, Notice)>>,
}

impl AppContext {
    /// The notice signals come in from App, which wires the same pair into
    /// the engines' notice sink before this context exists.
    pub fn new(
        auth: Rc<AuthBridge>,
        board: Rc<PipelineBoard>,
        notices: (ReadSignal<Vec<(u32, Notice)>>, WriteSignal<Vec<(u32, Notice)>>),
    ) -> Self {
        let (user, set_user) = signal(None::<SessionUser>);
        let (auth_loading, set_auth_loading) = signal(true);
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        let (board_state, set_board_state) = signal(BoardState::default());
        let (load_error, set_load_error) = signal(None::<String>);
        let (pipeline_id, _set_pipeline_id) = signal(Some(1u32));
        let (filters, set_filters) = signal(LeadFilters::default());
        let (selected_lead, set_selected_lead) = signal(None::<u32>);
        let (notices, set_notices) = notices;
        Self {
            auth: StoredValue::new_local(auth),
            board: StoredValue::new_local(board),
            user,
            set_user,
            auth_loading,
            set_auth_loading,
            reload_trigger,
            set_reload_trigger,
            board_state,
            set_board_state,
            load_error,
            set_load_error,
            pipeline_id,
            filters,
            set_filters,
            selected_lead,
            set_selected_lead,
            notices,
            set_notices,
        }
    }

    pub fn auth(&self) -> Rc<AuthBridge> {
        self.auth.get_value()
    }

    pub fn board(&self) -> Rc<PipelineBoard> {
        self.board.get_value()
    }

    pub fn set_user(&self, user: Option<SessionUser>) {
        self.set_user.set(user);
    }

    pub fn finish_auth_loading(&self) {
        self.set_auth_loading.set(false);
    }

    /// Trigger a re-fetch of stages and leads
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Republish the engine projection so views re-render
    pub fn publish_board(&self) {
        self.set_board_state.set(self.board.get_value().snapshot());
    }

    pub fn set_load_error(&self, error: Option<String>) {
        self.set_load_error.set(error);
    }

    pub fn set_filters(&self, filters: LeadFilters) {
        self.set_filters.set(filters);
    }

    pub fn select_lead(&self, lead_id: Option<u32>) {
        self.set_selected_lead.set(lead_id);
    }

    pub fn dismiss_notice(&self, id: u32) {
        self.set_notices.update(|list| list.retain(|(nid, _)| *nid != id));
    }
}

/// Get the app context from any component below App
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
