//! CRM API Ports
//!
//! Async traits for the external collaborators (identity provider, lead
//! repository, stage catalog) plus the REST adapter that implements them.
//! Engines depend on the traits so they can be exercised against mocks.

mod http;

pub use http::HttpApi;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{Lead, LeadFilters, LeadPatch, Session, SessionUser, Stage};

/// Token exchange and session verification against the identity endpoint.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Exchange a single-use bridge token for a durable API session.
    /// The bridge token rides as the bearer of this one call.
    async fn exchange_bridge_token(&self, bridge_token: &str) -> Result<Session, ApiError>;

    /// Check a stored API token and return the fresh user behind it.
    async fn verify(&self, api_token: &str) -> Result<SessionUser, ApiError>;

    /// First login step: trade credentials for a fresh bridge token.
    async fn bridge_token_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError>;

    /// Best-effort server-side token invalidation on logout.
    async fn invalidate(&self, api_token: &str) -> Result<(), ApiError>;
}

/// Lead reads and writes for one pipeline.
#[async_trait(?Send)]
pub trait LeadRepository {
    async fn list_leads(
        &self,
        pipeline_id: u32,
        filters: &LeadFilters,
    ) -> Result<Vec<Lead>, ApiError>;

    async fn update_lead_stage(&self, lead_id: u32, stage_id: u32) -> Result<(), ApiError>;

    async fn update_lead(&self, lead_id: u32, patch: &LeadPatch) -> Result<(), ApiError>;
}

/// Ordered stage listing for one pipeline.
#[async_trait(?Send)]
pub trait StageCatalog {
    async fn list_stages(&self, pipeline_id: u32) -> Result<Vec<Stage>, ApiError>;
}
