//! REST Adapter
//!
//! gloo-net implementation of the API ports against the Laravel-style CRM
//! backend. Every authenticated call carries `Authorization: Bearer <token>`
//! from the injected session; every call races a fixed timeout.

use std::rc::Rc;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{IdentityProvider, LeadRepository, StageCatalog};
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{Lead, LeadFilters, LeadPatch, Session, SessionUser, Stage};
use crate::session::SessionProvider;

/// Fixed per-request timeout; a timeout rolls back like any other failure.
const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// REST client over the CRM API.
pub struct HttpApi {
    config: ApiConfig,
    session: Rc<dyn SessionProvider>,
}

impl HttpApi {
    pub fn new(config: ApiConfig, session: Rc<dyn SessionProvider>) -> Self {
        Self { config, session }
    }

    fn bearer(&self) -> Option<String> {
        self.session.api_token().map(|t| format!("Bearer {}", t))
    }
}

/// Race a request future against the fixed timeout.
async fn with_timeout<T>(
    fut: impl std::future::Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    futures::pin_mut!(fut);
    match select(fut, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(ApiError::Timeout),
    }
}

/// Reject non-2xx responses, keeping whatever message the body carries.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(200)
        .collect();
    Err(ApiError::Rejected { status, message })
}

async fn read_json<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn send(request: Request) -> Result<Response, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    check_status(response).await
}

fn url_with_query(base: String, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return base;
    }
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, js_sys::encode_uri_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}

#[derive(Deserialize)]
struct VerifyResponse {
    user: SessionUser,
}

#[derive(Deserialize)]
struct BridgeTokenResponse {
    bridge_token: String,
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[async_trait(?Send)]
impl IdentityProvider for HttpApi {
    async fn exchange_bridge_token(&self, bridge_token: &str) -> Result<Session, ApiError> {
        // The bridge token is this call's bearer; it never also rides as a query param
        let url = self.config.endpoint("auth/bridge/exchange");
        let bearer = format!("Bearer {}", bridge_token);
        with_timeout(async move {
            let request = Request::post(&url)
                .header("Authorization", &bearer)
                .header("Accept", "application/json")
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json::<Session>(send(request).await?).await
        })
        .await
    }

    async fn verify(&self, api_token: &str) -> Result<SessionUser, ApiError> {
        let url = self.config.endpoint("auth/verify");
        let bearer = format!("Bearer {}", api_token);
        with_timeout(async move {
            let request = Request::get(&url)
                .header("Authorization", &bearer)
                .header("Accept", "application/json")
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = read_json::<VerifyResponse>(send(request).await?).await?;
            Ok(response.user)
        })
        .await
    }

    async fn bridge_token_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let url = self.config.endpoint("auth/bridge");
        let body = CredentialsBody { email, password };
        with_timeout(async move {
            let request = Request::post(&url)
                .header("Accept", "application/json")
                .json(&body)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            let response = read_json::<BridgeTokenResponse>(send(request).await?).await?;
            Ok(response.bridge_token)
        })
        .await
    }

    async fn invalidate(&self, api_token: &str) -> Result<(), ApiError> {
        let url = self.config.endpoint("auth/logout");
        let bearer = format!("Bearer {}", api_token);
        with_timeout(async move {
            let request = Request::post(&url)
                .header("Authorization", &bearer)
                .header("Accept", "application/json")
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            send(request).await?;
            Ok(())
        })
        .await
    }
}

#[async_trait(?Send)]
impl LeadRepository for HttpApi {
    async fn list_leads(
        &self,
        pipeline_id: u32,
        filters: &LeadFilters,
    ) -> Result<Vec<Lead>, ApiError> {
        let base = self.config.endpoint(&format!("pipelines/{}/leads", pipeline_id));
        let url = url_with_query(base, &filters.to_query_pairs());
        let bearer = self.bearer().unwrap_or_default();
        with_timeout(async move {
            let request = Request::get(&url)
                .header("Authorization", &bearer)
                .header("Accept", "application/json")
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json::<Vec<Lead>>(send(request).await?).await
        })
        .await
    }

    async fn update_lead_stage(&self, lead_id: u32, stage_id: u32) -> Result<(), ApiError> {
        let url = self.config.endpoint(&format!("leads/{}/stage", lead_id));
        let bearer = self.bearer().unwrap_or_default();
        with_timeout(async move {
            let request = Request::put(&url)
                .header("Authorization", &bearer)
                .header("Accept", "application/json")
                .json(&json!({ "stage_id": stage_id }))
                .map_err(|e| ApiError::Network(e.to_string()))?;
            send(request).await?;
            Ok(())
        })
        .await
    }

    async fn update_lead(&self, lead_id: u32, patch: &LeadPatch) -> Result<(), ApiError> {
        let url = self.config.endpoint(&format!("leads/{}", lead_id));
        let bearer = self.bearer().unwrap_or_default();
        with_timeout(async move {
            let request = Request::put(&url)
                .header("Authorization", &bearer)
                .header("Accept", "application/json")
                .json(patch)
                .map_err(|e| ApiError::Network(e.to_string()))?;
            send(request).await?;
            Ok(())
        })
        .await
    }
}

#[async_trait(?Send)]
impl StageCatalog for HttpApi {
    async fn list_stages(&self, pipeline_id: u32) -> Result<Vec<Stage>, ApiError> {
        let url = self.config.endpoint(&format!("pipelines/{}/stages", pipeline_id));
        let bearer = self.bearer().unwrap_or_default();
        with_timeout(async move {
            let request = Request::get(&url)
                .header("Authorization", &bearer)
                .header("Accept", "application/json")
                .build()
                .map_err(|e| ApiError::Network(e.to_string()))?;
            read_json::<Vec<Stage>>(send(request).await?).await
        })
        .await
    }
}
