//! JSON handler for network discovery.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use plughub_app::ports::DeviceGateway;
use plughub_domain::error::ValidationError;
use plughub_domain::report::{DeviceReport, DiscoveryPolicy};

use super::OptionalJson;
use crate::error::ApiError;
use crate::state::AppState;

/// Optional request body; missing fields fall back to the configuration.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoverRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Query string of the discovery endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DiscoverParams {
    /// Fail the whole request on the first device that cannot be probed.
    #[serde(default)]
    pub strict: bool,
}

impl DiscoverParams {
    fn policy(&self) -> DiscoveryPolicy {
        if self.strict {
            DiscoveryPolicy::Strict
        } else {
            DiscoveryPolicy::Tolerant
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceList {
    pub devices: Vec<DeviceReport>,
}

/// Possible responses from the discovery endpoint.
pub enum DiscoverResponse {
    Ok(Json<DeviceList>),
}

impl IntoResponse for DiscoverResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET|POST /devices`
pub async fn discover<G>(
    State(state): State<AppState<G>>,
    params: Result<Query<DiscoverParams>, QueryRejection>,
    OptionalJson(req): OptionalJson<DiscoverRequest>,
) -> Result<DiscoverResponse, ApiError>
where
    G: DeviceGateway + 'static,
{
    let Query(params) = params.map_err(|err| ValidationError::MalformedQuery(err.body_text()))?;
    let credential = state.resolver.credential(req.email, req.password)?;
    let devices = state
        .discovery_service
        .discover(&credential, params.policy())
        .await?;
    Ok(DiscoverResponse::Ok(Json(DeviceList { devices })))
}
