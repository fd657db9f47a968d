//! JSON handler switching a single plug.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use plughub_app::ports::DeviceGateway;
use plughub_domain::power::PowerState;

use super::OptionalJson;
use crate::error::ApiError;
use crate::state::AppState;

/// Optional request body; every field falls back to the configuration.
#[derive(Debug, Default, Deserialize)]
pub struct SwitchRequest {
    pub device_host: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of a successful switch.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

/// Possible responses from the switch endpoint.
pub enum SwitchResponse {
    Ok(Json<Message>),
}

impl IntoResponse for SwitchResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET|POST /device/{state}`
pub async fn switch<G>(
    State(state): State<AppState<G>>,
    Path(requested): Path<String>,
    OptionalJson(req): OptionalJson<SwitchRequest>,
) -> Result<SwitchResponse, ApiError>
where
    G: DeviceGateway + 'static,
{
    let power: PowerState = requested.parse()?;
    let target = state
        .resolver
        .target(req.device_host, req.email, req.password)?;
    let message = state.control_service.set_power(&target, power).await?;
    Ok(SwitchResponse::Ok(Json(Message { message })))
}
