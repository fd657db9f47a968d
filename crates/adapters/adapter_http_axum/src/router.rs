//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use plughub_app::ports::DeviceGateway;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes the given [`CorsLayer`] and a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level using the `tracing` ecosystem.
pub fn build<G>(state: AppState<G>, cors: CorsLayer) -> Router
where
    G: DeviceGateway + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .merge(crate::api::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use http_body_util::BodyExt;
    use plughub_adapter_virtual::{VirtualGateway, VirtualPlug};
    use plughub_app::services::control_service::ControlService;
    use plughub_app::services::credential_resolver::CredentialResolver;
    use plughub_app::services::discovery_service::DiscoveryService;
    use plughub_domain::power::PowerState;
    use serde_json::Value;
    use tower::ServiceExt;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn gateway() -> VirtualGateway {
        VirtualGateway::builder()
            .plug(VirtualPlug::new("10.0.0.2"))
            .plug(VirtualPlug::new("10.0.0.3").unreachable())
            .build()
    }

    fn app_with(gateway: VirtualGateway, resolver: CredentialResolver) -> Router {
        let state = AppState::new(
            ControlService::new(gateway.clone(), TIMEOUT),
            DiscoveryService::new(gateway, TIMEOUT, TIMEOUT),
            resolver,
        );
        let cors = crate::cors::layer(&["http://localhost:5173".to_string()]).unwrap();
        build(state, cors)
    }

    fn configured() -> CredentialResolver {
        CredentialResolver::new(
            Some("10.0.0.2".into()),
            Some("home@example.com".into()),
            Some("s3cret".into()),
        )
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = app_with(gateway(), configured());

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_switch_configured_plug_on() {
        let gateway = gateway();
        let app = app_with(gateway.clone(), configured());

        let (status, body) = send(app, get("/device/on")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "device turned on");
        assert_eq!(gateway.power_state("10.0.0.2"), Some(PowerState::On));
    }

    #[tokio::test]
    async fn should_reject_unknown_state_without_touching_plug() {
        let gateway = gateway();
        let app = app_with(gateway.clone(), configured());

        let (status, body) = send(app, get("/device/toggle")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "unsupported state 'toggle', use 'on' or 'off'");
        assert_eq!(gateway.power_state("10.0.0.2"), Some(PowerState::Off));
    }

    #[tokio::test]
    async fn should_prefer_host_from_body() {
        let app = app_with(gateway(), configured());

        let (status, body) = send(app, post("/device/off", r#"{"device_host":"10.0.0.3"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["detail"],
            "failed to connect to 10.0.0.3: connection refused"
        );
    }

    #[tokio::test]
    async fn should_reject_missing_host() {
        let resolver = CredentialResolver::new(None, Some("a@b.c".into()), Some("pw".into()));
        let app = app_with(gateway(), resolver);

        let (status, body) = send(app, get("/device/on")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("DEVICE_HOST"));
    }

    #[tokio::test]
    async fn should_reject_malformed_body() {
        let app = app_with(gateway(), configured());

        let (status, body) = send(app, post("/device/on", "{not json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("malformed request body")
        );
    }

    #[tokio::test]
    async fn should_accept_null_body() {
        let app = app_with(gateway(), configured());

        let (status, _) = send(app, post("/device/on", "null")).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn should_report_failed_plug_in_tolerant_discovery() {
        let app = app_with(gateway(), configured());

        let (status, body) = send(app, get("/devices")).await;

        assert_eq!(status, StatusCode::OK);
        let devices = body["devices"].as_array().unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0]["status"], "ok");
        assert_eq!(devices[0]["info"]["ip"], "10.0.0.2");
        assert_eq!(devices[1]["status"], "failed");
    }

    #[tokio::test]
    async fn should_fail_strict_discovery() {
        let app = app_with(gateway(), configured());

        let (status, body) = send(app, get("/devices?strict=true")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn should_reject_malformed_query() {
        let app = app_with(gateway(), configured());

        let (status, body) = send(app, get("/devices?strict=maybe")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("malformed query string")
        );
    }

    #[tokio::test]
    async fn should_answer_preflight_for_allowed_origin() {
        let app = app_with(gateway(), configured());
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/devices")
            .header(header::ORIGIN, "http://localhost:5173")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5173"
        );
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }
}
