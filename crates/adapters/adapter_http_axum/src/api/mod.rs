//! JSON API handler modules.

mod body;
#[allow(clippy::missing_errors_doc)]
pub mod device;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::get;

use plughub_app::ports::DeviceGateway;

use crate::state::AppState;

pub use body::OptionalJson;

/// Build the API sub-router.
///
/// Both routes accept `GET` and `POST`; the optional JSON body is read the
/// same way for either method.
pub fn routes<G>() -> Router<AppState<G>>
where
    G: DeviceGateway + 'static,
{
    Router::new()
        .route(
            "/device/{state}",
            get(device::switch::<G>).post(device::switch::<G>),
        )
        .route(
            "/devices",
            get(devices::discover::<G>).post(devices::discover::<G>),
        )
}
