pub mod api;
pub mod error;
pub mod health;
pub mod logger;
pub mod middleware;
pub mod routes;
pub mod state;

pub use api::error::{ApiError, Result as ApiResult};
pub use api::extractors::request_identity::RequestIdentity;
pub use error::ServerError;
pub use routes::build_router;
pub use state::AppState;

#[cfg(test)]
mod tests;
