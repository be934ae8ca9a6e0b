mod handlers;
mod routes;

pub use handlers::{AppState, ErrorResponse};
pub use routes::{create_api_router, API_VERSION};
