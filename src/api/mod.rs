mod handlers;
mod routes;

pub use handlers::{ErrorResponse, HealthResponse, IncrementRequest, VisitorCountsResponse};
pub use routes::create_api_router;
