use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::store::Store;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Handle to the backing document store
    pub store: Arc<dyn Store>,
}

/// Error response
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Document store connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::users::create_user,
        crate::handlers::users::get_users,
        crate::handlers::exercises::create_exercise,
        crate::handlers::exercises::get_exercise_log,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            crate::handlers::users::CreateUserRequest,
            crate::handlers::users::UserResponse,
            crate::handlers::exercises::CreateExerciseRequest,
            crate::handlers::exercises::ExerciseResponse,
            crate::handlers::exercises::LogEntry,
            crate::handlers::exercises::LogResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "users", description = "User registry endpoints"),
        (name = "exercises", description = "Exercise log endpoints"),
    ),
    info(
        title = "FitLog API",
        description = "Exercise tracker API - records users and timestamped exercise entries",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
