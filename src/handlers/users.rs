use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, http::StatusCode, response::Json};
use model::documents::UserDoc;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Request body for registering a new user
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Username (opaque; duplicates are allowed)
    pub username: Option<String>,
}

/// User response model
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    #[serde(rename = "_id")]
    pub id: String,
}

impl From<UserDoc> for UserResponse {
    fn from(doc: UserDoc) -> Self {
        Self {
            id: doc.id_hex(),
            username: doc.username,
        }
    }
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Missing username", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<UserResponse>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_user function");

    // Usernames are opaque and not deduplicated; only presence is checked
    let username = match request.username {
        Some(username) if !username.is_empty() => username,
        _ => {
            warn!("Rejected user registration without a username");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Username is required".to_string(),
                }),
            ));
        }
    };
    debug!("Creating user with username: {}", username);

    trace!("Attempting to insert new user into the store");
    match state.store.create_user(&username).await {
        Ok(user) => {
            info!(
                "User created successfully with ID: {}, username: {}",
                user.id_hex(),
                user.username
            );
            Ok(Json(UserResponse::from(user)))
        }
        Err(store_error) => {
            error!("Failed to create user '{}': {}", username, store_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error saving user".to_string(),
                }),
            ))
        }
    }
}

/// Get all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users retrieved successfully", body = Vec<UserResponse>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_users function");
    debug!("Fetching all users from the store");

    match state.store.list_users().await {
        Ok(users) => {
            let user_count = users.len();
            debug!("Retrieved {} users from the store", user_count);

            let user_responses: Vec<UserResponse> =
                users.into_iter().map(UserResponse::from).collect();

            info!("Successfully retrieved {} users", user_count);
            Ok(Json(user_responses))
        }
        Err(store_error) => {
            error!("Failed to retrieve users from the store: {}", store_error);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error fetching users".to_string(),
                }),
            ))
        }
    }
}
