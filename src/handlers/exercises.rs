use crate::schemas::{AppState, ErrorResponse};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use common::{calendar_date, DateRange, DEFAULT_LOG_LIMIT};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

/// Request body for appending an exercise to a user's log
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateExerciseRequest {
    /// What was done (free text; empty strings are stored as-is)
    pub description: Option<String>,
    /// Duration in minutes; accepts a number or a numeric string
    #[schema(value_type = Option<String>)]
    pub duration: Option<serde_json::Value>,
    /// Exercise date (YYYY-MM-DD); defaults to today when omitted
    pub date: Option<String>,
}

/// Query parameters for the exercise log endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct LogQuery {
    /// Earliest date included (YYYY-MM-DD), inclusive
    pub from: Option<String>,
    /// Latest date included (YYYY-MM-DD), inclusive
    pub to: Option<String>,
    /// Maximum number of entries returned; falls back to 500
    pub limit: Option<String>,
}

/// Exercise response model; `_id` and `username` are the owning user's
#[derive(Debug, Serialize, ToSchema)]
pub struct ExerciseResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub description: String,
    pub duration: i32,
    /// Calendar-date rendering, e.g. "Sun Jan 15 2023"
    pub date: String,
}

/// A single entry of an exercise log
#[derive(Debug, Serialize, ToSchema)]
pub struct LogEntry {
    pub description: String,
    pub duration: i32,
    /// Calendar-date rendering, e.g. "Sun Jan 15 2023"
    pub date: String,
}

/// Exercise log response model
#[derive(Debug, Serialize, ToSchema)]
pub struct LogResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    /// Number of entries returned (post-filter, post-limit)
    pub count: usize,
    pub log: Vec<LogEntry>,
}

/// Accepts a JSON number or a numeric string; fractions truncate toward
/// zero. Anything else is rejected rather than silently coerced.
fn coerce_duration(raw: &serde_json::Value) -> Option<i32> {
    match raw {
        serde_json::Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(|v| i32::try_from(v).ok()),
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i32>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .and_then(|f| i32::try_from(f as i64).ok())
            })
        }
        _ => None,
    }
}

/// Parses a calendar date from ISO `YYYY-MM-DD`, tolerating a full
/// RFC 3339 timestamp (the date part is kept).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Append an exercise to a user's log
#[utoipa::path(
    post,
    path = "/api/users/{user_id}/exercises",
    tag = "exercises",
    params(
        ("user_id" = String, Path, description = "User identifier"),
    ),
    request_body = CreateExerciseRequest,
    responses(
        (status = 200, description = "Exercise recorded successfully", body = ExerciseResponse),
        (status = 400, description = "Invalid request body", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_exercise(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<CreateExerciseRequest>,
) -> Result<Json<ExerciseResponse>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering create_exercise function for user_id: {}", user_id);

    // The existence check comes first: an unknown user is a 404 no matter
    // what the body contains.
    trace!("Looking up user with ID: {}", user_id);
    let user = match state.store.find_user(&user_id).await {
        Ok(Some(user)) => {
            debug!("Found user: {}", user.username);
            user
        }
        Ok(None) => {
            warn!("User with ID {} not found", user_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "User not found".to_string(),
                }),
            ));
        }
        Err(store_error) => {
            error!("Failed to look up user with ID {}: {}", user_id, store_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error saving exercise".to_string(),
                }),
            ));
        }
    };

    let Some(description) = request.description else {
        warn!("Rejected exercise without a description for user {}", user_id);
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Description is required".to_string(),
            }),
        ));
    };

    let duration = match request.duration {
        Some(ref raw) => match coerce_duration(raw) {
            Some(duration) => duration,
            None => {
                warn!(
                    "Rejected non-numeric duration {:?} for user {}",
                    raw, user_id
                );
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Duration must be a number".to_string(),
                    }),
                ));
            }
        },
        None => {
            warn!("Rejected exercise without a duration for user {}", user_id);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Duration is required".to_string(),
                }),
            ));
        }
    };

    let date = match request.date.as_deref() {
        Some(raw) => match parse_date(raw) {
            Some(date) => date,
            None => {
                warn!("Rejected unparseable date '{}' for user {}", raw, user_id);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Invalid date".to_string(),
                    }),
                ));
            }
        },
        None => Utc::now().date_naive(),
    };

    debug!(
        "Recording exercise for user {}: description: {}, duration: {}, date: {}",
        user_id, description, duration, date
    );

    trace!("Attempting to insert new exercise into the store");
    match state
        .store
        .create_exercise(&user.id_hex(), &description, duration, date)
        .await
    {
        Ok(exercise) => {
            info!(
                "Exercise recorded for user {} on {}: {} ({} min)",
                user_id, exercise.date, exercise.description, exercise.duration
            );
            Ok(Json(ExerciseResponse {
                id: user.id_hex(),
                username: user.username,
                description: exercise.description,
                duration: exercise.duration,
                date: calendar_date(exercise.date),
            }))
        }
        Err(store_error) => {
            error!(
                "Failed to record exercise for user {}: {}",
                user_id, store_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error saving exercise".to_string(),
                }),
            ))
        }
    }
}

/// Get a user's exercise log with optional date-range and count filters
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/logs",
    tag = "exercises",
    params(
        ("user_id" = String, Path, description = "User identifier"),
        LogQuery,
    ),
    responses(
        (status = 200, description = "Exercise log retrieved successfully", body = LogResponse),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_exercise_log(
    Path(user_id): Path<String>,
    Query(query): Query<LogQuery>,
    State(state): State<AppState>,
) -> Result<Json<LogResponse>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_exercise_log function for user_id: {}", user_id);

    trace!("Looking up user with ID: {}", user_id);
    let user = match state.store.find_user(&user_id).await {
        Ok(Some(user)) => {
            debug!("Found user: {}", user.username);
            user
        }
        Ok(None) => {
            warn!("User with ID {} not found", user_id);
            return Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: "User not found".to_string(),
                }),
            ));
        }
        Err(store_error) => {
            error!("Failed to look up user with ID {}: {}", user_id, store_error);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error retrieving logs".to_string(),
                }),
            ));
        }
    };

    let from = match query.from.as_deref() {
        Some(raw) => match parse_date(raw) {
            Some(date) => Some(date),
            None => {
                warn!("Rejected unparseable 'from' date '{}'", raw);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Invalid 'from' date".to_string(),
                    }),
                ));
            }
        },
        None => None,
    };
    let to = match query.to.as_deref() {
        Some(raw) => match parse_date(raw) {
            Some(date) => Some(date),
            None => {
                warn!("Rejected unparseable 'to' date '{}'", raw);
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "Invalid 'to' date".to_string(),
                    }),
                ));
            }
        },
        None => None,
    };
    let range = DateRange::new(from, to);

    // A missing, non-numeric or zero limit falls back to the default cap.
    let limit = query
        .limit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|&limit| limit > 0)
        .unwrap_or(DEFAULT_LOG_LIMIT);

    debug!(
        "Fetching exercise log for user {}: range: {:?}, limit: {}",
        user_id, range, limit
    );

    match state.store.find_exercises(&user.id_hex(), range, limit).await {
        Ok(exercises) => {
            let log: Vec<LogEntry> = exercises
                .into_iter()
                .map(|exercise| LogEntry {
                    description: exercise.description,
                    duration: exercise.duration,
                    date: calendar_date(exercise.date),
                })
                .collect();

            info!(
                "Retrieved {} log entries for user {}",
                log.len(),
                user_id
            );
            Ok(Json(LogResponse {
                id: user.id_hex(),
                username: user.username,
                count: log.len(),
                log,
            }))
        }
        Err(store_error) => {
            error!(
                "Failed to retrieve exercise log for user {}: {}",
                user_id, store_error
            );
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Error retrieving logs".to_string(),
                }),
            ))
        }
    }
}
