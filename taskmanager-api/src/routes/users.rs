/// User endpoints
///
/// Each handler opens one `Session` for the request and passes it to
/// `UserService`. Reads drop the session when done; writes hand it over to
/// the service, which commits.
///
/// # Endpoints
///
/// - `GET    /user/`                        - List users
/// - `GET    /user/user_id?user_id=`        - Get one user
/// - `GET    /user/user_id/tasks?user_id=`  - List a user's tasks
/// - `POST   /user/create`                  - Create user
/// - `PUT    /user/update?user_id=`         - Replace user
/// - `DELETE /user/delete?user_id=`         - Delete user and its tasks

use crate::{app::AppState, error::ApiResult};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskmanager_shared::{
    db::session::Session,
    models::{
        task::Task,
        user::{CreateUser, UpdateUser, User},
    },
    service::{Acknowledgment, UserService},
};

/// `?user_id=` query parameter
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: i64,
}

/// Acknowledgment body with the status code it carries
type AckResponse = (StatusCode, Json<Acknowledgment>);

fn acknowledged(ack: Acknowledgment) -> AckResponse {
    let status = StatusCode::from_u16(ack.status_code).unwrap_or(StatusCode::OK);
    (status, Json(ack))
}

/// List all users
///
/// # Endpoint
///
/// ```text
/// GET /user/
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "id": 1, "username": "John Doe", "firstname": "John",
///     "lastname": "Doe", "age": 30, "slug": "john-doe" }
/// ]
/// ```
pub async fn all_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let mut session = Session::begin(&state.db).await?;
    let users = UserService::list_users(&mut session).await?;
    Ok(Json(users))
}

/// Get a user by ID
///
/// # Errors
///
/// - `400 Bad Request`: `user_id` missing or not an integer
/// - `404 Not Found`: No such user
pub async fn user_by_id(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> ApiResult<Json<User>> {
    let Query(params) = query?;

    let mut session = Session::begin(&state.db).await?;
    let user = UserService::get_user(&mut session, params.user_id).await?;
    Ok(Json(user))
}

/// List the tasks of a user
///
/// # Errors
///
/// - `400 Bad Request`: `user_id` missing or not an integer
/// - `404 Not Found`: No such user
pub async fn tasks_by_user_id(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Task>>> {
    let Query(params) = query?;

    let mut session = Session::begin(&state.db).await?;
    let tasks = UserService::list_tasks_for_user(&mut session, params.user_id).await?;
    Ok(Json(tasks))
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /user/create
/// Content-Type: application/json
///
/// { "username": "John Doe", "firstname": "John", "lastname": "Doe", "age": 30 }
/// ```
///
/// # Response
///
/// ```json
/// { "status_code": 201, "transaction": "Successful" }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Username already taken
/// - `422 Unprocessable Entity`: Missing or mistyped fields
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUser>, JsonRejection>,
) -> ApiResult<AckResponse> {
    let Json(input) = body?;

    let session = Session::begin(&state.db).await?;
    let ack = UserService::create_user(session, input).await?;
    Ok(acknowledged(ack))
}

/// Replace a user
///
/// The body must carry every field; the slug is not recomputed.
///
/// # Errors
///
/// - `404 Not Found`: No such user
/// - `409 Conflict`: New username belongs to another user
/// - `422 Unprocessable Entity`: Missing or mistyped fields
pub async fn update_user(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    body: Result<Json<UpdateUser>, JsonRejection>,
) -> ApiResult<AckResponse> {
    let Query(params) = query?;
    let Json(input) = body?;

    let session = Session::begin(&state.db).await?;
    let ack = UserService::update_user(session, params.user_id, input).await?;
    Ok(acknowledged(ack))
}

/// Delete a user together with its tasks
///
/// # Errors
///
/// - `404 Not Found`: No such user
pub async fn delete_user(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> ApiResult<AckResponse> {
    let Query(params) = query?;

    let session = Session::begin(&state.db).await?;
    let ack = UserService::delete_user(session, params.user_id).await?;
    Ok(acknowledged(ack))
}
