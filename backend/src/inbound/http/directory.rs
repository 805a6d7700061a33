//! User-directory HTTP handlers.
//!
//! ```text
//! POST /users                {"name","email","password","confirmPassword","city"}
//! GET  /users
//! GET  /users/{id}
//! PUT  /users/{id}           {"name","totalCarbonFootprint"}
//! POST /users/{id}/credits   {"delta"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Registration, UserRecord, UserUpdate};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::DirectoryState;
use crate::inbound::http::validation::{map_user_validation_error, parse_user_id};

/// Registration request body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@example.com")]
    pub email: String,
    #[schema(example = "correct horse battery")]
    pub password: String,
    #[schema(example = "correct horse battery")]
    pub confirm_password: String,
    #[schema(example = "Pune")]
    pub city: String,
}

impl TryFrom<RegisterUserRequest> for Registration {
    type Error = Error;

    fn try_from(value: RegisterUserRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.name,
            &value.email,
            &value.city,
            &value.password,
            &value.confirm_password,
        )
        .map_err(map_user_validation_error)
    }
}

/// Full replacement of a user's mutable fields.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub name: String,
    pub total_carbon_footprint: f64,
}

/// Atomic adjustment of a user's total.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditRequest {
    /// Amount to add; negative values revert an earlier credit.
    #[schema(example = 39.5)]
    pub delta: f64,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "User registered", body = UserRecord),
        (status = 400, description = "Invalid registration", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["user-directory"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<DirectoryState>,
    payload: web::Json<RegisterUserRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from(payload.into_inner())?;
    let record = state.commands.register(registration).await?;
    Ok(HttpResponse::Created().json(record))
}

/// List every registered user.
#[utoipa::path(
    get,
    path = "/users",
    responses((status = 200, description = "Users", body = [UserRecord])),
    tags = ["user-directory"],
    operation_id = "listDirectoryUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<DirectoryState>) -> ApiResult<web::Json<Vec<UserRecord>>> {
    Ok(web::Json(state.queries.list().await?))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserRecord),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["user-directory"],
    operation_id = "getDirectoryUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<DirectoryState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<UserRecord>> {
    let user_id = parse_user_id(path.into_inner())?;
    Ok(web::Json(state.queries.find(user_id).await?))
}

/// Replace a user's name and total.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = UserRecord),
        (status = 400, description = "Invalid update", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["user-directory"],
    operation_id = "replaceDirectoryUser"
)]
#[put("/users/{id}")]
pub async fn replace_user(
    state: web::Data<DirectoryState>,
    path: web::Path<i64>,
    payload: web::Json<UserUpdateRequest>,
) -> ApiResult<web::Json<UserRecord>> {
    let user_id = parse_user_id(path.into_inner())?;
    let UserUpdateRequest {
        name,
        total_carbon_footprint,
    } = payload.into_inner();
    let update =
        UserUpdate::try_new(&name, total_carbon_footprint).map_err(map_user_validation_error)?;
    Ok(web::Json(state.commands.replace(user_id, update).await?))
}

/// Atomically add to a user's total.
#[utoipa::path(
    post,
    path = "/users/{id}/credits",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = CreditRequest,
    responses(
        (status = 200, description = "Credited user", body = UserRecord),
        (status = 400, description = "Invalid delta", body = Error),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["user-directory"],
    operation_id = "creditDirectoryUser"
)]
#[post("/users/{id}/credits")]
pub async fn credit_user(
    state: web::Data<DirectoryState>,
    path: web::Path<i64>,
    payload: web::Json<CreditRequest>,
) -> ApiResult<web::Json<UserRecord>> {
    let user_id = parse_user_id(path.into_inner())?;
    let record = state.commands.credit(user_id, payload.delta).await?;
    Ok(web::Json(record))
}

/// Register every directory handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_user)
        .service(list_users)
        .service(get_user)
        .service(replace_user)
        .service(credit_user);
}
