//! Sign-in and signed-in user handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! GET /api/v1/users/me/listings
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ListingListResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
///
/// Example JSON:
/// `{"username":"admin","password":"password"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Invalid-request error naming the blank login field.
fn rejected_login(err: LoginValidationError) -> Error {
    let (field, code) = match err {
        LoginValidationError::EmptyUsername => ("username", "empty_username"),
        LoginValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Authenticate a shopper and establish a session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let LoginRequest { username, password } = payload.into_inner();
    let credentials =
        LoginCredentials::try_from_parts(&username, &password).map_err(rejected_login)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Every listing the signed-in seller owns, in all statuses, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/listings",
    responses(
        (status = 200, description = "Seller listings", body = ListingListResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Listing store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "myListings"
)]
#[get("/users/me/listings")]
pub async fn my_listings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ListingListResponse>> {
    let seller = session.require_user_id()?;
    let listings = state.listings.seller_listings(&seller).await?;
    Ok(web::Json(listings.into()))
}
