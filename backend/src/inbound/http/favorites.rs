//! Favorite toggle and list handlers.
//!
//! ```text
//! POST /api/v1/listings/{id}/favorite
//! GET  /api/v1/users/me/favorites
//! ```

use actix_web::{get, post, web};

use crate::domain::{Error, FavoriteState};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ListingListResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_listing_id;

/// Add a listing to the signed-in user's favorites, or remove it.
#[utoipa::path(
    post,
    path = "/api/v1/listings/{id}/favorite",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Favorite state after the toggle", body = FavoriteState),
        (status = 400, description = "Malformed id", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown listing", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "toggleFavorite"
)]
#[post("/listings/{id}/favorite")]
pub async fn toggle_favorite(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<FavoriteState>> {
    let user = session.require_user_id()?;
    let id = parse_listing_id(&path.into_inner())?;
    let favorite = state.favorites.toggle(&user, id).await?;
    Ok(web::Json(favorite))
}

/// The signed-in user's favorites, most recently favorited first.
#[utoipa::path(
    get,
    path = "/api/v1/users/me/favorites",
    responses(
        (status = 200, description = "Favorited listings", body = ListingListResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["favorites"],
    operation_id = "myFavorites"
)]
#[get("/users/me/favorites")]
pub async fn my_favorites(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ListingListResponse>> {
    let user = session.require_user_id()?;
    let listings = state.favorites_query.list(&user).await?;
    Ok(web::Json(listings.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::ListingId;
    use crate::domain::listing::fixtures::{ListingBuilder, SELLER_ID, seller};
    use crate::domain::ports::{MockFavoritesCommand, MockFavoritesQuery};
    use crate::inbound::http::test_utils::{
        fixture_state, session_cookie_from, test_login, test_session_middleware,
    };

    async fn call(state: HttpState, signed_in: bool, req: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().app_data(web::Data::new(state)).service(
                web::scope("/api/v1")
                    .wrap(test_session_middleware())
                    .route("/test-login/{user_id}", web::post().to(test_login))
                    .service(toggle_favorite)
                    .service(my_favorites),
            ),
        )
        .await;

        let req = if signed_in {
            let login = actix_test::call_service(
                &app,
                actix_test::TestRequest::post()
                    .uri(&format!("/api/v1/test-login/{SELLER_ID}"))
                    .to_request(),
            )
            .await;
            req.cookie(session_cookie_from(&login))
        } else {
            req
        };

        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    #[actix_web::test]
    async fn toggle_reports_the_new_state() {
        let id = ListingId::random();
        let mut favorites = MockFavoritesCommand::new();
        favorites
            .expect_toggle()
            .withf(move |user, listing| *user == seller() && *listing == id)
            .times(1)
            .return_once(|_, _| Ok(FavoriteState { favorited: false }));
        let mut state = fixture_state();
        state.favorites = Arc::new(favorites);

        let (status, body) = call(
            state,
            true,
            actix_test::TestRequest::post().uri(&format!("/api/v1/listings/{id}/favorite")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "favorited": false }));
    }

    #[actix_web::test]
    async fn toggle_of_unknown_listing_is_not_found() {
        let mut favorites = MockFavoritesCommand::new();
        favorites
            .expect_toggle()
            .return_once(|_, id| Err(Error::not_found(format!("listing {id} not found"))));
        let mut state = fixture_state();
        state.favorites = Arc::new(favorites);

        let (status, body) = call(
            state,
            true,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/listings/{}/favorite", ListingId::random())),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[actix_web::test]
    async fn toggle_requires_a_session() {
        let mut state = fixture_state();
        state.favorites = Arc::new(MockFavoritesCommand::new());

        let (status, _) = call(
            state,
            false,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/listings/{}/favorite", ListingId::random())),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn favorites_list_renders_listing_cards() {
        let mut query = MockFavoritesQuery::new();
        query.expect_list().times(1).return_once(|_| {
            Ok(vec![
                ListingBuilder::new("RTX 4070").category("GPU").build(),
                ListingBuilder::new("DDR5 32GB").category("メモリ").build(),
            ])
        });
        let mut state = fixture_state();
        state.favorites_query = Arc::new(query);

        let (status, body) = call(
            state,
            true,
            actix_test::TestRequest::get().uri("/api/v1/users/me/favorites"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"][0]["title"], "RTX 4070");
        assert_eq!(body["items"][1]["category"], "メモリ");
    }
}
