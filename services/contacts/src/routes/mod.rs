//! Contact book routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod addresses;
pub mod contacts;
pub mod users;

#[cfg(test)]
mod test_support;

/// Create the router for the contact book service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/api/users/current",
            get(users::current).patch(users::update_current),
        )
        .route("/api/users/logout", delete(users::logout))
        .route("/api/contacts", post(contacts::create).get(contacts::search))
        .route(
            "/api/contacts/:contact_id",
            get(contacts::get).put(contacts::update).delete(contacts::delete),
        )
        .route(
            "/api/contacts/:contact_id/addresses",
            post(addresses::create).get(addresses::list),
        )
        .route(
            "/api/contacts/:contact_id/addresses/:address_id",
            get(addresses::get)
                .put(addresses::update)
                .delete(addresses::delete),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users", post(users::register))
        .route("/api/login", post(users::login))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "contact-book"
    }))
}

#[cfg(test)]
mod tests {
    use super::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_health_check_is_public() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "service": "contact-book"}));
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = TestApp::new();

        for (method, uri) in [
            (Method::GET, "/api/users/current"),
            (Method::DELETE, "/api/users/logout"),
            (Method::GET, "/api/contacts"),
            (Method::GET, "/api/contacts/1"),
            (Method::DELETE, "/api/contacts/1/addresses/1"),
        ] {
            let (status, body) = app.send(method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body, json!({"errors": {"message": ["unauthorized"]}}));
        }
    }
}
