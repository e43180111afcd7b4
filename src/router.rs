use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::metrics::metrics_middleware;
use crate::middleware::role::require_admin;
use crate::modules::apartments::router::init_apartments_router;
use crate::modules::auth::router::init_auth_router;
use crate::modules::devices::router::{init_admin_devices_router, init_devices_router};
use crate::modules::houses::router::init_houses_router;
use crate::modules::residents::router::init_admin_residents_router;
use crate::modules::users::router::{init_me_router, init_profile_router};
use crate::state::AppState;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/profile", init_profile_router())
                .nest("/me", init_me_router())
                .nest("/apartments", init_apartments_router())
                .nest(
                    "/admin",
                    Router::new()
                        .nest("/devices", init_admin_devices_router())
                        .nest("/residents", init_admin_residents_router())
                        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin)),
                )
                .merge(init_houses_router())
                // Catch-all `/{kind}` goes last; static segments above take priority.
                .merge(init_devices_router()),
        )
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
