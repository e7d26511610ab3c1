use std::convert::Infallible;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get},
    Router,
};

use crate::cors::{self, CorsPolicy};

pub mod movies;
pub mod system;

/// Router for every endpoint. CORS only wraps the list, delete and preflight
/// handlers; the other methods on the same paths are left alone, and so is
/// the `405` fallback, which is set after the layer so the layer never sees it.
pub fn router(policy: CorsPolicy) -> Router {
    let cors = from_fn_with_state(policy, cors::cors_middleware);

    Router::new()
        .route("/", get(system::greeting))
        .route("/health", get(system::health))
        .route(
            "/movies",
            get(movies::list_movies)
                .layer::<_, Infallible>(cors.clone())
                .post(movies::create_movie)
                .fallback(movies::method_not_allowed),
        )
        .route(
            "/movies/:id",
            get(movies::get_movie)
                .patch(movies::update_movie)
                .fallback(movies::method_not_allowed)
                .merge(
                    delete(movies::delete_movie)
                        .options(movies::preflight)
                        .layer::<_, Infallible>(cors),
                ),
        )
}
