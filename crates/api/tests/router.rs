//! In-process router tests (no sockets) via `tower::ServiceExt::oneshot`.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use movies_api::app::{build_app, services::AppServices};
use movies_api::config::ApiConfig;
use movies_catalog::{seed, MovieRepository};

fn app_with(config: &ApiConfig) -> (Router, AppServices) {
    let services = AppServices::in_memory(seed::builtin().unwrap());
    (build_app(config, services.clone()), services)
}

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_without_json_content_type_is_rejected_in_validation_shape() {
    let (app, services) = app_with(&ApiConfig::default());
    let before = services.movies.len();

    let res = app
        .oneshot(
            Request::post("/movies")
                .body(Body::from(r#"{"title":"x"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["error"][0]["code"], "invalid_json");
    assert_eq!(services.movies.len(), before);
}

#[tokio::test]
async fn post_with_non_object_body_fails_at_root() {
    let (app, _) = app_with(&ApiConfig::default());

    let res = app
        .oneshot(
            Request::post("/movies")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("[1, 2, 3]"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["error"][0]["path"], json!([]));
    assert_eq!(body["error"][0]["expected"], "object");
}

#[tokio::test]
async fn configured_origins_replace_the_defaults() {
    let config = ApiConfig {
        allowed_origins: vec!["https://staging.example".to_string()],
        ..ApiConfig::default()
    };

    for (origin, echoed) in [
        ("https://staging.example", true),
        ("https://movies.com", false),
    ] {
        let (app, _) = app_with(&config);
        let res = app
            .oneshot(
                Request::get("/movies")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            echoed,
            "{origin}"
        );
    }
}

#[tokio::test]
async fn cors_is_not_applied_to_single_movie_reads_or_writes() {
    let (app, services) = app_with(&ApiConfig::default());
    let id = services.movies.list()[0].id;

    let res = app
        .clone()
        .oneshot(
            Request::get(format!("/movies/{id}"))
                .header(header::ORIGIN, "https://movies.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let res = app
        .oneshot(
            Request::builder()
                .method(Method::PATCH)
                .uri(format!("/movies/{id}"))
                .header(header::ORIGIN, "https://movies.com")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"rate": 7.5}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_eq!(services.movies.find_by_id(&id).unwrap().rate, 7.5);
}

#[tokio::test]
async fn same_origin_preflight_gets_methods_but_no_origin_echo() {
    let (app, services) = app_with(&ApiConfig::default());
    let id = services.movies.list()[0].id;

    let res = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri(format!("/movies/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert_eq!(
        res.headers().get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
        "GET, POST, PUT, PATCH, DELETE"
    );
}

#[tokio::test]
async fn seed_file_replaces_builtin_dataset() {
    let path = std::env::temp_dir().join(format!("movies-seed-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"[{"id":"6a360a18-c645-4b47-9a7b-2a71babbf3e0","title":"Heat","year":1995,
             "director":"Michael Mann","duration":170,
             "poster":"https://example.com/heat.jpg","genre":["Crime","Thriller"]}]"#,
    )
    .unwrap();

    let config = ApiConfig {
        seed_path: Some(path.clone()),
        ..ApiConfig::default()
    };
    let services = AppServices::from_config(&config).unwrap();
    std::fs::remove_file(&path).unwrap();

    let movies = services.movies.list();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0].title, "Heat");
    assert_eq!(movies[0].rate, 5.0);

    let app = build_app(&config, services);
    let res = app
        .oneshot(
            Request::get("/movies/6a360a18-c645-4b47-9a7b-2a71babbf3e0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["director"], "Michael Mann");
}

#[tokio::test]
async fn unsupported_method_is_not_allowed() {
    let (app, _) = app_with(&ApiConfig::default());
    let res = app
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/movies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn repeated_genre_is_a_json_bad_request() {
    let (app, _) = app_with(&ApiConfig::default());
    let res = app
        .oneshot(
            Request::get("/movies?genre=Drama&genre=Crime")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = body_json(res).await;
    assert_eq!(body["error"][0]["code"], "invalid_query");
    assert_eq!(body["error"][0]["path"], json!([]));
}

#[tokio::test]
async fn undecodable_path_id_is_not_found() {
    let (app, services) = app_with(&ApiConfig::default());
    let before = services.movies.len();

    for method in [Method::GET, Method::DELETE, Method::PATCH] {
        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri("/movies/%FF")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"rate": 1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{method}");
        assert_eq!(body_json(res).await, json!({ "message": "Movie not found" }));
    }
    assert_eq!(services.movies.len(), before);
}

#[tokio::test]
async fn method_not_allowed_carries_no_cors_headers() {
    let (app, services) = app_with(&ApiConfig::default());
    let id = services.movies.list()[0].id;

    for (method, uri) in [
        (Method::PUT, format!("/movies/{id}")),
        (Method::OPTIONS, "/movies".to_string()),
        (Method::PUT, "/movies".to_string()),
    ] {
        let res = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method.clone())
                    .uri(&uri)
                    .header(header::ORIGIN, "https://movies.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "{method} {uri}");
        assert!(
            !res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            "{method} {uri}"
        );
        assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    }
}
