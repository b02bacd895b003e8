use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use talant_shared::{Caller, ProfileId};
use talant_store::{
    PhotoUpload, ProfileFields, ProfileRecord, ProfileStore, SearchCriteria, SearchResult, Stats,
    StoreError,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::SessionVerifier;
use crate::config::ServerConfig;
use crate::error::ApiError;

/// Room for multipart framing on top of the photo itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStore>,
    pub verifier: Arc<SessionVerifier>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    fn authenticate(&self, headers: &HeaderMap) -> Result<Caller, ApiError> {
        self.verifier.authenticate(headers)
    }

    /// Run a store operation on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ProfileStore) -> talant_store::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| ApiError::Internal(format!("store task failed: {e}")))?
            .map_err(ApiError::from)
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let body_limit = state.config.max_photo_size.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/create-ankety", post(create_ankety))
        .route("/api/update-ankety", put(update_ankety).post(update_ankety))
        .route("/api/show-ankety", get(show_ankety))
        .route("/api/my-ankety", get(my_ankety))
        .route("/api/delete-ankety", delete(delete_ankety))
        .route("/api/ankety/search", get(search_ankety))
        .route("/api/ankety/stats", get(ankety_stats))
        .route("/api/ankety/:id", get(get_ankety))
        .route("/api/upload-photo", post(upload_photo))
        .route("/api/get-photo", get(get_photo))
        .route("/api/delete-photo", delete(delete_photo).post(delete_photo))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    // Cookies need an explicit origin; a wildcard cannot carry credentials.
    if let Some(origin) = &config.cors_origin {
        match HeaderValue::from_str(origin) {
            Ok(value) => {
                return CorsLayer::new()
                    .allow_origin(AllowOrigin::exact(value))
                    .allow_methods(methods)
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                    .allow_credentials(true);
            }
            Err(e) => warn!(origin = %origin, error = %e, "Invalid CORS_ORIGIN, allowing any origin"),
        }
    }

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers(Any)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct CreatedResponse {
    message: &'static str,
    id: ProfileId,
}

#[derive(Serialize)]
struct UpdatedResponse {
    message: &'static str,
    anketa: ProfileRecord,
}

#[derive(Serialize)]
struct PhotoResponse {
    message: &'static str,
    photo: String,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Deserialize)]
struct UpdateForm {
    #[serde(default)]
    id: String,
    #[serde(flatten)]
    fields: ProfileFields,
}

/// Raw query parameters; age bounds are parsed by hand so a bad number
/// gets a JSON error instead of the extractor's plain-text rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchParams {
    query: Option<String>,
    gender: Option<String>,
    min_age: Option<String>,
    max_age: Option<String>,
    job: Option<String>,
    city: Option<String>,
    skills: Option<String>,
}

impl SearchParams {
    fn into_criteria(self) -> Result<SearchCriteria, ApiError> {
        Ok(SearchCriteria {
            min_age: parse_age_bound("min_age", self.min_age)?,
            max_age: parse_age_bound("max_age", self.max_age)?,
            query: self.query,
            gender: self.gender,
            job: self.job,
            city: self.city,
            skills: self.skills,
        })
    }
}

fn parse_age_bound(name: &str, value: Option<String>) -> Result<Option<i64>, ApiError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v
            .parse::<i64>()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("{name} must be an integer"))),
    }
}

#[derive(Deserialize)]
struct PhotoQuery {
    #[serde(default)]
    filename: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn create_ankety(
    headers: HeaderMap,
    State(state): State<AppState>,
    Form(fields): Form<ProfileFields>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let caller = state.authenticate(&headers)?;
    let owner = caller.owner_id;

    let record = state.blocking(move |s| s.create(&owner, fields)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Anketa created successfully",
            id: record.id,
        }),
    ))
}

async fn update_ankety(
    headers: HeaderMap,
    State(state): State<AppState>,
    Form(form): Form<UpdateForm>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    let caller = state.authenticate(&headers)?;
    if form.id.trim().is_empty() {
        return Err(ApiError::BadRequest("missing id".into()));
    }

    let id = ProfileId::from(form.id.as_str());
    let owner = caller.owner_id;
    let fields = form.fields;
    let record = state.blocking(move |s| s.update(&id, &owner, fields)).await?;

    Ok(Json(UpdatedResponse {
        message: "Profile updated successfully",
        anketa: record,
    }))
}

async fn show_ankety(State(state): State<AppState>) -> Result<Json<Vec<ProfileRecord>>, ApiError> {
    let records = state.blocking(|s| s.list()).await?;
    Ok(Json(records))
}

async fn my_ankety(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<ProfileRecord>, ApiError> {
    let owner = state.authenticate(&headers)?.owner_id;
    state
        .blocking(move |s| s.get_by_owner(&owner))
        .await?
        .map(Json)
        .ok_or(ApiError::Store(StoreError::NotFound))
}

async fn get_ankety(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProfileRecord>, ApiError> {
    let id = ProfileId::from(id.as_str());
    state
        .blocking(move |s| s.get_by_id(&id))
        .await?
        .map(Json)
        .ok_or(ApiError::Store(StoreError::NotFound))
}

async fn delete_ankety(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let owner = state.authenticate(&headers)?.owner_id;
    let removed = state.blocking(move |s| s.delete(&owner)).await?;

    Ok(Json(CreatedResponse {
        message: "Anketa deleted successfully",
        id: removed.id,
    }))
}

async fn search_ankety(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResult>, ApiError> {
    let criteria = params.into_criteria()?;
    let result = state.blocking(move |s| s.search(&criteria)).await?;
    Ok(Json(result))
}

async fn ankety_stats(State(state): State<AppState>) -> Result<Json<Stats>, ApiError> {
    let stats = state.blocking(|s| s.stats()).await?;
    Ok(Json(stats))
}

async fn upload_photo(
    headers: HeaderMap,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<PhotoResponse>, ApiError> {
    let caller = state.authenticate(&headers)?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("photo") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .unwrap_or(talant_shared::constants::OCTET_STREAM)
            .to_string();
        let data = field.bytes().await.map_err(multipart_error)?;

        let size = data.len();
        let upload = PhotoUpload::new(file_name.as_deref(), &content_type, data.to_vec());
        let owner = caller.owner_id.clone();
        let photo = state.blocking(move |s| s.attach_photo(&owner, upload)).await?;

        info!(owner = %caller.owner_id, size, "Photo uploaded via API");

        return Ok(Json(PhotoResponse {
            message: "Photo uploaded successfully",
            photo,
        }));
    }

    Err(ApiError::BadRequest(
        "Missing 'photo' field in multipart form".to_string(),
    ))
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(e.body_text())
    } else {
        ApiError::BadRequest(format!("Multipart error: {}", e.body_text()))
    }
}

async fn get_photo(
    State(state): State<AppState>,
    Query(query): Query<PhotoQuery>,
) -> Result<Response, ApiError> {
    if query.filename.is_empty() {
        return Err(ApiError::BadRequest("filename is required".into()));
    }

    let name = query.filename;
    let asset = state.blocking(move |s| s.resolve_photo(&name)).await?;

    Ok(([(header::CONTENT_TYPE, asset.content_type)], asset.bytes).into_response())
}

async fn delete_photo(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let owner = state.authenticate(&headers)?.owner_id;
    state.blocking(move |s| s.detach_photo(&owner)).await?;

    Ok(Json(MessageResponse {
        message: "Photo deleted successfully",
    }))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use talant_shared::session::create_session_token;
    use talant_shared::{SessionClaims, SessionKeys};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "talant-test-boundary";
    const SECRET: &str = "auth-service-secret";
    const FORM: &str = "name=Anna&gender=f&age=30&job=Developer&school=MSU&skills=Rust%2C+Go&city=Kazan&jobtype=remote";

    struct TestApp {
        router: Router,
        keys: SessionKeys,
        dir: TempDir,
    }

    impl TestApp {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let config = ServerConfig {
                profile_document: dir.path().join("ankety.json"),
                upload_dir: dir.path().join("uploads"),
                max_photo_size: 1024,
                jwt_secret: SECRET.to_string(),
                ..Default::default()
            };
            let store = ProfileStore::new(config.profile_document.clone(), config.upload_dir.clone())
                .with_max_photo_size(config.max_photo_size);
            let state = AppState {
                store: Arc::new(store),
                verifier: Arc::new(SessionVerifier::new(&config.jwt_secret)),
                config: Arc::new(config),
            };
            Self {
                router: build_router(state),
                keys: SessionKeys::new(SECRET.as_bytes()),
                dir,
            }
        }

        fn cookie(&self, user: &str) -> String {
            let token = create_session_token(
                &SessionClaims::new(user, user, Duration::hours(1)),
                &self.keys.encoding,
            )
            .unwrap();
            format!("auth_token={token}")
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let body = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, body.to_vec())
        }

        async fn json(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
            let (status, body) = self.send(request).await;
            let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
            (status, value)
        }

        async fn create(&self, user: &str, form: &str) -> (StatusCode, serde_json::Value) {
            self.json(form_request("POST", "/api/create-ankety", &self.cookie(user), form))
                .await
        }
    }

    fn form_request(method: &str, uri: &str, cookie: &str, form: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn with_cookie(method: &str, uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn upload_request(cookie: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"me.png\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/upload-photo")
            .header(header::COOKIE, cookie)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let (status, body) = app.json(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_then_duplicate() {
        let app = TestApp::new();

        let (status, body) = app.create("u1", FORM).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Anketa created successfully");
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = app.create("u1", FORM).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].is_string());

        let (status, list) = app.json(get("/api/show-ankety")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["user_id"], "u1");
        assert_eq!(list[0]["jobtype"], "remote");
        assert_eq!(list[0]["skills"], "Rust, Go");

        let (status, mine) = app
            .json(with_cookie("GET", "/api/my-ankety", &app.cookie("u1")))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["id"], id.as_str());

        let (status, by_id) = app.json(get(&format!("/api/ankety/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(by_id["name"], "Anna");
    }

    #[tokio::test]
    async fn test_accepts_jwt_from_auth_service() {
        #[derive(serde::Serialize)]
        struct AuthServiceClaims {
            user_id: String,
            username: String,
            exp: i64,
            iat: i64,
        }

        let app = TestApp::new();
        let claims = AuthServiceClaims {
            user_id: "u7".into(),
            username: "vera".into(),
            exp: (Utc::now() + Duration::hours(24)).timestamp(),
            iat: Utc::now().timestamp(),
        };
        let jwt = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let cookie = format!("auth_token={jwt}");

        let (status, _) = app
            .send(form_request("POST", "/api/create-ankety", &cookie, FORM))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, mine) = app.json(with_cookie("GET", "/api/my-ankety", &cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine["user_id"], "u7");

        let expired = AuthServiceClaims {
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
            ..claims
        };
        let stale = encode(
            &Header::default(),
            &expired,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let (status, _) = app
            .send(with_cookie("GET", "/api/my-ankety", &format!("auth_token={stale}")))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let app = TestApp::new();
        let (status, body) = app.create("u1", "name=Anna&gender=f").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("missing required fields: age job school skills"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let app = TestApp::new();

        let request = Request::builder()
            .method("POST")
            .uri("/api/create-ankety")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(FORM))
            .unwrap();
        let (status, _) = app.send(request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .send(form_request("POST", "/api/create-ankety", "auth_token=garbage", FORM))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app.send(get("/api/my-ankety")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_update_own_and_foreign() {
        let app = TestApp::new();
        let (_, body) = app.create("u1", FORM).await;
        let id = body["id"].as_str().unwrap().to_string();

        let edit = format!("id={id}&name=Anya&gender=f&age=31&job=Lead&school=MSU&skills=Rust");

        let (status, _) = app
            .send(form_request("PUT", "/api/update-ankety", &app.cookie("u2"), &edit))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app
            .json(form_request("PUT", "/api/update-ankety", &app.cookie("u1"), &edit))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["anketa"]["name"], "Anya");
        assert_eq!(body["anketa"]["id"], id.as_str());

        let (status, _) = app
            .send(form_request(
                "POST",
                "/api/update-ankety",
                &app.cookie("u1"),
                "name=Anya",
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_and_stats() {
        let app = TestApp::new();
        app.create("u1", FORM).await;
        app.create(
            "u2",
            "name=Boris&gender=m&age=45&job=Designer&school=HSE&skills=Figma",
        )
        .await;

        let (status, body) = app
            .json(get("/api/ankety/search?gender=f&min_age=25&max_age=34"))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["name"], "Anna");

        let (status, body) = app.json(get("/api/ankety/search?skills=figma&city=")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);

        let (status, body) = app.json(get("/api/ankety/search?min_age=abc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request: min_age must be an integer");

        let (status, stats) = app.json(get("/api/ankety/stats")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stats["total"], 2);
        assert_eq!(stats["age_group_counts"]["25_34"], 1);
        assert_eq!(stats["age_group_counts"]["45_54"], 1);
        assert_eq!(stats["skill_counts"]["Rust"], 1);
        assert_eq!(stats["with_photo"], 0);
    }

    #[tokio::test]
    async fn test_photo_lifecycle() {
        let app = TestApp::new();
        let cookie = app.cookie("u1");
        app.create("u1", FORM).await;

        let (status, body) = app.json(upload_request(&cookie, "image/png", b"png-bytes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Photo uploaded successfully");
        let photo = body["photo"].as_str().unwrap().to_string();
        let name = photo.strip_prefix("photos/").unwrap().to_string();
        assert!(name.starts_with("u1_"));
        assert!(name.ends_with(".png"));

        let response = app
            .router
            .clone()
            .oneshot(get(&format!("/api/get-photo?filename={name}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"png-bytes");

        let (status, _) = app
            .send(with_cookie("DELETE", "/api/delete-photo", &cookie))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!app.dir.path().join("uploads").join(&photo).exists());

        let (status, _) = app
            .send(get(&format!("/api/get-photo?filename={name}")))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upload_rejections() {
        let app = TestApp::new();
        let cookie = app.cookie("u1");

        let (status, _) = app.send(upload_request(&cookie, "image/png", b"x")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        app.create("u1", FORM).await;

        let (status, _) = app.send(upload_request(&cookie, "text/plain", b"x")).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let (status, _) = app
            .send(upload_request(&cookie, "image/png", &[0u8; 2048]))
            .await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_photo_name_traversal() {
        let app = TestApp::new();

        let (status, _) = app.send(get("/api/get-photo?filename=..%2Fankety.json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.send(get("/api/get-photo?filename=..")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.send(get("/api/get-photo")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.send(get("/api/get-photo?filename=missing.png")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_ankety() {
        let app = TestApp::new();
        let cookie = app.cookie("u1");
        let (_, created) = app.create("u1", FORM).await;

        let (status, body) = app
            .json(with_cookie("DELETE", "/api/delete-ankety", &cookie))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], created["id"]);

        let (status, _) = app
            .send(with_cookie("DELETE", "/api/delete-ankety", &cookie))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.send(get("/api/ankety/unknown-id")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.create("u1", FORM).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}
