use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use stockroom_api::{
    config::AppConfig,
    db::{self, DbConfig},
    events::{self, EventSender},
    handlers::AppServices,
    AppState,
};
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

/// Helper harness for spinning up application state backed by an in-memory
/// SQLite database. Each instance gets its own database.
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
}

#[allow(dead_code)]
impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        // Named shared-cache memory database: unique per test, shared across
        // the pool's connections, dropped with the last connection.
        let db_url = format!(
            "sqlite:file:{}?mode=memory&cache=shared",
            Uuid::new_v4().simple()
        );

        let db_config = DbConfig {
            url: db_url.clone(),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        };

        let db_pool = db::establish_connection_with_config(&db_config)
            .await
            .expect("Failed to create DB pool");
        db::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");
        let db_arc = Arc::new(db_pool);

        let (event_tx, event_rx) = mpsc::channel(100);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), Arc::new(event_sender.clone()));

        let state = AppState {
            db: db_arc,
            config: AppConfig::new(
                db_url,
                "127.0.0.1".to_string(),
                18_080,
                "test".to_string(),
            ),
            event_sender,
            services,
        };

        let router = Router::new()
            .route("/health", get(stockroom_api::handlers::health::health))
            .nest("/api/v1", stockroom_api::api_v1_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _event_task: event_task,
        }
    }

    /// Issue a JSON request through the router and return status + parsed body.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body was not valid JSON")
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }
}
