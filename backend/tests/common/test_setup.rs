use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use contact_storage::contact::ContactStorage;
use contact_storage::store::InMemoryStore;
use contact_storage::table::Throughput;
use contacts_backend::{
    readiness::{provision_table, Readiness},
    server,
    types::{AwsSettings, Config, Environment},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const TEST_TABLE_NAME: &str = "Contacts";

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Builds a configuration that never touches the environment
pub fn test_config(static_dir: Option<PathBuf>) -> Config {
    Config {
        environment: Environment::Development,
        table_name: TEST_TABLE_NAME.to_string(),
        throughput: Throughput::default(),
        aws: AwsSettings {
            region: "us-east-1".to_string(),
            credentials: None,
            endpoint_url: None,
        },
        request_timeout: Duration::from_secs(5),
        static_dir,
        port: 0,
    }
}

/// Router wired to an in-memory store
pub struct TestSetup {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub readiness: Readiness,
}

impl TestSetup {
    /// Creates a setup whose contacts table has been provisioned
    pub async fn new() -> Self {
        Self::build(true, test_config(None)).await
    }

    /// Creates a setup where startup provisioning failed
    pub async fn unprovisioned() -> Self {
        Self::build(false, test_config(None)).await
    }

    /// Creates a provisioned setup serving static files from `static_dir`
    pub async fn with_static_dir(static_dir: PathBuf) -> Self {
        Self::build(true, test_config(Some(static_dir))).await
    }

    /// Creates a provisioned setup with a custom request timeout
    pub async fn with_request_timeout(request_timeout: Duration) -> Self {
        let config = Config {
            request_timeout,
            ..test_config(None)
        };
        Self::build(true, config).await
    }

    async fn build(provisioned: bool, config: Config) -> Self {
        setup_test_env();

        let store = Arc::new(InMemoryStore::new());
        let readiness = Readiness::new();

        if !provisioned {
            store.set_unavailable(true);
        }
        provision_table(store.as_ref(), &config.table_spec(), &readiness).await;
        store.set_unavailable(false);

        let contact_storage = Arc::new(ContactStorage::new(
            store.clone(),
            config.table_name.clone(),
        ));
        let router = server::router(&config, contact_storage, readiness.clone());

        Self {
            router,
            store,
            readiness,
        }
    }

    pub async fn send_request(
        &self,
        method: Method,
        route: &str,
        body: Option<(&str, String)>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder().uri(route).method(method);

        let body = match body {
            Some((content_type, payload)) => {
                builder = builder.header(header::CONTENT_TYPE, content_type);
                Body::from(payload)
            }
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(builder.body(body)?).await?;
        Ok(response)
    }

    /// Sends `POST /add` with the given content type (if any) and raw body
    pub async fn add_raw(&self, content_type: Option<&str>, body: &str) -> Response {
        let mut builder = Request::builder().uri("/add").method(Method::POST);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }

        self.router
            .clone()
            .oneshot(builder.body(Body::from(body.to_string())).unwrap())
            .await
            .expect("Failed to send request")
    }

    pub async fn add_json(&self, payload: serde_json::Value) -> Response {
        self.send_request(
            Method::POST,
            "/add",
            Some(("application/json", payload.to_string())),
        )
        .await
        .expect("Failed to send request")
    }

    pub async fn add_form(&self, payload: &str) -> Response {
        self.send_request(
            Method::POST,
            "/add",
            Some(("application/x-www-form-urlencoded", payload.to_string())),
        )
        .await
        .expect("Failed to send request")
    }

    pub async fn list(&self) -> Response {
        self.send_request(Method::GET, "/contacts", None)
            .await
            .expect("Failed to send request")
    }

    pub async fn delete(&self, id: &str) -> Response {
        self.send_request(Method::DELETE, &format!("/delete/{id}"), None)
            .await
            .expect("Failed to send request")
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Read response body as text
pub async fn response_text(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}
