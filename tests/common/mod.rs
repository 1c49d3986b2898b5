//! Shared setup for the router tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use mealweek::{
    AppState, Config,
    config::{ExportConfig, GenerationConfig, LoggingConfig, ServerConfig, SessionConfig},
};
pub use mealweek_generation::ScriptedClient;
use temp_dir::TempDir;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub client: Arc<ScriptedClient>,
    pub export_dir: TempDir,
}

pub fn create_test_config(export_dir: &TempDir) -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 3000,
        },
        generation: GenerationConfig {
            url: "http://127.0.0.1:9/api/generate".to_owned(),
            model: "llama3.2".to_owned(),
            timeout_secs: 1,
        },
        logging: LoggingConfig::default(),
        export: ExportConfig {
            directory: export_dir.path().display().to_string(),
            ..Default::default()
        },
        session: SessionConfig::default(),
    }
}

pub fn create_test_app(client: ScriptedClient) -> TestApp {
    create_test_app_with(client, |_| {})
}

/// Like [`create_test_app`] with a chance to adjust the config first.
pub fn create_test_app_with(
    client: ScriptedClient,
    configure: impl FnOnce(&mut Config),
) -> TestApp {
    let export_dir = TempDir::new().unwrap();
    let client = Arc::new(client);
    let mut config = create_test_config(&export_dir);
    configure(&mut config);
    let state = AppState::new(config, client.clone());

    TestApp {
        router: mealweek::server::app(state),
        client,
        export_dir,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str, session: Option<&str>) -> Response<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(id) = session {
            request = request.header(header::COOKIE, format!("mealweek_session={id}"));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, session: Option<&str>, form: &str) -> Response<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(id) = session {
            request = request.header(header::COOKIE, format!("mealweek_session={id}"));
        }

        self.router
            .clone()
            .oneshot(request.body(Body::from(form.to_owned())).unwrap())
            .await
            .unwrap()
    }

    /// Files written to the export directory.
    pub fn exported_files(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.export_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
