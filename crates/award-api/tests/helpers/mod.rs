//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p award-api`.

#![allow(dead_code)]

use async_trait::async_trait;
use award_api::constants;
use award_api::setup::routes;
use award_api::{AppState, MailError, Mailer};
use award_core::{Config, EmailContent};
use award_services::RecommendationService;
use award_storage::{JsonRecommendationStore, MemoryStorage};
use axum_test::TestServer;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const MAIL_TO: &str = "awards@example.com";

/// API path prefix for tests (e.g. `/api/draft`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Mailer double that records every message and can be told to fail.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(Vec<String>, EmailContent)>>,
    fail: AtomicBool,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(Vec<String>, EmailContent)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_next_sends(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &[String], content: &EmailContent) -> Result<(), MailError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(MailError::Transport("421 service not available".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_vec(), content.clone()));
        Ok(())
    }
}

/// Test application: server plus handles on its storage and mailer.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "STORAGE_BACKEND" => Some("memory".to_string()),
        "MAIL_TO" => Some(MAIL_TO.to_string()),
        _ => None,
    })
    .expect("test config")
}

async fn build_app(with_mailer: bool) -> TestApp {
    let config = test_config();
    let storage = MemoryStorage::new();
    let store = Arc::new(JsonRecommendationStore::new(Arc::new(storage.clone())));
    let recommendations = RecommendationService::from_config(store, &config);

    let mailer = Arc::new(RecordingMailer::default());
    let app_mailer: Option<Arc<dyn Mailer>> = if with_mailer {
        Some(mailer.clone())
    } else {
        None
    };

    let state = Arc::new(AppState::new(config.clone(), recommendations, app_mailer));
    let router = routes::setup_routes(&config, state).expect("routes");
    let server = TestServer::new(router).expect("test server");

    TestApp {
        server,
        storage,
        mailer,
    }
}

/// App with in-memory storage and a recording mailer.
pub async fn setup_test_app() -> TestApp {
    build_app(true).await
}

/// App whose SMTP settings are missing.
pub async fn setup_test_app_without_mailer() -> TestApp {
    build_app(false).await
}

/// Request body for a recommendation with every required field filled in.
pub fn complete_recommendation() -> Value {
    json!({
        "division": "MoonShot",
        "recommender_name": "김혜린",
        "recommender_dept": "전략기획팀",
        "recommender_email": "hyerin@example.com",
        "nominee_name": "홍길동",
        "nominee_dept": "연구개발팀",
        "reason": "신규 플랫폼 출시를 주도",
        "achievement": "출시 3개월 만에 사용자 2배 증가",
        "evidence_files": ["report.pdf", "chart.PNG"]
    })
}

/// Submit a complete recommendation and return the recorded submission.
pub async fn submit_complete(client: &TestServer) -> Value {
    let response = client
        .post(&api_path("/recommendations"))
        .json(&complete_recommendation())
        .await;
    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    body["submission"].clone()
}
