//! Helpers for the `award` command-line tool.

use anyhow::{Context, Result};
use award_core::{EvidenceFile, RecommendationData};
use award_services::{DeliveryClient, RecommendationService, SubmissionReceipt};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

/// Shown when a submission fails validation.
pub const SUBMISSION_REJECTED_MESSAGE: &str = "필수 항목 또는 파일 형식을 확인해주세요.";

const NO_ATTACHMENTS: &str = "첨부 없음";

/// Read a draft from a JSON file. Missing fields default to empty.
pub fn read_draft_file(path: &Path) -> Result<RecommendationData> {
    let raw = std::fs::read(path)
        .with_context(|| format!("Failed to read draft file {}", path.display()))?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("{} is not a recommendation draft", path.display()))
}

pub fn evidence_files(names: &[String]) -> Vec<EvidenceFile> {
    names.iter().map(|name| EvidenceFile::new(name.as_str())).collect()
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

/// Review-step summary of a recommendation, one field per line.
pub fn render_summary(data: &RecommendationData, files: &[String]) -> String {
    let files = if files.is_empty() {
        NO_ATTACHMENTS.to_string()
    } else {
        files.join(", ")
    };

    [
        format!("부문: {}", or_dash(&data.division)),
        format!(
            "추천자: {} ({})",
            or_dash(&data.recommender_name),
            or_dash(&data.recommender_dept)
        ),
        format!("이메일: {}", or_dash(&data.recommender_email)),
        format!(
            "후보자: {} ({})",
            or_dash(&data.nominee_name),
            or_dash(&data.nominee_dept)
        ),
        format!("추천 사유: {}", or_dash(&data.reason)),
        format!("활동 내용: {}", or_dash(&data.achievement)),
        format!("증빙 자료: {}", files),
    ]
    .join("\n")
}

/// How `award submit` ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was recorded
    Rejected { errors: Option<Value> },
    /// Recorded locally and, unless skipped, delivered
    Recorded {
        receipt: SubmissionReceipt,
        delivered: bool,
    },
    /// Recorded locally but the delivery endpoint failed
    DeliveryFailed {
        receipt: SubmissionReceipt,
        message: String,
    },
}

impl SubmitOutcome {
    /// 0 on success, 1 when rejected, 2 when recorded but not delivered
    pub fn exit_code(&self) -> u8 {
        match self {
            SubmitOutcome::Recorded { .. } => 0,
            SubmitOutcome::Rejected { .. } => 1,
            SubmitOutcome::DeliveryFailed { .. } => 2,
        }
    }

    pub fn report(&self) -> Value {
        match self {
            SubmitOutcome::Rejected { errors } => json!({ "ok": false, "errors": errors }),
            SubmitOutcome::Recorded { receipt, delivered } => json!({
                "ok": true,
                "receipt_number": receipt.receipt_number,
                "delivered": delivered,
            }),
            SubmitOutcome::DeliveryFailed { receipt, message } => json!({
                "ok": false,
                "receipt_number": receipt.receipt_number,
                "delivered": false,
                "message": message,
            }),
        }
    }
}

/// Record a submission locally, then hand it to `delivery` if given.
///
/// Storage failures are errors. Validation and delivery failures are outcomes.
pub async fn submit(
    service: &RecommendationService,
    delivery: Option<&DeliveryClient>,
    data: RecommendationData,
    files: &[EvidenceFile],
) -> Result<SubmitOutcome> {
    let receipt = match service.submit_recommendation(data, files).await {
        Ok(receipt) => receipt,
        Err(e) if e.is_validation() => {
            return Ok(SubmitOutcome::Rejected { errors: e.errors() });
        }
        Err(e) => return Err(e).context("Failed to record submission"),
    };

    let Some(client) = delivery else {
        return Ok(SubmitOutcome::Recorded {
            receipt,
            delivered: false,
        });
    };

    match client.deliver(&receipt.submission).await {
        Ok(()) => Ok(SubmitOutcome::Recorded {
            receipt,
            delivered: true,
        }),
        Err(e) => {
            tracing::error!(
                receipt_number = %receipt.receipt_number,
                error = %e,
                "Delivery failed after local persistence"
            );
            Ok(SubmitOutcome::DeliveryFailed {
                receipt,
                message: e.user_message(),
            })
        }
    }
}

pub fn print_json(value: &impl Serialize) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_core::DeliveryResponse;
    use award_storage::{JsonRecommendationStore, MemoryStorage};
    use axum::routing::post;
    use axum::{Json, Router};
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;

    fn service() -> RecommendationService {
        let store = JsonRecommendationStore::new(Arc::new(MemoryStorage::new()));
        RecommendationService::with_default_extensions(Arc::new(store))
    }

    fn complete() -> RecommendationData {
        RecommendationData {
            division: "MoonShot".to_string(),
            recommender_name: "김혜린".to_string(),
            recommender_dept: "전략기획팀".to_string(),
            recommender_email: String::new(),
            nominee_name: "홍길동".to_string(),
            nominee_dept: "연구개발팀".to_string(),
            reason: "신규 플랫폼 출시를 주도".to_string(),
            achievement: "사용자 2배 증가".to_string(),
        }
    }

    async fn delivery_endpoint(router: Router) -> DeliveryClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        DeliveryClient::new(format!("http://{}/api/submit", addr), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn submit_rejected_exits_with_one() {
        let service = service();
        let data = RecommendationData {
            reason: String::new(),
            ..complete()
        };

        let outcome = submit(&service, None, data, &[]).await.unwrap();

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.report()["ok"], false);
        assert!(outcome.report()["errors"]["reason"].is_string());
        assert!(service.list_submissions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_with_bad_evidence_exits_with_one() {
        let outcome = submit(&service(), None, complete(), &evidence_files(&["run.exe".to_string()]))
            .await
            .unwrap();
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.report()["errors"]["evidence_files"][0], "run.exe");
    }

    #[tokio::test]
    async fn submit_without_delivery_records_and_exits_with_zero() {
        let service = service();
        let outcome = submit(&service, None, complete(), &[]).await.unwrap();

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(outcome.report()["delivered"], false);
        assert_eq!(service.list_submissions().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn submit_delivered_exits_with_zero() {
        let client = delivery_endpoint(Router::new().route(
            "/api/submit",
            post(|| async { Json(DeliveryResponse::accepted()) }),
        ))
        .await;

        let outcome = submit(&service(), Some(&client), complete(), &[]).await.unwrap();
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(outcome.report()["delivered"], true);
    }

    #[tokio::test]
    async fn delivery_failure_keeps_receipt_and_exits_with_two() {
        let client = delivery_endpoint(Router::new().route(
            "/api/submit",
            post(|| async { Json(DeliveryResponse::rejected("수신자 없음")) }),
        ))
        .await;
        let service = service();

        let outcome = submit(&service, Some(&client), complete(), &[]).await.unwrap();

        assert_eq!(outcome.exit_code(), 2);
        let report = outcome.report();
        assert_eq!(report["message"], "수신자 없음");
        let recorded = service.list_submissions().await.unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(report["receipt_number"], recorded[0].receipt_number());
    }

    #[test]
    fn summary_uses_placeholders() {
        let data = RecommendationData {
            division: "MoonShot".to_string(),
            nominee_name: "홍길동".to_string(),
            ..Default::default()
        };
        let summary = render_summary(&data, &[]);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines[0], "부문: MoonShot");
        assert_eq!(lines[1], "추천자: - (-)");
        assert_eq!(lines[3], "후보자: 홍길동 (-)");
        assert_eq!(lines[6], "증빙 자료: 첨부 없음");
    }

    #[test]
    fn summary_lists_files() {
        let summary = render_summary(
            &RecommendationData::default(),
            &["a.pdf".to_string(), "b.png".to_string()],
        );
        assert!(summary.ends_with("증빙 자료: a.pdf, b.png"));
    }

    #[test]
    fn reads_partial_draft_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"division":"MoonShot","unknown":1}}"#).unwrap();

        let draft = read_draft_file(file.path()).unwrap();
        assert_eq!(draft.division, "MoonShot");
        assert_eq!(draft.reason, "");
    }

    #[test]
    fn rejects_non_object_draft_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        assert!(read_draft_file(file.path()).is_err());
    }
}
