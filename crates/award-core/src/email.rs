//! Delivery email composition and SMTP settings checks.

use crate::models::Submission;

/// Keys that must all be set before the delivery endpoint can send mail.
pub const REQUIRED_SMTP_KEYS: [&str; 4] = ["SMTP_HOST", "SMTP_PORT", "SMTP_USER", "SMTP_PASS"];

const PLACEHOLDER: &str = "-";
const NO_ATTACHMENTS: &str = "첨부 없음";

/// Subject and plain-text body of a delivery email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub text: String,
}

/// Result of checking SMTP settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfigCheck {
    pub ok: bool,
    /// Missing keys, in `REQUIRED_SMTP_KEYS` order
    pub missing: Vec<&'static str>,
}

fn or_placeholder(value: &str) -> &str {
    if value.is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

/// Build the email that forwards a submission to the award committee.
pub fn build_email(submission: &Submission) -> EmailContent {
    let data = submission.data();
    let division = or_placeholder(&data.division);
    let nominee = or_placeholder(&data.nominee_name);
    let files = if submission.evidence_files().is_empty() {
        NO_ATTACHMENTS.to_string()
    } else {
        submission.evidence_files().join(", ")
    };

    let subject = format!("[Impact Award] {} 후보 추천 - {}", division, nominee);
    let text = [
        format!("접수번호: {}", or_placeholder(submission.receipt_number())),
        format!("부문: {}", division),
        format!("후보자: {} ({})", nominee, or_placeholder(&data.nominee_dept)),
        format!(
            "추천자: {} ({})",
            or_placeholder(&data.recommender_name),
            or_placeholder(&data.recommender_dept)
        ),
        format!("추천 사유: {}", or_placeholder(&data.reason)),
        format!("활동 내용: {}", or_placeholder(&data.achievement)),
        format!("증빙 자료: {}", files),
    ]
    .join("\n");

    EmailContent { subject, text }
}

/// Report which SMTP keys are missing or empty according to `lookup`.
pub fn validate_smtp_config<F>(lookup: F) -> SmtpConfigCheck
where
    F: Fn(&str) -> Option<String>,
{
    let missing: Vec<&'static str> = REQUIRED_SMTP_KEYS
        .iter()
        .copied()
        .filter(|key| lookup(key).map_or(true, |value| value.is_empty()))
        .collect();

    SmtpConfigCheck {
        ok: missing.is_empty(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EvidenceFile, RecommendationData};
    use chrono::Utc;
    use std::collections::HashMap;

    fn submission(files: &[EvidenceFile]) -> Submission {
        let data = RecommendationData {
            division: "MoonShot".to_string(),
            nominee_name: "홍길동".to_string(),
            nominee_dept: "디지털전략팀".to_string(),
            recommender_name: "김혜린".to_string(),
            recommender_dept: "경영기획팀".to_string(),
            reason: "성과 인정".to_string(),
            achievement: "신규 프로젝트".to_string(),
            ..Default::default()
        };
        Submission::new(
            data,
            files,
            "IA-20260101-120000-0001".to_string(),
            Utc::now(),
        )
    }

    #[test]
    fn builds_subject_and_body() {
        let email = build_email(&submission(&[EvidenceFile::new("report.pdf")]));
        assert_eq!(email.subject, "[Impact Award] MoonShot 후보 추천 - 홍길동");
        assert!(email.text.contains("접수번호: IA-20260101-120000-0001"));
        assert!(email.text.contains("후보자: 홍길동 (디지털전략팀)"));
        assert!(email.text.contains("추천자: 김혜린 (경영기획팀)"));
        assert!(email.text.ends_with("증빙 자료: report.pdf"));
    }

    #[test]
    fn notes_missing_attachments() {
        let email = build_email(&submission(&[]));
        assert!(email.text.contains("증빙 자료: 첨부 없음"));
    }

    #[test]
    fn blank_values_render_as_dash() {
        let blank = Submission::new(
            RecommendationData::default(),
            &[],
            String::new(),
            Utc::now(),
        );
        let email = build_email(&blank);
        assert_eq!(email.subject, "[Impact Award] - 후보 추천 - -");
        assert!(email.text.starts_with("접수번호: -\n"));
    }

    #[test]
    fn detects_missing_smtp_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", ""),
            ("SMTP_USER", "user"),
        ]);
        let result = validate_smtp_config(|key| env.get(key).map(|v| v.to_string()));
        assert!(!result.ok);
        assert_eq!(result.missing, vec!["SMTP_PORT", "SMTP_PASS"]);
    }

    #[test]
    fn complete_smtp_values_pass() {
        let result = validate_smtp_config(|_| Some("set".to_string()));
        assert!(result.ok);
        assert!(result.missing.is_empty());
    }
}
