use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message shown when the delivery endpoint fails without saying why.
pub const DELIVERY_FAILED_MESSAGE: &str = "메일 전송에 실패했습니다.";

/// Body returned by the delivery endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeliveryResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeliveryResponse {
    pub fn accepted() -> Self {
        Self {
            ok: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
        }
    }

    /// Server message, or the generic failure message when there is none
    pub fn failure_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DELIVERY_FAILED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_omits_message() {
        let json = serde_json::to_value(DeliveryResponse::accepted()).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true }));
    }

    #[test]
    fn failure_message_falls_back_to_generic_text() {
        let bare: DeliveryResponse = serde_json::from_str(r#"{"ok":false}"#).unwrap();
        assert_eq!(bare.failure_message(), DELIVERY_FAILED_MESSAGE);

        let explained = DeliveryResponse::rejected("SMTP 서버 응답 없음");
        assert_eq!(explained.failure_message(), "SMTP 서버 응답 없음");
    }
}
