//! # エラーハンドリング
//!
//! HTTP API のエラー定義と、axum レスポンスへの変換。
//!
//! エラー分類と HTTP ステータスの対応:
//!
//! | 分類 | ステータス |
//! |------|-----------|
//! | クライアント入力エラー（不正なボディ、必須フィールド欠落） | 400 |
//! | ルックアップ失敗（ビジネス / オーナーのメールアドレス） | 404 |
//! | プロバイダ未設定 | 500 |
//! | プロバイダ拒否 | プロバイダのステータスをそのまま返す |
//! | 送信処理の失敗（接続エラー等） | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flashfeedback_domain::notification::NotificationError;
use flashfeedback_shared::ErrorResponse;

use crate::usecase::AlertDispatchError;

// --- レスポンスヘルパー ---

/// バリデーションエラーレスポンス
pub fn validation_error_response(detail: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::validation_error(detail)),
    )
        .into_response()
}

/// 404 Not Found レスポンス
pub fn not_found_response(error_type_suffix: &str, title: &str, detail: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(error_type_suffix, title, 404, detail)),
    )
        .into_response()
}

/// 内部エラーレスポンス
pub fn internal_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error()),
    )
        .into_response()
}

// --- IntoResponse for AlertDispatchError ---

impl IntoResponse for AlertDispatchError {
    fn into_response(self) -> Response {
        match self {
            AlertDispatchError::BusinessNotFound => not_found_response(
                "business-not-found",
                "Business Not Found",
                "ビジネスが見つかりません",
            ),
            AlertDispatchError::OwnerEmailNotFound => not_found_response(
                "owner-email-not-found",
                "Owner Email Not Found",
                "オーナーのメールアドレスが見つかりません",
            ),
            AlertDispatchError::ProviderNotConfigured => {
                tracing::error!(
                    error.category = "configuration",
                    error.kind = "provider_key_missing",
                    "メールプロバイダが設定されていません"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(
                        "provider-not-configured",
                        "Email Provider Not Configured",
                        500,
                        "メールプロバイダが設定されていません",
                    )),
                )
                    .into_response()
            }
            AlertDispatchError::Send(NotificationError::Rejected { status, body }) => {
                // プロバイダのステータスコードをそのまま返す
                let status_code =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (
                    status_code,
                    Json(ErrorResponse::new(
                        "email-send-failed",
                        "Email Send Failed",
                        status_code.as_u16(),
                        format!("Email send failed: {body}"),
                    )),
                )
                    .into_response()
            }
            AlertDispatchError::Send(NotificationError::SendFailed(ref detail)) => {
                tracing::error!(
                    error.category = "external_service",
                    error.kind = "email_provider",
                    "メール送信で内部エラー: {}",
                    detail
                );
                internal_error_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn response_status_and_body(response: Response) -> (StatusCode, ErrorResponse) {
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        (status, error)
    }

    fn assert_error_type_ends_with(error: &ErrorResponse, suffix: &str) {
        assert!(
            error.error_type.ends_with(suffix),
            "expected error_type to end with '{}', got '{}'",
            suffix,
            error.error_type
        );
    }

    #[tokio::test]
    async fn business_not_foundで404() {
        let response = AlertDispatchError::BusinessNotFound.into_response();
        let (status, body) = response_status_and_body(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error_type_ends_with(&body, "/business-not-found");
    }

    #[tokio::test]
    async fn owner_email_not_foundで404() {
        let response = AlertDispatchError::OwnerEmailNotFound.into_response();
        let (status, body) = response_status_and_body(response).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error_type_ends_with(&body, "/owner-email-not-found");
    }

    #[tokio::test]
    async fn provider_not_configuredで500() {
        let response = AlertDispatchError::ProviderNotConfigured.into_response();
        let (status, body) = response_status_and_body(response).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_error_type_ends_with(&body, "/provider-not-configured");
    }

    #[tokio::test]
    async fn rejectedでプロバイダのステータスと本文を返す() {
        let response = AlertDispatchError::Send(NotificationError::Rejected {
            status: 422,
            body:   "Invalid `to` address".to_string(),
        })
        .into_response();
        let (status, body) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error_type_ends_with(&body, "/email-send-failed");
        assert!(
            body.detail.contains("Invalid `to` address"),
            "detail にプロバイダのエラー本文が含まれること: {}",
            body.detail
        );
    }

    #[tokio::test]
    async fn rejectedのステータスが不正な場合は502にフォールバックする() {
        let response = AlertDispatchError::Send(NotificationError::Rejected {
            status: 99,
            body:   "bogus".to_string(),
        })
        .into_response();
        let (status, _) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn send_failedで500() {
        let response =
            AlertDispatchError::Send(NotificationError::SendFailed("接続失敗".to_string()))
                .into_response();
        let (status, body) = response_status_and_body(response).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_error_type_ends_with(&body, "/internal-error");
    }
}
