//! # フィードバックアラート API ハンドラ
//!
//! フィードバックアラート送出エンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /alerts/feedback` - アラート送出
//! - `OPTIONS /alerts/feedback` - CORS プリフライト（CORS 有効時のみ）

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use flashfeedback_domain::notification::FeedbackAlert;
use flashfeedback_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use crate::{
    error::validation_error_response,
    usecase::{AlertDispatcher, DispatchCommand, DispatchOutcome},
};

/// フィードバックアラート API の状態
pub struct AlertState {
    pub dispatcher: AlertDispatcher,
}

// --- リクエスト / レスポンス型 ---

/// フィードバックアラートのリクエストボディ
///
/// 必須フィールドの検証はデシリアライズ後にハンドラで行い、
/// 欠落は 422 ではなく 400 で報告する。
#[derive(Debug, Deserialize)]
pub struct FeedbackAlertRequest {
    #[serde(default)]
    pub business_id:     Option<String>,
    #[serde(default)]
    pub location_id:     Option<String>,
    #[serde(default)]
    pub location_name:   Option<String>,
    #[serde(default)]
    pub sentiment:       Option<String>,
    #[serde(default)]
    pub comments:        Option<String>,
    #[serde(default)]
    pub subject:         Option<String>,
    #[serde(default)]
    pub text:            Option<String>,
    #[serde(default)]
    pub html:            Option<String>,
    #[serde(default)]
    pub dashboard_url:   Option<String>,
    #[serde(default)]
    pub unsubscribe_url: Option<String>,
}

/// アラート送出成功データ
#[derive(Debug, Serialize)]
struct AlertSentData {
    status: &'static str,
}

// --- ハンドラ ---

/// POST /alerts/feedback
///
/// フィードバックアラートを送出する
pub async fn send_feedback_alert(
    State(state): State<Arc<AlertState>>,
    payload: Result<Json<FeedbackAlertRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return validation_error_response(&format!(
                "リクエストボディを JSON として解釈できません: {rejection}"
            ));
        }
    };

    let Some(business_id) = payload.business_id.filter(|v| !v.is_empty()) else {
        return validation_error_response("business_id は必須です");
    };

    let Some(location_id) = payload.location_id.filter(|v| !v.is_empty()) else {
        return validation_error_response("location_id は必須です");
    };

    let command = DispatchCommand {
        business_id,
        location_id,
        alert: FeedbackAlert {
            location_name:   payload.location_name,
            sentiment:       payload.sentiment,
            comments:        payload.comments,
            subject:         payload.subject,
            text:            payload.text,
            html:            payload.html,
            dashboard_url:   payload.dashboard_url,
            unsubscribe_url: payload.unsubscribe_url,
        },
    };

    match state.dispatcher.dispatch(command).await {
        Ok(DispatchOutcome::Sent) => (
            StatusCode::OK,
            Json(ApiResponse::new(AlertSentData { status: "sent" })),
        )
            .into_response(),
        Ok(DispatchOutcome::Suppressed) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

/// OPTIONS /alerts/feedback
///
/// CORS 有効時のプリフライト応答。バッキングストアにもプロバイダにも
/// 触れずに 200 を返す。CORS ヘッダー自体は `CorsLayer` が付与する。
pub async fn preflight() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
