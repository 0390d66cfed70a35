//! Resend 通知送信実装
//!
//! Resend API（`POST https://api.resend.com/emails`）を使用して
//! メールを送信する。本番環境で使用する。

use async_trait::async_trait;
use flashfeedback_domain::notification::{EmailMessage, NotificationError};
use serde::Serialize;

use super::NotificationSender;

/// Resend API のエンドポイント
const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Resend 通知送信
///
/// API キーによる Bearer 認証で Resend にメールを送信する。
/// 非 2xx レスポンスはステータスコードと本文を保持したまま
/// [`NotificationError::Rejected`] として呼び出し元に返す。
pub struct ResendNotificationSender {
    client:       reqwest::Client,
    api_key:      String,
    from_address: String,
}

/// Resend の送信リクエストボディ
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from:    &'a str,
    to:      &'a str,
    subject: &'a str,
    text:    &'a str,
    html:    &'a str,
}

impl ResendNotificationSender {
    /// 新しい Resend 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `api_key`: Resend の API キー
    /// - `from_address`: 送信元メールアドレス（Resend で検証済みであること）
    pub fn new(api_key: String, from_address: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            from_address,
        }
    }
}

#[async_trait]
impl NotificationSender for ResendNotificationSender {
    async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
        let payload = SendEmailRequest {
            from:    &self.from_address,
            to:      &email.to,
            subject: &email.subject,
            text:    &email.text_body,
            html:    &email.html_body,
        };

        let response = self
            .client
            .post(RESEND_API_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::SendFailed(format!("Resend への接続に失敗: {e}")))?;

        handle_send_response(response).await
    }
}

/// Resend レスポンスの共通ハンドリング
///
/// 2xx はすべて成功とみなす。非 2xx はステータスコードと
/// エラー本文を `Rejected` に詰めて返す。
async fn handle_send_response(response: reqwest::Response) -> Result<(), NotificationError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    let body = response.text().await.unwrap_or_default();
    Err(NotificationError::Rejected {
        status: status.as_u16(),
        body,
    })
}
