//! # テンプレートレンダラー
//!
//! フィードバックアラートから送信用メールを HTML/plaintext
//! 両形式で生成する。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: テンプレートはバイナリに埋め込まれる
//! - **プレースホルダ置換のみ**: テンプレートエンジンは使用せず、
//!   `{dashboard_url}` 等の固定プレースホルダを `str::replace` で差し替える
//! - **上書き優先**: イベントが件名・本文を明示している場合はそのまま使う

use chrono::{Datelike, Utc};
use flashfeedback_domain::{
    notification::{EmailMessage, FeedbackAlert},
    owner::Email,
};

use crate::config::EmailTemplate;

/// 装飾付き HTML テンプレート
const STYLED_HTML: &str = include_str!("../../templates/feedback_alert_styled.html");

/// 最小限の HTML テンプレート
const PLAIN_HTML: &str = include_str!("../../templates/feedback_alert_plain.html");

/// メールクライアントの一覧画面に表示されるプレビューテキスト
const PREVIEW_TEXT: &str = "You received new feedback. View it on your dashboard.";

/// テンプレートレンダラー
///
/// `FeedbackAlert` から `EmailMessage` を生成する。
/// HTML テンプレートは設定（`ALERT_TEMPLATE`）で選択する。
#[derive(Debug, Clone, Copy)]
pub struct TemplateRenderer {
    template: EmailTemplate,
}

impl TemplateRenderer {
    /// 新しいレンダラーインスタンスを作成
    pub fn new(template: EmailTemplate) -> Self {
        Self { template }
    }

    /// フィードバックアラートからメールメッセージを生成する
    ///
    /// # 引数
    ///
    /// - `to`: 送信先メールアドレス
    /// - `alert`: フィードバックアラートイベント
    pub fn render(&self, to: &Email, alert: &FeedbackAlert) -> EmailMessage {
        let subject = alert.subject().to_string();

        let text_body = alert
            .text
            .clone()
            .unwrap_or_else(|| default_text_body(alert.dashboard_url.as_deref()));

        let html_body = alert
            .html
            .clone()
            .unwrap_or_else(|| self.default_html_body(alert));

        EmailMessage {
            to: to.as_str().to_string(),
            subject,
            html_body,
            text_body,
        }
    }

    /// 既定の HTML 本文を生成する
    ///
    /// リンク先が未指定の場合は `#` にフォールバックする。
    fn default_html_body(&self, alert: &FeedbackAlert) -> String {
        let dashboard_url = alert.dashboard_url.as_deref().unwrap_or("#");
        let unsubscribe_url = alert.unsubscribe_url.as_deref().unwrap_or("#");

        let template = match self.template {
            EmailTemplate::Styled => STYLED_HTML,
            EmailTemplate::Plain => PLAIN_HTML,
        };

        template
            .replace("{preview_text}", PREVIEW_TEXT)
            .replace("{dashboard_url}", dashboard_url)
            .replace("{unsubscribe_url}", unsubscribe_url)
            .replace("{year}", &Utc::now().year().to_string())
    }
}

/// 既定のプレーンテキスト本文を生成する
///
/// リンク先が未指定の場合は URL 部分を空にして末尾をトリムする。
fn default_text_body(dashboard_url: Option<&str>) -> String {
    let url = dashboard_url.unwrap_or("");
    format!("You received new feedback. View it here: {url}")
        .trim()
        .to_string()
}
