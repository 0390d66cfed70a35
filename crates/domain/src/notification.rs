//! # 通知
//!
//! フィードバックアラートに関するドメインモデルを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`FeedbackAlert`] | フィードバックアラートイベント | 1 件のフィードバックに対する通知要求 |
//! | [`EmailMessage`] | メールメッセージ | レンダリング済みの送信用メール |
//!
//! ## 設計方針
//!
//! - **上書きと既定値の分離**: 呼び出し元が件名・本文を明示した場合は
//!   そのまま使い、省略した場合のみ既定のテンプレートで補完する
//! - **レンダリング分離**: イベントとメール生成は分離する
//!   （レンダリングはアプリ層の責務）

use thiserror::Error;

/// 既定のメール件名
pub const DEFAULT_SUBJECT: &str = "New feedback received";

/// 通知送信エラー
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// メール送信処理に失敗（接続エラー、メッセージ構築失敗など）
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// プロバイダが送信リクエストを拒否（非 2xx レスポンス）
    ///
    /// `status` と `body` は呼び出し元にそのまま引き渡される。
    #[error("メールプロバイダが送信を拒否: status={status}")]
    Rejected {
        /// プロバイダが返した HTTP ステータスコード
        status: u16,
        /// プロバイダが返したエラー本文
        body:   String,
    },
}

/// フィードバックアラートイベント
///
/// 1 件のフィードバックに対する通知要求。表示用メタデータと、
/// 件名・本文の上書きフィールドを持つ。すべて省略可能で、
/// 省略されたものは既定値で補完される。
#[derive(Debug, Clone, Default)]
pub struct FeedbackAlert {
    /// 店舗名（表示用メタデータ）
    pub location_name:   Option<String>,
    /// フィードバックのセンチメント（表示用メタデータ）
    pub sentiment:       Option<String>,
    /// フィードバックのコメント本文（表示用メタデータ）
    pub comments:        Option<String>,
    /// 件名の上書き
    pub subject:         Option<String>,
    /// プレーンテキスト本文の上書き
    pub text:            Option<String>,
    /// HTML 本文の上書き
    pub html:            Option<String>,
    /// ダッシュボードへのリンク先 URL
    pub dashboard_url:   Option<String>,
    /// 配信停止リンクの URL
    pub unsubscribe_url: Option<String>,
}

impl FeedbackAlert {
    /// 件名を返す（上書きがなければ既定値）
    pub fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or(DEFAULT_SUBJECT)
    }
}

/// メールメッセージ
///
/// レンダリングの出力。NotificationSender に渡される。
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// 送信先メールアドレス
    pub to:        String,
    /// 件名
    pub subject:   String,
    /// HTML 本文
    pub html_body: String,
    /// プレーンテキスト本文
    pub text_body: String,
}
