//! # アラートサービス設定
//!
//! 環境変数からアラートサービスの設定を読み込む。
//!
//! バッキングストアの認証情報は必須にしない。未設定の場合は
//! ルックアップが失敗するだけで、起動自体は成功する。

use std::env;

use strum::EnumString;

/// アラートサービスの設定
#[derive(Debug, Clone)]
pub struct AlertConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// バッキングストア（Supabase プロジェクト）の URL
   pub supabase_url: String,
   /// バッキングストアのサービスロールキー
   pub supabase_service_role_key: String,
   /// CORS ヘッダーの付与と OPTIONS 応答の有効化
   pub cors_enabled: bool,
   /// 通知設定
   pub notification: NotificationConfig,
}

/// 通知機能の設定
///
/// `NOTIFICATION_BACKEND` 環境変数で送信バックエンドを切り替える:
/// - `resend`: Resend API 経由で送信（本番）
/// - `smtp`: Mailpit（開発）/ SMTP サーバー経由で送信
/// - `noop`: 送信しない（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NotificationConfig {
   /// 送信バックエンド
   pub backend:        NotificationBackend,
   /// Resend API キー（backend=resend の場合に使用）
   ///
   /// 未設定のままリクエストを受けると 500 を返す。
   pub resend_api_key: Option<String>,
   /// SMTP ホスト（backend=smtp の場合に使用）
   pub smtp_host:      String,
   /// SMTP ポート（backend=smtp の場合に使用）
   pub smtp_port:      u16,
   /// 送信元メールアドレス
   pub from_address:   String,
   /// 既定 HTML 本文のテンプレート
   pub template:       EmailTemplate,
}

/// 通知送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationBackend {
   /// Resend API（本番用）
   #[default]
   Resend,
   /// SMTP（Mailpit 開発用）
   Smtp,
   /// 送信しない（ログ出力のみ）
   Noop,
}

/// 既定 HTML 本文のテンプレート種別
///
/// 装飾付き（styled）と最小限（plain）の 2 種類を
/// `ALERT_TEMPLATE` 環境変数で切り替える。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum EmailTemplate {
   /// 装飾付き HTML（既定）
   #[default]
   Styled,
   /// 最小限の HTML
   Plain,
}

/// 既定の送信元メールアドレス
const DEFAULT_FROM_ADDRESS: &str = "alerts@alerts.flashfeedback.co.uk";

impl AlertConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, env::VarError> {
      Ok(Self {
         host: env::var("ALERT_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
         port: env::var("ALERT_PORT")
            .expect("ALERT_PORT が設定されていません")
            .parse()
            .expect("ALERT_PORT は有効なポート番号である必要があります"),
         supabase_url: env::var("SUPABASE_URL").unwrap_or_default(),
         supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY").unwrap_or_default(),
         cors_enabled: parse_cors_enabled(env::var("CORS_ENABLED").ok().as_deref()),
         notification: NotificationConfig::from_env(),
      })
   }
}

impl NotificationConfig {
   /// 環境変数から通知設定を読み込む
   fn from_env() -> Self {
      Self {
         backend:        env::var("NOTIFICATION_BACKEND")
            .map(|v| {
               v.parse()
                  .expect("NOTIFICATION_BACKEND は resend | smtp | noop のいずれか")
            })
            .unwrap_or_default(),
         resend_api_key: env::var("RESEND_API_KEY").ok().filter(|v| !v.is_empty()),
         smtp_host:      env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string()),
         smtp_port:      env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("SMTP_PORT は有効なポート番号である必要があります"),
         from_address:   env::var("ALERTS_FROM_EMAIL")
            .unwrap_or_else(|_| DEFAULT_FROM_ADDRESS.to_string()),
         template:       env::var("ALERT_TEMPLATE")
            .map(|v| v.parse().expect("ALERT_TEMPLATE は styled | plain のいずれか"))
            .unwrap_or_default(),
      }
   }
}

/// CORS_ENABLED の値をパースする
///
/// 未設定の場合は有効（true）。`false` を明示した場合のみ無効になる。
fn parse_cors_enabled(value: Option<&str>) -> bool {
   match value {
      Some(v) => !v.eq_ignore_ascii_case("false"),
      None => true,
   }
}
