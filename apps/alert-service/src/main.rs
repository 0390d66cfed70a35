//! # アラートサービス サーバー
//!
//! フィードバックイベントを受け取り、ビジネスオーナーに
//! トランザクションメールを中継する単機能サービス。
//!
//! ## 役割
//!
//! 1 リクエストにつき、短い逐次フローを 1 回実行する:
//!
//! - **入力検証**: `business_id` と `location_id` の必須チェック
//! - **データルックアップ**: バッキングストアからビジネスとオーナーを取得
//! - **フラグ判定**: ビジネス単位のアラートフラグで送信を抑止
//! - **メール送信**: メールプロバイダへの 1 回の送信
//!
//! スケジューラ、キュー、リトライ、配信トラッキングは持たない。
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Feedback    │────▶│Alert Service │────▶│   Resend     │
//! │  Frontend    │     │              │     │  (Email API) │
//! └──────────────┘     └──────┬───────┘     └──────────────┘
//!                             │
//!                             ▼
//!                      ┌──────────────┐
//!                      │   Supabase   │
//!                      │ (PostgREST + │
//!                      │   GoTrue)    │
//!                      └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `ALERT_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `ALERT_PORT` | **Yes** | ポート番号 |
//! | `SUPABASE_URL` | No | バッキングストアの URL（未設定時はルックアップが失敗する） |
//! | `SUPABASE_SERVICE_ROLE_KEY` | No | サービスロールキー |
//! | `NOTIFICATION_BACKEND` | No | `resend`（既定）/ `smtp` / `noop` |
//! | `RESEND_API_KEY` | No | Resend の API キー（未設定時は送信リクエストが 500 になる） |
//! | `ALERTS_FROM_EMAIL` | No | 送信元メールアドレス |
//! | `CORS_ENABLED` | No | CORS の有効化（デフォルト: `true`） |
//! | `ALERT_TEMPLATE` | No | 既定 HTML テンプレート（`styled` / `plain`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p flashfeedback-alert-service
//!
//! # 本番環境（環境変数を直接指定）
//! ALERT_PORT=3000 RESEND_API_KEY=... cargo run -p flashfeedback-alert-service --release
//! ```

use std::{net::SocketAddr, sync::Arc};

use flashfeedback_alert_service::{
    app_builder::build_app,
    config::{AlertConfig, NotificationBackend},
    handler::AlertState,
    usecase::{AlertDispatcher, TemplateRenderer},
};
use flashfeedback_infra::{
    notification::{
        NoopNotificationSender,
        NotificationSender,
        ResendNotificationSender,
        SmtpNotificationSender,
    },
    store::{BusinessStore, IdentityStore, SupabaseStore},
};
use flashfeedback_shared::observability::TracingConfig;
use tokio::net::TcpListener;

/// アラートサービスのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. 依存関係の初期化とルーターの構築
/// 5. HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("alert-service");
    flashfeedback_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "alert-service").entered();

    // 設定読み込み
    let config = AlertConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "アラートサービスを起動します: {}:{}",
        config.host,
        config.port
    );

    if config.supabase_url.is_empty() || config.supabase_service_role_key.is_empty() {
        tracing::warn!("バッキングストアの認証情報が未設定です（ルックアップは失敗します）");
    }

    // 依存関係の初期化
    // 具象型で保持し、State 注入時に必要なトレイトオブジェクトへ coerce する
    let store = Arc::new(SupabaseStore::new(
        &config.supabase_url,
        &config.supabase_service_role_key,
    ));
    let business_store: Arc<dyn BusinessStore> = store.clone();
    let identity_store: Arc<dyn IdentityStore> = store;

    // 送信バックエンドの初期化
    // Resend でキーが未設定の場合は None（送信リクエストは 500 を返す）
    let sender: Option<Arc<dyn NotificationSender>> = match config.notification.backend {
        NotificationBackend::Resend => config.notification.resend_api_key.clone().map(|key| {
            Arc::new(ResendNotificationSender::new(
                key,
                config.notification.from_address.clone(),
            )) as Arc<dyn NotificationSender>
        }),
        NotificationBackend::Smtp => Some(Arc::new(SmtpNotificationSender::new(
            &config.notification.smtp_host,
            config.notification.smtp_port,
            config.notification.from_address.clone(),
        ))),
        NotificationBackend::Noop => Some(Arc::new(NoopNotificationSender)),
    };

    if sender.is_none() {
        tracing::warn!("RESEND_API_KEY が未設定です（送信リクエストは 500 を返します）");
    }

    let dispatcher = AlertDispatcher::new(
        business_store,
        identity_store,
        sender,
        TemplateRenderer::new(config.notification.template),
    );
    let state = Arc::new(AlertState { dispatcher });

    // ルーター構築
    let app = build_app(&config, state);

    // サーバー起動
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("アラートサービスが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
