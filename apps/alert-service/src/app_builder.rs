//! # アプリケーション構築
//!
//! ルーター構築とミドルウェアレイヤーの適用を担当する。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderName, Method, header},
    routing::{get, post},
};
use flashfeedback_shared::observability::{MakeRequestUuidV7, make_request_span};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::AlertConfig,
    handler::{AlertState, health_check, preflight, send_feedback_alert},
};

/// ルーターを構築する
///
/// CORS は設定で切り替える。有効時は `OPTIONS /alerts/feedback`
/// への 200 応答と許可ヘッダーの付与を行い、無効時は `OPTIONS`
/// ルート自体を持たない（405 になる）。
pub fn build_app(config: &AlertConfig, state: Arc<AlertState>) -> Router {
    let feedback_routes = if config.cors_enabled {
        post(send_feedback_alert).options(preflight)
    } else {
        post(send_feedback_alert)
    };

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/alerts/feedback", feedback_routes)
        .with_state(state);

    if config.cors_enabled {
        app = app.layer(cors_layer());
    }

    // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
    // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID v7 を生成
    //    （またはクライアント提供値を使用）
    // 2. TraceLayer: カスタムスパンに request_id を含め、全ログに自動注入
    // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
    app.layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 許可リスト付きの CORS レイヤーを構築する
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ])
}
