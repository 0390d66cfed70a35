//! # HTTP ハンドラ
//!
//! アラートサービスのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /alerts/feedback` - フィードバックアラートの送出
//! - `GET /health` - ヘルスチェック

mod feedback;
mod health;

pub use feedback::{AlertState, FeedbackAlertRequest, preflight, send_feedback_alert};
pub use health::health_check;
