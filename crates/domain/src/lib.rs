//! # FlashFeedback ドメイン層
//!
//! フィードバックアラート中継のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは読み取り専用の外部エンティティと通知イベントを表現する:
//!
//! - **エンティティ**: バッキングストア上のレコードのビュー（例: Business, Owner）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Email）
//! - **通知イベント**: フィードバックアラートとレンダリング済みメール
//! - **ドメインエラー**: バリデーション違反を表現するエラー型
//!
//! このサービスはエンティティを作成・変更・削除しない。
//! すべてのレコードはバッキングストアから読み取られるのみである。
//!
//! ## 依存関係の方向
//!
//! ```text
//! app → infra → domain → shared
//! ```
//!
//! ドメイン層はインフラ層（HTTP クライアント、外部サービス）には
//! 一切依存しない。

#[macro_use]
mod macros;

pub mod business;
pub mod error;
pub mod notification;
pub mod owner;

pub use error::DomainError;
