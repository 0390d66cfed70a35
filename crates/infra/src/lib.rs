//! # FlashFeedback インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **バッキングストアクライアント**: ビジネス・オーナーレコードの
//!   読み取り（Supabase: PostgREST + GoTrue 管理 API）
//! - **通知送信**: メールプロバイダへの送信（Resend / SMTP / Noop）
//!
//! ## 依存関係
//!
//! ```text
//! app → infra → domain → shared
//! ```
//!
//! インフラ層は `domain` に依存する。
//! ドメイン層はインフラ層に依存しない（依存性逆転の原則）。
//!
//! ## モジュール構成
//!
//! - [`store`] - バッキングストアクライアント
//! - [`notification`] - 通知送信
//! - [`mock`] - テスト用モック（`test-utils` feature 有効時のみ）

pub mod notification;
pub mod store;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use store::{BusinessStore, IdentityStore, StoreError, SupabaseStore};
