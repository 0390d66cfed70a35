//! # FlashFeedback アラートサービス ライブラリ
//!
//! フィードバックアラート中継サービスのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `app_builder`: DI とルーター構築
//! - `config`: 環境変数からの設定読み込み
//! - `error`: エラーから HTTP レスポンスへの変換
//! - `handler`: HTTP ハンドラ
//! - `usecase`: アラート送出ロジックとテンプレートレンダリング

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
