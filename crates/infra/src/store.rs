//! # バッキングストアクライアント
//!
//! ビジネス・オーナーレコードの読み取りを担当するモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `BusinessStore` / `IdentityStore`
//!   でルックアップを抽象化し、テストではインメモリモックに差し替える
//! - **読み取り専用**: このサービスはストアに書き込まない

mod error;
mod supabase;

use async_trait::async_trait;
pub use error::StoreError;
use flashfeedback_domain::{
   business::{Business, BusinessId},
   owner::{Owner, OwnerId},
};
pub use supabase::SupabaseStore;

/// ビジネスレコードのルックアップトレイト
#[async_trait]
pub trait BusinessStore: Send + Sync {
   /// ビジネスを ID で取得する
   ///
   /// 存在しない場合は [`StoreError::BusinessNotFound`] を返す。
   async fn find_business(&self, id: &BusinessId) -> Result<Business, StoreError>;
}

/// オーナー（識別レコード）のルックアップトレイト
#[async_trait]
pub trait IdentityStore: Send + Sync {
   /// オーナーの識別レコードを ID で取得する
   ///
   /// 存在しない場合は [`StoreError::OwnerNotFound`] を返す。
   async fn find_owner(&self, id: &OwnerId) -> Result<Owner, StoreError>;
}
