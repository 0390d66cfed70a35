//! バッキングストアクライアントのエラー型

use thiserror::Error;

/// バッキングストアクライアントエラー
#[derive(Debug, Clone, Error)]
pub enum StoreError {
   /// ビジネスが見つからない（404/406）
   #[error("ビジネスが見つかりません")]
   BusinessNotFound,

   /// オーナーが見つからない（404）
   #[error("オーナーが見つかりません")]
   OwnerNotFound,

   /// ネットワークエラー
   #[error("ネットワークエラー: {0}")]
   Network(String),

   /// 予期しないエラー
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

impl From<reqwest::Error> for StoreError {
   fn from(err: reqwest::Error) -> Self {
      StoreError::Network(err.to_string())
   }
}
