//! Supabase バッキングストアクライアント実装
//!
//! ビジネスレコードは PostgREST（`/rest/v1/businesses`）、
//! オーナーレコードは GoTrue 管理 API（`/auth/v1/admin/users/{id}`）
//! から取得する。どちらもサービスロールキーで認証する。

use async_trait::async_trait;
use flashfeedback_domain::{
   business::{Business, BusinessId},
   owner::{Email, Owner, OwnerId},
};
use serde::Deserialize;
use uuid::Uuid;

use super::{BusinessStore, IdentityStore, error::StoreError};

/// PostgREST に単一オブジェクトを要求する Accept ヘッダー値
///
/// 行が存在しない場合、PostgREST は 406 Not Acceptable を返す。
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Supabase ストアクライアント
///
/// `BusinessStore` と `IdentityStore` の両方を実装する。
#[derive(Clone)]
pub struct SupabaseStore {
   base_url:         String,
   service_role_key: String,
   client:           reqwest::Client,
}

impl SupabaseStore {
   /// 新しい Supabase ストアクライアントを作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: プロジェクトの URL（例: `https://xyz.supabase.co`）
   /// - `service_role_key`: サービスロールキー
   pub fn new(base_url: &str, service_role_key: &str) -> Self {
      Self {
         base_url:         base_url.trim_end_matches('/').to_string(),
         service_role_key: service_role_key.to_string(),
         client:           reqwest::Client::new(),
      }
   }

   /// サービスロールキーで認証ヘッダーを付与する
   fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
      request
         .header("apikey", &self.service_role_key)
         .bearer_auth(&self.service_role_key)
   }
}

#[async_trait]
impl BusinessStore for SupabaseStore {
   async fn find_business(&self, id: &BusinessId) -> Result<Business, StoreError> {
      let url = format!(
         "{}/rest/v1/businesses?id=eq.{}&select=id,owner_id,email_alerts_enabled",
         self.base_url,
         urlencoding::encode(&id.to_string()),
      );

      let response = self
         .authed(self.client.get(&url))
         .header("Accept", PGRST_OBJECT)
         .send()
         .await?;
      parse_business_response(response).await
   }
}

#[async_trait]
impl IdentityStore for SupabaseStore {
   async fn find_owner(&self, id: &OwnerId) -> Result<Owner, StoreError> {
      let url = format!("{}/auth/v1/admin/users/{}", self.base_url, id);

      let response = self.authed(self.client.get(&url)).send().await?;
      parse_owner_response(id, response).await
   }
}

// --- レスポンスハンドリング ---

/// businesses テーブルの行
#[derive(Debug, Deserialize)]
struct BusinessRow {
   id: Uuid,
   owner_id: Uuid,
   email_alerts_enabled: Option<bool>,
}

/// GoTrue 管理 API のユーザーレコード
#[derive(Debug, Deserialize)]
struct IdentityUser {
   #[serde(default)]
   email: Option<String>,
}

/// ビジネスルックアップのレスポンスを処理する
///
/// 成功時は行を `Business` に変換する。404 と 406（単一オブジェクト
/// 要求で行なし）は `BusinessNotFound` として扱う。
async fn parse_business_response(response: reqwest::Response) -> Result<Business, StoreError> {
   let status = response.status();

   if status.is_success() {
      let row = response.json::<BusinessRow>().await?;
      return Ok(Business::new(
         BusinessId::from_uuid(row.id),
         OwnerId::from_uuid(row.owner_id),
         row.email_alerts_enabled,
      ));
   }

   if status == reqwest::StatusCode::NOT_FOUND || status == reqwest::StatusCode::NOT_ACCEPTABLE {
      return Err(StoreError::BusinessNotFound);
   }

   let body = response.text().await.unwrap_or_default();
   Err(StoreError::Unexpected(format!(
      "予期しないステータス {status}: {body}"
   )))
}

/// オーナールックアップのレスポンスを処理する
///
/// 形式が不正なメールアドレスはメールアドレスなしとして扱う。
async fn parse_owner_response(
   id: &OwnerId,
   response: reqwest::Response,
) -> Result<Owner, StoreError> {
   let status = response.status();

   if status.is_success() {
      let user = response.json::<IdentityUser>().await?;
      let email = user.email.and_then(|value| Email::new(value).ok());
      return Ok(Owner::new(id.clone(), email));
   }

   if status == reqwest::StatusCode::NOT_FOUND {
      return Err(StoreError::OwnerNotFound);
   }

   let body = response.text().await.unwrap_or_default();
   Err(StoreError::Unexpected(format!(
      "予期しないステータス {status}: {body}"
   )))
}
