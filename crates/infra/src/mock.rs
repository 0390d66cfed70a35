//! # テスト用モック
//!
//! ユースケース・ハンドラテストで使用するインメモリモック。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! flashfeedback-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flashfeedback_domain::{
   business::{Business, BusinessId},
   notification::{EmailMessage, NotificationError},
   owner::{Owner, OwnerId},
};

use crate::{
   notification::NotificationSender,
   store::{BusinessStore, IdentityStore, StoreError},
};

// ===== MockBusinessStore =====

/// テスト用のインメモリ BusinessStore
///
/// ルックアップ回数を記録するため、「ストアに触れていないこと」の
/// 検証にも使用できる。
#[derive(Clone, Default)]
pub struct MockBusinessStore {
   businesses: Arc<Mutex<Vec<Business>>>,
   calls:      Arc<Mutex<usize>>,
}

impl MockBusinessStore {
   pub fn new() -> Self {
      Self::default()
   }

   /// ビジネスを登録する
   pub fn add_business(&self, business: Business) {
      self.businesses.lock().unwrap().push(business);
   }

   /// ルックアップが呼ばれた回数を返す
   pub fn call_count(&self) -> usize {
      *self.calls.lock().unwrap()
   }
}

#[async_trait]
impl BusinessStore for MockBusinessStore {
   async fn find_business(&self, id: &BusinessId) -> Result<Business, StoreError> {
      *self.calls.lock().unwrap() += 1;
      self
         .businesses
         .lock()
         .unwrap()
         .iter()
         .find(|b| b.id() == id)
         .cloned()
         .ok_or(StoreError::BusinessNotFound)
   }
}

// ===== MockIdentityStore =====

/// テスト用のインメモリ IdentityStore
#[derive(Clone, Default)]
pub struct MockIdentityStore {
   owners: Arc<Mutex<Vec<Owner>>>,
}

impl MockIdentityStore {
   pub fn new() -> Self {
      Self::default()
   }

   /// オーナーを登録する
   pub fn add_owner(&self, owner: Owner) {
      self.owners.lock().unwrap().push(owner);
   }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
   async fn find_owner(&self, id: &OwnerId) -> Result<Owner, StoreError> {
      self
         .owners
         .lock()
         .unwrap()
         .iter()
         .find(|o| o.id() == id)
         .cloned()
         .ok_or(StoreError::OwnerNotFound)
   }
}

// ===== MockNotificationSender =====

/// テスト用の NotificationSender
///
/// 送信されたメッセージを記録する。`failing()` で構築すると
/// 指定したエラーを返し、送信失敗パスを検証できる。
#[derive(Clone, Default)]
pub struct MockNotificationSender {
   sent:    Arc<Mutex<Vec<EmailMessage>>>,
   failure: Arc<Mutex<Option<NotificationError>>>,
}

impl MockNotificationSender {
   pub fn new() -> Self {
      Self::default()
   }

   /// 常に指定したエラーを返す送信モックを作成する
   pub fn failing(error: NotificationError) -> Self {
      Self {
         sent:    Arc::new(Mutex::new(Vec::new())),
         failure: Arc::new(Mutex::new(Some(error))),
      }
   }

   /// 送信されたメッセージの一覧を返す
   pub fn sent_emails(&self) -> Vec<EmailMessage> {
      self.sent.lock().unwrap().clone()
   }
}

#[async_trait]
impl NotificationSender for MockNotificationSender {
   async fn send_email(&self, email: &EmailMessage) -> Result<(), NotificationError> {
      if let Some(error) = self.failure.lock().unwrap().clone() {
         return Err(error);
      }
      self.sent.lock().unwrap().push(email.clone());
      Ok(())
   }
}

#[cfg(test)]
mod tests {
   use uuid::Uuid;

   use super::*;

   #[tokio::test]
   async fn mock_business_storeは登録済みビジネスを返す() {
      let store = MockBusinessStore::new();
      let id = BusinessId::from_uuid(Uuid::new_v4());
      store.add_business(Business::new(
         id.clone(),
         OwnerId::from_uuid(Uuid::new_v4()),
         Some(true),
      ));

      let business = store.find_business(&id).await.unwrap();
      assert_eq!(business.id(), &id);
      assert_eq!(store.call_count(), 1);
   }

   #[tokio::test]
   async fn mock_business_storeは未登録idでnot_foundを返す() {
      let store = MockBusinessStore::new();

      let result = store
         .find_business(&BusinessId::from_uuid(Uuid::new_v4()))
         .await;
      assert!(matches!(result, Err(StoreError::BusinessNotFound)));
   }

   #[tokio::test]
   async fn mock_notification_senderが送信メッセージを記録する() {
      let sender = MockNotificationSender::new();
      let email = EmailMessage {
         to:        "owner@example.com".to_string(),
         subject:   "New feedback received".to_string(),
         html_body: "<p>feedback</p>".to_string(),
         text_body: "feedback".to_string(),
      };

      sender.send_email(&email).await.unwrap();

      let sent = sender.sent_emails();
      assert_eq!(sent.len(), 1);
      assert_eq!(sent[0].to, "owner@example.com");
   }

   #[tokio::test]
   async fn failingは指定したエラーを返し記録しない() {
      let sender = MockNotificationSender::failing(NotificationError::Rejected {
         status: 422,
         body:   "invalid".to_string(),
      });
      let email = EmailMessage {
         to:        "owner@example.com".to_string(),
         subject:   "subject".to_string(),
         html_body: String::new(),
         text_body: String::new(),
      };

      let result = sender.send_email(&email).await;
      assert!(matches!(
         result,
         Err(NotificationError::Rejected { status: 422, .. })
      ));
      assert!(sender.sent_emails().is_empty());
   }
}
