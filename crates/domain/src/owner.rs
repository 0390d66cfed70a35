//! # オーナー
//!
//! ビジネスに紐づく識別レコード（オーナー）と、通知先となる
//! メールアドレス値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: OwnerId は UUID をラップし、型安全性を確保
//! - **バリデーション**: `Email` は生成時に検証ロジックを実行し、
//!   不正な値の作成を防ぐ

use serde::{Deserialize, Serialize};

use crate::DomainError;

define_uuid_id! {
    /// オーナー ID（一意識別子）
    ///
    /// 識別サブシステム上のユーザー ID。`businesses.owner_id` が参照する。
    pub struct OwnerId;
}

/// メールアドレス（値オブジェクト）
///
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式で、両側が空でない
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.chars().count() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは 255 文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// オーナー（ビジネスに紐づく識別レコード）
///
/// 識別サブシステムから取得する読み取り専用ビュー。
/// メールアドレスを持たないオーナーも存在しうる。
#[derive(Debug, Clone)]
pub struct Owner {
    id: OwnerId,
    email: Option<Email>,
}

impl Owner {
    /// 識別レコードからオーナーを構築する
    pub fn new(id: OwnerId, email: Option<Email>) -> Self {
        Self { id, email }
    }

    /// オーナー ID を返す
    pub fn id(&self) -> &OwnerId {
        &self.id
    }

    /// 通知先メールアドレスを返す
    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn emailは正しい形式で作成できる() {
        let email = Email::new("owner@example.com").unwrap();
        assert_eq!(email.as_str(), "owner@example.com");
        assert_eq!(email.to_string(), "owner@example.com");
    }

    #[rstest]
    #[case("")]
    #[case("no-at-sign")]
    #[case("@example.com")]
    #[case("local@")]
    fn emailは不正な形式を拒否する(#[case] value: &str) {
        assert!(Email::new(value).is_err());
    }

    #[test]
    fn emailは255文字を超える値を拒否する() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(Email::new(long).is_err());
    }

    #[test]
    fn ownerはメールアドレスなしで構築できる() {
        let owner = Owner::new(OwnerId::from_uuid(Uuid::new_v4()), None);
        assert!(owner.email().is_none());
    }

    #[test]
    fn ownerはメールアドレスを返す() {
        let email = Email::new("owner@example.com").unwrap();
        let owner = Owner::new(OwnerId::from_uuid(Uuid::new_v4()), Some(email.clone()));
        assert_eq!(owner.email(), Some(&email));
    }
}
