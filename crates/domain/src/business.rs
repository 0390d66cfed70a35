//! # ビジネス
//!
//! フィードバックを受け取る事業者（ビジネス）のエンティティを定義する。
//!
//! ## 設計方針
//!
//! - **読み取り専用ビュー**: バッキングストアの `businesses`
//!   テーブルから取得したレコードのビュー。このサービスは変更しない。
//! - **三値のアラートフラグ**: `email_alerts_enabled` は未設定（NULL）
//!   でありうる。明示的に `false` の場合のみ送信を抑止する。

use crate::owner::OwnerId;

define_uuid_id! {
    /// ビジネス ID（一意識別子）
    ///
    /// businesses テーブルの主キー。バッキングストアが採番する。
    pub struct BusinessId;
}

/// ビジネス（フィードバックアラートの対象）
///
/// バッキングストアから `id, owner_id, email_alerts_enabled`
/// のみを射影して取得する。
#[derive(Debug, Clone)]
pub struct Business {
    id: BusinessId,
    owner_id: OwnerId,
    email_alerts_enabled: Option<bool>,
}

impl Business {
    /// ストアのレコードからビジネスを構築する
    pub fn new(id: BusinessId, owner_id: OwnerId, email_alerts_enabled: Option<bool>) -> Self {
        Self {
            id,
            owner_id,
            email_alerts_enabled,
        }
    }

    /// ビジネス ID を返す
    pub fn id(&self) -> &BusinessId {
        &self.id
    }

    /// オーナー ID を返す
    pub fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// メールアラートが明示的に無効化されているか
    ///
    /// フラグが未設定（NULL）の場合は有効とみなす。
    pub fn alerts_disabled(&self) -> bool {
        self.email_alerts_enabled == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn make_business(flag: Option<bool>) -> Business {
        Business::new(
            BusinessId::from_uuid(Uuid::new_v4()),
            OwnerId::from_uuid(Uuid::new_v4()),
            flag,
        )
    }

    #[test]
    fn alerts_disabledはfalseのときのみtrueを返す() {
        assert!(make_business(Some(false)).alerts_disabled());
        assert!(!make_business(Some(true)).alerts_disabled());
    }

    #[test]
    fn alerts_disabledはフラグ未設定のとき有効とみなす() {
        assert!(!make_business(None).alerts_disabled());
    }

    #[test]
    fn business_idの文字列表現はuuidと一致する() {
        let uuid = Uuid::new_v4();
        let id = BusinessId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }
}
