//! # アラート送出ユースケース
//!
//! フィードバックアラート 1 件の送出フローを統合する:
//! ビジネス取得 → アラートフラグ判定 → オーナーのメールアドレス解決
//! → レンダリング → プロバイダ送信。
//!
//! ## 設計方針
//!
//! - **逐次実行**: 各ステップの失敗はその時点でリクエストを終了させる。
//!   リトライや内部リカバリは行わず、すべて呼び出し元に返す
//! - **抑止は成功**: アラート無効によるスキップはエラーではなく
//!   [`DispatchOutcome::Suppressed`] として返す
//! - **依存性注入**: ストアと送信は trait で抽象化する

use std::sync::Arc;

use flashfeedback_domain::{
    business::BusinessId,
    notification::{FeedbackAlert, NotificationError},
};
use flashfeedback_infra::{
    notification::NotificationSender,
    store::{BusinessStore, IdentityStore},
};
use thiserror::Error;
use uuid::Uuid;

use super::TemplateRenderer;

/// アラート送出エラー
///
/// HTTP レスポンスへの変換は `error` モジュールの `IntoResponse`
/// 実装が行う。
#[derive(Debug, Error)]
pub enum AlertDispatchError {
    /// ビジネスが見つからない、またはルックアップに失敗（404）
    #[error("ビジネスが見つかりません")]
    BusinessNotFound,

    /// オーナーのメールアドレスが見つからない（404）
    #[error("オーナーのメールアドレスが見つかりません")]
    OwnerEmailNotFound,

    /// メールプロバイダが設定されていない（500）
    #[error("メールプロバイダが設定されていません")]
    ProviderNotConfigured,

    /// プロバイダへの送信に失敗
    #[error(transparent)]
    Send(#[from] NotificationError),
}

/// 送出結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// メールを送信した（200）
    Sent,
    /// アラートフラグにより送信を抑止した（204）
    Suppressed,
}

/// アラート送出コマンド
///
/// ハンドラが検証済みのリクエストから構築する。ID
/// は受信したままの文字列で保持し、パースはユースケース側で行う。
#[derive(Debug, Clone)]
pub struct DispatchCommand {
    /// 対象ビジネスの ID
    pub business_id: String,
    /// フィードバックが発生した店舗の ID
    pub location_id: String,
    /// アラートイベント（表示用メタデータと上書きフィールド）
    pub alert:       FeedbackAlert,
}

/// アラートディスパッチャ
///
/// フィードバックアラート送出の全体フローを統合する。
pub struct AlertDispatcher {
    business_store: Arc<dyn BusinessStore>,
    identity_store: Arc<dyn IdentityStore>,
    /// 送信バックエンド。`None` はプロバイダ未設定を表し、
    /// 送出時に [`AlertDispatchError::ProviderNotConfigured`] となる。
    sender: Option<Arc<dyn NotificationSender>>,
    renderer: TemplateRenderer,
}

impl AlertDispatcher {
    pub fn new(
        business_store: Arc<dyn BusinessStore>,
        identity_store: Arc<dyn IdentityStore>,
        sender: Option<Arc<dyn NotificationSender>>,
        renderer: TemplateRenderer,
    ) -> Self {
        Self {
            business_store,
            identity_store,
            sender,
            renderer,
        }
    }

    /// フィードバックアラートを送出する
    ///
    /// 各ステップの失敗は即座に `AlertDispatchError` として返す。
    /// アラートフラグが明示的に無効の場合は送信せず
    /// [`DispatchOutcome::Suppressed`] を返す。
    pub async fn dispatch(
        &self,
        command: DispatchCommand,
    ) -> Result<DispatchOutcome, AlertDispatchError> {
        // UUID でない ID は存在しないビジネスとして扱う
        let business_id = Uuid::parse_str(&command.business_id)
            .map(BusinessId::from_uuid)
            .map_err(|_| AlertDispatchError::BusinessNotFound)?;

        let business = match self.business_store.find_business(&business_id).await {
            Ok(business) => business,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    business_id = %command.business_id,
                    "ビジネスの取得に失敗"
                );
                return Err(AlertDispatchError::BusinessNotFound);
            }
        };

        if business.alerts_disabled() {
            tracing::info!(
                business_id = %business.id(),
                location_id = %command.location_id,
                "メールアラートが無効のため送信を抑止"
            );
            return Ok(DispatchOutcome::Suppressed);
        }

        let owner = match self.identity_store.find_owner(business.owner_id()).await {
            Ok(owner) => owner,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    owner_id = %business.owner_id(),
                    "オーナーの取得に失敗"
                );
                return Err(AlertDispatchError::OwnerEmailNotFound);
            }
        };

        let Some(email) = owner.email() else {
            return Err(AlertDispatchError::OwnerEmailNotFound);
        };

        let Some(sender) = &self.sender else {
            return Err(AlertDispatchError::ProviderNotConfigured);
        };

        let message = self.renderer.render(email, &command.alert);

        sender.send_email(&message).await?;

        tracing::info!(
            business_id = %business.id(),
            location_id = %command.location_id,
            location_name = command.alert.location_name.as_deref().unwrap_or_default(),
            sentiment = command.alert.sentiment.as_deref().unwrap_or_default(),
            "フィードバックアラートを送信"
        );

        Ok(DispatchOutcome::Sent)
    }
}

#[cfg(test)]
mod tests {
    use flashfeedback_domain::{
        business::Business,
        owner::{Email, Owner, OwnerId},
    };
    use flashfeedback_infra::mock::{
        MockBusinessStore,
        MockIdentityStore,
        MockNotificationSender,
    };

    use super::*;
    use crate::config::EmailTemplate;

    const BUSINESS_ID: &str = "0191b2c3-0000-7000-8000-000000000001";
    const OWNER_ID: &str = "0191b2c3-0000-7000-8000-000000000002";

    struct Fixture {
        business_store: MockBusinessStore,
        identity_store: MockIdentityStore,
        sender: MockNotificationSender,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                business_store: MockBusinessStore::new(),
                identity_store: MockIdentityStore::new(),
                sender: MockNotificationSender::new(),
            }
        }

        fn with_business(self, flag: Option<bool>) -> Self {
            self.business_store.add_business(Business::new(
                BusinessId::from_uuid(BUSINESS_ID.parse().unwrap()),
                OwnerId::from_uuid(OWNER_ID.parse().unwrap()),
                flag,
            ));
            self
        }

        fn with_owner_email(self, email: Option<&str>) -> Self {
            self.identity_store.add_owner(Owner::new(
                OwnerId::from_uuid(OWNER_ID.parse().unwrap()),
                email.map(|e| Email::new(e).unwrap()),
            ));
            self
        }

        fn dispatcher(&self) -> AlertDispatcher {
            AlertDispatcher::new(
                Arc::new(self.business_store.clone()),
                Arc::new(self.identity_store.clone()),
                Some(Arc::new(self.sender.clone())),
                TemplateRenderer::new(EmailTemplate::Styled),
            )
        }

        fn dispatcher_without_sender(&self) -> AlertDispatcher {
            AlertDispatcher::new(
                Arc::new(self.business_store.clone()),
                Arc::new(self.identity_store.clone()),
                None,
                TemplateRenderer::new(EmailTemplate::Styled),
            )
        }
    }

    fn make_command() -> DispatchCommand {
        DispatchCommand {
            business_id: BUSINESS_ID.to_string(),
            location_id: "loc-001".to_string(),
            alert:       FeedbackAlert {
                dashboard_url: Some("https://app.flashfeedback.co.uk/dashboard".to_string()),
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn 正常系でメールを送信しsentを返す() {
        let fixture = Fixture::new()
            .with_business(Some(true))
            .with_owner_email(Some("owner@example.com"));

        let outcome = fixture.dispatcher().dispatch(make_command()).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Sent);
        let sent = fixture.sender.sent_emails();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "owner@example.com");
        assert_eq!(sent[0].subject, "New feedback received");
        assert!(
            sent[0]
                .html_body
                .contains("https://app.flashfeedback.co.uk/dashboard")
        );
    }

    #[tokio::test]
    async fn 未知のビジネスidでbusiness_not_found() {
        let fixture = Fixture::new();

        let result = fixture.dispatcher().dispatch(make_command()).await;

        assert!(matches!(result, Err(AlertDispatchError::BusinessNotFound)));
    }

    #[tokio::test]
    async fn uuidでないビジネスidでbusiness_not_found() {
        let fixture = Fixture::new();
        let command = DispatchCommand {
            business_id: "not-a-uuid".to_string(),
            ..make_command()
        };

        let result = fixture.dispatcher().dispatch(command).await;

        assert!(matches!(result, Err(AlertDispatchError::BusinessNotFound)));
        // パースで弾かれるためストアには問い合わせない
        assert_eq!(fixture.business_store.call_count(), 0);
    }

    #[tokio::test]
    async fn アラート無効でsuppressedを返し送信しない() {
        let fixture = Fixture::new()
            .with_business(Some(false))
            .with_owner_email(Some("owner@example.com"));

        let outcome = fixture.dispatcher().dispatch(make_command()).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Suppressed);
        assert!(fixture.sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn フラグ未設定は有効として送信する() {
        let fixture = Fixture::new()
            .with_business(None)
            .with_owner_email(Some("owner@example.com"));

        let outcome = fixture.dispatcher().dispatch(make_command()).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Sent);
        assert_eq!(fixture.sender.sent_emails().len(), 1);
    }

    #[tokio::test]
    async fn オーナー不在でowner_email_not_found() {
        let fixture = Fixture::new().with_business(Some(true));

        let result = fixture.dispatcher().dispatch(make_command()).await;

        assert!(matches!(
            result,
            Err(AlertDispatchError::OwnerEmailNotFound)
        ));
    }

    #[tokio::test]
    async fn メールアドレスなしのオーナーでowner_email_not_found() {
        let fixture = Fixture::new()
            .with_business(Some(true))
            .with_owner_email(None);

        let result = fixture.dispatcher().dispatch(make_command()).await;

        assert!(matches!(
            result,
            Err(AlertDispatchError::OwnerEmailNotFound)
        ));
        assert!(fixture.sender.sent_emails().is_empty());
    }

    #[tokio::test]
    async fn プロバイダ未設定でprovider_not_configured() {
        let fixture = Fixture::new()
            .with_business(Some(true))
            .with_owner_email(Some("owner@example.com"));

        let result = fixture
            .dispatcher_without_sender()
            .dispatch(make_command())
            .await;

        assert!(matches!(
            result,
            Err(AlertDispatchError::ProviderNotConfigured)
        ));
    }

    #[tokio::test]
    async fn プロバイダ拒否はステータスと本文を保持したまま返す() {
        let fixture = Fixture::new()
            .with_business(Some(true))
            .with_owner_email(Some("owner@example.com"));
        let sender = MockNotificationSender::failing(NotificationError::Rejected {
            status: 422,
            body:   "Invalid `to` address".to_string(),
        });
        let dispatcher = AlertDispatcher::new(
            Arc::new(fixture.business_store.clone()),
            Arc::new(fixture.identity_store.clone()),
            Some(Arc::new(sender)),
            TemplateRenderer::new(EmailTemplate::Styled),
        );

        let result = dispatcher.dispatch(make_command()).await;

        match result {
            Err(AlertDispatchError::Send(NotificationError::Rejected { status, body })) => {
                assert_eq!(status, 422);
                assert_eq!(body, "Invalid `to` address");
            }
            other => panic!("Rejected を期待したが {other:?} を受け取った"),
        }
    }

    #[tokio::test]
    async fn 上書きフィールドがそのまま送信される() {
        let fixture = Fixture::new()
            .with_business(Some(true))
            .with_owner_email(Some("owner@example.com"));
        let command = DispatchCommand {
            alert: FeedbackAlert {
                subject: Some("Custom subject".to_string()),
                text: Some("custom text".to_string()),
                html: Some("<p>custom html</p>".to_string()),
                ..Default::default()
            },
            ..make_command()
        };

        fixture.dispatcher().dispatch(command).await.unwrap();

        let sent = fixture.sender.sent_emails();
        assert_eq!(sent[0].subject, "Custom subject");
        assert_eq!(sent[0].text_body, "custom text");
        assert_eq!(sent[0].html_body, "<p>custom html</p>");
    }
}
