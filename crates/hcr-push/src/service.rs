//! Permission/registration flow and delivery-event handling.

use uuid::Uuid;

use crate::types::{PermissionState, PushEvent};
use crate::{PushError, PushPlatform, TokenStore};

/// Glue between the platform notification API and the token store.
pub struct PushService<P, S> {
    platform: P,
    store: S,
}

impl<P: PushPlatform, S: TokenStore> PushService<P, S> {
    pub fn new(platform: P, store: S) -> Self {
        Self { platform, store }
    }

    /// Runs the permission/registration flow: check, prompt when the user
    /// has not been asked yet, then register. The registration token
    /// arrives later as a [`PushEvent::Registered`] callback.
    ///
    /// # Errors
    ///
    /// - [`PushError::PermissionDenied`] when permission is not granted.
    /// - [`PushError::Registration`] when the platform rejects registration.
    pub async fn init(&self) -> Result<(), PushError> {
        let mut status = self.platform.check_permissions().await;
        if status == PermissionState::Prompt {
            status = self.platform.request_permissions().await;
        }
        if status != PermissionState::Granted {
            tracing::warn!("push permission not granted");
            return Err(PushError::PermissionDenied);
        }

        tracing::info!("push permission granted, registering");
        self.platform.register().await
    }

    /// Handles a delivery-event callback.
    ///
    /// A successful registration persists the token for the signed-in user;
    /// without a user the token is dropped with a warning and registration
    /// must be retried after sign-in. Received/tapped notifications are
    /// logged only — routing is up to the host shell.
    ///
    /// # Errors
    ///
    /// - [`PushError::TokenPersist`] when saving the token fails.
    /// - [`PushError::Registration`] for a registration-error callback.
    pub async fn handle_event(
        &self,
        user_id: Option<Uuid>,
        event: PushEvent,
    ) -> Result<(), PushError> {
        match event {
            PushEvent::Registered(token) => match user_id {
                Some(user_id) => {
                    tracing::info!(%user_id, "push token received, saving");
                    self.store.upsert_token(user_id, &token.value).await
                }
                None => {
                    tracing::warn!("push token received but no user is signed in, not saved");
                    Ok(())
                }
            },
            PushEvent::RegistrationError(reason) => {
                tracing::error!(%reason, "push registration failed");
                Err(PushError::Registration(reason))
            }
            PushEvent::Received(notification) => {
                tracing::info!(id = ?notification.id, title = ?notification.title, "push received in foreground");
                Ok(())
            }
            PushEvent::ActionPerformed(notification) => {
                tracing::info!(id = ?notification.id, "push notification tapped");
                Ok(())
            }
        }
    }

    /// Deletes every stored token for `user_id` (sign-out path).
    ///
    /// # Errors
    ///
    /// Returns [`PushError::TokenPersist`] when the backend delete fails.
    pub async fn clear_tokens(&self, user_id: Uuid) -> Result<(), PushError> {
        self.store.delete_tokens(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RegistrationToken;
    use std::sync::Mutex;

    struct FakePlatform {
        check: PermissionState,
        request: PermissionState,
        registered: Mutex<bool>,
    }

    impl FakePlatform {
        fn new(check: PermissionState, request: PermissionState) -> Self {
            Self {
                check,
                request,
                registered: Mutex::new(false),
            }
        }
    }

    impl PushPlatform for FakePlatform {
        async fn check_permissions(&self) -> PermissionState {
            self.check
        }

        async fn request_permissions(&self) -> PermissionState {
            self.request
        }

        async fn register(&self) -> Result<(), PushError> {
            *self.registered.lock().expect("registered lock") = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeStore {
        tokens: Mutex<Vec<(Uuid, String)>>,
        fail: bool,
    }

    impl TokenStore for FakeStore {
        async fn upsert_token(&self, user_id: Uuid, token: &str) -> Result<(), PushError> {
            if self.fail {
                return Err(PushError::TokenPersist("backend unavailable".to_owned()));
            }
            let mut tokens = self.tokens.lock().expect("tokens lock");
            if !tokens.iter().any(|(u, t)| *u == user_id && t == token) {
                tokens.push((user_id, token.to_owned()));
            }
            Ok(())
        }

        async fn delete_tokens(&self, user_id: Uuid) -> Result<(), PushError> {
            self.tokens
                .lock()
                .expect("tokens lock")
                .retain(|(u, _)| *u != user_id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn init_registers_when_already_granted() {
        let platform = FakePlatform::new(PermissionState::Granted, PermissionState::Denied);
        let service = PushService::new(platform, FakeStore::default());
        service.init().await.expect("init should succeed");
        assert!(*service.platform.registered.lock().unwrap());
    }

    #[tokio::test]
    async fn init_prompts_then_registers() {
        let platform = FakePlatform::new(PermissionState::Prompt, PermissionState::Granted);
        let service = PushService::new(platform, FakeStore::default());
        service.init().await.expect("init should succeed");
        assert!(*service.platform.registered.lock().unwrap());
    }

    #[tokio::test]
    async fn init_fails_when_permission_denied_after_prompt() {
        let platform = FakePlatform::new(PermissionState::Prompt, PermissionState::Denied);
        let service = PushService::new(platform, FakeStore::default());
        let err = service.init().await.unwrap_err();
        assert!(matches!(err, PushError::PermissionDenied));
        assert!(!*service.platform.registered.lock().unwrap());
    }

    #[tokio::test]
    async fn registered_event_saves_token_for_signed_in_user() {
        let platform = FakePlatform::new(PermissionState::Granted, PermissionState::Granted);
        let service = PushService::new(platform, FakeStore::default());
        let user_id = Uuid::new_v4();

        service
            .handle_event(
                Some(user_id),
                PushEvent::Registered(RegistrationToken {
                    value: "fcm-token-1".to_owned(),
                }),
            )
            .await
            .expect("token should save");

        let tokens = service.store.tokens.lock().unwrap();
        assert_eq!(tokens.as_slice(), &[(user_id, "fcm-token-1".to_owned())]);
    }

    #[tokio::test]
    async fn registered_event_without_user_is_dropped_without_error() {
        let platform = FakePlatform::new(PermissionState::Granted, PermissionState::Granted);
        let service = PushService::new(platform, FakeStore::default());

        service
            .handle_event(
                None,
                PushEvent::Registered(RegistrationToken {
                    value: "fcm-token-1".to_owned(),
                }),
            )
            .await
            .expect("dropping a token is not an error");

        assert!(service.store.tokens.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn duplicate_token_upsert_keeps_single_row() {
        let platform = FakePlatform::new(PermissionState::Granted, PermissionState::Granted);
        let service = PushService::new(platform, FakeStore::default());
        let user_id = Uuid::new_v4();
        let event = || {
            PushEvent::Registered(RegistrationToken {
                value: "fcm-token-1".to_owned(),
            })
        };

        service.handle_event(Some(user_id), event()).await.unwrap();
        service.handle_event(Some(user_id), event()).await.unwrap();

        assert_eq!(service.store.tokens.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_tokens_removes_only_that_user() {
        let platform = FakePlatform::new(PermissionState::Granted, PermissionState::Granted);
        let service = PushService::new(platform, FakeStore::default());
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service.store.upsert_token(alice, "t1").await.unwrap();
        service.store.upsert_token(bob, "t2").await.unwrap();
        service.clear_tokens(alice).await.unwrap();

        let tokens = service.store.tokens.lock().unwrap();
        assert_eq!(tokens.as_slice(), &[(bob, "t2".to_owned())]);
    }

    #[tokio::test]
    async fn registration_error_event_is_surfaced() {
        let platform = FakePlatform::new(PermissionState::Granted, PermissionState::Granted);
        let service = PushService::new(platform, FakeStore::default());
        let err = service
            .handle_event(None, PushEvent::RegistrationError("apns timeout".to_owned()))
            .await
            .unwrap_err();
        assert!(matches!(err, PushError::Registration(reason) if reason == "apns timeout"));
    }

    #[tokio::test]
    async fn store_failure_propagates_as_token_persist() {
        let platform = FakePlatform::new(PermissionState::Granted, PermissionState::Granted);
        let store = FakeStore {
            fail: true,
            ..FakeStore::default()
        };
        let service = PushService::new(platform, store);
        let err = service
            .handle_event(
                Some(Uuid::new_v4()),
                PushEvent::Registered(RegistrationToken {
                    value: "fcm-token-1".to_owned(),
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, PushError::TokenPersist(_)));
    }
}
