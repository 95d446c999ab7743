use std::{future::Future, time::Duration};

use gatehouse_core::{
    Account, AccountId, AccountPatch, AccountStore, AccountStoreError, Email, ResetToken,
    UpdateGuard, VerificationToken,
};

/// Bounds every call to the wrapped store with a timeout.
///
/// A call that does not finish in time fails with `AccountStoreError::Timeout`; for
/// writes the outcome on the inner store is then unknown, which callers treat like any
/// other store failure.
#[derive(Clone)]
pub struct TimedAccountStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: AccountStore> TimedAccountStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, AccountStoreError>>,
    ) -> Result<T, AccountStoreError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| {
                tracing::warn!(operation, timeout = ?self.timeout, "Account store call timed out");
                AccountStoreError::Timeout(self.timeout)
            })?
    }
}

#[async_trait::async_trait]
impl<S: AccountStore> AccountStore for TimedAccountStore<S> {
    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError> {
        self.bounded("insert", self.inner.insert(account)).await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        self.bounded("find_by_id", self.inner.find_by_id(id)).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.bounded("find_by_email", self.inner.find_by_email(email))
            .await
    }

    async fn find_by_verification_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Account, AccountStoreError> {
        self.bounded(
            "find_by_verification_token",
            self.inner.find_by_verification_token(token),
        )
        .await
    }

    async fn find_by_reset_token(&self, token: &ResetToken) -> Result<Account, AccountStoreError> {
        self.bounded("find_by_reset_token", self.inner.find_by_reset_token(token))
            .await
    }

    async fn update_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
        patch: AccountPatch,
    ) -> Result<Account, AccountStoreError> {
        self.bounded("update_by_id", self.inner.update_by_id(id, guard, patch))
            .await
    }

    async fn delete_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
    ) -> Result<(), AccountStoreError> {
        self.bounded("delete_by_id", self.inner.delete_by_id(id, guard))
            .await
    }
}
