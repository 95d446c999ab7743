use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use chrono::Utc;
use gatehouse_core::{
    Account, AccountId, AccountPatch, AccountStore, AccountStoreError, Email, ResetToken,
    UpdateGuard, VerificationToken,
};

#[derive(Default)]
struct Accounts {
    by_id: HashMap<AccountId, Account>,
    by_email: HashMap<Email, AccountId>,
}

/// In-memory account store. Every write holds the lock for its whole check-and-write.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<Accounts>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn find(&self, predicate: impl Fn(&Account) -> bool) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .by_id
            .values()
            .find(|account| predicate(account))
            .cloned()
            .ok_or(AccountStoreError::NotFound)
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.by_email.contains_key(&account.email) {
            return Err(AccountStoreError::EmailAlreadyExists);
        }
        accounts.by_email.insert(account.email.clone(), account.id);
        accounts.by_id.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .by_id
            .get(id)
            .cloned()
            .ok_or(AccountStoreError::NotFound)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let accounts = self.accounts.read().await;
        accounts
            .by_email
            .get(email)
            .and_then(|id| accounts.by_id.get(id))
            .cloned()
            .ok_or(AccountStoreError::NotFound)
    }

    async fn find_by_verification_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Account, AccountStoreError> {
        self.find(|account| account.verification_token.as_ref() == Some(token))
            .await
    }

    async fn find_by_reset_token(&self, token: &ResetToken) -> Result<Account, AccountStoreError> {
        self.find(|account| account.reset_token.as_ref() == Some(token))
            .await
    }

    async fn update_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
        patch: AccountPatch,
    ) -> Result<Account, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .by_id
            .get_mut(id)
            .ok_or(AccountStoreError::NotFound)?;

        if !guard.holds_for(account) {
            return Err(AccountStoreError::PreconditionFailed);
        }

        patch.apply_to(account, Utc::now());
        Ok(account.clone())
    }

    async fn delete_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
    ) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.by_id.get(id).ok_or(AccountStoreError::NotFound)?;

        if !guard.holds_for(account) {
            return Err(AccountStoreError::PreconditionFailed);
        }

        let email = account.email.clone();
        accounts.by_email.remove(&email);
        accounts.by_id.remove(id);
        Ok(())
    }
}
