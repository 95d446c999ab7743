//! In-memory doubles of the ports used by the use case tests.

use std::sync::Arc;

use gatehouse_core::{
    Account, AccountId, AccountPatch, AccountStore, AccountStoreError, BearerToken, Claims, Email,
    EmailClient, HashError, Name, Password, PasswordHash, PasswordHasher, ResetToken, Role,
    TokenError, TokenIssuer, UpdateGuard, VerificationToken,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

pub fn email(value: &str) -> Email {
    Email::parse(value).unwrap()
}

pub fn password(value: &str) -> Password {
    Password::parse(Secret::new(value.to_string())).unwrap()
}

pub fn name(value: &str) -> Name {
    Name::parse(value).unwrap()
}

#[derive(Clone, Default)]
pub struct MockAccountStore {
    accounts: Arc<RwLock<Vec<Account>>>,
    broken: bool,
}

impl MockAccountStore {
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    pub async fn accounts(&self) -> Vec<Account> {
        self.accounts.read().await.clone()
    }

    fn check(&self) -> Result<(), AccountStoreError> {
        if self.broken {
            return Err(AccountStoreError::UnexpectedError(
                "connection refused".to_string(),
            ));
        }
        Ok(())
    }

    async fn find(&self, predicate: impl Fn(&Account) -> bool) -> Result<Account, AccountStoreError> {
        self.check()?;
        self.accounts
            .read()
            .await
            .iter()
            .find(|a| predicate(a))
            .cloned()
            .ok_or(AccountStoreError::NotFound)
    }
}

#[async_trait::async_trait]
impl AccountStore for MockAccountStore {
    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountStoreError::EmailAlreadyExists);
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        self.find(|a| &a.id == id).await
    }

    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.find(|a| &a.email == email).await
    }

    async fn find_by_verification_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Account, AccountStoreError> {
        self.find(|a| a.verification_token.as_ref() == Some(token))
            .await
    }

    async fn find_by_reset_token(&self, token: &ResetToken) -> Result<Account, AccountStoreError> {
        self.find(|a| a.reset_token.as_ref() == Some(token)).await
    }

    async fn update_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
        patch: AccountPatch,
    ) -> Result<Account, AccountStoreError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or(AccountStoreError::NotFound)?;
        if !guard.holds_for(account) {
            return Err(AccountStoreError::PreconditionFailed);
        }
        patch.apply_to(account, chrono::Utc::now());
        Ok(account.clone())
    }

    async fn delete_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
    ) -> Result<(), AccountStoreError> {
        self.check()?;
        let mut accounts = self.accounts.write().await;
        let position = accounts
            .iter()
            .position(|a| &a.id == id)
            .ok_or(AccountStoreError::NotFound)?;
        if !guard.holds_for(&accounts[position]) {
            return Err(AccountStoreError::PreconditionFailed);
        }
        accounts.remove(position);
        Ok(())
    }
}

/// Reversible stand-in for a real hash function.
#[derive(Clone, Default)]
pub struct PlainHasher;

#[async_trait::async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError> {
        Ok(PasswordHash::new(format!(
            "plain:{}",
            password.as_ref().expose_secret()
        )))
    }

    async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, HashError> {
        Ok(hash.as_str() == format!("plain:{}", password.as_ref().expose_secret()))
    }
}

#[derive(Clone, Default)]
pub struct StubIssuer;

impl TokenIssuer for StubIssuer {
    fn issue(&self, account: &Account) -> Result<BearerToken, TokenError> {
        Ok(BearerToken::new(format!("token-{}", account.id)))
    }

    fn validate(&self, _token: &str) -> Result<Claims, TokenError> {
        unimplemented!()
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

impl SentEmail {
    pub fn token(&self) -> &str {
        self.content.lines().last().unwrap_or_default()
    }
}

#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
    failing: bool,
}

impl RecordingEmailClient {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait::async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        if self.failing {
            return Err("mailbox unavailable".to_string());
        }
        self.sent.write().await.push(SentEmail {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

/// Inserts an account straight into the store, bypassing registration.
pub async fn seed(store: &MockAccountStore, address: &str, plain: &str, verified: bool) -> Account {
    let hash = PlainHasher.hash(&password(plain)).await.unwrap();
    let account = if verified {
        Account::preverified(name("Seeded"), email(address), hash, Role::User)
    } else {
        Account::register(name("Seeded"), email(address), hash, Role::User)
    };
    store.insert(account).await.unwrap()
}
