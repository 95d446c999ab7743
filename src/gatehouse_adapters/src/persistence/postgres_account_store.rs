use chrono::{DateTime, Utc};
use gatehouse_core::{
    Account, AccountId, AccountPatch, AccountStore, AccountStoreError, Email, Name, PasswordHash,
    ResetToken, Role, UpdateGuard, VerificationToken,
};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

const ACCOUNT_COLUMNS: &str = "id, name, email, password_hash, role, verified, \
     verification_token, reset_token, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresAccountStore { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE {column} = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(AccountStoreError::NotFound)?.try_into()
    }

    /// Explains a guarded write that matched no row: either the account is gone or
    /// its guard no longer holds.
    async fn miss(&self, id: &AccountId) -> Result<AccountStoreError, AccountStoreError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM accounts WHERE id = $1)")
                .bind(id.as_uuid())
                .fetch_one(&self.pool)
                .await
                .map_err(unexpected)?;

        Ok(if exists {
            AccountStoreError::PreconditionFailed
        } else {
            AccountStoreError::NotFound
        })
    }
}

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    verified: bool,
    verification_token: Option<String>,
    reset_token: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountStoreError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let corrupt = |e: gatehouse_core::ValidationError| {
            AccountStoreError::UnexpectedError(format!("corrupt account row: {e}"))
        };

        Ok(Account {
            id: AccountId::from(row.id),
            name: Name::parse(row.name).map_err(corrupt)?,
            email: Email::parse(row.email).map_err(corrupt)?,
            password_hash: PasswordHash::new(row.password_hash),
            role: row.role.parse::<Role>().map_err(corrupt)?,
            verified: row.verified,
            verification_token: row.verification_token.map(VerificationToken::from),
            reset_token: row.reset_token.map(ResetToken::from),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn unexpected(e: sqlx::Error) -> AccountStoreError {
    AccountStoreError::UnexpectedError(e.to_string())
}

fn guard_columns(guard: &UpdateGuard) -> (Option<&str>, Option<&str>) {
    match guard {
        UpdateGuard::None => (None, None),
        UpdateGuard::VerificationToken(token) => (Some(token.as_str()), None),
        UpdateGuard::ResetToken(token) => (None, Some(token.as_str())),
    }
}

#[async_trait::async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Inserting account into PostgreSQL", skip_all)]
    async fn insert(&self, account: Account) -> Result<Account, AccountStoreError> {
        let query = format!(
            r#"
                INSERT INTO accounts ({ACCOUNT_COLUMNS})
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(account.id.as_uuid())
            .bind(account.name.as_str())
            .bind(account.email.as_str())
            .bind(account.password_hash.as_str())
            .bind(account.role.as_str())
            .bind(account.verified)
            .bind(account.verification_token.as_ref().map(|t| t.as_str()))
            .bind(account.reset_token.as_ref().map(|t| t.as_str()))
            .bind(account.created_at)
            .bind(account.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AccountStoreError::EmailAlreadyExists;
                    }
                }
                unexpected(e)
            })?;

        row.try_into()
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE id = $1");

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(AccountStoreError::NotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        self.fetch_one_by("email", email.as_str()).await
    }

    #[tracing::instrument(name = "Retrieving account by verification token", skip_all)]
    async fn find_by_verification_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Account, AccountStoreError> {
        self.fetch_one_by("verification_token", token.as_str())
            .await
    }

    #[tracing::instrument(name = "Retrieving account by reset token", skip_all)]
    async fn find_by_reset_token(&self, token: &ResetToken) -> Result<Account, AccountStoreError> {
        self.fetch_one_by("reset_token", token.as_str()).await
    }

    /// A single conditional `UPDATE`: the guard is part of the `WHERE` clause, so the
    /// check and the write cannot interleave with another request.
    #[tracing::instrument(name = "Updating account in PostgreSQL", skip_all)]
    async fn update_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
        patch: AccountPatch,
    ) -> Result<Account, AccountStoreError> {
        let (verification_guard, reset_guard) = guard_columns(&guard);

        let query = format!(
            r#"
                UPDATE accounts SET
                    name = COALESCE($2, name),
                    password_hash = COALESCE($3, password_hash),
                    verified = COALESCE($4, verified),
                    verification_token = CASE WHEN $5 THEN $6 ELSE verification_token END,
                    reset_token = CASE WHEN $7 THEN $8 ELSE reset_token END,
                    updated_at = now()
                WHERE id = $1
                    AND ($9::text IS NULL OR verification_token = $9)
                    AND ($10::text IS NULL OR reset_token = $10)
                RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, AccountRow>(&query)
            .bind(id.as_uuid())
            .bind(patch.name.as_ref().map(|n| n.as_str()))
            .bind(patch.password_hash.as_ref().map(|h| h.as_str()))
            .bind(patch.verified)
            .bind(patch.verification_token.is_some())
            .bind(patch.verification_token.flatten().map(|t| t.as_str().to_string()))
            .bind(patch.reset_token.is_some())
            .bind(patch.reset_token.flatten().map(|t| t.as_str().to_string()))
            .bind(verification_guard)
            .bind(reset_guard)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        if let Some(row) = row {
            return row.try_into();
        }

        Err(self.miss(id).await?)
    }

    #[tracing::instrument(name = "Deleting account from PostgreSQL", skip_all)]
    async fn delete_by_id(
        &self,
        id: &AccountId,
        guard: UpdateGuard,
    ) -> Result<(), AccountStoreError> {
        let (verification_guard, reset_guard) = guard_columns(&guard);

        let deleted = sqlx::query(
            r#"
                DELETE FROM accounts
                WHERE id = $1
                    AND ($2::text IS NULL OR verification_token = $2)
                    AND ($3::text IS NULL OR reset_token = $3)
            "#,
        )
        .bind(id.as_uuid())
        .bind(verification_guard)
        .bind(reset_guard)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?
        .rows_affected();

        if deleted == 1 {
            return Ok(());
        }

        Err(self.miss(id).await?)
    }
}
