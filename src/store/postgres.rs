//! PostgreSQL Account Store
//!
//! Reads and writes the `users` table.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::credentials::StoredCredential;
use crate::domain::{AccountChange, AccountSummary, NewAccount};

use super::{AccountStore, CountedRow, PageWindow, StoreError, StoreResult};

/// Account store backed by a Postgres pool
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new PgAccountStore
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn age_from_column(username: &str, age: Option<i16>) -> StoreResult<Option<u8>> {
    age.map(|value| {
        u8::try_from(value).map_err(|_| {
            StoreError::MalformedRow(format!("age {} out of range for {}", value, username))
        })
    })
    .transpose()
}

fn count_from_column(count: i64) -> StoreResult<u64> {
    u64::try_from(count)
        .map_err(|_| StoreError::MalformedRow(format!("negative account count {}", count)))
}

/// Build the conditional update for `change`.
///
/// Every variant shares the predicate `username = ? AND disabled = FALSE AND
/// password = ?`, so a disabled row or a concurrently changed credential is
/// never written.
fn build_change_query<'args>(
    username: &'args str,
    expected: &'args StoredCredential,
    change: &'args AccountChange,
) -> QueryBuilder<'args, Postgres> {
    let mut builder: QueryBuilder<'args, Postgres> = QueryBuilder::new("UPDATE users SET ");

    match change {
        AccountChange::SetProfile { about, age } => {
            builder
                .push("about = ")
                .push_bind(about.as_deref())
                .push(", age = ")
                .push_bind(age.map(i16::from));
        }
        AccountChange::SetPassword(credential) => {
            builder.push("password = ").push_bind(credential.as_str());
        }
        AccountChange::Disable => {
            builder.push("disabled = TRUE");
        }
    }

    builder
        .push(", updated_at = NOW() WHERE username = ")
        .push_bind(username)
        .push(" AND disabled = FALSE AND password = ")
        .push_bind(expected.as_str());

    builder
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, account: NewAccount) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (username, password, created_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            "#,
        )
        .bind(&account.username)
        .bind(account.credential.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_insert(e, &account.username))?;

        Ok(())
    }

    async fn find_active(&self, username: &str) -> StoreResult<Option<AccountSummary>> {
        let row: Option<(String, Option<String>, Option<i16>)> = sqlx::query_as(
            r#"
            SELECT username, about, age
            FROM users
            WHERE username = $1 AND disabled = FALSE
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|(username, about, age)| -> StoreResult<AccountSummary> {
            let age = age_from_column(&username, age)?;
            Ok(AccountSummary { username, about, age })
        })
        .transpose()
    }

    async fn active_credential(&self, username: &str) -> StoreResult<Option<StoredCredential>> {
        let password: Option<String> = sqlx::query_scalar(
            "SELECT password FROM users WHERE username = $1 AND disabled = FALSE",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(password.map(StoredCredential::from_stored))
    }

    async fn apply_change(
        &self,
        username: &str,
        expected: &StoredCredential,
        change: &AccountChange,
    ) -> StoreResult<u64> {
        let rows_affected = build_change_query(username, expected, change)
            .build()
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn page_active(&self, window: PageWindow) -> StoreResult<Vec<CountedRow>> {
        let rows: Vec<(String, Option<String>, Option<i16>, i64)> = sqlx::query_as(
            r#"
            SELECT username, about, age, COUNT(*) OVER () AS total_count
            FROM users
            WHERE disabled = FALSE
            ORDER BY created_at, username
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(username, about, age, total_count)| -> StoreResult<CountedRow> {
                let age = age_from_column(&username, age)?;
                Ok(CountedRow {
                    account: AccountSummary { username, about, age },
                    total_count: count_from_column(total_count)?,
                })
            })
            .collect()
    }

    async fn count_active(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE disabled = FALSE")
            .fetch_one(&self.pool)
            .await?;

        count_from_column(count)
    }
}
