use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;

/// Row of the `user_credentials` table. `password` holds an Argon2 PHC hash.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: String,
    pub email: String,
    pub password: String,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>>;
}

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        let user = sqlx::query_as::<_, UserCredentials>(
            r#"
            SELECT id, email, password
            FROM user_credentials
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Credential store backed by a map, for tests and local runs
#[derive(Default)]
pub struct InMemoryCredentialStore {
    users: HashMap<String, UserCredentials>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: UserCredentials) -> Self {
        self.users.insert(user.email.clone(), user);
        self
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredentials>> {
        Ok(self.users.get(email).cloned())
    }
}
