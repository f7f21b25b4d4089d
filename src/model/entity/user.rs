use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct UserEntity {
    id: Uuid,
    username: String,
    #[serde(skip)]
    password_hash: String,
    first_name: String,
    last_name: String,
    joined_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UserEntityCreate {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl ResourceTyped for UserEntity {
    fn get_resource_type() -> ResourceType {
        ResourceType::User
    }
}

impl UserEntity {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn hash(&self) -> &str {
        &self.password_hash
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// `first last`, or the username when both are blank.
    pub fn full_name(&self) -> String {
        let full = format!("{} {}", self.first_name(), self.last_name());
        match full.trim() {
            "" => self.username.clone(),
            name => name.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CrudRepository<UserEntity, UserEntityCreate, Uuid> for UserEntity {
    /// Fails with a unique violation when the username is taken.
    async fn create(mm: &ModelManager, data: UserEntityCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO users (id, username, password_hash, first_name, last_name)
            VALUES ($1,$2,$3,$4,$5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(mm: &ModelManager, id: Uuid) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}

impl UserEntity {
    pub async fn find_by_username(
        mm: &ModelManager,
        username: &str,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}
