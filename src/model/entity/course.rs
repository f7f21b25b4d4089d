use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Course {
    id: i64,
    title: String,
    description: String,
    total_enrollment: i32,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CourseCreate {
    pub title: String,
    pub description: String,
}

impl ResourceTyped for Course {
    fn get_resource_type() -> ResourceType {
        ResourceType::Course
    }
}

impl Course {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Denormalized count of enrollment rows, maintained by
    /// [`crate::model::entity::Enrollment::enroll`].
    pub fn total_enrollment(&self) -> i32 {
        self.total_enrollment
    }
}

#[async_trait::async_trait]
impl CrudRepository<Course, CourseCreate, i64> for Course {
    async fn create(mm: &ModelManager, data: CourseCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            "INSERT INTO courses (title, description) VALUES ($1,$2) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.description)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(mm: &ModelManager, id: i64) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM courses WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}

// Utils

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CourseWithStatusRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub total_enrollment: i32,
    pub is_enrolled: bool,
}

impl CourseWithStatusRow {
    /// Most enrolled courses first. `is_enrolled` is always false for anonymous visitors.
    pub async fn fetch_top(
        mm: &ModelManager,
        user_id: Option<Uuid>,
        limit: i64,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                c.id,
                c.title,
                c.description,
                c.total_enrollment,
                EXISTS (
                    SELECT 1 FROM enrollments e
                    WHERE e.course_id = c.id AND e.user_id = $1
                ) AS is_enrolled
            FROM courses c
            ORDER BY c.total_enrollment DESC, c.id ASC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(mm.executor())
        .await?;

        Ok(rows)
    }
}
