use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Submission {
    id: i64,
    enrollment_id: i64,
    submitted_at: DateTime<Utc>,
}

impl ResourceTyped for Submission {
    fn get_resource_type() -> ResourceType {
        ResourceType::Submission
    }
}

impl Submission {
    pub fn id(&self) -> i64 {
        self.id
    }
}

pub struct SubmissionCreate {
    pub enrollment_id: i64,
    pub choice_ids: Vec<i64>,
}

impl SubmissionCreate {
    pub fn new(enrollment_id: i64, choice_ids: Vec<i64>) -> Self {
        Self {
            enrollment_id,
            choice_ids,
        }
    }
}

#[async_trait::async_trait]
impl CrudRepository<Submission, SubmissionCreate, i64> for Submission {
    /// Inserts the submission and its selected choices atomically.
    async fn create(mm: &ModelManager, data: SubmissionCreate) -> DatabaseResult<Self> {
        let mut tx = mm.executor().begin().await?;

        let submission: Self = sqlx::query_as(
            "INSERT INTO submissions (enrollment_id) VALUES ($1) RETURNING *",
        )
        .bind(data.enrollment_id)
        .fetch_one(&mut *tx)
        .await?;

        if !data.choice_ids.is_empty() {
            sqlx::query(
                r#"
                INSERT INTO submission_choices (submission_id, choice_id)
                SELECT $1, UNNEST($2::BIGINT[])
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(submission.id)
            .bind(&data.choice_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(submission)
    }

    async fn find_by_id(mm: &ModelManager, id: i64) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM submissions WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Submission {
    /// Looks the submission up only if its enrollment belongs to `course_id`.
    pub async fn find_in_course(
        mm: &ModelManager,
        id: i64,
        course_id: i64,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as(
            r#"
            SELECT s.*
            FROM submissions s
            JOIN enrollments e ON e.id = s.enrollment_id
            WHERE s.id = $1 AND e.course_id = $2
            "#,
        )
        .bind(id)
        .bind(course_id)
        .fetch_optional(mm.executor())
        .await?;
        Ok(result)
    }
}
