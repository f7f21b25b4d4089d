use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Choice {
    id: i64,
    question_id: i64,
    choice_text: String,
    is_correct: bool,
}

impl ResourceTyped for Choice {
    fn get_resource_type() -> ResourceType {
        ResourceType::Choice
    }
}

impl Choice {
    pub fn new(id: i64, question_id: i64, choice_text: String, is_correct: bool) -> Self {
        Self {
            id,
            question_id,
            choice_text,
            is_correct,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn question_id(&self) -> i64 {
        self.question_id
    }

    pub fn choice_text(&self) -> &str {
        &self.choice_text
    }

    pub fn is_correct(&self) -> bool {
        self.is_correct
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ChoiceCreate {
    pub question_id: i64,
    pub choice_text: String,
    pub is_correct: Option<bool>,
}

#[async_trait::async_trait]
impl CrudRepository<Choice, ChoiceCreate, i64> for Choice {
    async fn create(mm: &ModelManager, data: ChoiceCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO choices (question_id, choice_text, is_correct)
            VALUES ($1,$2,$3)
            RETURNING *
            "#,
        )
        .bind(data.question_id)
        .bind(&data.choice_text)
        .bind(data.is_correct.unwrap_or(false))
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(mm: &ModelManager, id: i64) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM choices WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}

// Utils

impl Choice {
    pub async fn find_all_by_question(
        mm: &ModelManager,
        question_id: i64,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as("SELECT * FROM choices WHERE question_id = $1 ORDER BY id ASC")
            .bind(question_id)
            .fetch_all(mm.executor())
            .await?;
        Ok(rows)
    }

    /// Every choice of every question of the course.
    pub async fn find_all_by_course(mm: &ModelManager, course_id: i64) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT ch.*
            FROM choices ch
            JOIN questions q ON q.id = ch.question_id
            WHERE q.course_id = $1
            ORDER BY ch.question_id ASC, ch.id ASC
            "#,
        )
        .bind(course_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(rows)
    }

    /// Choices attached to a submission, across all questions.
    pub async fn find_all_by_submission(
        mm: &ModelManager,
        submission_id: i64,
    ) -> DatabaseResult<Vec<Self>> {
        let rows = sqlx::query_as(
            r#"
            SELECT ch.*
            FROM choices ch
            JOIN submission_choices sc ON sc.choice_id = ch.id
            WHERE sc.submission_id = $1
            ORDER BY ch.question_id ASC, ch.id ASC
            "#,
        )
        .bind(submission_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(rows)
    }
}
