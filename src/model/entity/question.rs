use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Question {
    id: i64,
    course_id: i64,
    question_text: String,
    grade: i32,
}

impl ResourceTyped for Question {
    fn get_resource_type() -> ResourceType {
        ResourceType::Question
    }
}

impl Question {
    pub fn new(id: i64, course_id: i64, question_text: String, grade: i32) -> Self {
        Self {
            id,
            course_id,
            question_text,
            grade,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    /// Points awarded for a fully correct selection.
    pub fn grade(&self) -> i32 {
        self.grade
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct QuestionCreate {
    pub course_id: i64,
    pub question_text: String,
    pub grade: i32,
}

#[async_trait::async_trait]
impl CrudRepository<Question, QuestionCreate, i64> for Question {
    async fn create(mm: &ModelManager, data: QuestionCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            "INSERT INTO questions (course_id, question_text, grade) VALUES ($1,$2,$3) RETURNING *",
        )
        .bind(data.course_id)
        .bind(&data.question_text)
        .bind(data.grade)
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(mm: &ModelManager, id: i64) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM questions WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Question {
    pub async fn find_all_by_course(mm: &ModelManager, course_id: i64) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as("SELECT * FROM questions WHERE course_id = $1 ORDER BY id ASC")
            .bind(course_id)
            .fetch_all(mm.executor())
            .await?;
        Ok(result)
    }
}
