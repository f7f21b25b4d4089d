use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult, repo::CrudRepository};

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Lesson {
    id: i64,
    course_id: i64,
    title: String,
    content: String,
    order_index: i32,
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> ResourceType {
        ResourceType::Lesson
    }
}

impl Lesson {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LessonCreate {
    pub course_id: i64,
    pub title: String,
    pub content: String,
    pub order_index: Option<i32>,
}

#[async_trait::async_trait]
impl CrudRepository<Lesson, LessonCreate, i64> for Lesson {
    async fn create(mm: &ModelManager, data: LessonCreate) -> DatabaseResult<Self> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO lessons (course_id, title, content, order_index)
            VALUES ($1,$2,$3,$4)
            RETURNING *
            "#,
        )
        .bind(data.course_id)
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.order_index.unwrap_or(0))
        .fetch_one(mm.executor())
        .await?;

        Ok(row)
    }

    async fn find_by_id(mm: &ModelManager, id: i64) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM lessons WHERE id = $1")
            .bind(id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }
}

impl Lesson {
    pub async fn find_all_by_course(mm: &ModelManager, course_id: i64) -> DatabaseResult<Vec<Self>> {
        let result = sqlx::query_as(
            "SELECT * FROM lessons WHERE course_id = $1 ORDER BY order_index ASC, id ASC",
        )
        .bind(course_id)
        .fetch_all(mm.executor())
        .await?;
        Ok(result)
    }
}
