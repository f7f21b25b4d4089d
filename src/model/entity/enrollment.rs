use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::model::repo::{ResourceType, ResourceTyped};
use crate::model::{ModelManager, error::DatabaseResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum EnrollmentMode {
    #[serde(rename = "audit")]
    Audit,
    #[serde(rename = "honor")]
    Honor,
    #[serde(rename = "BETA")]
    Beta,
}

impl From<&str> for EnrollmentMode {
    fn from(value: &str) -> Self {
        match value {
            "honor" => Self::Honor,
            "BETA" => Self::Beta,
            _ => Self::Audit,
        }
    }
}

impl std::fmt::Display for EnrollmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Audit => write!(f, "audit"),
            Self::Honor => write!(f, "honor"),
            Self::Beta => write!(f, "BETA"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, utoipa::ToSchema)]
pub struct Enrollment {
    id: i64,
    user_id: Uuid,
    course_id: i64,
    mode: String,
    enrolled_at: DateTime<Utc>,
}

impl ResourceTyped for Enrollment {
    fn get_resource_type() -> ResourceType {
        ResourceType::Enrollment
    }
}

impl Enrollment {
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn course_id(&self) -> i64 {
        self.course_id
    }

    pub fn mode(&self) -> EnrollmentMode {
        EnrollmentMode::from(self.mode.as_str())
    }

    pub fn enrolled_at(&self) -> &DateTime<Utc> {
        &self.enrolled_at
    }
}

impl Enrollment {
    /// Enrolls the user once per course.
    ///
    /// The insert and the `total_enrollment` bump share one transaction, and the
    /// counter only moves when the `(user_id, course_id)` row was actually
    /// inserted. Returns `None` when the user was already enrolled.
    pub async fn enroll(
        mm: &ModelManager,
        user_id: Uuid,
        course_id: i64,
        mode: EnrollmentMode,
    ) -> DatabaseResult<Option<Self>> {
        let mut tx = mm.executor().begin().await?;

        let created: Option<Self> = sqlx::query_as(
            r#"
            INSERT INTO enrollments (user_id, course_id, mode)
            VALUES ($1,$2,$3)
            ON CONFLICT (user_id, course_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(mode.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        if created.is_some() {
            sqlx::query("UPDATE courses SET total_enrollment = total_enrollment + 1 WHERE id = $1")
                .bind(course_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn find_by_user_and_course(
        mm: &ModelManager,
        user_id: Uuid,
        course_id: i64,
    ) -> DatabaseResult<Option<Self>> {
        let result = sqlx::query_as("SELECT * FROM enrollments WHERE user_id = $1 AND course_id = $2")
            .bind(user_id)
            .bind(course_id)
            .fetch_optional(mm.executor())
            .await?;
        Ok(result)
    }

    pub async fn count_by_course(mm: &ModelManager, course_id: i64) -> DatabaseResult<i64> {
        let result: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1")
            .bind(course_id)
            .fetch_one(mm.executor())
            .await?;
        Ok(result)
    }
}
