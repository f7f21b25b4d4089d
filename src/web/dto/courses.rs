use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::entity::{
    Choice, Course, CourseWithStatusRow, Enrollment, EnrollmentMode, Lesson, Question,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CourseListItem {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub total_enrollment: i32,
    pub is_enrolled: bool,
}

impl From<CourseWithStatusRow> for CourseListItem {
    fn from(row: CourseWithStatusRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            total_enrollment: row.total_enrollment,
            is_enrolled: row.is_enrolled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CourseListResponse {
    /// Username of the visitor, if signed in
    pub user: Option<String>,
    pub full_name: Option<String>,
    pub course_list: Vec<CourseListItem>,
}

/// A choice as shown to learners; correctness stays hidden.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ChoiceResponse {
    pub id: i64,
    pub choice_text: String,
}

impl From<&Choice> for ChoiceResponse {
    fn from(choice: &Choice) -> Self {
        Self {
            id: choice.id(),
            choice_text: choice.choice_text().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuestionResponse {
    pub id: i64,
    pub question_text: String,
    pub grade: i32,
    pub choices: Vec<ChoiceResponse>,
}

/// The visitor's own enrollment in a course.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct EnrollmentResponse {
    pub mode: EnrollmentMode,
    pub enrolled_at: DateTime<Utc>,
}

impl From<&Enrollment> for EnrollmentResponse {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            mode: enrollment.mode(),
            enrolled_at: *enrollment.enrolled_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CourseDetailResponse {
    pub course: Course,
    pub is_enrolled: bool,
    pub enrollment: Option<EnrollmentResponse>,
    pub lessons: Vec<Lesson>,
    pub questions: Vec<QuestionResponse>,
}

impl CourseDetailResponse {
    pub fn from_entities(
        course: Course,
        enrollment: Option<EnrollmentResponse>,
        lessons: Vec<Lesson>,
        questions: Vec<Question>,
        choices: Vec<Choice>,
    ) -> Self {
        let questions = questions
            .into_iter()
            .map(|q| QuestionResponse {
                id: q.id(),
                question_text: q.question_text().to_string(),
                grade: q.grade(),
                choices: choices
                    .iter()
                    .filter(|c| c.question_id() == q.id())
                    .map(ChoiceResponse::from)
                    .collect(),
            })
            .collect();

        Self {
            course,
            is_enrolled: enrollment.is_some(),
            enrollment,
            lessons,
            questions,
        }
    }
}
