use serde::{Deserialize, Serialize};

use crate::{
    exam::{ExamResult, QuestionResult},
    model::entity::{Course, Submission},
    web::dto::courses::ChoiceResponse,
};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct QuestionResultResponse {
    pub question_id: i64,
    pub question_text: String,
    pub grade: i32,
    pub correct_choices: Vec<ChoiceResponse>,
    pub selected_choices: Vec<ChoiceResponse>,
    pub score: i32,
}

impl From<&QuestionResult> for QuestionResultResponse {
    fn from(result: &QuestionResult) -> Self {
        Self {
            question_id: result.question.id(),
            question_text: result.question.question_text().to_string(),
            grade: result.question.grade(),
            correct_choices: result.correct_choices.iter().map(ChoiceResponse::from).collect(),
            selected_choices: result.selected_choices.iter().map(ChoiceResponse::from).collect(),
            score: result.score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExamResultResponse {
    pub course: Course,
    pub submission: Submission,
    pub total_score: i64,
    pub max_score: i64,
    pub question_results: Vec<QuestionResultResponse>,
}

impl ExamResultResponse {
    pub fn new(course: Course, submission: Submission, result: &ExamResult) -> Self {
        Self {
            course,
            submission,
            total_score: result.total_score,
            max_score: result.max_score,
            question_results: result.questions.iter().map(QuestionResultResponse::from).collect(),
        }
    }
}
