use std::collections::BTreeSet;

use crate::model::entity::{Choice, Question};

/// Outcome of one question: full grade when the selection matches the correct
/// set exactly, zero otherwise.
#[derive(Debug, Clone)]
pub struct QuestionResult {
    pub question: Question,
    pub correct_choices: Vec<Choice>,
    pub selected_choices: Vec<Choice>,
    pub score: i32,
}

impl QuestionResult {
    pub fn is_correct(&self) -> bool {
        self.score == self.question.grade()
    }
}

#[derive(Debug, Clone)]
/// Totals are summed in `i64` so no combination of `i32` grades can overflow.
pub struct ExamResult {
    pub questions: Vec<QuestionResult>,
    pub total_score: i64,
    pub max_score: i64,
}

fn ids(choices: &[Choice]) -> BTreeSet<i64> {
    choices.iter().map(Choice::id).collect()
}

/// Grades a submission.
///
/// `course_choices` holds the choices of all `questions`, `selected` the choices
/// stored with the submission. Questions are reported in the given order.
pub fn grade_exam(questions: &[Question], course_choices: &[Choice], selected: &[Choice]) -> ExamResult {
    let mut total_score = 0;
    let mut max_score = 0;

    let questions = questions
        .iter()
        .map(|question| {
            let correct_choices: Vec<Choice> = course_choices
                .iter()
                .filter(|c| c.question_id() == question.id() && c.is_correct())
                .cloned()
                .collect();
            let selected_choices: Vec<Choice> = selected
                .iter()
                .filter(|c| c.question_id() == question.id())
                .cloned()
                .collect();

            // all and only the correct choices, no partial credit
            let score = if ids(&correct_choices) == ids(&selected_choices) {
                question.grade()
            } else {
                0
            };

            total_score += i64::from(score);
            max_score += i64::from(question.grade());

            QuestionResult {
                question: question.clone(),
                correct_choices,
                selected_choices,
                score,
            }
        })
        .collect();

    ExamResult {
        questions,
        total_score,
        max_score,
    }
}
