//! Exam answer parsing and grading. Nothing in here touches the database;
//! callers load questions and choices and hand them over.

mod answers;
pub use answers::{AnswerError, AnswerResult, CHOICE_FIELD_PREFIX, SelectedAnswers, extract_answers};

mod grading;
pub use grading::{ExamResult, QuestionResult, grade_exam};
