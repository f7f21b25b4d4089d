use std::collections::{BTreeSet, HashMap};

use thiserror::Error;

use crate::model::entity::Choice;

/// Form fields carrying a selected choice id are named `choice<N>`.
pub const CHOICE_FIELD_PREFIX: &str = "choice";

pub type AnswerResult<T> = std::result::Result<T, AnswerError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerError {
    #[error("field `{field}` does not hold a choice id: `{value}`")]
    MalformedChoice { field: String, value: String },
    #[error("choice {choice_id} does not belong to this exam")]
    UnknownChoice { choice_id: i64 },
}

/// Collects the choice ids of every `choice*` field. Other fields are ignored,
/// duplicates collapse.
pub fn extract_answers<K, V>(fields: &[(K, V)]) -> AnswerResult<BTreeSet<i64>>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fields
        .iter()
        .filter(|(key, _)| key.as_ref().starts_with(CHOICE_FIELD_PREFIX))
        .map(|(key, value)| {
            value
                .as_ref()
                .trim()
                .parse::<i64>()
                .map_err(|_| AnswerError::MalformedChoice {
                    field: key.as_ref().to_string(),
                    value: value.as_ref().to_string(),
                })
        })
        .collect()
}

/// Validated `(question_id, choice_id)` pairs of one exam attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedAnswers {
    pairs: Vec<(i64, i64)>,
}

impl SelectedAnswers {
    /// Binds every selected id to its question. `course_choices` must hold all
    /// choices of the exam's questions; anything else is rejected.
    pub fn resolve(selected: &BTreeSet<i64>, course_choices: &[Choice]) -> AnswerResult<Self> {
        let owners: HashMap<i64, i64> = course_choices
            .iter()
            .map(|c| (c.id(), c.question_id()))
            .collect();

        let pairs = selected
            .iter()
            .map(|&choice_id| {
                owners
                    .get(&choice_id)
                    .map(|&question_id| (question_id, choice_id))
                    .ok_or(AnswerError::UnknownChoice { choice_id })
            })
            .collect::<AnswerResult<Vec<_>>>()?;

        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[(i64, i64)] {
        &self.pairs
    }

    pub fn choice_ids(&self) -> Vec<i64> {
        self.pairs.iter().map(|&(_, choice_id)| choice_id).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
