//! Section quizzes.

use serde::{Deserialize, Serialize};

use crate::schema::InvariantError;

/// Minimum number of answer options a question must offer
pub const MIN_OPTIONS: usize = 2;

/// An assessment attached to a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(id: impl Into<String>, title: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions,
        }
    }

    /// Look up a question by ID
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// A multiple-choice item with exactly one correct option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,

    /// Question text
    pub question: String,

    /// Answer options, in display order
    pub options: Vec<String>,

    /// Index into `options` of the correct answer
    pub correct_answer: usize,
}

impl Question {
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: usize,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer,
        }
    }

    /// Every invariant this question breaks
    pub fn violations(&self) -> Vec<InvariantError> {
        let mut problems = Vec::new();
        let len = self.options.len();

        if len < MIN_OPTIONS {
            problems.push(InvariantError::TooFewOptions {
                len,
                min: MIN_OPTIONS,
            });
        }
        if self.correct_answer >= len {
            problems.push(InvariantError::CorrectAnswerOutOfRange {
                index: self.correct_answer,
                len,
            });
        }

        problems
    }

    /// Check the question invariants, reporting the first one broken
    pub fn check(&self) -> Result<(), InvariantError> {
        match self.violations().into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(()),
        }
    }

    /// The correct option text, if the index is in range
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }

    /// Whether `choice` is the correct option index
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_answer && choice < self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_question() {
        let q = Question::new("q1", "2 + 2?", ["3", "4", "5"], 1);
        assert!(q.check().is_ok());
        assert_eq!(q.correct_option(), Some("4"));
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
    }

    #[test]
    fn test_correct_answer_out_of_range() {
        let q = Question::new("q1", "Pick one", ["a", "b", "c", "d"], 5);
        let err = q.check().unwrap_err();
        assert!(matches!(
            err,
            InvariantError::CorrectAnswerOutOfRange { index: 5, len: 4 }
        ));
        assert_eq!(q.correct_option(), None);
    }

    #[test]
    fn test_too_few_options_reports_both_problems() {
        let q = Question::new("q1", "Only one?", ["yes"], 1);
        let problems = q.violations();
        assert_eq!(problems.len(), 2);
        assert!(matches!(problems[0], InvariantError::TooFewOptions { len: 1, min: 2 }));
    }

    #[test]
    fn test_question_serializes_camel_case() {
        let q = Question::new("q1", "?", ["a", "b"], 0);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["correctAnswer"], 0);
    }
}
