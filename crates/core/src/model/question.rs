use serde::Serialize;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many choices.
pub const OPTION_COUNT: usize = 4;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question, as assembled by a repository adapter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionDraft {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub category: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft and assign it an id.
    ///
    /// Text is kept exactly as provided apart from blank optional fields,
    /// which collapse to `None`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, the option list is not
    /// exactly [`OPTION_COUNT`] distinct non-blank entries, or the correct
    /// answer is not one of the options.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }

        let options: [String; OPTION_COUNT] =
            self.options
                .try_into()
                .map_err(|options: Vec<String>| QuestionError::OptionCount {
                    len: options.len(),
                })?;

        for (position, option) in options.iter().enumerate() {
            if option.trim().is_empty() {
                return Err(QuestionError::EmptyOption { position });
            }
            if options[..position].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }

        if !options.contains(&self.correct_answer) {
            return Err(QuestionError::AnswerNotInOptions {
                answer: self.correct_answer,
            });
        }

        Ok(Question {
            id,
            prompt: self.prompt,
            options,
            correct_answer: self.correct_answer,
            explanation: non_blank(self.explanation),
            category: non_blank(self.category),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// A validated multiple-choice question. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct_answer: String,
    explanation: Option<String>,
    category: Option<String>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Whether `option` is one of this question's choices (exact match).
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|candidate| candidate == option)
    }

    /// Whether `answer` matches the answer key.
    ///
    /// Comparison is exact: no case folding or whitespace trimming.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt is empty")]
    EmptyPrompt,

    #[error("expected {OPTION_COUNT} options, found {len}")]
    OptionCount { len: usize },

    #[error("option {position} is empty")]
    EmptyOption { position: usize },

    #[error("option is listed twice: {option}")]
    DuplicateOption { option: String },

    #[error("correct answer is not one of the options: {answer}")]
    AnswerNotInOptions { answer: String },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            prompt: "Which theory centres on attachment?".into(),
            options: vec![
                "Bowlby".into(),
                "Piaget".into(),
                "Erikson".into(),
                "Freud".into(),
            ],
            correct_answer: "Bowlby".into(),
            explanation: Some("Attachment theory is Bowlby's.".into()),
            category: Some("Human Development".into()),
        }
    }

    #[test]
    fn valid_draft_builds_question() {
        let question = draft().validate(QuestionId::new(3)).unwrap();

        assert_eq!(question.id(), QuestionId::new(3));
        assert_eq!(question.options().len(), OPTION_COUNT);
        assert_eq!(question.correct_answer(), "Bowlby");
        assert_eq!(question.category(), Some("Human Development"));
        assert!(question.has_option("Freud"));
        assert!(!question.has_option("freud"));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let mut d = draft();
        d.prompt = "   ".into();
        assert_eq!(
            d.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::EmptyPrompt
        );
    }

    #[test]
    fn option_count_must_be_four() {
        let mut d = draft();
        d.options.pop();
        assert_eq!(
            d.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::OptionCount { len: 3 }
        );
    }

    #[test]
    fn blank_and_duplicate_options_are_rejected() {
        let mut blank = draft();
        blank.options[2] = " ".into();
        assert_eq!(
            blank.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::EmptyOption { position: 2 }
        );

        let mut dup = draft();
        dup.options[3] = "Piaget".into();
        assert!(matches!(
            dup.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::DuplicateOption { option } if option == "Piaget"
        ));
    }

    #[test]
    fn answer_key_must_be_an_option() {
        let mut d = draft();
        d.correct_answer = "bowlby".into();
        assert!(matches!(
            d.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::AnswerNotInOptions { .. }
        ));
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let mut d = draft();
        d.explanation = Some(String::new());
        d.category = Some("  ".into());
        let question = d.validate(QuestionId::new(1)).unwrap();
        assert_eq!(question.explanation(), None);
        assert_eq!(question.category(), None);
    }

    #[test]
    fn correctness_is_exact_match() {
        let question = draft().validate(QuestionId::new(1)).unwrap();
        assert!(question.is_correct("Bowlby"));
        assert!(!question.is_correct("bowlby"));
        assert!(!question.is_correct("Bowlby "));
    }
}
