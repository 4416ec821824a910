use serde::Serialize;

use crate::model::band::Percentage;
use crate::model::question::Question;

/// Correct/total tally for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub correct: u32,
    pub total: u32,
}

impl CategoryScore {
    #[must_use]
    pub fn percentage(&self) -> Option<Percentage> {
        Percentage::of(self.correct, self.total)
    }
}

/// Grading result for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    pub index: usize,
    pub selected: Option<String>,
    pub is_correct: bool,
}

/// Score computed once when a session is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreReport {
    total_correct: u32,
    total_questions: u32,
    per_category: Vec<CategoryScore>,
    outcomes: Vec<QuestionOutcome>,
}

impl ScoreReport {
    /// Grade `answers` against the answer key of `questions`.
    ///
    /// `answers` is parallel to `questions`; a missing entry counts as unanswered.
    /// Categories appear in the order they are first seen. Questions without a
    /// category count toward the totals only.
    #[must_use]
    pub fn grade(questions: &[Question], answers: &[Option<String>]) -> Self {
        let mut total_correct = 0_u32;
        let mut per_category: Vec<CategoryScore> = Vec::new();
        let mut outcomes = Vec::with_capacity(questions.len());

        for (index, question) in questions.iter().enumerate() {
            let selected = answers.get(index).cloned().flatten();
            let is_correct = selected
                .as_deref()
                .is_some_and(|answer| question.is_correct(answer));

            if is_correct {
                total_correct = total_correct.saturating_add(1);
            }

            if let Some(category) = question.category() {
                let slot = match per_category.iter().position(|c| c.category == category) {
                    Some(pos) => &mut per_category[pos],
                    None => {
                        per_category.push(CategoryScore {
                            category: category.to_owned(),
                            correct: 0,
                            total: 0,
                        });
                        let last = per_category.len() - 1;
                        &mut per_category[last]
                    }
                };
                slot.total = slot.total.saturating_add(1);
                if is_correct {
                    slot.correct = slot.correct.saturating_add(1);
                }
            }

            outcomes.push(QuestionOutcome {
                index,
                selected,
                is_correct,
            });
        }

        Self {
            total_correct,
            total_questions: u32::try_from(questions.len()).unwrap_or(u32::MAX),
            per_category,
            outcomes,
        }
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn total_incorrect(&self) -> u32 {
        self.total_questions - self.total_correct
    }

    #[must_use]
    pub fn percentage(&self) -> Option<Percentage> {
        Percentage::of(self.total_correct, self.total_questions)
    }

    #[must_use]
    pub fn per_category(&self) -> &[CategoryScore] {
        &self.per_category
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryScore> {
        self.per_category.iter().find(|c| c.category == name)
    }

    #[must_use]
    pub fn outcomes(&self) -> &[QuestionOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn outcome(&self, index: usize) -> Option<&QuestionOutcome> {
        self.outcomes.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::band::Band;
    use crate::model::ids::QuestionId;
    use crate::model::question::QuestionDraft;

    fn question(position: usize, answer: &str, category: Option<&str>) -> Question {
        QuestionDraft {
            prompt: format!("Question {position}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: answer.into(),
            explanation: None,
            category: category.map(str::to_owned),
        }
        .validate(QuestionId::from_position(position))
        .unwrap()
    }

    #[test]
    fn exact_match_scoring() {
        let questions = vec![question(0, "B", None)];

        let right = ScoreReport::grade(&questions, &[Some("B".into())]);
        assert_eq!(right.total_correct(), 1);

        let wrong_case = ScoreReport::grade(&questions, &[Some("b".into())]);
        assert_eq!(wrong_case.total_correct(), 0);
        assert_eq!(wrong_case.total_incorrect(), 1);
    }

    #[test]
    fn categories_aggregate_in_first_seen_order() {
        let questions = vec![
            question(0, "A", Some("X")),
            question(1, "B", Some("Y")),
            question(2, "C", Some("X")),
        ];
        let answers = vec![Some("A".into()), Some("B".into()), Some("D".into())];

        let report = ScoreReport::grade(&questions, &answers);

        assert_eq!(report.total_correct(), 2);
        assert_eq!(report.total_questions(), 3);
        assert_eq!(
            report.per_category(),
            &[
                CategoryScore {
                    category: "X".into(),
                    correct: 1,
                    total: 2
                },
                CategoryScore {
                    category: "Y".into(),
                    correct: 1,
                    total: 1
                },
            ]
        );
        assert_eq!(report.category("X").unwrap().percentage().unwrap().value(), 50.0);
        assert_eq!(report.percentage().unwrap().band(), Band::AtPace);
    }

    #[test]
    fn unanswered_and_uncategorised_questions() {
        let questions = vec![question(0, "A", None), question(1, "A", Some("X"))];

        let report = ScoreReport::grade(&questions, &[None, None]);

        assert_eq!(report.total_correct(), 0);
        assert_eq!(report.total_questions(), 2);
        assert_eq!(report.per_category().len(), 1);
        assert_eq!(report.category("X").unwrap().total, 1);
        assert_eq!(report.outcome(0).unwrap().selected, None);
        assert!(!report.outcome(1).unwrap().is_correct);
    }

    #[test]
    fn short_answer_list_counts_as_unanswered() {
        let questions = vec![question(0, "A", None), question(1, "B", None)];
        let report = ScoreReport::grade(&questions, &[Some("A".into())]);
        assert_eq!(report.total_correct(), 1);
        assert_eq!(report.outcomes().len(), 2);
    }
}
