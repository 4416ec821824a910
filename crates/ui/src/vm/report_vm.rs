use exam_core::model::{AT_PACE_MAX, AT_PACE_MIN, Band};
use services::{FeedbackItem, ReportView, ScoreLine};

use crate::vm::time_fmt::format_elapsed;

/// Vertical markers drawn across the category chart.
pub const THRESHOLD_MARKERS: [f64; 2] = [AT_PACE_MIN, AT_PACE_MAX];

#[must_use]
pub fn band_label(band: Band) -> &'static str {
    match band {
        Band::Below => "Below pace",
        Band::AtPace => "At pace",
        Band::Above => "Above pace",
    }
}

#[must_use]
pub fn band_class(band: Band) -> &'static str {
    match band {
        Band::Below => "band band--below",
        Band::AtPace => "band band--at-pace",
        Band::Above => "band band--above",
    }
}

#[must_use]
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}%")
}

/// CSS width for a chart bar, clamped to the chart.
#[must_use]
pub fn bar_width(percent: f64) -> String {
    format!("width: {:.2}%;", percent.clamp(0.0, 100.0))
}

#[must_use]
pub fn marker_style(percent: f64) -> String {
    format!("left: {percent:.2}%;")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryRowVm {
    pub name: String,
    pub score_label: String,
    pub percent_label: String,
    pub band_label: &'static str,
    pub band_class: &'static str,
    pub bar_style: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub number: usize,
    pub prompt: String,
    pub selected_label: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub explanation: Option<String>,
    pub category: Option<String>,
    pub pinned: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportVm {
    pub score_label: String,
    pub percent_label: String,
    pub band_label: &'static str,
    pub band_class: &'static str,
    pub incorrect_label: String,
    pub elapsed_label: String,
    pub categories: Vec<CategoryRowVm>,
    pub feedback: Vec<FeedbackVm>,
}

fn score_label(line: &ScoreLine) -> String {
    format!("{} / {}", line.correct, line.total)
}

fn map_feedback(item: &FeedbackItem) -> FeedbackVm {
    let (status_label, status_class) = if item.is_correct {
        ("Correct", "feedback feedback--correct")
    } else if item.selected.is_none() {
        ("Unanswered", "feedback feedback--unanswered")
    } else {
        ("Incorrect", "feedback feedback--incorrect")
    };
    FeedbackVm {
        number: item.number,
        prompt: item.prompt.clone(),
        selected_label: item
            .selected
            .clone()
            .unwrap_or_else(|| "No answer".to_string()),
        correct_answer: item.correct_answer.clone(),
        is_correct: item.is_correct,
        status_label,
        status_class,
        explanation: item.explanation.clone(),
        category: item.category.clone(),
        pinned: item.pinned,
    }
}

#[must_use]
pub fn map_report(view: &ReportView) -> ReportVm {
    let categories = view
        .categories
        .iter()
        .map(|category| CategoryRowVm {
            name: category.name.clone(),
            score_label: score_label(&category.score),
            percent_label: format_percent(category.score.percent),
            band_label: band_label(category.score.band),
            band_class: band_class(category.score.band),
            bar_style: bar_width(category.score.percent),
        })
        .collect();

    let incorrect = view.incorrect().count();
    ReportVm {
        score_label: score_label(&view.overall),
        percent_label: format_percent(view.overall.percent),
        band_label: band_label(view.overall.band),
        band_class: band_class(view.overall.band),
        incorrect_label: match incorrect {
            0 => "Every question correct".to_string(),
            1 => "1 question to review".to_string(),
            n => format!("{n} questions to review"),
        },
        elapsed_label: format_elapsed(view.elapsed_secs),
        categories,
        feedback: view.questions.iter().map(map_feedback).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use exam_core::model::{QuestionDraft, QuestionId, QuizSession};
    use exam_core::time::fixed_now;

    fn build_view(answers: &[Option<&str>]) -> ReportView {
        let questions: Vec<_> = answers
            .iter()
            .enumerate()
            .map(|(position, _)| {
                QuestionDraft {
                    prompt: format!("Q{}", position + 1),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer: "a".into(),
                    explanation: Some("Because a.".into()),
                    category: Some((if position % 2 == 0 { "Even" } else { "Odd" }).into()),
                }
                .validate(QuestionId::from_position(position))
                .unwrap()
            })
            .collect();
        let mut session = QuizSession::new(questions).unwrap();
        for (index, answer) in answers.iter().enumerate() {
            if let Some(answer) = answer {
                session.select_answer(index, answer).unwrap();
            }
        }
        let report = session.submit().unwrap().clone();
        let started = fixed_now();
        ReportView::build(&session, &report, started, started + Duration::seconds(754))
    }

    #[test]
    fn report_labels_and_bands() {
        let view = build_view(&[Some("a"), Some("b"), Some("a"), None]);
        let vm = map_report(&view);

        assert_eq!(vm.score_label, "2 / 4");
        assert_eq!(vm.percent_label, "50.00%");
        assert_eq!(vm.band_label, "Below pace");
        assert_eq!(vm.band_class, "band band--below");
        assert_eq!(vm.incorrect_label, "2 questions to review");
        assert_eq!(vm.elapsed_label, "12:34");

        assert_eq!(vm.categories.len(), 2);
        assert_eq!(vm.categories[0].name, "Even");
        assert_eq!(vm.categories[0].percent_label, "100.00%");
        assert_eq!(vm.categories[0].band_class, "band band--above");
        assert_eq!(vm.categories[0].bar_style, "width: 100.00%;");
        assert_eq!(vm.categories[1].bar_style, "width: 0.00%;");
    }

    #[test]
    fn feedback_distinguishes_wrong_and_unanswered() {
        let view = build_view(&[Some("a"), Some("b"), Some("a"), None]);
        let vm = map_report(&view);

        assert_eq!(vm.feedback[0].status_label, "Correct");
        assert_eq!(vm.feedback[1].status_label, "Incorrect");
        assert_eq!(vm.feedback[1].selected_label, "b");
        assert_eq!(vm.feedback[1].correct_answer, "a");
        assert_eq!(vm.feedback[3].status_label, "Unanswered");
        assert_eq!(vm.feedback[3].selected_label, "No answer");
        assert_eq!(vm.feedback[3].explanation.as_deref(), Some("Because a."));
    }

    #[test]
    fn thresholds_render_at_pass_rate_markers() {
        assert_eq!(marker_style(THRESHOLD_MARKERS[0]), "left: 65.33%;");
        assert_eq!(marker_style(THRESHOLD_MARKERS[1]), "left: 71.33%;");
        assert_eq!(band_label(Band::AtPace), "At pace");
        assert_eq!(bar_width(140.0), "width: 100.00%;");
    }
}
