//! Turns a header row plus data rows into validated questions.
//!
//! Both the Sheets values API and CSV exports produce a plain grid of strings,
//! so every adapter funnels through [`map_grid`].

use exam_core::model::{OPTION_COUNT, Question, QuestionDraft, QuestionId};

use crate::repository::StorageError;

const PROMPT_HEADERS: &[&str] = &["question", "prompt", "question text"];
const ANSWER_HEADERS: &[&str] = &["answer", "correct answer", "correct", "correct option"];
const EXPLANATION_HEADERS: &[&str] = &["explanation", "rationale"];
const CATEGORY_HEADERS: &[&str] = &["category", "domain", "topic", "content area"];
const OPTION_LETTERS: [char; OPTION_COUNT] = ['a', 'b', 'c', 'd'];

/// Column positions resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ColumnMap {
    prompt: usize,
    options: [usize; OPTION_COUNT],
    answer: usize,
    explanation: Option<usize>,
    category: Option<usize>,
}

impl ColumnMap {
    pub(crate) fn from_headers(headers: &[String]) -> Result<Self, StorageError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let find = |names: &[&str]| {
            normalized
                .iter()
                .position(|header| names.contains(&header.as_str()))
        };

        let prompt = find(PROMPT_HEADERS).ok_or_else(|| missing("question"))?;
        let answer = find(ANSWER_HEADERS).ok_or_else(|| missing("answer"))?;

        let mut options = [0_usize; OPTION_COUNT];
        for (slot, letter) in OPTION_LETTERS.iter().enumerate() {
            let aliases = [
                format!("option {letter}"),
                letter.to_string(),
                format!("option {}", slot + 1),
                format!("choice {letter}"),
            ];
            options[slot] = normalized
                .iter()
                .position(|header| aliases.iter().any(|alias| alias == header))
                .ok_or_else(|| missing(&format!("option {}", letter.to_ascii_uppercase())))?;
        }

        Ok(Self {
            prompt,
            options,
            answer,
            explanation: find(EXPLANATION_HEADERS),
            category: find(CATEGORY_HEADERS),
        })
    }

    /// Build a draft from one data row. Short rows read as empty cells.
    fn draft(&self, row: &[String]) -> QuestionDraft {
        let cell = |index: usize| row.get(index).map_or("", |value| value.trim());
        let optional = |index: Option<usize>| {
            index
                .map(cell)
                .filter(|value| !value.is_empty())
                .map(str::to_owned)
        };

        let options: Vec<String> = self.options.iter().map(|&i| cell(i).to_owned()).collect();
        let raw_answer = cell(self.answer);
        let correct_answer = resolve_answer(raw_answer, &options);

        QuestionDraft {
            prompt: cell(self.prompt).to_owned(),
            options,
            correct_answer,
            explanation: optional(self.explanation),
            category: optional(self.category),
        }
    }
}

fn missing(column: &str) -> StorageError {
    StorageError::Schema(format!("missing column: {column}"))
}

/// Lowercase, trim, and turn runs of `_`/whitespace into single spaces.
fn normalize_header(raw: &str) -> String {
    raw.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Answer cells hold either the option text or its letter.
fn resolve_answer(raw: &str, options: &[String]) -> String {
    if options.iter().any(|option| option == raw) {
        return raw.to_owned();
    }
    let mut chars = raw.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        let letter = letter.to_ascii_lowercase();
        if let Some(slot) = OPTION_LETTERS.iter().position(|&l| l == letter) {
            if let Some(option) = options.get(slot) {
                return option.clone();
            }
        }
    }
    raw.to_owned()
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Map a grid whose first row is the header into questions.
///
/// Returned questions are numbered by their order among non-blank rows.
/// Errors name the 1-based sheet row.
///
/// # Errors
///
/// `StorageError::Schema` if the grid is empty or a required column is missing;
/// `StorageError::InvalidRow` if a row fails question validation.
pub fn map_grid(grid: &[Vec<String>]) -> Result<Vec<Question>, StorageError> {
    let Some((headers, rows)) = grid.split_first() else {
        return Err(StorageError::Schema("sheet has no header row".into()));
    };
    let columns = ColumnMap::from_headers(headers)?;

    let mut questions = Vec::with_capacity(rows.len());
    for (offset, row) in rows.iter().enumerate() {
        if is_blank(row) {
            continue;
        }
        // Header is row 1, so the first data row is row 2.
        let sheet_row = offset + 2;
        let question = columns
            .draft(row)
            .validate(QuestionId::from_position(questions.len()))
            .map_err(|source| StorageError::InvalidRow {
                row: sheet_row,
                source,
            })?;
        questions.push(question);
    }

    Ok(questions)
}
