use std::path::{Path, PathBuf};

use async_trait::async_trait;
use exam_core::model::Question;
use tracing::{debug, info};

use crate::mapping::map_grid;
use crate::repository::{QuestionRepository, StorageError};

/// Questions read from a CSV export of the question sheet.
#[derive(Debug, Clone)]
pub struct CsvRepository {
    path: PathBuf,
}

impl CsvRepository {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionRepository for CsvRepository {
    async fn fetch_questions(&self) -> Result<Vec<Question>, StorageError> {
        debug!(path = %self.path.display(), "reading question csv");
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|err| match err.kind() {
                std::io::ErrorKind::NotFound => StorageError::NotFound,
                _ => StorageError::Io(err),
            })?;
        let questions = map_grid(&read_grid(&text)?)?;
        info!(path = %self.path.display(), count = questions.len(), "loaded questions");
        Ok(questions)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

/// Parse CSV text into rows of cells. Rows may differ in length.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed CSV.
pub(crate) fn read_grid(text: &str) -> Result<Vec<Vec<String>>, StorageError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_owned).collect());
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_grid_handles_quotes_and_ragged_rows() {
        let text = "question,a,b,c,d,answer\n\"Pick, carefully\",x,y,z,w,x\nshort,row\n";
        let grid = read_grid(text).unwrap();
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[1][0], "Pick, carefully");
        assert_eq!(grid[2].len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let repo = CsvRepository::new("/definitely/not/here/questions.csv");
        let err = repo.fetch_questions().await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn reads_file_on_single_threaded_runtime() {
        let path = std::env::temp_dir().join(format!("csv-repo-{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "Question,A,B,C,D,Answer\nPick one?,North,South,East,West,b\n",
        )
        .unwrap();

        let questions = CsvRepository::new(&path).fetch_questions().await;
        std::fs::remove_file(&path).ok();

        let questions = questions.unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct_answer(), "South");
    }
}
