#![forbid(unsafe_code)]

pub mod csv_file;
pub mod mapping;
pub mod repository;
pub mod sheets;

pub use csv_file::CsvRepository;
pub use repository::{InMemoryRepository, QuestionRepository, Storage, StorageError};
pub use sheets::{SheetsAccess, SheetsConfig, SheetsRepository};
