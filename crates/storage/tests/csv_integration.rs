use std::path::PathBuf;

use storage::{Storage, StorageError};

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{name}-{}.csv", std::process::id()));
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[tokio::test]
async fn csv_file_loads_exam_sheet() {
    let path = write_fixture(
        "exam-sheet",
        "Question,Option A,Option B,Option C,Option D,Answer,Explanation,Category\n\
         Which stage follows trust vs. mistrust?,Autonomy vs. shame,Initiative vs. guilt,Industry vs. inferiority,Identity vs. role confusion,A,Erikson's second stage.,Human Development\n\
         ,,,,,,,\n\
         \"Which value is core to the profession?\",Profit,Service,Speed,Secrecy,Service,,Ethics\n",
    );

    let storage = Storage::csv_file(&path);
    let questions = storage.questions.fetch_questions().await.expect("fetch");
    std::fs::remove_file(&path).ok();

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].correct_answer(), "Autonomy vs. shame");
    assert_eq!(questions[0].category(), Some("Human Development"));
    assert_eq!(questions[1].prompt(), "Which value is core to the profession?");
    assert_eq!(questions[1].explanation(), None);
    assert_eq!(questions[1].id().value(), 2);
}

#[tokio::test]
async fn csv_file_with_bad_answer_key_reports_row() {
    let path = write_fixture(
        "exam-sheet-bad",
        "question,a,b,c,d,answer\nQ1,w,x,y,z,w\nQ2,w,x,y,z,q\n",
    );

    let storage = Storage::csv_file(&path);
    let err = storage.questions.fetch_questions().await.unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, StorageError::InvalidRow { row: 3, .. }), "unexpected {err:?}");
}
