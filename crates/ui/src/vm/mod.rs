mod quiz_vm;
mod report_vm;
mod time_fmt;

pub use quiz_vm::{
    GridCellVm, OPTION_LABELS, OptionVm, PinnedVm, QuestionVm, QuizIntent, QuizOutcome, QuizVm,
    start_quiz,
};
pub use report_vm::{
    CategoryRowVm, FeedbackVm, ReportVm, THRESHOLD_MARKERS, band_class, band_label, bar_width,
    format_percent, map_report, marker_style,
};
pub use time_fmt::{format_datetime, format_elapsed};
