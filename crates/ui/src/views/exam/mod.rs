mod keyboard;
mod results;
mod view;

pub use view::ExamView;

#[cfg(test)]
pub(crate) use view::ExamTestHandles;
