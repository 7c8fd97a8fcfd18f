pub mod answer_store;
pub mod grading;
pub mod round_timer;

pub use answer_store::{Answer, AnswerStore};
pub use grading::{grade, GradeReport, QuestionResult, RoundSummary};
pub use round_timer::{RoundTimer, TickOutcome};
