pub mod cursor;
pub mod session;

pub use cursor::{ProgressTable, QuizCursor};
pub use session::{
    ExitSignal, ExpiryPolicy, NavOutcome, QuizSession, SessionError, SessionSnapshot,
    SessionStatus, TickEffect,
};
