pub mod logging;

pub use logging::{format_clock, truncate_text, AttemptStats};
