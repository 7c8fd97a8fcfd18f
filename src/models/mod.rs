pub mod loaders;
pub mod quiz_config;
pub mod quiz_content;

pub use loaders::{load_quiz_config, load_quiz_content};
pub use quiz_config::{QuizConfig, QuizMode, RoundConfig, ValidationError};
pub use quiz_content::{QAPair, QuizContent, RoundContent};
