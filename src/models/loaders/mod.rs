pub mod toml_loader;

pub use toml_loader::{load_quiz_config, load_quiz_content, parse_quiz_content};
