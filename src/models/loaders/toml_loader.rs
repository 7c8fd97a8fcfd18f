use crate::error::AppResult;
use crate::models::quiz_config::QuizConfig;
use crate::models::quiz_content::QuizContent;
use anyhow::{Context, Result};
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载测验配置
pub async fn load_quiz_config(path: &Path) -> Result<QuizConfig> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取配置文件: {}", path.display()))?;

    let config: QuizConfig = toml::from_str(&content)
        .with_context(|| format!("无法解析配置文件: {}", path.display()))?;

    tracing::info!(
        "成功加载配置: {} 轮, 共 {} 题",
        config.rounds.len(),
        config.total_questions()
    );

    Ok(config)
}

/// 从文件加载测验内容
///
/// `.json` 按生成接口的响应解析，其余按 TOML 解析
pub async fn load_quiz_content(path: &Path) -> Result<QuizContent> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取内容文件: {}", path.display()))?;

    let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
    let content = parse_quiz_content(&raw, is_json)
        .with_context(|| format!("无法解析内容文件: {}", path.display()))?;

    tracing::info!(
        "成功加载内容: {} 轮, 共 {} 题",
        content.round_count(),
        content.total_questions()
    );

    Ok(content)
}

/// 解析测验内容文本
///
/// JSON 同时接受裸内容和生成接口的 `{ "response": { ... } }` 包装
pub fn parse_quiz_content(raw: &str, is_json: bool) -> AppResult<QuizContent> {
    if !is_json {
        return Ok(toml::from_str(raw)?);
    }

    let value: JsonValue = serde_json::from_str(raw)?;
    let inner = match value.get("response") {
        Some(response) if response.is_object() => response.clone(),
        _ => value,
    };

    Ok(serde_json::from_value(inner)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml_content() {
        let raw = r#"
            [[rounds]]
            title = "首都"

            [[rounds.questions]]
            question = "法国的首都是？"
            answer = "Paris"
        "#;
        let content = parse_quiz_content(raw, false).unwrap();
        assert_eq!(content.round_count(), 1);
        assert_eq!(content.question(0, 0).unwrap().answer, "Paris");
    }

    #[test]
    fn test_parse_json_envelope() {
        let raw = r#"{"response": {"rounds": [{"title": "T", "questions": [{"question": "Q", "answer": "A"}]}]}}"#;
        let content = parse_quiz_content(raw, true).unwrap();
        assert_eq!(content.total_questions(), 1);

        let bare = r#"{"rounds": [{"title": "T", "questions": []}]}"#;
        let content = parse_quiz_content(bare, true).unwrap();
        assert_eq!(content.round_count(), 1);
        assert!(content.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let result = load_quiz_config(Path::new("definitely/missing/quiz.toml")).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_load_content_from_json_file() {
        let path = std::env::temp_dir().join(format!("quiz_content_{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{"response": {"rounds": [{"title": "T", "questions": [{"question": "Q", "answer": "A"}]}]}}"#,
        )
        .unwrap();

        let content = tokio_test::block_on(load_quiz_content(&path)).unwrap();
        assert_eq!(content.round_title(0), Some("T"));
        assert_eq!(content.total_questions(), 1);

        std::fs::remove_file(&path).unwrap();
    }
}
