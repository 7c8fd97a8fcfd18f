//! 测验配置模型
//!
//! 由配置界面（外部协作者）产出，会话开始时读取一次，之后只读

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// 每轮题目数量上限
pub const MAX_QUESTIONS_PER_ROUND: u32 = 20;
/// 每轮时间限制上限（分钟）
pub const MAX_TIME_LIMIT_MINUTES: u32 = 60;
/// 主题为空时的显示名称
pub const DEFAULT_TOPIC: &str = "综合知识";

/// 测验模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    /// 在线答题
    #[default]
    Online,
    /// 导出打印
    Export,
}

/// 单轮配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(alias = "questionsCount", alias = "questionCount")]
    pub question_count: u32,
    #[serde(default, alias = "hasTimeLimit")]
    pub has_time_limit: bool,
    #[serde(
        default,
        alias = "timeLimit",
        alias = "timeLimitMinutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub time_limit_minutes: Option<u32>,
}

impl RoundConfig {
    /// 本轮倒计时秒数；不限时返回 None
    pub fn time_limit_seconds(&self) -> Option<u32> {
        if !self.has_time_limit {
            return None;
        }
        self.time_limit_minutes
            .filter(|minutes| *minutes > 0)
            .map(|minutes| minutes * 60)
    }
}

/// 测验配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub rounds: Vec<RoundConfig>,
    #[serde(default, alias = "quizTopic")]
    pub quiz_topic: String,
    #[serde(default, alias = "quizMode")]
    pub mode: QuizMode,
}

/// 配置校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("至少需要一轮")]
    NoRounds,
    #[error("轮次 ID 重复: {id}")]
    DuplicateRoundId { id: String },
    #[error("轮次 {id} 的题目数量 {count} 超出范围 [1, {max}]")]
    QuestionCountOutOfRange { id: String, count: u32, max: u32 },
    #[error("轮次 {id} 开启了时间限制但未设置时长")]
    MissingTimeLimit { id: String },
    #[error("轮次 {id} 的时间限制 {minutes} 分钟超出范围 [1, {max}]")]
    TimeLimitOutOfRange { id: String, minutes: u32, max: u32 },
    #[error("导出模式的测验不能在线作答")]
    NotOnlineMode,
}

impl QuizConfig {
    /// 配置中的题目总数
    pub fn total_questions(&self) -> u32 {
        self.rounds.iter().map(|round| round.question_count).sum()
    }

    /// 预计用时（分钟），只统计限时轮次
    pub fn estimated_time_minutes(&self) -> u32 {
        self.rounds
            .iter()
            .filter(|round| round.has_time_limit)
            .filter_map(|round| round.time_limit_minutes)
            .sum()
    }

    /// 显示用主题
    pub fn display_topic(&self) -> &str {
        let topic = self.quiz_topic.trim();
        if topic.is_empty() {
            DEFAULT_TOPIC
        } else {
            topic
        }
    }

    /// 第 `index` 轮的倒计时秒数，内容轮次多于配置时返回 None
    pub fn round_time_limit_seconds(&self, index: usize) -> Option<u32> {
        self.rounds.get(index).and_then(RoundConfig::time_limit_seconds)
    }

    /// 校验配置是否满足在线答题的要求
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.rounds.is_empty() {
            return Err(ValidationError::NoRounds);
        }

        let mut seen = HashSet::new();
        for round in &self.rounds {
            if !seen.insert(round.id.as_str()) {
                return Err(ValidationError::DuplicateRoundId {
                    id: round.id.clone(),
                });
            }

            if round.question_count == 0 || round.question_count > MAX_QUESTIONS_PER_ROUND {
                return Err(ValidationError::QuestionCountOutOfRange {
                    id: round.id.clone(),
                    count: round.question_count,
                    max: MAX_QUESTIONS_PER_ROUND,
                });
            }

            if round.has_time_limit {
                match round.time_limit_minutes {
                    None => {
                        return Err(ValidationError::MissingTimeLimit {
                            id: round.id.clone(),
                        })
                    }
                    Some(minutes) if minutes == 0 || minutes > MAX_TIME_LIMIT_MINUTES => {
                        return Err(ValidationError::TimeLimitOutOfRange {
                            id: round.id.clone(),
                            minutes,
                            max: MAX_TIME_LIMIT_MINUTES,
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        if self.mode != QuizMode::Online {
            return Err(ValidationError::NotOnlineMode);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(id: &str, count: u32, limit: Option<u32>) -> RoundConfig {
        RoundConfig {
            id: id.to_string(),
            name: format!("Round {}", id),
            topic: "历史".to_string(),
            question_count: count,
            has_time_limit: limit.is_some(),
            time_limit_minutes: limit,
        }
    }

    fn config(rounds: Vec<RoundConfig>) -> QuizConfig {
        QuizConfig {
            rounds,
            quiz_topic: String::new(),
            mode: QuizMode::Online,
        }
    }

    #[test]
    fn test_totals() {
        let cfg = config(vec![
            round("a", 10, Some(15)),
            round("b", 5, None),
            round("c", 3, Some(2)),
        ]);
        assert_eq!(cfg.total_questions(), 18);
        assert_eq!(cfg.estimated_time_minutes(), 17);
        assert_eq!(cfg.display_topic(), DEFAULT_TOPIC);
    }

    #[test]
    fn test_round_time_limit_seconds() {
        let cfg = config(vec![round("a", 3, Some(1)), round("b", 2, None)]);
        assert_eq!(cfg.round_time_limit_seconds(0), Some(60));
        assert_eq!(cfg.round_time_limit_seconds(1), None);
        // 内容轮次多于配置
        assert_eq!(cfg.round_time_limit_seconds(5), None);
    }

    #[test]
    fn test_validate() {
        assert!(config(vec![round("a", 3, Some(1))]).validate().is_ok());
        assert_eq!(config(vec![]).validate(), Err(ValidationError::NoRounds));
        assert!(matches!(
            config(vec![round("a", 3, None), round("a", 2, None)]).validate(),
            Err(ValidationError::DuplicateRoundId { .. })
        ));
        assert!(matches!(
            config(vec![round("a", 21, None)]).validate(),
            Err(ValidationError::QuestionCountOutOfRange { count: 21, .. })
        ));
        assert!(matches!(
            config(vec![round("a", 3, Some(61))]).validate(),
            Err(ValidationError::TimeLimitOutOfRange { minutes: 61, .. })
        ));

        let mut missing = round("a", 3, None);
        missing.has_time_limit = true;
        assert!(matches!(
            config(vec![missing]).validate(),
            Err(ValidationError::MissingTimeLimit { .. })
        ));

        let mut export = config(vec![round("a", 3, None)]);
        export.mode = QuizMode::Export;
        assert_eq!(export.validate(), Err(ValidationError::NotOnlineMode));
    }

    #[test]
    fn test_deserialize_with_aliases() {
        let raw = r#"
            quizTopic = "地理"
            quizMode = "online"

            [[rounds]]
            id = "r1"
            name = "首都"
            questionsCount = 3
            hasTimeLimit = true
            timeLimit = 1
        "#;
        let cfg: QuizConfig = toml::from_str(raw).unwrap();
        assert_eq!(cfg.display_topic(), "地理");
        assert_eq!(cfg.rounds[0].question_count, 3);
        assert_eq!(cfg.rounds[0].time_limit_seconds(), Some(60));
    }
}
