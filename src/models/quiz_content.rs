//! 测验内容模型
//!
//! 由内容生成管线（外部协作者）产出。轮数与每轮题数不保证与配置一致，
//! 所有边界都以这里的实际长度为准。

use serde::{Deserialize, Serialize};

/// 一道题及其标准答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QAPair {
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

/// 单轮内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoundContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QAPair>,
}

/// 测验内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct QuizContent {
    #[serde(default)]
    pub rounds: Vec<RoundContent>,
}

impl QuizContent {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// 第 `round` 轮的实际题数，越界返回 0
    pub fn question_count(&self, round: usize) -> usize {
        self.rounds.get(round).map_or(0, |r| r.questions.len())
    }

    pub fn total_questions(&self) -> usize {
        self.rounds.iter().map(|r| r.questions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_questions() == 0
    }

    pub fn question(&self, round: usize, question: usize) -> Option<&QAPair> {
        self.rounds.get(round)?.questions.get(question)
    }

    pub fn round_title(&self, round: usize) -> Option<&str> {
        self.rounds.get(round).map(|r| r.title.as_str())
    }
}
