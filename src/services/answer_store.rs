//! 答案存储 - 业务能力层
//!
//! 只负责"记住用户写了什么"，不关心光标和流程

use serde::{Deserialize, Serialize};

/// 一条用户答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub round_index: usize,
    pub question_index: usize,
    pub text: String,
}

/// 答案存储
///
/// 以 (轮次, 题号) 为键的 upsert 存储，后写覆盖先写，不保留历史
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStore {
    entries: Vec<Answer>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入答案：已存在则替换文本，否则追加
    pub fn record(&mut self, round_index: usize, question_index: usize, text: impl Into<String>) {
        let text = text.into();
        match self
            .entries
            .iter_mut()
            .find(|a| a.round_index == round_index && a.question_index == question_index)
        {
            Some(existing) => existing.text = text,
            None => self.entries.push(Answer {
                round_index,
                question_index,
                text,
            }),
        }
    }

    /// 读取答案，未作答返回空字符串
    pub fn get(&self, round_index: usize, question_index: usize) -> &str {
        self.entries
            .iter()
            .find(|a| a.round_index == round_index && a.question_index == question_index)
            .map_or("", |a| a.text.as_str())
    }

    /// 非空答案的数量
    pub fn answered_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|a| !a.text.trim().is_empty())
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
