//! 答题光标
//!
//! 封装"我正在答第几轮的第几题"这一信息，以及基于实际内容长度的边界计算

use crate::models::QuizContent;
use serde::Serialize;
use std::fmt::Display;

/// 答题光标（从 0 开始）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuizCursor {
    pub round: usize,
    pub question: usize,
}

impl QuizCursor {
    pub fn new(round: usize, question: usize) -> Self {
        Self { round, question }
    }

    /// 内容中的第一道题，跳过空轮；内容为空时返回 None
    pub fn first(content: &QuizContent) -> Option<Self> {
        (0..content.round_count())
            .find(|&round| content.question_count(round) > 0)
            .map(|round| Self::new(round, 0))
    }

    /// 下一道题的位置；已经是最后一题时返回 None
    pub fn next(self, content: &QuizContent) -> Option<Self> {
        if self.question + 1 < content.question_count(self.round) {
            return Some(Self::new(self.round, self.question + 1));
        }

        (self.round + 1..content.round_count())
            .find(|&round| content.question_count(round) > 0)
            .map(|round| Self::new(round, 0))
    }

    /// 上一道题的位置；从某轮第一题回到上一轮的最后一题，已经是第一题时返回 None
    pub fn previous(self, content: &QuizContent) -> Option<Self> {
        if self.question > 0 {
            let last = content.question_count(self.round).saturating_sub(1);
            return Some(Self::new(self.round, (self.question - 1).min(last)));
        }

        (0..self.round)
            .rev()
            .find(|&round| content.question_count(round) > 0)
            .map(|round| Self::new(round, content.question_count(round) - 1))
    }

    pub fn is_last_question(self, content: &QuizContent) -> bool {
        self.next(content).is_none()
    }

    pub fn is_first_question(self, content: &QuizContent) -> bool {
        self.previous(content).is_none()
    }
}

impl Display for QuizCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[第 {} 轮 第 {} 题]", self.round + 1, self.question + 1)
    }
}

/// 累计题数表，用于计算整体进度
///
/// `offsets[r]` 是第 r 轮之前所有轮次的题目总数，轮次题数不等时同样准确
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressTable {
    offsets: Vec<usize>,
    total: usize,
}

impl ProgressTable {
    pub fn new(content: &QuizContent) -> Self {
        let mut offsets = Vec::with_capacity(content.round_count());
        let mut total = 0;
        for round in &content.rounds {
            offsets.push(total);
            total += round.questions.len();
        }
        Self { offsets, total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// 光标对应的全局题号（从 1 开始）
    pub fn position(&self, cursor: QuizCursor) -> usize {
        match self.offsets.get(cursor.round) {
            Some(offset) => (offset + cursor.question + 1).min(self.total),
            None => self.total,
        }
    }

    /// 整体进度，范围 [0, 1]
    pub fn fraction(&self, cursor: QuizCursor) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position(cursor) as f64 / self.total as f64
    }
}
