//! 评分引擎 - 业务能力层
//!
//! 纯函数：同样的 (内容, 答案) 永远得到同样的结果，可重复调用用于展示

use crate::models::QuizContent;
use crate::services::answer_store::AnswerStore;
use serde::Serialize;

/// 单题评分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionResult {
    pub round_index: usize,
    pub question_index: usize,
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

/// 单轮汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundSummary {
    pub round_index: usize,
    pub title: String,
    pub correct: usize,
    pub total: usize,
}

/// 评分报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeReport {
    pub results: Vec<QuestionResult>,
    pub rounds: Vec<RoundSummary>,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub score_percentage: u32,
}

impl GradeReport {
    /// 某一轮的逐题结果
    pub fn round_results(&self, round_index: usize) -> impl Iterator<Item = &QuestionResult> {
        self.results
            .iter()
            .filter(move |r| r.round_index == round_index)
    }
}

/// 答案比较：去掉首尾空白后忽略大小写完全相等
pub fn answers_match(user_answer: &str, correct_answer: &str) -> bool {
    user_answer.trim().to_lowercase() == correct_answer.trim().to_lowercase()
}

/// 百分比，四舍五入（.5 向上），总数为 0 时返回 0
pub fn score_percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((200 * correct + total) / (2 * total)) as u32
}

/// 按内容的轮次顺序、题目顺序逐题评分
pub fn grade(content: &QuizContent, answers: &AnswerStore) -> GradeReport {
    let mut results = Vec::with_capacity(content.total_questions());
    let mut rounds = Vec::with_capacity(content.round_count());

    for (round_index, round) in content.rounds.iter().enumerate() {
        let mut correct = 0;

        for (question_index, pair) in round.questions.iter().enumerate() {
            let user_answer = answers.get(round_index, question_index);
            let is_correct = answers_match(user_answer, &pair.answer);
            if is_correct {
                correct += 1;
            }

            results.push(QuestionResult {
                round_index,
                question_index,
                question_text: pair.question.clone(),
                user_answer: user_answer.to_string(),
                correct_answer: pair.answer.clone(),
                is_correct,
            });
        }

        rounds.push(RoundSummary {
            round_index,
            title: round.title.clone(),
            correct,
            total: round.questions.len(),
        });
    }

    let correct_answers = results.iter().filter(|r| r.is_correct).count();
    let total_questions = results.len();

    GradeReport {
        score_percentage: score_percentage(correct_answers, total_questions),
        results,
        rounds,
        correct_answers,
        total_questions,
    }
}
