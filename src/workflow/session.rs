//! 答题会话状态机 - 流程层
//!
//! 核心职责：持有一次答题的全部可变状态，只通过转换方法修改
//!
//! 状态流转：
//! 1. Preview → start() → InProgress
//! 2. InProgress → submit() / 倒计时归零 → Completed（终态）
//! 3. 退出确认是独立于状态之外的模态标记，不打断倒计时

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{QAPair, QuizConfig, QuizContent};
use crate::services::{grade, AnswerStore, GradeReport, RoundTimer, TickOutcome};
use crate::utils::truncate_text;
use crate::workflow::cursor::{ProgressTable, QuizCursor};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    /// 预览，尚未开始
    Preview,
    /// 答题中
    InProgress,
    /// 已交卷
    Completed,
}

impl Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionStatus::Preview => "预览",
            SessionStatus::InProgress => "答题中",
            SessionStatus::Completed => "已完成",
        };
        write!(f, "{}", name)
    }
}

/// 倒计时归零时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ExpiryPolicy {
    /// 直接交卷，结束整个测验
    #[default]
    SubmitQuiz,
    /// 跳到下一轮；已是最后一轮时交卷
    AdvanceRound,
}

impl FromStr for ExpiryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "submit" | "submit_quiz" => Ok(ExpiryPolicy::SubmitQuiz),
            "advance" | "advance_round" => Ok(ExpiryPolicy::AdvanceRound),
            other => Err(format!("未知的倒计时策略: {}", other)),
        }
    }
}

/// 会话转换错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("操作 {op} 在 {status} 状态下无效")]
    InvalidTransition {
        op: &'static str,
        status: SessionStatus,
    },
    #[error("退出确认进行中，操作 {op} 被拒绝")]
    ExitPending { op: &'static str },
    #[error("没有待确认的退出请求")]
    NoExitRequested,
}

/// 导航结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// 在同一轮内移动
    Moved(QuizCursor),
    /// 进入了新的一轮
    RoundChanged(QuizCursor),
    /// 已在边界，光标不变
    Boundary,
}

/// tick 对会话的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEffect {
    /// 过期或无效 tick，状态未变
    Ignored,
    /// 倒计时继续，附带剩余秒数
    Counting(u32),
    /// 倒计时归零并已交卷
    Submitted,
    /// 倒计时归零并已进入下一轮
    AdvancedRound(QuizCursor),
}

/// 确认退出后交给调用方的信号，调用方应丢弃会话并返回配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitSignal {
    pub status: SessionStatus,
    pub answered: usize,
}

/// 会话的只读投影
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub cursor: QuizCursor,
    pub answers: AnswerStore,
    pub timer_remaining_seconds: Option<u32>,
    pub timer_running: bool,
    pub answered_count: usize,
    pub exit_pending: bool,
    pub position: usize,
    pub total_questions: usize,
}

/// 答题会话
///
/// - 独占会话状态、答案存储和倒计时
/// - 配置和内容只读共享，不会被修改
/// - 所有边界以实际内容长度为准
pub struct QuizSession {
    config: Arc<QuizConfig>,
    content: Arc<QuizContent>,
    policy: ExpiryPolicy,
    progress: ProgressTable,

    status: SessionStatus,
    cursor: QuizCursor,
    answers: AnswerStore,
    timer: RoundTimer,
    /// 持有倒计时的轮次（最近一次 start / go_next 进入的轮次）
    active_round: usize,
    exit_pending: bool,
    report: Option<GradeReport>,
}

impl QuizSession {
    /// 创建新的会话，初始为预览状态
    pub fn new(config: Arc<QuizConfig>, content: Arc<QuizContent>, policy: ExpiryPolicy) -> Self {
        let progress = ProgressTable::new(&content);
        Self {
            config,
            content,
            policy,
            progress,
            status: SessionStatus::Preview,
            cursor: QuizCursor::default(),
            answers: AnswerStore::new(),
            timer: RoundTimer::new(),
            active_round: 0,
            exit_pending: false,
            report: None,
        }
    }

    // ========== 转换操作 ==========

    /// 开始答题
    ///
    /// 内容为空时直接交卷，得分 0%
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Preview {
            return Err(self.reject("start"));
        }
        if self.exit_pending {
            return Err(self.reject_pending("start"));
        }

        self.status = SessionStatus::InProgress;

        match QuizCursor::first(&self.content) {
            Some(first) => {
                self.cursor = first;
                self.active_round = first.round;
                self.arm_for_round(first.round);
                info!(
                    "{} ▶ 开始答题, 共 {} 轮 {} 题",
                    self.cursor,
                    self.content.round_count(),
                    self.progress.total()
                );
            }
            None => {
                warn!("⚠️ 测验内容为空，直接交卷");
                self.finish();
            }
        }

        Ok(())
    }

    /// 记录当前题的答案（覆盖旧答案），光标不动
    pub fn record_answer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_answering("record_answer")?;

        let text = text.into();
        debug!("{} 记录答案: {:?}", self.cursor, truncate_text(&text, 40));
        self.answers.record(self.cursor.round, self.cursor.question, text);
        Ok(())
    }

    /// 下一题；跨轮时为新一轮启动倒计时，最后一题时不动
    pub fn go_next(&mut self) -> Result<NavOutcome, SessionError> {
        self.ensure_answering("go_next")?;

        let Some(next) = self.cursor.next(&self.content) else {
            debug!("{} 已是最后一题，需要交卷", self.cursor);
            return Ok(NavOutcome::Boundary);
        };

        let crossed = next.round != self.cursor.round;
        self.cursor = next;

        if !crossed {
            return Ok(NavOutcome::Moved(next));
        }

        self.active_round = next.round;
        self.arm_for_round(next.round);
        info!("{} ➡ 进入新一轮", self.cursor);
        Ok(NavOutcome::RoundChanged(next))
    }

    /// 上一题；不会重置倒计时，第一题时不动
    pub fn go_previous(&mut self) -> Result<NavOutcome, SessionError> {
        self.ensure_answering("go_previous")?;

        match self.cursor.previous(&self.content) {
            Some(previous) => {
                let crossed = previous.round != self.cursor.round;
                self.cursor = previous;
                debug!("{} ⬅ 返回上一题", self.cursor);
                if crossed {
                    Ok(NavOutcome::RoundChanged(previous))
                } else {
                    Ok(NavOutcome::Moved(previous))
                }
            }
            None => Ok(NavOutcome::Boundary),
        }
    }

    /// 交卷；已交卷时再次调用无效果
    pub fn submit(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Completed => Ok(()),
            SessionStatus::Preview => Err(self.reject("submit")),
            SessionStatus::InProgress => {
                self.finish();
                Ok(())
            }
        }
    }

    /// 处理调度器投递的一次 tick
    pub fn on_tick(&mut self, generation: u64) -> TickEffect {
        if self.status != SessionStatus::InProgress {
            return TickEffect::Ignored;
        }

        match self.timer.tick(generation) {
            TickOutcome::Stale => TickEffect::Ignored,
            TickOutcome::Running(remaining) => TickEffect::Counting(remaining),
            TickOutcome::Expired => self.on_timer_expired(),
        }
    }

    /// 请求退出，打开确认提示；倒计时不暂停
    pub fn request_exit(&mut self) -> Result<(), SessionError> {
        if self.status == SessionStatus::Completed {
            return Err(self.reject("request_exit"));
        }
        self.exit_pending = true;
        debug!("退出确认已打开 ({})", self.status);
        Ok(())
    }

    /// 取消退出，回到原来的位置
    pub fn cancel_exit(&mut self) -> Result<(), SessionError> {
        if !self.exit_pending {
            return Err(SessionError::NoExitRequested);
        }
        self.exit_pending = false;
        debug!("退出已取消 ({})", self.status);
        Ok(())
    }

    /// 确认退出：停止倒计时并通知调用方丢弃会话
    pub fn confirm_exit(&mut self) -> Result<ExitSignal, SessionError> {
        if !self.exit_pending {
            return Err(SessionError::NoExitRequested);
        }

        self.timer.cancel();
        self.exit_pending = false;
        info!(
            "🚪 用户退出测验 ({}, 已作答 {} 题)",
            self.status,
            self.answers.answered_count()
        );

        Ok(ExitSignal {
            status: self.status,
            answered: self.answers.answered_count(),
        })
    }

    // ========== 只读访问 ==========

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn cursor(&self) -> QuizCursor {
        self.cursor
    }

    pub fn exit_pending(&self) -> bool {
        self.exit_pending
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    pub fn content(&self) -> &QuizContent {
        &self.content
    }

    pub fn policy(&self) -> ExpiryPolicy {
        self.policy
    }

    pub fn progress(&self) -> &ProgressTable {
        &self.progress
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&QAPair> {
        if self.status != SessionStatus::InProgress {
            return None;
        }
        self.content.question(self.cursor.round, self.cursor.question)
    }

    pub fn current_answer(&self) -> &str {
        self.answers.get(self.cursor.round, self.cursor.question)
    }

    pub fn is_last_question(&self) -> bool {
        self.cursor.is_last_question(&self.content)
    }

    pub fn is_first_question(&self) -> bool {
        self.cursor.is_first_question(&self.content)
    }

    pub fn timer_remaining_seconds(&self) -> Option<u32> {
        self.timer.remaining_seconds()
    }

    /// 倒计时所属的轮次，可能与光标所在轮次不同；没有倒计时时为 None
    pub fn timer_round(&self) -> Option<usize> {
        self.timer.remaining_seconds().map(|_| self.active_round)
    }

    /// 当前应当投递 tick 的倒计时代数；没有运行中的倒计时时为 None
    pub fn timer_generation(&self) -> Option<u64> {
        self.timer.active_generation()
    }

    /// 交卷后的评分报告
    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.status,
            cursor: self.cursor,
            answers: self.answers.clone(),
            timer_remaining_seconds: self.timer.remaining_seconds(),
            timer_running: self.timer.is_running(),
            answered_count: self.answers.answered_count(),
            exit_pending: self.exit_pending,
            position: self.progress.position(self.cursor),
            total_questions: self.progress.total(),
        }
    }

    // ========== 内部辅助 ==========

    /// 为某一轮（重新）启动倒计时，先取消旧的
    fn arm_for_round(&mut self, round: usize) {
        self.timer.cancel();
        if let Some(seconds) = self.config.round_time_limit_seconds(round) {
            let generation = self.timer.arm(seconds);
            debug!(
                "⏱ 第 {} 轮倒计时 {} 秒 (代数 {})",
                round + 1,
                seconds,
                generation
            );
        }
    }

    fn on_timer_expired(&mut self) -> TickEffect {
        info!("⏰ 第 {} 轮时间到", self.active_round + 1);

        match self.policy {
            ExpiryPolicy::SubmitQuiz => {
                self.finish();
                TickEffect::Submitted
            }
            ExpiryPolicy::AdvanceRound => {
                let next = (self.active_round + 1..self.content.round_count())
                    .find(|&round| self.content.question_count(round) > 0)
                    .map(|round| QuizCursor::new(round, 0));

                match next {
                    Some(next) => {
                        self.cursor = next;
                        self.active_round = next.round;
                        self.arm_for_round(next.round);
                        info!("{} ➡ 时间到，进入下一轮", self.cursor);
                        TickEffect::AdvancedRound(next)
                    }
                    None => {
                        self.finish();
                        TickEffect::Submitted
                    }
                }
            }
        }
    }

    /// 进入终态：停止倒计时并评分（只评一次）
    fn finish(&mut self) {
        self.timer.cancel();
        self.exit_pending = false;
        self.status = SessionStatus::Completed;

        let report = grade(&self.content, &self.answers);
        info!(
            "✅ 已交卷: 正确 {}/{}, 得分 {}%",
            report.correct_answers, report.total_questions, report.score_percentage
        );
        self.report = Some(report);
    }

    fn ensure_answering(&self, op: &'static str) -> Result<(), SessionError> {
        if self.status != SessionStatus::InProgress {
            return Err(self.reject(op));
        }
        if self.exit_pending {
            return Err(self.reject_pending(op));
        }
        Ok(())
    }

    fn reject(&self, op: &'static str) -> SessionError {
        warn!("⚠️ 无效操作 {} (当前状态: {})", op, self.status);
        SessionError::InvalidTransition {
            op,
            status: self.status,
        }
    }

    fn reject_pending(&self, op: &'static str) -> SessionError {
        warn!("⚠️ 退出确认中，忽略操作 {}", op);
        SessionError::ExitPending { op }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuizMode, RoundConfig, RoundContent};

    fn round_config(id: &str, count: u32, minutes: Option<u32>) -> RoundConfig {
        RoundConfig {
            id: id.to_string(),
            name: id.to_string(),
            topic: String::new(),
            question_count: count,
            has_time_limit: minutes.is_some(),
            time_limit_minutes: minutes,
        }
    }

    fn content_of(rounds: &[&[(&str, &str)]]) -> QuizContent {
        QuizContent {
            rounds: rounds
                .iter()
                .enumerate()
                .map(|(i, qs)| RoundContent {
                    title: format!("R{}", i + 1),
                    questions: qs
                        .iter()
                        .map(|(q, a)| QAPair {
                            question: q.to_string(),
                            answer: a.to_string(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    fn session(
        rounds: Vec<RoundConfig>,
        content: QuizContent,
        policy: ExpiryPolicy,
    ) -> QuizSession {
        let config = QuizConfig {
            rounds,
            quiz_topic: "测试".to_string(),
            mode: QuizMode::Online,
        };
        QuizSession::new(Arc::new(config), Arc::new(content), policy)
    }

    fn two_round_session(policy: ExpiryPolicy) -> QuizSession {
        session(
            vec![round_config("r1", 3, Some(1)), round_config("r2", 2, Some(2))],
            content_of(&[
                &[("Q1", "a"), ("Q2", "b"), ("Q3", "c")],
                &[("Q4", "d"), ("Q5", "e")],
            ]),
            policy,
        )
    }

    #[test]
    fn test_start_arms_timer_for_timed_round() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        assert_eq!(s.status(), SessionStatus::Preview);
        assert_eq!(s.timer_remaining_seconds(), None);

        s.start().unwrap();
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(s.cursor(), QuizCursor::new(0, 0));
        assert_eq!(s.timer_remaining_seconds(), Some(60));
        assert!(s.timer_generation().is_some());

        assert!(matches!(
            s.start(),
            Err(SessionError::InvalidTransition { op: "start", .. })
        ));
    }

    #[test]
    fn test_untimed_round_never_arms() {
        let mut s = session(
            vec![round_config("r1", 1, None)],
            content_of(&[&[("Q", "A")]]),
            ExpiryPolicy::SubmitQuiz,
        );
        s.start().unwrap();
        assert_eq!(s.timer_remaining_seconds(), None);
        assert_eq!(s.timer_generation(), None);
        assert_eq!(s.on_tick(0), TickEffect::Ignored);
    }

    #[test]
    fn test_invalid_transitions_do_not_corrupt_state() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        let before = s.snapshot();
        assert!(s.record_answer("x").is_err());
        assert!(s.go_next().is_err());
        assert!(s.go_previous().is_err());
        assert!(s.submit().is_err());
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_navigation_across_rounds_restarts_timer() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        let first_generation = s.timer_generation().unwrap();
        s.on_tick(first_generation);

        assert_eq!(s.go_next().unwrap(), NavOutcome::Moved(QuizCursor::new(0, 1)));
        assert_eq!(s.go_next().unwrap(), NavOutcome::Moved(QuizCursor::new(0, 2)));
        assert_eq!(s.timer_remaining_seconds(), Some(59));

        assert_eq!(
            s.go_next().unwrap(),
            NavOutcome::RoundChanged(QuizCursor::new(1, 0))
        );
        assert_eq!(s.timer_remaining_seconds(), Some(120));
        // 旧一轮的 tick 已过期
        assert_eq!(s.on_tick(first_generation), TickEffect::Ignored);
        assert_eq!(s.timer_remaining_seconds(), Some(120));

        s.go_next().unwrap();
        assert_eq!(s.go_next().unwrap(), NavOutcome::Boundary);
        assert_eq!(s.cursor(), QuizCursor::new(1, 1));
        assert!(s.is_last_question());
    }

    #[test]
    fn test_go_previous_keeps_timer_running() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        assert_eq!(s.go_previous().unwrap(), NavOutcome::Boundary);

        for _ in 0..3 {
            s.go_next().unwrap();
        }
        let generation = s.timer_generation().unwrap();
        s.on_tick(generation);
        assert_eq!(s.timer_remaining_seconds(), Some(119));

        assert_eq!(
            s.go_previous().unwrap(),
            NavOutcome::RoundChanged(QuizCursor::new(0, 2))
        );
        assert_eq!(s.timer_generation(), Some(generation));
        assert_eq!(s.on_tick(generation), TickEffect::Counting(118));

        assert_eq!(s.timer_round(), Some(1));
    }

    #[test]
    fn test_go_next_into_round_always_restarts_timer() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        for _ in 0..3 {
            s.go_next().unwrap();
        }
        let generation = s.timer_generation().unwrap();
        for _ in 0..10 {
            s.on_tick(generation);
        }
        assert_eq!(s.timer_remaining_seconds(), Some(110));

        s.go_previous().unwrap();
        assert_eq!(s.timer_round(), Some(1));

        // 重新进入第二轮，按 start 的规则重新计时
        assert_eq!(
            s.go_next().unwrap(),
            NavOutcome::RoundChanged(QuizCursor::new(1, 0))
        );
        assert_eq!(s.timer_remaining_seconds(), Some(120));
        assert_ne!(s.timer_generation(), Some(generation));
        assert_eq!(s.on_tick(generation), TickEffect::Ignored);
    }

    #[test]
    fn test_bounds_safety_with_short_content() {
        // 配置 5 + 4 题，内容只有 2 + 1 题
        let mut s = session(
            vec![round_config("r1", 5, None), round_config("r2", 4, None)],
            content_of(&[&[("Q1", "a"), ("Q2", "b")], &[("Q3", "c")]]),
            ExpiryPolicy::SubmitQuiz,
        );
        s.start().unwrap();

        for _ in 0..10 {
            s.go_next().unwrap();
            let c = s.cursor();
            assert!(c.round < s.content().round_count());
            assert!(c.question < s.content().question_count(c.round));
        }
        assert_eq!(s.cursor(), QuizCursor::new(1, 0));

        for _ in 0..10 {
            s.go_previous().unwrap();
            let c = s.cursor();
            assert!(c.question < s.content().question_count(c.round));
        }
        assert_eq!(s.cursor(), QuizCursor::new(0, 0));
    }

    #[test]
    fn test_record_answer_upserts_at_cursor() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        s.record_answer("first").unwrap();
        s.record_answer("second").unwrap();
        assert_eq!(s.current_answer(), "second");
        assert_eq!(s.answers().len(), 1);
        assert_eq!(s.cursor(), QuizCursor::new(0, 0));
    }

    #[test]
    fn test_submit_is_idempotent() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        s.record_answer("a").unwrap();
        s.submit().unwrap();
        let report = s.report().cloned().unwrap();
        assert_eq!(s.timer_remaining_seconds(), None);

        s.submit().unwrap();
        assert_eq!(s.status(), SessionStatus::Completed);
        assert_eq!(s.report(), Some(&report));
        assert!(s.record_answer("late").is_err());
        assert!(s.go_next().is_err());
    }

    #[test]
    fn test_timer_expiry_submits_quiz() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        let generation = s.timer_generation().unwrap();

        for _ in 0..59 {
            assert!(matches!(s.on_tick(generation), TickEffect::Counting(_)));
        }
        assert_eq!(s.on_tick(generation), TickEffect::Submitted);
        assert_eq!(s.status(), SessionStatus::Completed);

        let report = s.report().unwrap();
        assert_eq!(report.total_questions, 5);
        assert!(!report.results[0].is_correct);
        assert_eq!(report.score_percentage, 0);
        assert_eq!(s.on_tick(generation), TickEffect::Ignored);
    }

    #[test]
    fn test_timer_expiry_advance_round_policy() {
        let mut s = two_round_session(ExpiryPolicy::AdvanceRound);
        s.start().unwrap();
        let generation = s.timer_generation().unwrap();
        for _ in 0..59 {
            s.on_tick(generation);
        }
        assert_eq!(
            s.on_tick(generation),
            TickEffect::AdvancedRound(QuizCursor::new(1, 0))
        );
        assert_eq!(s.status(), SessionStatus::InProgress);
        assert_eq!(s.timer_remaining_seconds(), Some(120));

        let generation = s.timer_generation().unwrap();
        for _ in 0..119 {
            s.on_tick(generation);
        }
        assert_eq!(s.on_tick(generation), TickEffect::Submitted);
        assert_eq!(s.status(), SessionStatus::Completed);
    }

    #[test]
    fn test_exit_request_then_cancel_restores_state() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        s.record_answer("a").unwrap();
        s.go_next().unwrap();
        let generation = s.timer_generation().unwrap();
        s.on_tick(generation);

        let before = s.snapshot();
        s.request_exit().unwrap();
        assert!(s.exit_pending());
        assert!(matches!(
            s.go_next(),
            Err(SessionError::ExitPending { op: "go_next" })
        ));
        s.cancel_exit().unwrap();
        assert_eq!(s.snapshot(), before);
        assert_eq!(s.cancel_exit(), Err(SessionError::NoExitRequested));
    }

    #[test]
    fn test_timer_keeps_ticking_during_exit_prompt() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        let generation = s.timer_generation().unwrap();
        s.request_exit().unwrap();
        assert_eq!(s.on_tick(generation), TickEffect::Counting(59));
        s.cancel_exit().unwrap();
        assert_eq!(s.timer_remaining_seconds(), Some(59));
    }

    #[test]
    fn test_confirm_exit_cancels_timer() {
        let mut s = two_round_session(ExpiryPolicy::SubmitQuiz);
        s.start().unwrap();
        let generation = s.timer_generation().unwrap();
        assert_eq!(s.confirm_exit(), Err(SessionError::NoExitRequested));

        s.request_exit().unwrap();
        let signal = s.confirm_exit().unwrap();
        assert_eq!(signal.status, SessionStatus::InProgress);
        assert_eq!(s.timer_generation(), None);
        assert_eq!(s.timer_remaining_seconds(), None);
        assert_eq!(s.on_tick(generation), TickEffect::Ignored);
    }

    #[test]
    fn test_empty_content_completes_immediately() {
        let mut s = session(
            vec![round_config("r1", 3, Some(1))],
            QuizContent::default(),
            ExpiryPolicy::SubmitQuiz,
        );
        s.start().unwrap();
        assert_eq!(s.status(), SessionStatus::Completed);
        assert_eq!(s.report().unwrap().score_percentage, 0);
        assert_eq!(s.timer_generation(), None);
    }

    #[test]
    fn test_snapshot_progress_uses_actual_lengths() {
        let mut s = session(
            vec![round_config("r1", 1, None), round_config("r2", 1, None)],
            content_of(&[&[("Q1", "a")], &[("Q2", "b"), ("Q3", "c"), ("Q4", "d")]]),
            ExpiryPolicy::SubmitQuiz,
        );
        s.start().unwrap();
        s.go_next().unwrap();
        s.go_next().unwrap();
        let snapshot = s.snapshot();
        assert_eq!(snapshot.position, 3);
        assert_eq!(snapshot.total_questions, 4);
    }

    #[test]
    fn test_expiry_policy_from_str() {
        assert_eq!("submit".parse::<ExpiryPolicy>(), Ok(ExpiryPolicy::SubmitQuiz));
        assert_eq!("Advance".parse::<ExpiryPolicy>(), Ok(ExpiryPolicy::AdvanceRound));
        assert!("later".parse::<ExpiryPolicy>().is_err());
    }
}
