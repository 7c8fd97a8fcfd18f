//! 单次答题驱动器 - 编排层
//!
//! ## 职责
//!
//! 本模块是一次答题的事件循环，把用户输入和 tick 消息依次交给会话。
//!
//! ## 核心功能
//!
//! 1. **事件循环**：`tokio::select!` 同时等待输入行和 tick，一次只处理一个事件
//! 2. **倒计时对齐**：每处理完一个事件，都让调度器与会话的倒计时代数对齐
//! 3. **命令分发**：把输入解析为命令或答案，调用对应的会话转换
//! 4. **结果输出**：交卷后输出评分报告，退出后通知调用方丢弃会话

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, Lines};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::infrastructure::{TickEvent, TickScheduler};
use crate::orchestrator::commands::{is_confirmation, parse_input, Command, Input};
use crate::orchestrator::render;
use crate::services::GradeReport;
use crate::workflow::{
    ExitSignal, NavOutcome, QuizSession, SessionError, SessionStatus, TickEffect,
};

const LAST_QUESTION_HINT: &str = "已是最后一题，输入 :s 交卷";
const FIRST_QUESTION_HINT: &str = "已是第一题";

/// 一次答题的结局
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// 已交卷（手动或时间到）
    Completed(GradeReport),
    /// 用户确认退出，会话已丢弃
    Exited(ExitSignal),
    /// 预览阶段输入就已结束
    InputClosed,
}

/// 驱动器选项
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    pub tick_interval: Duration,
    pub auto_advance: bool,
    pub timer_warning_seconds: u32,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for RunnerOptions {
    fn from(config: &Config) -> Self {
        Self {
            tick_interval: config.tick_interval(),
            auto_advance: config.auto_advance,
            timer_warning_seconds: config.timer_warning_seconds,
        }
    }
}

/// 运行一次答题，直到交卷、退出或输入结束
///
/// # 参数
/// - `session`: 处于预览状态的会话（所有权交给本函数，结束时丢弃）
/// - `input`: 输入行
/// - `out`: 输出
/// - `options`: 驱动器选项
pub async fn run_session<R, W>(
    session: QuizSession,
    input: &mut Lines<R>,
    out: &mut W,
    options: &RunnerOptions,
) -> Result<SessionOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut driver = SessionDriver {
        session,
        out,
        options,
    };
    render::render_preview(driver.out, &driver.session)?;

    let (mut scheduler, mut ticks) = TickScheduler::new(options.tick_interval);

    loop {
        // 每个事件处理完后对齐，保证最多一个有效倒计时
        scheduler.sync(driver.session.timer_generation());

        let step = tokio::select! {
            line = input.next_line() => {
                match line.context("读取输入失败")? {
                    Some(line) => driver.handle_line(&line)?,
                    None => Some(driver.handle_eof()?),
                }
            }
            Some(tick) = ticks.recv() => driver.handle_tick(tick)?,
        };

        if let Some(outcome) = step {
            scheduler.cancel();
            driver.out.flush()?;
            return Ok(outcome);
        }
        driver.out.flush()?;
    }
}

/// 持有会话并把事件翻译成会话转换
struct SessionDriver<'a, W: Write> {
    session: QuizSession,
    out: &'a mut W,
    options: &'a RunnerOptions,
}

impl<W: Write> SessionDriver<'_, W> {
    fn handle_line(&mut self, line: &str) -> Result<Option<SessionOutcome>> {
        if self.session.exit_pending() {
            return self.handle_exit_confirmation(line);
        }

        match self.session.status() {
            SessionStatus::Preview => self.handle_preview_input(parse_input(line)),
            SessionStatus::InProgress => self.handle_answering_input(parse_input(line)),
            SessionStatus::Completed => Ok(self.completed_outcome()),
        }
    }

    fn handle_preview_input(&mut self, input: Input) -> Result<Option<SessionOutcome>> {
        match input {
            Input::Empty | Input::Command(Command::Start) => {
                if let Err(e) = self.session.start() {
                    return self.rejected(e);
                }
                if self.session.status() == SessionStatus::Completed {
                    return Ok(self.completed_outcome());
                }
                render::render_question(self.out, &self.session)?;
            }
            Input::Command(Command::Exit) => {
                if let Err(e) = self.session.request_exit() {
                    return self.rejected(e);
                }
                render::render_exit_prompt(self.out, self.session.status())?;
            }
            Input::Command(Command::Help) => render::render_help(self.out)?,
            Input::Command(Command::Status) => render::render_status(self.out, &self.session)?,
            _ => writeln!(self.out, "测验尚未开始，按回车或输入 :start 开始")?,
        }
        Ok(None)
    }

    fn handle_answering_input(&mut self, input: Input) -> Result<Option<SessionOutcome>> {
        match input {
            Input::Empty => render::render_question(self.out, &self.session)?,
            Input::Answer(text) => {
                if let Err(e) = self.session.record_answer(text) {
                    return self.rejected(e);
                }
                if !self.options.auto_advance {
                    writeln!(self.out, "✓ 答案已记录")?;
                } else if self.session.is_last_question() {
                    writeln!(self.out, "✓ 答案已记录，{}", LAST_QUESTION_HINT)?;
                } else {
                    let outcome = self.session.go_next();
                    return self.after_navigation(outcome, LAST_QUESTION_HINT);
                }
            }
            Input::Command(Command::Next) => {
                let outcome = self.session.go_next();
                return self.after_navigation(outcome, LAST_QUESTION_HINT);
            }
            Input::Command(Command::Previous) => {
                let outcome = self.session.go_previous();
                return self.after_navigation(outcome, FIRST_QUESTION_HINT);
            }
            Input::Command(Command::Submit) => {
                if let Err(e) = self.session.submit() {
                    return self.rejected(e);
                }
                return Ok(self.completed_outcome());
            }
            Input::Command(Command::Exit) => {
                if let Err(e) = self.session.request_exit() {
                    return self.rejected(e);
                }
                render::render_exit_prompt(self.out, self.session.status())?;
            }
            Input::Command(Command::Status) => render::render_status(self.out, &self.session)?,
            Input::Command(Command::Help) => render::render_help(self.out)?,
            Input::Command(Command::Start) => writeln!(self.out, "测验已经开始")?,
            Input::UnknownCommand(name) => {
                warn!("⚠️ 未知命令: {}", name);
                writeln!(self.out, "未知命令 :{}，输入 :h 查看帮助", name)?;
            }
        }
        Ok(None)
    }

    fn handle_exit_confirmation(&mut self, line: &str) -> Result<Option<SessionOutcome>> {
        if is_confirmation(line) {
            return match self.session.confirm_exit() {
                Ok(signal) => {
                    render::render_exit(self.out, &signal)?;
                    Ok(Some(SessionOutcome::Exited(signal)))
                }
                Err(e) => self.rejected(e),
            };
        }

        if let Err(e) = self.session.cancel_exit() {
            return self.rejected(e);
        }
        match self.session.status() {
            SessionStatus::Preview => render::render_preview(self.out, &self.session)?,
            _ => render::render_question(self.out, &self.session)?,
        }
        Ok(None)
    }

    fn handle_tick(&mut self, tick: TickEvent) -> Result<Option<SessionOutcome>> {
        match self.session.on_tick(tick.generation) {
            TickEffect::Ignored => {
                debug!("忽略 tick (代数 {})", tick.generation);
            }
            TickEffect::Counting(remaining) => {
                if self.options.timer_warning_seconds > 0
                    && remaining == self.options.timer_warning_seconds
                {
                    render::render_timer_warning(self.out, remaining)?;
                }
            }
            TickEffect::AdvancedRound(_) => {
                writeln!(self.out, "⏰ 时间到！进入下一轮")?;
                if self.session.exit_pending() {
                    render::render_exit_prompt(self.out, self.session.status())?;
                } else {
                    render::render_question(self.out, &self.session)?;
                }
            }
            TickEffect::Submitted => {
                writeln!(self.out, "⏰ 时间到！已自动交卷")?;
                return Ok(self.completed_outcome());
            }
        }
        Ok(None)
    }

    fn handle_eof(&mut self) -> Result<SessionOutcome> {
        info!("输入已结束 ({})", self.session.status());
        match self.session.status() {
            SessionStatus::Preview => Ok(SessionOutcome::InputClosed),
            SessionStatus::InProgress => {
                self.session.submit()?;
                Ok(self
                    .completed_outcome()
                    .unwrap_or(SessionOutcome::InputClosed))
            }
            SessionStatus::Completed => Ok(self
                .completed_outcome()
                .unwrap_or(SessionOutcome::InputClosed)),
        }
    }

    fn after_navigation(
        &mut self,
        outcome: Result<NavOutcome, SessionError>,
        boundary_hint: &str,
    ) -> Result<Option<SessionOutcome>> {
        match outcome {
            Ok(NavOutcome::Moved(_)) | Ok(NavOutcome::RoundChanged(_)) => {
                render::render_question(self.out, &self.session)?;
            }
            Ok(NavOutcome::Boundary) => writeln!(self.out, "{}", boundary_hint)?,
            Err(e) => return self.rejected(e),
        }
        Ok(None)
    }

    /// 会话拒绝的操作只提示，不中断答题
    fn rejected(&mut self, err: SessionError) -> Result<Option<SessionOutcome>> {
        writeln!(self.out, "操作无效: {}", AppError::from(err))?;
        Ok(None)
    }

    /// 输出评分报告并生成结局；会话未完成时为 None
    fn completed_outcome(&mut self) -> Option<SessionOutcome> {
        let report = self.session.report()?.clone();
        if let Err(e) = render::render_report(self.out, &report, self.session.content()) {
            warn!("⚠️ 输出评分报告失败: {}", AppError::from(e));
        }
        Some(SessionOutcome::Completed(report))
    }
}
