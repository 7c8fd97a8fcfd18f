//! 终端渲染
//!
//! 只负责把会话的只读投影写到输出，不修改任何状态

use std::io::{self, Write};

use crate::models::QuizContent;
use crate::services::GradeReport;
use crate::utils::logging::format_clock;
use crate::workflow::{ExitSignal, ExpiryPolicy, QuizSession, SessionStatus};

pub fn render_preview(out: &mut impl Write, session: &QuizSession) -> io::Result<()> {
    let config = session.config();
    let content = session.content();

    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "测验预览")?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "主题: {}", config.display_topic())?;
    writeln!(out, "轮数: {}", content.round_count())?;
    writeln!(out, "题目总数: {}", config.total_questions())?;
    writeln!(out, "预计用时: {} 分钟", config.estimated_time_minutes())?;
    writeln!(out, "{}", "-".repeat(40))?;

    for (index, round) in content.rounds.iter().enumerate() {
        let limit = config
            .round_time_limit_seconds(index)
            .map(|seconds| format!(" [限时 {} 分钟]", seconds / 60))
            .unwrap_or_default();
        writeln!(
            out,
            "第 {} 轮: {} ({} 题){}",
            index + 1,
            round.title,
            round.questions.len(),
            limit
        )?;
    }

    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "按回车或输入 :start 开始，:q 返回配置")?;
    Ok(())
}

pub fn render_question(out: &mut impl Write, session: &QuizSession) -> io::Result<()> {
    let Some(pair) = session.current_question() else {
        return Ok(());
    };
    let cursor = session.cursor();
    let content = session.content();
    let title = content.round_title(cursor.round).unwrap_or_default();

    writeln!(out)?;
    writeln!(out, "第 {} 轮: {}", cursor.round + 1, title)?;
    writeln!(
        out,
        "第 {} / {} 题",
        cursor.question + 1,
        content.question_count(cursor.round)
    )?;

    if let Some(minutes) = session
        .config()
        .rounds
        .get(cursor.round)
        .filter(|round| round.has_time_limit)
        .and_then(|round| round.time_limit_minutes)
    {
        writeln!(out, "本轮限时 {} 分钟", minutes)?;
    }

    // 倒计时属于最近进入的轮次，返回前面的轮次时照常显示
    if let (Some(timer_round), Some(remaining)) =
        (session.timer_round(), session.timer_remaining_seconds())
    {
        let on_expiry = match session.policy() {
            ExpiryPolicy::SubmitQuiz => "交卷",
            ExpiryPolicy::AdvanceRound => "进入下一轮",
        };
        writeln!(
            out,
            "⏰ 第 {} 轮剩余 {}，时间到后{}",
            timer_round + 1,
            format_clock(remaining),
            on_expiry
        )?;
    }

    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(out, "{}", pair.question)?;

    let answer = session.current_answer();
    if !answer.is_empty() {
        writeln!(out, "(当前答案: {})", answer)?;
    }

    let hint = match (session.is_first_question(), session.is_last_question()) {
        (true, true) => ":s 交卷",
        (true, false) => ":n 下一题",
        (false, true) => ":p 上一题  :s 交卷",
        (false, false) => ":p 上一题  :n 下一题",
    };
    writeln!(out, "({})", hint)?;

    let progress = session.progress();
    writeln!(
        out,
        "进度: 第 {}/{} 轮 | 总进度 {}/{} ({:.0}%)",
        cursor.round + 1,
        content.round_count(),
        progress.position(cursor),
        progress.total(),
        progress.fraction(cursor) * 100.0
    )?;
    Ok(())
}

pub fn render_status(out: &mut impl Write, session: &QuizSession) -> io::Result<()> {
    let snapshot = session.snapshot();
    write!(
        out,
        "状态: {} | 位置 {}/{} | 已作答 {} 题",
        snapshot.status, snapshot.position, snapshot.total_questions, snapshot.answered_count
    )?;
    if let Some(remaining) = snapshot.timer_remaining_seconds {
        write!(out, " | 剩余 {}", format_clock(remaining))?;
    }
    writeln!(out)
}

pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "直接输入文字作为当前题的答案")?;
    writeln!(out, ":n 下一题  :p 上一题  :s 交卷  :status 状态  :q 退出  :h 帮助")
}

pub fn render_exit_prompt(out: &mut impl Write, status: SessionStatus) -> io::Result<()> {
    if status == SessionStatus::InProgress {
        writeln!(out, "确定退出吗？已作答的内容将不会保存，倒计时不会暂停 (y/N)")
    } else {
        writeln!(out, "确定返回配置吗？(y/N)")
    }
}

pub fn render_timer_warning(out: &mut impl Write, remaining: u32) -> io::Result<()> {
    writeln!(out, "⏰ 本轮剩余 {}", format_clock(remaining))
}

pub fn render_exit(out: &mut impl Write, signal: &ExitSignal) -> io::Result<()> {
    writeln!(out, "已退出测验 (已作答 {} 题)，返回配置", signal.answered)
}

pub fn render_report(
    out: &mut impl Write,
    report: &GradeReport,
    content: &QuizContent,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(40))?;
    writeln!(out, "测验完成！")?;
    writeln!(out, "得分: {}%", report.score_percentage)?;
    writeln!(
        out,
        "正确: {} / {}",
        report.correct_answers, report.total_questions
    )?;
    writeln!(out, "{}", "=".repeat(40))?;

    for summary in &report.rounds {
        let title = content.round_title(summary.round_index).unwrap_or_default();
        writeln!(
            out,
            "第 {} 轮: {} ({}/{})",
            summary.round_index + 1,
            title,
            summary.correct,
            summary.total
        )?;

        for result in report.round_results(summary.round_index) {
            let mark = if result.is_correct { "✓" } else { "✗" };
            let user_answer = if result.user_answer.trim().is_empty() {
                "(未作答)"
            } else {
                result.user_answer.as_str()
            };
            writeln!(
                out,
                "  {} {}. {}",
                mark,
                result.question_index + 1,
                result.question_text
            )?;
            writeln!(out, "      你的答案: {}", user_answer)?;
            if !result.is_correct {
                writeln!(out, "      正确答案: {}", result.correct_answer)?;
            }
        }
    }
    Ok(())
}
