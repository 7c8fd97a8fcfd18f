/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use crate::config::Config;
use crate::models::{QuizConfig, QuizContent};
use tracing::{info, warn};

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 程序启动 - 在线答题模式 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📄 配置文件: {}", config.quiz_config_file);
    info!("📄 内容文件: {}", config.quiz_content_file);
    info!("⏰ 倒计时策略: {:?}", config.expiry_policy);
    info!("{}", "=".repeat(60));
}

/// 记录测验加载信息，内容与配置不一致时给出警告
///
/// # 参数
/// - `config`: 测验配置
/// - `content`: 测验内容
pub fn log_quiz_loaded(config: &QuizConfig, content: &QuizContent) {
    info!(
        "✓ 测验已加载: {} ({} 轮, {} 题)",
        config.display_topic(),
        content.round_count(),
        content.total_questions()
    );

    if content.round_count() != config.rounds.len() {
        warn!(
            "⚠️ 内容轮数 {} 与配置轮数 {} 不一致，以内容为准",
            content.round_count(),
            config.rounds.len()
        );
    }

    for (index, round) in config.rounds.iter().enumerate() {
        let actual = content.question_count(index);
        if actual != round.question_count as usize {
            warn!(
                "⚠️ 第 {} 轮 ({}) 配置 {} 题，内容实际 {} 题",
                index + 1,
                round.name,
                round.question_count,
                actual
            );
        }
    }
}

/// 答题统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttemptStats {
    pub attempts: usize,
    pub completed: usize,
    pub exited: usize,
    pub best_score: Option<u32>,
}

impl AttemptStats {
    pub fn record_completed(&mut self, score: u32) {
        self.attempts += 1;
        self.completed += 1;
        self.best_score = Some(self.best_score.map_or(score, |best| best.max(score)));
    }

    pub fn record_exited(&mut self) {
        self.attempts += 1;
        self.exited += 1;
    }
}

/// 打印最终统计信息
///
/// # 参数
/// - `stats`: 全部答题的统计
pub fn print_final_stats(stats: &AttemptStats) {
    info!("\n{}", "=".repeat(60));
    info!("📊 答题统计");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成: {}/{}", stats.completed, stats.attempts);
    info!("🚪 中途退出: {}", stats.exited);
    if let Some(best) = stats.best_score {
        info!("🏆 最高得分: {}%", best);
    }
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 把秒数格式化为 mm:ss
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
