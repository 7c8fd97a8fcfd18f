//! 应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责多次答题的循环和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、读取配置
//! 2. **加载测验**：每次答题前重新读取配置和内容（配置界面的最新产出）
//! 3. **配置校验**：校验不通过时直接报错，不创建会话
//! 4. **答题循环**：委托 session_runner 完成一次答题，结束后询问是否再来一次
//! 5. **全局统计**：汇总所有答题的结果

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{load_quiz_config, load_quiz_content, QuizConfig, QuizContent};
use crate::orchestrator::commands::is_confirmation;
use crate::orchestrator::session_runner::{run_session, RunnerOptions, SessionOutcome};
use crate::utils::logging::{log_quiz_loaded, log_startup, print_final_stats, AttemptStats};
use crate::workflow::QuizSession;

/// 应用主结构
pub struct App {
    config: Config,
    options: RunnerOptions,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        // 提前检查文件，尽早失败
        for path in [&config.quiz_config_file, &config.quiz_content_file] {
            if !Path::new(path).exists() {
                return Err(AppError::file_not_found(path.as_str()).into());
            }
        }

        let options = RunnerOptions::from(&config);
        Ok(Self { config, options })
    }

    /// 运行应用主逻辑（标准输入输出）
    pub async fn run(&self) -> Result<AttemptStats> {
        let mut input = BufReader::new(tokio::io::stdin()).lines();
        let mut out = std::io::stdout();
        self.run_with(&mut input, &mut out).await
    }

    /// 使用给定的输入输出运行
    pub async fn run_with<R, W>(&self, input: &mut Lines<R>, out: &mut W) -> Result<AttemptStats>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut stats = AttemptStats::default();

        loop {
            let (quiz_config, content) = self.load_quiz().await?;
            let session = QuizSession::new(
                Arc::new(quiz_config),
                Arc::new(content),
                self.config.expiry_policy,
            );

            info!("\n📝 开始第 {} 次答题", stats.attempts + 1);
            match run_session(session, input, out, &self.options).await? {
                SessionOutcome::Completed(report) => {
                    stats.record_completed(report.score_percentage)
                }
                SessionOutcome::Exited(_) => stats.record_exited(),
                SessionOutcome::InputClosed => break,
            }

            if self.config.max_attempts > 0 && stats.attempts >= self.config.max_attempts {
                info!("已达到最多答题次数 {}", self.config.max_attempts);
                break;
            }

            writeln!(out, "\n再来一次？(y/N)")?;
            out.flush()?;
            match input.next_line().await.context("读取输入失败")? {
                Some(line) if is_confirmation(&line) => continue,
                _ => break,
            }
        }

        print_final_stats(&stats);
        Ok(stats)
    }

    /// 加载并校验测验配置和内容
    async fn load_quiz(&self) -> Result<(QuizConfig, QuizContent)> {
        info!("\n📁 正在加载测验...");

        let quiz_config = load_quiz_config(Path::new(&self.config.quiz_config_file)).await?;
        quiz_config
            .validate()
            .map_err(AppError::from)
            .with_context(|| format!("配置文件: {}", self.config.quiz_config_file))?;

        let content = load_quiz_content(Path::new(&self.config.quiz_content_file)).await?;
        if content.is_empty() {
            warn!("⚠️ 内容中没有任何题目，开始后将直接交卷");
        }

        log_quiz_loaded(&quiz_config, &content);
        Ok((quiz_config, content))
    }
}
