//! # Quiz Runner
//!
//! 一个终端答题运行时：预览、分轮答题、倒计时、交卷评分
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有定时任务，只往通道里投递 tick
//! - `TickScheduler` - 唯一的定时任务 owner，按代数启动和取消
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心会话状态
//! - `AnswerStore` - 答案存储能力
//! - `RoundTimer` - 倒计时能力（代数防止过期 tick）
//! - `grading` - 评分能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次答题"的完整状态机
//! - `QuizCursor` - 位置游标（round + question）
//! - `QuizSession` - 状态流转（预览 → 答题 → 完成）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 应用，管理多次答题和统计
//! - `orchestrator/session_runner` - 单次答题的事件循环
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{TickEvent, TickScheduler};
pub use models::{QuizConfig, QuizContent};
pub use orchestrator::{run_session, App, RunnerOptions, SessionOutcome};
pub use services::{grade, AnswerStore, GradeReport};
pub use workflow::{ExpiryPolicy, QuizCursor, QuizSession, SessionStatus};
