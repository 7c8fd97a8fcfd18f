//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把用户输入、tick 消息和会话串起来，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用
//! - 管理应用生命周期（初始化、运行、统计）
//! - 每次答题前加载并校验配置和内容
//! - 询问是否再来一次
//!
//! ### `session_runner` - 单次答题驱动器
//! - 持有 QuizSession 和 TickScheduler
//! - `select!` 事件循环：输入行 / tick
//! - 交卷后输出评分报告
//!
//! ### `commands` / `render` - 输入解析和终端输出
//!
//! ## 层次关系
//!
//! ```text
//! app (多次答题)
//!     ↓
//! session_runner (一次答题的事件循环)
//!     ↓
//! workflow::QuizSession (状态机)
//!     ↓
//! services (能力层：答案存储 / 倒计时 / 评分)
//!
//! infrastructure::TickScheduler (只往通道里投递 tick)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单线程纪律**：所有状态修改都发生在事件循环里，tick 只是消息
//! 2. **资源隔离**：只有编排层持有定时任务
//! 3. **向下依赖**：编排层 → workflow → services

pub mod app;
pub mod commands;
pub mod render;
pub mod session_runner;

// 重新导出主要类型
pub use app::App;
pub use commands::{parse_input, Command, Input};
pub use session_runner::{run_session, RunnerOptions, SessionOutcome};
