//! 轮次倒计时 - 业务能力层
//!
//! 同一时刻最多一个有效倒计时。每次 arm / cancel 都会递增代数（generation），
//! 调度器投递的 tick 带着它被安排时的代数，代数不符即为过期 tick，直接丢弃。

use tracing::trace;

/// 一次 tick 的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 正常递减，附带剩余秒数
    Running(u32),
    /// 本次 tick 使倒计时归零
    Expired,
    /// 过期 tick（已取消或已被新一轮替换），未做任何修改
    Stale,
}

/// 轮次倒计时
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundTimer {
    remaining_seconds: Option<u32>,
    running: bool,
    generation: u64,
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 启动倒计时，返回新的代数
    pub fn arm(&mut self, seconds: u32) -> u64 {
        self.generation += 1;
        self.remaining_seconds = Some(seconds);
        self.running = seconds > 0;
        self.generation
    }

    /// 停止倒计时并清空剩余时间
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.remaining_seconds = None;
        self.running = false;
    }

    /// 处理一次 tick
    pub fn tick(&mut self, generation: u64) -> TickOutcome {
        if !self.running || generation != self.generation {
            trace!(
                "丢弃过期 tick: 代数 {} (当前 {}, 运行中: {})",
                generation,
                self.generation,
                self.running
            );
            return TickOutcome::Stale;
        }

        let remaining = self.remaining_seconds.unwrap_or(0).saturating_sub(1);
        self.remaining_seconds = Some(remaining);

        if remaining == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running(remaining)
        }
    }

    pub fn remaining_seconds(&self) -> Option<u32> {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 调度器应当为之投递 tick 的代数；未运行时为 None
    pub fn active_generation(&self) -> Option<u64> {
        self.running.then_some(self.generation)
    }
}
