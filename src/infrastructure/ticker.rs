//! tick 调度器 - 基础设施层
//!
//! 持有唯一的定时任务，只暴露"按代数投递 tick"的能力

use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::debug;

/// 调度器投递给事件循环的 tick 消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickEvent {
    pub generation: u64,
}

/// tick 调度器
///
/// 职责：
/// - 同一时刻最多持有一个定时任务
/// - 定时任务只往通道里发消息，不接触会话状态
/// - 代数变化时先中止旧任务再启动新任务
pub struct TickScheduler {
    tx: UnboundedSender<TickEvent>,
    period: Duration,
    current: Option<(u64, JoinHandle<()>)>,
}

impl TickScheduler {
    /// 创建调度器和接收 tick 的通道
    pub fn new(period: Duration) -> (Self, UnboundedReceiver<TickEvent>) {
        let (tx, rx) = unbounded_channel();
        let scheduler = Self {
            tx,
            period,
            current: None,
        };
        (scheduler, rx)
    }

    /// 与会话的倒计时代数对齐
    ///
    /// - `Some(g)` 且与当前任务不同：中止旧任务，为 g 启动新任务
    /// - `None`：中止当前任务
    pub fn sync(&mut self, generation: Option<u64>) {
        let current = self.current.as_ref().map(|(g, _)| *g);
        if current == generation {
            return;
        }

        self.cancel();

        if let Some(generation) = generation {
            let handle = self.spawn(generation);
            self.current = Some((generation, handle));
            debug!("⏱ 启动 tick 任务 (代数 {})", generation);
        }
    }

    /// 中止当前定时任务
    pub fn cancel(&mut self) {
        if let Some((generation, handle)) = self.current.take() {
            handle.abort();
            debug!("⏹ 中止 tick 任务 (代数 {})", generation);
        }
    }

    pub fn active_generation(&self) -> Option<u64> {
        self.current.as_ref().map(|(g, _)| *g)
    }

    fn spawn(&self, generation: u64) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let period = self.period;

        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(TickEvent { generation }).is_err() {
                    break;
                }
            }
        })
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
