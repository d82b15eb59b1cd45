//! # 进度监视器
//!
//! 独立线程按固定周期读取进度计数器并显示 `completed/submitted`。
//! 只读计数器，不影响作业执行。
//!
//! ## 依赖关系
//! - 被 `commands/decrypt.rs` 使用
//! - 使用 `batch/progress.rs`, `utils/output.rs`
//! - 使用 `crossbeam::channel` 的 `tick` 定时，断开通道即停止

use super::progress::{Progress, ProgressSnapshot};
use crate::error::{AppError, Result};
use crate::utils::output;

use crossbeam::channel::{self, select, Sender, TryRecvError};
use indicatif::ProgressBar;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// 进度显示方式
#[derive(Clone)]
pub enum ProgressView {
    /// 进度条
    Bar(ProgressBar),
    /// 每次刷新打印一行
    Lines,
    /// 不显示
    Silent,
}

impl ProgressView {
    fn show(&self, snapshot: &ProgressSnapshot) {
        match self {
            ProgressView::Bar(bar) => {
                bar.set_length(snapshot.submitted);
                bar.set_position(snapshot.completed);
                bar.tick();
            }
            ProgressView::Lines => output::print_progress(&snapshot.to_string()),
            ProgressView::Silent => {}
        }
    }

    fn finish(&self) {
        if let ProgressView::Bar(bar) = self {
            bar.finish_and_clear();
        }
    }
}

/// 进度监视器
pub struct ProgressMonitor {
    progress: Arc<Progress>,
    stop: Sender<()>,
    handle: JoinHandle<()>,
    view: ProgressView,
}

impl ProgressMonitor {
    /// 启动监视线程
    pub fn start(progress: Arc<Progress>, interval: Duration, view: ProgressView) -> Result<Self> {
        let (stop, stopped) = channel::bounded::<()>(0);
        let ticker = channel::tick(interval);

        let handle = {
            let progress = Arc::clone(&progress);
            let view = view.clone();
            thread::Builder::new()
                .name("rpgmdec-progress".to_string())
                .spawn(move || loop {
                    select! {
                        recv(stopped) -> _ => break,
                        recv(ticker) -> _ => {
                            // 两者同时就绪时 select 随机选择，停止优先
                            if !matches!(stopped.try_recv(), Err(TryRecvError::Empty)) {
                                break;
                            }
                            view.show(&progress.snapshot());
                        }
                    }
                })
                .map_err(|source| AppError::MonitorSpawn { source })?
        };

        Ok(Self {
            progress,
            stop,
            handle,
            view,
        })
    }

    /// 停止监视：正在进行的刷新会完成，之后不再刷新
    ///
    /// 返回停止时的计数快照。
    pub fn stop(self) -> ProgressSnapshot {
        let ProgressMonitor {
            progress,
            stop,
            handle,
            view,
        } = self;

        drop(stop);
        // 监视线程只做显示，panic 不影响计数结果
        if handle.join().is_err() {
            output::print_error("progress monitor thread panicked");
        }
        view.finish();

        progress.snapshot()
    }
}
