//! # 进度计数器
//!
//! 全局共享的原子计数器：已提交作业数、已完成作业数，
//! 以及仅用于最终汇总的成功/跳过/失败分类统计。
//!
//! 只有自增和读取两种操作，不需要加锁。
//!
//! ## 依赖关系
//! - 被 `batch/pool.rs` 写入
//! - 被 `batch/monitor.rs` 和 `commands/decrypt.rs` 读取

use super::job::JobOutcome;
use crate::error::{FailureKind, JobError};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// 作业进度计数器
#[derive(Debug, Default)]
pub struct Progress {
    submitted: AtomicU64,
    completed: AtomicU64,
    written: AtomicU64,
    skipped: AtomicU64,
    failures: [AtomicU64; FailureKind::ALL.len()],
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个已提交的作业
    pub fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Release);
    }

    /// 记录一个已完成的作业（无论成功与否）
    pub fn record_completed(&self, result: &Result<JobOutcome, JobError>) {
        match result {
            Ok(JobOutcome::Written { .. }) => {
                self.written.fetch_add(1, Ordering::Relaxed);
            }
            Ok(JobOutcome::Skipped { .. }) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.failures[e.kind().index()].fetch_add(1, Ordering::Relaxed);
            }
        }
        // 分类计数先于 completed 可见
        self.completed.fetch_add(1, Ordering::Release);
    }

    /// 读取当前快照
    ///
    /// 先读 completed 再读 submitted，保证快照中 completed <= submitted。
    pub fn snapshot(&self) -> ProgressSnapshot {
        let completed = self.completed.load(Ordering::Acquire);
        let submitted = self.submitted.load(Ordering::Acquire);

        let mut failures = [0; FailureKind::ALL.len()];
        for (slot, counter) in failures.iter_mut().zip(&self.failures) {
            *slot = counter.load(Ordering::Relaxed);
        }

        ProgressSnapshot {
            submitted,
            completed,
            written: self.written.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failures,
        }
    }
}

/// 计数器快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub submitted: u64,
    pub completed: u64,
    pub written: u64,
    pub skipped: u64,
    failures: [u64; FailureKind::ALL.len()],
}

impl ProgressSnapshot {
    /// 失败总数
    pub fn failed(&self) -> u64 {
        self.failures.iter().sum()
    }

    /// 某一类别的失败数
    pub fn failures_of(&self, kind: FailureKind) -> u64 {
        self.failures[kind.index()]
    }

    /// 非零的失败类别及数量
    pub fn failures(&self) -> Vec<(FailureKind, u64)> {
        FailureKind::ALL
            .iter()
            .map(|&kind| (kind, self.failures_of(kind)))
            .filter(|&(_, count)| count > 0)
            .collect()
    }

    /// 所有已提交作业都已完成
    pub fn is_drained(&self) -> bool {
        self.completed == self.submitted
    }
}

impl fmt::Display for ProgressSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.completed, self.submitted)
    }
}
