//! # 作业结果输出
//!
//! 工作线程通过 `Reporter` 输出单个作业的诊断信息。
//! 输出时暂停进度条，避免与进度条互相覆盖。
//!
//! ## 依赖关系
//! - 被 `batch/pool.rs` 使用
//! - 使用 `utils/output.rs`

use super::job::{Job, JobOutcome};
use crate::error::JobError;
use crate::utils::output;

use indicatif::ProgressBar;

/// 作业结果输出器，可在工作线程间克隆共享
#[derive(Clone)]
pub struct Reporter {
    bar: ProgressBar,
    verbose: bool,
}

impl Reporter {
    pub fn new(bar: ProgressBar, verbose: bool) -> Self {
        Self { bar, verbose }
    }

    /// 输出单个作业结果
    ///
    /// 失败总是输出；成功与跳过仅在 verbose 模式下输出。
    pub fn report(&self, job: &Job, result: &Result<JobOutcome, JobError>) {
        let source = job.path().display().to_string();
        match result {
            Err(e) => self.bar.suspend(|| {
                output::print_error(&format!("{}: {}: {}", source, e.kind(), e.detail()));
            }),
            Ok(JobOutcome::Written {
                output: target,
                bytes,
            }) if self.verbose => self.bar.suspend(|| {
                output::print_conversion(
                    &source,
                    &format!("{} ({} bytes)", target.display(), bytes),
                );
            }),
            Ok(JobOutcome::Skipped { output: target }) if self.verbose => self.bar.suspend(|| {
                output::print_skip(&format!("{} (exists)", target.display()));
            }),
            Ok(_) => {}
        }
    }
}
