//! # 作业线程池
//!
//! 固定大小的工作线程池，异步执行文件作业。
//!
//! ## 功能
//! - 基于 rayon 线程池，任务队列无界，提交不阻塞
//! - 每个作业完成（无论成功失败）都计入 completed
//! - `join` 作为完成屏障，等待所有已提交作业结束
//!
//! ## 依赖关系
//! - 被 `commands/decrypt.rs` 使用
//! - 使用 `batch/job.rs`, `batch/progress.rs`, `batch/reporter.rs`
//! - 使用 `rayon` 执行作业，`crossbeam` 的 `WaitGroup` 实现屏障

use super::job::Job;
use super::progress::{Progress, ProgressSnapshot};
use super::reporter::Reporter;
use crate::error::{AppError, Result};

use crossbeam::sync::WaitGroup;
use std::sync::Arc;

/// 作业线程池
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    threads: usize,
    progress: Arc<Progress>,
    reporter: Reporter,
    /// 每个未完成作业持有一个克隆
    pending: WaitGroup,
    skip_existing: bool,
}

impl WorkerPool {
    /// 创建线程池
    ///
    /// `jobs == 0` 时使用逻辑 CPU 数，至少 1 个线程。
    pub fn new(jobs: usize, progress: Arc<Progress>, reporter: Reporter) -> Result<Self> {
        let threads = if jobs == 0 { num_cpus::get() } else { jobs };
        let threads = threads.max(1);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("rpgmdec-worker-{}", i))
            .build()
            .map_err(|source| AppError::ThreadPool { threads, source })?;

        Ok(Self {
            pool,
            threads,
            progress,
            reporter,
            pending: WaitGroup::new(),
            skip_existing: false,
        })
    }

    /// 设置是否跳过已存在的目标文件
    pub fn skip_existing(mut self, skip: bool) -> Self {
        self.skip_existing = skip;
        self
    }

    /// 工作线程数
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// 提交作业，立即返回
    pub fn submit(&self, job: Job) {
        self.progress.record_submitted();

        let pending = self.pending.clone();
        let progress = Arc::clone(&self.progress);
        let reporter = self.reporter.clone();
        let skip_existing = self.skip_existing;

        self.pool.spawn(move || {
            let result = job.run(skip_existing);
            reporter.report(&job, &result);
            progress.record_completed(&result);
            // completed 计数必须先于释放屏障
            drop(pending);
        });
    }

    /// 完成屏障：阻塞直到所有已提交作业完成，然后关闭线程池
    pub fn join(self) -> ProgressSnapshot {
        let WorkerPool {
            pool,
            progress,
            pending,
            ..
        } = self;

        pending.wait();
        drop(pool);

        progress.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::format::{RPGMV_HEADER, RPGMV_IMAGE};
    use crate::utils::progress::create_hidden_bar;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use tempfile::TempDir;

    fn new_pool(jobs: usize) -> (WorkerPool, Arc<Progress>) {
        let progress = Arc::new(Progress::new());
        let reporter = Reporter::new(create_hidden_bar(), false);
        let pool = WorkerPool::new(jobs, Arc::clone(&progress), reporter).unwrap();
        (pool, progress)
    }

    fn write_encrypted(dir: &Path, name: &str) {
        let mut bytes = RPGMV_HEADER.to_vec();
        bytes.extend([7u8; 64]);
        fs::write(dir.join(name), bytes).unwrap();
    }

    #[test]
    fn test_pool_size() {
        let (pool, _) = new_pool(3);
        assert_eq!(pool.threads(), 3);

        let (pool, _) = new_pool(0);
        assert_eq!(pool.threads(), num_cpus::get().max(1));
    }

    #[test]
    fn test_join_without_jobs() {
        let (pool, _) = new_pool(2);
        let snapshot = pool.join();
        assert_eq!(snapshot.to_string(), "0/0");
        assert!(snapshot.is_drained());
    }

    #[test]
    fn test_join_single_job() {
        let dir = TempDir::new().unwrap();
        write_encrypted(dir.path(), "a.rpgmvp");

        let (pool, _) = new_pool(1);
        pool.submit(Job::new(dir.path().join("a.rpgmvp"), RPGMV_IMAGE));
        let snapshot = pool.join();

        assert_eq!(snapshot.to_string(), "1/1");
        assert_eq!(snapshot.written, 1);
        assert!(dir.path().join("a.png").exists());
    }

    #[test]
    fn test_join_waits_for_all_jobs() {
        let dir = TempDir::new().unwrap();
        for i in 0..40 {
            write_encrypted(dir.path(), &format!("{}.rpgmvp", i));
        }
        for i in 0..10 {
            fs::write(dir.path().join(format!("bad{}.rpgmvp", i)), [0u8; 8]).unwrap();
        }

        let (pool, progress) = new_pool(4);
        for i in 0..40 {
            let path = dir.path().join(format!("{}.rpgmvp", i));
            pool.submit(Job::new(path, RPGMV_IMAGE));
        }
        for i in 0..10 {
            pool.submit(Job::new(
                dir.path().join(format!("bad{}.rpgmvp", i)),
                RPGMV_IMAGE,
            ));
        }
        let snapshot = pool.join();

        assert_eq!(snapshot.submitted, 50);
        assert_eq!(snapshot.completed, 50);
        assert_eq!(snapshot.written, 40);
        assert_eq!(snapshot.failures_of(FailureKind::TooSmall), 10);
        assert_eq!(progress.snapshot(), snapshot);
        for i in 0..40 {
            assert!(dir.path().join(format!("{}.png", i)).exists());
        }
    }

    #[test]
    fn test_completed_never_exceeds_submitted() {
        let dir = TempDir::new().unwrap();
        let (pool, progress) = new_pool(4);
        let done = AtomicBool::new(false);

        let snapshot = thread::scope(|scope| {
            let sampler = scope.spawn(|| {
                let mut samples = 0u64;
                loop {
                    let finished = done.load(Ordering::Acquire);
                    let snapshot = progress.snapshot();
                    assert!(snapshot.completed <= snapshot.submitted, "{}", snapshot);
                    samples += 1;
                    if finished {
                        return samples;
                    }
                }
            });

            for i in 0..500 {
                let path = dir.path().join(format!("missing{}.rpgmvp", i));
                pool.submit(Job::new(path, RPGMV_IMAGE));
            }
            let snapshot = pool.join();
            done.store(true, Ordering::Release);

            assert!(sampler.join().unwrap() > 0);
            snapshot
        });

        assert_eq!(snapshot.to_string(), "500/500");
        assert!(snapshot.is_drained());
    }

    #[test]
    fn test_failed_jobs_still_complete() {
        let dir = TempDir::new().unwrap();
        let (pool, _) = new_pool(2);
        for i in 0..5 {
            pool.submit(Job::new(
                dir.path().join(format!("missing{}.rpgmvp", i)),
                RPGMV_IMAGE,
            ));
        }
        let snapshot = pool.join();

        assert_eq!(snapshot.to_string(), "5/5");
        assert_eq!(snapshot.failures(), vec![(FailureKind::Open, 5)]);
    }
}
