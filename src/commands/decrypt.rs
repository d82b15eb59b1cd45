//! # decrypt 命令实现
//!
//! 递归解密目录中的 RPG Maker MV 加密图片。
//!
//! ## 功能
//! - 启动线程池与进度监视器
//! - 遍历目录并提交作业
//! - 等待所有作业完成后输出汇总
//!
//! ## 依赖关系
//! - 使用 `cli/decrypt.rs` 定义的参数
//! - 使用 `batch/`, `format/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::{
    DirectoryWalker, Progress, ProgressMonitor, ProgressSnapshot, ProgressView, Reporter,
    WorkerPool,
};
use crate::cli::decrypt::{DecryptArgs, ProgressMode};
use crate::error::{AppError, Result};
use crate::format::RPGMV_IMAGE;
use crate::utils::{output, progress};

use std::sync::Arc;
use std::time::{Duration, Instant};
use tabled::{Table, Tabled};

/// 失败汇总表行
#[derive(Debug, Clone, Tabled)]
struct FailureRow {
    #[tabled(rename = "Failure")]
    kind: String,
    #[tabled(rename = "Files")]
    count: u64,
}

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub snapshot: ProgressSnapshot,
    pub elapsed: Duration,
    pub threads: usize,
}

/// 执行 decrypt 命令
pub fn execute(args: DecryptArgs) -> Result<()> {
    output::print_header(&format!("Decrypting {}", RPGMV_IMAGE.name));

    let report = run(&args)?;
    print_summary(&report);

    Ok(())
}

/// 运行完整流程：线程池 -> 监视器 -> 遍历 -> 屏障 -> 停止监视器
pub fn run(args: &DecryptArgs) -> Result<RunReport> {
    // 验证输入目录
    if !args.root.exists() {
        return Err(AppError::DirectoryNotFound {
            path: args.root.display().to_string(),
        });
    }
    if !args.root.is_dir() {
        return Err(AppError::NotADirectory {
            path: args.root.display().to_string(),
        });
    }

    let start = Instant::now();

    let mode = resolve_mode(args.progress);
    let bar = match mode {
        ProgressMode::Bar => progress::create_counter_bar("Decrypting"),
        _ => progress::create_hidden_bar(),
    };
    let view = match mode {
        ProgressMode::Bar => ProgressView::Bar(bar.clone()),
        ProgressMode::Plain => ProgressView::Lines,
        _ => ProgressView::Silent,
    };

    let progress = Arc::new(Progress::new());
    let pool = WorkerPool::new(
        args.jobs,
        Arc::clone(&progress),
        Reporter::new(bar, args.verbose),
    )?
    .skip_existing(args.skip_existing);
    let threads = pool.threads();

    let monitor = ProgressMonitor::start(
        Arc::clone(&progress),
        Duration::from_millis(args.interval_ms),
        view,
    )?;

    if args.verbose {
        output::print_info(&format!(
            "Scanning '{}' with {} worker(s)",
            args.root.display(),
            threads
        ));
    }

    // 遍历失败是致命错误，已提交的作业随进程退出而放弃
    let walker = DirectoryWalker::new(args.root.clone(), RPGMV_IMAGE)
        .follow_links(args.follow_links);
    if let Err(e) = walker.walk(|job| pool.submit(job)) {
        monitor.stop();
        return Err(e);
    }

    let joined = pool.join();
    debug_assert!(joined.is_drained());
    let snapshot = monitor.stop();

    Ok(RunReport {
        snapshot,
        elapsed: start.elapsed(),
        threads,
    })
}

/// `auto` 模式：终端显示进度条，否则逐行输出
fn resolve_mode(mode: ProgressMode) -> ProgressMode {
    match mode {
        ProgressMode::Auto if console::Term::stderr().is_term() => ProgressMode::Bar,
        ProgressMode::Auto => ProgressMode::Plain,
        other => other,
    }
}

/// 打印最终汇总
fn print_summary(report: &RunReport) {
    let snapshot = &report.snapshot;

    output::print_done(&format!(
        "{} files processed in {:.2?} ({} written, {} skipped, {} failed)",
        snapshot,
        report.elapsed,
        snapshot.written,
        snapshot.skipped,
        snapshot.failed()
    ));

    let rows: Vec<FailureRow> = snapshot
        .failures()
        .into_iter()
        .map(|(kind, count)| FailureRow {
            kind: kind.to_string(),
            count,
        })
        .collect();

    if !rows.is_empty() {
        println!("\n{}", Table::new(&rows));
    }
}
