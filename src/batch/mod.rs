//! # 批量处理模块
//!
//! 并发批量处理引擎。
//!
//! ## 功能
//! - 递归遍历目录，边遍历边提交作业
//! - 固定大小线程池并行执行作业
//! - 原子计数器记录提交/完成数
//! - 定时进度显示
//! - 完成屏障
//!
//! ## 依赖关系
//! - 被 `commands/decrypt.rs` 使用
//! - 使用 `rayon` 执行作业，`walkdir` 遍历目录，`crossbeam` 做同步
//! - 使用 `indicatif` 显示进度

pub mod job;
pub mod monitor;
pub mod pool;
pub mod progress;
pub mod reporter;
pub mod walker;

pub use monitor::{ProgressMonitor, ProgressView};
pub use pool::WorkerPool;
pub use progress::{Progress, ProgressSnapshot};
pub use reporter::Reporter;
pub use walker::DirectoryWalker;
