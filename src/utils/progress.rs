//! # 进度条工具
//!
//! 封装 `indicatif` 提供统一的进度条样式。
//!
//! ## 依赖关系
//! - 被 `commands/decrypt.rs` 使用
//! - 使用 `indicatif` crate

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// 创建作业计数进度条
///
/// 长度随提交数增长，位置为完成数，显示为 `completed/submitted`。
/// 由 `batch/monitor.rs` 定时刷新，不启用自动 tick。
pub fn create_counter_bar(message: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
        )
        .unwrap()
        .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

/// 创建不可见进度条（非交互输出或测试时使用）
pub fn create_hidden_bar() -> ProgressBar {
    ProgressBar::hidden()
}
