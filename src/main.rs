//! # rpgmdec - RPG Maker MV 加密图片批量解密工具
//!
//! 递归扫描目录，将 `.rpgmvp` / `.png_` 加密图片还原为 `.png`。
//! 文件遍历在主线程进行，解密作业由固定大小的线程池并行执行。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (遍历、线程池、进度、完成屏障)
//!   │     └── format/    (文件头定义与转换)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod format;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&error_chain(&e));
        std::process::exit(1);
    }
}

/// 拼接错误及其全部来源
fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}
