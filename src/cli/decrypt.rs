//! # decrypt 参数定义
//!
//! 递归解密目录中的 `.rpgmvp` / `.png_` 文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/decrypt.rs`

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 进度显示方式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ProgressMode {
    /// Progress bar on a terminal, plain lines otherwise
    Auto,
    /// Always draw a progress bar
    Bar,
    /// Print a `completed/submitted` line on every tick
    Plain,
    /// No periodic progress output
    Off,
}

impl std::fmt::Display for ProgressMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProgressMode::Auto => write!(f, "auto"),
            ProgressMode::Bar => write!(f, "bar"),
            ProgressMode::Plain => write!(f, "plain"),
            ProgressMode::Off => write!(f, "off"),
        }
    }
}

/// decrypt 参数
#[derive(Args, Debug, Clone)]
pub struct DecryptArgs {
    /// Root directory to scan recursively
    pub root: PathBuf,

    /// Number of worker threads (0 = one per logical CPU)
    #[arg(short, long, default_value_t = 0, env = "RPGMDEC_JOBS")]
    pub jobs: usize,

    /// Progress refresh interval in milliseconds
    #[arg(
        long,
        default_value_t = 300,
        env = "RPGMDEC_INTERVAL_MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_ms: u64,

    /// How to display progress
    #[arg(long, value_enum, default_value_t = ProgressMode::Auto)]
    pub progress: ProgressMode,

    /// Skip files whose .png output already exists
    #[arg(long, default_value_t = false)]
    pub skip_existing: bool,

    /// Follow symbolic links while scanning
    #[arg(short = 'L', long, default_value_t = false)]
    pub follow_links: bool,

    /// Print every decrypted file
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
