//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。
//!
//! ## 命令结构
//! - `rpgmdec <ROOT>`: 递归解密目录下的加密图片
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: decrypt

pub mod decrypt;

use clap::Parser;

/// rpgmdec - RPG Maker MV 加密图片批量解密工具
#[derive(Parser, Debug)]
#[command(name = "rpgmdec")]
#[command(version)]
#[command(
    about = "Recursively decrypt RPG Maker MV images (.rpgmvp, .png_) to .png",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub decrypt: decrypt::DecryptArgs,
}
