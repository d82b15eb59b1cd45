//! # 文件格式模块
//!
//! RPG Maker MV 加密图片格式与 PNG 格式的文件头定义，以及两者之间的转换。
//!
//! ## 格式说明
//! - 加密图片 (`.rpgmvp` / `.png_`): 16 字节 `RPGMV` 文件头 + 原 PNG 数据
//!   （原 PNG 的前 16 字节被加密，但这 16 字节是固定内容，可直接恢复）
//! - PNG: 8 字节 magic + IHDR 块长度 (恒为 13) + 块类型 `IHDR`
//!
//! ## 依赖关系
//! - 被 `batch/` 模块使用
//! - 子模块: transform

pub mod transform;

pub use transform::{FormatError, Transform};

/// RPG Maker MV 加密文件头
pub const RPGMV_HEADER: [u8; 16] = [
    0x52, 0x50, 0x47, 0x4D, 0x56, 0x00, 0x00, 0x00, //
    0x00, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// PNG 文件头（magic + IHDR 块头）
pub const PNG_HEADER: [u8; 16] = [
    // PNG magic
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A,
    // IHDR 块长度，固定为 13
    0x00, 0x00, 0x00, 0x0D,
    // 块类型 "IHDR"
    0x49, 0x48, 0x44, 0x52,
];

/// 加密图片的文件名后缀（区分大小写）
pub const RPGMV_IMAGE_SUFFIXES: [&str; 2] = [".rpgmvp", ".png_"];

/// 加密图片 -> PNG
pub const RPGMV_IMAGE: Transform = Transform {
    name: "rpgmvp -> png",
    source_header: &RPGMV_HEADER,
    target_header: &PNG_HEADER,
    source_suffixes: &RPGMV_IMAGE_SUFFIXES,
    target_extension: "png",
};
