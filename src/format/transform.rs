//! # 文件头替换转换
//!
//! 无状态的单遍字节转换：校验源文件头，去掉源文件头，
//! 并用目标文件头覆盖紧随其后的同长度字节。
//!
//! ## 依赖关系
//! - 被 `format/mod.rs` 导出
//! - 被 `batch/job.rs` 调用
//! - 无外部模块依赖

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 格式校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("file is too small ({len} bytes, need at least {required})")]
    TooSmall { len: u64, required: u64 },

    #[error("invalid magic")]
    BadMagic,
}

/// 文件头替换转换
///
/// 所有字段均为 `'static` 数据，可在任意多个工作线程间按值复制使用。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    /// 描述名（用于输出）
    pub name: &'static str,
    /// 源格式文件头
    pub source_header: &'static [u8],
    /// 目标格式文件头
    pub target_header: &'static [u8],
    /// 需要处理的文件名后缀
    pub source_suffixes: &'static [&'static str],
    /// 目标文件扩展名（不含 `.`）
    pub target_extension: &'static str,
}

impl Transform {
    /// 有效源文件的最小长度
    pub fn min_len(&self) -> usize {
        self.source_header.len() + self.target_header.len()
    }

    /// 检查文件长度是否足够
    pub fn check_len(&self, len: u64) -> Result<(), FormatError> {
        let required = self.min_len() as u64;
        if len < required {
            return Err(FormatError::TooSmall { len, required });
        }
        Ok(())
    }

    /// 文件名是否以任一源后缀结尾（区分大小写）
    pub fn matches(&self, file_name: &OsStr) -> bool {
        let name = file_name.as_encoded_bytes();
        self.source_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_bytes()))
    }

    /// 执行转换，返回新的文件内容
    ///
    /// 输出长度恒为 `bytes.len() - source_header.len()`。
    pub fn apply(&self, bytes: &[u8]) -> Result<Vec<u8>, FormatError> {
        self.check_len(bytes.len() as u64)?;

        if !bytes.starts_with(self.source_header) {
            return Err(FormatError::BadMagic);
        }

        let payload = &bytes[self.source_header.len()..];
        let mut output = Vec::with_capacity(payload.len());
        output.extend_from_slice(self.target_header);
        output.extend_from_slice(&payload[self.target_header.len()..]);
        Ok(output)
    }

    /// 输出文件路径：替换扩展名
    ///
    /// 整个文件名就是源后缀时（如 `.rpgmvp`），把后缀当作扩展名替换；
    /// 其余没有扩展名的路径原样返回。
    pub fn output_path(&self, path: &Path) -> PathBuf {
        if path.extension().is_some() {
            return path.with_extension(self.target_extension);
        }

        match path.file_name() {
            Some(name) if self.matches(name) => {
                path.with_file_name(format!(".{}", self.target_extension))
            }
            _ => path.to_path_buf(),
        }
    }
}
