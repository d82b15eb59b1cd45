//! # 统一错误处理模块
//!
//! 定义 rpgmdec 的错误类型，使用 `thiserror` 派生。
//!
//! - `AppError`: 致命错误，向上传播到 `main` 后以非零状态退出
//! - `JobError`: 单个文件作业的错误，在工作线程内记录后吞掉，不影响其他作业
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 使用 `format/transform.rs` 中的 `FormatError`

use crate::format::FormatError;
use std::path::PathBuf;
use thiserror::Error;

/// 致命错误类型
#[derive(Error, Debug)]
pub enum AppError {
    // ─────────────────────────────────────────────────────────────
    // 输入错误
    // ─────────────────────────────────────────────────────────────
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: String },

    // ─────────────────────────────────────────────────────────────
    // 遍历错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to list directory: {path}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 启动错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to build worker pool with {threads} threads")]
    ThreadPool {
        threads: usize,
        #[source]
        source: rayon::ThreadPoolBuildError,
    },

    #[error("Failed to start progress monitor")]
    MonitorSpawn {
        #[source]
        source: std::io::Error,
    },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 作业失败类别，用于诊断输出与汇总统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Open,
    SizeQuery,
    Read,
    IncompleteRead,
    TooSmall,
    BadMagic,
    Create,
    Write,
    IncompleteWrite,
    SamePath,
}

impl FailureKind {
    /// 所有类别（顺序即汇总表顺序）
    pub const ALL: [FailureKind; 10] = [
        FailureKind::Open,
        FailureKind::SizeQuery,
        FailureKind::Read,
        FailureKind::IncompleteRead,
        FailureKind::TooSmall,
        FailureKind::BadMagic,
        FailureKind::Create,
        FailureKind::Write,
        FailureKind::IncompleteWrite,
        FailureKind::SamePath,
    ];

    /// 在 `ALL` 中的下标
    pub fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Open => write!(f, "open"),
            FailureKind::SizeQuery => write!(f, "size query"),
            FailureKind::Read => write!(f, "read"),
            FailureKind::IncompleteRead => write!(f, "incomplete read"),
            FailureKind::TooSmall => write!(f, "too small"),
            FailureKind::BadMagic => write!(f, "bad magic"),
            FailureKind::Create => write!(f, "create"),
            FailureKind::Write => write!(f, "write"),
            FailureKind::IncompleteWrite => write!(f, "incomplete write"),
            FailureKind::SamePath => write!(f, "same path"),
        }
    }
}

/// 单个作业错误类型
#[derive(Error, Debug)]
pub enum JobError {
    // ─────────────────────────────────────────────────────────────
    // 读取阶段
    // ─────────────────────────────────────────────────────────────
    #[error("failed to open file")]
    Open(#[source] std::io::Error),

    #[error("failed to get file size")]
    Metadata(#[source] std::io::Error),

    #[error("failed to read file")]
    Read(#[source] std::io::Error),

    #[error("incomplete read: expected {expected} bytes, got {actual}")]
    IncompleteRead { expected: u64, actual: u64 },

    // ─────────────────────────────────────────────────────────────
    // 格式校验
    // ─────────────────────────────────────────────────────────────
    #[error(transparent)]
    Format(#[from] FormatError),

    // ─────────────────────────────────────────────────────────────
    // 写入阶段
    // ─────────────────────────────────────────────────────────────
    #[error("failed to create output file: {}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write output file: {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("incomplete write to output file: {}", path.display())]
    IncompleteWrite { path: PathBuf },

    #[error("output path equals source path, refusing to overwrite")]
    SamePath,
}

impl JobError {
    /// 错误所属的失败类别
    pub fn kind(&self) -> FailureKind {
        match self {
            JobError::Open(_) => FailureKind::Open,
            JobError::Metadata(_) => FailureKind::SizeQuery,
            JobError::Read(_) => FailureKind::Read,
            JobError::IncompleteRead { .. } => FailureKind::IncompleteRead,
            JobError::Format(FormatError::TooSmall { .. }) => FailureKind::TooSmall,
            JobError::Format(FormatError::BadMagic) => FailureKind::BadMagic,
            JobError::Create { .. } => FailureKind::Create,
            JobError::Write { .. } => FailureKind::Write,
            JobError::IncompleteWrite { .. } => FailureKind::IncompleteWrite,
            JobError::SamePath => FailureKind::SamePath,
        }
    }

    /// 带底层原因的完整描述
    pub fn detail(&self) -> String {
        match std::error::Error::source(self) {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_index_matches_all() {
        for (i, kind) in FailureKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_job_error_kind() {
        let err = JobError::Format(FormatError::TooSmall {
            len: 10,
            required: 32,
        });
        assert_eq!(err.kind(), FailureKind::TooSmall);
        assert!(err.detail().contains("too small"));

        let err = JobError::Open(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.kind(), FailureKind::Open);
        assert!(err.detail().starts_with("failed to open file: "));
    }
}
