//! # 文件作业
//!
//! 单个待处理文件：读取源文件、执行转换、写出目标文件。
//!
//! ## 依赖关系
//! - 由 `batch/walker.rs` 创建，由 `batch/pool.rs` 执行
//! - 使用 `format/transform.rs`

use crate::error::JobError;
use crate::format::Transform;

use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// 单个文件作业结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    /// 已写出目标文件
    Written { output: PathBuf, bytes: usize },
    /// 跳过（目标文件已存在）
    Skipped { output: PathBuf },
}

/// 文件作业，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    path: PathBuf,
    transform: Transform,
}

impl Job {
    pub fn new(path: PathBuf, transform: Transform) -> Self {
        Self { path, transform }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 目标文件路径
    pub fn output_path(&self) -> PathBuf {
        self.transform.output_path(&self.path)
    }

    /// 执行作业
    ///
    /// 失败时不会写出目标文件。
    pub fn run(&self, skip_existing: bool) -> Result<JobOutcome, JobError> {
        let output = self.output_path();
        if output == self.path {
            return Err(JobError::SamePath);
        }

        if skip_existing && output.exists() {
            return Ok(JobOutcome::Skipped { output });
        }

        let source = self.read_source()?;
        let decrypted = self.transform.apply(&source)?;
        write_output(&output, &decrypted)?;

        Ok(JobOutcome::Written {
            output,
            bytes: decrypted.len(),
        })
    }

    /// 一次性读入整个源文件
    fn read_source(&self) -> Result<Vec<u8>, JobError> {
        let mut file = File::open(&self.path).map_err(JobError::Open)?;
        let len = file.metadata().map_err(JobError::Metadata)?.len();

        // 读取前先按文件大小过滤，避免为无效文件分配内存
        self.transform.check_len(len)?;

        let mut bytes = Vec::with_capacity(len as usize);
        file.read_to_end(&mut bytes).map_err(JobError::Read)?;

        if bytes.len() as u64 != len {
            return Err(JobError::IncompleteRead {
                expected: len,
                actual: bytes.len() as u64,
            });
        }

        Ok(bytes)
    }
}

/// 创建（或覆盖）目标文件并写入全部内容
fn write_output(path: &Path, bytes: &[u8]) -> Result<(), JobError> {
    let mut file = File::create(path).map_err(|source| JobError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(bytes).map_err(|source| match source.kind() {
        ErrorKind::WriteZero => JobError::IncompleteWrite {
            path: path.to_path_buf(),
        },
        _ => JobError::Write {
            path: path.to_path_buf(),
            source,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::format::{PNG_HEADER, RPGMV_HEADER, RPGMV_IMAGE};
    use std::fs;
    use tempfile::TempDir;

    fn write_encrypted(dir: &Path, name: &str, payload_len: usize) -> PathBuf {
        let mut bytes = RPGMV_HEADER.to_vec();
        bytes.extend(std::iter::repeat(0xAB).take(payload_len));
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_run_writes_png() {
        let dir = TempDir::new().unwrap();
        let source = write_encrypted(dir.path(), "a.rpgmvp", 100);

        let job = Job::new(source.clone(), RPGMV_IMAGE);
        let outcome = job.run(false).unwrap();

        let output = dir.path().join("a.png");
        assert_eq!(
            outcome,
            JobOutcome::Written {
                output: output.clone(),
                bytes: 100
            }
        );

        let written = fs::read(&output).unwrap();
        assert_eq!(written.len(), 100);
        assert_eq!(&written[..16], &PNG_HEADER);
        // 源文件保持不变
        assert_eq!(fs::read(&source).unwrap().len(), 116);
    }

    #[test]
    fn test_run_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let source = write_encrypted(dir.path(), "b.png_", 40);
        fs::write(dir.path().join("b.png"), b"stale").unwrap();

        Job::new(source, RPGMV_IMAGE).run(false).unwrap();

        let written = fs::read(dir.path().join("b.png")).unwrap();
        assert_eq!(written.len(), 40);
        assert_eq!(&written[..16], &PNG_HEADER);
    }

    #[test]
    fn test_run_skip_existing() {
        let dir = TempDir::new().unwrap();
        let source = write_encrypted(dir.path(), "b.rpgmvp", 40);
        fs::write(dir.path().join("b.png"), b"keep").unwrap();

        let outcome = Job::new(source, RPGMV_IMAGE).run(true).unwrap();

        assert!(matches!(outcome, JobOutcome::Skipped { .. }));
        assert_eq!(fs::read(dir.path().join("b.png")).unwrap(), b"keep");
    }

    #[test]
    fn test_run_too_small() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("c.rpgmvp");
        fs::write(&source, [0u8; 10]).unwrap();

        let err = Job::new(source, RPGMV_IMAGE).run(false).unwrap_err();

        assert_eq!(err.kind(), FailureKind::TooSmall);
        assert!(!dir.path().join("c.png").exists());
    }

    #[test]
    fn test_run_bad_magic() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("d.rpgmvp");
        fs::write(&source, [0x42u8; 64]).unwrap();

        let err = Job::new(source, RPGMV_IMAGE).run(false).unwrap_err();

        assert_eq!(err.kind(), FailureKind::BadMagic);
        assert!(!dir.path().join("d.png").exists());
    }

    #[test]
    fn test_run_on_own_output_fails() {
        let dir = TempDir::new().unwrap();
        let source = write_encrypted(dir.path(), "e.rpgmvp", 50);
        Job::new(source, RPGMV_IMAGE).run(false).unwrap();

        // 对输出再次转换必须失败，且不能破坏输出
        let png = dir.path().join("e.png");
        let before = fs::read(&png).unwrap();
        let renamed = dir.path().join("e2.rpgmvp");
        fs::copy(&png, &renamed).unwrap();

        let err = Job::new(renamed, RPGMV_IMAGE).run(false).unwrap_err();
        assert_eq!(err.kind(), FailureKind::BadMagic);
        assert!(!dir.path().join("e2.png").exists());
        assert_eq!(fs::read(&png).unwrap(), before);
    }

    #[test]
    fn test_run_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Job::new(dir.path().join("missing.rpgmvp"), RPGMV_IMAGE)
            .run(false)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Open);
    }

    #[test]
    fn test_run_bare_suffix_name() {
        let dir = TempDir::new().unwrap();
        let source = write_encrypted(dir.path(), ".rpgmvp", 40);

        let outcome = Job::new(source, RPGMV_IMAGE).run(false).unwrap();

        let output = dir.path().join(".png");
        assert_eq!(
            outcome,
            JobOutcome::Written {
                output: output.clone(),
                bytes: 40
            }
        );
        assert!(fs::read(&output).unwrap().starts_with(&PNG_HEADER));
    }

    #[test]
    fn test_run_same_path() {
        let dir = TempDir::new().unwrap();
        let source = write_encrypted(dir.path(), "noext", 20);
        let before = fs::read(&source).unwrap();

        let job = Job::new(source.clone(), RPGMV_IMAGE);
        let err = job.run(false).unwrap_err();

        assert_eq!(err.kind(), FailureKind::SamePath);
        assert_eq!(fs::read(&source).unwrap(), before);
    }
}
