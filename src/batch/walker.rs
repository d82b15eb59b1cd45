//! # 目录遍历器
//!
//! 递归遍历目录树，为每个匹配后缀的文件创建作业并立即提交。
//!
//! ## 功能
//! - 递归目录搜索（单线程，边遍历边提交）
//! - 按文件名后缀匹配（区分大小写）
//! - 任何目录列举失败都是致命错误，避免静默漏掉文件
//!
//! ## 依赖关系
//! - 被 `commands/decrypt.rs` 调用
//! - 使用 `walkdir` 遍历目录

use super::job::Job;
use crate::error::{AppError, Result};
use crate::format::Transform;

use std::path::PathBuf;
use walkdir::WalkDir;

/// 目录遍历器
pub struct DirectoryWalker {
    /// 根目录
    root: PathBuf,
    /// 作业使用的转换
    transform: Transform,
    /// 是否跟随符号链接
    follow_links: bool,
}

impl DirectoryWalker {
    /// 创建新的遍历器
    pub fn new(root: PathBuf, transform: Transform) -> Self {
        Self {
            root,
            transform,
            follow_links: false,
        }
    }

    /// 设置是否跟随符号链接
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// 遍历目录树，每个匹配文件调用一次 `submit`
    ///
    /// 返回提交的作业数。
    pub fn walk<F>(&self, mut submit: F) -> Result<usize>
    where
        F: FnMut(Job),
    {
        let mut submitted = 0;

        for entry in WalkDir::new(&self.root).follow_links(self.follow_links) {
            let entry = entry.map_err(|source| AppError::Walk {
                path: source.path().unwrap_or(&self.root).display().to_string(),
                source,
            })?;

            if entry.file_type().is_file() && self.transform.matches(entry.file_name()) {
                submit(Job::new(entry.into_path(), self.transform));
                submitted += 1;
            }
        }

        Ok(submitted)
    }
}
