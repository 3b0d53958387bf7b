// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::CrawlError;
use std::path::{Path, PathBuf};

/// 爬取目标
///
/// 标识一位艺人以及其输出根目录，在一次运行中保持不变。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    /// 站点相关的艺人标识（slug）
    identifier: String,
    /// 输出根目录，每张专辑在其下拥有一个子目录
    output_root: PathBuf,
}

impl CrawlTarget {
    /// 创建新的爬取目标
    pub fn new(identifier: impl Into<String>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            output_root: output_root.into(),
        }
    }

    /// 以 `<data_dir>/<identifier>` 作为输出根目录创建爬取目标
    pub fn with_data_dir(identifier: impl Into<String>, data_dir: impl AsRef<Path>) -> Self {
        let identifier = identifier.into();
        let output_root = data_dir.as_ref().join(path_component(&identifier));
        Self {
            identifier,
            output_root,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// 专辑目录：`<output_root>/<album_name>`
    pub fn album_dir(&self, album_name: &str) -> PathBuf {
        self.output_root.join(path_component(album_name))
    }
}

/// 歌曲文件路径：`<album_dir>/<song_name>.txt`
pub fn song_file(album_dir: &Path, song_name: &str) -> PathBuf {
    album_dir.join(format!("{}.txt", path_component(song_name)))
}

/// 把名称变成单个路径组件
///
/// 空格等字符原样保留，只替换路径分隔符以及 `.`/`..`。
pub fn path_component(name: &str) -> String {
    match name {
        "." | ".." => name.replace('.', "_"),
        _ => name.replace(['/', '\\', '\0'], "-"),
    }
}

/// 列表页上发现的名称与链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    /// 名称（专辑名或歌曲名），不为空
    pub name: String,
    /// 相对链接（专辑 slug 或歌曲片段）
    pub link: String,
}

impl LinkEntry {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }
}

/// 一个列表页的解析结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// 可用的条目，按页面顺序
    pub entries: Vec<LinkEntry>,
    /// 因缺少链接而被跳过的行（用于日志和统计）
    pub skipped: Vec<String>,
}

/// 单个子任务的失败记录
#[derive(Debug)]
pub struct CrawlFailure {
    /// 子任务标识（目标文件或专辑目录）
    pub subject: String,
    pub error: CrawlError,
}

/// 爬取报告
///
/// 每一层聚合点都会产出一份报告，子报告合并进父报告。
#[derive(Debug, Default)]
pub struct CrawlReport {
    /// 已写入的文件
    pub written: Vec<PathBuf>,
    /// 被跳过的列表行数
    pub skipped: usize,
    /// 失败的子任务
    pub failures: Vec<CrawlFailure>,
}

impl CrawlReport {
    pub fn record_failure(&mut self, subject: impl Into<String>, error: CrawlError) {
        self.failures.push(CrawlFailure {
            subject: subject.into(),
            error,
        });
    }

    /// 合并子报告
    pub fn merge(&mut self, other: CrawlReport) {
        self.written.extend(other.written);
        self.skipped += other.skipped;
        self.failures.extend(other.failures);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// 没有失败时返回报告本身，否则返回携带报告的 `CrawlError::Incomplete`
    pub fn into_result(self) -> Result<Self, CrawlError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(CrawlError::Incomplete(Box::new(self)))
        }
    }
}
