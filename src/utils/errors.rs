// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::CrawlReport;
use crate::domain::repositories::storage_repository::StorageError;
use crate::domain::sites::backend::ExtractionError;
use crate::engines::traits::FetchError;
use thiserror::Error;

/// 爬取错误类型
///
/// 歌曲、专辑、艺人三个层级共用的错误，逐层向上传播
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("获取页面失败: {0}")]
    Fetch(#[from] FetchError),

    #[error("解析页面失败: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("写入文件失败: {0}")]
    Write(#[from] StorageError),

    #[error("子任务异常退出: {0}")]
    TaskPanicked(String),

    #[error("配置错误: {0}")]
    Config(String),

    /// 至少一个子任务失败；报告中仍保留所有已写入的文件
    #[error(
        "爬取未完成: {} 个失败, {} 个文件已写入",
        .0.failures.len(),
        .0.written.len()
    )]
    Incomplete(Box<CrawlReport>),
}

impl CrawlError {
    /// 是否为聚合失败（而非单个任务自身的错误）
    pub fn is_incomplete(&self) -> bool {
        matches!(self, CrawlError::Incomplete(_))
    }
}
