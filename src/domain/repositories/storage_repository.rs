// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 存储仓库特质
///
/// 爬取核心只通过该接口写出歌词文本，写出的内容不会被读回
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 写入文本内容，必要时创建所有父目录，已存在的文件被覆盖
    async fn save(&self, path: &Path, contents: &str) -> Result<(), StorageError>;
}
