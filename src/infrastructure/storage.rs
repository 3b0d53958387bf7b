// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};

/// 本地文件系统存储实现
///
/// 相对路径基于 `base_path` 解析；默认的空基路径表示按原样使用路径
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_full_path(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

#[async_trait]
impl StorageRepository for LocalStorage {
    async fn save(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
        let full_path = self.get_full_path(path);

        // 确保目录存在
        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.flush().await?;

        Ok(())
    }
}

#[cfg(test)]
pub(crate) use in_memory::InMemoryStorage;

#[cfg(test)]
mod in_memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// 测试用的内存存储实现（用于单元测试）
    #[derive(Debug, Clone, Default)]
    pub(crate) struct InMemoryStorage {
        data: Arc<RwLock<HashMap<PathBuf, String>>>,
    }

    impl InMemoryStorage {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        /// 已写入的全部路径，按字典序排列
        pub(crate) async fn paths(&self) -> Vec<PathBuf> {
            let map = self.data.read().await;
            let mut paths: Vec<PathBuf> = map.keys().cloned().collect();
            paths.sort();
            paths
        }

        pub(crate) async fn read(&self, path: &Path) -> Option<String> {
            self.data.read().await.get(path).cloned()
        }
    }

    #[async_trait]
    impl StorageRepository for InMemoryStorage {
        async fn save(&self, path: &Path, contents: &str) -> Result<(), StorageError> {
            let mut map = self.data.write().await;
            map.insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }
}
