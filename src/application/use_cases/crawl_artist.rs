// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::Settings;
use crate::domain::models::crawl::{CrawlReport, CrawlTarget};
use crate::domain::services::crawl_service::LyricsCrawler;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::infrastructure::sites::{create_site_backend, Site};
use crate::infrastructure::storage::LocalStorage;
use crate::utils::errors::CrawlError;
use crate::utils::request_gate::RequestGate;
use std::sync::Arc;
use tracing::info;

/// 爬取一位艺人的完整用例
///
/// 为一次运行创建唯一的连接池，等待整棵任务树结束后释放
pub struct CrawlArtistUseCase {
    settings: Settings,
}

impl CrawlArtistUseCase {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// 执行爬取
    ///
    /// # 参数
    ///
    /// * `site` - 目标站点
    /// * `target` - 艺人标识与输出根目录
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 所有专辑与歌曲均已写入
    /// * `Err(CrawlError::Incomplete)` - 部分子任务失败，已写入的文件保留
    /// * `Err(CrawlError)` - 连接池创建失败或艺人页无法处理
    pub async fn execute(
        &self,
        site: Site,
        target: &CrawlTarget,
    ) -> Result<CrawlReport, CrawlError> {
        let engine = ReqwestEngine::from_settings(&self.settings)?;
        let backend = create_site_backend(site, &self.settings.site)?;
        let gate = RequestGate::new(self.settings.crawl.max_concurrent_requests);

        info!(
            artist = target.identifier(),
            site = %site,
            max_concurrent_requests = gate.permits(),
            "Starting crawl"
        );

        let crawler = LyricsCrawler::new(
            Arc::new(engine),
            backend,
            Arc::new(LocalStorage::default()),
            gate,
        );
        let result = crawler.crawl_artist(target).await;

        // Every spawned task has been joined, so this releases the last pool handle
        drop(crawler);
        info!("Connection pool closed");

        result
    }
}
