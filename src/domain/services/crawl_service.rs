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

use crate::domain::models::crawl::{song_file, CrawlReport, CrawlTarget};
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::domain::sites::backend::SiteBackend;
use crate::engines::traits::PageFetcher;
use crate::infrastructure::observability::metrics::{
    CRAWL_FAILURES_TOTAL, ROWS_SKIPPED_TOTAL, SONGS_WRITTEN_TOTAL,
};
use crate::utils::errors::CrawlError;
use crate::utils::request_gate::RequestGate;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// 歌词爬取服务
///
/// 艺人 → 专辑 → 歌曲三级扇出。每张专辑、每首歌各占一个任务，所有任务共享
/// 同一个页面获取器（连接池）与并发闸门。每个聚合点都会等待全部子任务结束后
/// 再汇总结果：兄弟任务之间互不取消，成功写入的文件总会保留。
#[derive(Clone)]
pub struct LyricsCrawler {
    /// 页面获取器，持有共享连接池
    fetcher: Arc<dyn PageFetcher>,
    /// 站点后端
    site: Arc<dyn SiteBackend>,
    /// 歌词写出目标
    storage: Arc<dyn StorageRepository>,
    /// 请求并发闸门
    gate: RequestGate,
}

impl LyricsCrawler {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `fetcher` - 页面获取器
    /// * `site` - 站点后端
    /// * `storage` - 存储仓库
    /// * `gate` - 请求并发闸门
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        site: Arc<dyn SiteBackend>,
        storage: Arc<dyn StorageRepository>,
        gate: RequestGate,
    ) -> Self {
        Self {
            fetcher,
            site,
            storage,
            gate,
        }
    }

    /// 在闸门许可内获取一个页面
    async fn fetch_page(&self, url: &str) -> Result<String, CrawlError> {
        let _permit = self.gate.acquire().await?;
        debug!(url, fetcher = self.fetcher.name(), "Fetching page");
        Ok(self.fetcher.fetch(url).await?)
    }

    /// 获取一首歌的歌词并写入 `<output_dir>/<song_name>.txt`
    ///
    /// 只有在拿到完整正文之后才写文件，失败时不会留下残缺文件
    ///
    /// # 返回值
    ///
    /// * `Ok(PathBuf)` - 写入的文件路径
    /// * `Err(CrawlError)` - 获取、解析或写入失败
    pub async fn fetch_song(
        &self,
        output_dir: &Path,
        song_name: &str,
        song_fragment: &str,
    ) -> Result<PathBuf, CrawlError> {
        let url = self.site.song_url(song_fragment)?;
        let page = self.fetch_page(&url).await?;
        let lyrics = self.site.extract_lyric_text(&page)?;

        let path = song_file(output_dir, song_name);
        self.storage.save(&path, &lyrics).await?;

        metrics::counter!(SONGS_WRITTEN_TOTAL).increment(1);
        info!(song = song_name, path = %path.display(), "Written");
        Ok(path)
    }

    /// 爬取一张专辑：解析歌曲列表，为每首歌启动一个任务并等待全部完成
    ///
    /// # 返回值
    ///
    /// * `Ok(CrawlReport)` - 所有歌曲均已写入
    /// * `Err(CrawlError::Incomplete)` - 至少一首歌失败，报告中包含已写入的文件
    /// * `Err(CrawlError)` - 专辑页本身获取或解析失败
    pub async fn crawl_album(
        &self,
        album_slug: &str,
        output_dir: &Path,
    ) -> Result<CrawlReport, CrawlError> {
        let url = self.site.album_url(album_slug)?;
        let page = self.fetch_page(&url).await?;
        let listing = self.site.extract_song_list(&page)?;

        let mut report = CrawlReport {
            skipped: listing.skipped.len(),
            ..Default::default()
        };
        metrics::counter!(ROWS_SKIPPED_TOTAL).increment(listing.skipped.len() as u64);
        info!(
            album = album_slug,
            songs = listing.entries.len(),
            skipped = listing.skipped.len(),
            "Crawling album"
        );

        let tasks = listing
            .entries
            .into_iter()
            .map(|song| {
                let crawler = self.clone();
                let dir = output_dir.to_path_buf();
                let subject = song_file(&dir, &song.name).display().to_string();
                let handle = tokio::spawn(async move {
                    crawler.fetch_song(&dir, &song.name, &song.link).await
                });
                (subject, handle)
            })
            .collect();

        for (subject, outcome) in gather(tasks).await {
            match outcome {
                Ok(path) => report.written.push(path),
                Err(e) => {
                    error!(song = %subject, "Song failed: {}", e);
                    metrics::counter!(CRAWL_FAILURES_TOTAL).increment(1);
                    report.record_failure(subject, e);
                }
            }
        }

        report.into_result()
    }

    /// 爬取一位艺人：解析专辑列表，为每张专辑启动一个任务并等待整棵子树完成
    ///
    /// 每张专辑写入 `<output_root>/<album_name>`
    pub async fn crawl_artist(&self, target: &CrawlTarget) -> Result<CrawlReport, CrawlError> {
        let url = self.site.artist_url(target.identifier())?;
        let page = self.fetch_page(&url).await?;
        let listing = self.site.extract_album_list(&page)?;

        let mut report = CrawlReport {
            skipped: listing.skipped.len(),
            ..Default::default()
        };
        metrics::counter!(ROWS_SKIPPED_TOTAL).increment(listing.skipped.len() as u64);
        info!(
            artist = target.identifier(),
            site = self.site.name(),
            albums = listing.entries.len(),
            output = %target.output_root().display(),
            "Crawling artist"
        );

        let tasks = listing
            .entries
            .into_iter()
            .map(|album| {
                let crawler = self.clone();
                let dir = target.album_dir(&album.name);
                let subject = dir.display().to_string();
                let handle =
                    tokio::spawn(async move { crawler.crawl_album(&album.link, &dir).await });
                (subject, handle)
            })
            .collect();

        for (subject, outcome) in gather(tasks).await {
            match outcome {
                Ok(album_report) => report.merge(album_report),
                Err(CrawlError::Incomplete(album_report)) => report.merge(*album_report),
                Err(e) => {
                    error!(album = %subject, "Album failed: {}", e);
                    metrics::counter!(CRAWL_FAILURES_TOTAL).increment(1);
                    report.record_failure(subject, e);
                }
            }
        }

        info!(
            artist = target.identifier(),
            written = report.written.len(),
            skipped = report.skipped,
            failed = report.failures.len(),
            "Artist crawl finished"
        );
        report.into_result()
    }
}

/// 等待所有子任务结束，按启动顺序返回每个子任务的标识与结果
///
/// 不会因为某个子任务失败而提前返回，异常退出的任务记为 `TaskPanicked`
async fn gather<T>(
    tasks: Vec<(String, JoinHandle<Result<T, CrawlError>>)>,
) -> Vec<(String, Result<T, CrawlError>)> {
    let (subjects, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
    let outcomes = join_all(handles).await;

    subjects
        .into_iter()
        .zip(outcomes)
        .map(|(subject, joined)| {
            let outcome = joined
                .map_err(|e| CrawlError::TaskPanicked(e.to_string()))
                .and_then(|result| result);
            (subject, outcome)
        })
        .collect()
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
