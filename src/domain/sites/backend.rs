// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::Listing;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Missing `{selector}` on {page} page")]
    MissingElement {
        page: &'static str,
        selector: &'static str,
    },
    #[error("Invalid selector `{0}`")]
    InvalidSelector(String),
    #[error("Invalid link `{link}`: {reason}")]
    InvalidLink { link: String, reason: String },
}

/// 歌词站点后端
///
/// 把站点的页面结构隔离在并发与重试逻辑之外。所有方法都是同步的，
/// 解析出的文档不会跨越 await 点。
pub trait SiteBackend: Send + Sync {
    /// Get the name of the site
    fn name(&self) -> &'static str;

    /// Absolute URL of an artist page
    fn artist_url(&self, artist: &str) -> Result<String, ExtractionError>;

    /// Absolute URL of an album page
    fn album_url(&self, album_slug: &str) -> Result<String, ExtractionError>;

    /// Absolute URL of a song page from the fragment found on the album page
    fn song_url(&self, song_fragment: &str) -> Result<String, ExtractionError>;

    /// 艺人页上的专辑列表（专辑名 → 专辑 slug），缺少链接的行被跳过
    fn extract_album_list(&self, artist_page: &str) -> Result<Listing, ExtractionError>;

    /// 专辑页上的歌曲列表（歌曲名 → 歌曲片段），缺少链接的行被跳过
    fn extract_song_list(&self, album_page: &str) -> Result<Listing, ExtractionError>;

    /// 歌曲页上的歌词正文，原样返回
    fn extract_lyric_text(&self, song_page: &str) -> Result<String, ExtractionError>;
}
