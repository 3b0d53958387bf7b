// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::crawl::{LinkEntry, Listing};
use crate::domain::sites::backend::{ExtractionError, SiteBackend};
use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://lyrics.com";

/// Longest row label kept for skip diagnostics
const LABEL_MAX_CHARS: usize = 60;

/// lyrics.com 站点后端
///
/// 页面结构：
/// - 艺人页：`#content-body div.tdata-ext div.clearfix`，每个专辑一行，`h3 a` 为专辑链接
/// - 专辑页：第一个 `tbody` 中每个 `tr` 为一首歌，首个单元格的 `strong a` 为歌词链接
/// - 歌曲页：`pre#lyric-body-text` 为歌词正文
#[derive(Debug, Clone)]
pub struct LyricsComBackend {
    base_url: Url,
}

impl LyricsComBackend {
    /// 使用指定的站点根地址创建后端
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        let mut base_url = Url::parse(base_url)?;
        // join() replaces the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, link: &str) -> Result<String, ExtractionError> {
        self.base_url
            .join(link)
            .map(|url| url.to_string())
            .map_err(|e| ExtractionError::InvalidLink {
                link: link.to_string(),
                reason: e.to_string(),
            })
    }
}

fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|_| ExtractionError::InvalidSelector(css.to_string()))
}

/// 元素文本，空白折叠为单个空格
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn row_label(element: ElementRef<'_>) -> String {
    element_text(element).chars().take(LABEL_MAX_CHARS).collect()
}

/// 链接的最后一个路径段
fn last_segment(href: &str) -> Option<&str> {
    href.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}

impl SiteBackend for LyricsComBackend {
    fn name(&self) -> &'static str {
        "lyrics.com"
    }

    fn artist_url(&self, artist: &str) -> Result<String, ExtractionError> {
        self.resolve(&format!("artist/{}", artist))
    }

    fn album_url(&self, album_slug: &str) -> Result<String, ExtractionError> {
        self.resolve(&format!("album/{}", album_slug))
    }

    fn song_url(&self, song_fragment: &str) -> Result<String, ExtractionError> {
        // Site-absolute fragments stay under the base path, like artist and album URLs
        self.resolve(song_fragment.trim_start_matches('/'))
    }

    fn extract_album_list(&self, artist_page: &str) -> Result<Listing, ExtractionError> {
        let document = Html::parse_document(artist_page);
        let content = document
            .select(&selector("#content-body")?)
            .next()
            .ok_or(ExtractionError::MissingElement {
                page: "artist",
                selector: "#content-body",
            })?;
        let table = content
            .select(&selector("div.tdata-ext")?)
            .next()
            .ok_or(ExtractionError::MissingElement {
                page: "artist",
                selector: "div.tdata-ext",
            })?;

        let rows = selector("div.clearfix")?;
        let heading_link = selector("h3 a")?;
        let mut listing = Listing::default();

        for row in table.select(&rows) {
            let Some(anchor) = row.select(&heading_link).next() else {
                let label = row_label(row);
                warn!(row = %label, "Album row has no link, skipping");
                listing.skipped.push(label);
                continue;
            };

            let name = element_text(anchor);
            let slug = anchor.value().attr("href").and_then(last_segment);
            match slug {
                Some(slug) if !name.is_empty() => {
                    listing.entries.push(LinkEntry::new(name, slug));
                }
                _ => {
                    let label = if name.is_empty() { row_label(row) } else { name };
                    warn!(row = %label, "Album row has no usable link, skipping");
                    listing.skipped.push(label);
                }
            }
        }

        Ok(listing)
    }

    fn extract_song_list(&self, album_page: &str) -> Result<Listing, ExtractionError> {
        let document = Html::parse_document(album_page);
        let body = document
            .select(&selector("tbody")?)
            .next()
            .ok_or(ExtractionError::MissingElement {
                page: "album",
                selector: "tbody",
            })?;

        let rows = selector("tr")?;
        let cell = selector("td")?;
        let lyric_link = selector("strong a")?;
        let mut listing = Listing::default();

        for row in body.select(&rows) {
            // Header-style rows carry no cells
            let Some(first_cell) = row.select(&cell).next() else {
                continue;
            };

            let Some(anchor) = first_cell.select(&lyric_link).next() else {
                let label = row_label(first_cell);
                info!("song \"{}\" does not have lyrics", label);
                listing.skipped.push(label);
                continue;
            };

            let name = element_text(anchor);
            let href = anchor
                .value()
                .attr("href")
                .map(str::trim)
                .filter(|href| !href.is_empty());
            match href {
                Some(href) if !name.is_empty() => {
                    listing.entries.push(LinkEntry::new(name, href));
                }
                _ => {
                    let label = if name.is_empty() {
                        row_label(first_cell)
                    } else {
                        name
                    };
                    warn!(row = %label, "Song row has no usable link, skipping");
                    listing.skipped.push(label);
                }
            }
        }

        Ok(listing)
    }

    fn extract_lyric_text(&self, song_page: &str) -> Result<String, ExtractionError> {
        let document = Html::parse_document(song_page);
        let lyrics = document
            .select(&selector("pre#lyric-body-text")?)
            .next()
            .map(|pre| pre.text().collect::<String>())
            .ok_or(ExtractionError::MissingElement {
                page: "song",
                selector: "pre#lyric-body-text",
            })?;
        Ok(lyrics)
    }
}
