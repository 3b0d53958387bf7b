// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use lyricrawl::config::settings::Settings;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 指向模拟服务器、重试间隔极短的配置
pub fn test_settings(base_url: &str) -> Settings {
    let mut settings = Settings::new().expect("default configuration should load");
    settings.site.base_url = base_url.to_string();
    settings.crawl.max_concurrent_requests = 4;
    settings.retry.max_retries = 2;
    settings.retry.initial_backoff_ms = 10;
    settings.retry.max_backoff_ms = 20;
    settings.retry.jitter_factor = 0.0;
    settings
}

pub fn artist_page(albums: &[(&str, &str)]) -> String {
    let rows: String = albums
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<div class="clearfix"><h3 class="artist-album-label"><a href="{}">{}</a></h3></div>"#,
                href, name
            )
        })
        .collect();
    format!(
        r#"<html><body><div id="content-body"><div class="tdata-ext">{}</div></div></body></html>"#,
        rows
    )
}

pub fn album_page(songs: &[(&str, &str)]) -> String {
    let rows: String = songs
        .iter()
        .map(|(name, href)| {
            format!(
                r#"<tr><td><strong><a href="{}">{}</a></strong></td><td>3:00</td></tr>"#,
                href, name
            )
        })
        .collect();
    format!(
        "<html><body><table><tbody>{}</tbody></table></body></html>",
        rows
    )
}

pub fn song_page(lyrics: &str) -> String {
    format!(
        r#"<html><body><pre id="lyric-body-text" class="lyric-body">{}</pre></body></html>"#,
        lyrics
    )
}

pub async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
