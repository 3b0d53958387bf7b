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

use anyhow::anyhow;
use clap::Parser;
use lyricrawl::application::use_cases::crawl_artist::CrawlArtistUseCase;
use lyricrawl::config::settings::Settings;
use lyricrawl::domain::models::crawl::CrawlTarget;
use lyricrawl::infrastructure::observability::metrics::describe_metrics;
use lyricrawl::infrastructure::sites::Site;
use lyricrawl::utils::errors::CrawlError;
use lyricrawl::utils::telemetry;
use std::path::PathBuf;
use tracing::{error, info};

/// Crawl every album and song lyric of one artist into text files
#[derive(Parser, Debug)]
#[command(name = "lyricrawl", version, about)]
struct Cli {
    /// Artist identifier as used in the site's artist URL
    #[arg(short, long)]
    artist: Option<String>,

    /// Lyrics site to crawl
    #[arg(short, long, value_enum, default_value_t = Site::LyricsCom)]
    site: Site,

    /// Output root; defaults to <crawl.data_dir>/<artist>
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum number of requests in flight
    #[arg(short, long)]
    concurrency: Option<usize>,

    /// Emit logs as JSON
    #[arg(long, env = "LYRICRAWL_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_telemetry(cli.json_logs);
    describe_metrics();
    info!("Starting lyricrawl...");

    let mut settings = Settings::new()?;
    if let Some(concurrency) = cli.concurrency {
        settings.crawl.max_concurrent_requests = concurrency;
    }
    info!("Configuration loaded");

    let artist = cli
        .artist
        .unwrap_or_else(|| settings.crawl.default_artist.clone());
    let target = match cli.output {
        Some(output) => CrawlTarget::new(artist, output),
        None => CrawlTarget::with_data_dir(artist, &settings.crawl.data_dir),
    };

    let use_case = CrawlArtistUseCase::new(settings);
    match use_case.execute(cli.site, &target).await {
        Ok(report) => {
            info!(
                written = report.written.len(),
                skipped = report.skipped,
                "Crawl completed"
            );
            Ok(())
        }
        Err(CrawlError::Incomplete(report)) => {
            for failure in &report.failures {
                error!(subject = %failure.subject, "Failed: {}", failure.error);
            }
            Err(anyhow!(
                "{} of the crawl failed, {} files written",
                pluralize(report.failures.len()),
                report.written.len()
            ))
        }
        Err(e) => Err(e.into()),
    }
}

fn pluralize(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{} tasks", count)
    }
}
