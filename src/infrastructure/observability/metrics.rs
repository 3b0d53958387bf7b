// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram, Unit};

pub const PAGES_FETCHED_TOTAL: &str = "lyricrawl_pages_fetched_total";
pub const FETCH_RETRIES_TOTAL: &str = "lyricrawl_fetch_retries_total";
pub const FETCH_DURATION_SECONDS: &str = "lyricrawl_fetch_duration_seconds";
pub const SONGS_WRITTEN_TOTAL: &str = "lyricrawl_songs_written_total";
pub const ROWS_SKIPPED_TOTAL: &str = "lyricrawl_rows_skipped_total";
pub const CRAWL_FAILURES_TOTAL: &str = "lyricrawl_failures_total";

/// All metric names, in registration order
pub const METRIC_NAMES: [&str; 6] = [
    PAGES_FETCHED_TOTAL,
    FETCH_RETRIES_TOTAL,
    FETCH_DURATION_SECONDS,
    SONGS_WRITTEN_TOTAL,
    ROWS_SKIPPED_TOTAL,
    CRAWL_FAILURES_TOTAL,
];

/// 注册指标描述
///
/// 命令行程序不安装 recorder，所有指标操作都是空操作，运行结果以结束时
/// 日志中的 `CrawlReport` 汇总为准。指标只对把本库嵌入、并自行安装
/// recorder（例如 Prometheus 导出器）的应用程序有意义。
pub fn describe_metrics() {
    describe_counter!(PAGES_FETCHED_TOTAL, "Total number of pages fetched successfully");
    describe_counter!(
        FETCH_RETRIES_TOTAL,
        "Total number of backoff sleeps after a connection reset"
    );
    describe_histogram!(
        FETCH_DURATION_SECONDS,
        Unit::Seconds,
        "Duration of a single page fetch in seconds"
    );
    describe_counter!(SONGS_WRITTEN_TOTAL, "Total number of lyric files written");
    describe_counter!(
        ROWS_SKIPPED_TOTAL,
        "Total number of listing rows skipped for lack of a link"
    );
    describe_counter!(
        CRAWL_FAILURES_TOTAL,
        "Total number of failed song or album tasks"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::{Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString};
    use std::sync::Mutex;

    #[derive(Default)]
    struct DescriptionRecorder {
        described: Mutex<Vec<String>>,
    }

    impl DescriptionRecorder {
        fn push(&self, key: KeyName) {
            self.described.lock().unwrap().push(key.as_str().to_string());
        }
    }

    impl Recorder for DescriptionRecorder {
        fn describe_counter(&self, key: KeyName, _: Option<Unit>, _: SharedString) {
            self.push(key);
        }

        fn describe_gauge(&self, key: KeyName, _: Option<Unit>, _: SharedString) {
            self.push(key);
        }

        fn describe_histogram(&self, key: KeyName, _: Option<Unit>, _: SharedString) {
            self.push(key);
        }

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, _: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::noop()
        }
    }

    #[test]
    fn test_describe_metrics_covers_every_name() {
        let recorder = DescriptionRecorder::default();

        metrics::with_local_recorder(&recorder, describe_metrics);

        let described = recorder.described.lock().unwrap().clone();
        assert_eq!(described, METRIC_NAMES.map(String::from).to_vec());
    }

    #[test]
    fn test_metrics_without_recorder_are_noops() {
        describe_metrics();
        metrics::counter!(SONGS_WRITTEN_TOTAL).increment(1);
    }
}
