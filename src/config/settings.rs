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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含站点、HTTP连接池、爬取并发和重试策略等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 站点配置
    pub site: SiteSettings,
    /// HTTP客户端配置
    pub http: HttpSettings,
    /// 爬取配置
    pub crawl: CrawlSettings,
    /// 重试配置
    pub retry: RetrySettings,
}

/// 站点配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// 站点根地址
    pub base_url: String,
    /// 请求使用的 User-Agent，为空时使用内置值
    pub user_agent: String,
}

/// HTTP客户端配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpSettings {
    /// 每个主机保留的最大空闲连接数
    pub pool_max_idle_per_host: usize,
}

/// 爬取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 未指定 `--artist` 时使用的艺人
    pub default_artist: String,
    /// 未指定 `--output` 时输出到 `<data_dir>/<artist>`
    pub data_dir: String,
    /// 同时进行的最大请求数
    pub max_concurrent_requests: usize,
}

/// 重试配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// 最大重试次数
    pub max_retries: u32,
    /// 初始退避时间（毫秒）
    pub initial_backoff_ms: u64,
    /// 最大退避时间（毫秒）
    pub max_backoff_ms: u64,
    /// 退避乘数，不大于1时为固定间隔
    pub backoff_multiplier: f64,
    /// 抖动因子 (0.0-1.0)
    pub jitter_factor: f64,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/<APP_ENVIRONMENT>`
    /// 以及 `LYRICRAWL__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Default site settings
            .set_default("site.base_url", "http://lyrics.com")?
            .set_default("site.user_agent", "")?
            // Default HTTP pool settings
            .set_default("http.pool_max_idle_per_host", 32)?
            // Default crawl settings
            .set_default("crawl.default_artist", "The-Sisters-Of-Mercy")?
            .set_default("crawl.data_dir", "data")?
            .set_default("crawl.max_concurrent_requests", 16)?
            // Default retry settings
            .set_default("retry.max_retries", 5)?
            .set_default("retry.initial_backoff_ms", 5000)?
            .set_default("retry.max_backoff_ms", 80000)?
            .set_default("retry.backoff_multiplier", 2.0)?
            .set_default("retry.jitter_factor", 0.1)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("LYRICRAWL")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
