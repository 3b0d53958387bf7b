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
use crate::engines::traits::{FetchError, PageFetcher};
use crate::infrastructure::observability::metrics::{FETCH_DURATION_SECONDS, PAGES_FETCHED_TOTAL};
use crate::utils::retry_policy::{retry_transient, RetryPolicy};
use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; lyricrawl/0.1)";

/// 抓取引擎
///
/// 基于reqwest实现的HTTP页面获取器。内部的 `reqwest::Client` 即整个爬取过程
/// 共享的连接池，克隆本结构只会增加对同一连接池的引用。
#[derive(Clone, Debug)]
pub struct ReqwestEngine {
    client: reqwest::Client,
    retry_policy: RetryPolicy,
}

impl ReqwestEngine {
    /// 创建新的引擎实例
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的 User-Agent
    /// * `pool_max_idle_per_host` - 每个主机保留的最大空闲连接数
    /// * `retry_policy` - 连接重置时的重试策略
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 引擎实例
    /// * `Err(FetchError)` - 客户端构建失败
    pub fn new(
        user_agent: &str,
        pool_max_idle_per_host: usize,
        retry_policy: RetryPolicy,
    ) -> Result<Self, FetchError> {
        // No request timeout here; the transport defaults apply
        let client = reqwest::Client::builder()
            .user_agent(if user_agent.trim().is_empty() {
                DEFAULT_USER_AGENT
            } else {
                user_agent
            })
            .pool_max_idle_per_host(pool_max_idle_per_host)
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self::with_client(client, retry_policy))
    }

    /// 根据配置创建引擎实例
    pub fn from_settings(settings: &Settings) -> Result<Self, FetchError> {
        Self::new(
            &settings.site.user_agent,
            settings.http.pool_max_idle_per_host,
            RetryPolicy::from(&settings.retry),
        )
    }

    /// 使用已有的客户端（连接池）创建引擎实例
    pub fn with_client(client: reqwest::Client, retry_policy: RetryPolicy) -> Self {
        Self {
            client,
            retry_policy,
        }
    }

    /// 发起一次请求并读取完整的响应正文
    async fn fetch_once(&self, url: &str) -> Result<String, FetchError> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(FetchError::classify)?;

        metrics::counter!(PAGES_FETCHED_TOTAL).increment(1);
        metrics::histogram!(FETCH_DURATION_SECONDS).record(start.elapsed().as_secs_f64());
        debug!(
            url,
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched page"
        );

        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    /// 获取页面
    ///
    /// 连接重置时按重试策略退避后重新发起同一请求，其余错误直接返回
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", url, e)))?;
        retry_transient(&self.retry_policy, url, || self.fetch_once(url)).await
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
