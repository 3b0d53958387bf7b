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

use crate::utils::retry_policy::is_connection_reset;
use async_trait::async_trait;
use thiserror::Error;

/// 页面获取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 连接被重置（可重试）
    #[error("Connection reset: {0}")]
    ConnectionReset(String),
    /// 请求失败
    #[error("Request failed: {0}")]
    Request(reqwest::Error),
    /// 非成功的HTTP状态码
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },
    /// 无效的URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    /// 重试次数耗尽
    #[error("Gave up on {url} after {attempts} attempts")]
    RetryExhausted { url: String, attempts: u32 },
    /// 并发闸门已关闭
    #[error("Request gate closed")]
    GateClosed,
}

impl FetchError {
    /// 将 reqwest 错误归类：连接重置归为可重试，其余原样保留
    pub fn classify(error: reqwest::Error) -> Self {
        if is_connection_reset(&error) {
            FetchError::ConnectionReset(error.to_string())
        } else {
            FetchError::Request(error)
        }
    }

    /// 判断错误是否可重试
    ///
    /// 只有连接重置这一类瞬时错误会被重试
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::ConnectionReset(_))
    }
}

/// 页面获取特质
///
/// 实现方持有共享的连接池，所有并发任务通过同一个实例发起请求
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 获取页面并返回响应正文
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// 获取器名称
    fn name(&self) -> &'static str;
}
