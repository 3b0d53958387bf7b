// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::RetrySettings;
use crate::engines::traits::FetchError;
use crate::infrastructure::observability::metrics::FETCH_RETRIES_TOTAL;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// 重试策略配置
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大重试次数
    pub max_retries: u32,
    /// 初始退避时间
    pub initial_backoff: Duration,
    /// 最大退避时间
    pub max_backoff: Duration,
    /// 退避乘数
    pub backoff_multiplier: f64,
    /// 抖动因子 (0.0-1.0)
    pub jitter_factor: f64,
    /// 是否启用指数退避
    pub exponential_backoff: bool,
    /// 是否启用抖动
    pub enable_jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(80),
            backoff_multiplier: 2.0,
            jitter_factor: 0.1,
            exponential_backoff: true,
            enable_jitter: true,
        }
    }
}

/// 把抖动因子限制在 0.0..=1.0，NaN 视为不抖动
fn clamp_jitter(factor: f64) -> f64 {
    if factor.is_nan() {
        0.0
    } else {
        factor.clamp(0.0, 1.0)
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        let jitter_factor = clamp_jitter(settings.jitter_factor);
        Self {
            max_retries: settings.max_retries,
            initial_backoff: Duration::from_millis(settings.initial_backoff_ms),
            max_backoff: Duration::from_millis(settings.max_backoff_ms),
            backoff_multiplier: settings.backoff_multiplier,
            jitter_factor,
            exponential_backoff: settings.backoff_multiplier > 1.0,
            enable_jitter: jitter_factor > 0.0,
        }
    }
}

impl RetryPolicy {
    /// 创建固定间隔的重试策略（无指数增长、无抖动）
    pub fn fixed(delay: Duration, max_retries: u32) -> Self {
        Self {
            max_retries,
            initial_backoff: delay,
            max_backoff: delay,
            backoff_multiplier: 1.0,
            jitter_factor: 0.0,
            exponential_backoff: false,
            enable_jitter: false,
        }
    }

    /// 计算第 `attempt` 次重试（从1开始）前的退避时间
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        if !self.exponential_backoff {
            return self.initial_backoff;
        }

        // 计算指数退避
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let backoff_secs =
            self.initial_backoff.as_secs_f64() * self.backoff_multiplier.powi(exponent);

        // 限制最大退避时间
        let capped_backoff = backoff_secs.min(self.max_backoff.as_secs_f64());

        // 添加抖动
        let final_backoff = if self.enable_jitter {
            let jitter_range = capped_backoff * clamp_jitter(self.jitter_factor);
            if jitter_range > 0.0 {
                let jitter = rand::random_range(-jitter_range..jitter_range);
                (capped_backoff + jitter).max(0.0)
            } else {
                capped_backoff
            }
        } else {
            capped_backoff
        };

        Duration::from_secs_f64(final_backoff)
    }

    /// 已经重试 `retries` 次后是否还应该重试
    pub fn should_retry(&self, retries: u32) -> bool {
        retries < self.max_retries
    }
}

/// 单次请求的重试状态，不在请求之间共享
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RetryState {
    /// 已发起的尝试次数
    pub attempts: u32,
    /// 已执行的退避次数
    pub retries: u32,
    /// 累计退避时间
    pub total_backoff: Duration,
}

/// 按策略执行操作，遇到瞬时错误时退避后重试
///
/// 非瞬时错误立即返回；重试次数耗尽后返回 `FetchError::RetryExhausted`
pub async fn retry_transient<T, F, Fut>(
    policy: &RetryPolicy,
    url: &str,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut state = RetryState::default();

    loop {
        state.attempts += 1;
        match operation().await {
            Ok(value) => {
                if state.retries > 0 {
                    debug!(
                        url,
                        attempts = state.attempts,
                        backoff_ms = state.total_backoff.as_millis() as u64,
                        "Fetch recovered after retrying"
                    );
                }
                return Ok(value);
            }
            Err(e) if e.is_transient() => {
                if !policy.should_retry(state.retries) {
                    warn!(url, attempts = state.attempts, "Retry budget exhausted: {}", e);
                    return Err(FetchError::RetryExhausted {
                        url: url.to_string(),
                        attempts: state.attempts,
                    });
                }

                state.retries += 1;
                let delay = policy.calculate_backoff(state.retries);
                state.total_backoff += delay;
                warn!(
                    url,
                    attempt = state.attempts,
                    delay_ms = delay.as_millis() as u64,
                    "Connection reset, backing off"
                );
                metrics::counter!(FETCH_RETRIES_TOTAL).increment(1);
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// 判断错误链中是否存在连接重置
pub fn is_connection_reset(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(io_error) = err.downcast_ref::<std::io::Error>() {
            if io_error.kind() == std::io::ErrorKind::ConnectionReset {
                return true;
            }
        }
        if err.to_string().to_lowercase().contains("connection reset") {
            return true;
        }
        current = err.source();
    }
    false
}
