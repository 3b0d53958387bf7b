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

use crate::engines::traits::FetchError;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// 请求并发闸门
///
/// 整个爬取过程共享一个信号量，限制同时进行中的HTTP请求数。
/// 许可只在单次请求期间持有，不跨越等待子任务的过程。
#[derive(Clone, Debug)]
pub struct RequestGate {
    /// 共享的信号量
    semaphore: Arc<Semaphore>,
    /// 许可总数
    permits: usize,
}

impl RequestGate {
    /// 创建一个新的RequestGate实例
    ///
    /// # 参数
    ///
    /// * `permits` - 同时进行的最大请求数，至少为1
    pub fn new(permits: usize) -> Self {
        let permits = permits.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(permits)),
            permits,
        }
    }

    /// 获取一个请求许可，许可在返回值被丢弃时归还
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, FetchError> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| FetchError::GateClosed)
    }

    /// 许可总数
    pub fn permits(&self) -> usize {
        self.permits
    }

    /// 当前可用的许可数
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
