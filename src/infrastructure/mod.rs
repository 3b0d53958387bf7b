// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// - 可观测性（observability）：指标名称与描述
/// - 站点（sites）：站点后端实现与工厂
/// - 存储（storage）：本地文件与内存存储
pub mod observability;
pub mod sites;
pub mod storage;
