// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// - 领域模型（models）：爬取目标、链接列表与爬取报告
/// - 仓库接口（repositories）：歌词写出的抽象
/// - 服务（services）：艺人、专辑、歌曲三级爬取
/// - 站点（sites）：站点后端接口
pub mod models;
pub mod repositories;
pub mod services;
pub mod sites;
