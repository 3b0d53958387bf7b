// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 站点领域模块
///
/// 定义歌词站点后端接口以及页面解析错误
pub mod backend;
