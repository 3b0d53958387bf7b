// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 把配置、引擎、站点后端与存储组装成完整的爬取流程
pub mod use_cases;
