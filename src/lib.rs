// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 组装一次完整的艺人爬取
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含爬取目标、报告、站点后端接口和爬取服务
pub mod domain;

/// 引擎模块
///
/// 基于连接池的页面获取
pub mod engines;

/// 基础设施模块
///
/// 站点后端实现、文件存储与指标
pub mod infrastructure;

/// 工具模块
///
/// 错误类型、重试策略、并发闸门和日志初始化
pub mod utils;
