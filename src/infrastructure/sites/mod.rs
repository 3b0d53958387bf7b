// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 站点后端模块
///
/// 歌词站点的页面解析与URL构造实现，目前只支持 lyrics.com
pub mod factory;
pub mod lyrics_com;

pub use factory::{create_site_backend, Site};
pub use lyrics_com::LyricsComBackend;
