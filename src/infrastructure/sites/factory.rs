// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::SiteSettings;
use crate::domain::sites::backend::SiteBackend;
use crate::infrastructure::sites::lyrics_com::LyricsComBackend;
use crate::utils::errors::CrawlError;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// 站点类型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Site {
    /// lyrics.com
    #[default]
    #[value(name = "lyrics.com")]
    LyricsCom,
}

impl Site {
    /// 获取站点名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::LyricsCom => "lyrics.com",
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 根据站点类型和配置创建站点后端
pub fn create_site_backend(
    site: Site,
    settings: &SiteSettings,
) -> Result<Arc<dyn SiteBackend>, CrawlError> {
    match site {
        Site::LyricsCom => {
            let backend = LyricsComBackend::new(&settings.base_url).map_err(|e| {
                CrawlError::Config(format!("invalid site.base_url `{}`: {}", settings.base_url, e))
            })?;
            info!("Using site backend {} at {}", site, backend.base_url());
            Ok(Arc::new(backend))
        }
    }
}
