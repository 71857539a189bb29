//! 编辑器配置
//!
//! JSON 格式，缺省字段使用默认值。

use serde::{Deserialize, Serialize};
use std::path::Path;
use svgcad_core::properties::Style;
use thiserror::Error;
use tracing::info;

/// 历史记录最大深度
pub const HISTORY_MAX_DEPTH: usize = 500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// 悬停高亮阈值（世界单位）
    pub hover_threshold: f64,
    /// 捕捉容差（世界单位）
    pub snap_tolerance: f64,
    pub history_max_depth: usize,
    pub default_fillet_radius: f64,
    pub ortho_mode: bool,
    pub snap_mode: bool,
    /// 新建图元的样式
    pub default_style: Style,
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            hover_threshold: 0.5,
            snap_tolerance: 0.5,
            history_max_depth: HISTORY_MAX_DEPTH,
            default_fillet_radius: 0.0,
            ortho_mode: false,
            snap_mode: false,
            default_style: Style::default(),
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;
        info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
