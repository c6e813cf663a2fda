//! 分析配置

use crate::algorithm::DEFAULT_INFLUENCE_THRESHOLD;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 分析器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// 影响力阈值：度严格大于该值的顶点视为高影响力
    pub influence_threshold: usize,
    /// 使用 rayon 并行计算直径
    pub parallel_diameter: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            influence_threshold: DEFAULT_INFLUENCE_THRESHOLD,
            parallel_diameter: false,
        }
    }
}

impl AnalyzerConfig {
    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::ConfigError(e.to_string()))
    }

    pub fn with_influence_threshold(mut self, threshold: usize) -> Self {
        self.influence_threshold = threshold;
        self
    }

    pub fn with_parallel_diameter(mut self, parallel: bool) -> Self {
        self.parallel_diameter = parallel;
        self
    }
}
