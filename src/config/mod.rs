// ==========================================
// 水果贸易看板数据校验系统 - 配置层
// ==========================================
// 职责: 汇总各套件的容差/阈值配置，支持文件覆盖
// ==========================================

pub mod thresholds;

pub use thresholds::{
    Band, CartonMapThresholds, PackagingThresholds, PlanThresholds, SiteThresholds,
    StockThresholds, SupplierThresholds, UsageThresholds,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ==========================================
// QaConfig - 校验配置
// ==========================================

/// 校验配置（全部套件的阈值合集）
///
/// 不给配置文件时使用默认值；给配置文件时允许只覆盖
/// 关心的字段，其余字段落回默认值。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    pub site: SiteThresholds,
    pub stock: StockThresholds,
    pub usage: UsageThresholds,
    pub plan: PlanThresholds,
    pub packaging: PackagingThresholds,
    pub suppliers: SupplierThresholds,
    pub carton_map: CartonMapThresholds,
}

impl QaConfig {
    /// 从 JSON 文件读取配置
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("配置文件读取失败: {}", path.display()))?;
        let config: QaConfig = serde_json::from_str(&source)
            .with_context(|| format!("配置文件解析失败: {}", path.display()))?;
        Ok(config)
    }

    /// 给了路径则读文件，否则使用默认配置
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                tracing::info!(config = %p.display(), "使用外部配置文件");
                Self::from_file(p)
            }
            None => Ok(Self::default()),
        }
    }
}
