// ==========================================
// 水果贸易看板数据校验系统 - 纸箱采购计划数据表
// ==========================================
// 来源模块: data/carton_plan.json
// 口径: 2026 年纸箱采购计划，按 (客户, 水果) 行展开到包装构成
// ==========================================

use crate::domain::types::SizeClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// PackageBreakdown - 包装构成明细
// ==========================================

/// 一行采购计划内单个包装码的构成份额
///
/// 不变式: share_pct ∈ [0,100]，行内份额合计 ≈ 100%
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageBreakdown {
    pub package_code: String,  // 包装码
    pub share_pct: f64,        // 份额（百分比）
    pub kgpk: f64,             // 每箱公斤数
    pub size_class: SizeClass, // 规格档位（回退映射用）
}

// ==========================================
// CartonDemandRow - 纸箱需求行
// ==========================================

/// 一行纸箱需求: (客户, 客户组, 水果) 与其包装构成
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartonDemandRow {
    pub client: String,            // 计划客户名
    pub group: String,             // 客户组（纸箱映射的键）
    pub fruit: String,             // 水果品类
    pub kg_plan: f64,              // 2026 计划量（公斤）
    #[serde(default)]
    pub avg_kgpk: Option<f64>,     // 平均每箱公斤数（部分新客户缺失）
    #[serde(default)]
    pub ratio: Option<f64>,        // 计划量 / 上年实绩 比值（上年无实绩时缺失）
    pub packages: Vec<PackageBreakdown>,
}

impl CartonDemandRow {
    /// 行内包装份额合计（百分比）
    pub fn share_sum(&self) -> f64 {
        self.packages.iter().map(|p| p.share_pct).sum()
    }
}

// ==========================================
// PlanTotals - 计划合计
// ==========================================

/// 采购计划全表合计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTotals {
    pub cartons_prev: f64, // 上年纸箱实绩（箱）
    pub cartons_plan: f64, // 2026 计划纸箱量（箱）
    pub kg_plan: f64,      // 2026 计划销量（公斤）
}

// ==========================================
// CartonPlanTable - 纸箱采购计划数据表
// ==========================================

/// 纸箱采购计划数据表
///
/// `client_map` 把计划客户名映射到结算台账里的收货方全名清单，
/// 是计划侧与实绩侧做关联的唯一通道。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartonPlanTable {
    pub rows: Vec<CartonDemandRow>,
    pub totals: PlanTotals,
    pub group_totals: BTreeMap<String, PlanTotals>,    // 按客户组合计
    pub client_map: BTreeMap<String, Vec<String>>,     // 计划客户 → 结算收货方
}

impl CartonPlanTable {
    /// 指定客户的行
    pub fn rows_of_client<'a>(&'a self, client: &'a str) -> impl Iterator<Item = &'a CartonDemandRow> {
        self.rows.iter().filter(move |r| r.client == client)
    }

    /// 全表展开后的 (客户组, 包装码, 规格档位) 三元组清单
    ///
    /// 纸箱映射覆盖率检查的输入。
    pub fn package_keys(&self) -> Vec<(&str, &str, SizeClass)> {
        self.rows
            .iter()
            .flat_map(|row| {
                row.packages
                    .iter()
                    .map(move |p| (row.group.as_str(), p.package_code.as_str(), p.size_class))
            })
            .collect()
    }

    /// 全表出现过的水果品类集合
    pub fn fruits(&self) -> std::collections::BTreeSet<&str> {
        self.rows.iter().map(|r| r.fruit.as_str()).collect()
    }
}
