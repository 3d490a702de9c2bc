// ==========================================
// 水果贸易看板数据校验系统 - 包装销售数据表
// ==========================================
// 来源模块: data/packaging_usage.json
// 口径: 2025 年结算台账按 (收货方, 包装码) 逐条列示的销量
// ==========================================
// 字段可能缺失（上游表格空单元格），缺失以 null 表示，
// 校验层按"已填充记录占比"而非逐条强制处理。
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// PackagingRecord - 包装销售记录
// ==========================================

/// 单条包装销售记录
///
/// 不变式: 各数量字段 >= 0；
/// weight_g、units_per_carton、kg_per_carton 三者齐备时
/// |kg_per_carton − weight_g × units_per_carton / 1000| <= 容差
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingRecord {
    pub recipient: String,              // 收货方（结算口径全名）
    pub package_code: String,           // 包装码
    #[serde(default)]
    pub fruit: Option<String>,          // 水果品类（部分行缺失）
    #[serde(default)]
    pub week: Option<u32>,              // 结算周（0 = 年初未分配周）
    #[serde(default)]
    pub weight_g: Option<f64>,          // 单件重量（克）
    #[serde(default)]
    pub units_per_carton: Option<u32>,  // 每箱件数
    #[serde(default)]
    pub kg_per_carton: Option<f64>,     // 每箱公斤数（表内预存的派生值）
    pub cartons: f64,                   // 纸箱数
    pub units: f64,                     // 件数
    pub volume_kg: f64,                 // 销量（公斤）
}

impl PackagingRecord {
    /// 按 weight_g × units_per_carton / 1000 重算每箱公斤数
    ///
    /// 任一输入缺失时返回 None。
    pub fn recomputed_kgpk(&self) -> Option<f64> {
        let weight = self.weight_g?;
        let units = self.units_per_carton?;
        Some(weight * f64::from(units) / 1000.0)
    }
}

// ==========================================
// PackagingTable - 包装销售数据表
// ==========================================

/// 包装销售数据表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingTable {
    pub year: i32, // 台账年份
    pub records: Vec<PackagingRecord>,
}

impl PackagingTable {
    /// 出现过的收货方集合
    pub fn recipients(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.recipient.as_str()).collect()
    }

    /// 出现过的水果品类集合（缺失行忽略）
    pub fn fruits(&self) -> BTreeSet<&str> {
        self.records
            .iter()
            .filter_map(|r| r.fruit.as_deref())
            .collect()
    }

    /// 全表销量合计（公斤）
    pub fn total_volume_kg(&self) -> f64 {
        self.records.iter().map(|r| r.volume_kg).sum()
    }

    /// 指定收货方清单的记录迭代器
    ///
    /// 一个计划客户可能对应多个结算收货方（国内/国外主体等），
    /// 因此按清单聚合。
    pub fn records_of_recipients<'a>(
        &'a self,
        recipients: &'a [String],
    ) -> impl Iterator<Item = &'a PackagingRecord> {
        self.records
            .iter()
            .filter(move |r| recipients.iter().any(|name| name == &r.recipient))
    }

    /// 指定收货方清单的销量合计（公斤）
    pub fn volume_of_recipients(&self, recipients: &[String]) -> f64 {
        self.records_of_recipients(recipients)
            .map(|r| r.volume_kg)
            .sum()
    }
}
