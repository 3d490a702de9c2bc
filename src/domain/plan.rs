// ==========================================
// 水果贸易看板数据校验系统 - 销售计划数据表
// ==========================================
// 来源模块: data/sales_plan.json
// 口径: 2026 年按周的销售计划，客户需求与产地供给两侧并列
// ==========================================

use crate::domain::types::SubjectKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// SalesPlanRecord - 销售计划记录
// ==========================================

/// 单条销售计划记录
///
/// 不变式: week ∈ [1,52], kg > 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPlanRecord {
    pub subject_kind: SubjectKind, // 记录归属: 客户 / 产地
    pub subject: String,           // 主体名（客户名或产地名）
    pub week: u32,                 // 计划周（ISO 周序号）
    pub fruit: String,             // 水果品类
    pub kg: f64,                   // 计划量（公斤）
}

// ==========================================
// SalesPlanTable - 销售计划数据表
// ==========================================

/// 销售计划数据表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPlanTable {
    pub records: Vec<SalesPlanRecord>,
}

impl SalesPlanTable {
    /// 指定归属侧的记录迭代器
    pub fn records_of(&self, kind: SubjectKind) -> impl Iterator<Item = &SalesPlanRecord> {
        self.records.iter().filter(move |r| r.subject_kind == kind)
    }

    /// 指定归属侧的计划量合计（公斤）
    pub fn total_kg(&self, kind: SubjectKind) -> f64 {
        self.records_of(kind).map(|r| r.kg).sum()
    }

    /// 指定客户的计划量合计（公斤）
    pub fn total_kg_of_subject(&self, kind: SubjectKind, subject: &str) -> f64 {
        self.records_of(kind)
            .filter(|r| r.subject == subject)
            .map(|r| r.kg)
            .sum()
    }

    /// 指定归属侧出现过的主体名集合
    pub fn subjects(&self, kind: SubjectKind) -> BTreeSet<&str> {
        self.records_of(kind).map(|r| r.subject.as_str()).collect()
    }

    /// 全表出现过的水果品类集合
    pub fn fruits(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.fruit.as_str()).collect()
    }

    /// 供给覆盖率: 产地供给合计 / 客户需求合计
    ///
    /// 客户需求为 0 时无法定义覆盖率，返回 None。
    pub fn coverage_ratio(&self) -> Option<f64> {
        let demand = self.total_kg(SubjectKind::Customer);
        if demand <= 0.0 {
            return None;
        }
        Some(self.total_kg(SubjectKind::Producer) / demand)
    }
}
