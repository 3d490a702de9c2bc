// ==========================================
// 水果贸易看板数据校验系统 - 纸箱供应商数据表
// ==========================================
// 来源模块: data/suppliers.json
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// SupplierRecord - 供应商记录
// ==========================================

/// 单个纸箱供应商
///
/// 不变式: id 全表唯一
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRecord {
    pub id: String,           // 供应商标识（大写短码）
    pub name: String,         // 注册全名
    pub abbreviation: String, // 看板展示用简称
    pub country: String,      // 国别
    pub active: bool,         // 在用标记
}

// ==========================================
// SupplierTable - 供应商数据表
// ==========================================

/// 纸箱供应商数据表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierTable {
    pub suppliers: Vec<SupplierRecord>,
}

impl SupplierTable {
    /// 按 id 查找供应商
    pub fn find(&self, id: &str) -> Option<&SupplierRecord> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    /// 出现重复的供应商 id 清单
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut dups = Vec::new();
        for s in &self.suppliers {
            if !seen.insert(s.id.as_str()) {
                dups.push(s.id.as_str());
            }
        }
        dups
    }

    /// 指定国别的供应商数量
    pub fn count_from(&self, country: &str) -> usize {
        self.suppliers.iter().filter(|s| s.country == country).count()
    }
}
