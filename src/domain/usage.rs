// ==========================================
// 水果贸易看板数据校验系统 - 包材消耗数据表
// ==========================================
// 来源模块: data/material_usage.json
// 口径: 2025 年包材（标签/纸箱）按月、按仓库的历史消耗
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// UsageRecord - 消耗记录
// ==========================================

/// 单条包材消耗记录
///
/// 不变式: quantity > 0, month ∈ [1,12]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    pub material_type: String, // 物料类型（含标签/纸箱字样的族名）
    pub warehouse: String,     // 发料仓库
    pub month: u32,            // 消耗月份
    pub quantity: f64,         // 消耗数量
}

// ==========================================
// UsageTable - 消耗数据表
// ==========================================

/// 包材消耗数据表
///
/// `warehouses` 可以比库存表多出临时仓库，
/// 但必须涵盖库存表的主仓库（容差一个）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageTable {
    pub warehouses: Vec<String>,
    pub records: Vec<UsageRecord>,
}

impl UsageTable {
    /// 仓库清单的集合形式
    pub fn warehouse_set(&self) -> BTreeSet<&str> {
        self.warehouses.iter().map(String::as_str).collect()
    }

    /// 出现过的物料类型集合
    pub fn material_types(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.material_type.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_types_deduplicated() {
        let table = UsageTable {
            warehouses: vec!["Chodziez".into()],
            records: vec![
                UsageRecord {
                    material_type: "Label roll".into(),
                    warehouse: "Chodziez".into(),
                    month: 6,
                    quantity: 1000.0,
                },
                UsageRecord {
                    material_type: "Label roll".into(),
                    warehouse: "Chodziez".into(),
                    month: 7,
                    quantity: 900.0,
                },
            ],
        };
        assert_eq!(table.material_types().len(), 1);
    }
}
