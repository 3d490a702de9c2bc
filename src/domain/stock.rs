// ==========================================
// 水果贸易看板数据校验系统 - 库存数据表
// ==========================================
// 来源模块: data/stock.json
// 口径: 包材库存（纸箱/标签/单元包装）按仓库逐条列示
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// StockRecord - 库存记录
// ==========================================

/// 单条库存记录
///
/// 不变式: quantity >= 0, value >= 0, warehouse 属于已知仓库清单
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRecord {
    pub warehouse: String,  // 仓库名
    pub item_index: String, // 物料索引（纸箱索引以 K- 开头）
    pub group: String,      // 物料组
    pub quantity: f64,      // 在库数量
    pub value: f64,         // 金额
}

// ==========================================
// StockTable - 库存数据表
// ==========================================

/// 库存数据表
///
/// `warehouses` 与 `groups` 是模块自带的权威清单，
/// 逐条记录的外键引用须能在其中解析。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockTable {
    pub warehouses: Vec<String>, // 权威仓库清单
    pub groups: Vec<String>,     // 权威物料组清单
    pub records: Vec<StockRecord>,
}

impl StockTable {
    /// 仓库清单的集合形式（去重、有序）
    pub fn warehouse_set(&self) -> BTreeSet<&str> {
        self.warehouses.iter().map(String::as_str).collect()
    }

    /// 全表金额合计
    pub fn total_value(&self) -> f64 {
        self.records.iter().map(|r| r.value).sum()
    }

    /// 指定物料索引的跨仓库在库数量合计
    pub fn total_quantity_of(&self, item_index: &str) -> f64 {
        self.records
            .iter()
            .filter(|r| r.item_index == item_index)
            .map(|r| r.quantity)
            .sum()
    }

    /// 指定物料组的记录条数
    pub fn count_in_group(&self, group: &str) -> usize {
        self.records.iter().filter(|r| r.group == group).count()
    }
}
