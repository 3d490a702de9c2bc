// ==========================================
// 水果贸易看板数据校验系统 - 纸箱映射数据表
// ==========================================
// 来源模块: data/carton_map.json
// 口径: (客户组, 包装码) → 物理纸箱索引；
//       精确映射缺失时落到按客户组的规格档位回退
// ==========================================

use crate::domain::types::SizeClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 精确映射键的分隔符，键形如 "OGL||P-125x12"
pub const KEY_SEPARATOR: &str = "||";

/// 物理纸箱索引的统一前缀
pub const CARTON_INDEX_PREFIX: &str = "K-";

// ==========================================
// SizeFallback - 规格档位回退
// ==========================================

/// 单个客户组的规格档位回退映射
///
/// 两档必须齐备，否则新包装码会落空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeFallback {
    #[serde(rename = "SMALL")]
    pub small: Option<String>, // 小箱回退索引
    #[serde(rename = "LARGE")]
    pub large: Option<String>, // 大箱回退索引
}

impl SizeFallback {
    /// 取指定档位的回退索引
    pub fn get(&self, size: SizeClass) -> Option<&str> {
        match size {
            SizeClass::Small => self.small.as_deref(),
            SizeClass::Large => self.large.as_deref(),
        }
    }
}

// ==========================================
// CartonMapTable - 纸箱映射数据表
// ==========================================

/// 纸箱映射数据表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartonMapTable {
    pub map: BTreeMap<String, String>,           // "组||包装码" → 纸箱索引
    pub fallback: BTreeMap<String, SizeFallback>, // 客户组 → 档位回退
}

impl CartonMapTable {
    /// 组装精确映射键
    pub fn key(group: &str, package_code: &str) -> String {
        format!("{}{}{}", group, KEY_SEPARATOR, package_code)
    }

    /// 解析 (客户组, 包装码, 档位) 到纸箱索引
    ///
    /// 先查精确映射，缺失时落到客户组回退；两者皆无返回 None。
    pub fn resolve(&self, group: &str, package_code: &str, size: SizeClass) -> Option<&str> {
        if let Some(index) = self.map.get(&Self::key(group, package_code)) {
            return Some(index.as_str());
        }
        self.fallback.get(group).and_then(|fb| fb.get(size))
    }
}
