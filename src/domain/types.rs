// ==========================================
// 水果贸易看板数据校验系统 - 领域类型定义
// ==========================================
// 序列化格式与 JSON 数据模块保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订购主体类型 (Subject Kind)
// ==========================================
// 销售计划记录的归属: 客户需求 或 产地供给
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Customer, // 客户（需求侧）
    Producer, // 产地（供给侧）
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectKind::Customer => write!(f, "customer"),
            SubjectKind::Producer => write!(f, "producer"),
        }
    }
}

// ==========================================
// 纸箱规格档位 (Size Class)
// ==========================================
// 回退映射的粒度: 每个客户组只区分大小两档
// 序列化格式: SCREAMING_SNAKE_CASE (与数据模块一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SizeClass {
    Small, // 小箱
    Large, // 大箱
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeClass::Small => write!(f, "SMALL"),
            SizeClass::Large => write!(f, "LARGE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_kind_serde_roundtrip() {
        let json = serde_json::to_string(&SubjectKind::Customer).unwrap();
        assert_eq!(json, "\"customer\"");
        let back: SubjectKind = serde_json::from_str("\"producer\"").unwrap();
        assert_eq!(back, SubjectKind::Producer);
    }

    #[test]
    fn test_size_class_serde_format() {
        let json = serde_json::to_string(&SizeClass::Large).unwrap();
        assert_eq!(json, "\"LARGE\"");
        let back: SizeClass = serde_json::from_str("\"SMALL\"").unwrap();
        assert_eq!(back, SizeClass::Small);
    }
}
