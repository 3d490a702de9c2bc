// ==========================================
// 水果贸易看板数据校验系统 - 校验层
// ==========================================
// 职责: 组织全部一致性检查为命名套件
// ==========================================
// 每个套件独立门控自己依赖的数据表；
// 套件内每项检查独立通过/失败，互不阻断。
// ==========================================

pub mod crossfile;
pub mod documents;
pub mod inventory;
pub mod modules;
pub mod packaging;
pub mod plan;
pub mod suppliers;

use crate::config::QaConfig;
use crate::loader::{Dataset, SiteLoader};
use crate::report::Reporter;
use clap::ValueEnum;

// ==========================================
// CheckContext - 检查上下文
// ==========================================

/// 检查上下文: 站点加载器 + 已加载数据集 + 阈值配置
///
/// 全程只读，套件之间不共享任何可变状态。
pub struct CheckContext<'a> {
    pub loader: &'a SiteLoader,
    pub dataset: &'a Dataset,
    pub config: &'a QaConfig,
}

// ==========================================
// Suite - 检查套件
// ==========================================

/// 检查套件（命令行可按名选择，缺省全跑）
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Suite {
    /// 数据模块加载完整性
    Modules,
    /// 库存与包材消耗
    Inventory,
    /// 销售计划与采购计划
    Plan,
    /// 包装台账与派生字段
    Packaging,
    /// 供应商与纸箱映射
    Suppliers,
    /// 页面结构与链接完整性
    Documents,
    /// 跨表关联一致性
    Crossfile,
}

impl Suite {
    /// 全部套件的固定执行顺序
    pub const ALL: [Suite; 7] = [
        Suite::Modules,
        Suite::Inventory,
        Suite::Plan,
        Suite::Packaging,
        Suite::Suppliers,
        Suite::Documents,
        Suite::Crossfile,
    ];

    /// 套件标题（报告排版用）
    pub fn title(self) -> &'static str {
        match self {
            Suite::Modules => "数据模块完整性",
            Suite::Inventory => "库存与消耗",
            Suite::Plan => "计划一致性",
            Suite::Packaging => "包装台账",
            Suite::Suppliers => "供应商与纸箱映射",
            Suite::Documents => "页面与链接",
            Suite::Crossfile => "跨表关联",
        }
    }

    /// 执行套件
    pub fn run(self, ctx: &CheckContext<'_>, reporter: &mut Reporter) {
        reporter.begin_suite(self.title());
        match self {
            Suite::Modules => modules::run(ctx, reporter),
            Suite::Inventory => inventory::run(ctx, reporter),
            Suite::Plan => plan::run(ctx, reporter),
            Suite::Packaging => packaging::run(ctx, reporter),
            Suite::Suppliers => suppliers::run(ctx, reporter),
            Suite::Documents => documents::run(ctx, reporter),
            Suite::Crossfile => crossfile::run(ctx, reporter),
        }
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 违规样例预览: 只列前几条，避免刷屏
pub(crate) fn preview<I>(items: I, limit: usize) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut collected: Vec<String> = Vec::new();
    let mut truncated = false;
    for (i, item) in items.into_iter().enumerate() {
        if i >= limit {
            truncated = true;
            break;
        }
        collected.push(item);
    }
    let mut text = collected.join(", ");
    if truncated {
        text.push_str(", …");
    }
    text
}

/// 关键名目匹配: 名目首词（小写）出现在候选名称里即算命中
///
/// 数据侧的品类/收货方写法不完全统一（如 "Strawberry (tunnel)"），
/// 按首词匹配吸收这种措辞差异。
pub(crate) fn marker_matches(candidates: &[&str], marker: &str) -> bool {
    let needle = marker
        .split_whitespace()
        .next()
        .unwrap_or(marker)
        .to_lowercase();
    candidates
        .iter()
        .any(|c| c.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates() {
        let items = (0..5).map(|i| format!("item{}", i));
        let text = preview(items, 3);
        assert_eq!(text, "item0, item1, item2, …");
    }

    #[test]
    fn test_preview_short_list_untouched() {
        let items = vec!["a".to_string(), "b".to_string()];
        assert_eq!(preview(items, 3), "a, b");
    }

    #[test]
    fn test_marker_matches_first_word() {
        let candidates = vec!["Strawberry (tunnel)", "Raspberry"];
        assert!(marker_matches(&candidates, "Strawberry field"));
        assert!(marker_matches(&candidates, "raspberry"));
        assert!(!marker_matches(&candidates, "Blueberry"));
    }
}
