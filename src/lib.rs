// ==========================================
// 水果贸易看板数据校验系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 发布前数据一致性门禁
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 数据表与类型
pub mod domain;

// 加载层 - 类型化数据模块读取
pub mod loader;

// 文档模型 - HTML 页面结构化扫描
pub mod document;

// 校验层 - 一致性检查套件
pub mod checks;

// 报告层 - 结果汇总与退出状态
pub mod report;

// 配置层 - 容差与阈值
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{SizeClass, SubjectKind};

// 领域数据表
pub use domain::{
    CartonDemandRow, CartonMapTable, CartonPlanTable, PackagingRecord, PackagingTable,
    SalesPlanRecord, SalesPlanTable, StockRecord, StockTable, SupplierRecord, SupplierTable,
    UsageRecord, UsageTable,
};

// 加载层
pub use loader::{DataModule, Dataset, LoadError, LoadResult, SiteLoader};

// 文档模型
pub use document::{Document, Element};

// 校验与报告
pub use checks::{CheckContext, Suite};
pub use report::{CheckOutcome, CheckStatus, Reporter, RunSummary};

// 配置
pub use config::QaConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "水果贸易看板数据校验系统";
