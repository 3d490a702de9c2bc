// ==========================================
// 水果贸易看板数据校验系统 - 领域模型层
// ==========================================
// 职责: 定义看板数据表的类型化表示
// 红线: 不含文件访问逻辑,不含校验逻辑
// ==========================================
// 所有数据表在进程启动时一次性加载，之后只读；
// 生命周期: 加载 → 校验 → 丢弃（进程退出）
// ==========================================

pub mod carton_map;
pub mod carton_plan;
pub mod packaging;
pub mod plan;
pub mod stock;
pub mod supplier;
pub mod types;
pub mod usage;

// 重导出核心类型
pub use carton_map::{CartonMapTable, SizeFallback};
pub use carton_plan::{CartonDemandRow, CartonPlanTable, PackageBreakdown, PlanTotals};
pub use packaging::{PackagingRecord, PackagingTable};
pub use plan::{SalesPlanRecord, SalesPlanTable};
pub use stock::{StockRecord, StockTable};
pub use supplier::{SupplierRecord, SupplierTable};
pub use types::{SizeClass, SubjectKind};
pub use usage::{UsageRecord, UsageTable};
