// ==========================================
// 水果贸易看板数据校验系统 - 数据集
// ==========================================
// 职责: 启动时把全部数据模块各加载一次，
//       逐表保留加载结果供套件独立门控
// ==========================================

use crate::domain::{
    CartonMapTable, CartonPlanTable, PackagingTable, SalesPlanTable, StockTable, SupplierTable,
    UsageTable,
};
use crate::loader::error::LoadResult;
use crate::loader::site_loader::{DataModule, SiteLoader};

/// 全部已知数据模块的模块文件清单（与加载顺序一致）
pub const MODULE_FILES: [&str; 7] = [
    StockTable::MODULE_FILE,
    SalesPlanTable::MODULE_FILE,
    CartonPlanTable::MODULE_FILE,
    PackagingTable::MODULE_FILE,
    UsageTable::MODULE_FILE,
    SupplierTable::MODULE_FILE,
    CartonMapTable::MODULE_FILE,
];

/// 一次性加载的只读数据集
///
/// 每张表保留各自的加载结果: 某个模块缺失或损坏时，
/// 只有依赖它的套件被门控，其余套件照常执行。
pub struct Dataset {
    pub stock: LoadResult<StockTable>,
    pub sales_plan: LoadResult<SalesPlanTable>,
    pub carton_plan: LoadResult<CartonPlanTable>,
    pub packaging: LoadResult<PackagingTable>,
    pub usage: LoadResult<UsageTable>,
    pub suppliers: LoadResult<SupplierTable>,
    pub carton_map: LoadResult<CartonMapTable>,
}

impl Dataset {
    /// 加载站点根目录下的全部数据模块
    pub fn load(loader: &SiteLoader) -> Self {
        let dataset = Self {
            stock: loader.load::<StockTable>(),
            sales_plan: loader.load::<SalesPlanTable>(),
            carton_plan: loader.load::<CartonPlanTable>(),
            packaging: loader.load::<PackagingTable>(),
            usage: loader.load::<UsageTable>(),
            suppliers: loader.load::<SupplierTable>(),
            carton_map: loader.load::<CartonMapTable>(),
        };

        for (file, ok) in [
            (StockTable::MODULE_FILE, dataset.stock.is_ok()),
            (SalesPlanTable::MODULE_FILE, dataset.sales_plan.is_ok()),
            (CartonPlanTable::MODULE_FILE, dataset.carton_plan.is_ok()),
            (PackagingTable::MODULE_FILE, dataset.packaging.is_ok()),
            (UsageTable::MODULE_FILE, dataset.usage.is_ok()),
            (SupplierTable::MODULE_FILE, dataset.suppliers.is_ok()),
            (CartonMapTable::MODULE_FILE, dataset.carton_map.is_ok()),
        ] {
            if ok {
                tracing::info!(module = file, "数据模块就绪");
            } else {
                tracing::warn!(module = file, "数据模块不可用，依赖它的套件将被门控");
            }
        }

        dataset
    }
}
