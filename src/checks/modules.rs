// ==========================================
// 水果贸易看板数据校验系统 - 数据模块完整性套件
// ==========================================
// 职责: 每个数据模块可加载、非空、体量不可疑
// ==========================================

use crate::checks::CheckContext;
use crate::domain::{
    CartonMapTable, CartonPlanTable, PackagingTable, SalesPlanTable, StockTable, SupplierTable,
    UsageTable,
};
use crate::loader::dataset::MODULE_FILES;
use crate::loader::{DataModule, LoadResult};
use crate::report::Reporter;
use anyhow::{bail, ensure};

/// 单个模块的加载结果 → 一项检查
fn module_check<T>(reporter: &mut Reporter, file: &str, result: &LoadResult<T>) {
    reporter.check(&format!("{} 加载成功且非空", file), || match result {
        Ok(_) => Ok(()),
        Err(e) => bail!("{}", e),
    });
}

pub fn run(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let ds = ctx.dataset;

    reporter.section("数据模块加载");
    module_check(reporter, StockTable::MODULE_FILE, &ds.stock);
    module_check(reporter, SalesPlanTable::MODULE_FILE, &ds.sales_plan);
    module_check(reporter, CartonPlanTable::MODULE_FILE, &ds.carton_plan);
    module_check(reporter, PackagingTable::MODULE_FILE, &ds.packaging);
    module_check(reporter, UsageTable::MODULE_FILE, &ds.usage);
    module_check(reporter, SupplierTable::MODULE_FILE, &ds.suppliers);
    module_check(reporter, CartonMapTable::MODULE_FILE, &ds.carton_map);

    reporter.section("数据模块体量");
    let min_bytes = ctx.config.site.data_module_min_bytes;
    for file in MODULE_FILES {
        reporter.check(&format!("{} 体量不小于 {} 字节", file, min_bytes), || {
            let size = ctx.loader.file_size(file)?;
            ensure!(
                size >= min_bytes,
                "实际 {} 字节 — 可疑地小，疑似截断或占位文件",
                size
            );
            Ok(())
        });
    }
}
