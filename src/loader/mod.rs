// ==========================================
// 水果贸易看板数据校验系统 - 加载层
// ==========================================
// 职责: 把站点目录下的类型化数据模块读入内存
// 红线: 只读一个源文件，不求值任何脚本，不写任何状态
// ==========================================

pub mod dataset;
pub mod error;
pub mod site_loader;

// 重导出核心类型
pub use dataset::Dataset;
pub use error::{LoadError, LoadResult};
pub use site_loader::{DataModule, SiteLoader};
