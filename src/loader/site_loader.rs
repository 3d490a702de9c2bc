// ==========================================
// 水果贸易看板数据校验系统 - 站点加载器
// ==========================================
// 职责: 按站点根目录解析相对路径，读取并反序列化数据模块
// ==========================================
// 数据模块是显式的类型化 JSON 文件，每个文件恰好承载
// 一张数据表；"预期绑定已填充"条件体现为表非空检查。
// ==========================================

use crate::domain::{
    CartonMapTable, CartonPlanTable, PackagingTable, SalesPlanTable, StockTable, SupplierTable,
    UsageTable,
};
use crate::loader::error::{LoadError, LoadResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

// ==========================================
// DataModule - 数据模块约定
// ==========================================

/// 数据模块约定: 表类型 ↔ 模块文件名 ↔ 非空谓词
pub trait DataModule: DeserializeOwned {
    /// 模块文件相对站点根目录的路径
    const MODULE_FILE: &'static str;

    /// 模块解析成功但不含任何记录时视为加载失败
    fn is_empty(&self) -> bool;
}

impl DataModule for StockTable {
    const MODULE_FILE: &'static str = "data/stock.json";

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataModule for SalesPlanTable {
    const MODULE_FILE: &'static str = "data/sales_plan.json";

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataModule for CartonPlanTable {
    const MODULE_FILE: &'static str = "data/carton_plan.json";

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DataModule for PackagingTable {
    const MODULE_FILE: &'static str = "data/packaging_usage.json";

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataModule for UsageTable {
    const MODULE_FILE: &'static str = "data/material_usage.json";

    fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl DataModule for SupplierTable {
    const MODULE_FILE: &'static str = "data/suppliers.json";

    fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }
}

impl DataModule for CartonMapTable {
    const MODULE_FILE: &'static str = "data/carton_map.json";

    fn is_empty(&self) -> bool {
        self.map.is_empty() && self.fallback.is_empty()
    }
}

// ==========================================
// SiteLoader - 站点加载器
// ==========================================

/// 站点加载器
///
/// 除读取单个源文件外没有任何副作用；
/// 不访问网络，不写磁盘。
pub struct SiteLoader {
    root: PathBuf,
}

impl SiteLoader {
    /// 创建指向站点根目录的加载器
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 站点根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 相对路径 → 绝对路径
    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// 相对路径指向的文件是否存在
    pub fn exists(&self, rel: &str) -> bool {
        self.resolve(rel).is_file()
    }

    /// 相对路径指向文件的字节数
    pub fn file_size(&self, rel: &str) -> LoadResult<u64> {
        let path = self.resolve(rel);
        let meta = fs::metadata(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::FileNotFound(rel.to_string()),
            _ => LoadError::ReadError {
                path: rel.to_string(),
                message: e.to_string(),
            },
        })?;
        Ok(meta.len())
    }

    /// 站点根目录下的文件名清单（不含子目录）
    ///
    /// 源表格类检查按文件名片段匹配，因为上游导出的
    /// 文件名里日期部分会变。
    pub fn list_root_files(&self) -> LoadResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| LoadError::ReadError {
            path: self.root.display().to_string(),
            message: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| LoadError::ReadError {
                path: self.root.display().to_string(),
                message: e.to_string(),
            })?;
            if entry.path().is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        files.sort();
        Ok(files)
    }

    /// 读取相对路径指向的文本文件
    pub fn read_to_string(&self, rel: &str) -> LoadResult<String> {
        let path = self.resolve(rel);
        if !path.is_file() {
            return Err(LoadError::FileNotFound(rel.to_string()));
        }
        fs::read_to_string(&path).map_err(|e| LoadError::ReadError {
            path: rel.to_string(),
            message: e.to_string(),
        })
    }

    /// 加载一个类型化数据模块
    ///
    /// 失败条件: 文件缺失 / 读取失败 / 解析失败 / 表为空。
    pub fn load<T: DataModule>(&self) -> LoadResult<T> {
        let rel = T::MODULE_FILE;
        let source = self.read_to_string(rel)?;

        let table: T = serde_json::from_str(&source).map_err(|e| LoadError::ParseError {
            path: rel.to_string(),
            message: e.to_string(),
        })?;

        if table.is_empty() {
            return Err(LoadError::EmptyModule {
                path: rel.to_string(),
            });
        }

        tracing::debug!(module = rel, bytes = source.len(), "数据模块加载成功");
        Ok(table)
    }
}
