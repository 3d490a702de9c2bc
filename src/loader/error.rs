// ==========================================
// 水果贸易看板数据校验系统 - 加载层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 加载层错误类型
///
/// 模块加载失败只阻断依赖该模块的检查套件，
/// 不中止整个校验批次（见报告层的套件门控）。
#[derive(Error, Debug)]
pub enum LoadError {
    // ===== 文件相关错误 =====
    #[error("数据模块不存在: {0}")]
    FileNotFound(String),

    #[error("数据模块读取失败: {path}: {message}")]
    ReadError { path: String, message: String },

    // ===== 内容相关错误 =====
    #[error("数据模块解析失败: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("数据模块为空: {path}（解析成功但不含任何记录）")]
    EmptyModule { path: String },
}

/// Result 类型别名
pub type LoadResult<T> = Result<T, LoadError>;
