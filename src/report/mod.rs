// ==========================================
// 水果贸易看板数据校验系统 - 报告层
// ==========================================
// 职责: 驱动检查、记录逐项结果、输出 ✓/✗ 报告、
//       把批次结果折算成进程退出状态
// ==========================================
// 隔离约定: 单项检查失败被当场捕获并记录，绝不外溢；
// 只有检查守卫之外的环境错误才会中止整个批次。
// ==========================================

use crate::i18n::t_with_args;
use crate::loader::LoadResult;
use chrono::{DateTime, Local};

// ==========================================
// CheckStatus / CheckOutcome - 检查结果
// ==========================================

/// 单项检查状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    Failed,
}

/// 单项检查结果
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub suite: String,           // 所属套件标题
    pub name: String,            // 检查名
    pub status: CheckStatus,     // 结果
    pub message: Option<String>, // 失败信息（含违规值）
}

// ==========================================
// RunSummary - 批次汇总
// ==========================================

/// 批次汇总
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub finished_at: DateTime<Local>,
}

impl RunSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// 发布门禁: 有任何失败即非零退出
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

// ==========================================
// Reporter - 检查驱动器
// ==========================================

/// 检查驱动器
///
/// 套件按固定顺序执行；套件内逐项检查相互独立，
/// 失败不中断后续检查。
pub struct Reporter {
    outcomes: Vec<CheckOutcome>,
    current_suite: String,
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            outcomes: Vec::new(),
            current_suite: String::new(),
        }
    }

    /// 进入一个命名套件
    pub fn begin_suite(&mut self, title: &str) {
        self.current_suite = title.to_string();
        println!("\n=== {} ===", title);
        tracing::info!(suite = title, "套件开始");
    }

    /// 套件内的小节标题（仅排版用）
    pub fn section(&self, title: &str) {
        println!("\n--- {} ---", title);
    }

    /// 执行一项命名检查并记录结果
    ///
    /// 闭包返回 Err 时记为失败，错误信息随 ✗ 行输出；
    /// 执行继续，不中断。
    pub fn check<F>(&mut self, name: &str, f: F)
    where
        F: FnOnce() -> anyhow::Result<()>,
    {
        match f() {
            Ok(()) => {
                println!("  ✓  {}", name);
                self.record(name, CheckStatus::Passed, None);
            }
            Err(e) => {
                // 带上错误链，违规值在各检查的消息里
                let message = format!("{:#}", e);
                println!("  ✗  {}", name);
                println!("     → {}", message);
                self.record(name, CheckStatus::Failed, Some(message));
            }
        }
    }

    /// 套件门控: 依赖的数据表必须可用
    ///
    /// 加载失败时记录一项失败并返回 None，调用方应当
    /// 跳过本套件其余检查（其他套件不受影响）。
    pub fn gate<'a, T>(&mut self, name: &str, table: &'a LoadResult<T>) -> Option<&'a T> {
        match table {
            Ok(t) => Some(t),
            Err(e) => {
                let message = e.to_string();
                println!("  ✗  {}", name);
                println!("     → {}", message);
                self.record(name, CheckStatus::Failed, Some(message));
                tracing::warn!(suite = %self.current_suite, "依赖数据不可用，套件剩余检查跳过");
                None
            }
        }
    }

    fn record(&mut self, name: &str, status: CheckStatus, message: Option<String>) {
        self.outcomes.push(CheckOutcome {
            suite: self.current_suite.clone(),
            name: name.to_string(),
            status,
            message,
        });
    }

    /// 已记录的逐项结果
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == CheckStatus::Passed)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == CheckStatus::Failed)
            .count()
    }

    /// 结束批次: 打印汇总并产出 RunSummary
    pub fn finish(self) -> RunSummary {
        let summary = RunSummary {
            passed: self.passed(),
            failed: self.failed(),
            finished_at: Local::now(),
        };

        println!("\n{}", "─".repeat(50));
        println!(
            "{}",
            t_with_args(
                "report.summary",
                &[
                    ("passed", &summary.passed.to_string()),
                    ("failed", &summary.failed.to_string()),
                ],
            )
        );

        if summary.all_passed() {
            println!("\n✅  {}\n", crate::i18n::t("report.all_passed"));
        } else {
            println!(
                "\n⛔  {}\n",
                t_with_args("report.has_failures", &[("failed", &summary.failed.to_string())])
            );
        }

        tracing::info!(
            passed = summary.passed,
            failed = summary.failed,
            finished_at = %summary.finished_at.format("%Y-%m-%d %H:%M:%S"),
            "批次结束"
        );

        summary
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadError;
    use anyhow::bail;

    #[test]
    fn test_failed_check_recorded_and_run_continues() {
        let mut reporter = Reporter::new();
        reporter.begin_suite("测试套件");
        reporter.check("必然通过", || Ok(()));
        reporter.check("必然失败", || bail!("期望 1, 实际 2"));
        reporter.check("失败后继续", || Ok(()));

        assert_eq!(reporter.passed(), 2);
        assert_eq!(reporter.failed(), 1);
        let failed = &reporter.outcomes()[1];
        assert_eq!(failed.status, CheckStatus::Failed);
        assert!(failed.message.as_deref().unwrap().contains("期望 1"));
    }

    #[test]
    fn test_exit_code_mapping() {
        let mut reporter = Reporter::new();
        reporter.begin_suite("测试套件");
        reporter.check("通过", || Ok(()));
        assert_eq!(reporter.failed(), 0);
        let summary = reporter.finish();
        assert_eq!(summary.exit_code(), 0);

        let mut reporter = Reporter::new();
        reporter.begin_suite("测试套件");
        reporter.check("失败", || bail!("boom"));
        let summary = reporter.finish();
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_gate_records_failure_on_missing_table() {
        let mut reporter = Reporter::new();
        reporter.begin_suite("测试套件");
        let table: LoadResult<crate::domain::StockTable> =
            Err(LoadError::FileNotFound("data/stock.json".into()));
        assert!(reporter.gate("库存数据可用", &table).is_none());
        assert_eq!(reporter.failed(), 1);
        assert!(reporter.outcomes()[0]
            .message
            .as_deref()
            .unwrap()
            .contains("data/stock.json"));
    }
}
