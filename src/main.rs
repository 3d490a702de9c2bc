// ==========================================
// 水果贸易看板数据校验系统 - 命令行主入口
// ==========================================
// 技术栈: Rust + clap + tracing
// 系统定位: 发布前数据一致性门禁
// ==========================================
// 退出码: 0 = 全部检查通过; 1 = 有检查失败。
// 发布流水线以退出码决定是否放行。
// ==========================================

use clap::Parser;
use fruit_dashboard_qa::checks::{CheckContext, Suite};
use fruit_dashboard_qa::config::QaConfig;
use fruit_dashboard_qa::loader::{Dataset, SiteLoader};
use fruit_dashboard_qa::report::Reporter;
use fruit_dashboard_qa::{i18n, logging};
use std::path::PathBuf;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(
    name = "fruit-dashboard-qa",
    version,
    about = "水果贸易看板数据一致性校验 - 发布门禁"
)]
struct Cli {
    /// 站点根目录（数据模块与页面所在位置）
    #[arg(long, default_value = "site")]
    root: PathBuf,

    /// 阈值配置文件（JSON，缺省用内置默认值）
    #[arg(long)]
    config: Option<PathBuf>,

    /// 报告语言（zh-CN / en）
    #[arg(long, default_value = "zh-CN")]
    locale: String,

    /// 要执行的套件（缺省全部，按固定顺序）
    #[arg(value_enum)]
    suites: Vec<Suite>,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    i18n::set_locale(&cli.locale);

    tracing::info!("==================================================");
    tracing::info!(
        "{} v{}",
        fruit_dashboard_qa::APP_NAME,
        fruit_dashboard_qa::VERSION
    );
    tracing::info!("==================================================");
    tracing::info!("{}", i18n::t("common.run_start"));

    // 站点根目录本身不可用属于环境错误，直接中止批次
    anyhow::ensure!(
        cli.root.is_dir(),
        "站点根目录不存在: {}",
        cli.root.display()
    );

    let config = QaConfig::load(cli.config.as_deref())?;
    let loader = SiteLoader::new(&cli.root);
    tracing::info!(root = %loader.root().display(), "站点根目录就绪");

    let dataset = Dataset::load(&loader);
    let ctx = CheckContext {
        loader: &loader,
        dataset: &dataset,
        config: &config,
    };

    let suites = if cli.suites.is_empty() {
        Suite::ALL.to_vec()
    } else {
        cli.suites.clone()
    };

    let mut reporter = Reporter::new();
    for suite in suites {
        suite.run(&ctx, &mut reporter);
    }

    let summary = reporter.finish();
    tracing::info!("{}", i18n::t("common.run_done"));

    std::process::exit(summary.exit_code());
}
