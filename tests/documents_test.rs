// ==========================================
// 页面与链接套件集成测试
// ==========================================
// 测试目标: 结构化文档检查对典型页面事故的回归能力
// （导航元素退化成 <div>、断链、占位 href、标记缺失）
// ==========================================

mod test_helpers;

use fruit_dashboard_qa::checks::Suite;
use fruit_dashboard_qa::report::CheckStatus;
use tempfile::tempdir;

fn run_documents(
    root: &std::path::Path,
) -> (
    Vec<fruit_dashboard_qa::report::CheckOutcome>,
    fruit_dashboard_qa::report::RunSummary,
) {
    let config = test_helpers::fixture_config();
    test_helpers::run_suites(root, &config, &[Suite::Documents])
}

#[test]
fn test_non_anchor_tool_row_detected() {
    let dir = tempdir().expect("创建临时目录失败");
    test_helpers::write_passing_site(dir.path());

    // 2026-02 事故形态: 工具行被重构成 <div>，点击失效
    let broken = test_helpers::top_page("Packaging")
        .replace(
            r#"<a class="back-btn" href="index.html">Back</a>"#,
            r#"<a class="back-btn" href="index.html">Back</a>
<div class="tool-row">Carton designer</div>"#,
        );
    test_helpers::write_file(dir.path(), "packaging.html", &broken);

    let (outcomes, summary) = run_documents(dir.path());
    assert_eq!(summary.failed, 1);
    let failed = outcomes
        .iter()
        .find(|o| o.status == CheckStatus::Failed)
        .expect("应有失败检查");
    assert!(failed.name.contains("packaging.html"));
    assert!(failed.name.contains("tool-row"));
    assert!(failed.message.as_deref().unwrap().contains("<div"));
}

#[test]
fn test_placeholder_tool_row_href_detected() {
    let dir = tempdir().expect("创建临时目录失败");
    test_helpers::write_passing_site(dir.path());

    let broken = test_helpers::top_page("Packaging").replace(
        "<main>",
        r##"<a class="tool-row" href="#">Coming soon</a>
<main>"##,
    );
    test_helpers::write_file(dir.path(), "packaging.html", &broken);

    let (outcomes, summary) = run_documents(dir.path());
    assert_eq!(summary.failed, 1);
    let failed = outcomes
        .iter()
        .find(|o| o.status == CheckStatus::Failed)
        .expect("应有失败检查");
    assert!(failed.name.contains("tool-row href"));
    assert!(failed.message.as_deref().unwrap().contains("href=\"#\""));
}

#[test]
fn test_missing_marker_is_failure_not_skip() {
    let dir = tempdir().expect("创建临时目录失败");
    test_helpers::write_passing_site(dir.path());

    // 首页丢失一个年度目标卡 → 必须报失败，不能静默跳过
    let stripped = test_helpers::index_page().replace("HARVEST 50", "HARVEST FIFTY");
    test_helpers::write_file(dir.path(), "index.html", &stripped);

    let (outcomes, summary) = run_documents(dir.path());
    assert_eq!(summary.failed, 1);
    let failed = outcomes
        .iter()
        .find(|o| o.status == CheckStatus::Failed)
        .expect("应有失败检查");
    assert!(failed.name.contains("HARVEST 50"));
}

#[test]
fn test_broken_link_detected() {
    let dir = tempdir().expect("创建临时目录失败");
    test_helpers::write_passing_site(dir.path());
    std::fs::remove_file(dir.path().join("usage-2025.html")).expect("删除页面失败");

    let (outcomes, summary) = run_documents(dir.path());
    assert!(summary.failed >= 2, "页面缺失 + 断链都应报");

    // 页面自身的存在性检查
    assert!(outcomes.iter().any(|o| {
        o.status == CheckStatus::Failed && o.name.contains("usage-2025.html 存在")
    }));
    // 枢纽页指向它的链接成为断链
    assert!(outcomes.iter().any(|o| {
        o.status == CheckStatus::Failed
            && o.name.contains("purchasing-planning.html")
            && o.message.as_deref().unwrap().contains("usage-2025.html")
    }));
}

#[test]
fn test_forbidden_legacy_marker_detected() {
    let dir = tempdir().expect("创建临时目录失败");
    test_helpers::write_passing_site(dir.path());

    // 旧版行情条组件回流 → 拦截
    let regressed = test_helpers::index_page().replace(
        "<nav>",
        r#"<div id="tickerInner"></div>
<nav>"#,
    );
    test_helpers::write_file(dir.path(), "index.html", &regressed);

    let (outcomes, summary) = run_documents(dir.path());
    assert_eq!(summary.failed, 1);
    let failed = outcomes
        .iter()
        .find(|o| o.status == CheckStatus::Failed)
        .expect("应有失败检查");
    assert!(failed.name.contains("旧版组件"));
}

#[test]
fn test_missing_workbook_detected() {
    let dir = tempdir().expect("创建临时目录失败");
    test_helpers::write_passing_site(dir.path());
    std::fs::remove_file(dir.path().join("CARTONS SEASON 2025.xlsx")).expect("删除源表失败");

    let (outcomes, summary) = run_documents(dir.path());
    assert_eq!(summary.failed, 1);
    let failed = outcomes
        .iter()
        .find(|o| o.status == CheckStatus::Failed)
        .expect("应有失败检查");
    assert!(failed.name.contains("纸箱季源表"));
    assert!(failed.message.as_deref().unwrap().contains("CARTONS SEASON"));
}
