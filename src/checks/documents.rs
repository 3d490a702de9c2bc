// ==========================================
// 水果贸易看板数据校验系统 - 页面与链接套件
// ==========================================
// 职责: 页面存在与结构、导航元素形态、链接完整性、
//       导航层级、首页看板完整性、静态资源与源表格
// ==========================================
// 本套件描述的是这个站点自身的页面布局，
// 属于站点结构而非容差，因此保持为常量；
// 体量下限等阈值走配置。
// ==========================================

use crate::checks::{preview, CheckContext};
use crate::document::Document;
use crate::report::Reporter;
use anyhow::{anyhow, ensure};
use std::collections::BTreeMap;

/// 站点全部页面
const PAGE_FILES: [&str; 11] = [
    "index.html",
    "purchasing-planning.html",
    "purchasing-stock.html",
    "purchasing-plan-2026.html",
    "purchasing-clients.html",
    "purchasing-schedule.html",
    "carton-suppliers.html",
    "packaging.html",
    "usage-2025.html",
    "planning-and-sales.html",
    "settlements-rt.html",
];

/// 必须渲染成 <a> 的导航类元素
const MUST_BE_ANCHOR_CLASSES: [&str; 3] = ["tool-row", "back-btn", "sub-nav-item"];

/// 导航层级: 页面 → 必须可返回的上级
///
/// 二级页面返回采购枢纽页，枢纽页自己返回首页，
/// 不要求二级页面直接链回首页。
const PARENT_OF: [(&str, &str); 10] = [
    ("purchasing-planning.html", "index.html"),
    ("packaging.html", "index.html"),
    ("planning-and-sales.html", "index.html"),
    ("settlements-rt.html", "index.html"),
    ("purchasing-stock.html", "purchasing-planning.html"),
    ("purchasing-plan-2026.html", "purchasing-planning.html"),
    ("purchasing-clients.html", "purchasing-planning.html"),
    ("purchasing-schedule.html", "purchasing-planning.html"),
    ("carton-suppliers.html", "purchasing-planning.html"),
    ("usage-2025.html", "purchasing-planning.html"),
];

/// 采购枢纽页及其全部子页
const HUB_PAGE: &str = "purchasing-planning.html";
const HUB_SUBPAGES: [&str; 6] = [
    "purchasing-stock.html",
    "purchasing-plan-2026.html",
    "purchasing-clients.html",
    "purchasing-schedule.html",
    "carton-suppliers.html",
    "usage-2025.html",
];

/// 首页必须链接的顶级工具
const INDEX_TOOL_LINKS: [&str; 4] = [
    "purchasing-planning.html",
    "packaging.html",
    "planning-and-sales.html",
    "settlements-rt.html",
];

/// 首页必须是年度目标看板，以下标记缺一即判旧版/错版
const INDEX_TITLE_MARKER: &str = "FruitBoard";
const GOAL_GRID_MARKER: &str = "goal-grid";
const GOAL_MARKERS: [&str; 4] = ["FULL SEASON", "HARVEST 50", "NO COMPLAINTS", "PRODUCT X"];
const GOAL_OWNER_MARKERS: [&str; 3] = ["Goal #1 · Jan", "Goal #2 · Kacper", "Goal #3 · Olgierd"];
const GAUGE_MARKER: &str = "stroke-dasharray";
const GAUGE_ANIMATION_CLASS: &str = "radial-fill";
const SCOREBOARD_LINK_MARKER: &str = "docs.google.com/spreadsheets/d/";

/// 历史上误发布过的旧版组件，出现即拦截
const FORBIDDEN_MARKERS: [(&str, &str); 2] = [
    ("tickerInner", "遗留行情条组件"),
    ("card-title\">Process Map", "旧版流程图看板"),
];

const LOGO_FILE: &str = "logo.svg";

/// 结算页与其源表格
const SETTLEMENT_PAGE: &str = "settlements-rt.html";
const SETTLEMENT_WORKBOOK: &str = "Settlements RT 2025.xlsx";
const SHEETJS_MARKERS: [&str; 2] = ["xlsx.full.min.js", "sheetjs"];

/// 其余源表格按文件名片段匹配（导出名里日期会变）
const WORKBOOK_PATTERNS: [(&str, &str); 3] = [
    ("Planning", "2026 销售计划源表"),
    ("CARTONS SEASON", "2025 纸箱季源表"),
    ("Stock levels", "库存快照源表"),
];

pub fn run(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let th = &ctx.config.site;
    let mut pages: BTreeMap<&'static str, Document> = BTreeMap::new();

    // ── 1. 页面存在与基本结构 ─────────────────────────
    reporter.section("页面存在与基本结构");
    for file in PAGE_FILES {
        reporter.check(&format!("{} 存在且结构完整", file), || {
            let source = ctx.loader.read_to_string(file)?;
            let doc = Document::parse(source);
            ensure!(doc.has_element("html"), "无 <html> 标签");
            ensure!(doc.has_closing_tag("html"), "无 </html> 闭合");

            let floor = if file == "index.html" {
                th.index_min_bytes
            } else {
                th.page_min_bytes
            };
            ensure!(
                doc.len_bytes() as u64 >= floor,
                "{} 字节 — 可疑地小",
                doc.len_bytes()
            );

            pages.insert(file, doc);
            Ok(())
        });
    }

    // ── 2. 导航元素必须是 <a>（2026-02 事故回归）──────
    reporter.section("导航元素形态");
    for (file, doc) in &pages {
        for class in MUST_BE_ANCHOR_CLASSES {
            if doc.elements_with_class(class).next().is_none() {
                continue;
            }
            reporter.check(&format!("{} — .{} 均为 <a>", file, class), || {
                let bad: Vec<String> = doc
                    .elements_with_class(class)
                    .filter(|e| !e.is_anchor())
                    .map(|e| format!("<{} class=\"…{}…\">", e.tag, class))
                    .collect();
                ensure!(
                    bad.is_empty(),
                    "{} 个元素不是 <a>: {}",
                    bad.len(),
                    preview(bad.into_iter(), 3)
                );
                Ok(())
            });
        }
    }

    // ── 3. tool-row 链接目标非空 ─────────────────────
    reporter.section("工具行链接目标");
    for (file, doc) in &pages {
        if doc.elements_with_class("tool-row").next().is_none() {
            continue;
        }
        reporter.check(&format!("{} — tool-row href 均已填写", file), || {
            let bad: Vec<String> = doc
                .elements_with_class("tool-row")
                .filter(|e| e.is_anchor())
                .filter(|e| {
                    let href = e.attr("href").unwrap_or("");
                    href.is_empty() || href == "#"
                })
                .map(|e| format!("href=\"{}\"", e.attr("href").unwrap_or("")))
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 个 tool-row 是空链接/占位符: {}",
                bad.len(),
                preview(bad.into_iter(), 3)
            );
            Ok(())
        });
    }

    // ── 4. 链接完整性: 本地 .html 目标必须存在 ────────
    reporter.section("链接完整性");
    for (file, doc) in &pages {
        let local: Vec<&str> = doc
            .anchor_hrefs()
            .into_iter()
            .filter(|h| h.ends_with(".html") && !h.starts_with("http") && !h.starts_with("//"))
            .collect();
        if local.is_empty() {
            continue;
        }
        reporter.check(
            &format!("{} — {} 个本地链接可解析", file, local.len()),
            || {
                let missing: Vec<String> = local
                    .iter()
                    .filter(|h| !ctx.loader.exists(h))
                    .map(|h| h.to_string())
                    .collect();
                ensure!(missing.is_empty(), "断链: {}", missing.join(", "));
                Ok(())
            },
        );
    }

    // ── 5. 导航层级: 每页可返回上级 ──────────────────
    reporter.section("返回上级导航");
    for (file, parent) in PARENT_OF {
        let Some(doc) = pages.get(file) else {
            continue;
        };
        reporter.check(&format!("{} — 有返回 {} 的链接", file, parent), || {
            ensure!(
                doc.anchor_hrefs().iter().any(|h| *h == parent),
                "无指向 {} 的 <a href>",
                parent
            );
            Ok(())
        });
    }

    // ── 6. 导航互联: 枢纽页与首页 ────────────────────
    reporter.section("导航互联");
    if let Some(hub) = pages.get(HUB_PAGE) {
        reporter.check(&format!("{} 链接到全部采购子页", HUB_PAGE), || {
            let hrefs = hub.anchor_hrefs();
            let missing: Vec<&str> = HUB_SUBPAGES
                .iter()
                .filter(|p| !hrefs.iter().any(|h| h == *p))
                .copied()
                .collect();
            ensure!(missing.is_empty(), "缺链接: {}", missing.join(", "));
            Ok(())
        });
    }
    if let Some(index) = pages.get("index.html") {
        reporter.check("index.html 链接到全部顶级工具", || {
            let hrefs = index.anchor_hrefs();
            let missing: Vec<&str> = INDEX_TOOL_LINKS
                .iter()
                .filter(|p| !hrefs.iter().any(|h| h == *p))
                .copied()
                .collect();
            ensure!(missing.is_empty(), "缺链接: {}", missing.join(", "));
            Ok(())
        });
    }

    // ── 7. 脚本引用: 本地 src 必须存在 ───────────────
    reporter.section("脚本引用");
    for (file, doc) in &pages {
        let local: Vec<&str> = doc
            .script_srcs()
            .into_iter()
            .filter(|s| !s.starts_with("http") && !s.starts_with("//"))
            .collect();
        if local.is_empty() {
            continue;
        }
        reporter.check(
            &format!("{} — {} 个本地脚本存在", file, local.len()),
            || {
                let missing: Vec<String> = local
                    .iter()
                    .filter(|s| !ctx.loader.exists(s))
                    .map(|s| s.to_string())
                    .collect();
                ensure!(missing.is_empty(), "脚本缺失: {}", missing.join(", "));
                Ok(())
            },
        );
    }

    // ── 8. 首页元信息与主看板完整性 ──────────────────
    if let Some(index) = pages.get("index.html") {
        reporter.section("首页元信息");
        reporter.check("index.html — meta viewport 在位", || {
            ensure!(
                index
                    .elements()
                    .iter()
                    .any(|e| e.tag == "meta" && e.attr("name") == Some("viewport")),
                "无 viewport meta — 移动端排版会坏"
            );
            Ok(())
        });

        reporter.check("index.html — 字符集声明在位", || {
            let declared = index
                .elements()
                .iter()
                .any(|e| e.tag == "meta" && e.attr("charset").is_some());
            ensure!(declared || index.contains_marker("UTF-8"), "无 charset 声明");
            Ok(())
        });

        reporter.check("index.html — 标题带产品名", || {
            let title = index.title().ok_or_else(|| anyhow!("无 <title>"))?;
            ensure!(
                title.contains(INDEX_TITLE_MARKER),
                "标题 = \"{}\" — 缺 {}",
                title,
                INDEX_TITLE_MARKER
            );
            Ok(())
        });

        reporter.section("主看板完整性");
        reporter.check("目标网格结构在位", || {
            ensure!(
                index.contains_marker(GOAL_GRID_MARKER),
                "无 {} — 首页不是年度目标看板",
                GOAL_GRID_MARKER
            );
            Ok(())
        });

        for goal in GOAL_MARKERS {
            reporter.check(&format!("年度目标 \"{}\" 在位", goal), || {
                ensure!(index.contains_marker(goal), "看板缺该目标卡");
                Ok(())
            });
        }

        for owner in GOAL_OWNER_MARKERS {
            reporter.check(&format!("目标归属 \"{}\" 在位", owner), || {
                ensure!(index.contains_marker(owner), "目标卡缺负责人标注");
                Ok(())
            });
        }

        reporter.check(
            &format!("环形仪表不少于 {} 个", th.min_gauge_count),
            || {
                let count = index.count_marker(GAUGE_MARKER);
                ensure!(
                    count >= th.min_gauge_count,
                    "{} 处 {} — 仪表缺失",
                    count,
                    GAUGE_MARKER
                );
                Ok(())
            },
        );

        reporter.check("仪表入场动画类在位", || {
            ensure!(
                index.contains_marker(GAUGE_ANIMATION_CLASS),
                "无 {} 类",
                GAUGE_ANIMATION_CLASS
            );
            Ok(())
        });

        reporter.check("记分板表格链接在位", || {
            ensure!(
                index.contains_marker(SCOREBOARD_LINK_MARKER),
                "无记分板表格链接"
            );
            Ok(())
        });

        for (marker, label) in FORBIDDEN_MARKERS {
            reporter.check(&format!("旧版组件 \"{}\" 不在首页", label), || {
                let count = index.count_marker(marker);
                ensure!(count == 0, "发现 {} 处 {} — 误发布旧版", count, marker);
                Ok(())
            });
        }
    }

    // ── 9. 静态资源 ─────────────────────────────────
    reporter.section("静态资源");
    reporter.check(&format!("{} 存在且为 SVG", LOGO_FILE), || {
        let content = ctx.loader.read_to_string(LOGO_FILE)?;
        ensure!(content.contains("<svg"), "文件内无 <svg> 标签");
        Ok(())
    });

    // ── 10. 源表格文件 ──────────────────────────────
    reporter.section("源表格文件");
    if let Some(doc) = pages.get(SETTLEMENT_PAGE) {
        reporter.check(&format!("{} — 引用源表格文件名", SETTLEMENT_PAGE), || {
            ensure!(
                doc.contains_marker(SETTLEMENT_WORKBOOK),
                "页面内无 \"{}\" 引用",
                SETTLEMENT_WORKBOOK
            );
            Ok(())
        });

        reporter.check(&format!("{} — 表格解析脚本已加载", SETTLEMENT_PAGE), || {
            ensure!(
                SHEETJS_MARKERS.iter().any(|m| doc.contains_marker(m)),
                "无表格解析脚本 — 页面读不了源表格"
            );
            Ok(())
        });
    }

    reporter.check(
        &format!("{} 存在且体量正常", SETTLEMENT_WORKBOOK),
        || {
            let size = ctx.loader.file_size(SETTLEMENT_WORKBOOK)?;
            ensure!(
                size >= th.workbook_min_bytes,
                "{} KB — 太小",
                size / 1024
            );
            Ok(())
        },
    );

    for (pattern, label) in WORKBOOK_PATTERNS {
        reporter.check(&format!("{} 在站点根目录", label), || {
            let files = ctx.loader.list_root_files()?;
            let found = files
                .iter()
                .any(|f| f.contains(pattern) && f.ends_with(".xlsx"));
            ensure!(found, "无文件名含 \"{}\" 的 .xlsx", pattern);
            Ok(())
        });
    }
}
