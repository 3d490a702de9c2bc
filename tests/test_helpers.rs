// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成一套全绿的夹具站点（数据模块 + 页面 +
//       静态资源）以及与其体量匹配的阈值配置
// ==========================================
// 夹具数据刻意保持业务上自洽: 客户需求 600 000 kg、
// 产地供给 550 000 kg（覆盖率 ≈ 0.92）、采购计划
// 640 000 kg（对销售计划比值 ≈ 1.07）。单项测试通过
// 改坏其中一处来触发对应检查。
// ==========================================

use fruit_dashboard_qa::checks::{CheckContext, Suite};
use fruit_dashboard_qa::config::QaConfig;
use fruit_dashboard_qa::domain::{
    CartonDemandRow, CartonMapTable, CartonPlanTable, PackageBreakdown, PackagingRecord,
    PackagingTable, PlanTotals, SalesPlanRecord, SalesPlanTable, SizeClass, SizeFallback,
    StockRecord, StockTable, SubjectKind, SupplierRecord, SupplierTable, UsageRecord, UsageTable,
};
use fruit_dashboard_qa::loader::{Dataset, SiteLoader};
use fruit_dashboard_qa::report::{CheckOutcome, Reporter, RunSummary};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// ==========================================
// 基础文件操作
// ==========================================

/// 在站点根目录下写一个文本文件（自动建父目录）
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("创建夹具目录失败");
    }
    fs::write(&path, content).expect("写夹具文件失败");
}

/// 把数据表序列化成 JSON 数据模块
pub fn write_json<T: serde::Serialize>(root: &Path, rel: &str, table: &T) {
    let json = serde_json::to_string_pretty(table).expect("序列化夹具数据失败");
    write_file(root, rel, &json);
}

// ==========================================
// 夹具数据表
// ==========================================

pub const WAREHOUSES: [&str; 4] = ["Chodziez", "Lobzenica", "Strozewo", "Wyszynki"];
pub const GROUPS: [&str; 4] = [
    "Labels",
    "Unit-Packaging",
    "Transport-Packaging",
    "Bulk-Packaging",
];
pub const KEY_CARTONS: [&str; 4] = [
    "K-369X285X84",
    "K-400X300X90",
    "K-580X390X90",
    "K-600X400X100",
];

pub fn sample_stock() -> StockTable {
    let mut records = Vec::new();

    // 关键纸箱: 两个仓库都有在库量
    for carton in KEY_CARTONS {
        for (warehouse, quantity, value) in
            [("Chodziez", 5200.0, 3900.0), ("Lobzenica", 3100.0, 2300.0)]
        {
            records.push(StockRecord {
                warehouse: warehouse.into(),
                item_index: carton.into(),
                group: "Transport-Packaging".into(),
                quantity,
                value,
            });
        }
    }

    // 其余物料组各给几条记录
    for (item, group, warehouse) in [
        ("E-RASP-250", "Labels", "Strozewo"),
        ("E-STRAW-500", "Labels", "Wyszynki"),
        ("P-125x12", "Unit-Packaging", "Chodziez"),
        ("P-250x8", "Unit-Packaging", "Lobzenica"),
        ("PAL-EUR", "Bulk-Packaging", "Strozewo"),
        ("FOIL-STRETCH", "Bulk-Packaging", "Wyszynki"),
        ("E-BLUE-125", "Labels", "Chodziez"),
        ("P-500x4", "Unit-Packaging", "Wyszynki"),
    ] {
        records.push(StockRecord {
            warehouse: warehouse.into(),
            item_index: item.into(),
            group: group.into(),
            quantity: 12_000.0,
            value: 11_500.0,
        });
    }

    StockTable {
        warehouses: WAREHOUSES.iter().map(|w| w.to_string()).collect(),
        groups: GROUPS.iter().map(|g| g.to_string()).collect(),
        records,
    }
}

/// 客户需求 600 000 kg / 产地供给 550 000 kg
pub fn sample_sales_plan() -> SalesPlanTable {
    let mut records = Vec::new();

    let customers: [(&str, f64); 6] = [
        ("OGL", 180_000.0),
        ("Biedronka", 120_000.0),
        ("Dino", 90_000.0),
        ("Frutania", 80_000.0),
        ("SanLucar", 70_000.0),
        ("Berry World", 60_000.0),
    ];
    for (subject, total) in customers {
        for (week, fruit) in [(24_u32, "Raspberry"), (28_u32, "Strawberry (tunnel)")] {
            records.push(SalesPlanRecord {
                subject_kind: SubjectKind::Customer,
                subject: subject.into(),
                week,
                fruit: fruit.into(),
                kg: total / 2.0,
            });
        }
    }

    let producers: [(&str, f64); 3] = [
        ("Malinowe Pola", 250_000.0),
        ("Jagodowa Dolina", 200_000.0),
        ("Gospodarstwo Stawski", 100_000.0),
    ];
    for (subject, total) in producers {
        for week in [24_u32, 28_u32] {
            records.push(SalesPlanRecord {
                subject_kind: SubjectKind::Producer,
                subject: subject.into(),
                week,
                fruit: "Raspberry".into(),
                kg: total / 2.0,
            });
        }
    }

    SalesPlanTable { records }
}

/// 计划客户 → 结算收货方
pub fn client_recipients() -> BTreeMap<String, Vec<String>> {
    let mut map = BTreeMap::new();
    map.insert(
        "OGL".to_string(),
        vec![
            "OGL FOOD TRADE POLAND".to_string(),
            "OGL FOOD TRADE GERMANY".to_string(),
        ],
    );
    map.insert(
        "Biedronka".to_string(),
        vec!["JERONIMO MARTINS POLSKA S.A.".to_string()],
    );
    map.insert("Dino".to_string(), vec!["DINO POLSKA S.A.".to_string()]);
    map.insert("Frutania".to_string(), vec!["FRUTANIA GMBH".to_string()]);
    map.insert(
        "SanLucar".to_string(),
        vec!["SANLUCAR FRUIT S.L.".to_string()],
    );
    map.insert(
        "Berry World".to_string(),
        vec!["BERRYWORLD EUROPE".to_string()],
    );
    map.insert(
        "Special Fruit".to_string(),
        vec!["SPECIAL FRUIT NV".to_string()],
    );
    map
}

fn group_of(client: &str) -> &'static str {
    match client {
        "OGL" => "OGL",
        "Biedronka" => "Jeronimo",
        "Dino" => "Dino",
        _ => "Others",
    }
}

/// 采购计划 640 000 kg（销售计划的 ≈ 1.07 倍）
pub fn sample_carton_plan() -> CartonPlanTable {
    let clients: [(&str, f64); 7] = [
        ("OGL", 190_000.0),
        ("Biedronka", 125_000.0),
        ("Dino", 95_000.0),
        ("Frutania", 84_000.0),
        ("SanLucar", 73_000.0),
        ("Berry World", 63_000.0),
        ("Special Fruit", 10_000.0),
    ];

    let rows = clients
        .iter()
        .map(|(client, kg_plan)| CartonDemandRow {
            client: client.to_string(),
            group: group_of(client).to_string(),
            // 草莓行给两个客户，其余走覆盆子
            fruit: if matches!(*client, "Frutania" | "SanLucar") {
                "Strawberry (tunnel)".into()
            } else {
                "Raspberry".into()
            },
            kg_plan: *kg_plan,
            avg_kgpk: Some(1.65),
            ratio: Some(1.05),
            packages: vec![
                PackageBreakdown {
                    package_code: "P-125x12".into(),
                    share_pct: 70.0,
                    kgpk: 1.5,
                    size_class: SizeClass::Small,
                },
                PackageBreakdown {
                    package_code: "P-400x6".into(),
                    share_pct: 30.0,
                    kgpk: 2.4,
                    size_class: SizeClass::Large,
                },
            ],
        })
        .collect();

    let mut group_totals = BTreeMap::new();
    for (group, prev, plan, kg) in [
        ("OGL", 130_000.0, 135_000.0, 190_000.0),
        ("Jeronimo", 80_000.0, 83_000.0, 125_000.0),
        ("Dino", 60_000.0, 63_000.0, 95_000.0),
        ("Others", 140_000.0, 145_000.0, 230_000.0),
    ] {
        group_totals.insert(
            group.to_string(),
            PlanTotals {
                cartons_prev: prev,
                cartons_plan: plan,
                kg_plan: kg,
            },
        );
    }

    CartonPlanTable {
        rows,
        totals: PlanTotals {
            cartons_prev: 410_000.0,
            cartons_plan: 426_000.0,
            kg_plan: 640_000.0,
        },
        group_totals,
        client_map: client_recipients(),
    }
}

fn packaging_record(recipient: &str, pak: &str, volume_kg: f64, week: u32) -> PackagingRecord {
    let (weight_g, units, kgpk, fruit) = match pak {
        "P-125x12" => (125.0, 12_u32, 1.5, "Raspberry"),
        _ => (400.0, 6_u32, 2.4, "Strawberry"),
    };
    let cartons = (volume_kg / kgpk).round();
    PackagingRecord {
        recipient: recipient.into(),
        package_code: pak.into(),
        fruit: Some(fruit.into()),
        week: Some(week),
        weight_g: Some(weight_g),
        units_per_carton: Some(units),
        kg_per_carton: Some(kgpk),
        cartons,
        units: cartons * f64::from(units),
        volume_kg,
    }
}

/// 2025 台账: 每个收货方两种包装，总量 ≈ 595 000 kg
pub fn sample_packaging() -> PackagingTable {
    let volumes: [(&str, f64); 8] = [
        ("OGL FOOD TRADE POLAND", 110_000.0),
        ("OGL FOOD TRADE GERMANY", 62_000.0),
        ("JERONIMO MARTINS POLSKA S.A.", 118_000.0),
        ("DINO POLSKA S.A.", 92_000.0),
        ("FRUTANIA GMBH", 78_000.0),
        ("SANLUCAR FRUIT S.L.", 68_000.0),
        ("BERRYWORLD EUROPE", 58_000.0),
        ("SPECIAL FRUIT NV", 9_000.0),
    ];

    let mut records = Vec::new();
    for (recipient, total) in volumes {
        records.push(packaging_record(recipient, "P-125x12", total * 0.7, 24));
        records.push(packaging_record(recipient, "P-400x6", total * 0.3, 30));
    }

    PackagingTable { year: 2025, records }
}

pub fn sample_usage() -> UsageTable {
    let mut warehouses: Vec<String> = WAREHOUSES.iter().map(|w| w.to_string()).collect();
    warehouses.push("Justynow".to_string()); // 消耗侧的临时仓库

    let mut records = Vec::new();
    for (material, warehouse, month) in [
        ("Label roll 100x50", "Chodziez", 5_u32),
        ("Label roll 100x50", "Lobzenica", 6),
        ("Label thermal 57x43", "Strozewo", 7),
        ("Carton blank K-400", "Chodziez", 6),
        ("Carton blank K-600", "Lobzenica", 7),
        ("Carton blank K-369", "Wyszynki", 8),
        ("Stretch foil 500mm", "Justynow", 9),
        ("Carton blank K-580", "Chodziez", 10),
    ] {
        records.push(UsageRecord {
            material_type: material.into(),
            warehouse: warehouse.into(),
            month,
            quantity: 2_500.0,
        });
    }

    UsageTable { warehouses, records }
}

pub fn sample_suppliers() -> SupplierTable {
    let suppliers = [
        ("TFP", "TFP Sp. z o.o.", "Poland"),
        ("OPAK", "Opakowania Wielkopolskie Sp. z o.o.", "Poland"),
        ("KRAFT_BOX", "Kraft-Box Zaklad Opakowan", "Poland"),
        ("STORAENSO", "Stora Enso Packaging", "Finland"),
        ("SAICA", "SAICA Pack", "Spain"),
        ("EUROBOX", "Eurobox Polska Sp. z o.o.", "Poland"),
        ("KENKEL", "Kenkel Opakowania Kartonowe", "Poland"),
    ]
    .into_iter()
    .map(|(id, name, country)| SupplierRecord {
        id: id.into(),
        name: name.into(),
        abbreviation: id.into(),
        country: country.into(),
        active: true,
    })
    .collect();

    SupplierTable { suppliers }
}

pub fn sample_carton_map() -> CartonMapTable {
    let mut map = BTreeMap::new();
    for (group, pak, index) in [
        ("OGL", "P-125x12", "K-400X300X90"),
        ("OGL", "P-400x6", "K-600X400X100"),
        ("Jeronimo", "P-125x12", "K-369X285X84"),
        ("Jeronimo", "P-400x6", "K-580X390X90"),
        ("Dino", "P-125x12", "K-400X300X90"),
        ("Dino", "P-400x6", "K-600X400X100"),
        ("Others", "P-125x12", "K-369X285X84"),
        ("Others", "P-400x6", "K-580X390X90"),
    ] {
        map.insert(CartonMapTable::key(group, pak), index.to_string());
    }

    let mut fallback = BTreeMap::new();
    for group in ["OGL", "Jeronimo", "Dino", "Others"] {
        fallback.insert(
            group.to_string(),
            SizeFallback {
                small: Some("K-400X300X90".to_string()),
                large: Some("K-600X400X100".to_string()),
            },
        );
    }

    CartonMapTable { map, fallback }
}

/// 写全部数据模块
pub fn write_data_modules(root: &Path) {
    write_json(root, "data/stock.json", &sample_stock());
    write_json(root, "data/sales_plan.json", &sample_sales_plan());
    write_json(root, "data/carton_plan.json", &sample_carton_plan());
    write_json(root, "data/packaging_usage.json", &sample_packaging());
    write_json(root, "data/material_usage.json", &sample_usage());
    write_json(root, "data/suppliers.json", &sample_suppliers());
    write_json(root, "data/carton_map.json", &sample_carton_map());
}

// ==========================================
// 夹具页面
// ==========================================

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{}</title>
  <style>body {{ font-family: sans-serif; }} .tool-row {{ display: block; }}</style>
</head>
<body>
{}
</body>
</html>
"#,
        title, body
    )
}

pub fn index_page() -> String {
    let gauges: String = (0..4)
        .map(|i| {
            format!(
                "  <svg viewBox=\"0 0 120 120\"><circle class=\"radial-fill\" r=\"54\" stroke-dasharray=\"{} 339\"/></svg>\n",
                60 + i * 40
            )
        })
        .collect();

    let body = format!(
        r#"<header><img src="logo.svg" alt="logo"></header>
<section class="goal-grid">
  <div class="goal-card"><h2>FULL SEASON</h2><p>Goal #1 · Jan</p></div>
  <div class="goal-card"><h2>HARVEST 50</h2><p>Goal #2 · Kacper</p></div>
  <div class="goal-card"><h2>NO COMPLAINTS</h2><p>Goal #3 · Olgierd</p></div>
  <div class="goal-card"><h2>PRODUCT X</h2><p>Goal #4 · Adrian</p></div>
</section>
{}
<a href="https://docs.google.com/spreadsheets/d/FIXTURE-SCOREBOARD/edit">Scoreboard</a>
<nav>
  <a class="tool-row" href="purchasing-planning.html">Purchasing</a>
  <a class="tool-row" href="packaging.html">Packaging</a>
  <a class="tool-row" href="planning-and-sales.html">Planning and sales</a>
  <a class="tool-row" href="settlements-rt.html">Settlements RT</a>
</nav>
"#,
        gauges
    );
    page_shell("FruitBoard 2026", &body)
}

pub fn hub_page() -> String {
    let body = r#"<a class="back-btn" href="index.html">Back</a>
<nav>
  <a class="sub-nav-item" href="purchasing-stock.html">Stock</a>
  <a class="sub-nav-item" href="purchasing-plan-2026.html">Plan 2026</a>
  <a class="sub-nav-item" href="purchasing-clients.html">Clients</a>
  <a class="sub-nav-item" href="purchasing-schedule.html">Schedule</a>
  <a class="sub-nav-item" href="carton-suppliers.html">Suppliers</a>
  <a class="sub-nav-item" href="usage-2025.html">Usage 2025</a>
</nav>
"#;
    page_shell("Purchasing planning", body)
}

pub fn sub_page(title: &str) -> String {
    let body = r#"<a class="back-btn" href="purchasing-planning.html">Back</a>
<main><p>Data table placeholder.</p></main>
"#;
    page_shell(title, body)
}

pub fn top_page(title: &str) -> String {
    let body = r#"<a class="back-btn" href="index.html">Back</a>
<main><p>Tool placeholder.</p></main>
"#;
    page_shell(title, body)
}

pub fn settlement_page() -> String {
    let body = r#"<a class="back-btn" href="index.html">Back</a>
<script src="https://cdn.sheetjs.com/xlsx-0.20.3/package/dist/xlsx.full.min.js"></script>
<main><p>Source workbook: Settlements RT 2025.xlsx</p></main>
"#;
    page_shell("Settlements RT", body)
}

/// 写全部页面
pub fn write_pages(root: &Path) {
    write_file(root, "index.html", &index_page());
    write_file(root, "purchasing-planning.html", &hub_page());
    for page in [
        "purchasing-stock.html",
        "purchasing-plan-2026.html",
        "purchasing-clients.html",
        "purchasing-schedule.html",
        "carton-suppliers.html",
        "usage-2025.html",
    ] {
        write_file(root, page, &sub_page(page));
    }
    write_file(root, "packaging.html", &top_page("Packaging"));
    write_file(root, "planning-and-sales.html", &top_page("Planning and sales"));
    write_file(root, "settlements-rt.html", &settlement_page());
}

/// 写静态资源与源表格占位文件
pub fn write_assets(root: &Path) {
    write_file(
        root,
        "logo.svg",
        r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 32 32"><circle cx="16" cy="16" r="14" fill="#c0314f"/></svg>"##,
    );

    let filler = "fixture workbook bytes ".repeat(64);
    for workbook in [
        "Settlements RT 2025.xlsx",
        "Planning and sales 2026.xlsx",
        "CARTONS SEASON 2025.xlsx",
        "Stock levels 25.02.2026.xlsx",
    ] {
        write_file(root, workbook, &filler);
    }
}

/// 一套全绿的夹具站点
pub fn write_passing_site(root: &Path) {
    write_data_modules(root);
    write_pages(root);
    write_assets(root);
}

// ==========================================
// 夹具配置与执行入口
// ==========================================

/// 与夹具体量匹配的阈值配置
///
/// 只缩小"记录条数/文件体量"类阈值，
/// 比值与容差保持生产默认值。
pub fn fixture_config() -> QaConfig {
    let mut config = QaConfig::default();
    config.site.data_module_min_bytes = 64;
    config.site.page_min_bytes = 64;
    config.site.index_min_bytes = 256;
    config.site.workbook_min_bytes = 16;
    config.stock.min_records = 8;
    config.usage.min_records = 6;
    config.plan.min_records = 8;
    config.plan.min_carton_rows = 5;
    config.packaging.min_records = 12;
    config.packaging.min_total_volume_kg = 100_000.0;
    config.carton_map.min_mappings = 8;
    config
}

/// 对站点执行指定套件，返回逐项结果与汇总
pub fn run_suites(
    root: &Path,
    config: &QaConfig,
    suites: &[Suite],
) -> (Vec<CheckOutcome>, RunSummary) {
    let loader = SiteLoader::new(root);
    let dataset = Dataset::load(&loader);
    let ctx = CheckContext {
        loader: &loader,
        dataset: &dataset,
        config,
    };

    let mut reporter = Reporter::new();
    for suite in suites {
        suite.run(&ctx, &mut reporter);
    }
    let outcomes = reporter.outcomes().to_vec();
    (outcomes, reporter.finish())
}

/// 全部套件
pub fn run_all(root: &Path, config: &QaConfig) -> (Vec<CheckOutcome>, RunSummary) {
    run_suites(root, config, &Suite::ALL)
}
