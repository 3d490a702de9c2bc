// ==========================================
// 水果贸易看板数据校验系统 - 容差与阈值配置
// ==========================================
// 职责: 把各检查的经验阈值集中为可覆盖的配置项
// ==========================================
// 这些阈值来自业务侧多年经验（如 ±2% 份额容差、
// 0.7–1.3 年度比值带），意图未见书面化；因此一律
// 做成配置项并保留现值为默认值，调整须经业务确认。
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Band - 数值区间
// ==========================================

/// 闭区间 [min, max]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// 值是否落在区间内（闭区间）
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

// ==========================================
// SiteThresholds - 站点文件阈值
// ==========================================

/// 站点文件体量下限（防空文件/截断文件混入发布）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteThresholds {
    pub data_module_min_bytes: u64, // 数据模块文件体量下限
    pub page_min_bytes: u64,        // 普通页面体量下限
    pub index_min_bytes: u64,       // 首页体量下限（主看板更大）
    pub workbook_min_bytes: u64,    // 源表格文件体量下限
    pub min_gauge_count: usize,     // 首页仪表元素个数下限
}

impl Default for SiteThresholds {
    fn default() -> Self {
        Self {
            data_module_min_bytes: 1024,
            page_min_bytes: 1024,
            index_min_bytes: 10 * 1024,
            workbook_min_bytes: 100 * 1024,
            min_gauge_count: 4,
        }
    }
}

// ==========================================
// StockThresholds - 库存检查阈值
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StockThresholds {
    pub min_records: usize,               // 记录条数下限
    pub expected_warehouse_count: usize,  // 权威仓库个数
    pub required_warehouses: Vec<String>, // 必须出现的仓库
    pub required_groups: Vec<String>,     // 必须有记录的物料组
    pub key_cartons: Vec<String>,         // 必须在库的关键纸箱索引
    pub min_total_value: f64,             // 全表金额下限
}

impl Default for StockThresholds {
    fn default() -> Self {
        Self {
            min_records: 100,
            expected_warehouse_count: 4,
            required_warehouses: vec![
                "Chodziez".into(),
                "Lobzenica".into(),
                "Strozewo".into(),
                "Wyszynki".into(),
            ],
            required_groups: vec![
                "Labels".into(),
                "Unit-Packaging".into(),
                "Transport-Packaging".into(),
                "Bulk-Packaging".into(),
            ],
            key_cartons: vec![
                "K-369X285X84".into(),
                "K-400X300X90".into(),
                "K-580X390X90".into(),
                "K-600X400X100".into(),
            ],
            min_total_value: 100_000.0,
        }
    }
}

// ==========================================
// UsageThresholds - 消耗检查阈值
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageThresholds {
    pub min_records: usize,                    // 记录条数下限
    pub max_missing_warehouses: usize,         // 库存仓库允许缺席的个数
    pub required_material_markers: Vec<String>, // 物料类型必须覆盖的族名字样
}

impl Default for UsageThresholds {
    fn default() -> Self {
        Self {
            min_records: 100,
            max_missing_warehouses: 1,
            required_material_markers: vec!["Label".into(), "Carton".into()],
        }
    }
}

// ==========================================
// PlanThresholds - 计划检查阈值
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanThresholds {
    pub min_records: usize,              // 销售计划记录条数下限
    pub week_min: u32,                   // 计划周下界
    pub week_max: u32,                   // 计划周上界
    pub key_clients: Vec<String>,        // 必须出现的客户
    pub key_fruits: Vec<String>,         // 必须出现的水果（按词首匹配）
    pub min_customer_kg: f64,            // 客户需求合计下限
    pub min_producer_kg: f64,            // 产地供给合计下限
    pub min_coverage_ratio: f64,         // 供给覆盖率门槛
    pub min_carton_rows: usize,          // 采购计划行数下限
    pub min_cartons_plan: f64,           // 计划纸箱量下限
    pub min_kg_plan: f64,                // 计划销量下限
    pub max_carton_drop_ratio: f64,      // 计划纸箱量对上年实绩的最大跌幅比
    pub sales_ratio_band: Band,          // 采购计划销量 / 销售计划 比值带
    pub carton_plan_clients: Vec<String>, // 采购计划必须覆盖的客户
    pub required_groups: Vec<String>,    // group_totals 必须覆盖的客户组
    pub lead_group: String,              // 体量最大的客户组
    pub min_lead_group_cartons: f64,     // 该组计划纸箱量下限
    pub max_unmapped_plan_clients: usize, // 销售计划客户允许暂缺 client_map 的个数
}

impl Default for PlanThresholds {
    fn default() -> Self {
        let key_clients = vec![
            "OGL".to_string(),
            "Biedronka".to_string(),
            "Dino".to_string(),
            "Frutania".to_string(),
            "SanLucar".to_string(),
            "Berry World".to_string(),
        ];
        let mut carton_plan_clients = key_clients.clone();
        carton_plan_clients.push("Special Fruit".to_string());

        Self {
            min_records: 100,
            week_min: 1,
            week_max: 52,
            key_clients,
            key_fruits: vec!["Raspberry".into(), "Strawberry".into()],
            min_customer_kg: 500_000.0,
            min_producer_kg: 500_000.0,
            min_coverage_ratio: 0.8,
            min_carton_rows: 10,
            min_cartons_plan: 400_000.0,
            min_kg_plan: 500_000.0,
            max_carton_drop_ratio: 0.5,
            sales_ratio_band: Band::new(0.7, 1.3),
            carton_plan_clients,
            required_groups: vec![
                "OGL".into(),
                "Jeronimo".into(),
                "Dino".into(),
                "Others".into(),
            ],
            lead_group: "OGL".into(),
            min_lead_group_cartons: 100_000.0,
            max_unmapped_plan_clients: 2,
        }
    }
}

// ==========================================
// PackagingThresholds - 包装台账检查阈值
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingThresholds {
    pub expected_year: i32,              // 台账年份
    pub min_records: usize,              // 记录条数下限
    pub min_total_volume_kg: f64,        // 全表销量下限
    pub min_unique_recipients: usize,    // 收货方去重个数须大于该值
    pub key_recipient_markers: Vec<String>, // 必须出现的收货方字样（词首匹配）
    pub key_fruits: Vec<String>,         // 必须出现的水果品类（精确匹配）
    pub week_max: u32,                   // 结算周上界（0 合法: 年初未分配）
    pub weight_band_g: Band,             // 单件重量区间（克）
    pub max_missing_weight_pct: f64,     // 重量缺失占比上限（百分比）
    pub kgpk_tolerance: f64,             // 每箱公斤数重算容差（绝对值）
    pub min_filled_kgpk_pct: f64,        // kgpk > 0 记录占比下限
    pub min_filled_units_pct: f64,       // 每箱件数 > 0 记录占比下限
    pub min_positive_volume_pct: f64,    // 销量 > 0 记录占比下限
    pub avg_kgpk_band: Band,             // 行均 kgpk 区间
    pub yearly_ratio_band: Band,         // 计划/实绩 比值区间（行级）
    pub package_kgpk_band: Band,         // 包装构成 kgpk 区间
    pub share_band: Band,                // 份额区间（百分比）
    pub share_sum_tolerance_pct: f64,    // 行内份额合计对 100% 的容差
    pub client_ratio_band: Band,         // 客户级 计划/实绩 数量级区间
    pub min_client_kg: f64,              // 映射客户实绩销量下限
    pub min_client_cartons: f64,         // 映射客户实绩纸箱量下限
}

impl Default for PackagingThresholds {
    fn default() -> Self {
        Self {
            expected_year: 2025,
            min_records: 1000,
            min_total_volume_kg: 1_000_000.0,
            min_unique_recipients: 5,
            key_recipient_markers: vec!["OGL".into(), "JERONIMO".into()],
            key_fruits: vec!["Raspberry".into(), "Strawberry".into()],
            week_max: 52,
            weight_band_g: Band::new(50.0, 2000.0),
            max_missing_weight_pct: 2.0,
            kgpk_tolerance: 0.01,
            min_filled_kgpk_pct: 95.0,
            min_filled_units_pct: 95.0,
            min_positive_volume_pct: 99.0,
            avg_kgpk_band: Band::new(0.5, 10.0),
            yearly_ratio_band: Band::new(0.01, 10.0),
            package_kgpk_band: Band::new(0.5, 8.0),
            share_band: Band::new(0.0, 100.0),
            share_sum_tolerance_pct: 2.0,
            client_ratio_band: Band::new(0.02, 10.0),
            min_client_kg: 1000.0,
            min_client_cartons: 100.0,
        }
    }
}

// ==========================================
// SupplierThresholds - 供应商检查阈值
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierThresholds {
    pub min_suppliers: usize,        // 供应商个数下限
    pub key_suppliers: Vec<String>,  // 必须在册且在用的供应商 id
    pub domestic_country: String,    // 本国国别名
    pub min_domestic: usize,         // 本国供应商个数下限
}

impl Default for SupplierThresholds {
    fn default() -> Self {
        Self {
            min_suppliers: 5,
            key_suppliers: vec![
                "TFP".into(),
                "OPAK".into(),
                "KRAFT_BOX".into(),
                "STORAENSO".into(),
                "SAICA".into(),
                "EUROBOX".into(),
                "KENKEL".into(),
            ],
            domestic_country: "Poland".into(),
            min_domestic: 5,
        }
    }
}

// ==========================================
// CartonMapThresholds - 纸箱映射检查阈值
// ==========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CartonMapThresholds {
    pub min_mappings: usize,                // 精确映射条数下限
    pub required_fallback_groups: Vec<String>, // 回退必须覆盖的客户组
    pub max_unmapped_pct: f64,              // 采购计划包装键未命中占比上限
    pub max_unmapped_client_names: usize,   // client_map 收货方名未命中条数上限
}

impl Default for CartonMapThresholds {
    fn default() -> Self {
        Self {
            min_mappings: 50,
            required_fallback_groups: vec![
                "OGL".into(),
                "Jeronimo".into(),
                "Dino".into(),
                "Others".into(),
            ],
            max_unmapped_pct: 10.0,
            max_unmapped_client_names: 3,
        }
    }
}
