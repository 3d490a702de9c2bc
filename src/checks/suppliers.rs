// ==========================================
// 水果贸易看板数据校验系统 - 供应商与纸箱映射套件
// ==========================================
// 职责: 供应商名册完整性、纸箱映射结构、
//       采购计划包装键的映射覆盖率
// ==========================================

use crate::checks::{preview, CheckContext};
use crate::domain::carton_map::{CARTON_INDEX_PREFIX, KEY_SEPARATOR};
use crate::report::Reporter;
use anyhow::ensure;

pub fn run(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let th = &ctx.config.suppliers;

    reporter.section("供应商名册");
    if let Some(suppliers) = reporter.gate("供应商数据模块可用", &ctx.dataset.suppliers) {
        reporter.check(
            &format!("供应商不少于 {} 家", th.min_suppliers),
            || {
                ensure!(
                    suppliers.suppliers.len() >= th.min_suppliers,
                    "只有 {} 家",
                    suppliers.suppliers.len()
                );
                Ok(())
            },
        );

        reporter.check("供应商 id 全表唯一", || {
            let dups = suppliers.duplicate_ids();
            ensure!(
                dups.is_empty(),
                "重复 id: {}",
                dups.join(", ")
            );
            Ok(())
        });

        for id in &th.key_suppliers {
            reporter.check(&format!("供应商 {} 在册且在用", id), || {
                let supplier = suppliers
                    .find(id)
                    .ok_or_else(|| anyhow::anyhow!("名册内无此供应商"))?;
                ensure!(supplier.active, "已标记停用");
                Ok(())
            });
        }

        reporter.check(
            &format!(
                "{} 供应商不少于 {} 家",
                th.domestic_country, th.min_domestic
            ),
            || {
                let count = suppliers.count_from(&th.domestic_country);
                ensure!(count >= th.min_domestic, "只有 {} 家", count);
                Ok(())
            },
        );
    }

    let th = &ctx.config.carton_map;

    reporter.section("纸箱映射结构");
    let Some(map) = reporter.gate("纸箱映射数据模块可用", &ctx.dataset.carton_map) else {
        return;
    };

    reporter.check("回退映射覆盖全部客户组", || {
        let missing: Vec<_> = th
            .required_fallback_groups
            .iter()
            .filter(|g| !map.fallback.contains_key(*g))
            .cloned()
            .collect();
        ensure!(missing.is_empty(), "缺客户组回退: {}", missing.join(", "));
        Ok(())
    });

    reporter.check("每个客户组回退两档齐备", || {
        let incomplete: Vec<_> = map
            .fallback
            .iter()
            .filter(|(_, fb)| fb.small.is_none() || fb.large.is_none())
            .map(|(group, fb)| {
                let gap = if fb.small.is_none() { "SMALL" } else { "LARGE" };
                format!("{} 缺 {}", group, gap)
            })
            .collect();
        ensure!(incomplete.is_empty(), "{}", incomplete.join("; "));
        Ok(())
    });

    reporter.check(
        &format!("精确映射不少于 {} 条", th.min_mappings),
        || {
            ensure!(
                map.map.len() >= th.min_mappings,
                "只有 {} 条映射",
                map.map.len()
            );
            Ok(())
        },
    );

    reporter.check(
        &format!("映射键均为 \"组{}包装码\" 形式", KEY_SEPARATOR),
        || {
            let bad: Vec<_> = map
                .map
                .keys()
                .filter(|k| !k.contains(KEY_SEPARATOR))
                .cloned()
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 个键缺分隔符: {}",
                bad.len(),
                preview(bad.into_iter(), 5)
            );
            Ok(())
        },
    );

    reporter.check(
        &format!("映射值均为 {} 前缀的纸箱索引", CARTON_INDEX_PREFIX),
        || {
            let bad: Vec<_> = map
                .map
                .iter()
                .filter(|(_, v)| !v.starts_with(CARTON_INDEX_PREFIX))
                .map(|(k, v)| format!("{}→{}", k, v))
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 条映射值不是纸箱索引: {}",
                bad.len(),
                preview(bad.into_iter(), 3)
            );
            Ok(())
        },
    );

    reporter.section("映射覆盖率");
    let Some(carton) = reporter.gate("采购计划数据模块可用", &ctx.dataset.carton_plan) else {
        return;
    };

    reporter.check(
        &format!(
            "采购计划包装键命中映射或回退（未命中低于 {:.0}%）",
            th.max_unmapped_pct
        ),
        || {
            let keys = carton.package_keys();
            ensure!(!keys.is_empty(), "采购计划没有展开出任何包装键");

            // 允许少量未命中吸收新包装码，超限才视为映射腐化
            let unmapped: Vec<_> = keys
                .iter()
                .filter(|(group, pak, size)| map.resolve(group, pak, *size).is_none())
                .map(|(group, pak, _)| format!("{}{}{}", group, KEY_SEPARATOR, pak))
                .collect();

            let pct = unmapped.len() as f64 / keys.len() as f64 * 100.0;
            ensure!(
                pct < th.max_unmapped_pct,
                "{:.1}% 未命中（{}/{}）: {}",
                pct,
                unmapped.len(),
                keys.len(),
                preview(unmapped.into_iter(), 5)
            );
            Ok(())
        },
    );
}
