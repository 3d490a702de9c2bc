// ==========================================
// 水果贸易看板数据校验系统 - 库存与消耗套件
// ==========================================
// 职责: 库存记录取值、仓库外键、物料组覆盖、
//       关键纸箱在库、包材消耗历史数据
// ==========================================

use crate::checks::{preview, CheckContext};
use crate::report::Reporter;
use anyhow::ensure;

pub fn run(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let th = &ctx.config.stock;

    reporter.section("库存记录取值");
    let Some(stock) = reporter.gate("库存数据模块可用", &ctx.dataset.stock) else {
        run_usage(ctx, reporter, None);
        return;
    };

    reporter.check("所有库存记录 quantity >= 0", || {
        let neg: Vec<_> = stock.records.iter().filter(|r| r.quantity < 0.0).collect();
        ensure!(
            neg.is_empty(),
            "{} 条记录数量为负: {}",
            neg.len(),
            preview(
                neg.iter()
                    .map(|r| format!("{}@{}={}", r.item_index, r.warehouse, r.quantity)),
                3
            )
        );
        Ok(())
    });

    reporter.check("所有库存记录 value >= 0", || {
        let neg = stock.records.iter().filter(|r| r.value < 0.0).count();
        ensure!(neg == 0, "{} 条记录金额为负", neg);
        Ok(())
    });

    reporter.check(
        &format!("库存记录不少于 {} 条", th.min_records),
        || {
            ensure!(
                stock.records.len() >= th.min_records,
                "只有 {} 条记录",
                stock.records.len()
            );
            Ok(())
        },
    );

    reporter.section("仓库口径");
    reporter.check(
        &format!("权威仓库清单恰好 {} 个", th.expected_warehouse_count),
        || {
            ensure!(
                stock.warehouses.len() == th.expected_warehouse_count,
                "{} 个仓库: {}",
                stock.warehouses.len(),
                stock.warehouses.join(", ")
            );
            Ok(())
        },
    );

    reporter.check("必备仓库全部在清单内", || {
        let missing: Vec<_> = th
            .required_warehouses
            .iter()
            .filter(|w| !stock.warehouses.contains(w))
            .cloned()
            .collect();
        ensure!(missing.is_empty(), "缺仓库: {}", missing.join(", "));
        Ok(())
    });

    reporter.check("每条记录的仓库都能在清单内解析", || {
        let bad: Vec<_> = stock
            .records
            .iter()
            .filter(|r| !stock.warehouses.contains(&r.warehouse))
            .collect();
        ensure!(
            bad.is_empty(),
            "{} 条记录引用未知仓库: {}",
            bad.len(),
            preview(
                bad.iter().map(|r| r.warehouse.clone()).collect::<std::collections::BTreeSet<_>>(),
                5
            )
        );
        Ok(())
    });

    reporter.section("物料组覆盖");
    for group in &th.required_groups {
        reporter.check(&format!("物料组 \"{}\" 有记录", group), || {
            let count = stock.count_in_group(group);
            ensure!(count > 0, "该组 0 条记录");
            Ok(())
        });
    }

    reporter.section("关键纸箱在库");
    for carton in &th.key_cartons {
        reporter.check(&format!("纸箱 {} 在库且总量为正", carton), || {
            let records = stock
                .records
                .iter()
                .filter(|r| r.item_index == *carton)
                .count();
            ensure!(records > 0, "库存表内无此纸箱");
            let total = stock.total_quantity_of(carton);
            ensure!(total > 0.0, "跨仓库合计在库量 = {}", total);
            Ok(())
        });
    }

    reporter.section("库存金额");
    reporter.check(
        &format!("全表金额合计大于 {}", th.min_total_value),
        || {
            let total = stock.total_value();
            ensure!(
                total > th.min_total_value,
                "合计 = {:.0} — 可疑地低",
                total
            );
            Ok(())
        },
    );

    run_usage(ctx, reporter, Some(stock));
}

/// 消耗数据小节（库存表缺席时仍执行独立部分）
fn run_usage(
    ctx: &CheckContext<'_>,
    reporter: &mut Reporter,
    stock: Option<&crate::domain::StockTable>,
) {
    let th = &ctx.config.usage;

    reporter.section("包材消耗历史");
    let Some(usage) = reporter.gate("消耗数据模块可用", &ctx.dataset.usage) else {
        return;
    };

    reporter.check(
        &format!("消耗记录不少于 {} 条", th.min_records),
        || {
            ensure!(
                usage.records.len() >= th.min_records,
                "只有 {} 条记录",
                usage.records.len()
            );
            Ok(())
        },
    );

    reporter.check("所有消耗记录 quantity > 0", || {
        let bad = usage.records.iter().filter(|r| r.quantity <= 0.0).count();
        ensure!(bad == 0, "{} 条记录数量 <= 0", bad);
        Ok(())
    });

    reporter.check("消耗月份均在 1–12", || {
        let bad: Vec<_> = usage
            .records
            .iter()
            .filter(|r| r.month < 1 || r.month > 12)
            .collect();
        ensure!(
            bad.is_empty(),
            "{} 条记录月份越界: {}",
            bad.len(),
            preview(bad.iter().map(|r| r.month.to_string()), 3)
        );
        Ok(())
    });

    if let Some(stock) = stock {
        reporter.check(
            &format!(
                "库存仓库被消耗仓库涵盖（最多缺 {} 个）",
                th.max_missing_warehouses
            ),
            || {
                // 消耗侧可以多出临时仓库，但主仓库不能缺
                let usage_set = usage.warehouse_set();
                let missing: Vec<_> = stock
                    .warehouses
                    .iter()
                    .filter(|w| !usage_set.contains(w.as_str()))
                    .cloned()
                    .collect();
                ensure!(
                    missing.len() <= th.max_missing_warehouses,
                    "消耗数据缺仓库: {}",
                    missing.join(", ")
                );
                Ok(())
            },
        );
    }
}
