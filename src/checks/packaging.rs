// ==========================================
// 水果贸易看板数据校验系统 - 包装台账套件
// ==========================================
// 职责: 2025 结算台账取值、派生字段重算、
//       采购计划包装构成、客户级聚合与数量级核对
// ==========================================

use crate::checks::{marker_matches, preview, CheckContext};
use crate::domain::SubjectKind;
use crate::report::Reporter;
use anyhow::ensure;

pub fn run(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let th = &ctx.config.packaging;

    reporter.section("台账基本面");
    let Some(packaging) = reporter.gate("包装台账数据模块可用", &ctx.dataset.packaging) else {
        run_breakdown(ctx, reporter);
        return;
    };

    reporter.check(&format!("台账年份 = {}", th.expected_year), || {
        ensure!(
            packaging.year == th.expected_year,
            "年份 = {}",
            packaging.year
        );
        Ok(())
    });

    reporter.check(
        &format!("台账不少于 {} 条记录", th.min_records),
        || {
            ensure!(
                packaging.records.len() >= th.min_records,
                "只有 {} 条记录",
                packaging.records.len()
            );
            Ok(())
        },
    );

    reporter.check(
        &format!("全表销量大于 {:.0} kg", th.min_total_volume_kg),
        || {
            let total = packaging.total_volume_kg();
            ensure!(total > th.min_total_volume_kg, "合计 = {:.0} kg — 太少", total);
            Ok(())
        },
    );

    reporter.check(
        &format!("去重收货方多于 {} 个", th.min_unique_recipients),
        || {
            let count = packaging.recipients().len();
            ensure!(count > th.min_unique_recipients, "只有 {} 个收货方", count);
            Ok(())
        },
    );

    reporter.check("关键收货方在台账内", || {
        let recipients: Vec<&str> = packaging.recipients().into_iter().collect();
        let missing: Vec<_> = th
            .key_recipient_markers
            .iter()
            .filter(|m| !marker_matches(&recipients, m))
            .cloned()
            .collect();
        ensure!(missing.is_empty(), "缺收货方字样: {}", missing.join(", "));
        Ok(())
    });

    reporter.check("关键水果品类在台账内", || {
        let fruits = packaging.fruits();
        let missing: Vec<_> = th
            .key_fruits
            .iter()
            .filter(|f| !fruits.contains(f.as_str()))
            .cloned()
            .collect();
        ensure!(
            missing.is_empty(),
            "缺品类: {} — 现有: {}",
            missing.join(", "),
            preview(fruits.iter().map(|f| f.to_string()), 6)
        );
        Ok(())
    });

    reporter.check(
        &format!("结算周均不大于 {}", th.week_max),
        || {
            let bad = packaging
                .records
                .iter()
                .filter(|r| r.week.is_some_and(|w| w > th.week_max))
                .count();
            ensure!(bad == 0, "{} 条记录结算周越界", bad);
            Ok(())
        },
    );

    reporter.section("重量与派生字段");
    reporter.check(
        &format!(
            "单件重量在 {:.0}–{:.0} g 且缺失占比低于 {:.0}%",
            th.weight_band_g.min, th.weight_band_g.max, th.max_missing_weight_pct
        ),
        || {
            let with_weight: Vec<_> = packaging
                .records
                .iter()
                .filter(|r| r.weight_g.is_some())
                .collect();
            let out_of_band: Vec<_> = with_weight
                .iter()
                .filter(|r| !th.weight_band_g.contains(r.weight_g.unwrap_or(0.0)))
                .collect();
            ensure!(
                out_of_band.is_empty(),
                "{} 条记录重量越界: {}",
                out_of_band.len(),
                preview(
                    out_of_band
                        .iter()
                        .map(|r| format!("{}={:?}g", r.package_code, r.weight_g)),
                    3
                )
            );

            let missing_pct = (packaging.records.len() - with_weight.len()) as f64
                / packaging.records.len() as f64
                * 100.0;
            ensure!(
                missing_pct < th.max_missing_weight_pct,
                "{:.1}% 记录缺重量 — 太多",
                missing_pct
            );
            Ok(())
        },
    );

    reporter.check(
        &format!(
            "kg_per_carton 与 weight_g × units / 1000 一致（容差 {}）",
            th.kgpk_tolerance
        ),
        || {
            let bad: Vec<_> = packaging
                .records
                .iter()
                .filter_map(|r| {
                    let stored = r.kg_per_carton?;
                    let expected = r.recomputed_kgpk()?;
                    ((stored - expected).abs() > th.kgpk_tolerance)
                        .then(|| format!("{}: 存 {} vs 算 {:.3}", r.package_code, stored, expected))
                })
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 条记录 kgpk 不一致: {}",
                bad.len(),
                preview(bad.into_iter(), 3)
            );
            Ok(())
        },
    );

    reporter.section("数量非负");
    reporter.check("所有记录 volume_kg >= 0", || {
        let neg = packaging.records.iter().filter(|r| r.volume_kg < 0.0).count();
        ensure!(neg == 0, "{} 条记录销量为负", neg);
        Ok(())
    });

    reporter.check("所有记录 cartons >= 0", || {
        let neg = packaging.records.iter().filter(|r| r.cartons < 0.0).count();
        ensure!(neg == 0, "{} 条记录纸箱数为负", neg);
        Ok(())
    });

    reporter.check("所有记录 units >= 0", || {
        let neg = packaging.records.iter().filter(|r| r.units < 0.0).count();
        ensure!(neg == 0, "{} 条记录件数为负", neg);
        Ok(())
    });

    reporter.section("填充率");
    reporter.check(
        &format!("kg_per_carton > 0 的记录超过 {:.0}%", th.min_filled_kgpk_pct),
        || {
            let filled = packaging
                .records
                .iter()
                .filter(|r| r.kg_per_carton.is_some_and(|v| v > 0.0))
                .count();
            let pct = filled as f64 / packaging.records.len() as f64 * 100.0;
            ensure!(pct > th.min_filled_kgpk_pct, "只有 {:.1}% 记录 kgpk > 0", pct);
            Ok(())
        },
    );

    reporter.check(
        &format!("units_per_carton > 0 的记录超过 {:.0}%", th.min_filled_units_pct),
        || {
            let filled = packaging
                .records
                .iter()
                .filter(|r| r.units_per_carton.is_some_and(|v| v > 0))
                .count();
            let pct = filled as f64 / packaging.records.len() as f64 * 100.0;
            ensure!(
                pct > th.min_filled_units_pct,
                "只有 {:.1}% 记录每箱件数 > 0",
                pct
            );
            Ok(())
        },
    );

    reporter.check(
        &format!("volume_kg > 0 的记录不低于 {:.0}%", th.min_positive_volume_pct),
        || {
            let zero = packaging
                .records
                .iter()
                .filter(|r| !(r.volume_kg > 0.0))
                .count();
            let pct = 100.0 - zero as f64 / packaging.records.len() as f64 * 100.0;
            ensure!(
                pct >= th.min_positive_volume_pct,
                "只有 {:.1}% 记录销量为正",
                pct
            );
            Ok(())
        },
    );

    run_breakdown(ctx, reporter);
    run_client_aggregation(ctx, reporter);
}

/// 采购计划行的派生字段与包装构成
fn run_breakdown(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let th = &ctx.config.packaging;

    reporter.section("采购计划包装构成");
    let Some(carton) = reporter.gate("采购计划数据模块可用", &ctx.dataset.carton_plan) else {
        return;
    };

    reporter.check(
        &format!(
            "行均 kgpk 在 {:.1}–{:.1}",
            th.avg_kgpk_band.min, th.avg_kgpk_band.max
        ),
        || {
            let bad: Vec<_> = carton
                .rows
                .iter()
                .filter(|r| r.avg_kgpk.is_some_and(|v| !th.avg_kgpk_band.contains(v)))
                .map(|r| format!("{}/{}={:?}", r.client, r.fruit, r.avg_kgpk))
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 行越界: {}",
                bad.len(),
                preview(bad.into_iter(), 3)
            );
            Ok(())
        },
    );

    reporter.check(
        &format!(
            "计划/实绩比值在 {:.2}–{:.0}",
            th.yearly_ratio_band.min, th.yearly_ratio_band.max
        ),
        || {
            let bad: Vec<_> = carton
                .rows
                .iter()
                .filter(|r| r.ratio.is_some_and(|v| !th.yearly_ratio_band.contains(v)))
                .map(|r| format!("{}/{}={:?}", r.client, r.fruit, r.ratio))
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 行比值极端: {}",
                bad.len(),
                preview(bad.into_iter(), 3)
            );
            Ok(())
        },
    );

    reporter.check(
        &format!(
            "包装构成 kgpk 在 {:.1}–{:.0}",
            th.package_kgpk_band.min, th.package_kgpk_band.max
        ),
        || {
            let bad: Vec<_> = carton
                .rows
                .iter()
                .flat_map(|r| r.packages.iter())
                .filter(|p| !th.package_kgpk_band.contains(p.kgpk))
                .map(|p| format!("{}={}", p.package_code, p.kgpk))
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 个包装 kgpk 越界: {}",
                bad.len(),
                preview(bad.into_iter(), 5)
            );
            Ok(())
        },
    );

    reporter.check("包装份额均在 0–100%", || {
        let bad = carton
            .rows
            .iter()
            .flat_map(|r| r.packages.iter())
            .filter(|p| !th.share_band.contains(p.share_pct))
            .count();
        ensure!(bad == 0, "{} 个包装份额越界", bad);
        Ok(())
    });

    reporter.check(
        &format!(
            "每行份额合计 ≈ 100%（容差 {:.0} 个百分点）",
            th.share_sum_tolerance_pct
        ),
        || {
            let bad: Vec<_> = carton
                .rows
                .iter()
                .filter(|r| !r.packages.is_empty())
                .filter(|r| (r.share_sum() - 100.0).abs() > th.share_sum_tolerance_pct)
                .map(|r| format!("{}/{}={:.1}%", r.client, r.fruit, r.share_sum()))
                .collect();
            ensure!(
                bad.is_empty(),
                "{} 行份额合计偏离 100%: {}",
                bad.len(),
                preview(bad.into_iter(), 3)
            );
            Ok(())
        },
    );
}

/// 客户级聚合: 模拟客户页的构建逻辑，
/// 提前暴露"页面会显示「无实绩」"的数据缺口
fn run_client_aggregation(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let th = &ctx.config.packaging;

    reporter.section("客户级聚合");
    let Some(packaging) = reporter.gate("包装台账数据模块可用", &ctx.dataset.packaging) else {
        return;
    };
    let Some(carton) = reporter.gate("采购计划数据模块可用", &ctx.dataset.carton_plan) else {
        return;
    };

    for (client, recipients) in &carton.client_map {
        reporter.check(&format!("客户 {} 在台账有实绩", client), || {
            let records: Vec<_> = packaging.records_of_recipients(recipients).collect();
            ensure!(
                !records.is_empty(),
                "0 条记录对应 {} — 客户页会显示「无实绩」",
                recipients.join(", ")
            );

            let kg: f64 = records.iter().map(|r| r.volume_kg).sum();
            ensure!(kg > th.min_client_kg, "实绩销量 = {:.0} kg — 可疑地小", kg);

            let cartons: f64 = records.iter().map(|r| r.cartons).sum();
            ensure!(
                cartons > th.min_client_cartons,
                "实绩纸箱量 = {:.0} — 可疑地少",
                cartons
            );
            Ok(())
        });
    }

    reporter.check("每个映射客户至少一个包装码 kgpk > 0", || {
        let bad: Vec<_> = carton
            .client_map
            .iter()
            .filter(|(_, recipients)| {
                !packaging
                    .records_of_recipients(recipients)
                    .any(|r| r.kg_per_carton.is_some_and(|v| v > 0.0))
            })
            .map(|(client, _)| client.clone())
            .collect();
        ensure!(
            bad.is_empty(),
            "无可用 kgpk 的客户: {} — 纸箱设计无法进行",
            bad.join(", ")
        );
        Ok(())
    });

    // 数量级核对: 计划不应偏离上年实绩一个数量级以上
    if let Some(sales) = reporter.gate("销售计划数据模块可用", &ctx.dataset.sales_plan) {
        reporter.check(
            &format!(
                "客户级 计划/实绩 比值在 {:.2}–{:.0}",
                th.client_ratio_band.min, th.client_ratio_band.max
            ),
            || {
                let mut suspicious = Vec::new();
                for (client, recipients) in &carton.client_map {
                    let actual_kg = packaging.volume_of_recipients(recipients);
                    let plan_kg = sales.total_kg_of_subject(SubjectKind::Customer, client);
                    // 任一侧为 0 时跳过（新客户或停用客户）
                    if actual_kg == 0.0 || plan_kg == 0.0 {
                        continue;
                    }
                    let ratio = plan_kg / actual_kg;
                    if !th.client_ratio_band.contains(ratio) {
                        suspicious.push(format!(
                            "{}: 计划 {:.0} kg vs 实绩 {:.0} kg, 比值 {:.2}",
                            client, plan_kg, actual_kg, ratio
                        ));
                    }
                }
                ensure!(
                    suspicious.is_empty(),
                    "{} 个客户数量级可疑: {}",
                    suspicious.len(),
                    preview(suspicious.into_iter(), 3)
                );
                Ok(())
            },
        );
    }
}
