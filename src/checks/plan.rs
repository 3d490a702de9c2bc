// ==========================================
// 水果贸易看板数据校验系统 - 计划一致性套件
// ==========================================
// 职责: 销售计划取值与完整性、供需平衡、
//       纸箱采购计划合计与客户覆盖
// ==========================================

use crate::checks::{marker_matches, preview, CheckContext};
use crate::domain::SubjectKind;
use crate::report::Reporter;
use anyhow::ensure;

pub fn run(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    let th = &ctx.config.plan;

    reporter.section("销售计划结构");
    let sales = reporter.gate("销售计划数据模块可用", &ctx.dataset.sales_plan);

    if let Some(sales) = sales {
        reporter.check(
            &format!("销售计划不少于 {} 条记录", th.min_records),
            || {
                ensure!(
                    sales.records.len() >= th.min_records,
                    "只有 {} 条记录",
                    sales.records.len()
                );
                Ok(())
            },
        );

        reporter.check("客户侧与产地侧记录都在", || {
            ensure!(
                sales.records_of(SubjectKind::Customer).next().is_some(),
                "没有 customer 侧记录"
            );
            ensure!(
                sales.records_of(SubjectKind::Producer).next().is_some(),
                "没有 producer 侧记录"
            );
            Ok(())
        });

        reporter.check(
            &format!("计划周均在 {}–{}", th.week_min, th.week_max),
            || {
                let bad = sales
                    .records
                    .iter()
                    .filter(|r| r.week < th.week_min || r.week > th.week_max)
                    .count();
                ensure!(bad == 0, "{} 条记录计划周越界", bad);
                Ok(())
            },
        );

        reporter.check("所有记录 kg > 0", || {
            let bad = sales.records.iter().filter(|r| !(r.kg > 0.0)).count();
            ensure!(bad == 0, "{} 条记录 kg <= 0", bad);
            Ok(())
        });

        reporter.section("关键客户与品类");
        reporter.check("关键客户全部在计划内", || {
            let clients = sales.subjects(SubjectKind::Customer);
            let missing: Vec<_> = th
                .key_clients
                .iter()
                .filter(|c| !clients.contains(c.as_str()))
                .cloned()
                .collect();
            ensure!(missing.is_empty(), "缺客户: {}", missing.join(", "));
            Ok(())
        });

        reporter.check("关键水果品类在计划内", || {
            let fruits: Vec<&str> = sales.fruits().into_iter().collect();
            let missing: Vec<_> = th
                .key_fruits
                .iter()
                .filter(|f| !marker_matches(&fruits, f))
                .cloned()
                .collect();
            ensure!(
                missing.is_empty(),
                "缺品类: {} — 现有: {}",
                missing.join(", "),
                preview(fruits.iter().map(|f| f.to_string()), 5)
            );
            Ok(())
        });

        reporter.section("供需平衡");
        reporter.check(
            &format!("客户需求合计大于 {:.0} kg", th.min_customer_kg),
            || {
                let total = sales.total_kg(SubjectKind::Customer);
                ensure!(total > th.min_customer_kg, "客户合计 = {:.0} kg", total);
                Ok(())
            },
        );

        reporter.check(
            &format!("产地供给合计大于 {:.0} kg", th.min_producer_kg),
            || {
                let total = sales.total_kg(SubjectKind::Producer);
                ensure!(total > th.min_producer_kg, "产地合计 = {:.0} kg", total);
                Ok(())
            },
        );

        reporter.check(
            &format!("产地供给覆盖客户需求不低于 {:.0}%", th.min_coverage_ratio * 100.0),
            || {
                let demand = sales.total_kg(SubjectKind::Customer);
                let supply = sales.total_kg(SubjectKind::Producer);
                let ratio = sales.coverage_ratio();
                match ratio {
                    Some(ratio) => {
                        ensure!(
                            ratio >= th.min_coverage_ratio,
                            "产地 {:.0} kg vs 客户 {:.0} kg = {:.0}% 覆盖",
                            supply,
                            demand,
                            ratio * 100.0
                        );
                        Ok(())
                    }
                    None => anyhow::bail!("客户需求合计为 0，覆盖率无法定义"),
                }
            },
        );
    }

    reporter.section("纸箱采购计划");
    let Some(carton) = reporter.gate("采购计划数据模块可用", &ctx.dataset.carton_plan) else {
        return;
    };

    reporter.check(
        &format!("采购计划不少于 {} 行", th.min_carton_rows),
        || {
            ensure!(
                carton.rows.len() >= th.min_carton_rows,
                "只有 {} 行",
                carton.rows.len()
            );
            Ok(())
        },
    );

    reporter.check("上年纸箱实绩为正", || {
        ensure!(
            carton.totals.cartons_prev > 0.0,
            "cartons_prev = {}",
            carton.totals.cartons_prev
        );
        Ok(())
    });

    reporter.check(
        &format!("计划纸箱量大于 {:.0}", th.min_cartons_plan),
        || {
            ensure!(
                carton.totals.cartons_plan > th.min_cartons_plan,
                "cartons_plan = {:.0}",
                carton.totals.cartons_plan
            );
            Ok(())
        },
    );

    reporter.check("计划纸箱量没有对上年断崖下跌", || {
        let floor = carton.totals.cartons_prev * th.max_carton_drop_ratio;
        ensure!(
            carton.totals.cartons_plan > floor,
            "计划 {:.0} 箱 vs 上年 {:.0} 箱 — 跌破 {:.0}%",
            carton.totals.cartons_plan,
            carton.totals.cartons_prev,
            th.max_carton_drop_ratio * 100.0
        );
        Ok(())
    });

    reporter.check(
        &format!("计划销量大于 {:.0} kg", th.min_kg_plan),
        || {
            ensure!(
                carton.totals.kg_plan > th.min_kg_plan,
                "kg_plan = {:.0}",
                carton.totals.kg_plan
            );
            Ok(())
        },
    );

    if let Some(sales) = sales {
        reporter.check(
            &format!(
                "采购计划销量与销售计划一致（比值 {:.1}–{:.1}）",
                th.sales_ratio_band.min, th.sales_ratio_band.max
            ),
            || {
                let sales_kg = sales.total_kg(SubjectKind::Customer);
                ensure!(sales_kg > 0.0, "销售计划客户合计为 0，比值无法定义");
                let ratio = carton.totals.kg_plan / sales_kg;
                ensure!(
                    th.sales_ratio_band.contains(ratio),
                    "采购计划 {:.0} kg vs 销售计划 {:.0} kg, 比值 = {:.2}",
                    carton.totals.kg_plan,
                    sales_kg,
                    ratio
                );
                Ok(())
            },
        );
    }

    reporter.section("客户组合计");
    reporter.check("group_totals 覆盖全部客户组", || {
        let missing: Vec<_> = th
            .required_groups
            .iter()
            .filter(|g| !carton.group_totals.contains_key(*g))
            .cloned()
            .collect();
        ensure!(missing.is_empty(), "缺客户组: {}", missing.join(", "));
        Ok(())
    });

    reporter.check(
        &format!(
            "主力组 {} 计划纸箱量大于 {:.0}",
            th.lead_group, th.min_lead_group_cartons
        ),
        || {
            let totals = carton
                .group_totals
                .get(&th.lead_group)
                .ok_or_else(|| anyhow::anyhow!("group_totals 缺 {}", th.lead_group))?;
            ensure!(
                totals.cartons_plan > th.min_lead_group_cartons,
                "{} cartons_plan = {:.0}",
                th.lead_group,
                totals.cartons_plan
            );
            Ok(())
        },
    );

    reporter.section("采购计划客户覆盖");
    for client in &th.carton_plan_clients {
        reporter.check(&format!("客户 {} 在采购计划内有行", client), || {
            let rows = carton.rows_of_client(client).count();
            ensure!(rows > 0, "0 行");
            Ok(())
        });
    }

    reporter.check("client_map 覆盖关键客户", || {
        let missing: Vec<_> = th
            .key_clients
            .iter()
            .filter(|c| !carton.client_map.contains_key(*c))
            .cloned()
            .collect();
        ensure!(missing.is_empty(), "client_map 缺: {}", missing.join(", "));
        Ok(())
    });

    reporter.check("client_map 每个条目至少映射一个收货方", || {
        let empty: Vec<_> = carton
            .client_map
            .iter()
            .filter(|(_, names)| names.is_empty())
            .map(|(client, _)| client.clone())
            .collect();
        ensure!(empty.is_empty(), "空映射: {}", empty.join(", "));
        Ok(())
    });
}
