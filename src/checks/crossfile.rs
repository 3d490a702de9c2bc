// ==========================================
// 水果贸易看板数据校验系统 - 跨表关联套件
// ==========================================
// 职责: 计划客户 ↔ client_map ↔ 结算收货方 的
//       关联通道完整，品类与物料族跨表一致
// ==========================================
// 单表内部的取值检查在各自套件里；
// 这里只做两张表之间的外键式核对。
// ==========================================

use crate::checks::{marker_matches, preview, CheckContext};
use crate::domain::SubjectKind;
use crate::report::Reporter;
use anyhow::ensure;

pub fn run(ctx: &CheckContext<'_>, reporter: &mut Reporter) {
    reporter.section("计划客户与映射通道");
    let sales = reporter.gate("销售计划数据模块可用", &ctx.dataset.sales_plan);
    let carton = reporter.gate("采购计划数据模块可用", &ctx.dataset.carton_plan);

    if let (Some(sales), Some(carton)) = (sales, carton) {
        let th = &ctx.config.plan;

        reporter.check("计划内关键客户均有 client_map 条目", || {
            let plan_clients = sales.subjects(SubjectKind::Customer);
            let missing: Vec<_> = th
                .key_clients
                .iter()
                .filter(|c| plan_clients.contains(c.as_str()))
                .filter(|c| !carton.client_map.contains_key(*c))
                .cloned()
                .collect();
            ensure!(
                missing.is_empty(),
                "计划客户缺映射: {}",
                missing.join(", ")
            );
            Ok(())
        });

        reporter.check(
            &format!(
                "计划客户暂缺映射的不超过 {} 个",
                th.max_unmapped_plan_clients
            ),
            || {
                // 新客户允许先进计划、后补映射，但不能积压
                let unmapped: Vec<_> = sales
                    .subjects(SubjectKind::Customer)
                    .into_iter()
                    .filter(|c| !carton.client_map.contains_key(*c))
                    .map(|c| c.to_string())
                    .collect();
                ensure!(
                    unmapped.len() <= th.max_unmapped_plan_clients,
                    "{} 个计划客户无映射: {}",
                    unmapped.len(),
                    preview(unmapped.into_iter(), 5)
                );
                Ok(())
            },
        );
    }

    reporter.section("映射收货方与结算台账");
    if let (Some(carton), Some(packaging)) = (
        carton,
        reporter.gate("包装台账数据模块可用", &ctx.dataset.packaging),
    ) {
        let th = &ctx.config.carton_map;

        reporter.check(
            &format!(
                "client_map 收货方名在台账可解析（容忍 {} 条）",
                th.max_unmapped_client_names
            ),
            || {
                let recipients = packaging.recipients();
                let unmapped: Vec<String> = carton
                    .client_map
                    .iter()
                    .flat_map(|(client, names)| {
                        names
                            .iter()
                            .filter(|name| !recipients.contains(name.as_str()))
                            .map(move |name| format!("{}→\"{}\"", client, name))
                    })
                    .collect();
                ensure!(
                    unmapped.len() <= th.max_unmapped_client_names,
                    "{} 条收货方名对不上台账: {}",
                    unmapped.len(),
                    preview(unmapped.into_iter(), 5)
                );
                Ok(())
            },
        );
    }

    reporter.section("品类与物料族");
    if let Some(carton) = carton {
        let th = &ctx.config.plan;
        reporter.check("采购计划覆盖关键水果品类", || {
            let fruits: Vec<&str> = carton.fruits().into_iter().collect();
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
    }

    if let Some(usage) = reporter.gate("消耗数据模块可用", &ctx.dataset.usage) {
        let th = &ctx.config.usage;
        reporter.check("消耗数据覆盖必备物料族", || {
            let types: Vec<&str> = usage.material_types().into_iter().collect();
            let missing: Vec<_> = th
                .required_material_markers
                .iter()
                .filter(|m| !types.iter().any(|t| t.contains(m.as_str())))
                .cloned()
                .collect();
            ensure!(
                missing.is_empty(),
                "物料类型缺字样: {} — 现有: {}",
                missing.join(", "),
                preview(types.iter().map(|t| t.to_string()), 5)
            );
            Ok(())
        });
    }
}
