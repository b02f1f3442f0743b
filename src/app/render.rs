// ==========================================
// 药房库存决策支持系统 - 文本渲染
// ==========================================
// 职责: 将四个页签的响应渲染为终端文本
// 说明: 等级 → 文案的映射只在此处进行（多语言）
// ==========================================

use std::fmt::{self, Write};

use crate::api::dto::{ForecastResponse, ItemDetailResponse, OverviewResponse, RecommendationResponse};
use crate::domain::import::ImportReport;
use crate::domain::item::ForecastMethod;
use crate::domain::types::{AbcTier, Recommendation, VedTier};
use crate::i18n::{t, t_with_args};

// ==========================================
// 等级文案
// ==========================================

pub fn recommendation_text(level: Recommendation) -> String {
    t(&format!("recommendation.{}", level.as_str()))
}

pub fn ved_text(ved: VedTier) -> String {
    let key = match ved {
        VedTier::Vital => "ved.vital",
        VedTier::Essential => "ved.essential",
        VedTier::Desirable => "ved.desirable",
    };
    t(key)
}

pub fn abc_caption(abc: AbcTier) -> String {
    let key = match abc {
        AbcTier::A => "abc.a",
        AbcTier::B => "abc.b",
        AbcTier::C => "abc.c",
    };
    t(key)
}

pub fn method_text(method: &ForecastMethod) -> String {
    match method {
        ForecastMethod::Arima { .. } => t("forecast.method_arima"),
        ForecastMethod::MeanFallback { .. } => t("forecast.method_mean"),
    }
}

/// 按字符数补齐（不处理全角宽度）
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

fn section(out: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "==== {} ====", title)
}

// ==========================================
// 页签: 总览
// ==========================================
pub fn render_overview(out: &mut impl Write, overview: &OverviewResponse) -> fmt::Result {
    section(out, &t("tab.overview"))?;
    writeln!(out, "{}: {}", t("overview.total_items"), overview.total_items)?;
    writeln!(out, "{}: {}", t("overview.tier_a"), overview.tier_a_count)?;
    writeln!(out, "{}: {}", t("overview.vital"), overview.vital_count)?;
    writeln!(out, "{}: {}", t("overview.tier_a_vital"), overview.tier_a_vital_count)?;

    writeln!(out)?;
    writeln!(out, "{}", t("overview.matrix"))?;
    writeln!(
        out,
        "{} {} {} {} {} {} {}",
        pad(&t("column.rank"), 4),
        pad(&t("column.name"), 22),
        pad(&t("column.abc"), 4),
        pad(&t("column.ved"), 4),
        pad(&t("column.annual_value"), 14),
        pad(&t("column.cumulative_pct"), 10),
        t("column.stock"),
    )?;
    for row in &overview.rows {
        writeln!(
            out,
            "{} {} {} {} {} {} {}",
            pad(&row.rank.to_string(), 4),
            pad(&row.name, 22),
            pad(&row.abc.to_string(), 4),
            pad(row.ved.code(), 4),
            pad(&format!("{:.2}", row.annual_value), 14),
            pad(&format!("{:.2}", row.cumulative_pct), 10),
            row.current_stock,
        )?;
    }
    Ok(())
}

// ==========================================
// 页签: 明细
// ==========================================
pub fn render_item_detail(out: &mut impl Write, detail: &ItemDetailResponse) -> fmt::Result {
    section(out, &t("tab.detail"))?;
    writeln!(out, "{}: {}", t("column.name"), detail.name)?;
    writeln!(out, "{}: {}", t("column.abc"), abc_caption(detail.abc))?;
    writeln!(out, "{}: {} ({})", t("column.ved"), ved_text(detail.ved), detail.ved.code())?;
    writeln!(out, "{}: {}", t("column.stock"), detail.current_stock)?;
    writeln!(out, "{}: {}", t("column.monthly_consumption"), detail.monthly_consumption)?;
    writeln!(out, "{}: {:.2}", t("column.unit_price"), detail.unit_price)?;
    writeln!(out, "{}: {:.2}", t("column.annual_value"), detail.annual_value)?;

    let history = detail
        .sales_history
        .iter()
        .map(|v| format!("{}", v))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(out, "{}: [{}]", t("detail.history"), history)
}

// ==========================================
// 页签: 预测
// ==========================================
pub fn render_forecasts(out: &mut impl Write, forecasts: &ForecastResponse) -> fmt::Result {
    section(out, &t("tab.forecast"))?;
    writeln!(
        out,
        "{}",
        t_with_args("forecast.header", &[("n", &forecasts.horizon.to_string())])
    )?;

    let mut header = format!("{} {}", pad(&t("column.name"), 22), pad(&t("column.stock"), 8));
    for period in 1..=forecasts.horizon {
        let label = t_with_args("column.forecast_period", &[("n", &period.to_string())]);
        header.push(' ');
        header.push_str(&pad(&label, 12));
    }
    header.push(' ');
    header.push_str(&t("column.method"));
    writeln!(out, "{}", header)?;

    for row in &forecasts.rows {
        let mut line = format!(
            "{} {}",
            pad(&row.name, 22),
            pad(&row.current_stock.to_string(), 8)
        );
        for value in &row.values {
            line.push(' ');
            line.push_str(&pad(&format!("{:.1}", value), 12));
        }
        line.push(' ');
        line.push_str(&method_text(&row.method));
        writeln!(out, "{}", line)?;
    }

    if forecasts.fallback_count > 0 {
        writeln!(
            out,
            "{}",
            t_with_args(
                "forecast.fallback_count",
                &[("count", &forecasts.fallback_count.to_string())]
            )
        )?;
    }
    Ok(())
}

// ==========================================
// 页签: 建议
// ==========================================
pub fn render_recommendations(
    out: &mut impl Write,
    recommendations: &RecommendationResponse,
) -> fmt::Result {
    section(out, &t("tab.recommendation"))?;
    writeln!(
        out,
        "{} {} {} {} {} {}",
        pad(&t("column.name"), 22),
        pad(&t("column.abc"), 4),
        pad(&t("column.ved"), 4),
        pad(&t("column.stock"), 8),
        pad(&t("column.forecast"), 10),
        t("column.recommendation"),
    )?;
    for row in &recommendations.rows {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            pad(&row.name, 22),
            pad(&row.abc.to_string(), 4),
            pad(row.ved.code(), 4),
            pad(&row.current_stock.to_string(), 8),
            pad(&format!("{:.1}", row.forecast_next), 10),
            recommendation_text(row.recommendation),
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", t("recommendation.summary"))?;
    if recommendations.critical_count > 0 {
        writeln!(
            out,
            "{}",
            t_with_args(
                "recommendation.critical_alert",
                &[("count", &recommendations.critical_count.to_string())]
            )
        )?;
    }
    if recommendations.important_count > 0 {
        writeln!(
            out,
            "{}",
            t_with_args(
                "recommendation.important_alert",
                &[("count", &recommendations.important_count.to_string())]
            )
        )?;
    }
    Ok(())
}

// ==========================================
// 导入报告
// ==========================================
pub fn render_import_report(out: &mut impl Write, report: &ImportReport) -> fmt::Result {
    writeln!(
        out,
        "{}",
        t_with_args(
            "import.success",
            &[
                ("rows", &report.imported_rows.to_string()),
                ("file", &report.file_name),
            ]
        )
    )?;
    if !report.warnings.is_empty() {
        writeln!(
            out,
            "{}",
            t_with_args("import.warnings", &[("count", &report.warnings.len().to_string())])
        )?;
        for warning in &report.warnings {
            writeln!(out, "  - {}", warning)?;
        }
    }
    Ok(())
}
