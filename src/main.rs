// ==========================================
// 药房库存决策支持系统 - 命令行入口
// ==========================================
// 流程: 解析参数 → 加载配置 → 加载药品表 → 分析 → 渲染四个页签
// ==========================================

use anyhow::Context;
use clap::Parser;
use pharmacy_stock::api::ApiError;
use pharmacy_stock::app::render::{
    render_forecasts, render_import_report, render_item_detail, render_overview,
    render_recommendations,
};
use pharmacy_stock::app::{AppState, CliArgs, DataSource, ParamOverrides};
use pharmacy_stock::config::ConfigManager;
use pharmacy_stock::i18n::{set_locale, t, t_with_args};
use pharmacy_stock::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let args = CliArgs::parse();

    tracing::info!("{} v{}", pharmacy_stock::APP_NAME, pharmacy_stock::VERSION);

    // 配置
    let config = match &args.config_path {
        Some(path) => ConfigManager::load(path),
        None => ConfigManager::load_default(),
    }
    .context("加载配置失败")?;
    let state = AppState::new(config);

    let locale = match &args.locale {
        Some(locale) => locale.clone(),
        None => state.configured_locale().await?,
    };
    set_locale(&locale);

    // 药品表 + 分析
    let source = match &args.file {
        Some(path) => DataSource::File(path.clone()),
        None => DataSource::Sample,
    };
    let overrides = ParamOverrides {
        safety_stock_pct: args.safety_pct,
        apply_safety_stock: args.apply_safety.then_some(true),
    };

    let (api, import_report) = match state.build_dashboard(&source, overrides).await {
        Ok(built) => built,
        Err(ApiError::ValidationError { violations, .. }) => {
            eprintln!(
                "{}",
                t_with_args("import.rejected", &[("count", &violations.len().to_string())])
            );
            for violation in &violations {
                eprintln!("  - {}", violation);
            }
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };
    let report = api.analyze().await?;

    if args.json {
        println!("{}", api.analysis_json(&report)?);
        return Ok(());
    }

    let mut out = String::new();
    out.push_str(&t("app.title"));
    out.push('\n');
    match &source {
        DataSource::Sample => out.push_str(&t("app.data_source_sample")),
        DataSource::File(path) => out.push_str(&t_with_args(
            "app.data_source_file",
            &[("path", &path.display().to_string())],
        )),
    }
    out.push('\n');
    if let Some(import_report) = &import_report {
        render_import_report(&mut out, import_report)?;
    }

    render_overview(&mut out, &api.overview(&report))?;

    let selected = args
        .item
        .clone()
        .or_else(|| report.classified.first().map(|c| c.item.name.clone()));
    if let Some(name) = selected {
        match api.item_detail(&report, &name) {
            Ok(detail) => render_item_detail(&mut out, &detail)?,
            Err(ApiError::NotFound(_)) => {
                out.push('\n');
                out.push_str(&t_with_args("detail.not_found", &[("name", &name)]));
                out.push('\n');
            }
            Err(e) => return Err(e.into()),
        }
    }

    render_forecasts(&mut out, &api.forecasts(&report))?;
    render_recommendations(&mut out, &api.recommendations(&report))?;

    print!("{}", out);
    Ok(())
}
