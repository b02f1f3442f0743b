// ==========================================
// 药房库存决策支持系统 - 命令行参数
// ==========================================
// 用法:
//   pharmacy-stock [FILE] [--safety PCT] [--apply-safety] [--locale LOC]
//                  [--json] [--item NAME] [--config PATH]
// ==========================================

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "pharmacy-stock")]
#[command(about = "药房库存决策支持系统 - ABC/VED 分类、需求预测与补货建议")]
#[command(version)]
pub struct CliArgs {
    /// CSV / Excel 药品表（缺省使用内置示例数据）
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// 安全库存百分比 (0~100)
    #[arg(long = "safety", value_name = "PCT", value_parser = parse_safety_pct)]
    pub safety_pct: Option<f64>,

    /// 将安全库存计入补货判定
    #[arg(long, default_value_t = false)]
    pub apply_safety: bool,

    /// 展示语言 (zh-CN / en / tr)
    #[arg(long, value_name = "LOC")]
    pub locale: Option<String>,

    /// 输出完整分析结果 JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// 明细页签显示的药品（缺省为排名第一的药品）
    #[arg(long, value_name = "NAME")]
    pub item: Option<String>,

    /// 配置文件路径
    #[arg(long = "config", value_name = "PATH")]
    pub config_path: Option<PathBuf>,
}

fn parse_safety_pct(raw: &str) -> Result<f64, String> {
    let pct: f64 = raw
        .parse()
        .map_err(|_| format!("不是合法数值: {}", raw))?;
    if !(0.0..=100.0).contains(&pct) {
        return Err(format!("取值范围 0~100: {}", pct));
    }
    Ok(pct)
}
