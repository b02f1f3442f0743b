// ==========================================
// 药房库存决策支持系统 - 领域类型定义
// ==========================================
// 红线: 建议是"等级制",不是评分制
// 说明: 核心只输出结构化枚举，颜色/文案由展示层映射
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// VED 关键性等级 (Vital / Essential / Desirable)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VedTier {
    Vital,     // 生命攸关
    Essential, // 必需
    Desirable, // 可选
}

impl VedTier {
    /// 单字母代码（导入文件与原始数据使用 V/E/D）
    pub fn code(&self) -> &'static str {
        match self {
            VedTier::Vital => "V",
            VedTier::Essential => "E",
            VedTier::Desirable => "D",
        }
    }
}

impl fmt::Display for VedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for VedTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "V" | "VITAL" => Ok(VedTier::Vital),
            "E" | "ESSENTIAL" => Ok(VedTier::Essential),
            "D" | "DESIRABLE" => Ok(VedTier::Desirable),
            other => Err(format!("未知 VED 等级: {}", other)),
        }
    }
}

// ==========================================
// ABC 价值等级
// ==========================================
// 顺序: A < B < C（A 为高价值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbcTier {
    A,
    B,
    C,
}

impl fmt::Display for AbcTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbcTier::A => write!(f, "A"),
            AbcTier::B => write!(f, "B"),
            AbcTier::C => write!(f, "C"),
        }
    }
}

// ==========================================
// 补货建议等级 (Recommendation)
// ==========================================
// 顺序: Sufficient < Watch < Moderate < Important < Critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    Sufficient, // 库存充足
    Watch,      // 低 - 观察
    Moderate,   // 中 - 计划下单
    Important,  // 重要 - 下单
    Critical,   // 紧急 - 立即下单
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Critical => "critical",
            Recommendation::Important => "important",
            Recommendation::Moderate => "moderate",
            Recommendation::Watch => "watch",
            Recommendation::Sufficient => "sufficient",
        }
    }

    /// 是否需要下单动作（Sufficient 以外均需关注）
    pub fn requires_action(&self) -> bool {
        *self != Recommendation::Sufficient
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Critical => write!(f, "CRITICAL"),
            Recommendation::Important => write!(f, "IMPORTANT"),
            Recommendation::Moderate => write!(f, "MODERATE"),
            Recommendation::Watch => write!(f, "WATCH"),
            Recommendation::Sufficient => write!(f, "SUFFICIENT"),
        }
    }
}
