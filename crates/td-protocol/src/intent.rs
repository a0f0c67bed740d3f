use serde::{Deserialize, Serialize};

/// Which intent grammar produced a `ParsedIntent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Swap,
    Limit,
    Dca,
    Multi,
    Split,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::Swap => "swap",
            IntentKind::Limit => "limit",
            IntentKind::Dca => "dca",
            IntentKind::Multi => "multi",
            IntentKind::Split => "split",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval unit for recurring (DCA) orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyUnit {
    Minutes,
    Hours,
    Days,
}

impl FrequencyUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyUnit::Minutes => "minutes",
            FrequencyUnit::Hours => "hours",
            FrequencyUnit::Days => "days",
        }
    }
}

impl std::fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immediate market swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapIntent {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: f64,
    pub summary: String,
}

/// Swap that triggers once the input token reaches a USD price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitIntent {
    pub token_in: String,
    pub token_out: String,
    pub amount_in: f64,
    pub limit_price_usd: f64,
    pub summary: String,
}

/// Recurring dollar-cost-averaging order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DcaIntent {
    pub token_in: String,
    pub token_out: String,
    pub amount_per_order: f64,
    pub frequency_value: u64,
    pub frequency_unit: FrequencyUnit,
    pub total_orders: u64,
    pub summary: String,
}

/// One input leg of a multi-asset conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAmount {
    pub token: String,
    pub amount: f64,
}

/// Several input assets converted into one receive token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiIntent {
    pub receive_token: String,
    pub assets: Vec<AssetAmount>,
    pub summary: String,
}

/// One output leg of a percentage split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub token: String,
    pub percentage: f64,
}

/// One input amount divided across several output tokens by percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitIntent {
    pub token_in: String,
    pub amount_in: f64,
    pub allocations: Vec<Allocation>,
    pub summary: String,
}

/// Structured trading intent extracted from operator text.
///
/// Serialized with a `kind` discriminator, e.g.
/// `{"kind":"swap","tokenIn":"WETH","tokenOut":"POL","amountIn":100.0,"summary":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsedIntent {
    Swap(SwapIntent),
    Limit(LimitIntent),
    Dca(DcaIntent),
    Multi(MultiIntent),
    Split(SplitIntent),
}

impl ParsedIntent {
    pub fn kind(&self) -> IntentKind {
        match self {
            ParsedIntent::Swap(_) => IntentKind::Swap,
            ParsedIntent::Limit(_) => IntentKind::Limit,
            ParsedIntent::Dca(_) => IntentKind::Dca,
            ParsedIntent::Multi(_) => IntentKind::Multi,
            ParsedIntent::Split(_) => IntentKind::Split,
        }
    }

    /// Human-readable confirmation line.
    pub fn summary(&self) -> &str {
        match self {
            ParsedIntent::Swap(i) => &i.summary,
            ParsedIntent::Limit(i) => &i.summary,
            ParsedIntent::Dca(i) => &i.summary,
            ParsedIntent::Multi(i) => &i.summary,
            ParsedIntent::Split(i) => &i.summary,
        }
    }
}
