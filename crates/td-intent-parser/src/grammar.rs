//! Intent grammars, tried in order.
//!
//! Each grammar returns `None` when the text does not fit its shape, and
//! `Some(Err(..))` when it fits but carries unusable values. A grammar that
//! fits always decides the outcome; later grammars are not consulted.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use td_protocol::{
    Allocation, AssetAmount, DcaIntent, IntentKind, LimitIntent, MultiIntent, ParsedIntent,
    SplitIntent, SwapIntent,
};

use crate::error::{IntentError, IntentResult};
use crate::numbers::{parse_count, parse_frequency_unit, parse_positive, round_for_display};
use crate::segments::{allocation_segments, asset_segments};
use crate::summary;

/// Maximum distance from 100 tolerated for split percentages.
pub const PERCENT_TOLERANCE: f64 = 0.01;

// Symbol and number classes are ASCII-only, so `to_ascii_uppercase` fully
// upper-cases every captured symbol.

// swap <amount> <in> to <out> when [the] price reaches [$]<price>
static LIMIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^swap\s+([0-9.]+)\s+(?-u:([a-z][a-z0-9]*))\s+to\s+(?-u:([a-z][a-z0-9]*))\s+when\s+(?:the\s+)?price\s+reaches\s+\$?([0-9.]+)$",
    )
    .unwrap()
});

// dca <amount> <in> to <out> every <n> <unit> for <m> order[s]
static DCA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^dca\s+([0-9.]+)\s+(?-u:([a-z][a-z0-9]*))\s+to\s+(?-u:([a-z][a-z0-9]*))\s+every\s+([0-9.]+)\s+(?-u:([a-z]+))\s+for\s+([0-9.]+)\s+orders?$",
    )
    .unwrap()
});

// swap <amount> <in> to <out>
static SWAP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^swap\s+([0-9.]+)\s+(?-u:([a-z][a-z0-9]*))\s+to\s+(?-u:([a-z][a-z0-9]*))$").unwrap()
});

// convert <amount><in> to <allocations>
static SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^convert\s+([0-9.]+)\s*(?-u:([a-z][a-z0-9]*))\s+to\s+(.+)$").unwrap()
});

// convert <assets> to <receive>
static MULTI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^convert\s+(.+)\s+to\s+(?-u:([a-z][a-z0-9]*))$").unwrap());

// <percentage>% [to] <token>
static ALLOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([0-9.]+)\s*%\s*(?:to\s+)?(?-u:([a-z][a-z0-9]*))$").unwrap());

// <amount><token>
static ASSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([0-9.]+)\s*(?-u:([a-z][a-z0-9]*))$").unwrap());

type Grammar = fn(&str) -> Option<IntentResult<ParsedIntent>>;

/// Grammars in precedence order. Limit precedes swap since both start with
/// "swap <amount> <in> to <out>".
pub const GRAMMARS: &[(IntentKind, Grammar)] = &[
    (IntentKind::Limit, parse_limit),
    (IntentKind::Dca, parse_dca),
    (IntentKind::Swap, parse_swap),
    (IntentKind::Split, parse_split),
    (IntentKind::Multi, parse_multi),
];

fn symbol(caps: &Captures<'_>, index: usize) -> String {
    caps[index].to_ascii_uppercase()
}

fn positive(
    caps: &Captures<'_>,
    index: usize,
    grammar: &'static str,
    field: &'static str,
) -> IntentResult<f64> {
    parse_positive(&caps[index]).ok_or_else(|| IntentError::invalid(grammar, field))
}

fn parse_limit(text: &str) -> Option<IntentResult<ParsedIntent>> {
    LIMIT.captures(text).map(|caps| limit_from(&caps))
}

fn limit_from(caps: &Captures<'_>) -> IntentResult<ParsedIntent> {
    let amount_in = positive(caps, 1, "Limit", "amount")?;
    let limit_price_usd = positive(caps, 4, "Limit", "price")?;
    let token_in = symbol(caps, 2);
    let token_out = symbol(caps, 3);
    let summary = summary::limit(amount_in, &token_in, &token_out, limit_price_usd);
    Ok(ParsedIntent::Limit(LimitIntent {
        token_in,
        token_out,
        amount_in,
        limit_price_usd,
        summary,
    }))
}

fn parse_dca(text: &str) -> Option<IntentResult<ParsedIntent>> {
    DCA.captures(text).map(|caps| dca_from(&caps))
}

fn dca_from(caps: &Captures<'_>) -> IntentResult<ParsedIntent> {
    let amount_per_order = positive(caps, 1, "DCA", "amount")?;
    let frequency_value =
        parse_count(&caps[4]).ok_or_else(|| IntentError::invalid("DCA", "frequency"))?;
    let frequency_unit = parse_frequency_unit(&caps[5])
        .ok_or_else(|| IntentError::invalid("DCA", "frequency unit"))?;
    let total_orders =
        parse_count(&caps[6]).ok_or_else(|| IntentError::invalid("DCA", "order count"))?;
    let token_in = symbol(caps, 2);
    let token_out = symbol(caps, 3);
    let summary = summary::dca(
        amount_per_order,
        &token_in,
        &token_out,
        frequency_value,
        frequency_unit,
        total_orders,
    );
    Ok(ParsedIntent::Dca(DcaIntent {
        token_in,
        token_out,
        amount_per_order,
        frequency_value,
        frequency_unit,
        total_orders,
        summary,
    }))
}

fn parse_swap(text: &str) -> Option<IntentResult<ParsedIntent>> {
    SWAP.captures(text).map(|caps| swap_from(&caps))
}

fn swap_from(caps: &Captures<'_>) -> IntentResult<ParsedIntent> {
    let amount_in = positive(caps, 1, "Swap", "amount")?;
    let token_in = symbol(caps, 2);
    let token_out = symbol(caps, 3);
    let summary = summary::swap(amount_in, &token_in, &token_out);
    Ok(ParsedIntent::Swap(SwapIntent {
        token_in,
        token_out,
        amount_in,
        summary,
    }))
}

fn parse_split(text: &str) -> Option<IntentResult<ParsedIntent>> {
    SPLIT.captures(text).map(|caps| split_from(&caps))
}

fn split_from(caps: &Captures<'_>) -> IntentResult<ParsedIntent> {
    let amount_in = positive(caps, 1, "Split", "amount")?;
    let token_in = symbol(caps, 2);

    let mut allocations = Vec::new();
    for segment in allocation_segments(&caps[3]) {
        let seg = ALLOCATION
            .captures(&segment)
            .ok_or_else(|| IntentError::InvalidAllocation(segment.clone()))?;
        let percentage = parse_positive(&seg[1])
            .ok_or_else(|| IntentError::InvalidPercentage(segment.clone()))?;
        allocations.push(Allocation {
            token: seg[2].to_ascii_uppercase(),
            percentage,
        });
    }
    if allocations.is_empty() {
        return Err(IntentError::NoAllocations);
    }

    let total: f64 = allocations.iter().map(|a| a.percentage).sum();
    if (total - 100.0).abs() > PERCENT_TOLERANCE {
        return Err(IntentError::AllocationSum(round_for_display(total)));
    }

    let summary = summary::split(amount_in, &token_in, &allocations);
    Ok(ParsedIntent::Split(SplitIntent {
        token_in,
        amount_in,
        allocations,
        summary,
    }))
}

fn parse_multi(text: &str) -> Option<IntentResult<ParsedIntent>> {
    MULTI.captures(text).map(|caps| multi_from(&caps))
}

fn multi_from(caps: &Captures<'_>) -> IntentResult<ParsedIntent> {
    let mut assets = Vec::new();
    for segment in asset_segments(&caps[1]) {
        let seg = ASSET
            .captures(&segment)
            .ok_or_else(|| IntentError::InvalidAsset(segment.clone()))?;
        let amount = parse_positive(&seg[1])
            .ok_or_else(|| IntentError::InvalidAssetAmount(segment.clone()))?;
        assets.push(AssetAmount {
            token: seg[2].to_ascii_uppercase(),
            amount,
        });
    }
    if assets.len() < 2 {
        return Err(IntentError::TooFewAssets);
    }

    let receive_token = symbol(caps, 2);
    let summary = summary::multi(&assets, &receive_token);
    Ok(ParsedIntent::Multi(MultiIntent {
        receive_token,
        assets,
        summary,
    }))
}
