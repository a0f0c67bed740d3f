//! Rule-based trading-intent parser.
//!
//! Turns one line of operator text ("swap 100 WETH to POL") into a typed
//! `ParsedIntent`, or a message explaining why the text was rejected.
//! Recognized phrasings, in precedence order:
//!
//! - **limit**: `swap 100 WETH to POL when price reaches $3500`
//! - **dca**: `dca 100 WETH to POL every 5 minutes for 4 orders`
//! - **swap**: `swap 100 WETH to POL`
//! - **split**: `convert 100 WETH to 50% POL and 50% USDT`
//! - **multi**: `convert 100 WETH, 500 POL, 1000 USDC to USDT`
//!
//! Parsing is pure and deterministic; it is safe to call from any thread.

pub mod error;
pub mod grammar;
pub mod numbers;
pub mod segments;
pub mod summary;

pub use error::{IntentError, IntentResult};
pub use td_protocol::{ParsedIntent, ParsedIntentResult};

use crate::grammar::GRAMMARS;

/// Parse intent text, returning the `{ok, intent | error}` result clients consume.
pub fn parse_intent(text: &str) -> ParsedIntentResult {
    try_parse_intent(text).into()
}

/// Parse intent text into a `ParsedIntent` or the reason it was rejected.
pub fn try_parse_intent(text: &str) -> IntentResult<ParsedIntent> {
    let text = text.trim();
    if text.is_empty() {
        return Err(IntentError::Empty);
    }

    for (kind, grammar) in GRAMMARS {
        if let Some(result) = grammar(text) {
            match &result {
                Ok(_) => tracing::debug!(grammar = %kind, "intent parsed"),
                Err(e) => tracing::debug!(grammar = %kind, error = %e, "intent rejected"),
            }
            return result;
        }
    }

    tracing::debug!("no intent grammar matched");
    Err(IntentError::Unrecognized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_protocol::{FrequencyUnit, IntentKind};

    fn parse(text: &str) -> ParsedIntent {
        try_parse_intent(text).unwrap_or_else(|e| panic!("{text:?} rejected: {e}"))
    }

    fn reject(text: &str) -> IntentError {
        match try_parse_intent(text) {
            Ok(intent) => panic!("{text:?} unexpectedly parsed as {intent:?}"),
            Err(e) => e,
        }
    }

    // ── Empty input ─────────────────────────────────────────────

    #[test]
    fn empty_and_blank_rejected() {
        assert_eq!(reject(""), IntentError::Empty);
        assert_eq!(reject("   "), IntentError::Empty);
        assert_eq!(reject("\t\n"), IntentError::Empty);
        assert_eq!(
            parse_intent("").error(),
            Some("Intent text is required.")
        );
    }

    // ── Swap ────────────────────────────────────────────────────

    #[test]
    fn parse_swap() {
        let ParsedIntent::Swap(swap) = parse("swap 100 WETH to POL") else {
            panic!("expected swap");
        };
        assert_eq!(swap.amount_in, 100.0);
        assert_eq!(swap.token_in, "WETH");
        assert_eq!(swap.token_out, "POL");
        assert_eq!(swap.summary, "Intent swap: 100 WETH to POL");
    }

    #[test]
    fn swap_table_uppercases_tokens() {
        let cases = [
            ("1", 1.0, "weth", "pol"),
            ("0.5", 0.5, "Usdc", "dai"),
            ("2500", 2500.0, "wbtc", "USDT"),
            ("0.0001", 0.0001, "eth", "arb"),
            ("42.42", 42.42, "LINK", "uni"),
        ];
        for (raw, amount, token_in, token_out) in cases {
            let text = format!("swap {raw} {token_in} to {token_out}");
            let ParsedIntent::Swap(swap) = parse(&text) else {
                panic!("{text:?} should be a swap");
            };
            assert_eq!(swap.amount_in, amount);
            assert_eq!(swap.token_in, token_in.to_ascii_uppercase());
            assert_eq!(swap.token_out, token_out.to_ascii_uppercase());
        }
    }

    #[test]
    fn swap_is_case_insensitive() {
        assert_eq!(parse("SWAP 10 weth TO pol"), parse("swap 10 WETH to POL"));
    }

    #[test]
    fn swap_tolerates_surrounding_and_inner_whitespace() {
        assert_eq!(
            parse("  swap   10  WETH   to POL  "),
            parse("swap 10 WETH to POL")
        );
    }

    #[test]
    fn swap_zero_amount_rejected() {
        for text in ["swap 0 WETH to POL", "swap 1.2.3 WETH to POL"] {
            assert_eq!(reject(text).to_string(), "Swap intent has invalid amount.");
        }
    }

    #[test]
    fn swap_with_negative_amount_does_not_match() {
        assert_eq!(reject("swap -5 WETH to POL"), IntentError::Unrecognized);
    }

    // ── Limit ───────────────────────────────────────────────────

    #[test]
    fn parse_limit() {
        let ParsedIntent::Limit(limit) = parse("swap 100 WETH to POL when price reaches 3500") else {
            panic!("expected limit");
        };
        assert_eq!(limit.amount_in, 100.0);
        assert_eq!(limit.limit_price_usd, 3500.0);
        assert_eq!(limit.token_in, "WETH");
        assert_eq!(limit.token_out, "POL");
        assert_eq!(
            limit.summary,
            "Intent limit: 100 WETH to POL when price reaches $3500"
        );
    }

    #[test]
    fn limit_with_article_and_dollar_sign() {
        let ParsedIntent::Limit(limit) = parse("swap 2 weth to usdc when the price reaches $4100.5")
        else {
            panic!("expected limit");
        };
        assert_eq!(limit.limit_price_usd, 4100.5);
        assert_eq!(limit.token_out, "USDC");
    }

    #[test]
    fn limit_invalid_values_do_not_fall_through() {
        assert_eq!(
            reject("swap 0 WETH to POL when price reaches 3500").to_string(),
            "Limit intent has invalid amount."
        );
        assert_eq!(
            reject("swap 1 WETH to POL when price reaches 0").to_string(),
            "Limit intent has invalid price."
        );
    }

    // ── DCA ─────────────────────────────────────────────────────

    #[test]
    fn parse_dca() {
        let ParsedIntent::Dca(dca) = parse("dca 100 WETH to POL every 5 minutes for 4 orders") else {
            panic!("expected dca");
        };
        assert_eq!(dca.amount_per_order, 100.0);
        assert_eq!(dca.frequency_value, 5);
        assert_eq!(dca.frequency_unit, FrequencyUnit::Minutes);
        assert_eq!(dca.total_orders, 4);
        assert_eq!(
            dca.summary,
            "Intent dca: 100 WETH to POL every 5 minutes for 4 orders"
        );
    }

    #[test]
    fn dca_singular_units_and_order() {
        let ParsedIntent::Dca(dca) = parse("DCA 50 usdc to weth every 1 day for 1 order") else {
            panic!("expected dca");
        };
        assert_eq!(dca.frequency_unit, FrequencyUnit::Days);
        assert_eq!(dca.total_orders, 1);
        assert_eq!(dca.token_in, "USDC");
    }

    #[test]
    fn dca_counts_truncate() {
        let ParsedIntent::Dca(dca) = parse("dca 10 USDC to WETH every 2.7 hours for 3.9 orders") else {
            panic!("expected dca");
        };
        assert_eq!(dca.frequency_value, 2);
        assert_eq!(dca.frequency_unit, FrequencyUnit::Hours);
        assert_eq!(dca.total_orders, 3);
    }

    #[test]
    fn dca_invalid_fields() {
        assert_eq!(
            reject("dca 0 WETH to POL every 5 minutes for 4 orders").to_string(),
            "DCA intent has invalid amount."
        );
        assert_eq!(
            reject("dca 1 WETH to POL every 0 minutes for 4 orders").to_string(),
            "DCA intent has invalid frequency."
        );
        assert_eq!(
            reject("dca 1 WETH to POL every 5 weeks for 4 orders").to_string(),
            "DCA intent has invalid frequency unit."
        );
        assert_eq!(
            reject("dca 1 WETH to POL every 5 days for 0.5 orders").to_string(),
            "DCA intent has invalid order count."
        );
    }

    // ── Split ───────────────────────────────────────────────────

    #[test]
    fn parse_split() {
        let ParsedIntent::Split(split) = parse("convert 100 WETH to 50% POL and 50% USDT") else {
            panic!("expected split");
        };
        assert_eq!(split.token_in, "WETH");
        assert_eq!(split.amount_in, 100.0);
        assert_eq!(split.allocations.len(), 2);
        assert_eq!(split.allocations[0].token, "POL");
        assert_eq!(split.allocations[1].token, "USDT");
        let total: f64 = split.allocations.iter().map(|a| a.percentage).sum();
        assert_eq!(total, 100.0);
        assert_eq!(split.summary, "Intent split: 100 WETH to 50% POL, 50% USDT");
    }

    #[test]
    fn split_sum_mismatch_reports_sum() {
        assert_eq!(
            reject("convert 100 WETH to 60% POL and 50% USDT"),
            IntentError::AllocationSum(110.0)
        );
        assert!(
            parse_intent("convert 100 WETH to 60% POL and 50% USDT")
                .error()
                .unwrap()
                .contains("110")
        );
    }

    #[test]
    fn split_within_tolerance() {
        let intent = parse("convert 9 weth to 33.33% pol, 33.33% usdt, and 33.335% dai");
        assert_eq!(intent.kind(), IntentKind::Split);
    }

    #[test]
    fn split_outside_tolerance() {
        assert_eq!(
            reject("convert 9 WETH to 33% POL, 33% USDT, 33% DAI"),
            IntentError::AllocationSum(99.0)
        );
    }

    #[test]
    fn split_remaining_is_noise() {
        let ParsedIntent::Split(split) =
            parse("convert 100WETH to 50% WETH and remaining 50% to USDT")
        else {
            panic!("expected split");
        };
        assert_eq!(split.allocations[1].token, "USDT");
        assert_eq!(split.allocations[1].percentage, 50.0);
    }

    #[test]
    fn split_bad_segment_is_quoted() {
        assert_eq!(
            reject("convert 100 WETH to 50% POL and half USDT").to_string(),
            "Invalid split allocation: \"half USDT\""
        );
    }

    #[test]
    fn split_zero_percentage_rejected() {
        assert_eq!(
            reject("convert 100 WETH to 0% POL and 100% USDT"),
            IntentError::InvalidPercentage("0% POL".into())
        );
    }

    #[test]
    fn single_asset_convert_takes_split_path() {
        assert_eq!(
            reject("convert 100 WETH to USDT"),
            IntentError::InvalidAllocation("USDT".into())
        );
    }

    // ── Multi ───────────────────────────────────────────────────

    #[test]
    fn parse_multi() {
        let ParsedIntent::Multi(multi) = parse("convert 100 WETH, 500 POL, 1000 USDC to USDT") else {
            panic!("expected multi");
        };
        assert_eq!(multi.receive_token, "USDT");
        assert_eq!(multi.assets.len(), 3);
        assert_eq!(multi.assets[0].token, "WETH");
        assert_eq!(multi.assets[0].amount, 100.0);
        assert_eq!(multi.assets[2].token, "USDC");
        assert_eq!(multi.assets[2].amount, 1000.0);
        assert_eq!(
            multi.summary,
            "Intent multi: 100 WETH, 500 POL, 1000 USDC to USDT"
        );
    }

    #[test]
    fn multi_with_and_and_filler() {
        let ParsedIntent::Multi(multi) = parse("Convert all 1 weth and al 20pol to dai") else {
            panic!("expected multi");
        };
        assert_eq!(multi.assets.len(), 2);
        assert_eq!(multi.assets[1].token, "POL");
        assert_eq!(multi.assets[1].amount, 20.0);
        assert_eq!(multi.receive_token, "DAI");
    }

    #[test]
    fn multi_requires_two_assets() {
        assert_eq!(reject("convert all 100 WETH to USDT"), IntentError::TooFewAssets);
        assert_eq!(
            IntentError::TooFewAssets.to_string(),
            "Multi intent requires at least 2 input assets."
        );
    }

    #[test]
    fn multi_bad_segment_is_quoted() {
        assert_eq!(
            reject("convert 100 WETH, some POL to USDT"),
            IntentError::InvalidAsset("some POL".into())
        );
        assert_eq!(
            reject("convert 100 WETH, 0 POL to USDT"),
            IntentError::InvalidAssetAmount("0 POL".into())
        );
    }

    // ── Fallback ────────────────────────────────────────────────

    #[test]
    fn unrecognized_text() {
        assert_eq!(reject("buy some ETH soon"), IntentError::Unrecognized);
        assert_eq!(reject("swap WETH to POL"), IntentError::Unrecognized);
        assert_eq!(reject("hello world"), IntentError::Unrecognized);
        let result = parse_intent("buy some ETH soon");
        assert!(!result.is_ok());
        assert!(result.error().unwrap().contains("swap 100 WETH to POL"));
    }

    #[test]
    fn non_ascii_case_folds_are_not_symbols() {
        // U+017F folds to 's' and U+212A to 'k' under Unicode case-insensitivity.
        assert_eq!(reject("swap 1 \u{017F}ol to pol"), IntentError::Unrecognized);
        assert_eq!(reject("swap 1 weth to \u{212A}nc"), IntentError::Unrecognized);
        assert_eq!(
            reject("convert 100 WETH to 50% \u{212A}NC and 50% USDT"),
            IntentError::InvalidAllocation("50% \u{212A}NC".into())
        );
    }

    #[test]
    fn non_ascii_digits_fall_back() {
        assert_eq!(
            reject("swap \u{0661}\u{0660} WETH to POL"),
            IntentError::Unrecognized
        );
    }

    #[test]
    fn parsed_symbols_are_upper_case() {
        let texts = [
            "swap 1 weth to pol",
            "swap 1 weth to pol when price reaches 5",
            "dca 1 usdc to weth every 1 day for 2 orders",
            "convert 10 weth to 40% pol and 60% dai",
            "convert 1 weth, 2 link to usdt",
        ];
        for text in texts {
            let json = serde_json::to_value(parse(text)).unwrap();
            let mut symbols: Vec<String> = ["tokenIn", "tokenOut", "receiveToken"]
                .iter()
                .filter_map(|k| json[*k].as_str().map(String::from))
                .collect();
            for list in ["assets", "allocations"] {
                if let Some(items) = json[list].as_array() {
                    symbols.extend(items.iter().map(|i| i["token"].as_str().unwrap().to_string()));
                }
            }
            assert!(!symbols.is_empty(), "{text}");
            for symbol in symbols {
                assert_eq!(symbol, symbol.to_uppercase(), "{text}");
            }
        }
    }

    // ── Result shape & determinism ──────────────────────────────

    #[test]
    fn result_json_shape() {
        let json = serde_json::to_value(parse_intent("swap 100 WETH to POL")).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["intent"]["kind"], "swap");
        assert_eq!(json["intent"]["amountIn"], 100.0);

        let json = serde_json::to_value(parse_intent("")).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"], "Intent text is required.");
    }

    #[test]
    fn parsing_is_idempotent() {
        let inputs = [
            "swap 100 WETH to POL",
            "swap 100 WETH to POL when price reaches 3500",
            "dca 100 WETH to POL every 5 minutes for 4 orders",
            "convert 100 WETH, 500 POL, 1000 USDC to USDT",
            "convert 100 WETH to 50% POL and 50% USDT",
            "convert 100 WETH to 60% POL and 50% USDT",
            "buy some ETH soon",
            "",
        ];
        for input in inputs {
            assert_eq!(parse_intent(input), parse_intent(input), "{input:?}");
        }
    }

    #[test]
    fn parses_concurrently() {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                std::thread::spawn(move || parse_intent(&format!("swap {} WETH to POL", i + 1)))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.join().unwrap();
            let ParsedIntent::Swap(swap) = result.intent().unwrap() else {
                panic!("expected swap");
            };
            assert_eq!(swap.amount_in, (i + 1) as f64);
        }
    }
}
