//! Confirmation lines shown to the operator before an intent is submitted.

use td_protocol::{Allocation, AssetAmount, FrequencyUnit};

pub fn swap(amount: f64, token_in: &str, token_out: &str) -> String {
    format!("Intent swap: {amount} {token_in} to {token_out}")
}

pub fn limit(amount: f64, token_in: &str, token_out: &str, price: f64) -> String {
    format!("Intent limit: {amount} {token_in} to {token_out} when price reaches ${price}")
}

pub fn dca(
    amount: f64,
    token_in: &str,
    token_out: &str,
    every: u64,
    unit: FrequencyUnit,
    orders: u64,
) -> String {
    format!("Intent dca: {amount} {token_in} to {token_out} every {every} {unit} for {orders} orders")
}

pub fn multi(assets: &[AssetAmount], receive_token: &str) -> String {
    let legs: Vec<String> = assets
        .iter()
        .map(|a| format!("{} {}", a.amount, a.token))
        .collect();
    format!("Intent multi: {} to {receive_token}", legs.join(", "))
}

pub fn split(amount: f64, token_in: &str, allocations: &[Allocation]) -> String {
    let legs: Vec<String> = allocations
        .iter()
        .map(|a| format!("{}% {}", a.percentage, a.token))
        .collect();
    format!("Intent split: {amount} {token_in} to {}", legs.join(", "))
}
