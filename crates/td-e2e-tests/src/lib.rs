//! End-to-end tests for TradeDesk live under `tests/`.
//!
//! They drive the API router through `tower::oneshot`, with the intent
//! parser and either `MockBackend` or a wiremock-served `HttpBackend`
//! behind it.
