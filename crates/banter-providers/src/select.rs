//! Startup responder selection.
//!
//! Decided once per process: a locally-served model needs no key, anything
//! else needs a real API key, and everything that qualifies for neither runs
//! against the offline responder.

use tracing::info;

use banter_core::Config;

use crate::adapter::ProviderAdapter;
use crate::classify::{classify, FallbackPolicy};
use crate::mock::MockResponder;
use crate::traits::{RequestParams, Responder};

/// Pick the responder implementation for this process.
///
/// The provider adapter is chosen when the configured model classifies as
/// Ollama (local, no credential needed) or when a real API key is present.
/// A missing or placeholder key selects the offline responder instead.
pub fn select_responder(config: &Config) -> Box<dyn Responder> {
    let fallback = FallbackPolicy::from_config_value(&config.provider.fallback);
    let kind = classify(&config.chat.model, fallback);

    if kind.is_local() || config.provider.has_real_key() {
        info!(provider = %kind, model = %config.chat.model, "Using provider adapter");
        Box::new(ProviderAdapter::new(
            &config.chat.model,
            RequestParams::from_config(config),
            fallback,
        ))
    } else {
        info!(model = %config.chat.model, "No API key configured, using offline responder");
        Box::new(MockResponder::new())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
