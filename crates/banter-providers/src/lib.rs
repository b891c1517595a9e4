//! Responder layer for Banter.
//!
//! Turns one line of user text into one reply, either over HTTP or offline.
//!
//! # Architecture
//!
//! - [`traits::Responder`] — trait both responder implementations share
//! - [`classify`](mod@classify) — model-name → provider routing rules
//! - [`wire`] — per-provider JSON request/response shapes
//! - [`adapter::ProviderAdapter`] — one HTTP round trip per turn
//! - [`mock::MockResponder`] — canned replies when no credential is set
//! - [`select::select_responder`] — picks one of the two at startup

pub mod adapter;
pub mod classify;
pub mod mock;
pub mod select;
pub mod traits;
pub mod wire;

// Re-export main types for convenience
pub use adapter::ProviderAdapter;
pub use classify::{classify, FallbackPolicy, ProviderKind};
pub use mock::MockResponder;
pub use select::select_responder;
pub use traits::{RequestParams, Responder};
