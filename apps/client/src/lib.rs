//! Recruiting-operations client core.
//!
//! Two cooperating subsystems over an injected backend client:
//! the field normalizer (`normalize`, `display`) turns ambiguously-shaped
//! backend fields into flat display strings, and the batch orchestrator
//! (`batch`) drives multi-file upload → AI extraction → AI validation with
//! per-file metrics and an append-only log. Everything network-facing goes
//! through the `api::RecruitApi` seam.

pub mod admin;
pub mod agents;
pub mod api;
pub mod batch;
pub mod config;
pub mod display;
pub mod errors;
pub mod normalize;
