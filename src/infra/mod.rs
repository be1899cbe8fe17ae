//! Filesystem-facing adapters: rule table source and history export.

pub mod export;
pub mod rule_source;
