pub const APP_NAME: &str = "TradeFlow";
pub const APP_TAGLINE: &str = "Landed-cost estimates for cross-border shipments";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// Release tag when built from a tagged checkout, otherwise the crate version.
pub fn version_label() -> String {
    match GIT_TAG {
        Some(tag) => tag.to_string(),
        None => format!("v{APP_VERSION}"),
    }
}

pub fn window_title() -> String {
    format!("{APP_NAME} {}", version_label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_never_empty() {
        let label = version_label();
        assert!(!label.is_empty());
        assert!(window_title().starts_with(APP_NAME));
    }
}
