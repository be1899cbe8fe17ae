//! Class-name helpers so pages share one look. Styles live in `assets/main.css`.

// ============================================
// BUTTON STYLES
// ============================================

pub const BTN_PRIMARY: &str = "tf-btn tf-btn-primary";
pub const BTN_SECONDARY: &str = "tf-btn tf-btn-secondary";
pub const BTN_GHOST: &str = "tf-btn tf-btn-ghost";

pub fn nav_button(active: bool) -> &'static str {
    if active {
        "tf-nav-btn active"
    } else {
        "tf-nav-btn"
    }
}

pub fn method_button(active: bool) -> &'static str {
    if active {
        "tf-method active"
    } else {
        "tf-method"
    }
}

// ============================================
// INPUT STYLES
// ============================================

pub const INPUT: &str = "tf-input";
pub const LABEL: &str = "tf-label";

// ============================================
// PANEL / CONTAINER STYLES
// ============================================

pub const PANEL: &str = "tf-panel";
pub const PANEL_HEAD: &str = "tf-panel-head";
pub const PLACEHOLDER: &str = "tf-placeholder";
pub const NOTE: &str = "tf-note";

// ============================================
// TABLE STYLES
// ============================================

pub const TABLE_WRAP: &str = "tf-table-wrap";
pub const TABLE: &str = "tf-table";
pub const TABLE_EMPTY: &str = "tf-empty";

// ============================================
// TEXT STYLES
// ============================================

pub const H1: &str = "tf-h1";
pub const H2: &str = "tf-h2";
pub const MUTED: &str = "tf-muted";
pub const MONO: &str = "tf-mono";
pub const NUM: &str = "tf-num";

pub fn kpi_value(accent: bool) -> &'static str {
    if accent {
        "tf-kpi-value accent"
    } else {
        "tf-kpi-value"
    }
}
