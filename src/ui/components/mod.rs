pub mod breakdown;
pub mod history_table;
pub mod kpi_card;
pub mod toast;
