pub mod calculator;
pub mod dashboard;
pub mod rules;
pub mod settings;

pub use calculator::CalculatorPage;
pub use dashboard::DashboardPage;
pub use rules::RulesPage;
pub use settings::SettingsPage;
