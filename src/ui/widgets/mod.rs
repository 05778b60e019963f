//! TUI widgets.

mod betslip_panel;
mod default_amount_prompt;
mod help;
mod key_hints;
mod market_feed;
mod notifications;
mod placeholder;
mod status_bar;
mod tab_bar;

pub use betslip_panel::BetslipPanel;
pub use default_amount_prompt::DefaultAmountPrompt;
pub use help::HelpPanel;
pub use key_hints::KeyHints;
pub use market_feed::MarketFeed;
pub use notifications::render_notification;
pub use placeholder::Placeholder;
pub use status_bar::StatusBar;
pub use tab_bar::TabBar;
