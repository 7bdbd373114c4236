//! UI Components
//!
//! Reusable Leptos components.

mod board_view;
mod filter_bar;
mod lead_card;
mod lead_editor;
mod login_form;
mod stage_column;
mod toast;

pub use board_view::BoardView;
pub use filter_bar::FilterBar;
pub use lead_card::LeadCard;
pub use lead_editor::LeadEditor;
pub use login_form::LoginForm;
pub use stage_column::StageColumn;
pub use toast::ToastList;
