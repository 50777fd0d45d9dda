#![warn(clippy::uninlined_format_args)]

pub mod error_presenter;
pub mod settlement_presenter;

pub use error_presenter::ErrorPresenter;
pub use settlement_presenter::{SettlementPresenter, SettlementView};
