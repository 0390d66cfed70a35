//! # ユースケース層
//!
//! アラート送出のビジネスロジックを提供する。

mod alert;
mod template;

pub use alert::{AlertDispatchError, AlertDispatcher, DispatchCommand, DispatchOutcome};
pub use template::TemplateRenderer;
