pub mod modal;
pub mod page;
pub mod panel;
