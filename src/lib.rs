// Calendar Widget Library
// Event tooltips and canonical event data binding for an embeddable calendar

pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod widget;

pub use error::WidgetError;
pub use widget::{CalendarWidget, WidgetAttributes, WidgetHost};
