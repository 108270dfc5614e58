// Module exports for models

pub mod event;
pub mod reference;
pub mod settings;
pub mod view_model;
