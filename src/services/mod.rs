// Service module exports

pub mod host;
pub mod store;
pub mod tooltip;
pub mod transform;
