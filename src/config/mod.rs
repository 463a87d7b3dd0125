pub mod commands;
pub mod manager;
pub mod model;
pub mod store;
