//! Team infrastructure module

mod service;

pub use service::TeamService;
