//! Infrastructure layer - storage backends, services and logging

pub mod logging;
pub mod storage;
pub mod team;
pub mod user;
