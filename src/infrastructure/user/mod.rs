//! User infrastructure module

mod service;

pub(crate) use service::{parse_team_id, parse_user_id};
pub use service::UserService;
