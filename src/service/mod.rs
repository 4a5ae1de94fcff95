pub mod attendance;
pub mod auth;
pub mod log;
pub mod report;
