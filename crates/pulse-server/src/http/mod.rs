pub mod error;
pub mod handlers;
pub(crate) mod request_log;
