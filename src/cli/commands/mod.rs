pub mod add;
pub mod code;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod metrics;
pub mod period;
pub mod user;
