pub mod add;
pub mod auth;
pub mod calculator;
pub mod charge_code;
pub mod del;
pub mod log;
pub mod metrics;
pub mod period;
pub mod user;
