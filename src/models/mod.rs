pub mod charge_code;
pub mod role;
pub mod time_entry;
pub mod user;
