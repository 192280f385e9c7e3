pub mod aggregate;
pub mod completion;
pub mod day_status;
pub mod expected;
