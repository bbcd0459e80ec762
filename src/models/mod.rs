pub mod app_config;
pub mod category;
pub mod credential;
pub mod employee;
pub mod entry;
pub mod holiday;
pub mod pay_period;
pub mod source;
pub mod timer;
