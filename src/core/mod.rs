pub mod access;
pub mod backup;
pub mod entries;
pub mod holidays;
pub mod log;
pub mod settings;
pub mod state;
pub mod stats;
pub mod timer;
pub mod validation;
