pub mod address;
pub mod config;
pub mod logging;
pub mod record;
pub mod udt;
