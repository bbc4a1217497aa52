pub mod config;
pub mod inbox;
pub mod send;
