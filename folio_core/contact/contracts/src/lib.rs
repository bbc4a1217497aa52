pub mod config;
pub mod form;
pub mod submission;
pub mod validator;
