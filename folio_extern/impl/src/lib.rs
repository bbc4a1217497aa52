pub mod contact;
mod envelope;
mod http;
