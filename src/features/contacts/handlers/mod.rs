pub mod contact_handler;

pub use contact_handler::*;
