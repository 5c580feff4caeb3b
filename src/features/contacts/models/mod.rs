mod attachment;
mod contact;

pub use attachment::*;
pub use contact::*;
