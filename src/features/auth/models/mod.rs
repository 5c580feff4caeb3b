mod authenticated_user;
mod session;
mod user;
mod verification_code;

pub use authenticated_user::*;
pub use session::*;
pub use user::*;
pub use verification_code::*;
