pub mod auth_handler;

pub use auth_handler::{
    __path_get_current_user, __path_login, __path_logout, __path_register, __path_verify_2fa,
    __path_verify_email, get_current_user, login, logout, register, verify_2fa, verify_email,
};
