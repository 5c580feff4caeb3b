//! Admin authentication.
//!
//! Username + password followed by an emailed six-digit code. Sessions live in
//! the `sessions` table and are referenced by an opaque HttpOnly cookie.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/register` | Bootstrap only | Create the administrator |
//! | POST | `/api/login` | No | Check credentials, email a code |
//! | POST | `/api/verify-2fa` | Pending login | Complete the login |
//! | POST | `/api/verify-email` | Yes | Confirm the email address |
//! | POST | `/api/logout` | No | End the session |
//! | GET | `/api/user` | Yes | Current user |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod session_cookie;

pub use services::AuthService;
