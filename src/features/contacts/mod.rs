//! Contact form intake and the admin inbox.
//!
//! | Method | Path | Access |
//! |--------|------|--------|
//! | POST | `/api/contacts` | public (multipart) |
//! | GET | `/api/contacts` | admin |
//! | GET | `/api/contacts/{id}` | admin |
//! | DELETE | `/api/contacts/{id}` | admin |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ContactService;
