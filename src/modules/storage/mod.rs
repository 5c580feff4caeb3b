//! Storage module for contact form attachments
//!
//! Streams uploaded files into the local uploads directory and removes them
//! again when a submission is rolled back or deleted.

mod local_disk;

pub use local_disk::{is_mime_type_allowed, LocalDiskStorage, StagedFile};
