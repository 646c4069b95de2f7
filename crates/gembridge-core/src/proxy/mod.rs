//! Request and response plumbing around the normalizer.

pub mod request;
pub mod response;
