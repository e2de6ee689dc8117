//! HTTP adapter over the word-count pipeline

pub mod api_server;

pub use api_server::{ApiServer, MAX_UPLOAD_BYTES};
