//! Remote catalog access
//!
//! The only contract between pages and the network is [`Envelope`]:
//! every call resolves to `Success(data)` or `Failure(message)`.

pub mod client;
pub mod envelope;

pub use client::CatalogClient;
pub use envelope::Envelope;
