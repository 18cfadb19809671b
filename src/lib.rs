//! Plant diary: a photo and an optional note go in, a three-part reflection
//! from a multimodal model comes out.
//!
//! The server side is [`routes::router`] in front of a [`provider::ProviderClient`],
//! which alone holds the provider credential. The page side is a [`session::Session`]
//! talking to the proxy through a [`client::ProxyClient`].

pub mod client;
pub mod config;
pub mod diary;
pub mod error;
pub mod photo;
pub mod pipeline;
pub mod prompt;
pub mod provider;
pub mod reply;
pub mod routes;
pub mod session;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use pipeline::{Analyzer, Submission};
pub use reply::StructuredReply;
