//! Runtime shared by every skyapi generated client.
//!
//! A generated module is a thin struct around [`Client`]: each of its methods
//! places parameters into an [`ApiRequest`] and hands it to
//! [`Client::request`], which owns the token lifecycle, query and body
//! encoding, and error classification.

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod request;
pub mod token;

pub use client::Client;
pub use config::{ClientConfig, OriginConvention};
pub use error::ClientError;
pub use request::{ApiRequest, Params, RequestOptions, path_segment, path_value};
pub use token::TokenState;

pub use reqwest::Method;
pub use serde_json::{self, Value};
