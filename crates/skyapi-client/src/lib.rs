//! Client for the Skycatch API.
//!
//! The [`SkyApi`] struct is generated by `build.rs` from `spec/openapi.yaml`;
//! every operation in the spec becomes one async method taking a
//! [`Params`] object and [`RequestOptions`].
//!
//! ```no_run
//! use skyapi_client::{ClientConfig, Params, RequestOptions, SkyApi};
//!
//! # async fn run() -> Result<(), skyapi_client::ClientError> {
//! let api = SkyApi::new(ClientConfig::from_env())?;
//! let mut params = Params::new();
//! params.insert("lon".into(), 1.into());
//! params.insert("lat".into(), 2.into());
//! let projection = api.get_projections(&params, RequestOptions::default()).await?;
//! # let _ = projection;
//! # Ok(())
//! # }
//! ```

pub use skyapi_runtime;
pub use skyapi_runtime::{ApiRequest, ClientConfig, ClientError, Method, Params, RequestOptions, Value};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/client.rs"));
}

pub use generated::SkyApi;
