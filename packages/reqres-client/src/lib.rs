//! reqres API client
//!
//! This crate provides the building blocks the suite drives the remote API
//! with:
//! - [`RequestSpec`]: immutable request defaults (JSON content type, API key
//!   header, logging) shared by every call of a run
//! - [`ResponseSpec`]: an exact status expectation, checked before any body
//!   is mapped
//! - typed records for users and registrations
//! - [`ReqresClient`]: one method per endpoint, each returning the raw
//!   [`Exchange`]
//!
//! # Example
//!
//! ```rust,no_run
//! use reqres_client::{ReqresClient, RequestSpec, ResponseSpecs, UsersPage};
//! use reqres_shared_config::ApiConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ApiConfig::default();
//! let client = ReqresClient::new(&config)?;
//! let spec = RequestSpec::from_config(&config)?;
//! let expect = ResponseSpecs::new(config.log_detail);
//!
//! let page: UsersPage = client
//!     .list_users(&spec, 2)
//!     .await?
//!     .expect(&expect.ok)?
//!     .json()?;
//! for user in &page.data {
//!     println!("{}: {}", user.id, user.first_name);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod models;
mod response;
mod spec;

pub use client::ReqresClient;
pub use error::{ReqresError, ReqresResult};
pub use models::{
    RegistrationOutcome, RegistrationRequest, RegistrationResponse, SingleUser, UserRecord,
    UserRequest, UserResponse, UsersPage,
};
pub use response::{Exchange, ValidatedResponse};
pub use spec::{
    RequestSpec, RequestSpecBuilder, ResponseSpec, ResponseSpecs, API_KEY_HEADER,
    JSON_CONTENT_TYPE,
};

pub use reqres_shared_config::LogDetail;
pub use reqwest::{Method, StatusCode};
