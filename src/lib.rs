//! mockgate - request gateway with environment-driven mock interception.
//!
//! A [`Gateway`] fetches resources from a remote HTTP API. When the process
//! runs under the `development` or `test` profile, requests for paths in the
//! [`MockCatalog`] never reach the network: they are answered from static
//! fixtures, or rejected with a simulated HTTP error on request.
//!
//! # Architecture
//!
//! - `gateway`: the entry point (`fetch_resource`, `fetch_with_mock_error`)
//! - `intercept`: pre-request and post-response mock hooks
//! - `catalog`: immutable fixture and error catalogs
//! - `transport`: the network boundary and its reqwest implementation
//! - `profile`: environment profile and the process-wide mocking flag
//! - `config`: YAML settings
//! - `todo`: typed records for the to-do resource
//! - `report`, `cli`: command-line front end
//!
//! # Example
//!
//! ```no_run
//! # async fn demo() -> Result<(), mockgate::GatewayError> {
//! use mockgate::{Gateway, RequestOptions};
//!
//! let gateway = Gateway::builder().mocking(true).build()?;
//! let body = gateway.fetch_resource("/todos", RequestOptions::new()).await?;
//! assert_eq!(body["todos"][0]["id"], 1);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod intercept;
pub mod profile;
pub mod report;
pub mod request;
pub mod todo;
pub mod transport;

pub use catalog::{MockCatalog, MockOutcome};
pub use config::Settings;
pub use error::GatewayError;
pub use gateway::{Gateway, GatewayBuilder, DEFAULT_BASE_URL};
pub use intercept::{Interception, MockInterceptor, MockSignal, Rejection};
pub use profile::{mocking_enabled, Profile};
pub use request::{RequestConfig, RequestOptions, ResponseEnvelope};
pub use todo::{fetch_todos, Todo, TodoList};
pub use transport::{HttpTransport, Transport};
