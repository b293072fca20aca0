//! # hunter.io Client
//! Asynchronous wrapper around the [hunter.io](https://hunter.io) v2 email-intelligence API: account information, domain search, email finding, email verification and email counting, through [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust developers enriching leads or checking addresses from their own services or scripts: build a typed query ([`DomainSearchQuery`], [`EmailFinderQuery`], [`EmailVerifierQuery`], [`EmailCountQuery`]), send it, and read the decoded envelope from [`models`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest`. A [`Client`] is cheap to clone and can be shared across tasks without locking. Every call has a `*_with_cancel` variant taking a `tokio_util` [`CancellationToken`](tokio_util::sync::CancellationToken).
//!
//! ## Out of scope
//! No retries, backoff, local rate limiting, caching or automatic pagination. Each method performs exactly one GET request; what to do with a failure is up to the caller.
//!
//! ## Errors
//! Documented API statuses map to dedicated [`Error`] variants ([`Error::Unauthorized`], [`Error::TooManyRequests`], ...), any other status to [`Error::ServerError`]. Transport failures are [`Error::Request`] or [`Error::Cancelled`]; bodies that do not decode are [`Error::Json`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Example
//! ```no_run
//! use hunter_client::{Client, DomainSearchQuery, EmailVerifierQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hunter_client::Error> {
//!     // Reads HUNTER_API_KEY.
//!     let client = Client::new()?;
//!
//!     let search = client.domain_search(&DomainSearchQuery::domain("stripe.com")?).await?;
//!     println!("{} addresses known", search.meta.results);
//!
//!     let check = client.verify_email(&EmailVerifierQuery::new("steli@close.io")?).await?;
//!     println!("{}: {:?}", check.data.email, check.data.result);
//!     Ok(())
//! }
//! ```

mod client;
mod endpoint;
mod error;
pub mod models;
mod query;

pub use client::{Client, ClientBuilder};
pub use endpoint::Endpoint;
pub use error::Error;
pub use models::{
    AccountInformation, DomainSearchResult, EmailCountResult, EmailFinderResult,
    EmailVerifierResult,
};
pub use query::{
    AccountQuery, Department, DomainSearchQuery, EmailCountQuery, EmailFinderQuery, EmailType,
    EmailVerifierQuery, Params, PersonName, Query, Seniority, Target,
};

/// Result type alias for hunter.io operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
