//! Chained errors with call-site origins and configurable rendering
//!
//! This crate augments error values with causal chains and the source
//! location they were created at, then renders the whole chain either as
//! a multi-line trace or as a single summary line.
//!
//! # Features
//!
//! - `Error` record carrying a message, an optional wrapped cause, and a
//!   captured origin (file, line, function)
//! - Chain walkers: [`unwrap`], [`cause`], [`is`], [`is_eq`],
//!   [`find_cause`], and the [`chain`] iterator
//! - Two render modes selectable globally or per call: `{:+}` forces the
//!   full trace, `{:#}` the short summary
//! - Source path normalization so rendered traces are stable across
//!   machines and checkouts
//!
//! # Example
//!
//! ```
//! use chainerr::Propagate;
//!
//! fn connect() -> Result<(), chainerr::Error> {
//!     Err(chainerr::new!("could not connect to database"))
//! }
//!
//! fn create_repository() -> Result<(), chainerr::Error> {
//!     connect().propagate("could not create repository")
//! }
//!
//! let err = create_repository().unwrap_err();
//! assert_eq!(
//!     format!("{:#}", err),
//!     "could not create repository: could not connect to database"
//! );
//! ```
//!
//! # Global configuration
//!
//! [`set_default_format`], [`set_strip_path`] and [`set_source_roots`]
//! are process-wide. Set them once during startup, before any concurrent
//! work renders or constructs errors; reconfiguring them while other
//! threads are formatting is a logical race the caller must avoid.

pub mod chain;
pub mod error;
pub mod format;
mod macros;
pub mod origin;

pub use chain::{cause, chain, find_cause, is, is_eq, unwrap, Chain};
pub use error::{new, propagate, BoxError, Error, Propagate};
pub use format::{default_format, format_full, format_short, set_default_format, FormatMode};
pub use origin::{set_source_roots, set_strip_path, strip_path, Origin};

#[doc(hidden)]
pub use macros::__type_name_of;
