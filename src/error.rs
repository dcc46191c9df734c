//! The error record and its constructors.

use std::error::Error as StdError;
use std::fmt;

use crate::origin::Origin;

/// Boxed foreign error, the shape accepted anywhere a cause is wrapped.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// One link in a causal chain: a message, an optional wrapped cause, and
/// the captured construction site.
///
/// Records are immutable once constructed; formatting and chain walking
/// never mutate them. `Error` implements [`std::error::Error`], exposing
/// its cause through `source()` so standard-library chain walkers and
/// foreign code interoperate with it.
#[derive(Debug)]
pub struct Error {
    message: String,
    cause: Option<BoxError>,
    origin: Origin,
}

impl Error {
    /// Builds a root record with no cause.
    ///
    /// File and line are captured from the immediate caller. Use the
    /// [`new!`](macro@crate::new) macro when the function name should be
    /// captured too, or when the message needs `format!` interpolation.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Error {
            message: message.into(),
            cause: None,
            origin: Origin::capture(),
        }
    }

    /// Wraps a known-present cause with a new message and a freshly
    /// captured origin.
    #[track_caller]
    pub fn wrap(cause: impl Into<BoxError>, message: impl Into<String>) -> Self {
        Error {
            message: message.into(),
            cause: Some(cause.into()),
            origin: Origin::capture(),
        }
    }

    #[doc(hidden)]
    pub fn from_parts(message: String, cause: Option<BoxError>, origin: Origin) -> Self {
        Error {
            message,
            cause,
            origin,
        }
    }

    /// The message describing this link.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The immediate wrapped cause, if any.
    pub fn cause(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn StdError + 'static))
    }

    /// The captured construction site.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause()
    }
}

/// Builds a root record with no cause; see [`Error::new`].
#[track_caller]
pub fn new(message: impl Into<String>) -> Error {
    Error::new(message)
}

/// Wraps `cause` with a new message, or returns `None` when there is
/// nothing to wrap.
///
/// The `None` short-circuit lets a call site propagate unconditionally
/// after a fallible operation without checking the outcome first; no
/// record is created for the success path.
#[track_caller]
pub fn propagate<E>(cause: Option<E>, message: impl Into<String>) -> Option<Error>
where
    E: Into<BoxError>,
{
    // Captured here, not in the closure: `#[track_caller]` does not reach
    // through closure frames.
    let origin = Origin::capture();
    cause.map(|cause| Error::from_parts(message.into(), Some(cause.into()), origin))
}

/// Extension trait wrapping the error arm of a `Result` in a new record.
///
/// The `Ok` arm passes through untouched, so `.propagate("...")?` reads
/// as a single unconditional propagation step after any fallible call.
pub trait Propagate<T> {
    /// Wraps the error arm with `message` and a captured origin.
    #[track_caller]
    fn propagate(self, message: impl Into<String>) -> Result<T, Error>;

    /// Like [`Propagate::propagate`], but the message is built lazily,
    /// only when the result is an error.
    #[track_caller]
    fn with_propagate<F>(self, message: F) -> Result<T, Error>
    where
        F: FnOnce() -> String;
}

impl<T, E> Propagate<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    #[track_caller]
    fn propagate(self, message: impl Into<String>) -> Result<T, Error> {
        let origin = Origin::capture();
        self.map_err(|cause| Error::from_parts(message.into(), Some(cause.into()), origin))
    }

    #[track_caller]
    fn with_propagate<F>(self, message: F) -> Result<T, Error>
    where
        F: FnOnce() -> String,
    {
        let origin = Origin::capture();
        self.map_err(|cause| Error::from_parts(message(), Some(cause.into()), origin))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::display(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_captures_origin() {
        let err = Error::new("boom");
        assert_eq!(err.message(), "boom");
        assert!(err.cause().is_none());
        assert!(err.origin().file.ends_with("error.rs"));
        assert!(err.origin().line > 0);
        assert!(err.origin().function.is_empty());
    }

    #[test]
    fn test_wrap_exposes_cause_through_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = Error::wrap(io, "could not read state");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "gone");
    }

    #[test]
    fn test_propagate_none_short_circuits() {
        assert!(propagate(None::<std::io::Error>, "ignored").is_none());
    }

    #[test]
    fn test_propagate_some_wraps() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        let err = propagate(Some(io), "could not flush").unwrap();
        assert_eq!(err.message(), "could not flush");
        assert_eq!(err.cause().unwrap().to_string(), "disk");
    }

    #[test]
    fn test_result_propagate_wraps_err_arm() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = res.propagate("could not open socket").unwrap_err();
        assert_eq!(err.message(), "could not open socket");
        assert_eq!(err.cause().unwrap().to_string(), "denied");
    }

    #[test]
    fn test_result_propagate_passes_ok_through() {
        let res: Result<u32, std::io::Error> = Ok(7);
        assert_eq!(res.propagate("unused").unwrap(), 7);
    }

    #[test]
    fn test_with_propagate_is_lazy() {
        let res: Result<u32, std::io::Error> = Ok(7);
        let out = res.with_propagate(|| unreachable!("must not run on Ok"));
        assert_eq!(out.unwrap(), 7);
    }
}
