//! Constructor macros with `format!` interpolation and function-name
//! capture.
//!
//! There is no runtime caller-symbol lookup in Rust, so the enclosing
//! function's name is resolved at expansion time: each macro declares a
//! nested item and reads its type name, which embeds the full path of the
//! function it expanded in. [`crate::Origin::from_macro`] strips the
//! nested-item and closure suffixes back off.

#[doc(hidden)]
pub fn __type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}

/// Builds a root [`Error`](crate::Error) with a `format!`-style message
/// and a fully captured origin, function name included.
///
/// ```
/// let err = chainerr::new!("could not connect to {}", "db.local:5432");
/// assert_eq!(err.message(), "could not connect to db.local:5432");
/// ```
#[macro_export]
macro_rules! new {
    ($($arg:tt)*) => {{
        fn __f() {}
        $crate::Error::from_parts(
            ::std::format!($($arg)*),
            ::std::option::Option::None,
            $crate::Origin::from_macro(
                ::std::file!(),
                ::std::line!(),
                $crate::__type_name_of(__f),
            ),
        )
    }};
}

/// Wraps an optional cause with a `format!`-style message, or yields
/// `None` when there is nothing to wrap.
///
/// Mirrors [`propagate`](fn@crate::propagate), adding message interpolation
/// and function-name capture:
///
/// ```
/// let cause = Some(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
/// let err = chainerr::propagate!(cause, "could not flush {}", "wal").unwrap();
/// assert_eq!(err.message(), "could not flush wal");
///
/// let nothing = chainerr::propagate!(None::<std::io::Error>, "ignored");
/// assert!(nothing.is_none());
/// ```
#[macro_export]
macro_rules! propagate {
    ($cause:expr, $($arg:tt)*) => {{
        fn __f() {}
        match $cause {
            ::std::option::Option::Some(cause) => {
                ::std::option::Option::Some($crate::Error::from_parts(
                    ::std::format!($($arg)*),
                    ::std::option::Option::Some(::std::convert::Into::into(cause)),
                    $crate::Origin::from_macro(
                        ::std::file!(),
                        ::std::line!(),
                        $crate::__type_name_of(__f),
                    ),
                ))
            }
            ::std::option::Option::None => ::std::option::Option::None,
        }
    }};
}
