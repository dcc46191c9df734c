//! Chain walkers: unwrap, root-cause extraction, membership tests, and
//! type-directed extraction over causal chains.

use std::error::Error as StdError;

use crate::error::Error;

/// Returns the immediate cause of `err`, one level down.
///
/// Library records expose their cause through `source()`, and foreign
/// errors that carry an unwrap capability do the same, so a single
/// `source()` call covers both.
pub fn unwrap<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a (dyn StdError + 'static)> {
    err.source()
}

/// Follows library-record causes to the root of the chain.
///
/// Returns the deepest error that is either not a library record or has
/// no cause. Foreign unwrap chains are left intact; only this crate's
/// own wrapping is peeled off.
pub fn cause<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    let mut curr = err;
    while let Some(record) = curr.downcast_ref::<Error>() {
        match record.cause() {
            Some(next) => curr = next,
            None => break,
        }
    }
    curr
}

/// Iterator over every link of a chain, outermost first.
///
/// The walk follows `source()`, so library records and foreign errors
/// interleave freely.
pub fn chain<'a>(err: &'a (dyn StdError + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// See [`chain`].
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.next?;
        self.next = curr.source();
        Some(curr)
    }
}

/// Tests whether `target` appears anywhere in `err`'s chain, by identity.
///
/// A `None` target matches only a `None` error. Two links match when they
/// are the same object; for matching by value equality on a concrete type
/// use [`is_eq`], and for extraction use [`find_cause`].
pub fn is(
    err: Option<&(dyn StdError + 'static)>,
    target: Option<&(dyn StdError + 'static)>,
) -> bool {
    let Some(target) = target else {
        return err.is_none();
    };
    let Some(err) = err else {
        return false;
    };
    chain(err).any(|link| same_object(link, target))
}

/// Tests whether a link equal to `target` appears anywhere in the chain.
///
/// Each link is downcast to `T` and compared with `==`; links of other
/// types are skipped. The `PartialEq` bound is what makes a target
/// eligible for value comparison.
pub fn is_eq<T>(err: &(dyn StdError + 'static), target: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    chain(err).any(|link| link.downcast_ref::<T>() == Some(target))
}

/// Returns the first link in the chain that is a `T`, outermost first.
///
/// `None` means the chain exhausted without a match.
pub fn find_cause<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    chain(err).find_map(|link| link.downcast_ref::<T>())
}

/// Identity comparison between two chain links.
///
/// A wrapper struct and its first field share an address while being
/// different values, so equal data pointers alone are not a match: the
/// vtables must agree too, or both sides must be library records (two
/// records at one address are necessarily the same record).
fn same_object(a: &(dyn StdError + 'static), b: &(dyn StdError + 'static)) -> bool {
    let addr_eq = std::ptr::eq(
        a as *const (dyn StdError + 'static) as *const (),
        b as *const (dyn StdError + 'static) as *const (),
    );
    if !addr_eq {
        return false;
    }
    std::ptr::eq(a, b)
        || (a.downcast_ref::<Error>().is_some() && b.downcast_ref::<Error>().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{propagate, Error};

    #[test]
    fn test_unwrap_root_is_none() {
        let root = Error::new("root");
        assert!(unwrap(&root).is_none());
    }

    #[test]
    fn test_unwrap_returns_immediate_cause() {
        let wrapped = Error::wrap(Error::new("inner"), "outer");
        let inner = unwrap(&wrapped).unwrap();
        assert_eq!(inner.downcast_ref::<Error>().unwrap().message(), "inner");
    }

    #[test]
    fn test_unwrap_delegates_to_foreign_source() {
        #[derive(Debug)]
        struct Foreign(Error);
        impl std::fmt::Display for Foreign {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "foreign")
            }
        }
        impl std::error::Error for Foreign {
            fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
                Some(&self.0)
            }
        }

        let foreign = Foreign(Error::new("buried"));
        let inner = unwrap(&foreign).unwrap();
        assert_eq!(inner.downcast_ref::<Error>().unwrap().message(), "buried");
    }

    #[test]
    fn test_cause_returns_root_record() {
        let a = Error::new("a");
        let b = propagate(Some(a), "b").unwrap();
        let c = propagate(Some(b), "c").unwrap();
        let root = cause(&c);
        assert_eq!(root.downcast_ref::<Error>().unwrap().message(), "a");
    }

    #[test]
    fn test_cause_stops_at_foreign_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let wrapped = Error::wrap(io, "outer");
        let root = cause(&wrapped);
        assert!(root.downcast_ref::<Error>().is_none());
        assert_eq!(root.to_string(), "gone");
    }

    #[test]
    fn test_cause_of_foreign_error_is_itself() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let root = cause(&io);
        assert_eq!(root.to_string(), "gone");
    }

    #[test]
    fn test_chain_yields_every_link_outermost_first() {
        let c = Error::wrap(Error::wrap(Error::new("a"), "b"), "c");
        let messages: Vec<String> = chain(&c)
            .map(|link| link.downcast_ref::<Error>().unwrap().message().to_string())
            .collect();
        assert_eq!(messages, ["c", "b", "a"]);
    }

    #[test]
    fn test_is_nil_semantics() {
        let err = Error::new("x");
        assert!(is(None, None));
        assert!(!is(Some(&err), None));
        assert!(!is(None, Some(&err)));
    }

    #[test]
    fn test_is_matches_self_and_chain_members() {
        let outer = Error::wrap(Error::wrap(Error::new("a"), "b"), "c");
        assert!(is(Some(&outer), Some(&outer)));

        let mid = unwrap(&outer).unwrap();
        let root = unwrap(mid).unwrap();
        assert!(is(Some(&outer), Some(mid)));
        assert!(is(Some(&outer), Some(root)));
    }

    #[test]
    fn test_is_distinguishes_wrapper_from_first_field() {
        #[derive(Debug)]
        struct Leaf(u32);
        impl std::fmt::Display for Leaf {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "leaf {}", self.0)
            }
        }
        impl std::error::Error for Leaf {}

        // repr(C) pins the field to offset zero, so the wrapper and its
        // field are distinct error values at the same address.
        #[repr(C)]
        #[derive(Debug)]
        struct Wrapper {
            first: Leaf,
        }
        impl std::fmt::Display for Wrapper {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "wrapper")
            }
        }
        impl std::error::Error for Wrapper {}

        let wrapper = Wrapper { first: Leaf(7) };
        assert!(!is(Some(&wrapper), Some(&wrapper.first)));
        assert!(!is(Some(&wrapper.first), Some(&wrapper)));
        assert!(is(Some(&wrapper), Some(&wrapper)));
        assert!(is(Some(&wrapper.first), Some(&wrapper.first)));
    }

    #[test]
    fn test_is_rejects_unrelated_error() {
        let outer = Error::wrap(Error::new("a"), "b");
        let stranger = Error::new("a");
        assert!(!is(Some(&outer), Some(&stranger)));
    }

    #[test]
    fn test_is_eq_matches_by_value() {
        #[derive(Debug, PartialEq)]
        struct Code(u32);
        impl std::fmt::Display for Code {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "code {}", self.0)
            }
        }
        impl std::error::Error for Code {}

        let outer = Error::wrap(Code(404), "lookup failed");
        assert!(is_eq(&outer, &Code(404)));
        assert!(!is_eq(&outer, &Code(500)));
    }

    #[test]
    fn test_find_cause_extracts_first_match() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let outer = Error::wrap(Error::wrap(io, "inner wrap"), "outer wrap");

        let found: &std::io::Error = find_cause(&outer).unwrap();
        assert_eq!(found.kind(), std::io::ErrorKind::NotFound);

        let record: &Error = find_cause(&outer).unwrap();
        assert_eq!(record.message(), "outer wrap");
    }

    #[test]
    fn test_find_cause_exhausts_without_match() {
        let outer = Error::wrap(Error::new("a"), "b");
        assert!(find_cause::<std::io::Error>(&outer).is_none());
    }
}
