//! Call-site origin capture and source path normalization.
//!
//! Every constructor records where it was called: file and line come from
//! `#[track_caller]`, the function name (when available) from the
//! constructor macros. Captured paths run through a process-wide,
//! replaceable strip function so rendered traces are stable across
//! machines and checkouts.

use std::panic::Location;

use parking_lot::RwLock;

/// The captured construction site of an error record.
///
/// `file` and `function` are empty when the corresponding capture was
/// unavailable; rendering omits the location segment for such records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
    /// Source file path, after [`strip_path`] normalization.
    pub file: String,
    /// Simplified function name (`Type::method` or `function`), or empty.
    pub function: String,
    /// Source line, or zero when unknown.
    pub line: u32,
}

impl Origin {
    /// Whether any location was captured at all.
    pub fn is_empty(&self) -> bool {
        self.file.is_empty()
    }

    /// Captures file and line from the nearest non-`track_caller` frame.
    ///
    /// The function name stays empty on this path; the `new!` and
    /// `propagate!` macros use [`Origin::from_macro`] to fill it in.
    #[track_caller]
    pub(crate) fn capture() -> Self {
        let loc = Location::caller();
        Origin {
            file: strip_path(loc.file()),
            function: String::new(),
            line: loc.line(),
        }
    }

    #[doc(hidden)]
    pub fn from_macro(file: &str, line: u32, raw_function: &str) -> Self {
        Origin {
            file: strip_path(file),
            function: simplify_function_name(raw_function),
            line,
        }
    }
}

/// Reduces a fully qualified item path to `Type::method` or `function`.
///
/// Input comes from `std::any::type_name` of an item nested inside the
/// calling function, e.g. `app::repo::Repo::connect::__f` or
/// `app::run::{{closure}}::__f`. Closure markers and the nested item name
/// are stripped, then everything up to the receiver type (if any) is
/// dropped. Reference and generic-bracket decoration around the receiver
/// is removed.
pub(crate) fn simplify_function_name(raw: &str) -> String {
    let mut name = raw;
    if let Some(stripped) = name.strip_suffix("::__f") {
        name = stripped;
    }
    while let Some(stripped) = name.strip_suffix("::{{closure}}") {
        name = stripped;
    }

    let segments: Vec<&str> = name.split("::").collect();
    match segments.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [.., receiver, func] => {
            let receiver = receiver
                .trim_start_matches(['<', '&', '*'])
                .trim_end_matches('>');
            if receiver.chars().next().is_some_and(char::is_uppercase) {
                format!("{}::{}", receiver, func)
            } else {
                (*func).to_string()
            }
        }
    }
}

type StripFn = dyn Fn(&str) -> String + Send + Sync;

static STRIP_PATH: RwLock<Option<Box<StripFn>>> = RwLock::new(None);
static SOURCE_ROOTS: RwLock<Vec<String>> = RwLock::new(Vec::new());

/// Normalizes a captured source path.
///
/// Uses the function installed via [`set_strip_path`] when present,
/// otherwise strips the longest matching root registered through
/// [`set_source_roots`]. Paths matching no root pass through unchanged.
pub fn strip_path(path: &str) -> String {
    if let Some(custom) = STRIP_PATH.read().as_ref() {
        return custom(path);
    }
    strip_with_roots(path, &SOURCE_ROOTS.read())
}

/// Replaces the path normalization function process-wide.
///
/// Configure before spawning concurrent work; see the crate docs for the
/// global-configuration lifecycle.
pub fn set_strip_path<F>(strip: F)
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    *STRIP_PATH.write() = Some(Box::new(strip));
}

/// Registers the source roots the default strip function removes.
///
/// Roots are matched longest-first, so nested checkouts resolve to the
/// most specific prefix. Replaces any previously registered set.
pub fn set_source_roots<I, S>(roots: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut roots: Vec<String> = roots.into_iter().map(Into::into).collect();
    roots.sort_by_key(|r| std::cmp::Reverse(r.len()));
    *SOURCE_ROOTS.write() = roots;
}

fn strip_with_roots(path: &str, roots: &[String]) -> String {
    for root in roots {
        if let Some(rest) = path.strip_prefix(root.as_str()) {
            return rest.trim_start_matches(['/', '\\']).to_string();
        }
    }
    path.to_string()
}
