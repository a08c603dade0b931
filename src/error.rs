use std::fmt;

/// Fatal conversion errors. Layout-local anomalies (wrap stalls, missing
/// image resources, unresolved style references) are recovered in place and
/// logged instead of surfacing here.
#[derive(Debug)]
pub enum Error {
    /// The section queue ran out of page geometry (or the document has no
    /// sections at all).
    MissingPageLayout,
    /// The document tree violates the source contract, e.g. a cell span
    /// reaching past the table grid.
    Contract(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingPageLayout => write!(f, "no page layout available for section"),
            Error::Contract(msg) => write!(f, "document contract violation: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Returned by the strict content-fit operations when content cannot fit
/// even alone on an empty line of its column. The column is left unchanged;
/// the caller decides between the forced path and rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overflow;

impl fmt::Display for Overflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "content too big for line")
    }
}

impl std::error::Error for Overflow {}
