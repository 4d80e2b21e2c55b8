//! Runtime faults as seen by the classifier
//!
//! The classifier never looks at error messages. It only asks "is this fault an
//! instance of kind K", where kinds form a small single-parent hierarchy
//! (a refused connection is a connection fault, which is an OS fault). A fault
//! may carry several unrelated kinds at once, e.g. a connection timeout.
//!
//! Rust errors are turned into faults by type: `std::io::Error` by its
//! `ErrorKind`, UTF-8 errors as decode faults, parse errors as value faults, and
//! so on. Anything else becomes an unrecognized fault.

use crate::error::{TaxonomyError, TaxonomyResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::str::FromStr;

/// Closed set of runtime fault kinds understood by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    /// Generic operating-system / I/O fault. Root of the system faults.
    Os,
    Timeout,
    /// Low-level socket timeout; a special case of `Timeout`.
    SocketTimeout,
    /// Generic connection fault.
    Connection,
    ConnectionRefused,
    ConnectionReset,
    ConnectionAborted,
    BrokenPipe,
    /// URL resolution or other network-level fault.
    Network,
    PermissionDenied,
    FileNotFound,
    FileExists,
    OutOfMemory,
    /// Generic runtime fault.
    Runtime,
    RecursionLimit,
    /// Generic "bad value" fault.
    Value,
    Unicode,
    UnicodeDecode,
    UnicodeEncode,
    /// Generic lookup fault.
    Lookup,
    MissingKey,
    IndexOutOfRange,
    /// Value of the wrong type.
    Type,
}

impl FaultKind {
    /// Every kind, roots before descendants.
    pub const ALL: [FaultKind; 23] = [
        FaultKind::Os,
        FaultKind::Timeout,
        FaultKind::SocketTimeout,
        FaultKind::Connection,
        FaultKind::ConnectionRefused,
        FaultKind::ConnectionReset,
        FaultKind::ConnectionAborted,
        FaultKind::BrokenPipe,
        FaultKind::Network,
        FaultKind::PermissionDenied,
        FaultKind::FileNotFound,
        FaultKind::FileExists,
        FaultKind::OutOfMemory,
        FaultKind::Runtime,
        FaultKind::RecursionLimit,
        FaultKind::Value,
        FaultKind::Unicode,
        FaultKind::UnicodeDecode,
        FaultKind::UnicodeEncode,
        FaultKind::Lookup,
        FaultKind::MissingKey,
        FaultKind::IndexOutOfRange,
        FaultKind::Type,
    ];

    /// Direct ancestor of this kind, if any.
    pub fn parent(&self) -> Option<FaultKind> {
        match self {
            FaultKind::Timeout
            | FaultKind::Connection
            | FaultKind::Network
            | FaultKind::PermissionDenied
            | FaultKind::FileNotFound
            | FaultKind::FileExists => Some(FaultKind::Os),
            FaultKind::SocketTimeout => Some(FaultKind::Timeout),
            FaultKind::ConnectionRefused
            | FaultKind::ConnectionReset
            | FaultKind::ConnectionAborted
            | FaultKind::BrokenPipe => Some(FaultKind::Connection),
            FaultKind::RecursionLimit => Some(FaultKind::Runtime),
            FaultKind::Unicode => Some(FaultKind::Value),
            FaultKind::UnicodeDecode | FaultKind::UnicodeEncode => Some(FaultKind::Unicode),
            FaultKind::MissingKey | FaultKind::IndexOutOfRange => Some(FaultKind::Lookup),
            FaultKind::Os
            | FaultKind::OutOfMemory
            | FaultKind::Runtime
            | FaultKind::Value
            | FaultKind::Lookup
            | FaultKind::Type => None,
        }
    }

    /// True when `self` is `ancestor` or descends from it.
    pub fn is_a(&self, ancestor: FaultKind) -> bool {
        let mut current = Some(*self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FaultKind::Os => "os",
            FaultKind::Timeout => "timeout",
            FaultKind::SocketTimeout => "socket_timeout",
            FaultKind::Connection => "connection",
            FaultKind::ConnectionRefused => "connection_refused",
            FaultKind::ConnectionReset => "connection_reset",
            FaultKind::ConnectionAborted => "connection_aborted",
            FaultKind::BrokenPipe => "broken_pipe",
            FaultKind::Network => "network",
            FaultKind::PermissionDenied => "permission_denied",
            FaultKind::FileNotFound => "file_not_found",
            FaultKind::FileExists => "file_exists",
            FaultKind::OutOfMemory => "out_of_memory",
            FaultKind::Runtime => "runtime",
            FaultKind::RecursionLimit => "recursion_limit",
            FaultKind::Value => "value",
            FaultKind::Unicode => "unicode",
            FaultKind::UnicodeDecode => "unicode_decode",
            FaultKind::UnicodeEncode => "unicode_encode",
            FaultKind::Lookup => "lookup",
            FaultKind::MissingKey => "missing_key",
            FaultKind::IndexOutOfRange => "index_out_of_range",
            FaultKind::Type => "type",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaultKind {
    type Err = TaxonomyError;

    fn from_str(value: &str) -> TaxonomyResult<Self> {
        FaultKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                TaxonomyError::invalid_definition(format!("unknown fault kind {value:?}"))
            })
    }
}

/// A runtime fault reduced to the kinds it is an instance of.
///
/// # Example
///
/// ```rust
/// use agent_error_taxonomy::{Fault, FaultKind};
///
/// let refused = Fault::of(FaultKind::ConnectionRefused);
/// assert!(refused.is_instance_of(FaultKind::Connection));
/// assert!(refused.is_instance_of(FaultKind::Os));
/// assert!(!refused.is_instance_of(FaultKind::Timeout));
///
/// let connect_timeout = Fault::of(FaultKind::Connection).and(FaultKind::Timeout);
/// assert!(connect_timeout.is_instance_of(FaultKind::Timeout));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fault {
    kinds: Vec<FaultKind>,
}

impl Fault {
    /// A fault of exactly one kind.
    pub fn of(kind: FaultKind) -> Self {
        Self { kinds: vec![kind] }
    }

    /// A fault that is an instance of several unrelated kinds.
    pub fn with_kinds(kinds: impl IntoIterator<Item = FaultKind>) -> Self {
        let mut fault = Self::default();
        for kind in kinds {
            fault = fault.and(kind);
        }
        fault
    }

    /// A fault of a type the taxonomy does not know about.
    pub fn unrecognized() -> Self {
        Self::default()
    }

    /// Add another kind to this fault.
    pub fn and(mut self, kind: FaultKind) -> Self {
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
        self
    }

    /// The kinds this fault was declared with (ancestors not included).
    pub fn kinds(&self) -> &[FaultKind] {
        &self.kinds
    }

    pub fn is_recognized(&self) -> bool {
        !self.kinds.is_empty()
    }

    /// Instance test including ancestry.
    pub fn is_instance_of(&self, kind: FaultKind) -> bool {
        self.kinds.iter().any(|declared| declared.is_a(kind))
    }

    /// Reduce an arbitrary error value to a fault by its concrete type.
    ///
    /// Only the error value itself is inspected, not its `source()` chain.
    /// Unknown types yield [`Fault::unrecognized`].
    pub fn from_error(error: &(dyn std::error::Error + 'static)) -> Self {
        if let Some(io_error) = error.downcast_ref::<io::Error>() {
            return Self::from(io_error);
        }
        if let Some(json_error) = error.downcast_ref::<serde_json::Error>() {
            return Self::from(json_error);
        }
        if error.downcast_ref::<std::str::Utf8Error>().is_some()
            || error.downcast_ref::<std::string::FromUtf8Error>().is_some()
            || error.downcast_ref::<std::string::FromUtf16Error>().is_some()
        {
            return Self::of(FaultKind::UnicodeDecode);
        }
        if error.downcast_ref::<std::num::ParseIntError>().is_some()
            || error.downcast_ref::<std::num::ParseFloatError>().is_some()
            || error.downcast_ref::<std::str::ParseBoolError>().is_some()
        {
            return Self::of(FaultKind::Value);
        }
        if error.downcast_ref::<std::num::TryFromIntError>().is_some() {
            return Self::of(FaultKind::Value);
        }
        if error.downcast_ref::<tokio::time::error::Elapsed>().is_some() {
            return Self::of(FaultKind::Timeout);
        }
        Self::unrecognized()
    }
}

impl From<FaultKind> for Fault {
    fn from(kind: FaultKind) -> Self {
        Self::of(kind)
    }
}

impl From<io::ErrorKind> for Fault {
    fn from(kind: io::ErrorKind) -> Self {
        let fault_kind = match kind {
            io::ErrorKind::TimedOut => FaultKind::Timeout,
            io::ErrorKind::ConnectionRefused => FaultKind::ConnectionRefused,
            io::ErrorKind::ConnectionReset => FaultKind::ConnectionReset,
            io::ErrorKind::ConnectionAborted => FaultKind::ConnectionAborted,
            io::ErrorKind::BrokenPipe => FaultKind::BrokenPipe,
            io::ErrorKind::NotConnected => FaultKind::Connection,
            io::ErrorKind::PermissionDenied => FaultKind::PermissionDenied,
            io::ErrorKind::NotFound => FaultKind::FileNotFound,
            io::ErrorKind::AlreadyExists => FaultKind::FileExists,
            io::ErrorKind::OutOfMemory => FaultKind::OutOfMemory,
            io::ErrorKind::InvalidData => FaultKind::UnicodeDecode,
            _ => FaultKind::Os,
        };
        Self::of(fault_kind)
    }
}

impl From<&io::Error> for Fault {
    fn from(error: &io::Error) -> Self {
        Self::from(error.kind())
    }
}

impl From<&serde_json::Error> for Fault {
    fn from(error: &serde_json::Error) -> Self {
        match error.classify() {
            serde_json::error::Category::Io => Self::of(FaultKind::Os),
            serde_json::error::Category::Syntax
            | serde_json::error::Category::Data
            | serde_json::error::Category::Eof => Self::of(FaultKind::Value),
        }
    }
}

impl From<&std::str::Utf8Error> for Fault {
    fn from(_: &std::str::Utf8Error) -> Self {
        Self::of(FaultKind::UnicodeDecode)
    }
}

impl From<&std::string::FromUtf8Error> for Fault {
    fn from(_: &std::string::FromUtf8Error) -> Self {
        Self::of(FaultKind::UnicodeDecode)
    }
}

impl From<&tokio::time::error::Elapsed> for Fault {
    fn from(_: &tokio::time::error::Elapsed) -> Self {
        Self::of(FaultKind::Timeout)
    }
}
