//! Faults raised by application code
//!
//! A `Fault` carries a kind, a message and the call chain captured when it
//! was raised. Constructors are `#[track_caller]`, so the raise site becomes
//! the innermost frame; `Fault::propagated` appends the re-raise point as an
//! outer frame without touching kind or message.

use std::fmt;
use std::panic::Location;

/// Fault categories, logged verbatim by name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// Malformed input that could not be parsed
    Format,
    /// Integer division by zero
    DivideByZero,
    /// Use of an absent value
    NullReference,
    /// Index beyond a container's extent
    IndexOutOfRange,
    /// Query over an empty or non-matching collection
    NotFound,
    /// Explicit precondition violation on a missing argument
    ArgumentNull,
    /// Anything else, tagged by the caller
    Other(String),
}

impl FaultKind {
    /// Tag written to the error log
    pub fn name(&self) -> &str {
        match self {
            FaultKind::Format => "FormatError",
            FaultKind::DivideByZero => "DivideByZeroError",
            FaultKind::NullReference => "NullReferenceError",
            FaultKind::IndexOutOfRange => "IndexOutOfRangeError",
            FaultKind::NotFound => "NotFoundError",
            FaultKind::ArgumentNull => "ArgumentNullError",
            FaultKind::Other(name) => name.as_str(),
        }
    }

    /// Message used when the raise site supplies none
    pub fn default_message(&self) -> &'static str {
        match self {
            FaultKind::Format => "Input string was not in a correct format.",
            FaultKind::DivideByZero => "Attempted to divide by zero.",
            FaultKind::NullReference => "Object reference not set to an instance of an object.",
            FaultKind::IndexOutOfRange => "Index was outside the bounds of the array.",
            FaultKind::NotFound => "Sequence contains no matching element",
            FaultKind::ArgumentNull => "Value cannot be null.",
            FaultKind::Other(_) => "An unspecified fault occurred.",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a captured call chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Source file path; empty when the frame has no file information
    pub file: String,
    /// Line within `file`, 0 when unknown
    pub line: u32,
    /// Enclosing function, when the caller recorded one
    pub function: Option<String>,
}

impl Frame {
    /// Frame for the caller's own source location
    #[track_caller]
    pub fn here() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: location.file().to_string(),
            line: location.line(),
            function: None,
        }
    }

    /// Frame with no file information (e.g. a symbol-only frame)
    pub fn opaque(function: &str) -> Self {
        Self {
            file: String::new(),
            line: 0,
            function: Some(function.to_string()),
        }
    }

    pub fn has_file(&self) -> bool {
        !self.file.is_empty()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.has_file(), &self.function) {
            (true, Some(function)) => write!(f, "{} ({}:{})", function, self.file, self.line),
            (true, None) => write!(f, "{}:{}", self.file, self.line),
            (false, Some(function)) => write!(f, "{} (no file)", function),
            (false, None) => f.write_str("<unknown>"),
        }
    }
}

/// Captured call chain, innermost (raise site) first
pub type Trace = Vec<Frame>;

/// One-line rendering of a call chain, innermost first
pub fn render_trace(trace: &[Frame]) -> String {
    if trace.is_empty() {
        return "<empty>".to_string();
    }
    trace
        .iter()
        .map(|frame| frame.to_string())
        .collect::<Vec<_>>()
        .join(" <- ")
}

/// A raised error carrying kind, message and call chain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Fault {
    kind: FaultKind,
    message: String,
    trace: Trace,
}

impl Fault {
    /// Raise a fault at the caller's location
    #[track_caller]
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            trace: vec![Frame::here()],
        }
    }

    /// Raise a fault with the kind's stock message
    #[track_caller]
    pub fn of(kind: FaultKind) -> Self {
        let message = kind.default_message();
        Self::new(kind, message)
    }

    /// Build a fault from an externally captured call chain
    pub fn with_trace(kind: FaultKind, message: impl Into<String>, trace: Trace) -> Self {
        Self {
            kind,
            message: message.into(),
            trace,
        }
    }

    /// Record the caller as an outer re-raise point
    #[track_caller]
    pub fn propagated(mut self) -> Self {
        self.trace.push(Frame::here());
        self
    }

    pub fn kind(&self) -> &FaultKind {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> &[Frame] {
        &self.trace
    }

    /// First frame, innermost outward, that carries file information
    pub fn origin(&self) -> Option<&Frame> {
        self.trace.iter().find(|frame| frame.has_file())
    }
}
