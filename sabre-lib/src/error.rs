/*!

Error kinds for the core.

Only genuinely exceptional conditions are `Error`s: malformed input, semantically inconsistent
input, and exhausted resources. Logical failures — no unifier, no match, uncomparable terms, index
misses — are ordinary return values (`Option`, `bool`, `Option<Ordering>`) and must never travel
through this type. Invariant violations are assertions.

Each category maps to a distinct process exit code so front ends can report failures uniformly.

*/

use std::fmt::{Display, Formatter};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A position in scanned input, in `source:line:column` form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourcePos {
  pub source: String,
  pub line:   u32,
  pub column: u32,
}

impl Display for SourcePos {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}:{}:{}", self.source, self.line, self.column)
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResourceKind {
  OutOfMemory,
  CpuLimit,
  Io,
}

impl Display for ResourceKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      ResourceKind::OutOfMemory => write!(f, "out of memory"),
      ResourceKind::CpuLimit    => write!(f, "CPU time limit exceeded"),
      ResourceKind::Io          => write!(f, "file I/O failure"),
    }
  }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// Malformed input: unexpected token, missing bracket. Fatal to the enclosing parser
  /// operation.
  #[error("{pos}: syntax error: expected {expected}, found {found}")]
  Syntax {
    pos:      SourcePos,
    expected: String,
    found:    String,
  },

  /// Well-formed but inconsistent input: duplicate PCL identifier, incompatible precedence
  /// constraint, missing required file variable.
  #[error("{pos}: {message}")]
  Semantic { pos: SourcePos, message: String },

  #[error("resource exhausted: {0}")]
  Resource(ResourceKind),

  #[error("usage error: {0}")]
  Usage(String),
}

impl Error {
  pub fn syntax(pos: SourcePos, expected: impl Into<String>, found: impl Into<String>) -> Self {
    Error::Syntax {
      pos,
      expected: expected.into(),
      found: found.into(),
    }
  }

  pub fn semantic(pos: SourcePos, message: impl Into<String>) -> Self {
    Error::Semantic {
      pos,
      message: message.into(),
    }
  }

  /// Distinct exit code per category, for the top-level driver.
  pub fn exit_code(&self) -> i32 {
    match self {
      Error::Usage(_)     => 1,
      Error::Syntax { .. } => 2,
      Error::Semantic { .. } => 3,
      Error::Resource(_)  => 4,
    }
  }
}
