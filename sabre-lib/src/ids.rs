/*!

Compact identifier types.

An `f_code` identifies a symbol: positive codes are function (and predicate) symbols interned in
the signature, negative codes are variables dispensed by the variable bank. Term cells and types
are referred to by arena indexes into their owning bank; because both banks perfectly share their
cells, index equality is structural equality.

*/

use std::fmt::{Display, Formatter};

/// Symbol code: positive for function symbols, negative for variables. Zero is never a valid
/// code.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct FunCode(pub i64);

impl FunCode {
  #[inline(always)]
  pub const fn is_variable(self) -> bool {
    self.0 < 0
  }

  #[inline(always)]
  pub const fn is_function(self) -> bool {
    self.0 > 0
  }
}

impl Display for FunCode {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<i64> for FunCode {
  #[inline(always)]
  fn from(code: i64) -> Self {
    FunCode(code)
  }
}

macro_rules! arena_index {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    #[repr(transparent)]
    pub struct $name(u32);

    impl $name {
      #[inline(always)]
      pub const fn new(value: u32) -> Self {
        $name(value)
      }

      #[inline(always)]
      pub const fn from_usize(value: usize) -> Self {
        $name(value as u32)
      }

      #[inline(always)]
      pub const fn idx(self) -> usize {
        self.0 as usize
      }
    }

    impl Display for $name {
      fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
      }
    }
  };
}

arena_index!(
  /// Handle to a term cell in a [`TermBank`](crate::terms::TermBank). Because the bank perfectly
  /// shares cells, two structurally equal terms have the same `TermIndex`.
  TermIndex
);

arena_index!(
  /// Handle to a hash-consed type in a [`TypeBank`](crate::terms::TypeBank).
  TypeIndex
);

/// Clause identifier, unique within a session.
pub type ClauseIdent = u64;
