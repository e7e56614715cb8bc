/*!

A `NatSet` is a set of (small) natural numbers. The operations we need are membership, insertion,
union, and superset testing, all of which the backing bit-set implements in time linear in the
largest stored value.

*/

use std::fmt::{Debug, Display, Formatter};

use bit_set::BitSet;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct NatSet(BitSet);

impl NatSet {
  #[inline(always)]
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn with_capacity(count: usize) -> Self {
    NatSet(BitSet::with_capacity(count))
  }

  #[inline(always)]
  pub fn contains(&self, value: usize) -> bool {
    self.0.contains(value)
  }

  /// Inserts the value, returning `true` if it was not already present.
  #[inline(always)]
  pub fn insert(&mut self, value: usize) -> bool {
    self.0.insert(value)
  }

  #[inline(always)]
  pub fn remove(&mut self, value: usize) -> bool {
    self.0.remove(value)
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline(always)]
  pub fn clear(&mut self) {
    self.0.clear()
  }

  #[inline(always)]
  pub fn union_in_place(&mut self, other: &NatSet) {
    self.0.union_with(&other.0)
  }

  #[inline(always)]
  pub fn is_superset(&self, other: &NatSet) -> bool {
    self.0.is_superset(&other.0)
  }

  #[inline(always)]
  pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
    self.0.iter()
  }
}

impl FromIterator<usize> for NatSet {
  fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
    let mut set = NatSet::new();
    for value in iter {
      set.insert(value);
    }
    set
  }
}

impl Display for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "{{")?;
    let mut first = true;
    for value in self.iter() {
      if !first {
        write!(f, ", ")?;
      }
      write!(f, "{}", value)?;
      first = false;
    }
    write!(f, "}}")
  }
}

impl Debug for NatSet {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    Display::fmt(self, f)
  }
}
