/*!

We need a version of `std::cmp::Ordering` that also has an `Incomparable` variant: term orderings
are partial, and "uncomparable" is a first-class outcome, never an error. The constants below let
client code write `PartialOrdering::Greater` etc. while staying interoperable with the standard
`Ordering` where a comparison is known to be total.

There are also convenience free functions for converting a number to `Ordering` or
`Option<Ordering>` based on its sign.

*/

use std::cmp::Ordering;

#[allow(non_snake_case)]
pub mod PartialOrdering {
  #![allow(non_upper_case_globals)]

  use std::cmp::Ordering;

  pub const Greater     : Option<Ordering> = Some(Ordering::Greater);
  pub const Less        : Option<Ordering> = Some(Ordering::Less);
  pub const Equal       : Option<Ordering> = Some(Ordering::Equal);
  pub const Incomparable: Option<Ordering> = None;

  pub fn from_sign<T>(value: T) -> Option<Ordering>
      where T: Into<i64>
  {
    let value: i64 = value.into();
    if value > 0 {
      Greater
    } else if value < 0 {
      Less
    } else {
      Equal
    }
  }

  #[inline(always)]
  pub fn from(ordering: Ordering) -> Option<Ordering> {
    Some(ordering)
  }

  /// The opposite partial comparison result, `Incomparable` being its own opposite.
  #[inline(always)]
  pub fn reverse(result: Option<Ordering>) -> Option<Ordering> {
    result.map(Ordering::reverse)
  }
}

#[inline(always)]
pub fn ordering_from_sign<T>(value: T) -> Ordering
    where T: Into<i64>
{
  let value: i64 = value.into();

  if value > 0 {
    Ordering::Greater
  } else if value < 0 {
    Ordering::Less
  } else {
    Ordering::Equal
  }
}
