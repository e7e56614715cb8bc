/*!

Equational literals.

A literal is a signed equation `lhs = rhs`; predicate atoms are encoded with the distinguished
`$true` term on the right-hand side. The property bit-set carries the sign, orientation and
maximality annotations computed against the active ordering, the selection flag, and a few
transient analysis flags whose lifetime follows the owning clause.

*/

use std::cmp::Ordering;

use enumflags2::{bitflags, BitFlags};
use sabre_abs::{PartialOrdering, SmallVec};

use crate::{
  orderings::{ordering_compare, Ocb},
  terms::{DerefPolicy, TermBank, TermProperty},
  TermIndex,
};

#[bitflags]
#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EqnProperty {
  Positive,
  /// The left-hand side is strictly greater than the right in the active ordering.
  Oriented,
  /// No other literal in the owning clause is strictly greater.
  Maximal,
  /// Maximal, and no other literal is equal in the literal ordering.
  StrictlyMaximal,
  Selected,
  /// A real equation between first-order terms, as opposed to a predicate atom.
  Equational,
  /// Inherited paramodulation literal: selection must pick these first.
  InheritsParamod,
  /// Scratch flag for analysis traversals.
  Flagged,
}

pub type EqnProperties = BitFlags<EqnProperty, u16>;

#[derive(Clone, Debug)]
pub struct Eqn {
  pub lterm: TermIndex,
  pub rterm: TermIndex,
  pub properties: EqnProperties,
}

impl Eqn {
  /// Creates a literal. Predicate atoms (right side `$true`) get their atom flagged as a
  /// predicate position so no variable ever matches there.
  pub fn new(bank: &mut TermBank, lterm: TermIndex, rterm: TermIndex, positive: bool) -> Eqn {
    let mut properties = EqnProperties::empty();
    if positive {
      properties |= EqnProperty::Positive;
    }
    if rterm != bank.true_term() {
      properties |= EqnProperty::Equational;
    } else {
      bank.cell_mut(lterm).set_property(TermProperty::PredPos);
    }

    Eqn { lterm, rterm, properties }
  }

  #[inline(always)]
  pub fn is_positive(&self) -> bool {
    self.properties.contains(EqnProperty::Positive)
  }

  #[inline(always)]
  pub fn is_negative(&self) -> bool {
    !self.is_positive()
  }

  #[inline(always)]
  pub fn is_equational(&self) -> bool {
    self.properties.contains(EqnProperty::Equational)
  }

  #[inline(always)]
  pub fn is_oriented(&self) -> bool {
    self.properties.contains(EqnProperty::Oriented)
  }

  #[inline(always)]
  pub fn is_maximal(&self) -> bool {
    self.properties.contains(EqnProperty::Maximal)
  }

  #[inline(always)]
  pub fn is_selected(&self) -> bool {
    self.properties.contains(EqnProperty::Selected)
  }

  #[inline(always)]
  pub fn set_property(&mut self, property: EqnProperty) {
    self.properties |= property;
  }

  #[inline(always)]
  pub fn clear_property(&mut self, property: EqnProperty) {
    self.properties &= !BitFlags::from(property);
  }

  pub fn swap_sides(&mut self) {
    std::mem::swap(&mut self.lterm, &mut self.rterm);
  }

  /// Standard weight of the literal: the sum of both term weights. The empty clause therefore
  /// has weight 0.
  #[inline(always)]
  pub fn standard_weight(&self, bank: &TermBank) -> i64 {
    bank.weight(self.lterm) + bank.weight(self.rterm)
  }

  /// Orients the literal against the ordering: swaps sides so the left one is maximal where the
  /// comparison decides, and sets the oriented flag iff the left side ends up strictly greater.
  /// Returns the orientation status.
  pub fn orient(&mut self, ocb: &Ocb, bank: &TermBank) -> bool {
    let result = ordering_compare(ocb, bank, self.lterm, self.rterm, DerefPolicy::Always, DerefPolicy::Always);

    if result == PartialOrdering::Less {
      self.swap_sides();
    }

    if result == PartialOrdering::Greater || result == PartialOrdering::Less {
      self.set_property(EqnProperty::Oriented);
      true
    } else {
      self.clear_property(EqnProperty::Oriented);
      false
    }
  }

  /// The literal as a term multiset for the multiset extension of the term ordering: `{l, r}`
  /// for a positive literal, `{l, l, r, r}` for a negative one.
  pub fn compare_multiset(&self) -> SmallVec<[TermIndex; 4]> {
    if self.is_positive() {
      SmallVec::from_slice(&[self.lterm, self.rterm])
    } else {
      SmallVec::from_slice(&[self.lterm, self.lterm, self.rterm, self.rterm])
    }
  }

  pub fn term_str(&self, bank: &TermBank) -> String {
    let sign = if self.is_positive() { "++" } else { "--" };
    if self.is_equational() {
      format!(
        "{}{}={}",
        sign,
        bank.term_str(self.lterm, DerefPolicy::Never),
        bank.term_str(self.rterm, DerefPolicy::Never)
      )
    } else {
      format!("{}{}", sign, bank.term_str(self.lterm, DerefPolicy::Never))
    }
  }
}

/// Compares two literals in the multiset extension of the term ordering.
pub fn eqn_compare(ocb: &Ocb, bank: &TermBank, left: &Eqn, right: &Eqn) -> Option<Ordering> {
  multiset_compare(ocb, bank, &left.compare_multiset(), &right.compare_multiset())
}

/// Multiset extension of the term ordering over small term multisets: strip common elements
/// (shared terms compare by index), then the greater side must dominate every remaining element
/// of the other.
fn multiset_compare(
  ocb: &Ocb,
  bank: &TermBank,
  left: &[TermIndex],
  right: &[TermIndex],
) -> Option<Ordering> {
  let mut left: SmallVec<[TermIndex; 4]> = left.into();
  let mut right: SmallVec<[TermIndex; 4]> = right.into();

  // Cancel common elements.
  let mut i = 0;
  while i < left.len() {
    if let Some(j) = right.iter().position(|&t| t == left[i]) {
      left.swap_remove(i);
      right.swap_remove(j);
    } else {
      i += 1;
    }
  }

  match (left.is_empty(), right.is_empty()) {
    (true, true) => PartialOrdering::Equal,
    (false, true) => PartialOrdering::Greater,
    (true, false) => PartialOrdering::Less,
    (false, false) => {
      let left_dominates = right.iter().all(|&r| {
        left.iter().any(|&l| {
          ordering_compare(ocb, bank, l, r, DerefPolicy::Always, DerefPolicy::Always) == PartialOrdering::Greater
        })
      });
      if left_dominates {
        return PartialOrdering::Greater;
      }
      let right_dominates = left.iter().all(|&l| {
        right.iter().any(|&r| {
          ordering_compare(ocb, bank, r, l, DerefPolicy::Always, DerefPolicy::Always) == PartialOrdering::Greater
        })
      });
      if right_dominates {
        PartialOrdering::Less
      } else {
        PartialOrdering::Incomparable
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    orderings::OrderingKind,
    terms::ProblemType,
  };

  fn setup() -> (TermBank, Ocb) {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let f = bank.mk_symbol("f", 1);
    let g = bank.mk_symbol("g", 1);
    let a = bank.mk_symbol("a", 0);
    let mut ocb = Ocb::new(OrderingKind::Lpo, &bank.sig);
    ocb.set_precedence_rank(f, 30);
    ocb.set_precedence_rank(g, 20);
    ocb.set_precedence_rank(a, 10);
    (bank, ocb)
  }

  #[test]
  fn orient_swaps_to_the_greater_side() {
    let (mut bank, ocb) = setup();
    let f = bank.sig.find("f").unwrap();
    let a = bank.mk_constant("a");
    let fa = bank.apply(f, &[a]);

    // a = f(a) is oriented into f(a) = a.
    let mut eqn = Eqn::new(&mut bank, a, fa, true);
    assert!(eqn.orient(&ocb, &bank));
    assert!(eqn.is_oriented());
    assert_eq!(eqn.lterm, fa);
    assert_eq!(eqn.rterm, a);
  }

  #[test]
  fn unorientable_literal_stays_unoriented() {
    let (mut bank, ocb) = setup();
    let individual = bank.types.individual_type();
    let f = bank.sig.find("f").unwrap();
    let x = bank.fresh_variable(individual);
    let y = bank.fresh_variable(individual);
    let fx = bank.apply(f, &[x]);
    let fy = bank.apply(f, &[y]);

    let mut eqn = Eqn::new(&mut bank, fx, fy, true);
    assert!(!eqn.orient(&ocb, &bank));
    assert!(!eqn.is_oriented());
  }

  #[test]
  fn predicate_literal_is_not_equational() {
    let (mut bank, _) = setup();
    let p = bank.mk_predicate("p", 1);
    let a = bank.mk_constant("a");
    let atom = bank.apply(p, &[a]);
    let true_term = bank.true_term();

    let eqn = Eqn::new(&mut bank, atom, true_term, false);
    assert!(!eqn.is_equational());
    assert!(eqn.is_negative());
    assert!(bank.cell(atom).has_property(TermProperty::PredPos));
  }

  #[test]
  fn negative_literals_dominate_their_positive_twin() {
    let (mut bank, ocb) = setup();
    let f = bank.sig.find("f").unwrap();
    let a = bank.mk_constant("a");
    let fa = bank.apply(f, &[a]);

    // The negative literal's multiset {l,l,r,r} dominates the positive {l,r}.
    let positive = Eqn::new(&mut bank, fa, a, true);
    let negative = Eqn::new(&mut bank, fa, a, false);
    assert_eq!(eqn_compare(&ocb, &bank, &negative, &positive), PartialOrdering::Greater);
    assert_eq!(eqn_compare(&ocb, &bank, &positive, &negative), PartialOrdering::Less);
    assert_eq!(eqn_compare(&ocb, &bank, &positive, &positive), PartialOrdering::Equal);
  }
}
