/*!

Clauses: ordered lists of literals with cached sign counts, property bits, an identifier, proof
metadata, and parent references for proof reconstruction. Insertion order of literals matters
only for canonical printing and literal selection.

*/

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use enumflags2::{bitflags, BitFlags};
use sabre_abs::{join_iter, NatSet, SmallVec};

use crate::{
  clauses::eqn::{eqn_compare, Eqn, EqnProperty},
  orderings::Ocb,
  terms::TermBank,
  ClauseIdent,
  SysDate,
};

#[bitflags]
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ClauseProperty {
  /// Part of the initial problem rather than derived.
  Initial,
  Processed,
  Selected,
  Conjecture,
  ProofClause,
  /// Must not be discarded by simplification bookkeeping.
  Protected,
  /// Rewriting of this clause is restricted to its smaller sides.
  LimitedRW,
  /// Set-of-support member.
  SetOfSupport,
  /// Registered in a demodulator index.
  DemodIndexed,
  /// Registered in a subterm index.
  SubtermIndexed,
}

pub type ClauseProperties = BitFlags<ClauseProperty, u32>;

#[derive(Clone, Debug)]
pub struct Clause {
  pub ident:    ClauseIdent,
  literals:     Vec<Eqn>,
  pos_lit_no:   usize,
  neg_lit_no:   usize,
  pub properties: ClauseProperties,

  pub proof_depth:    u64,
  pub proof_distance: u64,
  pub date:           SysDate,
  pub parents:        SmallVec<[ClauseIdent; 2]>,
}

impl Clause {
  /// Creates a clause over the given literals, assigning a fresh identifier. The sign counts are
  /// established here and maintained by every literal operation.
  pub fn new(literals: Vec<Eqn>) -> Clause {
    static CLAUSE_COUNT: AtomicU64 = AtomicU64::new(0);
    let ident = CLAUSE_COUNT.fetch_add(1, AtomicOrdering::Relaxed) + 1;

    let pos_lit_no = literals.iter().filter(|eqn| eqn.is_positive()).count();
    let neg_lit_no = literals.len() - pos_lit_no;

    Clause {
      ident,
      literals,
      pos_lit_no,
      neg_lit_no,
      properties: ClauseProperties::empty(),
      proof_depth: 0,
      proof_distance: 0,
      date: SysDate::creation(),
      parents: SmallVec::new(),
    }
  }

  pub fn empty() -> Clause {
    Clause::new(Vec::new())
  }

  // region Accessors

  #[inline(always)]
  pub fn literals(&self) -> &[Eqn] {
    &self.literals
  }

  #[inline(always)]
  pub fn literals_mut(&mut self) -> &mut [Eqn] {
    &mut self.literals
  }

  #[inline(always)]
  pub fn literal_count(&self) -> usize {
    self.literals.len()
  }

  #[inline(always)]
  pub fn pos_lit_no(&self) -> usize {
    self.pos_lit_no
  }

  #[inline(always)]
  pub fn neg_lit_no(&self) -> usize {
    self.neg_lit_no
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.literals.is_empty()
  }

  #[inline(always)]
  pub fn is_unit(&self) -> bool {
    self.literals.len() == 1
  }

  /// At most one positive literal. The empty clause is Horn.
  #[inline(always)]
  pub fn is_horn(&self) -> bool {
    self.pos_lit_no <= 1
  }

  /// All literals positive. The empty clause is positive.
  #[inline(always)]
  pub fn is_positive(&self) -> bool {
    self.neg_lit_no == 0
  }

  #[inline(always)]
  pub fn is_negative(&self) -> bool {
    self.pos_lit_no == 0
  }

  #[inline(always)]
  pub fn has_property(&self, property: ClauseProperty) -> bool {
    self.properties.contains(property)
  }

  #[inline(always)]
  pub fn set_property(&mut self, property: ClauseProperty) {
    self.properties |= property;
  }

  #[inline(always)]
  pub fn clear_property(&mut self, property: ClauseProperty) {
    self.properties &= !BitFlags::from(property);
  }

  /// Standard weight: the sum over all literal weights; 0 for the empty clause.
  pub fn standard_weight(&self, bank: &TermBank) -> i64 {
    self.literals.iter().map(|eqn| eqn.standard_weight(bank)).sum()
  }

  // endregion

  // region Literal manipulation

  pub fn push_literal(&mut self, eqn: Eqn) {
    if eqn.is_positive() {
      self.pos_lit_no += 1;
    } else {
      self.neg_lit_no += 1;
    }
    self.literals.push(eqn);
  }

  pub fn remove_literal(&mut self, index: usize) -> Eqn {
    let eqn = self.literals.remove(index);
    if eqn.is_positive() {
      self.pos_lit_no -= 1;
    } else {
      self.neg_lit_no -= 1;
    }
    eqn
  }

  // endregion

  // region Ordering annotations

  /// Orients every literal against the ordering.
  pub fn orient_literals(&mut self, ocb: &Ocb, bank: &TermBank) {
    for eqn in self.literals.iter_mut() {
      eqn.orient(ocb, bank);
    }
  }

  /// Computes, for each literal, whether it is maximal in the clause: no other literal is
  /// strictly greater in the multiset extension of the literal ordering. Strict maximality
  /// additionally excludes literals another literal equals.
  pub fn mark_maximal_literals(&mut self, ocb: &Ocb, bank: &TermBank) {
    let count = self.literals.len();
    let mut dominated = NatSet::with_capacity(count);
    let mut equaled = NatSet::with_capacity(count);

    for i in 0..count {
      for j in 0..count {
        if i == j {
          continue;
        }
        match eqn_compare(ocb, bank, &self.literals[j], &self.literals[i]) {
          Some(Ordering::Greater) => {
            dominated.insert(i);
          }
          Some(Ordering::Equal) => {
            equaled.insert(i);
          }
          _ => {}
        }
      }
    }

    for (i, eqn) in self.literals.iter_mut().enumerate() {
      eqn.clear_property(EqnProperty::Maximal);
      eqn.clear_property(EqnProperty::StrictlyMaximal);
      if !dominated.contains(i) {
        eqn.set_property(EqnProperty::Maximal);
        if !equaled.contains(i) {
          eqn.set_property(EqnProperty::StrictlyMaximal);
        }
      }
    }
  }

  // endregion

  pub fn term_str(&self, bank: &TermBank) -> String {
    format!(
      "[{}]",
      join_iter(self.literals.iter().map(|eqn| eqn.term_str(bank)), ", ")
    )
  }
}
