/*!

Substitutions.

A substitution is an ordered trail of variables whose `binding` slot was transiently set. The
binding overlay lives on the variable cells themselves; the trail only records which variables to
restore. `mark`/`backtrack_to` nest, each variable appears at most once on the trail, and a
variable's binding is non-null exactly when some pending push targets it.

*/

use crate::{terms::TermBank, TermIndex};

/// How far to chase variable bindings when inspecting a term.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DerefPolicy {
  Never,
  Once,
  Always,
}

impl DerefPolicy {
  /// The policy to apply to subterms after one level has been dereferenced.
  #[inline(always)]
  pub fn next(self) -> DerefPolicy {
    match self {
      DerefPolicy::Once => DerefPolicy::Never,
      other => other,
    }
  }
}

#[derive(Clone, Debug, Default)]
pub struct Substitution {
  trail: Vec<TermIndex>,
}

impl Substitution {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.trail.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.trail.is_empty()
  }

  /// Current trail position, for later backtracking.
  #[inline(always)]
  pub fn mark(&self) -> usize {
    self.trail.len()
  }

  /// Binds `var` to `value` and records the binding on the trail.
  pub fn add_binding(&mut self, bank: &mut TermBank, var: TermIndex, value: TermIndex) {
    let cell = bank.cell_mut(var);
    debug_assert!(cell.is_variable(), "only variables can be bound");
    debug_assert!(cell.binding.is_none(), "variable is already bound");

    cell.binding = Some(value);
    self.trail.push(var);
  }

  /// Undoes the most recent binding, returning the variable that was restored.
  pub fn pop_binding(&mut self, bank: &mut TermBank) -> Option<TermIndex> {
    let var = self.trail.pop()?;
    let cell = bank.cell_mut(var);
    debug_assert!(cell.binding.is_some());
    cell.binding = None;
    Some(var)
  }

  /// Pops bindings until the trail shrinks to `mark`.
  pub fn backtrack_to(&mut self, bank: &mut TermBank, mark: usize) {
    debug_assert!(mark <= self.trail.len(), "backtrack mark beyond trail");
    while self.trail.len() > mark {
      self.pop_binding(bank);
    }
  }

  /// Pops every binding.
  pub fn backtrack_all(&mut self, bank: &mut TermBank) {
    self.backtrack_to(bank, 0);
  }

  /// The bound variables, oldest first.
  #[inline(always)]
  pub fn bound_variables(&self) -> &[TermIndex] {
    &self.trail
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::terms::{ProblemType, TermBank};

  #[test]
  fn bindings_nest_and_restore() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let individual = bank.types.individual_type();
    let x = bank.fresh_variable(individual);
    let y = bank.fresh_variable(individual);
    let a = bank.mk_constant("a");

    let mut subst = Substitution::new();
    let outer = subst.mark();
    subst.add_binding(&mut bank, x, a);

    let inner = subst.mark();
    subst.add_binding(&mut bank, y, x);
    assert_eq!(bank.cell(y).binding, Some(x));
    assert_eq!(bank.deref(y, DerefPolicy::Always), a);
    assert_eq!(bank.deref(y, DerefPolicy::Once), x);

    subst.backtrack_to(&mut bank, inner);
    assert_eq!(bank.cell(y).binding, None);
    assert_eq!(bank.cell(x).binding, Some(a));

    subst.backtrack_to(&mut bank, outer);
    assert_eq!(bank.cell(x).binding, None);
    assert!(subst.is_empty());
  }

  #[test]
  fn trail_matches_bindings() {
    let mut bank = TermBank::new(ProblemType::FirstOrder);
    let individual = bank.types.individual_type();
    let a = bank.mk_constant("a");

    let mut subst = Substitution::new();
    let vars: Vec<_> = (0..8).map(|_| bank.fresh_variable(individual)).collect();
    for &var in vars.iter() {
      subst.add_binding(&mut bank, var, a);
    }

    // Every variable on the trail is bound, and only those.
    for &var in subst.bound_variables() {
      assert!(bank.cell(var).binding.is_some());
    }
    subst.backtrack_all(&mut bank);
    for &var in vars.iter() {
      assert!(bank.cell(var).binding.is_none());
    }
  }
}
