/*!

Hash-consed types. In the first-order setting every type is a flat sort; the higher-order build
additionally forms arrow types. Types are perfectly shared, so equality is `TypeIndex` equality.

*/

use sabre_abs::{HashMap, IString, SmallVec};

use crate::TypeIndex;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape {
  /// A flat sort, e.g. `$i` or `$o`.
  Sort(IString),
  /// `domain₁ × … × domainₙ → range`. The domain is never empty and the range is never itself an
  /// arrow (arrows are kept flattened).
  Arrow {
    domain: SmallVec<[TypeIndex; 2]>,
    range:  TypeIndex,
  },
}

#[derive(Clone, Debug)]
pub struct TypeBank {
  cells: Vec<TypeShape>,
  cons:  HashMap<TypeShape, TypeIndex>,
  bool_type:       TypeIndex,
  individual_type: TypeIndex,
}

impl TypeBank {
  pub fn new() -> Self {
    let mut bank = TypeBank {
      cells: Vec::new(),
      cons:  HashMap::new(),
      bool_type:       TypeIndex::new(0),
      individual_type: TypeIndex::new(0),
    };
    bank.bool_type = bank.sort("$o");
    bank.individual_type = bank.sort("$i");
    bank
  }

  #[inline(always)]
  pub fn bool_type(&self) -> TypeIndex {
    self.bool_type
  }

  #[inline(always)]
  pub fn individual_type(&self) -> TypeIndex {
    self.individual_type
  }

  #[inline(always)]
  pub fn shape(&self, typ: TypeIndex) -> &TypeShape {
    &self.cells[typ.idx()]
  }

  pub fn sort(&mut self, name: &str) -> TypeIndex {
    self.intern(TypeShape::Sort(IString::from(name)))
  }

  /// Builds `domain → range`, flattening a nested arrow range so that the invariant on
  /// [`TypeShape::Arrow`] holds. An empty domain is just `range`.
  pub fn arrow(&mut self, domain: &[TypeIndex], range: TypeIndex) -> TypeIndex {
    if domain.is_empty() {
      return range;
    }

    let mut full_domain: SmallVec<[TypeIndex; 2]> = domain.into();
    let range = match self.shape(range) {
      TypeShape::Arrow { domain: inner, range: inner_range } => {
        full_domain.extend(inner.iter().copied());
        *inner_range
      }
      TypeShape::Sort(_) => range,
    };

    self.intern(TypeShape::Arrow { domain: full_domain, range })
  }

  #[inline(always)]
  pub fn is_arrow(&self, typ: TypeIndex) -> bool {
    matches!(self.shape(typ), TypeShape::Arrow { .. })
  }

  #[inline(always)]
  pub fn is_bool(&self, typ: TypeIndex) -> bool {
    typ == self.bool_type
  }

  /// Number of arguments the type can consume: the domain length for arrows, 0 for sorts.
  pub fn arrow_arity(&self, typ: TypeIndex) -> usize {
    match self.shape(typ) {
      TypeShape::Sort(_) => 0,
      TypeShape::Arrow { domain, .. } => domain.len(),
    }
  }

  /// The type remaining after applying `count` arguments, or `None` if the type cannot consume
  /// that many.
  pub fn applied(&mut self, typ: TypeIndex, count: usize) -> Option<TypeIndex> {
    if count == 0 {
      return Some(typ);
    }
    match self.shape(typ).clone() {
      TypeShape::Sort(_) => None,
      TypeShape::Arrow { domain, range } => {
        if count > domain.len() {
          None
        } else if count == domain.len() {
          Some(range)
        } else {
          let rest: SmallVec<[TypeIndex; 2]> = domain[count..].into();
          Some(self.intern(TypeShape::Arrow { domain: rest, range }))
        }
      }
    }
  }

  pub fn size(&self) -> usize {
    self.cells.len()
  }

  fn intern(&mut self, shape: TypeShape) -> TypeIndex {
    if let Some(&typ) = self.cons.get(&shape) {
      return typ;
    }
    let typ = TypeIndex::from_usize(self.cells.len());
    self.cells.push(shape.clone());
    self.cons.insert(shape, typ);
    typ
  }
}

impl Default for TypeBank {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sorts_are_shared() {
    let mut bank = TypeBank::new();
    let a = bank.sort("a");
    let b = bank.sort("a");
    assert_eq!(a, b);
    assert_ne!(a, bank.bool_type());
  }

  #[test]
  fn arrows_flatten() {
    let mut bank = TypeBank::new();
    let i = bank.individual_type();
    let o = bank.bool_type();

    let i_to_o = bank.arrow(&[i], o);
    let ii_to_o = bank.arrow(&[i], i_to_o);
    let direct = bank.arrow(&[i, i], o);
    assert_eq!(ii_to_o, direct);
    assert_eq!(bank.arrow_arity(direct), 2);
  }

  #[test]
  fn applied_consumes_domain() {
    let mut bank = TypeBank::new();
    let i = bank.individual_type();
    let o = bank.bool_type();
    let t = bank.arrow(&[i, i], o);

    assert_eq!(bank.applied(t, 2), Some(o));
    let partial = bank.applied(t, 1).unwrap();
    assert_eq!(bank.arrow_arity(partial), 1);
    assert_eq!(bank.applied(t, 3), None);
    assert_eq!(bank.applied(o, 1), None);
  }
}
