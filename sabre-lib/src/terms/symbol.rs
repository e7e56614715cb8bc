/*!

The signature maps symbol names to `f_code`s (small positive integers) and carries per-symbol
metadata: arity, type, and a property bit-set. A reserved low range of codes denotes the
built-ins: `$true`, `$false`, equality, the application marker, and the lambda marker.

*/

use enumflags2::{bitflags, BitFlags};
use sabre_abs::{HashMap, IString};

use crate::{
  terms::types::TypeBank,
  FunCode,
  TypeIndex,
};

pub const FUNCODE_TRUE:   FunCode = FunCode(1);
pub const FUNCODE_FALSE:  FunCode = FunCode(2);
pub const FUNCODE_EQ:     FunCode = FunCode(3);
pub const FUNCODE_APP:    FunCode = FunCode(4);
pub const FUNCODE_LAMBDA: FunCode = FunCode(5);

/// First code handed out for user symbols; everything below is a built-in.
pub const FIRST_USER_FUNCODE: i64 = 6;

#[bitflags]
#[repr(u16)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SymbolProperty {
  Associative,
  Commutative,
  Predicate,
  Skolem,
  Interpreted,
  SpecialConstant,
  LambdaBound,
  /// Introduced by the prover rather than read from the problem source.
  Internal,
}

pub type SymbolProperties = BitFlags<SymbolProperty, u16>;

#[derive(Clone, Debug)]
pub struct Symbol {
  pub name:       IString,
  pub arity:      u32,
  pub typ:        TypeIndex,
  pub properties: SymbolProperties,
}

/// Mapping symbol name ↔ `f_code` plus per-symbol metadata. Codes are dense and start at 1; the
/// symbol for code `c` lives at slot `c - 1`.
#[derive(Clone, Debug)]
pub struct Signature {
  symbols:    Vec<Symbol>,
  name_index: HashMap<IString, FunCode>,
}

impl Signature {
  pub fn new(types: &mut TypeBank) -> Self {
    let mut sig = Signature {
      symbols:    Vec::new(),
      name_index: HashMap::new(),
    };

    let bool_type = types.bool_type();
    let individual = types.individual_type();
    let eq_type = types.arrow(&[individual, individual], bool_type);

    let interpreted: SymbolProperties = SymbolProperty::Interpreted.into();

    let code = sig.insert("$true", 0, bool_type);
    debug_assert_eq!(code, FUNCODE_TRUE);
    let code = sig.insert("$false", 0, bool_type);
    debug_assert_eq!(code, FUNCODE_FALSE);
    let code = sig.insert("=", 2, eq_type);
    debug_assert_eq!(code, FUNCODE_EQ);
    let code = sig.insert("@", 2, individual);
    debug_assert_eq!(code, FUNCODE_APP);
    let code = sig.insert("^", 2, individual);
    debug_assert_eq!(code, FUNCODE_LAMBDA);

    for builtin in sig.symbols.iter_mut() {
      builtin.properties |= interpreted;
    }
    sig.symbols[(FUNCODE_TRUE.0 - 1) as usize].properties |= SymbolProperty::Predicate;
    sig.symbols[(FUNCODE_FALSE.0 - 1) as usize].properties |= SymbolProperty::Predicate;
    sig.symbols[(FUNCODE_EQ.0 - 1) as usize].properties |= SymbolProperty::Predicate;

    sig
  }

  /// Interns a symbol, returning its code. Inserting an existing name returns the existing code;
  /// the caller is responsible for arity agreement (checked in debug builds).
  pub fn insert(&mut self, name: &str, arity: u32, typ: TypeIndex) -> FunCode {
    let name = IString::from(name);
    if let Some(&code) = self.name_index.get(&name) {
      debug_assert_eq!(self.symbol(code).arity, arity, "arity conflict for {}", name);
      return code;
    }

    let code = FunCode(self.symbols.len() as i64 + 1);
    self.symbols.push(Symbol {
      name: name.clone(),
      arity,
      typ,
      properties: SymbolProperties::empty(),
    });
    self.name_index.insert(name, code);
    code
  }

  #[inline(always)]
  pub fn find(&self, name: &str) -> Option<FunCode> {
    self.name_index.get(&IString::from(name)).copied()
  }

  #[inline(always)]
  pub fn symbol(&self, code: FunCode) -> &Symbol {
    debug_assert!(code.is_function(), "not a function code: {}", code);
    &self.symbols[(code.0 - 1) as usize]
  }

  #[inline(always)]
  pub fn name(&self, code: FunCode) -> &IString {
    &self.symbol(code).name
  }

  #[inline(always)]
  pub fn arity(&self, code: FunCode) -> u32 {
    self.symbol(code).arity
  }

  /// Number of interned symbols, built-ins included.
  #[inline(always)]
  pub fn size(&self) -> usize {
    self.symbols.len()
  }

  #[inline(always)]
  pub fn set_property(&mut self, code: FunCode, property: SymbolProperty) {
    debug_assert!(code.is_function());
    self.symbols[(code.0 - 1) as usize].properties |= property;
  }

  #[inline(always)]
  pub fn clear_property(&mut self, code: FunCode, property: SymbolProperty) {
    debug_assert!(code.is_function());
    self.symbols[(code.0 - 1) as usize].properties &= !BitFlags::from(property);
  }

  #[inline(always)]
  pub fn has_property(&self, code: FunCode, property: SymbolProperty) -> bool {
    self.symbol(code).properties.contains(property)
  }

  /// Associative and commutative: eligible for AC flattening.
  #[inline(always)]
  pub fn is_ac(&self, code: FunCode) -> bool {
    let properties = self.symbol(code).properties;
    properties.contains(SymbolProperty::Associative | SymbolProperty::Commutative)
  }

  #[inline(always)]
  pub fn is_commutative(&self, code: FunCode) -> bool {
    self.has_property(code, SymbolProperty::Commutative)
  }

  #[inline(always)]
  pub fn is_predicate(&self, code: FunCode) -> bool {
    self.has_property(code, SymbolProperty::Predicate)
  }

  pub fn iter_codes(&self) -> impl Iterator<Item = FunCode> {
    (1..=self.symbols.len() as i64).map(FunCode)
  }
}
