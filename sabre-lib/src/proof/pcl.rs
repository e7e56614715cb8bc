/*!

The PCL proof-object protocol.

Each inference is recorded as a step: a numeric identifier, a clause, and a justification
expression referring to earlier steps via `quote(id)`, bottoming out in `initial`. A protocol is
an identifier-keyed tree of steps. Listings parse until end of input; a duplicate identifier is
a syntax error. Marking floods the proof-clause property backwards from the steps flagged as
proof or final, and printing covers either the whole protocol or the marked subset.

Step clauses are written `[++l=r, --p(a)]`: `++`/`--` for the sign, `=` present exactly for
equational literals, variables spelled `X<n>`. Parsing builds the terms bottom-up through the
term bank, so `parse(print(p))` preserves steps up to term sharing.

*/

use std::collections::BTreeMap;
use std::fmt::Write as _;

use enumflags2::{bitflags, BitFlags};
use sabre_abs::join_iter;

use crate::{
  clauses::{Clause, Eqn},
  error::{Error, Result},
  io::scanner::{Scanner, TokenKind},
  terms::TermBank,
  FunCode,
  TermIndex,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Justification {
  Initial,
  Quote(u64),
  Inference { name: String, args: Vec<Justification> },
}

impl Justification {
  pub fn parse(scanner: &mut Scanner) -> Result<Justification> {
    let name = scanner.accept(TokenKind::Ident)?.text;

    match name.as_str() {
      "initial" => {
        // Both `initial` and `initial()` are accepted.
        if scanner.test(TokenKind::OpenParen) {
          scanner.accept(TokenKind::OpenParen)?;
          scanner.accept(TokenKind::CloseParen)?;
        }
        Ok(Justification::Initial)
      }
      "quote" => {
        scanner.accept(TokenKind::OpenParen)?;
        let id = scanner.accept_pos_int()?;
        scanner.accept(TokenKind::CloseParen)?;
        Ok(Justification::Quote(id))
      }
      _ => {
        scanner.accept(TokenKind::OpenParen)?;
        let mut args = vec![Justification::parse(scanner)?];
        while scanner.test(TokenKind::Comma) {
          scanner.accept(TokenKind::Comma)?;
          args.push(Justification::parse(scanner)?);
        }
        scanner.accept(TokenKind::CloseParen)?;
        Ok(Justification::Inference { name, args })
      }
    }
  }

  /// Collects every step identifier the expression references.
  pub fn collect_references(&self, out: &mut Vec<u64>) {
    match self {
      Justification::Initial => {}
      Justification::Quote(id) => out.push(*id),
      Justification::Inference { args, .. } => {
        for arg in args {
          arg.collect_references(out);
        }
      }
    }
  }

  pub fn print(&self) -> String {
    match self {
      Justification::Initial => "initial".to_string(),
      Justification::Quote(id) => format!("quote({})", id),
      Justification::Inference { name, args } => {
        format!("{}({})", name, join_iter(args.iter().map(Justification::print), ","))
      }
    }
  }
}

#[bitflags]
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StepProperty {
  Initial,
  /// Member of the reconstructed proof.
  Proof,
  /// A final (contradiction) step; seeds the proof marking.
  Final,
  Lemma,
}

pub type StepProperties = BitFlags<StepProperty, u8>;

#[derive(Clone, Debug)]
pub struct PclStep {
  pub id:            u64,
  pub clause:        Clause,
  pub justification: Justification,
  pub properties:    StepProperties,
}

impl PclStep {
  /// Parses `<id> : <clause> : <justification>`.
  pub fn parse(scanner: &mut Scanner, bank: &mut TermBank) -> Result<PclStep> {
    let id = scanner.accept_pos_int()?;
    scanner.accept(TokenKind::Colon)?;
    let clause = parse_step_clause(scanner, bank)?;
    scanner.accept(TokenKind::Colon)?;
    let justification = Justification::parse(scanner)?;

    let mut properties = StepProperties::empty();
    if justification == Justification::Initial {
      properties |= StepProperty::Initial;
    }

    Ok(PclStep { id, clause, justification, properties })
  }

  pub fn print(&self, bank: &TermBank) -> String {
    format!("{} : {} : {}", self.id, self.clause.term_str(bank), self.justification.print())
  }
}

#[derive(Default)]
pub struct PclProtocol {
  steps: BTreeMap<u64, PclStep>,
}

impl PclProtocol {
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.steps.len()
  }

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  #[inline(always)]
  pub fn find(&self, id: u64) -> Option<&PclStep> {
    self.steps.get(&id)
  }

  pub fn insert(&mut self, step: PclStep) -> Option<PclStep> {
    self.steps.insert(step.id, step)
  }

  /// Deletes a step; returns true if it existed.
  pub fn delete(&mut self, id: u64) -> bool {
    self.steps.remove(&id).is_some()
  }

  /// Parses steps until end of input; a duplicate identifier is a syntax error. Returns the
  /// number of steps parsed.
  pub fn parse(&mut self, scanner: &mut Scanner, bank: &mut TermBank) -> Result<usize> {
    let mut count = 0;
    while scanner.test(TokenKind::PosInt) {
      let pos = scanner.pos();
      let step = PclStep::parse(scanner, bank)?;
      if self.steps.contains_key(&step.id) {
        return Err(Error::syntax(
          pos,
          "unique PCL identifier",
          format!("duplicate PCL identifier {}", step.id),
        ));
      }
      self.insert(step);
      count += 1;
    }
    Ok(count)
  }

  /// Marks the proof subset: every step reachable through justification references from a step
  /// already flagged proof or final. Returns the number of marked steps.
  pub fn mark_proof_steps(&mut self) -> usize {
    let mut pending: Vec<u64> = self
        .steps
        .values()
        .filter(|step| {
          step.properties.contains(StepProperty::Proof) || step.properties.contains(StepProperty::Final)
        })
        .map(|step| step.id)
        .collect();

    let mut visited = std::collections::BTreeSet::new();
    let mut marked = 0;
    while let Some(id) = pending.pop() {
      if !visited.insert(id) {
        continue;
      }
      let Some(step) = self.steps.get_mut(&id) else {
        continue;
      };
      step.properties |= StepProperty::Proof;
      marked += 1;

      let mut references = Vec::new();
      step.justification.collect_references(&mut references);
      pending.extend(references);
    }
    marked
  }

  /// Prints the protocol in identifier order, the whole of it or only the marked proof subset.
  pub fn print(&self, bank: &TermBank, only_proof: bool) -> String {
    let mut out = String::new();
    for step in self.steps.values() {
      if only_proof && !step.properties.contains(StepProperty::Proof) {
        continue;
      }
      let _ = writeln!(out, "{}", step.print(bank));
    }
    out
  }

  pub fn iter(&self) -> impl Iterator<Item = &PclStep> {
    self.steps.values()
  }
}

// region Step clause syntax

fn parse_step_clause(scanner: &mut Scanner, bank: &mut TermBank) -> Result<Clause> {
  scanner.accept(TokenKind::OpenBracket)?;
  let mut literals = Vec::new();

  if !scanner.test(TokenKind::CloseBracket) {
    literals.push(parse_literal(scanner, bank)?);
    while scanner.test(TokenKind::Comma) {
      scanner.accept(TokenKind::Comma)?;
      literals.push(parse_literal(scanner, bank)?);
    }
  }
  scanner.accept(TokenKind::CloseBracket)?;
  Ok(Clause::new(literals))
}

fn parse_literal(scanner: &mut Scanner, bank: &mut TermBank) -> Result<Eqn> {
  let positive = if scanner.test(TokenKind::PlusPlus) {
    scanner.accept(TokenKind::PlusPlus)?;
    true
  } else if scanner.test(TokenKind::MinusMinus) {
    scanner.accept(TokenKind::MinusMinus)?;
    false
  } else {
    return Err(scanner.unexpected("'++' or '--'"));
  };

  let lterm = parse_term(scanner, bank)?;
  let rterm = if scanner.test(TokenKind::EqualSign) {
    scanner.accept(TokenKind::EqualSign)?;
    parse_term(scanner, bank)?
  } else {
    bank.true_term()
  };

  Ok(Eqn::new(bank, lterm, rterm, positive))
}

fn parse_term(scanner: &mut Scanner, bank: &mut TermBank) -> Result<TermIndex> {
  let pos = scanner.pos();
  let name = scanner.accept(TokenKind::Ident)?.text;

  if name.starts_with(|c: char| c.is_ascii_uppercase()) {
    if scanner.test(TokenKind::OpenParen) {
      return Err(Error::semantic(pos, format!("variable {} cannot take arguments", name)));
    }
    return Ok(parse_variable(bank, &name));
  }

  let mut args = Vec::new();
  if scanner.test(TokenKind::OpenParen) {
    scanner.accept(TokenKind::OpenParen)?;
    args.push(parse_term(scanner, bank)?);
    while scanner.test(TokenKind::Comma) {
      scanner.accept(TokenKind::Comma)?;
      args.push(parse_term(scanner, bank)?);
    }
    scanner.accept(TokenKind::CloseParen)?;
  }

  let code = bank.mk_symbol(&name, args.len() as u32);
  Ok(bank.apply(code, &args))
}

/// `X<n>` maps onto the variable with code `-n`, so printed variables parse back to themselves;
/// any other capitalized name gets a bank-assigned fresh variable.
fn parse_variable(bank: &mut TermBank, name: &str) -> TermIndex {
  let individual = bank.types.individual_type();
  if let Some(digits) = name.strip_prefix('X') {
    if let Ok(magnitude) = digits.parse::<i64>() {
      if magnitude > 0 {
        return bank.variable(FunCode(-magnitude), individual);
      }
    }
  }
  bank.ext_variable(name)
}

// endregion
