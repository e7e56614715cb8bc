/*!

Axiom-filter specifications for relevance pruning, in the generalized-SinE form

```text
[name =] GSinE(<measure>, <benevolence:float>, <generosity:int>,
               <rec_depth:int>, <set_size:int>, <set_fraction:float>)
```

where `<measure>` is `CountTerms` or `CountFormulas` and any trailing parameter may be elided,
the defaults standing in. Printing always emits every parameter, and `parse(print(f)) = f`.

*/

use std::fmt::{Display, Formatter};

use crate::{
  error::{Error, Result},
  io::scanner::{Scanner, TokenKind},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneralityMeasure {
  CountTerms,
  CountFormulas,
}

impl GeneralityMeasure {
  pub fn name(self) -> &'static str {
    match self {
      GeneralityMeasure::CountTerms    => "CountTerms",
      GeneralityMeasure::CountFormulas => "CountFormulas",
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxFilter {
  pub name:        Option<String>,
  pub gen_measure: GeneralityMeasure,
  pub benevolence: f64,
  pub generosity:  u64,
  pub max_recursion_depth: u64,
  pub max_set_size:        u64,
  pub max_set_fraction:    f64,
}

impl Default for AxFilter {
  fn default() -> Self {
    AxFilter {
      name:        None,
      gen_measure: GeneralityMeasure::CountTerms,
      benevolence: 1.0,
      generosity:  u64::MAX,
      max_recursion_depth: u64::MAX,
      max_set_size:        u64::MAX,
      max_set_fraction:    1.0,
    }
  }
}

impl AxFilter {
  /// Parses a filter, with an optional leading `name =`.
  pub fn parse(scanner: &mut Scanner) -> Result<AxFilter> {
    let mut name = None;
    if scanner.test(TokenKind::Ident) && scanner.current().text != "GSinE" {
      name = Some(scanner.accept(TokenKind::Ident)?.text);
      scanner.accept(TokenKind::EqualSign)?;
    }

    let mut filter = AxFilter { name, ..AxFilter::default() };

    scanner.accept_keyword("GSinE")?;
    scanner.accept(TokenKind::OpenParen)?;

    let pos = scanner.pos();
    let measure = scanner.accept(TokenKind::Ident)?;
    filter.gen_measure = match measure.text.as_str() {
      "CountTerms"    => GeneralityMeasure::CountTerms,
      "CountFormulas" => GeneralityMeasure::CountFormulas,
      other => {
        return Err(Error::semantic(pos, format!("generality measure {} not implemented", other)));
      }
    };

    let mut done = !accept_param_separator(scanner)?;
    if !done {
      filter.benevolence = scanner.accept_float()?;
      done = !accept_param_separator(scanner)?;
    }
    if !done {
      filter.generosity = scanner.accept_pos_int()?;
      done = !accept_param_separator(scanner)?;
    }
    if !done {
      filter.max_recursion_depth = scanner.accept_pos_int()?;
      done = !accept_param_separator(scanner)?;
    }
    if !done {
      filter.max_set_size = scanner.accept_pos_int()?;
      done = !accept_param_separator(scanner)?;
    }
    if !done {
      filter.max_set_fraction = scanner.accept_float()?;
      scanner.accept(TokenKind::CloseParen)?;
    }

    Ok(filter)
  }

  pub fn print(&self) -> String {
    self.to_string()
  }
}

/// After a parameter: a comma continues, a closing parenthesis elides the rest. True means more
/// parameters follow.
fn accept_param_separator(scanner: &mut Scanner) -> Result<bool> {
  if scanner.test(TokenKind::CloseParen) {
    scanner.accept(TokenKind::CloseParen)?;
    return Ok(false);
  }
  scanner.accept(TokenKind::Comma)?;
  Ok(true)
}

impl Display for AxFilter {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if let Some(name) = &self.name {
      write!(f, "{} = ", name)?;
    }
    write!(
      f,
      "GSinE({}, {}, {}, {}, {}, {})",
      self.gen_measure.name(),
      float_repr(self.benevolence),
      self.generosity,
      self.max_recursion_depth,
      self.max_set_size,
      float_repr(self.max_set_fraction),
    )
  }
}

/// Floats print with a decimal point so the scanner reads them back as floats.
fn float_repr(value: f64) -> String {
  if value == value.trunc() && value.is_finite() {
    format!("{:.1}", value)
  } else {
    format!("{}", value)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_form_parses() {
    let mut scanner = Scanner::new("filter", "GSinE(CountFormulas, 1.5, 3, 7, 20000, 0.5)");
    let filter = AxFilter::parse(&mut scanner).unwrap();
    assert_eq!(filter.gen_measure, GeneralityMeasure::CountFormulas);
    assert_eq!(filter.benevolence, 1.5);
    assert_eq!(filter.generosity, 3);
    assert_eq!(filter.max_recursion_depth, 7);
    assert_eq!(filter.max_set_size, 20000);
    assert_eq!(filter.max_set_fraction, 0.5);
    assert!(scanner.at_eof());
  }

  #[test]
  fn trailing_parameters_elide_to_defaults() {
    let mut scanner = Scanner::new("filter", "GSinE(CountTerms, 2.0)");
    let filter = AxFilter::parse(&mut scanner).unwrap();
    assert_eq!(filter.benevolence, 2.0);
    assert_eq!(filter.generosity, u64::MAX);
    assert_eq!(filter.max_set_fraction, 1.0);
  }

  #[test]
  fn named_filter_round_trips() {
    let mut scanner = Scanner::new("filter", "gf120 = GSinE(CountTerms, 1.2, 5, 4, 100, 0.25)");
    let filter = AxFilter::parse(&mut scanner).unwrap();
    assert_eq!(filter.name.as_deref(), Some("gf120"));

    let printed = filter.print();
    let mut scanner = Scanner::new("filter2", &printed);
    let reparsed = AxFilter::parse(&mut scanner).unwrap();
    assert_eq!(reparsed, filter);
  }

  #[test]
  fn unknown_measure_is_semantic_error() {
    let mut scanner = Scanner::new("filter", "GSinE(CountLiterals, 1.0)");
    let err = AxFilter::parse(&mut scanner).unwrap_err();
    assert!(matches!(err, Error::Semantic { .. }));
  }
}
