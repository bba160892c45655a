//! Chemical formula parsing.
//!
//! Accepts the notation used by thermodynamic datasets:
//! - element symbols with optional (possibly fractional) counts: `SiO2`, `Fe0.947O`
//! - parenthesised groups with a multiplier: `Al(OH)4-`, `Ca3(PO4)2`
//! - valence annotations between bars, ignored for stoichiometry: `Fe|3|+3`
//! - a trailing charge: `+`, `-`, `+2`, `-3`, recorded under [`CHARGE_SYMBOL`]
//! - a trailing phase marker `@` (aqueous), ignored

use crate::{DbError, DbResult};
use std::collections::BTreeMap;

/// Key under which the formula charge is reported.
pub const CHARGE_SYMBOL: &str = "Z";

/// Element symbol → stoichiometric count (plus optional charge under `Z`).
pub type FormulaMap = BTreeMap<String, f64>;

/// Parse a chemical formula into element counts.
pub fn parse_formula(formula: &str) -> DbResult<FormulaMap> {
    let body = formula.trim().trim_end_matches('@');
    if body.is_empty() {
        return Err(formula_error(formula, "empty formula"));
    }

    let (body, charge) = split_charge(body).map_err(|reason| formula_error(formula, reason))?;

    let chars: Vec<char> = body.chars().collect();
    let mut pos = 0;
    let counts = parse_group(&chars, &mut pos, 0).map_err(|reason| formula_error(formula, reason))?;
    if pos != chars.len() {
        return Err(formula_error(formula, "unbalanced parentheses"));
    }

    let mut map = counts;
    if charge != 0.0 {
        map.insert(CHARGE_SYMBOL.to_string(), charge);
    }
    Ok(map)
}

fn formula_error(formula: &str, reason: &'static str) -> DbError {
    DbError::Formula {
        formula: formula.to_string(),
        reason,
    }
}

/// Split off a trailing `+n` / `-n` charge. A sign inside a valence bar is not a charge.
fn split_charge(body: &str) -> Result<(&str, f64), &'static str> {
    let Some(sign_idx) = body.rfind(['+', '-']) else {
        return Ok((body, 0.0));
    };
    let tail = &body[sign_idx + 1..];
    if !tail.chars().all(|c| c.is_ascii_digit()) {
        return Ok((body, 0.0));
    }
    let magnitude = if tail.is_empty() {
        1.0
    } else {
        tail.parse::<f64>().map_err(|_| "invalid charge")?
    };
    let sign = if body[sign_idx..].starts_with('-') { -1.0 } else { 1.0 };
    Ok((&body[..sign_idx], sign * magnitude))
}

fn parse_group(chars: &[char], pos: &mut usize, depth: usize) -> Result<FormulaMap, &'static str> {
    let mut counts = FormulaMap::new();

    while *pos < chars.len() {
        match chars[*pos] {
            '(' | '[' => {
                *pos += 1;
                let inner = parse_group(chars, pos, depth + 1)?;
                if *pos >= chars.len() || !matches!(chars[*pos], ')' | ']') {
                    return Err("unbalanced parentheses");
                }
                *pos += 1;
                let multiplier = parse_number(chars, pos)?.unwrap_or(1.0);
                for (element, n) in inner {
                    *counts.entry(element).or_insert(0.0) += n * multiplier;
                }
            }
            ')' | ']' => {
                if depth == 0 {
                    return Err("unbalanced parentheses");
                }
                return Ok(counts);
            }
            '|' => {
                // valence annotation: |3|, |-2|
                *pos += 1;
                while *pos < chars.len() && chars[*pos] != '|' {
                    *pos += 1;
                }
                if *pos >= chars.len() {
                    return Err("unterminated valence annotation");
                }
                *pos += 1;
            }
            c if c.is_ascii_uppercase() => {
                let mut symbol = String::from(c);
                *pos += 1;
                while *pos < chars.len() && chars[*pos].is_ascii_lowercase() {
                    symbol.push(chars[*pos]);
                    *pos += 1;
                }
                let n = parse_number(chars, pos)?.unwrap_or(1.0);
                *counts.entry(symbol).or_insert(0.0) += n;
            }
            _ => return Err("unexpected character"),
        }
    }

    Ok(counts)
}

fn parse_number(chars: &[char], pos: &mut usize) -> Result<Option<f64>, &'static str> {
    let start = *pos;
    while *pos < chars.len() && (chars[*pos].is_ascii_digit() || chars[*pos] == '.') {
        *pos += 1;
    }
    if start == *pos {
        return Ok(None);
    }
    let text: String = chars[start..*pos].iter().collect();
    text.parse::<f64>().map(Some).map_err(|_| "invalid count")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn count(map: &FormulaMap, element: &str) -> f64 {
        map.get(element).copied().unwrap_or(0.0)
    }

    #[test]
    fn simple_formulas() {
        let quartz = parse_formula("SiO2").unwrap();
        assert_eq!(count(&quartz, "Si"), 1.0);
        assert_eq!(count(&quartz, "O"), 2.0);
        assert!(!quartz.contains_key(CHARGE_SYMBOL));

        let water = parse_formula("H2O@").unwrap();
        assert_eq!(count(&water, "H"), 2.0);
        assert_eq!(count(&water, "O"), 1.0);
    }

    #[test]
    fn groups_and_charges() {
        let aluminate = parse_formula("Al(OH)4-").unwrap();
        assert_eq!(count(&aluminate, "Al"), 1.0);
        assert_eq!(count(&aluminate, "O"), 4.0);
        assert_eq!(count(&aluminate, "H"), 4.0);
        assert_eq!(count(&aluminate, CHARGE_SYMBOL), -1.0);

        let phosphate = parse_formula("Ca3(PO4)2").unwrap();
        assert_eq!(count(&phosphate, "P"), 2.0);
        assert_eq!(count(&phosphate, "O"), 8.0);

        let carbonate = parse_formula("CO3-2").unwrap();
        assert_eq!(count(&carbonate, CHARGE_SYMBOL), -2.0);

        let proton = parse_formula("H+").unwrap();
        assert_eq!(count(&proton, "H"), 1.0);
        assert_eq!(count(&proton, CHARGE_SYMBOL), 1.0);
    }

    #[test]
    fn valence_annotations_are_ignored() {
        let ferric = parse_formula("Fe|3|+3").unwrap();
        assert_eq!(count(&ferric, "Fe"), 1.0);
        assert_eq!(count(&ferric, CHARGE_SYMBOL), 3.0);
    }

    #[test]
    fn fractional_counts() {
        let wustite = parse_formula("Fe0.947O").unwrap();
        assert!((count(&wustite, "Fe") - 0.947).abs() < 1e-12);
    }

    #[test]
    fn malformed_formulas_are_rejected() {
        assert!(matches!(parse_formula(""), Err(DbError::Formula { .. })));
        assert!(matches!(parse_formula("Ca(OH2"), Err(DbError::Formula { .. })));
        assert!(matches!(parse_formula("CaOH)2"), Err(DbError::Formula { .. })));
        assert!(matches!(parse_formula("si02"), Err(DbError::Formula { .. })));
    }

    proptest! {
        #[test]
        fn group_multiplier_scales_counts(n in 1u32..20) {
            let map = parse_formula(&format!("Mg(OH){n}")).unwrap();
            prop_assert_eq!(count(&map, "O"), n as f64);
            prop_assert_eq!(count(&map, "H"), n as f64);
            prop_assert_eq!(count(&map, "Mg"), 1.0);
        }
    }
}
