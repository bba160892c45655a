//! Dataset validation logic.

use crate::schema::{DatasetFile, LATEST_VERSION, Reaction, Substance};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate symbol: {symbol} in {context}")]
    DuplicateSymbol { symbol: String, context: String },

    #[error("Missing reference: {symbol} in {context}")]
    MissingReference { symbol: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Check a dataset for internal consistency before it is turned into a store.
pub fn validate_dataset(dataset: &DatasetFile) -> Result<(), ValidationError> {
    if dataset.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: dataset.version,
        });
    }

    unique_symbols(dataset.elements.iter().map(|e| &e.symbol), "elements")?;
    let substance_symbols =
        unique_symbols(dataset.substances.iter().map(|s| &s.symbol), "substances")?;
    let reaction_symbols =
        unique_symbols(dataset.reactions.iter().map(|r| &r.symbol), "reactions")?;

    for substance in &dataset.substances {
        validate_substance(substance)?;
        if substance.is_reaction_derived() {
            validate_defining_reaction(substance, &dataset.reactions, &reaction_symbols)?;
        }
    }

    for reaction in &dataset.reactions {
        validate_reaction(reaction, &substance_symbols)?;
    }

    Ok(())
}

fn unique_symbols<'a>(
    symbols: impl Iterator<Item = &'a String>,
    context: &str,
) -> Result<HashSet<&'a str>, ValidationError> {
    let mut seen = HashSet::new();
    for symbol in symbols {
        if !seen.insert(symbol.as_str()) {
            return Err(ValidationError::DuplicateSymbol {
                symbol: symbol.clone(),
                context: context.to_string(),
            });
        }
    }
    Ok(seen)
}

fn validate_substance(substance: &Substance) -> Result<(), ValidationError> {
    if substance.symbol.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "substance symbol".to_string(),
            value: substance.symbol.clone(),
            reason: "must not be empty".to_string(),
        });
    }
    validate_positive_finite(
        &format!("substance '{}' reference_t", substance.symbol),
        substance.reference_t,
    )?;
    validate_positive_finite(
        &format!("substance '{}' reference_p", substance.symbol),
        substance.reference_p,
    )?;
    Ok(())
}

fn validate_defining_reaction(
    substance: &Substance,
    reactions: &[Reaction],
    reaction_symbols: &HashSet<&str>,
) -> Result<(), ValidationError> {
    let Some(reaction_symbol) = substance.reaction_symbol.as_deref() else {
        return Err(ValidationError::MissingReference {
            symbol: substance.symbol.clone(),
            context: "reaction-derived substance without reaction_symbol".to_string(),
        });
    };
    if !reaction_symbols.contains(reaction_symbol) {
        return Err(ValidationError::MissingReference {
            symbol: reaction_symbol.to_string(),
            context: format!("reaction_symbol of substance '{}'", substance.symbol),
        });
    }

    let coefficient = reactions
        .iter()
        .find(|r| r.symbol == reaction_symbol)
        .and_then(|r| r.coefficient(&substance.symbol));
    match coefficient {
        Some(c) if c != 0.0 && c.is_finite() => Ok(()),
        _ => Err(ValidationError::InvalidValue {
            field: format!("reaction '{reaction_symbol}' coefficient of '{}'", substance.symbol),
            value: format!("{coefficient:?}"),
            reason: "a reaction-derived substance must take part in its reaction".to_string(),
        }),
    }
}

fn validate_reaction(
    reaction: &Reaction,
    substance_symbols: &HashSet<&str>,
) -> Result<(), ValidationError> {
    if reaction.reactants.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: format!("reaction '{}' reactants", reaction.symbol),
            value: "{}".to_string(),
            reason: "a reaction needs at least one component".to_string(),
        });
    }
    for (symbol, coefficient) in &reaction.reactants {
        if !substance_symbols.contains(symbol.as_str()) {
            return Err(ValidationError::MissingReference {
                symbol: symbol.clone(),
                context: format!("reactants of reaction '{}'", reaction.symbol),
            });
        }
        if !coefficient.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("reaction '{}' coefficient of '{symbol}'", reaction.symbol),
                value: coefficient.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }
    validate_positive_finite(
        &format!("reaction '{}' reference_t", reaction.symbol),
        reaction.reference_t,
    )?;
    validate_positive_finite(
        &format!("reaction '{}' reference_p", reaction.symbol),
        reaction.reference_p,
    )
}

fn validate_positive_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CalculationType;

    fn dataset() -> DatasetFile {
        let mut reaction = Reaction::new("CalciteDissolution");
        reaction.reactants.insert("Calcite".to_string(), -1.0);
        reaction.reactants.insert("Ca+2".to_string(), 1.0);
        reaction.reactants.insert("CO3-2".to_string(), 1.0);

        DatasetFile {
            substances: vec![
                Substance::new("Calcite"),
                Substance::new("Ca+2"),
                Substance::new("CO3-2"),
            ],
            reactions: vec![reaction],
            ..Default::default()
        }
    }

    #[test]
    fn consistent_dataset_passes() {
        validate_dataset(&dataset()).unwrap();
    }

    #[test]
    fn duplicate_substance_is_rejected() {
        let mut ds = dataset();
        ds.substances.push(Substance::new("Calcite"));
        assert!(matches!(
            validate_dataset(&ds),
            Err(ValidationError::DuplicateSymbol { symbol, .. }) if symbol == "Calcite"
        ));
    }

    #[test]
    fn unknown_reactant_is_rejected() {
        let mut ds = dataset();
        ds.reactions[0].reactants.insert("H+".to_string(), 1.0);
        assert!(matches!(
            validate_dataset(&ds),
            Err(ValidationError::MissingReference { symbol, .. }) if symbol == "H+"
        ));
    }

    #[test]
    fn reaction_derived_substance_must_appear_in_its_reaction() {
        let mut ds = dataset();
        let mut derived = Substance::new("Aragonite");
        derived.calculation_type = CalculationType::ReactionDerived;
        derived.reaction_symbol = Some("CalciteDissolution".to_string());
        ds.substances.push(derived);

        assert!(matches!(
            validate_dataset(&ds),
            Err(ValidationError::InvalidValue { .. })
        ));

        ds.substances[3].reaction_symbol = Some("Missing".to_string());
        assert!(matches!(
            validate_dataset(&ds),
            Err(ValidationError::MissingReference { symbol, .. }) if symbol == "Missing"
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut ds = dataset();
        ds.version = LATEST_VERSION + 1;
        assert!(matches!(
            validate_dataset(&ds),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn non_positive_reference_temperature_is_rejected() {
        let mut ds = dataset();
        ds.substances[0].reference_t = 0.0;
        assert!(matches!(
            validate_dataset(&ds),
            Err(ValidationError::InvalidValue { .. })
        ));
    }
}
