//! In-memory record store keyed by symbol.

use crate::formula::{CHARGE_SYMBOL, FormulaMap, parse_formula};
use crate::schema::{DatasetFile, Element, Reaction, Substance};
use crate::{DbError, DbResult, RecordKind};
use std::collections::BTreeMap;

/// Read-only store of substance, reaction and element records.
///
/// Populated once (from a dataset file or with the `add_*` methods) and then
/// shared, usually behind an `Arc`, by any number of engines. Adding a record
/// with an existing symbol replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Database {
    substances: BTreeMap<String, Substance>,
    reactions: BTreeMap<String, Reaction>,
    elements: BTreeMap<String, Element>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the records of a dataset file.
    pub fn from_dataset(dataset: DatasetFile) -> Self {
        let mut db = Self::new();
        for element in dataset.elements {
            db.add_element(element);
        }
        for substance in dataset.substances {
            db.add_substance(substance);
        }
        for reaction in dataset.reactions {
            db.add_reaction(reaction);
        }
        db
    }

    /// Snapshot the store back into dataset-file layout.
    pub fn to_dataset(&self, name: impl Into<String>) -> DatasetFile {
        DatasetFile {
            version: crate::schema::LATEST_VERSION,
            name: name.into(),
            elements: self.elements.values().cloned().collect(),
            substances: self.substances.values().cloned().collect(),
            reactions: self.reactions.values().cloned().collect(),
        }
    }

    pub fn add_substance(&mut self, substance: Substance) {
        self.substances.insert(substance.symbol.clone(), substance);
    }

    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.insert(reaction.symbol.clone(), reaction);
    }

    pub fn add_element(&mut self, element: Element) {
        self.elements.insert(element.symbol.clone(), element);
    }

    pub fn get_substance(&self, symbol: &str) -> DbResult<&Substance> {
        self.substances
            .get(symbol)
            .ok_or_else(|| not_found(RecordKind::Substance, symbol))
    }

    pub fn get_reaction(&self, symbol: &str) -> DbResult<&Reaction> {
        self.reactions
            .get(symbol)
            .ok_or_else(|| not_found(RecordKind::Reaction, symbol))
    }

    pub fn get_element(&self, symbol: &str) -> DbResult<&Element> {
        self.elements
            .get(symbol)
            .ok_or_else(|| not_found(RecordKind::Element, symbol))
    }

    pub fn contains_substance(&self, symbol: &str) -> bool {
        self.substances.contains_key(symbol)
    }

    pub fn contains_reaction(&self, symbol: &str) -> bool {
        self.reactions.contains_key(symbol)
    }

    pub fn contains_element(&self, symbol: &str) -> bool {
        self.elements.contains_key(symbol)
    }

    pub fn substances(&self) -> impl Iterator<Item = &Substance> {
        self.substances.values()
    }

    pub fn reactions(&self) -> impl Iterator<Item = &Reaction> {
        self.reactions.values()
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn num_substances(&self) -> usize {
        self.substances.len()
    }

    pub fn num_reactions(&self) -> usize {
        self.reactions.len()
    }

    /// Parse a formula into element counts.
    pub fn parse_substance_formula(&self, formula: &str) -> DbResult<FormulaMap> {
        parse_formula(formula)
    }

    /// Sum of per-atom element entropies of a formula [J/(mol·K)].
    ///
    /// The charge contributes only when the store defines the `Z` pseudo-element.
    pub fn elemental_entropy(&self, formula: &str) -> DbResult<f64> {
        let counts = parse_formula(formula)?;
        let mut entropy = 0.0;
        for (symbol, n) in &counts {
            if symbol == CHARGE_SYMBOL {
                if let Some(charge) = self.elements.get(CHARGE_SYMBOL) {
                    entropy += n * charge.entropy;
                }
                continue;
            }
            entropy += n * self.get_element(symbol)?.entropy;
        }
        Ok(entropy)
    }
}

fn not_found(kind: RecordKind, symbol: &str) -> DbError {
    DbError::NotFound {
        kind,
        symbol: symbol.to_string(),
    }
}
