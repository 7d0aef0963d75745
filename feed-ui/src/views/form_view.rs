use std::fmt;

use feed_core::presentation::species_label;

use crate::{
    models::{FieldName, InputFields},
    sessions::{CatalogState, SpeciesCatalog},
};

/// The calculation parameters and the species options.
pub struct FormView<'a> {
    fields: &'a InputFields,
    catalog: &'a SpeciesCatalog,
}

impl<'a> FormView<'a> {
    pub fn new(
        fields: &'a InputFields,
        catalog: &'a SpeciesCatalog,
    ) -> Self {
        Self { fields, catalog }
    }

    /// Display labels of the selectable species, in catalog order.
    pub fn species_options(&self) -> Vec<String> {
        self.catalog
            .options()
            .iter()
            .map(|species| species_label(species))
            .collect()
    }
}

impl fmt::Display for FormView<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Calculation Parameters")?;
        write!(f, "{}", self.fields)?;

        let species = match self.catalog.state() {
            CatalogState::Idle | CatalogState::Loading => "loading…".to_string(),
            CatalogState::Loaded(list) if list.is_empty() => "none offered".to_string(),
            CatalogState::Loaded(_) => self.species_options().join(", "),
            CatalogState::Failed(_) => "unavailable".to_string(),
        };
        writeln!(f, "Species options: {species}")?;

        let missing = self.fields.missing_required();
        if !missing.is_empty() {
            let keys: Vec<_> = missing.iter().map(FieldName::key).collect();
            writeln!(f, "Required before submitting: {}", keys.join(", "))?;
        }
        Ok(())
    }
}
