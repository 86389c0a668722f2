//! Immutable turret kind catalog resolved by name.

use std::sync::Arc;

use aimon_defence_core::{reference_kinds, InvalidEntityError, TurretKind, UnknownKindError};

/// Fixed set of turret kinds available for placement.
///
/// Entries are shared: every turret of a kind holds a clone of the same `Arc`.
#[derive(Clone, Debug)]
pub struct Catalog {
    kinds: Vec<Arc<TurretKind>>,
}

impl Catalog {
    /// Builds a catalog from validated kinds, rejecting duplicate names.
    pub fn from_kinds(kinds: Vec<TurretKind>) -> Result<Self, InvalidEntityError> {
        let mut entries: Vec<Arc<TurretKind>> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if entries.iter().any(|entry| entry.name() == kind.name()) {
                return Err(InvalidEntityError::DuplicateKindName {
                    name: kind.name().to_owned(),
                });
            }
            entries.push(Arc::new(kind));
        }
        Ok(Self { kinds: entries })
    }

    /// Catalog shipped with the reference build.
    #[must_use]
    pub fn reference() -> Self {
        Self {
            kinds: reference_kinds().into_iter().map(Arc::new).collect(),
        }
    }

    /// Resolves a kind by its exact name.
    pub fn resolve(&self, name: &str) -> Result<Arc<TurretKind>, UnknownKindError> {
        self.kinds
            .iter()
            .find(|kind| kind.name() == name)
            .cloned()
            .ok_or_else(|| UnknownKindError::new(name))
    }

    /// Iterator over the catalog entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TurretKind>> {
        self.kinds.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_lists_three_kinds() {
        let catalog = Catalog::reference();
        let names: Vec<_> = catalog.iter().map(|kind| kind.name().to_owned()).collect();
        assert_eq!(names, vec!["Bulbasaur", "Charmander", "Squirtle"]);
    }

    #[test]
    fn resolve_is_exact_and_shares_entries() {
        let catalog = Catalog::reference();
        let first = catalog.resolve("Charmander").expect("known kind");
        let second = catalog.resolve("Charmander").expect("known kind");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.attack_power(), 10.0);

        let error = catalog.resolve("charmander").expect_err("names are exact");
        assert_eq!(error.name(), "charmander");
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let kinds = vec![
            TurretKind::new("Twin", 1, 1.0, 10.0).expect("valid kind"),
            TurretKind::new("Twin", 2, 1.0, 10.0).expect("valid kind"),
        ];
        assert_eq!(
            Catalog::from_kinds(kinds).expect_err("duplicate"),
            InvalidEntityError::DuplicateKindName {
                name: "Twin".to_owned()
            }
        );
    }
}
