//! Term datasets
//!
//! A [`TermDataset`] is an immutable set of planetary theories, keyed by
//! planet and precision tier. The crate embeds a truncated Earth theory
//! ([`TermDataset::builtin`]); fuller tables are parsed by the caller (see
//! [`super::parse_vsop87`]) and either passed explicitly to the evaluators or
//! installed once per process with [`install_dataset`].

use std::collections::HashMap;

use log::info;
use once_cell::sync::{Lazy, OnceCell};

use super::earth_vsop87d as earth;
use super::vsop::{VsopSeries, VsopTheory};
use crate::config::Precision;
use crate::planetlib::Planet;
use crate::{OrreryError, Result};

static INSTALLED: OnceCell<TermDataset> = OnceCell::new();

static BUILTIN: Lazy<TermDataset> = Lazy::new(TermDataset::builtin);

/// Immutable planetary theories keyed by (planet, tier)
#[derive(Debug, Clone, Default)]
pub struct TermDataset {
    theories: HashMap<(Planet, Precision), VsopTheory>,
}

impl TermDataset {
    /// An empty dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// The embedded tables: the Earth, low tier
    pub fn builtin() -> Self {
        let earth = VsopTheory::new(
            VsopSeries::from_static(&[earth::L0, earth::L1, earth::L2, earth::L3, earth::L4, earth::L5]),
            VsopSeries::from_static(&[earth::B0, earth::B1]),
            VsopSeries::from_static(&[earth::R0, earth::R1, earth::R2, earth::R3, earth::R4]),
            Precision::Low,
        );
        TermDataset::new().with_theory(Planet::Earth, earth)
    }

    /// Adds a theory, filed under its own precision tier
    pub fn with_theory(mut self, planet: Planet, theory: VsopTheory) -> Self {
        self.insert(planet, theory);
        self
    }

    /// Adds a theory, returning the one it replaces
    pub fn insert(&mut self, planet: Planet, theory: VsopTheory) -> Option<VsopTheory> {
        self.theories.insert((planet, theory.precision), theory)
    }

    /// The theory for `planet` in the requested tier, or in the other tier
    /// when only that one is present
    pub fn theory(&self, planet: Planet, precision: Precision) -> Option<&VsopTheory> {
        let other = match precision {
            Precision::High => Precision::Low,
            Precision::Low => Precision::High,
        };
        self.theories
            .get(&(planet, precision))
            .or_else(|| self.theories.get(&(planet, other)))
    }

    /// Like [`Self::theory`], failing with a data error when absent
    pub fn require(&self, planet: Planet, precision: Precision) -> Result<&VsopTheory> {
        self.theory(planet, precision).ok_or_else(|| {
            OrreryError::Data(format!("no series loaded for {}", planet.name()))
        })
    }

    pub fn contains(&self, planet: Planet) -> bool {
        self.theory(planet, Precision::Low).is_some()
    }

    pub fn len(&self) -> usize {
        self.theories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theories.is_empty()
    }

    /// The installed dataset, or the builtin one when nothing was installed
    pub fn global() -> &'static TermDataset {
        INSTALLED.get().unwrap_or_else(|| &*BUILTIN)
    }
}

/// Installs the process-wide dataset
///
/// Builtin theories missing from `dataset` are added. Only the first call
/// succeeds; later calls fail with [`OrreryError::AlreadyInitialized`] and
/// leave the installed dataset untouched. Safe under concurrent first access.
pub fn install_dataset(mut dataset: TermDataset) -> Result<()> {
    for (key, theory) in &BUILTIN.theories {
        dataset
            .theories
            .entry(*key)
            .or_insert_with(|| theory.clone());
    }
    let count = dataset.len();
    INSTALLED
        .set(dataset)
        .map_err(|_| OrreryError::AlreadyInitialized)?;
    info!("Installed term dataset with {count} theories");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_low_tier_earth() {
        let dataset = TermDataset::builtin();
        assert!(dataset.contains(Planet::Earth));
        assert!(!dataset.contains(Planet::Mars));
        // High tier falls back to the only tier present
        let theory = dataset.theory(Planet::Earth, Precision::High).unwrap();
        assert_eq!(theory.precision, Precision::Low);
    }

    #[test]
    fn test_require_missing_planet() {
        let dataset = TermDataset::new();
        assert!(dataset.is_empty());
        assert!(matches!(
            dataset.require(Planet::Saturn, Precision::Low),
            Err(OrreryError::Data(_))
        ));
    }

    #[test]
    fn test_insert_keeps_tiers_apart() {
        let low = TermDataset::builtin()
            .theory(Planet::Earth, Precision::Low)
            .cloned()
            .unwrap();
        let high = low.with_precision(Precision::High);
        let mut dataset = TermDataset::new().with_theory(Planet::Earth, low);
        assert!(dataset.insert(Planet::Earth, high).is_none());
        assert_eq!(dataset.len(), 2);
        assert_eq!(
            dataset.theory(Planet::Earth, Precision::High).unwrap().precision,
            Precision::High
        );
    }

    #[test]
    fn test_install_once() {
        // The only test in the crate that installs a dataset
        assert!(install_dataset(TermDataset::new()).is_ok());
        assert_eq!(
            install_dataset(TermDataset::new()),
            Err(OrreryError::AlreadyInitialized)
        );
        assert!(TermDataset::global().contains(Planet::Earth));
    }
}
