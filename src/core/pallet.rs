//! Pallet assignment - mapping destination cities onto numbered pallets
//!
//! Given the unique destination cities of a manifest (ordered by first
//! appearance) and a finite pool of pallet numbers, produce a total mapping
//! city -> pallet. The deterministic policy is the ground truth; a remote
//! suggestion may be consulted first but is validated against the same
//! contract and discarded on any deviation.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::core::provider::{ProviderError, SuggestionClient};

/// Errors from assignment policies
#[derive(Debug, Error)]
pub enum PalletError {
    #[error("No pallet numbers available")]
    NoPallets,

    #[error("Suggestion rejected: {reason}")]
    InvalidSuggestion { reason: String },

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// A policy that maps every city to exactly one pallet number
pub trait PalletAssignmentPolicy {
    fn assign(
        &self,
        cities: &[String],
        pallets: &[u32],
    ) -> Result<BTreeMap<String, u32>, PalletError>;
}

/// Sequential modulo assignment over the ordered city list.
///
/// Bijective while cities fit on distinct pallets; beyond that the load stays
/// balanced (bucket sizes differ by at most one). Same inputs, same output.
pub struct DeterministicPolicy;

impl PalletAssignmentPolicy for DeterministicPolicy {
    fn assign(
        &self,
        cities: &[String],
        pallets: &[u32],
    ) -> Result<BTreeMap<String, u32>, PalletError> {
        if pallets.is_empty() {
            return Err(PalletError::NoPallets);
        }
        Ok(cities
            .iter()
            .enumerate()
            .map(|(i, city)| (city.clone(), pallets[i % pallets.len()]))
            .collect())
    }
}

/// Check a candidate mapping against the assignment contract: exactly the
/// input cities as keys, every value drawn from the available pallet set.
pub fn validate_assignment(
    cities: &[String],
    pallets: &[u32],
    assignment: &BTreeMap<String, u32>,
) -> Result<(), PalletError> {
    for city in cities {
        if !assignment.contains_key(city) {
            return Err(PalletError::InvalidSuggestion {
                reason: format!("city '{city}' missing from assignment"),
            });
        }
    }
    if assignment.len() != cities.len() {
        let extra = assignment
            .keys()
            .find(|k| !cities.contains(k))
            .cloned()
            .unwrap_or_default();
        return Err(PalletError::InvalidSuggestion {
            reason: format!("unexpected city '{extra}' in assignment"),
        });
    }
    for (city, pallet) in assignment {
        if !pallets.contains(pallet) {
            return Err(PalletError::InvalidSuggestion {
                reason: format!("pallet {pallet} for '{city}' is not in the available set"),
            });
        }
    }
    Ok(())
}

/// Policy that asks the remote suggestion provider and validates the reply
pub struct RemotePolicy<'a> {
    client: &'a SuggestionClient,
}

impl<'a> RemotePolicy<'a> {
    pub fn new(client: &'a SuggestionClient) -> Self {
        Self { client }
    }
}

impl PalletAssignmentPolicy for RemotePolicy<'_> {
    fn assign(
        &self,
        cities: &[String],
        pallets: &[u32],
    ) -> Result<BTreeMap<String, u32>, PalletError> {
        let suggestion = self.client.suggest_pallets(cities, pallets)?;
        validate_assignment(cities, pallets, &suggestion)?;
        Ok(suggestion)
    }
}

/// Decorator: try the primary policy, fall back on any failure
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: PalletAssignmentPolicy, F: PalletAssignmentPolicy> PalletAssignmentPolicy
    for WithFallback<P, F>
{
    fn assign(
        &self,
        cities: &[String],
        pallets: &[u32],
    ) -> Result<BTreeMap<String, u32>, PalletError> {
        match self.primary.assign(cities, pallets) {
            Ok(assignment) => Ok(assignment),
            Err(_) => self.fallback.assign(cities, pallets),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cities(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_city_per_pallet_when_pallets_suffice() {
        let out = DeterministicPolicy
            .assign(&cities(&["Pune", "Mumbai"]), &[1, 2, 3])
            .unwrap();
        assert_eq!(out.len(), 2);
        assert_ne!(out["Pune"], out["Mumbai"]);
    }

    #[test]
    fn test_balanced_sharing_when_cities_outnumber_pallets() {
        let out = DeterministicPolicy
            .assign(&cities(&["Pune", "Mumbai", "Delhi"]), &[1, 2])
            .unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.values().all(|p| [1, 2].contains(p)));

        // Bucket sizes differ by at most one
        let count = |p: u32| out.values().filter(|&&v| v == p).count();
        let (a, b) = (count(1), count(2));
        assert_eq!(a + b, 3);
        assert!(a.abs_diff(b) <= 1);
    }

    #[test]
    fn test_single_city_gets_some_pallet() {
        let out = DeterministicPolicy
            .assign(&cities(&["Pune"]), &[1, 2, 3])
            .unwrap();
        assert_eq!(out.len(), 1);
        assert!([1, 2, 3].contains(&out["Pune"]));
    }

    #[test]
    fn test_fallback_is_deterministic() {
        let input = cities(&["Pune", "Mumbai", "Delhi", "Nagpur"]);
        let first = DeterministicPolicy.assign(&input, &[4, 7]).unwrap();
        let second = DeterministicPolicy.assign(&input, &[4, 7]).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pallet_numbers_need_not_be_contiguous() {
        let out = DeterministicPolicy
            .assign(&cities(&["Pune", "Mumbai"]), &[10, 42])
            .unwrap();
        assert_eq!(out["Pune"], 10);
        assert_eq!(out["Mumbai"], 42);
    }

    #[test]
    fn test_empty_pallet_set_is_an_error() {
        assert!(matches!(
            DeterministicPolicy.assign(&cities(&["Pune"]), &[]),
            Err(PalletError::NoPallets)
        ));
    }

    #[test]
    fn test_no_cities_yields_empty_mapping() {
        let out = DeterministicPolicy.assign(&[], &[1, 2]).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_city() {
        let input = cities(&["Pune", "Mumbai"]);
        let candidate = BTreeMap::from([("Pune".to_string(), 1)]);
        assert!(matches!(
            validate_assignment(&input, &[1, 2], &candidate),
            Err(PalletError::InvalidSuggestion { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_extra_city() {
        let input = cities(&["Pune"]);
        let candidate = BTreeMap::from([("Pune".to_string(), 1), ("Goa".to_string(), 2)]);
        assert!(matches!(
            validate_assignment(&input, &[1, 2], &candidate),
            Err(PalletError::InvalidSuggestion { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_pallet_outside_available_set() {
        let input = cities(&["Pune"]);
        let candidate = BTreeMap::from([("Pune".to_string(), 9)]);
        assert!(matches!(
            validate_assignment(&input, &[1, 2], &candidate),
            Err(PalletError::InvalidSuggestion { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_contract_conforming_mapping() {
        let input = cities(&["Pune", "Mumbai"]);
        let candidate = BTreeMap::from([("Pune".to_string(), 2), ("Mumbai".to_string(), 2)]);
        assert!(validate_assignment(&input, &[1, 2], &candidate).is_ok());
    }

    struct AlwaysFails;
    impl PalletAssignmentPolicy for AlwaysFails {
        fn assign(
            &self,
            _cities: &[String],
            _pallets: &[u32],
        ) -> Result<BTreeMap<String, u32>, PalletError> {
            Err(PalletError::InvalidSuggestion {
                reason: "nope".to_string(),
            })
        }
    }

    struct FixedPolicy(BTreeMap<String, u32>);
    impl PalletAssignmentPolicy for FixedPolicy {
        fn assign(
            &self,
            _cities: &[String],
            _pallets: &[u32],
        ) -> Result<BTreeMap<String, u32>, PalletError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_fallback_kicks_in_on_primary_failure() {
        let composed = WithFallback::new(AlwaysFails, DeterministicPolicy);
        let out = composed.assign(&cities(&["Pune", "Mumbai"]), &[1, 2]).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_primary_wins_when_it_succeeds() {
        let fixed = BTreeMap::from([("Pune".to_string(), 2)]);
        let composed = WithFallback::new(FixedPolicy(fixed.clone()), DeterministicPolicy);
        let out = composed.assign(&cities(&["Pune"]), &[1, 2]).unwrap();
        assert_eq!(out, fixed);
    }
}
