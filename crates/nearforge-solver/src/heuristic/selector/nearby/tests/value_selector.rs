//! Tests for the near entity nearby value selector.

use std::cell::RefCell;
use std::rc::Rc;

use nearforge_config::{
    LinearDistributionConfig, NearbyDistributionConfig, NearbySelectionConfig, SelectionOrder,
};
use nearforge_core::{NearforgeError, ValueTypeDescriptor, VariableDescriptor};
use nearforge_test::routing::{Standstill, Vehicle};

use crate::event::{PhaseLifecycleListener, PhaseLifecycleSupport};
use crate::heuristic::selector::nearby::{
    CandidateSource, LinearDistribution, NearEntityNearbyValueSelector, NearbyValueIter, OriginId,
    OriginSource, StaticCandidateSource, StaticOriginSource,
};
use crate::test_utils::{
    create_customer_descriptor, customer_selector, grid_customers, line_customers,
    local_search_phase, previous_variable_descriptor, test_rng, Customer, CustomerDistanceMeter,
    CustomerSelector,
};

fn original_order() -> NearbySelectionConfig {
    NearbySelectionConfig::new().with_selection_order(SelectionOrder::Original)
}

fn random_order() -> NearbySelectionConfig {
    NearbySelectionConfig::new().with_selection_order(SelectionOrder::Random)
}

/// Offers every customer with a configurable count and countability.
#[derive(Debug)]
struct ScriptedCandidates {
    customers: Vec<Customer>,
    reported: u64,
    countable: bool,
}

impl ScriptedCandidates {
    fn new(customers: Vec<Customer>) -> Self {
        let reported = customers.len() as u64;
        Self {
            customers,
            reported,
            countable: true,
        }
    }

    fn uncountable(mut self) -> Self {
        self.countable = false;
        self
    }

    fn reporting(mut self, reported: u64) -> Self {
        self.reported = reported;
        self
    }
}

impl CandidateSource<Customer> for ScriptedCandidates {
    type Candidate = Customer;

    fn enumerate_final<'a>(&'a self, _origin: &'a Customer) -> impl Iterator<Item = Customer> + 'a {
        self.customers.iter().cloned()
    }

    fn count(&self, _origin: &Customer) -> u64 {
        self.reported
    }

    fn is_countable(&self) -> bool {
        self.countable
    }
}

#[test]
fn test_scenario_nearest_values_of_one_origin() {
    let mut selector = customer_selector(line_customers(&[0.0, 5.0, 2.0, 9.0]), &original_order())
        .unwrap();
    selector.phase_started(&local_search_phase(0)).unwrap();

    let a = OriginId(0);
    let row: Vec<usize> = selector.index().unwrap().row(a).unwrap().iter().map(|c| c.id).collect();
    assert_eq!(row, vec![0, 2, 1, 3]);
    assert_eq!(selector.nearby_size(a), Some(3));

    let values: Vec<usize> = selector
        .sequential(std::iter::repeat(a))
        .unwrap()
        .map(|c| c.id)
        .collect();
    assert_eq!(values, vec![2, 1, 3]);
}

#[test]
fn test_name() {
    let selector = customer_selector(grid_customers(2, 1), &original_order()).unwrap();
    assert_eq!(selector.name(), "NearEntityNearbyValueSelector(previous)");
}

#[test]
fn test_incompatible_variable_type() {
    let variable = VariableDescriptor::genuine("vehicle")
        .with_value_type(ValueTypeDescriptor::of::<Vehicle>());
    let customers = grid_customers(2, 2);

    let result = NearEntityNearbyValueSelector::from_config(
        &variable,
        &create_customer_descriptor(),
        StaticOriginSource::new(customers.clone()),
        StaticCandidateSource::new(customers),
        CustomerDistanceMeter,
        &original_order(),
    );

    match result {
        Err(NearforgeError::IncompatibleVariableType {
            selector,
            variable,
            value_type,
            entity_type,
        }) => {
            assert_eq!(selector, "NearEntityNearbyValueSelector(vehicle)");
            assert_eq!(variable, "vehicle");
            assert_eq!(value_type, "Vehicle");
            assert_eq!(entity_type, "Customer");
        }
        other => panic!("expected IncompatibleVariableType, got {other:?}"),
    }
}

#[test]
fn test_supertype_value_type_is_compatible() {
    // Standstill is declared assignable from Customer.
    let variable = previous_variable_descriptor();
    let value_type = variable.value_type.as_ref().unwrap();
    assert_eq!(value_type.type_id, std::any::TypeId::of::<Standstill>());

    assert!(customer_selector(grid_customers(2, 2), &original_order()).is_ok());
}

#[test]
fn test_missing_value_type() {
    let customers = grid_customers(2, 1);
    let result = NearEntityNearbyValueSelector::from_config(
        &VariableDescriptor::genuine("previous"),
        &create_customer_descriptor(),
        StaticOriginSource::new(customers.clone()),
        StaticCandidateSource::new(customers),
        CustomerDistanceMeter,
        &original_order(),
    );

    assert!(matches!(result, Err(NearforgeError::Config(_))));
}

#[test]
fn test_invalid_distribution_config() {
    let config = random_order().with_distribution(NearbyDistributionConfig::Linear(
        LinearDistributionConfig {
            size_maximum: Some(0),
        },
    ));

    let result = customer_selector(grid_customers(2, 1), &config);
    assert!(matches!(result, Err(NearforgeError::Config(_))));
}

#[test]
fn test_no_index_outside_phase() {
    let mut selector = customer_selector(grid_customers(3, 3), &original_order()).unwrap();
    let mut rng = test_rng(0);

    assert!(selector.index().is_none());
    assert!(matches!(
        selector.sequential([OriginId(0)]),
        Err(NearforgeError::InvalidState(_))
    ));
    assert!(matches!(
        selector.random([OriginId(0)], &mut rng),
        Err(NearforgeError::InvalidState(_))
    ));

    selector.phase_started(&local_search_phase(0)).unwrap();
    assert!(selector.sequential([OriginId(0)]).is_ok());

    selector.phase_ended(&local_search_phase(0));
    assert!(selector.index().is_none());
    assert!(matches!(
        selector.iter([OriginId(0)], &mut rng),
        Err(NearforgeError::InvalidState(_))
    ));
}

#[test]
fn test_index_rebuilt_per_phase() {
    let mut selector = customer_selector(grid_customers(3, 2), &original_order()).unwrap();

    for phase_index in 0..3 {
        let phase = local_search_phase(phase_index);
        selector.phase_started(&phase).unwrap();
        let index = selector.index().unwrap();
        assert_eq!(index.origin_count(), 6);
        assert_eq!(index.candidate_count(), 36);
        selector.phase_ended(&phase);
        assert!(selector.index().is_none());
    }
}

#[test]
fn test_phase_support_drives_shared_selector() {
    let selector = Rc::new(RefCell::new(
        customer_selector(grid_customers(2, 2), &original_order()).unwrap(),
    ));
    let mut support = PhaseLifecycleSupport::new();
    support.add_listener(selector.clone());

    support.fire_phase_started(&local_search_phase(0)).unwrap();
    {
        let selector = selector.borrow();
        assert_eq!(selector.index().map(|index| index.origin_count()), Some(4));
        assert_eq!(selector.sequential([OriginId(0)]).unwrap().count(), 1);
    }

    support.fire_phase_ended(&local_search_phase(0));
    assert!(selector.borrow().index().is_none());
}

#[test]
fn test_failed_start_drops_built_indexes() {
    let built = Rc::new(RefCell::new(
        customer_selector(grid_customers(2, 2), &original_order()).unwrap(),
    ));
    let mismatched = Rc::new(RefCell::new(
        NearEntityNearbyValueSelector::from_config(
            &previous_variable_descriptor(),
            &create_customer_descriptor(),
            StaticOriginSource::new(grid_customers(2, 2)),
            ScriptedCandidates::new(grid_customers(2, 2)).reporting(1),
            CustomerDistanceMeter,
            &original_order(),
        )
        .unwrap(),
    ));
    let mut support = PhaseLifecycleSupport::new();
    support.add_listener(built.clone());
    support.add_listener(mismatched.clone());

    let result = support.fire_phase_started(&local_search_phase(0));

    assert!(matches!(result, Err(NearforgeError::InvalidState(_))));
    assert!(built.borrow().index().is_none());
    assert!(mismatched.borrow().index().is_none());
}

#[test]
fn test_row_size_law() {
    let customers = grid_customers(3, 1);
    let excluding = customer_selector(customers.clone(), &original_order()).unwrap();
    let including = customer_selector(
        customers.clone(),
        &original_order().with_discard_nearby_index_zero(false),
    )
    .unwrap();

    assert_eq!(excluding.nearby_offset(), 1);
    assert_eq!(including.nearby_offset(), 0);
    for customer in &customers {
        assert_eq!(excluding.row_size(customer), 2);
        assert_eq!(including.row_size(customer), 3);
    }

    let lonely = customer_selector(line_customers(&[1.0]), &original_order()).unwrap();
    assert_eq!(lonely.row_size(&line_customers(&[1.0])[0]), 0);
}

#[test]
fn test_lonely_origin_has_no_nearby_value() {
    let mut selector = customer_selector(line_customers(&[1.0]), &random_order()).unwrap();
    selector.phase_started(&local_search_phase(0)).unwrap();
    let mut rng = test_rng(0);

    assert_eq!(selector.sequential(std::iter::repeat(OriginId(0))).unwrap().count(), 0);
    assert_eq!(
        selector
            .random(std::iter::repeat(OriginId(0)), &mut rng)
            .unwrap()
            .next(),
        None
    );
}

#[test]
fn test_countability() {
    let customers = grid_customers(2, 2);
    let sequential = customer_selector(customers.clone(), &original_order()).unwrap();
    let random = customer_selector(customers.clone(), &random_order()).unwrap();
    let inherited = customer_selector(customers.clone(), &NearbySelectionConfig::new()).unwrap();

    assert!(sequential.is_countable());
    assert!(!sequential.is_never_ending());
    assert!(random.is_never_ending());
    assert!(inherited.is_random_selection());

    let uncountable = NearEntityNearbyValueSelector::from_config(
        &previous_variable_descriptor(),
        &create_customer_descriptor(),
        StaticOriginSource::new(customers.clone()),
        ScriptedCandidates::new(customers).uncountable(),
        CustomerDistanceMeter,
        &original_order(),
    )
    .unwrap();
    assert!(!uncountable.is_countable());
    assert!(uncountable.is_never_ending());
}

#[test]
fn test_iter_follows_selection_order() {
    let customers = grid_customers(3, 3);
    let mut sequential = customer_selector(customers.clone(), &original_order()).unwrap();
    let mut random = customer_selector(customers, &random_order()).unwrap();
    sequential.phase_started(&local_search_phase(0)).unwrap();
    random.phase_started(&local_search_phase(0)).unwrap();
    let mut rng = test_rng(9);

    let iter = sequential.iter(std::iter::repeat(OriginId(4)), &mut rng).unwrap();
    assert!(matches!(iter, NearbyValueIter::Sequential(_)));
    assert_eq!(iter.count(), 8);

    let iter = random.iter(std::iter::repeat(OriginId(4)), &mut rng).unwrap();
    assert!(matches!(iter, NearbyValueIter::Random(_)));
    assert_eq!(iter.take(1_000).count(), 1_000);
}

#[test]
fn test_random_with_live_origin_stream() {
    let mut selector = customer_selector(grid_customers(4, 4), &random_order()).unwrap();
    selector.phase_started(&local_search_phase(0)).unwrap();
    let mut rng = test_rng(11);

    let origins: Vec<OriginId> = selector.origin_source().iter().collect();
    let values: Vec<Customer> = selector.random(origins.clone(), &mut rng).unwrap().collect();

    assert_eq!(values.len(), origins.len());
    let finals: Vec<Customer> = selector.origin_source().enumerate_final().collect();
    for (origin, value) in finals.iter().zip(&values) {
        assert_ne!(origin, value);
    }
}

#[test]
fn test_configured_seed_is_reproducible() {
    let config = random_order().with_random_seed(42);
    let mut first = customer_selector(grid_customers(5, 5), &config).unwrap();
    let mut second = customer_selector(grid_customers(5, 5), &config).unwrap();
    first.phase_started(&local_search_phase(0)).unwrap();
    second.phase_started(&local_search_phase(0)).unwrap();

    let draw = |selector: &CustomerSelector| {
        let mut rng = selector.working_rng();
        selector
            .random(std::iter::repeat(OriginId(12)), &mut rng)
            .unwrap()
            .take(50)
            .map(|c| c.id)
            .collect::<Vec<_>>()
    };

    assert_eq!(first.random_seed(), Some(42));
    assert_eq!(draw(&first), draw(&second));
    assert_eq!(draw(&first), draw(&first));
}

#[test]
fn test_unseeded_by_default() {
    let selector = customer_selector(grid_customers(2, 2), &random_order()).unwrap();
    assert_eq!(selector.random_seed(), None);
}

#[test]
fn test_custom_sampler() {
    let customers = line_customers(&[0.0, 1.0, 2.0, 3.0, 4.0]);
    let mut selector = NearEntityNearbyValueSelector::new(
        &previous_variable_descriptor(),
        &create_customer_descriptor(),
        StaticOriginSource::new(customers.clone()),
        StaticCandidateSource::new(customers),
        CustomerDistanceMeter,
        LinearDistribution::new(1).unwrap(),
        &random_order(),
    )
    .unwrap();
    selector.phase_started(&local_search_phase(0)).unwrap();
    let mut rng = test_rng(12);

    let values: Vec<usize> = selector
        .random(std::iter::repeat(OriginId(0)), &mut rng)
        .unwrap()
        .take(100)
        .map(|c| c.id)
        .collect();
    assert!(values.iter().all(|&id| id == 1));
}

#[test]
fn test_ending_iter_lists_all_candidates() {
    let customers = line_customers(&[0.0, 5.0, 2.0]);
    let selector = customer_selector(customers.clone(), &original_order()).unwrap();

    let values: Vec<Customer> = selector.ending_iter(&customers[0]).collect();
    assert_eq!(values, customers);
}
