//! Nearby value selector whose origins are entities of the same variable.

use std::fmt::{self, Debug};

use nearforge_config::NearbySelectionConfig;
use nearforge_core::{EntityDescriptor, NearforgeError, Result, VariableDescriptor};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use crate::event::{PhaseEvent, PhaseLifecycleListener};

use super::distance_meter::NearbyDistanceMeter;
use super::distribution::{working_rng, IndexSampler, NearbyDistribution};
use super::index::ProximityIndex;
use super::iterators::{NearbyValueIter, RandomNearbyIter, SequentialNearbyIter};
use super::source::{CandidateSource, OriginId, OriginSource};

/// Selects values of a variable near an origin entity.
///
/// Origins are entities whose own variable can take the candidates as
/// values, e.g. a customer's `previous` standstill is near other customers.
/// The candidate set of an origin is therefore expected to contain the
/// origin itself at distance 0, which is why position 0 of every row is
/// skipped by default.
///
/// The selector holds a [`ProximityIndex`] only between
/// [`phase_started`](PhaseLifecycleListener::phase_started) and
/// [`phase_ended`](PhaseLifecycleListener::phase_ended).
///
/// # Type Parameters
///
/// * `OS` - The origin source
/// * `CS` - The candidate source
/// * `M` - The distance meter
/// * `NS` - The index sampler used for random selection
pub struct NearEntityNearbyValueSelector<OS, CS, M, NS = NearbyDistribution>
where
    OS: OriginSource,
    CS: CandidateSource<OS::Origin>,
{
    name: String,
    origin_source: OS,
    candidate_source: CS,
    distance_meter: M,
    nearby_random: NS,
    random_selection: bool,
    discard_nearby_index_zero: bool,
    random_seed: Option<u64>,
    index: Option<ProximityIndex<CS::Candidate>>,
}

impl<OS, CS, M> NearEntityNearbyValueSelector<OS, CS, M, NearbyDistribution>
where
    OS: OriginSource,
    CS: CandidateSource<OS::Origin>,
    M: NearbyDistanceMeter<OS::Origin, CS::Candidate>,
{
    /// Creates a selector with the distribution described by `config`.
    pub fn from_config(
        variable: &VariableDescriptor,
        origin_entity: &EntityDescriptor,
        origin_source: OS,
        candidate_source: CS,
        distance_meter: M,
        config: &NearbySelectionConfig,
    ) -> Result<Self> {
        let nearby_random = NearbyDistribution::from_config(&config.distribution)?;
        Self::new(
            variable,
            origin_entity,
            origin_source,
            candidate_source,
            distance_meter,
            nearby_random,
            config,
        )
    }
}

impl<OS, CS, M, NS> NearEntityNearbyValueSelector<OS, CS, M, NS>
where
    OS: OriginSource,
    CS: CandidateSource<OS::Origin>,
    M: NearbyDistanceMeter<OS::Origin, CS::Candidate>,
    NS: IndexSampler,
{
    /// Creates a selector for `variable` with origins of type `origin_entity`.
    ///
    /// # Errors
    ///
    /// - [`NearforgeError::IncompatibleVariableType`] if the variable's value
    ///   type cannot hold an `origin_entity`.
    /// - [`NearforgeError::Config`] if the variable declares no value type or
    ///   the config is invalid.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        variable: &VariableDescriptor,
        origin_entity: &EntityDescriptor,
        origin_source: OS,
        candidate_source: CS,
        distance_meter: M,
        nearby_random: NS,
        config: &NearbySelectionConfig,
    ) -> Result<Self> {
        let name = format!("NearEntityNearbyValueSelector({})", variable.name);

        let value_type = variable.value_type.as_ref().ok_or_else(|| {
            NearforgeError::Config(format!(
                "The selector ({name}) has a variable ({}) without a declared value type.",
                variable.name
            ))
        })?;
        if !value_type.is_assignable_from(origin_entity.type_id) {
            return Err(NearforgeError::IncompatibleVariableType {
                selector: name,
                variable: variable.name,
                value_type: value_type.type_name,
                entity_type: origin_entity.type_name,
            });
        }
        config
            .validate()
            .map_err(|e| NearforgeError::Config(format!("The selector ({name}) {e}")))?;

        Ok(Self {
            name,
            origin_source,
            candidate_source,
            distance_meter,
            nearby_random,
            random_selection: config.is_random_selection(),
            discard_nearby_index_zero: config.discard_nearby_index_zero,
            random_seed: config.random_seed,
            index: None,
        })
    }

    /// Builds the proximity index from the final enumerations.
    ///
    /// Replaces any index left from an earlier phase.
    pub fn build_index(&mut self) -> Result<()> {
        self.index = None;
        let index = ProximityIndex::build(
            &self.name,
            &self.origin_source,
            &self.candidate_source,
            &self.distance_meter,
        )?;
        self.index = Some(index);
        Ok(())
    }

    /// Drops the proximity index.
    pub fn drop_index(&mut self) {
        if self.index.take().is_some() {
            debug!(event = "nearby_index_dropped", selector = %self.name);
        }
    }

    /// Returns an iterator walking the rows of `origins` in distance order.
    ///
    /// # Errors
    ///
    /// [`NearforgeError::InvalidState`] outside a phase.
    pub fn sequential<I>(
        &self,
        origins: I,
    ) -> Result<SequentialNearbyIter<'_, CS::Candidate, I::IntoIter>>
    where
        I: IntoIterator<Item = OriginId>,
    {
        let index = self.require_index()?;
        Ok(SequentialNearbyIter::new(
            index,
            origins.into_iter(),
            self.nearby_offset(),
        ))
    }

    /// Returns an iterator sampling the rows of `origins` with `rng`.
    ///
    /// # Errors
    ///
    /// [`NearforgeError::InvalidState`] outside a phase.
    pub fn random<'a, I, R>(
        &'a self,
        origins: I,
        rng: &'a mut R,
    ) -> Result<RandomNearbyIter<'a, CS::Candidate, I::IntoIter, NS, R>>
    where
        I: IntoIterator<Item = OriginId>,
        R: Rng + ?Sized,
    {
        let index = self.require_index()?;
        Ok(RandomNearbyIter::new(
            index,
            origins.into_iter(),
            &self.nearby_random,
            rng,
            self.nearby_offset(),
        ))
    }

    /// Returns the sequential or random iterator, per the configured order.
    pub fn iter<'a, I, R>(
        &'a self,
        origins: I,
        rng: &'a mut R,
    ) -> Result<NearbyValueIter<'a, CS::Candidate, I::IntoIter, NS, R>>
    where
        I: IntoIterator<Item = OriginId>,
        R: Rng + ?Sized,
    {
        if self.random_selection {
            self.random(origins, rng).map(NearbyValueIter::Random)
        } else {
            self.sequential(origins).map(NearbyValueIter::Sequential)
        }
    }

    /// Returns every candidate of `origin` in enumeration order, unsorted.
    pub fn ending_iter<'a>(
        &'a self,
        origin: &'a OS::Origin,
    ) -> impl Iterator<Item = CS::Candidate> + 'a {
        self.candidate_source.enumerate_final(origin)
    }
}

impl<OS, CS, M, NS> NearEntityNearbyValueSelector<OS, CS, M, NS>
where
    OS: OriginSource,
    CS: CandidateSource<OS::Origin>,
{
    /// Returns the selector name used in errors and logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the proximity index of the current phase.
    pub fn index(&self) -> Option<&ProximityIndex<CS::Candidate>> {
        self.index.as_ref()
    }

    /// Returns the origin source.
    pub fn origin_source(&self) -> &OS {
        &self.origin_source
    }

    /// Returns the candidate source.
    pub fn candidate_source(&self) -> &CS {
        &self.candidate_source
    }

    /// Returns the configured random seed.
    pub fn random_seed(&self) -> Option<u64> {
        self.random_seed
    }

    /// Creates a generator for [`random`](Self::random) from the configured seed.
    ///
    /// Every call with a seed starts the same sequence; without one the
    /// generator is seeded from the operating system.
    pub fn working_rng(&self) -> StdRng {
        working_rng(self.random_seed)
    }

    /// Returns true if random selection is configured.
    pub fn is_random_selection(&self) -> bool {
        self.random_selection
    }

    /// Returns true if the candidate source is countable.
    pub fn is_countable(&self) -> bool {
        self.candidate_source.is_countable()
    }

    /// Returns true if iteration must be bounded by the caller.
    pub fn is_never_ending(&self) -> bool {
        self.random_selection || !self.is_countable()
    }

    /// Returns the number of row positions skipped at the start of every row.
    pub fn nearby_offset(&self) -> usize {
        usize::from(self.discard_nearby_index_zero)
    }

    /// Returns the number of selectable candidates of `origin`.
    ///
    /// Zero means no nearby candidate is available.
    pub fn row_size(&self, origin: &OS::Origin) -> u64 {
        self.candidate_source
            .count(origin)
            .saturating_sub(self.nearby_offset() as u64)
    }

    /// Returns the number of selectable positions in an indexed row.
    pub fn nearby_size(&self, origin: OriginId) -> Option<usize> {
        self.index.as_ref()?.row_size(origin, self.nearby_offset())
    }

    fn require_index(&self) -> Result<&ProximityIndex<CS::Candidate>> {
        self.index.as_ref().ok_or_else(|| {
            NearforgeError::InvalidState(format!(
                "The selector ({}) has no nearby index outside a phase.",
                self.name
            ))
        })
    }
}

impl<OS, CS, M, NS> PhaseLifecycleListener for NearEntityNearbyValueSelector<OS, CS, M, NS>
where
    OS: OriginSource,
    CS: CandidateSource<OS::Origin>,
    M: NearbyDistanceMeter<OS::Origin, CS::Candidate>,
    NS: IndexSampler,
{
    fn phase_started(&mut self, event: &PhaseEvent) -> Result<()> {
        debug!(
            event = "nearby_index_build",
            selector = %self.name,
            phase_index = event.phase_index,
        );
        self.build_index()
    }

    fn phase_ended(&mut self, _event: &PhaseEvent) {
        self.drop_index();
    }
}

impl<OS, CS, M, NS> Debug for NearEntityNearbyValueSelector<OS, CS, M, NS>
where
    OS: OriginSource,
    CS: CandidateSource<OS::Origin>,
    M: Debug,
    NS: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NearEntityNearbyValueSelector")
            .field("name", &self.name)
            .field("origin_source", &self.origin_source)
            .field("candidate_source", &self.candidate_source)
            .field("distance_meter", &self.distance_meter)
            .field("nearby_random", &self.nearby_random)
            .field("random_selection", &self.random_selection)
            .field("discard_nearby_index_zero", &self.discard_nearby_index_zero)
            .field("random_seed", &self.random_seed)
            .field("index", &self.index)
            .finish()
    }
}
