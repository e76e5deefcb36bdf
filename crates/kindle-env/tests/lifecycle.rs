//! Environment lifecycle with fixture operators.

use std::sync::Arc;

use kindle_core::{Grid, OperatorError, StepError};
use kindle_env::{CaEnv, Info, MockEnv, MockScenario, Scenario};
use kindle_operator::{Operator, OperatorSpaces, Sequence, Stage};
use kindle_space::{Discrete, GridSpace, ObservationSpace, Space};
use kindle_test_utils::{
    fixture_grid_space, ConstOperator, FailingOperator, TagOperator, Trace, TraceSpace,
};
use proptest::prelude::*;
use rand::RngCore;

/// Runs an arbitrary fixture coordinator; done once the grid is all 3s.
struct FixtureScenario {
    actions: Discrete,
    observation_space: ObservationSpace<TraceSpace>,
    coordinator: Box<dyn Operator<Action = u32, Context = Trace>>,
}

impl FixtureScenario {
    fn new(coordinator: impl Operator<Action = u32, Context = Trace>) -> Self {
        Self {
            actions: Discrete::new(TraceSpace::ACTIONS).unwrap(),
            observation_space: ObservationSpace::new(fixture_grid_space(), TraceSpace),
            coordinator: Box::new(coordinator),
        }
    }
}

/// Hands a coordinator to the environment while the test keeps a handle
/// for inspecting it.
struct Shared<T>(Arc<T>);

impl<T: Operator + Sync> Operator for Shared<T> {
    type Action = T::Action;
    type Context = T::Context;

    fn name(&self) -> &str {
        self.0.name()
    }

    fn spaces(&self) -> &OperatorSpaces<T::Action, T::Context> {
        self.0.spaces()
    }

    fn apply(
        &self,
        grid: Grid,
        action: &T::Action,
        context: T::Context,
        rng: &mut dyn RngCore,
    ) -> Result<(Grid, T::Context), OperatorError> {
        self.0.apply(grid, action, context, rng)
    }
}

impl Scenario for FixtureScenario {
    type Action = u32;
    type Context = Trace;
    type ContextSpace = TraceSpace;

    fn name(&self) -> &str {
        "fixture"
    }

    fn grid_space(&self) -> &GridSpace {
        self.observation_space.grid_space()
    }

    fn action_space(&self) -> &dyn Space<Value = u32> {
        &self.actions
    }

    fn observation_space(&self) -> &ObservationSpace<TraceSpace> {
        &self.observation_space
    }

    fn coordinator(&self) -> &dyn Operator<Action = u32, Context = Trace> {
        &*self.coordinator
    }

    fn initial_state(&self, _rng: &mut dyn RngCore) -> (Grid, Trace) {
        (Grid::filled([3usize, 3].as_slice(), 0).unwrap(), Vec::new())
    }

    fn award(&self, grid: &Grid, _context: &Trace) -> f64 {
        grid.cells().iter().map(|&v| f64::from(v)).sum()
    }

    fn is_done(&self, grid: &Grid, _context: &Trace) -> bool {
        grid.cells().iter().all(|&v| v == 3)
    }

    fn report(&self, _grid: &Grid, context: &Trace) -> Info {
        Info::from([("stages".to_string(), context.len() as u64)])
    }
}

#[test]
fn failed_step_leaves_state_untouched() {
    let flaky = Arc::new(FailingOperator::new("flaky", 1));
    let mut env = CaEnv::new(FixtureScenario::new(Shared(Arc::clone(&flaky))), Some(0));

    let ok = env.step(0).unwrap();
    assert_eq!(ok.observation.context, vec!["failing-ok"]);
    assert_eq!(ok.reward, 9.0);
    let committed = env.observation();

    match env.step(1) {
        Err(StepError::OperatorFailed { name, reason }) => {
            assert_eq!(name, "flaky");
            assert!(matches!(reason, OperatorError::ExecutionFailed { .. }));
        }
        other => panic!("expected OperatorFailed, got {other:?}"),
    }
    assert_eq!(env.observation(), committed);
    assert!(!env.is_done());
    assert_eq!(flaky.calls(), 2);
}

#[test]
fn sequence_coordinator_runs_stages_in_order() {
    let stages: Vec<Stage<u32, Trace>> = vec![
        Box::new(TagOperator::new("first")),
        Box::new(TagOperator::new("second")),
        Box::new(ConstOperator::new("fill", 3)),
    ];
    let pipeline = Sequence::new("pipeline", stages).unwrap();
    let mut env = CaEnv::new(FixtureScenario::new(pipeline), Some(0));

    let result = env.step(2).unwrap();
    assert_eq!(result.observation.context, vec!["first", "second"]);
    assert_eq!(result.info["stages"], 2);
    assert!(result.done);
    assert_eq!(result.reward, 27.0);

    let after = env.step(0).unwrap();
    assert_eq!(after.reward, 0.0);
    assert_eq!(env.steps_beyond_done(), 1);
}

#[test]
fn out_of_space_action_never_reaches_coordinator() {
    let counted = Arc::new(FailingOperator::new("counted", 10));
    let mut env = CaEnv::new(FixtureScenario::new(Shared(Arc::clone(&counted))), Some(0));
    assert!(matches!(
        env.step(TraceSpace::ACTIONS),
        Err(StepError::InvalidAction { .. })
    ));
    assert_eq!(counted.calls(), 0);

    assert!(env.step(0).is_ok());
    assert_eq!(counted.calls(), 1);
}

#[test]
fn mock_env_is_inert() {
    let mut env = MockEnv::new(MockScenario::new().unwrap(), Some(11));
    let start = env.observation();
    assert_eq!(start.grid.shape().as_slice(), &[8, 8]);
    assert_eq!(env.scenario().name(), "MockCAEnv");

    for action in 0..8 {
        let result = env.step(action).unwrap();
        assert_eq!(result.observation, start);
        assert_eq!(result.reward, 0.0);
        assert!(!result.done);
        assert!(result.info.is_empty());
    }
    assert!(env.step(8).is_err());
}

proptest! {
    #[test]
    fn mock_reset_is_seed_deterministic(seed in any::<u64>()) {
        let mut a = MockEnv::new(MockScenario::new().unwrap(), Some(seed));
        let mut b = MockEnv::new(MockScenario::new().unwrap(), Some(seed));
        prop_assert_eq!(a.observation(), b.observation());
        prop_assert_eq!(a.reset(), b.reset());
        prop_assert!(a.observation_space().contains(&a.observation()));
    }
}
