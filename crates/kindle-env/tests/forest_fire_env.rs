//! End-to-end behaviour of the forest-fire environment.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kindle_core::{Grid, StepError};
use kindle_env::{CaEnv, ForestFire, ForestFireConfig, ForestFireEnv};
use kindle_operators::{CaParams, Direction, ForestFireContext, Position};
use kindle_space::Space;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;

const FIRE: i32 = 2;

/// A 3x3 forest whose agent starts in the corner and whose lattice never
/// sweeps within the first ten steps.
fn small_env() -> ForestFireEnv {
    let mut config = ForestFireConfig::bundled().unwrap();
    config.rows = 3;
    config.cols = 3;
    config.initial_position = Position::new(0, 0);
    config.rules.freeze = 10;
    CaEnv::new(ForestFire::new(config).unwrap(), Some(0))
}

fn all_fire() -> Grid {
    Grid::from_rows(vec![vec![FIRE; 3]; 3]).unwrap()
}

fn frozen_context() -> ForestFireContext {
    ForestFireContext {
        params: CaParams {
            p_tree: 0.0,
            p_fire: 0.0,
        },
        position: Position::new(0, 0),
        freeze: 10,
        hits: 0,
    }
}

/// Trees everywhere except a single fire under the agent.
fn last_fire() -> Grid {
    let mut grid = Grid::from_rows(vec![vec![1; 3]; 3]).unwrap();
    grid.set(0, 0, FIRE);
    grid
}

/// Counts `WARN` events.
#[derive(Clone, Default)]
struct WarnCounter(Arc<AtomicUsize>);

impl WarnCounter {
    fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

fn action(env: &ForestFireEnv, direction: Direction) -> u32 {
    env.scenario().config().rules.actions.index_of(direction)
}

fn hits_after(env: &mut ForestFireEnv, direction: Direction) -> u64 {
    let a = action(env, direction);
    let result = env.step(a).unwrap();
    result.info["hits"]
}

#[test]
fn hits_count_extinguished_cells() {
    let mut env = small_env();
    assert_eq!(env.info()["hits"], 0);

    env.set_state(all_fire(), frozen_context()).unwrap();
    assert_eq!(hits_after(&mut env, Direction::Right), 1);
    assert_eq!(hits_after(&mut env, Direction::Stay), 1);
    assert_eq!(hits_after(&mut env, Direction::Down), 2);

    env.reset();
    assert_eq!(env.info()["hits"], 0);

    env.set_state(all_fire(), frozen_context()).unwrap();
    assert_eq!(hits_after(&mut env, Direction::Down), 1);
    assert_eq!(hits_after(&mut env, Direction::Right), 2);
    assert_eq!(hits_after(&mut env, Direction::Right), 3);
    assert_eq!(hits_after(&mut env, Direction::Left), 3);
    assert_eq!(hits_after(&mut env, Direction::Up), 4);
    assert_eq!(hits_after(&mut env, Direction::Right), 5);
}

#[test]
fn frozen_lattice_only_changes_under_agent() {
    let mut env = small_env();
    env.set_state(all_fire(), frozen_context()).unwrap();
    let result = env.step(action(&env, Direction::DownRight)).unwrap();

    assert_eq!(result.observation.context.position, Position::new(1, 1));
    assert_eq!(result.observation.context.freeze, 9);
    assert_eq!(result.observation.grid.count(FIRE), 8);
    assert_eq!(result.observation.grid.get(1, 1), Some(0));
    // 8 fires at -1 each, one empty at 0.
    assert_eq!(result.reward, -8.0);
    assert!(!result.done);
}

#[test]
fn extinguishing_last_fire_ends_episode() {
    let mut env = small_env();
    env.set_state(last_fire(), frozen_context()).unwrap();

    let result = env.step(action(&env, Direction::Stay)).unwrap();
    assert!(result.done);
    assert!(env.is_done());
    assert_eq!(result.reward, 8.0);
    assert_eq!(result.info["hits"], 1);
}

#[test]
fn steps_after_done_are_inert() {
    let mut env = small_env();
    env.set_state(last_fire(), frozen_context()).unwrap();
    env.step(action(&env, Direction::Stay)).unwrap();
    let terminal = env.observation();

    for expected in 1..=3 {
        // Even an out-of-space action is not rejected once done.
        let result = env.step(99).unwrap();
        assert!(result.done);
        assert_eq!(result.reward, 0.0);
        assert_eq!(result.observation, terminal);
        assert_eq!(result.info["hits"], 1);
        assert_eq!(env.steps_beyond_done(), expected);
    }

    env.reset();
    assert!(!env.is_done());
    assert_eq!(env.steps_beyond_done(), 0);
    assert_eq!(env.context().hits, 0);
}

#[test]
fn post_done_warning_fires_once_per_episode() {
    let warnings = WarnCounter::default();
    let subscriber = Registry::default().with(warnings.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut env = small_env();
        env.set_state(last_fire(), frozen_context()).unwrap();
        env.step(action(&env, Direction::Stay)).unwrap();
        assert!(env.is_done());
        assert_eq!(warnings.count(), 0);

        for _ in 0..4 {
            env.step(action(&env, Direction::Up)).unwrap();
        }
        assert_eq!(env.steps_beyond_done(), 4);
        assert_eq!(warnings.count(), 1);

        env.reset();
        env.set_state(last_fire(), frozen_context()).unwrap();
        env.step(action(&env, Direction::Stay)).unwrap();
        env.step(action(&env, Direction::Stay)).unwrap();
        env.step(action(&env, Direction::Stay)).unwrap();
        assert_eq!(warnings.count(), 2);
    });
}

#[test]
fn invalid_action_leaves_state_untouched() {
    let mut env = ForestFireEnv::bundled(Some(5)).unwrap();
    let before = env.observation();
    match env.step(9) {
        Err(StepError::InvalidAction { action }) => assert_eq!(action, "9"),
        other => panic!("expected InvalidAction, got {other:?}"),
    }
    assert_eq!(env.observation(), before);
    assert!(!env.is_done());
}

#[test]
fn set_state_rejects_foreign_states() {
    let mut env = small_env();
    let before = env.observation();

    let wrong_shape = Grid::from_rows(vec![vec![FIRE; 4]; 3]).unwrap();
    assert!(env.set_state(wrong_shape, frozen_context()).is_err());

    let mut off_grid = frozen_context();
    off_grid.position = Position::new(3, 0);
    assert!(env.set_state(all_fire(), off_grid).is_err());

    let mut too_frozen = frozen_context();
    too_frozen.freeze = 11;
    assert!(env.set_state(all_fire(), too_frozen).is_err());

    assert_eq!(env.observation(), before);
}

#[test]
fn equal_seeds_give_equal_trajectories() {
    let mut a = ForestFireEnv::bundled(Some(1234)).unwrap();
    let mut b = ForestFireEnv::bundled(Some(1234)).unwrap();
    assert_eq!(a.observation(), b.observation());

    let mut policy = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..50 {
        let action = policy.gen_range(0..9);
        let ra = a.step(action).unwrap();
        let rb = b.step(action).unwrap();
        assert_eq!(ra, rb);
    }
}

#[test]
fn reseeding_replays_resets() {
    let mut env = ForestFireEnv::bundled(None).unwrap();
    let seed = env.seed(Some(42));
    assert_eq!(seed, 42);
    let first = env.reset();
    env.seed(Some(42));
    assert_eq!(env.reset(), first);
}

#[test]
fn random_policy_stays_in_spaces() {
    let mut env = ForestFireEnv::bundled(Some(8)).unwrap();
    let cells = (env.grid().len()) as f64;
    let mut policy = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..12 {
        let action = env.action_space().sample(&mut policy);
        assert!(env.action_space().contains(&action));
        let result = env.step(action).unwrap();
        assert!(env.observation_space().contains(&result.observation));
        // Weights range over [-1, 1].
        assert!((-cells..=cells).contains(&result.reward));
        assert!(result.info.contains_key("hits"));
    }

    let obs = env.reset();
    assert!(env.observation_space().contains(&obs));
}

#[test]
fn count_cells_matches_grid() {
    let env = ForestFireEnv::bundled(Some(17)).unwrap();
    let counts = env.count_cells();
    assert_eq!(counts.values().sum::<usize>(), env.grid().len());
    for (value, n) in counts {
        assert_eq!(env.grid().count(value), n);
    }
}
