//! Forest-fire stages composed through the generic operator machinery.

use std::sync::Arc;

use kindle_core::{Grid, OperatorError};
use kindle_operator::{Operator, Sequence, Stage};
use kindle_operators::{
    CaParams, Direction, ForestFireContext, ForestFireCoordinator, ForestFireRules,
    ForestFireSweep, Modify, Move, Position, Wind,
};
use kindle_space::{GridSpace, Space};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn grid_space(rows: usize, cols: usize) -> GridSpace {
    GridSpace::builder()
        .n(3)
        .shape([rows, cols])
        .build()
        .unwrap()
}

fn context(row: usize, col: usize, freeze: u32) -> ForestFireContext {
    ForestFireContext {
        params: CaParams {
            p_tree: 0.05,
            p_fire: 0.01,
        },
        position: Position::new(row, col),
        freeze,
        hits: 0,
    }
}

#[test]
fn sequence_of_stages_matches_coordinator_when_thawed() {
    let rules = ForestFireRules::with_wind(Wind::uniform(0.3).unwrap(), 0);
    let shared = Arc::new(rules.clone());
    let spaces = shared.spaces(grid_space(4, 4)).unwrap();
    let stages: Vec<Stage<u32, ForestFireContext>> = vec![
        Box::new(Move::new(Arc::clone(&shared), spaces.clone())),
        Box::new(Modify::new(Arc::clone(&shared), spaces.clone())),
        Box::new(ForestFireSweep::new(Arc::clone(&shared), spaces)),
    ];
    let pipeline = Sequence::new("forest-fire", stages).unwrap();
    let coordinator = ForestFireCoordinator::new(grid_space(4, 4), rules).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let grid = grid_space(4, 4).sample(&mut rng);
    let action = coordinator.rules().actions.index_of(Direction::Down);

    let mut rng_a = ChaCha8Rng::seed_from_u64(21);
    let mut rng_b = ChaCha8Rng::seed_from_u64(21);
    let (grid_a, ctx_a) = pipeline
        .apply(grid.clone(), &action, context(1, 1, 0), &mut rng_a)
        .unwrap();
    let (grid_b, ctx_b) = coordinator
        .apply(grid, &action, context(1, 1, 0), &mut rng_b)
        .unwrap();

    assert_eq!(grid_a, grid_b);
    assert_eq!(ctx_a.position, ctx_b.position);
    assert_eq!(ctx_a.hits, ctx_b.hits);
}

#[test]
fn sequence_rejects_out_of_space_context() {
    let rules = Arc::new(ForestFireRules::with_wind(Wind::uniform(0.3).unwrap(), 2));
    let spaces = rules.spaces(grid_space(2, 2)).unwrap();
    let stages: Vec<Stage<u32, ForestFireContext>> = vec![
        Box::new(Move::new(Arc::clone(&rules), spaces.clone())),
        Box::new(Modify::new(rules, spaces)),
    ];
    let pipeline = Sequence::new("move-modify", stages).unwrap();
    let grid = Grid::filled([2usize, 2].as_slice(), 2).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let err = pipeline
        .apply(grid, &0, context(0, 0, 3), &mut rng)
        .unwrap_err();
    assert!(matches!(err, OperatorError::InvalidContext { .. }));
}

#[test]
fn freeze_counts_down_then_sweeps() {
    let coordinator =
        ForestFireCoordinator::new(grid_space(3, 3), ForestFireRules::with_wind(Wind::uniform(1.0).unwrap(), 2))
            .unwrap();
    let stay = coordinator.rules().actions.index_of(Direction::Stay);
    let mut grid = Grid::from_rows(vec![vec![0, 1, 1], vec![1, 2, 1], vec![1, 1, 1]]).unwrap();
    let mut ctx = context(0, 0, 2);
    ctx.params = CaParams {
        p_tree: 0.0,
        p_fire: 0.0,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    for expected_freeze in [1, 0] {
        (grid, ctx) = coordinator.apply(grid, &stay, ctx, &mut rng).unwrap();
        assert_eq!(ctx.freeze, expected_freeze);
        assert_eq!(grid.count(2), 1, "lattice must stay frozen");
    }

    (grid, ctx) = coordinator.apply(grid, &stay, ctx, &mut rng).unwrap();
    assert_eq!(ctx.freeze, 2);
    assert_eq!(grid.count(2), 7);
}

proptest! {
    #[test]
    fn coordinator_keeps_state_in_space(
        seed in any::<u64>(),
        actions in proptest::collection::vec(0u32..9, 1..40),
    ) {
        let space = grid_space(5, 4);
        let coordinator = ForestFireCoordinator::new(
            space.clone(),
            ForestFireRules::with_wind(Wind::uniform(0.4).unwrap(), 1),
        )
        .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut grid = space.sample(&mut rng);
        let mut ctx = context(2, 2, 1);
        let mut hits = 0;

        for action in actions {
            (grid, ctx) = coordinator.apply(grid, &action, ctx, &mut rng).unwrap();
            prop_assert!(coordinator.spaces().validate(&grid, &action, &ctx).is_ok());
            prop_assert!(ctx.hits >= hits);
            hits = ctx.hits;
        }
    }
}
