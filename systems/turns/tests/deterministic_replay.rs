use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tank_attack_core::{Event, GameConfig, Position, TankId, TankSnapshot};
use tank_attack_system_turns::TurnController;
use tank_attack_world::{query, World};

const SEED: u64 = 0x7a4c_2024;
const TURNS: usize = 40;

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(SEED);
    let second = replay(SEED);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_eq!(
        first
            .events
            .iter()
            .filter(|event| matches!(event, Event::TurnChanged { .. }))
            .count(),
        TURNS
    );
}

#[test]
fn different_seeds_diverge() {
    let first = replay(SEED);
    let second = replay(SEED + 1);

    assert_ne!(first.fingerprint(), second.fingerprint());
}

fn replay(seed: u64) -> ReplayOutcome {
    let config = GameConfig::default();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut world = World::generate(&config, &mut rng).expect("default config generates");
    let controller = TurnController::from_config(&config);
    let mut events = Vec::new();

    for _ in 0..TURNS {
        let active = query::active_side(&world);
        let candidates: Vec<TankId> = query::tank_view(&world)
            .iter()
            .filter(|tank| tank.side == active)
            .map(|tank| tank.id)
            .collect();
        let tank = candidates[rng.gen_range(0..candidates.len())];
        let target = Position::new(
            rng.gen_range(0..config.rows),
            rng.gen_range(0..config.columns),
        );

        let _ = controller
            .request_move(&mut world, tank, target, &mut rng, &mut events)
            .expect("active tank with in-bounds target");
    }

    ReplayOutcome {
        tanks: query::tank_view(&world).into_vec(),
        events,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    tanks: Vec<TankSnapshot>,
    events: Vec<Event>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}
