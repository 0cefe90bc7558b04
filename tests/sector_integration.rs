//! Integration tests for the sector tier
//!
//! The headline test is the stability bias: a sector constructed on the
//! edge of political collapse must produce markedly more war and decline
//! history than a calm control sector given the same seeds.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starloom::tier::{simulate_sector_tier, LifecycleStage, Sector, SectorOverrides};

fn negative_events_over_seeds(political_stability: f64, seeds: std::ops::Range<u64>) -> usize {
    let mut total = 0;
    for seed in seeds {
        let overrides = SectorOverrides {
            political_stability: Some(political_stability),
            ..Default::default()
        };
        let mut sector = Sector::new("s", "Frontier", Some(overrides)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        simulate_sector_tier(&mut sector, 5, &mut rng);
        total += sector.events.iter().filter(|e| e.kind.is_negative()).count();
    }
    total
}

#[test]
fn test_low_political_stability_biases_toward_conflict() {
    let troubled = negative_events_over_seeds(0.01, 0..40);
    let calm = negative_events_over_seeds(0.7, 0..40);
    assert!(
        troubled > calm,
        "expected more conflict at stability 0.01 ({troubled}) than 0.7 ({calm})"
    );
}

#[test]
fn test_political_entities_only_transition_never_vanish() {
    let overrides = SectorOverrides {
        political_stability: Some(0.1),
        stability: Some(15.0),
        ..Default::default()
    };
    let mut sector = Sector::new("s", "Crumbling", Some(overrides)).unwrap();
    let starting = sector.political_entities.len();
    let mut rng = ChaCha8Rng::seed_from_u64(404);

    simulate_sector_tier(&mut sector, 80, &mut rng);

    // Entities fragment and die but are never removed from the list
    assert!(sector.political_entities.len() >= starting);
    for entity in &sector.political_entities {
        if entity.lifecycle.stage == LifecycleStage::Extinct {
            // Settled on the tick after the transition; a death on the
            // final tick is still awaiting removal
            assert!(entity.population_share == 0.0 || entity.lifecycle.pending_removal);
        }
    }
}

#[test]
fn test_sector_stats_stay_in_domain() {
    let mut sector = Sector::new("s", "Orion Spur", None).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for _ in 0..200 {
        simulate_sector_tier(&mut sector, 1, &mut rng);
        assert!((0.0..=1.0).contains(&sector.stats.political_stability));
        assert!((0.0..=1.0).contains(&sector.stats.economic_integration));
        assert!(sector.population.total >= 0.0);
        assert!((0.0..=100.0).contains(&sector.stability.overall));
    }
}

#[test]
fn test_fixed_spatial_fields_never_mutate() {
    let mut sector = Sector::new("s", "Orion Spur", None).unwrap();
    let spatial = sector.spatial.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    simulate_sector_tier(&mut sector, 150, &mut rng);
    assert_eq!(sector.spatial, spatial);
}
