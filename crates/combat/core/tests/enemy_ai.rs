use combat_core::{
    AttributeType, CombatEnv, CombatEvent, CombatFacade, DistanceTable, EnemyAiConfig, EntityData,
    EntityId, EntityStateType,
};

/// Tuning with binary-exact timings so frame counts are predictable.
fn tuning() -> EnemyAiConfig {
    EnemyAiConfig {
        think_interval: 0.25,
        detection_range: 8.0,
        attack_range: 2.0,
        disengage_range: 12.0,
        attack_cooldown: 1.0,
        attack_duration: 0.5,
    }
}

const DT: f32 = 0.25;

fn arena() -> (CombatFacade, EntityId) {
    let mut facade = CombatFacade::default();
    let goblin = facade
        .spawn(
            &EntityData::enemy("Goblin")
                .with_attribute(AttributeType::Health, 40.0)
                .with_ai(tuning()),
        )
        .expect("valid goblin");
    facade.force_combat();
    facade.drain_events();
    (facade, goblin)
}

fn step(facade: &mut CombatFacade, goblin: EntityId, distance: f32) -> EntityStateType {
    let mut distances = DistanceTable::new();
    distances.set(goblin, distance);
    let env = CombatEnv::empty().with_proximity(&distances);
    assert!(facade.tick(DT, &env));
    facade
        .entity(goblin)
        .map(|entity| entity.current_state())
        .unwrap_or_default()
}

#[test]
fn enemy_engages_attacks_and_respects_cooldown() {
    let (mut facade, goblin) = arena();

    // ================================================================
    // Out of detection range: nothing happens
    // ================================================================
    assert_eq!(step(&mut facade, goblin, 20.0), EntityStateType::Idle);

    // ================================================================
    // Detection, but too far to strike
    // ================================================================
    assert_eq!(step(&mut facade, goblin, 6.0), EntityStateType::Combat);
    assert_eq!(step(&mut facade, goblin, 6.0), EntityStateType::Combat);

    // ================================================================
    // Attack window
    // ================================================================
    assert_eq!(step(&mut facade, goblin, 1.5), EntityStateType::Attacking);
    assert_eq!(step(&mut facade, goblin, 1.5), EntityStateType::Attacking);
    assert_eq!(step(&mut facade, goblin, 1.5), EntityStateType::Combat);

    // ================================================================
    // Cooldown blocks the next attack for a full second
    // ================================================================
    for _ in 0..3 {
        assert_eq!(step(&mut facade, goblin, 1.5), EntityStateType::Combat);
    }
    assert_eq!(step(&mut facade, goblin, 1.5), EntityStateType::Attacking);

    let events = facade.drain_events();
    let started = events
        .iter()
        .filter(|event| matches!(event, CombatEvent::AttackStarted { .. }))
        .count();
    let finished = events
        .iter()
        .filter(|event| matches!(event, CombatEvent::AttackFinished { .. }))
        .count();
    assert_eq!((started, finished), (2, 1));
}

#[test]
fn enemy_disengages_beyond_disengage_range() {
    let (mut facade, goblin) = arena();

    assert_eq!(step(&mut facade, goblin, 5.0), EntityStateType::Combat);
    // between detection and disengage: stays engaged
    assert_eq!(step(&mut facade, goblin, 10.0), EntityStateType::Combat);
    assert_eq!(step(&mut facade, goblin, 12.5), EntityStateType::Idle);
}

#[test]
fn enemy_only_decides_on_think_ticks() {
    let mut facade = CombatFacade::default();
    let slow = EnemyAiConfig {
        think_interval: 1.0,
        ..tuning()
    };
    let goblin = facade
        .spawn(&EntityData::enemy("Sluggish Goblin").with_ai(slow))
        .expect("valid goblin");
    facade.force_combat();

    for _ in 0..3 {
        assert_eq!(step(&mut facade, goblin, 1.0), EntityStateType::Idle);
    }
    assert_eq!(step(&mut facade, goblin, 1.0), EntityStateType::Combat);
}

#[test]
fn enemy_without_proximity_oracle_stays_idle() {
    let (mut facade, goblin) = arena();
    let env = CombatEnv::empty();

    for _ in 0..20 {
        facade.tick(DT, &env);
    }

    assert_eq!(
        facade.entity(goblin).map(|entity| entity.current_state()),
        Some(EntityStateType::Idle)
    );
}

#[test]
fn dead_enemy_stops_thinking() {
    let (mut facade, goblin) = arena();
    facade.deal_damage(goblin, 100.0, None).expect("goblin exists");

    for _ in 0..8 {
        assert_eq!(step(&mut facade, goblin, 1.0), EntityStateType::Dead);
    }
}
