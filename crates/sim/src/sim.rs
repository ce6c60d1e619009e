//! Headless encounter driver.
//!
//! Each frame: rebuild the proximity table from the arena, collect scripted
//! trigger presses, tick the facade, move engaged entities, then turn every
//! `AttackStarted` event into a resolved and applied hit.

use std::collections::BTreeMap;

use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;

use combat_core::{
    AttributeType, CombatConfig, CombatEnv, CombatEvent, CombatFacade, CombatOutcome,
    CombatStateType, DamageType, EntityData, EntityId, EntityStateType, EntityType,
};

use crate::arena::Arena;
use crate::regen::RegenSubsystem;
use crate::script::TriggerScript;

/// Flat weapon damage added to every strike before attack scaling.
const WEAPON_DAMAGE: f32 = 10.0;

/// Health restored to each player per second of combat.
const REGEN_PER_SECOND: f32 = 1.0;

/// Enemies line up this far apart, starting one spacing from the players.
const ENEMY_SPACING: f32 = 3.0;

pub struct Simulation {
    config: CombatConfig,
    facade: CombatFacade,
    arena: Arena,
    script: TriggerScript,
    rng: StdRng,
}

#[derive(Debug)]
pub struct EntitySummary {
    pub id: EntityId,
    pub name: String,
    pub entity_type: EntityType,
    pub state: EntityStateType,
    pub health: f32,
    pub position: Option<f32>,
}

#[derive(Debug)]
pub struct Report {
    pub frames: u32,
    pub elapsed: f32,
    pub outcome: Option<CombatOutcome>,
    pub final_phase: CombatStateType,
    pub entities: Vec<EntitySummary>,
    pub event_counts: BTreeMap<&'static str, usize>,
}

impl Simulation {
    /// Spawns the roster: players at the origin, enemies spread out ahead.
    pub fn new(config: CombatConfig, roster: &[EntityData], seed: u64) -> Result<Self> {
        let mut facade = CombatFacade::try_new(config)?;
        facade.attach_subsystem(RegenSubsystem::new(REGEN_PER_SECOND));

        let mut arena = Arena::new();
        let mut script = TriggerScript::new();
        let mut enemy_slot = 0u16;

        for data in roster {
            let id = facade.spawn(data)?;
            match data.entity_type {
                EntityType::Player => {
                    arena.place(id, 0.0);
                    let attack_speed = data
                        .base_attributes
                        .get(&AttributeType::AttackSpeed)
                        .copied()
                        .unwrap_or(1.0);
                    script.add_player(id, attack_speed);
                }
                EntityType::Enemy => {
                    enemy_slot += 1;
                    arena.place(id, ENEMY_SPACING * f32::from(enemy_slot) + ENEMY_SPACING);
                }
            }
        }

        tracing::info!("Spawned {} entities (seed {})", roster.len(), seed);
        Ok(Self {
            config,
            facade,
            arena,
            script,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Runs until the encounter resolves or `max_frames` is reached.
    pub fn run(mut self, max_frames: u32, delta_time: f32) -> Report {
        let mut event_counts = BTreeMap::new();
        let mut outcome = None;
        let mut frames = 0;

        self.facade.start_combat();

        while frames < max_frames {
            frames += 1;

            let distances = self.arena.distances(self.facade.entities());
            let pressed = self.script.frame(delta_time);
            let env = CombatEnv::with_all(&distances, &pressed);

            self.facade.tick(delta_time, &env);
            self.arena.advance(self.facade.entities(), delta_time);

            for event in self.facade.drain_events() {
                *event_counts.entry(event.kind()).or_insert(0) += 1;
                self.react(&event);
            }

            if outcome.is_none() && self.facade.phase() == CombatStateType::Combat {
                outcome = self.facade.combat_outcome();
                if let Some(result) = outcome {
                    tracing::info!("Encounter decided at frame {}: {}", frames, result);
                    self.facade.end_combat();
                }
            }

            if outcome.is_some()
                && (self.facade.phase() == CombatStateType::Idle
                    || !self.config.drive_ending_phase)
            {
                break;
            }
        }

        for event in self.facade.drain_events() {
            *event_counts.entry(event.kind()).or_insert(0) += 1;
        }

        Report {
            frames,
            elapsed: frames as f32 * delta_time,
            outcome,
            final_phase: self.facade.phase(),
            entities: self.summaries(),
            event_counts,
        }
    }

    fn react(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::AttackStarted { entity } => self.strike(*entity),
            CombatEvent::Died { entity, killer } => match killer {
                Some(killer) => tracing::info!("{} was slain by {}", entity, killer),
                None => tracing::info!("{} died", entity),
            },
            _ => {}
        }
    }

    /// Resolves a hit from `attacker` on its nearest hostile, if in reach.
    fn strike(&mut self, attacker: EntityId) {
        let entities = self.facade.entities();
        let Some(reach) = entities.entity(attacker).map(Arena::reach) else {
            return;
        };
        let Some((target, gap)) = self.arena.nearest_hostile(entities, attacker) else {
            return;
        };
        if gap > reach {
            tracing::debug!("{} swings at {} but is {:.1} short", attacker, target, gap - reach);
            return;
        }

        let Some(record) = self.facade.resolve_damage(
            attacker,
            target,
            WEAPON_DAMAGE,
            1.0,
            DamageType::Physical,
            &mut self.rng,
        ) else {
            return;
        };

        match self.facade.deal_typed_damage(
            target,
            record.final_value,
            Some(attacker),
            record.damage_type,
            record.is_critical,
        ) {
            Ok(dealt) => tracing::debug!(
                "{} hits {} for {:.1}{}",
                attacker,
                target,
                dealt,
                if record.is_critical { " (critical)" } else { "" }
            ),
            Err(e) => tracing::warn!("Strike on {} failed: {}", target, e),
        }
    }

    fn summaries(&self) -> Vec<EntitySummary> {
        self.facade
            .entities()
            .entities()
            .map(|entity| EntitySummary {
                id: entity.id(),
                name: entity.name().to_string(),
                entity_type: entity.entity_type(),
                state: entity.current_state(),
                health: entity.attributes().current(AttributeType::Health),
                position: self.arena.position(entity.id()),
            })
            .collect()
    }
}

impl Report {
    pub fn print(&self) {
        println!("════════════════════════════════════════════════════════");
        println!("  Combat simulation report");
        println!("════════════════════════════════════════════════════════");
        println!("Frames:      {} ({:.2}s)", self.frames, self.elapsed);
        println!(
            "Outcome:     {}",
            self.outcome
                .map_or_else(|| "undecided".to_string(), |outcome| outcome.to_string())
        );
        println!("Final phase: {}", self.final_phase);

        println!("\nEntities:");
        for entity in &self.entities {
            println!(
                "  {:>4} {:<16} {:<7} {:<10} hp={:>7.1} x={}",
                entity.id.to_string(),
                entity.name,
                entity.entity_type.as_ref(),
                entity.state.as_ref(),
                entity.health,
                entity
                    .position
                    .map_or_else(|| "-".to_string(), |x| format!("{x:.1}"))
            );
        }

        println!("\nEvents:");
        for (kind, count) in &self.event_counts {
            println!("  {kind:<16} {count}");
        }
    }
}
