//! Orchestrating entry point.
//!
//! [`CombatFacade`] is the explicit simulation context a host constructs once
//! and drives every frame. It owns the [`EntityManager`], the
//! [`CombatPhaseController`], a [`FrameClock`], the attached
//! [`CombatSubsystem`]s, and the event log.
//!
//! Frame ticks are gated on the combat phase: nothing moves unless the phase
//! is Preparing or Combat.

mod clock;
mod subsystem;

pub use clock::FrameClock;
pub use subsystem::CombatSubsystem;

use std::time::Instant;

use crate::attributes::{AttributeType, Modifier, ModifierId};
use crate::config::CombatConfig;
use crate::damage::{DamageParticipant, DamageRecord, DamageResolver, DamageType, RollSource};
use crate::entity::{Entity, EntityData, EntityId, EntityType};
use crate::env::CombatEnv;
use crate::error::{CommandError, ConfigError};
use crate::events::CombatEvent;
use crate::manager::EntityManager;
use crate::phase::{CombatPhaseController, CombatStateType};

/// How an encounter ended, judged from living entity counts.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatOutcome {
    /// Every enemy is dead and at least one player lives.
    Victory,
    /// Every player is dead.
    Defeat,
}

pub struct CombatFacade {
    config: CombatConfig,
    entities: EntityManager,
    phase: CombatPhaseController,
    clock: FrameClock,
    subsystems: Vec<Box<dyn CombatSubsystem>>,
    events: Vec<CombatEvent>,
}

impl CombatFacade {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            config,
            entities: EntityManager::new(config),
            phase: CombatPhaseController::new(config.phase),
            clock: FrameClock::new(config.clock.max_delta),
            subsystems: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Like [`new`](Self::new), but rejects tuning the simulation cannot run
    /// with.
    pub fn try_new(config: CombatConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Frame driving
    // ------------------------------------------------------------------

    /// Measures the frame delta from `now` and runs [`tick`](Self::tick).
    pub fn on_update(&mut self, now: Instant, env: &CombatEnv<'_>) -> bool {
        let delta_time = self.clock.tick(now);
        self.tick(delta_time, env)
    }

    /// Advances the simulation by `delta_time` seconds.
    ///
    /// While Preparing or Combat: updates entities, then the phase controller,
    /// then subsystems in priority order, and returns `true`. In any other
    /// phase nothing is forwarded and `false` is returned, except that with
    /// `drive_ending_phase` set the phase controller alone keeps running
    /// through Ending.
    pub fn tick(&mut self, delta_time: f32, env: &CombatEnv<'_>) -> bool {
        let before = self.phase.current();

        if !before.is_active() {
            if self.config.drive_ending_phase && before == CombatStateType::Ending {
                self.phase.update(delta_time);
                self.record_phase_change(before);
            }
            return false;
        }

        self.entities.update(delta_time, env);
        self.collect_entity_events();

        self.phase.update(delta_time);
        self.record_phase_change(before);

        for subsystem in &mut self.subsystems {
            subsystem.update(delta_time, &mut self.entities);
        }
        self.collect_entity_events();

        true
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    /// Validates `data` and creates the entity.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidEntityData`] if validation fails.
    pub fn spawn(&mut self, data: &EntityData) -> Result<EntityId, CommandError> {
        data.validate()?;
        let id = self.entities.create_entity(data).id();
        self.collect_entity_events();
        Ok(id)
    }

    /// Destroys the entity. Returns `false` if it did not exist.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let removed = self.entities.remove_entity(id);
        self.collect_entity_events();
        removed
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.entity(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.entity_mut(id)
    }

    pub fn entities(&self) -> &EntityManager {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut EntityManager {
        &mut self.entities
    }

    pub fn all_entities(&self) -> Vec<EntityId> {
        self.entities.all_entities()
    }

    fn require(&mut self, id: EntityId) -> Result<&mut Entity, CommandError> {
        self.entities
            .entity_mut(id)
            .ok_or(CommandError::EntityNotFound(id))
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn attribute(&self, id: EntityId, attribute: AttributeType) -> Result<f32, CommandError> {
        self.entities
            .entity(id)
            .map(|entity| entity.attributes().current(attribute))
            .ok_or(CommandError::EntityNotFound(id))
    }

    pub fn set_base(
        &mut self,
        id: EntityId,
        attribute: AttributeType,
        value: f32,
    ) -> Result<(), CommandError> {
        self.require(id)?.attributes_mut().set_base(attribute, value);
        Ok(())
    }

    pub fn add_modifier(
        &mut self,
        id: EntityId,
        modifier: Modifier,
    ) -> Result<ModifierId, CommandError> {
        Ok(self.require(id)?.attributes_mut().add_modifier(modifier))
    }

    /// Returns `Ok(false)` if the entity exists but the modifier does not.
    pub fn remove_modifier(
        &mut self,
        id: EntityId,
        modifier: ModifierId,
    ) -> Result<bool, CommandError> {
        Ok(self.require(id)?.attributes_mut().remove_modifier(modifier))
    }

    // ------------------------------------------------------------------
    // Damage and status
    // ------------------------------------------------------------------

    /// Runs the damage resolver between two entities and logs the record.
    ///
    /// The result is not applied to the target; pass it to
    /// [`deal_typed_damage`](Self::deal_typed_damage) for that. Returns `None`
    /// when either entity is missing.
    pub fn resolve_damage(
        &mut self,
        attacker: EntityId,
        target: EntityId,
        base_damage: f32,
        attack_multiplier: f32,
        damage_type: DamageType,
        rolls: &mut impl RollSource,
    ) -> Option<DamageRecord> {
        let record = DamageResolver::resolve_record(
            self.entities.entity(attacker).map(DamageParticipant::from),
            self.entities.entity(target).map(DamageParticipant::from),
            base_damage,
            attack_multiplier,
            damage_type,
            rolls,
        )?;
        self.events.push(CombatEvent::DamageResolved(record));
        Some(record)
    }

    /// Applies untyped damage through the target's own intake formula.
    pub fn deal_damage(
        &mut self,
        target: EntityId,
        damage: f32,
        attacker: Option<EntityId>,
    ) -> Result<f32, CommandError> {
        let dealt = self.require(target)?.take_damage(damage, attacker);
        self.collect_entity_events();
        Ok(dealt)
    }

    pub fn deal_typed_damage(
        &mut self,
        target: EntityId,
        damage: f32,
        attacker: Option<EntityId>,
        damage_type: DamageType,
        is_critical: bool,
    ) -> Result<f32, CommandError> {
        let dealt =
            self.require(target)?
                .take_damage_typed(damage, attacker, damage_type, is_critical);
        self.collect_entity_events();
        Ok(dealt)
    }

    pub fn heal(&mut self, id: EntityId, amount: f32) -> Result<f32, CommandError> {
        let healed = self.require(id)?.heal(amount);
        self.collect_entity_events();
        Ok(healed)
    }

    pub fn stun(&mut self, id: EntityId, duration: f32) -> Result<bool, CommandError> {
        let stunned = self.require(id)?.stun(duration);
        self.collect_entity_events();
        Ok(stunned)
    }

    pub fn begin_cast(&mut self, id: EntityId, duration: f32) -> Result<bool, CommandError> {
        let started = self.require(id)?.begin_cast(duration);
        self.collect_entity_events();
        Ok(started)
    }

    // ------------------------------------------------------------------
    // Phase
    // ------------------------------------------------------------------

    pub fn phase(&self) -> CombatStateType {
        self.phase.current()
    }

    pub fn phase_elapsed(&self) -> f32 {
        self.phase.elapsed()
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    /// Idle or Ending → Preparing.
    pub fn start_combat(&mut self) -> bool {
        match self.phase.current() {
            CombatStateType::Idle | CombatStateType::Ending => {
                self.set_phase(CombatStateType::Preparing)
            }
            CombatStateType::Preparing | CombatStateType::Combat => false,
        }
    }

    /// Skips Preparing and goes straight to Combat.
    pub fn force_combat(&mut self) -> bool {
        self.set_phase(CombatStateType::Combat)
    }

    /// Preparing or Combat → Ending.
    pub fn end_combat(&mut self) -> bool {
        match self.phase.current() {
            CombatStateType::Preparing | CombatStateType::Combat => {
                self.set_phase(CombatStateType::Ending)
            }
            CombatStateType::Idle | CombatStateType::Ending => false,
        }
    }

    /// Switches to any phase, bypassing the start/end preconditions.
    pub fn force_phase(&mut self, to: CombatStateType) -> bool {
        self.set_phase(to)
    }

    /// Destroys every entity and returns to Idle. Attached subsystems and
    /// phase listeners stay registered; entity ids keep counting up.
    pub fn reset(&mut self) {
        self.entities.clear();
        self.collect_entity_events();
        self.set_phase(CombatStateType::Idle);
        self.clock.reset();
        tracing::info!("Combat reset");
    }

    /// Registers a phase listener called with `(from, to)`.
    pub fn on_phase_change(
        &mut self,
        listener: impl FnMut(CombatStateType, CombatStateType) + 'static,
    ) {
        self.phase.add_listener(listener);
    }

    /// Defeat once every player is dead; Victory once every enemy is dead.
    ///
    /// `None` while both sides still stand, or if a side was never spawned.
    pub fn combat_outcome(&self) -> Option<CombatOutcome> {
        let side_wiped = |entity_type| {
            !self.entities.ids_of_type(entity_type).is_empty()
                && self.entities.living_count(entity_type) == 0
        };

        if side_wiped(EntityType::Player) {
            Some(CombatOutcome::Defeat)
        } else if side_wiped(EntityType::Enemy) {
            Some(CombatOutcome::Victory)
        } else {
            None
        }
    }

    // ------------------------------------------------------------------
    // Subsystems and events
    // ------------------------------------------------------------------

    pub fn attach_subsystem(&mut self, subsystem: impl CombatSubsystem + 'static) {
        tracing::debug!(
            "Attached subsystem {} (priority {})",
            subsystem.name(),
            subsystem.priority()
        );
        self.subsystems.push(Box::new(subsystem));
        self.subsystems.sort_by_key(|subsystem| subsystem.priority());
    }

    /// Detaches every subsystem named `name`. Returns `true` if any was removed.
    pub fn detach_subsystem(&mut self, name: &str) -> bool {
        let before = self.subsystems.len();
        self.subsystems.retain(|subsystem| subsystem.name() != name);
        self.subsystems.len() != before
    }

    /// Names of attached subsystems in execution order.
    pub fn subsystem_names(&self) -> Vec<&'static str> {
        self.subsystems.iter().map(|subsystem| subsystem.name()).collect()
    }

    /// Takes every event recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.collect_entity_events();
        std::mem::take(&mut self.events)
    }

    fn collect_entity_events(&mut self) {
        self.events.extend(self.entities.drain_events());
    }

    fn set_phase(&mut self, to: CombatStateType) -> bool {
        let before = self.phase.current();
        let changed = self.phase.change_state(to);
        if changed {
            self.record_phase_change(before);
        }
        changed
    }

    fn record_phase_change(&mut self, before: CombatStateType) {
        let after = self.phase.current();
        if after == before {
            return;
        }
        self.events.push(CombatEvent::PhaseChanged {
            from: before,
            to: after,
        });
        for subsystem in &mut self.subsystems {
            subsystem.on_phase_changed(before, after);
        }
    }
}

impl Default for CombatFacade {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl core::fmt::Debug for CombatFacade {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatFacade")
            .field("phase", &self.phase)
            .field("entities", &self.entities.len())
            .field("subsystems", &self.subsystem_names())
            .field("pending_events", &self.events.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::FixedRoll;
    use crate::error::{CombatError, EntityDataError, ErrorSeverity};
    use std::cell::RefCell;
    use std::rc::Rc;

    type RunLog = Rc<RefCell<Vec<&'static str>>>;

    struct Recorder {
        name: &'static str,
        priority: i32,
        log: RunLog,
    }

    impl CombatSubsystem for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn update(&mut self, _delta_time: f32, _entities: &mut EntityManager) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn recorder(name: &'static str, priority: i32, log: &RunLog) -> Recorder {
        Recorder {
            name,
            priority,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn tick_is_gated_on_active_phase() {
        let mut facade = CombatFacade::default();
        let env = CombatEnv::empty();

        assert!(!facade.tick(0.1, &env));
        facade.start_combat();
        assert!(facade.tick(0.1, &env));
        facade.end_combat();
        assert!(!facade.tick(0.1, &env));
    }

    #[test]
    fn try_new_rejects_unusable_shared_ai_tuning() {
        let mut config = CombatConfig::default();
        config.enemy_ai.think_interval = 0.0;
        config.enemy_ai.detection_range = 20.0;
        config.enemy_ai.disengage_range = 5.0;

        let err = CombatFacade::try_new(config)
            .map(|_| ())
            .expect_err("enemies without an override would use this tuning");
        assert_eq!(
            err,
            ConfigError::InvalidEnemyAi(EntityDataError::InvalidThinkInterval(0.0))
        );

        assert!(CombatFacade::try_new(CombatConfig::default()).is_ok());
    }

    #[test]
    fn spawn_rejects_invalid_data() {
        let mut facade = CombatFacade::default();
        let err = facade
            .spawn(&EntityData::enemy(""))
            .expect_err("empty name must be rejected");

        assert_eq!(
            err,
            CommandError::InvalidEntityData(EntityDataError::EmptyName)
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert!(facade.entities().is_empty());
    }

    #[test]
    fn commands_on_missing_entity_report_not_found() {
        let mut facade = CombatFacade::default();
        let ghost = EntityId(99);

        assert_eq!(
            facade.deal_damage(ghost, 10.0, None),
            Err(CommandError::EntityNotFound(ghost))
        );
        assert_eq!(
            facade.attribute(ghost, AttributeType::Health),
            Err(CommandError::EntityNotFound(ghost))
        );
        assert!(
            CommandError::EntityNotFound(ghost)
                .severity()
                .is_recoverable()
        );
    }

    #[test]
    fn start_and_end_respect_preconditions() {
        let mut facade = CombatFacade::default();

        assert!(!facade.end_combat());
        assert!(facade.start_combat());
        assert!(!facade.start_combat());
        assert!(facade.end_combat());
        assert!(facade.start_combat());
        assert_eq!(facade.phase(), CombatStateType::Preparing);
    }

    #[test]
    fn subsystems_run_in_priority_order_only_while_active() {
        let mut facade = CombatFacade::default();
        let log = RunLog::default();
        facade.attach_subsystem(recorder("status", 10, &log));
        facade.attach_subsystem(recorder("skills", -5, &log));
        facade.attach_subsystem(recorder("projectiles", 0, &log));
        let env = CombatEnv::empty();

        facade.tick(0.1, &env);
        assert!(log.borrow().is_empty());

        facade.force_combat();
        facade.tick(0.1, &env);
        assert_eq!(*log.borrow(), vec!["skills", "projectiles", "status"]);

        assert!(facade.detach_subsystem("projectiles"));
        assert!(!facade.detach_subsystem("projectiles"));
        assert_eq!(facade.subsystem_names(), vec!["skills", "status"]);
    }

    #[test]
    fn resolve_damage_logs_record_without_applying_it() {
        let mut facade = CombatFacade::default();
        let hero = facade
            .spawn(&EntityData::player("Hero").with_attribute(AttributeType::Attack, 10.0))
            .expect("valid");
        let dummy = facade
            .spawn(
                &EntityData::enemy("Dummy")
                    .with_attribute(AttributeType::Health, 50.0)
                    .with_attribute(AttributeType::Defense, 100.0),
            )
            .expect("valid");
        facade.drain_events();

        let record = facade
            .resolve_damage(hero, dummy, 0.0, 1.0, DamageType::Physical, &mut FixedRoll::NEVER_CRIT)
            .expect("both exist");

        assert!((record.final_value - 5.0).abs() < 1e-4);
        assert_eq!(facade.attribute(dummy, AttributeType::Health), Ok(50.0));
        assert_eq!(
            facade.drain_events(),
            vec![CombatEvent::DamageResolved(record)]
        );
        assert!(
            facade
                .resolve_damage(hero, EntityId(77), 0.0, 1.0, DamageType::Physical, &mut FixedRoll::NEVER_CRIT)
                .is_none()
        );
    }

    #[test]
    fn outcome_follows_living_counts() {
        let mut facade = CombatFacade::default();
        assert_eq!(facade.combat_outcome(), None);

        let hero = facade.spawn(&EntityData::player("Hero")).expect("valid");
        let slime = facade.spawn(&EntityData::enemy("Slime")).expect("valid");
        assert_eq!(facade.combat_outcome(), None);

        facade.deal_damage(slime, 1.0, Some(hero)).expect("exists");
        assert_eq!(facade.combat_outcome(), Some(CombatOutcome::Victory));

        facade.deal_damage(hero, 1.0, None).expect("exists");
        assert_eq!(facade.combat_outcome(), Some(CombatOutcome::Defeat));
    }

    #[test]
    fn reset_clears_entities_and_returns_to_idle() {
        let mut facade = CombatFacade::default();
        facade.spawn(&EntityData::player("Hero")).expect("valid");
        facade.force_combat();

        facade.reset();

        assert!(facade.entities().is_empty());
        assert_eq!(facade.phase(), CombatStateType::Idle);
        let id = facade.spawn(&EntityData::player("Again")).expect("valid");
        assert_eq!(id, EntityId(2));
    }
}
