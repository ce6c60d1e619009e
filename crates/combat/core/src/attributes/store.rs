//! Attribute storage with deterministic three-pass recomputation.

use std::collections::{BTreeMap, HashMap};

use super::modifier::{Modifier, ModifierId};
use super::types::{AttributeType, ModifierType};

/// Base and current attribute values plus the ordered modifier list.
///
/// # Recomputation
///
/// ```text
/// current := base                                  (every key)
/// for Add      in list order: current[attr] += value
/// for Multiply in list order: current[attr] *= value
/// for Override in list order: current[attr]  = value
/// ```
///
/// Override therefore always wins over Add/Multiply for its attribute, and
/// among several Overrides the later list entry wins. A modifier targeting an
/// attribute missing from `base` starts from 0.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeStore {
    base: HashMap<AttributeType, f32>,
    current: HashMap<AttributeType, f32>,
    modifiers: Vec<(ModifierId, Modifier)>,
    next_modifier_id: u32,
}

impl AttributeStore {
    /// Creates a store whose base and current values equal `base`.
    pub fn new(base: impl IntoIterator<Item = (AttributeType, f32)>) -> Self {
        let mut store = Self::default();
        store.initialize(base);
        store
    }

    /// Replaces all values with `base` and drops every modifier.
    pub fn initialize(&mut self, base: impl IntoIterator<Item = (AttributeType, f32)>) {
        self.base = base.into_iter().collect();
        self.current = self.base.clone();
        self.modifiers.clear();
    }

    /// Current (recomputed) value, or 0 if the attribute is absent.
    pub fn current(&self, attribute: AttributeType) -> f32 {
        self.current.get(&attribute).copied().unwrap_or(0.0)
    }

    /// Base value, or 0 if the attribute is absent.
    pub fn base(&self, attribute: AttributeType) -> f32 {
        self.base.get(&attribute).copied().unwrap_or(0.0)
    }

    /// Returns true if a base value was ever set for `attribute`.
    pub fn has_attribute(&self, attribute: AttributeType) -> bool {
        self.base.contains_key(&attribute)
    }

    /// Overwrites a base value and recomputes.
    pub fn set_base(&mut self, attribute: AttributeType, value: f32) {
        self.base.insert(attribute, value);
        self.recalculate();
    }

    /// Writes a current value without recomputing.
    ///
    /// The written value survives only until the next recomputation, which
    /// any modifier change or expiry triggers.
    pub fn set_current_direct(&mut self, attribute: AttributeType, value: f32) {
        self.current.insert(attribute, value);
    }

    /// Appends a modifier and recomputes.
    pub fn add_modifier(&mut self, modifier: Modifier) -> ModifierId {
        let id = ModifierId(self.next_modifier_id);
        self.next_modifier_id += 1;
        self.modifiers.push((id, modifier));
        self.recalculate();
        id
    }

    /// Convenience overload building a [`ModifierType::Additive`] modifier.
    ///
    /// Recomputation has no pass for `Additive`, so the returned modifier is
    /// stored and ticks down but never changes a value.
    pub fn add_timed_value(
        &mut self,
        attribute: AttributeType,
        value: f32,
        duration: f32,
    ) -> ModifierId {
        self.add_modifier(Modifier::new(
            attribute,
            ModifierType::Additive,
            value,
            duration,
        ))
    }

    /// Removes the modifier with handle `id`. Returns false if it is gone.
    pub fn remove_modifier(&mut self, id: ModifierId) -> bool {
        let Some(index) = self.modifiers.iter().position(|(mid, _)| *mid == id) else {
            return false;
        };
        self.modifiers.remove(index);
        self.recalculate();
        true
    }

    /// Removes the first modifier on `attribute` whose value equals `value`.
    pub fn remove_modifier_by_value(&mut self, attribute: AttributeType, value: f32) -> bool {
        let Some(index) = self
            .modifiers
            .iter()
            .position(|(_, m)| m.attribute == attribute && m.value == value)
        else {
            return false;
        };
        self.modifiers.remove(index);
        self.recalculate();
        true
    }

    /// Drops every modifier and recomputes.
    pub fn clear_modifiers(&mut self) {
        self.modifiers.clear();
        self.recalculate();
    }

    /// Looks up a live modifier by handle.
    pub fn modifier(&self, id: ModifierId) -> Option<&Modifier> {
        self.modifiers
            .iter()
            .find(|(mid, _)| *mid == id)
            .map(|(_, m)| m)
    }

    /// Live modifiers in list order.
    pub fn modifiers(&self) -> impl Iterator<Item = (ModifierId, &Modifier)> {
        self.modifiers.iter().map(|(id, m)| (*id, m))
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }

    /// Counts down timed modifiers and prunes the expired ones.
    ///
    /// Recomputes only if at least one modifier was pruned. Returns the number
    /// of pruned modifiers.
    pub fn tick(&mut self, delta_time: f32) -> usize {
        let before = self.modifiers.len();

        self.modifiers.retain_mut(|(id, modifier)| {
            if modifier.is_permanent() {
                return true;
            }
            modifier.remaining -= delta_time;
            if modifier.remaining <= 0.0 {
                tracing::trace!(
                    "Modifier {:?} on {} expired ({:?} {})",
                    id,
                    modifier.attribute,
                    modifier.kind,
                    modifier.value
                );
                return false;
            }
            true
        });

        let pruned = before - self.modifiers.len();
        if pruned > 0 {
            self.recalculate();
        }
        pruned
    }

    /// Rebuilds every current value from base and the live modifiers.
    pub fn recalculate(&mut self) {
        // Step 1: Reset to base
        self.current = self.base.clone();

        // Step 2: Add pass
        for (_, m) in self.modifiers.iter().filter(|(_, m)| m.kind == ModifierType::Add) {
            *self.current.entry(m.attribute).or_insert(0.0) += m.value;
        }

        // Step 3: Multiply pass (compounds on the running value)
        for (_, m) in self
            .modifiers
            .iter()
            .filter(|(_, m)| m.kind == ModifierType::Multiply)
        {
            *self.current.entry(m.attribute).or_insert(0.0) *= m.value;
        }

        // Step 4: Override pass (last write wins)
        for (_, m) in self
            .modifiers
            .iter()
            .filter(|(_, m)| m.kind == ModifierType::Override)
        {
            self.current.insert(m.attribute, m.value);
        }
    }

    /// Copy of every current value, ordered by attribute.
    pub fn snapshot(&self) -> BTreeMap<AttributeType, f32> {
        self.current.iter().map(|(k, v)| (*k, *v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn fighter() -> AttributeStore {
        AttributeStore::new([
            (AttributeType::Health, 100.0),
            (AttributeType::MaxHealth, 100.0),
            (AttributeType::Attack, 10.0),
            (AttributeType::Defense, 4.0),
        ])
    }

    #[test]
    fn initialize_copies_base_into_current() {
        let store = fighter();
        for attribute in AttributeType::iter() {
            assert_eq!(store.current(attribute), store.base(attribute));
        }
    }

    #[test]
    fn missing_attribute_reads_zero() {
        let store = fighter();
        assert_eq!(store.current(AttributeType::Dodge), 0.0);
        assert_eq!(store.base(AttributeType::Dodge), 0.0);
        assert!(!store.has_attribute(AttributeType::Dodge));
    }

    #[test]
    fn add_modifier_adds_to_base() {
        let mut store = fighter();
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));
        assert_eq!(store.current(AttributeType::Attack), 15.0);
    }

    #[test]
    fn multiply_runs_after_add_regardless_of_insertion_order() {
        let mut store = fighter();
        store.add_modifier(Modifier::multiply(AttributeType::Attack, 2.0));
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));
        assert_eq!(store.current(AttributeType::Attack), 30.0);
    }

    #[test]
    fn multiplies_compound() {
        let mut store = fighter();
        store.add_modifier(Modifier::multiply(AttributeType::Attack, 2.0));
        store.add_modifier(Modifier::multiply(AttributeType::Attack, 1.5));
        assert_eq!(store.current(AttributeType::Attack), 30.0);
    }

    #[test]
    fn override_beats_add_and_multiply() {
        let mut store = fighter();
        store.add_modifier(Modifier::override_to(AttributeType::Attack, 42.0));
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));
        store.add_modifier(Modifier::multiply(AttributeType::Attack, 2.0));
        assert_eq!(store.current(AttributeType::Attack), 42.0);
    }

    #[test]
    fn later_override_wins() {
        let mut store = fighter();
        store.add_modifier(Modifier::override_to(AttributeType::Defense, 1.0));
        let second = store.add_modifier(Modifier::override_to(AttributeType::Defense, 9.0));
        assert_eq!(store.current(AttributeType::Defense), 9.0);

        store.remove_modifier(second);
        assert_eq!(store.current(AttributeType::Defense), 1.0);
    }

    #[test]
    fn modifier_on_absent_attribute_starts_from_zero() {
        let mut store = fighter();
        store.add_modifier(Modifier::add(AttributeType::Speed, 3.0));
        assert_eq!(store.current(AttributeType::Speed), 3.0);
        assert_eq!(store.base(AttributeType::Speed), 0.0);
    }

    #[test]
    fn set_base_recomputes_through_modifiers() {
        let mut store = fighter();
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));
        store.set_base(AttributeType::Attack, 20.0);
        assert_eq!(store.current(AttributeType::Attack), 25.0);
    }

    #[test]
    fn direct_write_survives_until_next_recomputation() {
        let mut store = fighter();
        store.set_current_direct(AttributeType::Health, 40.0);
        assert_eq!(store.current(AttributeType::Health), 40.0);
        assert_eq!(store.base(AttributeType::Health), 100.0);

        store.add_modifier(Modifier::add(AttributeType::Attack, 1.0));
        assert_eq!(store.current(AttributeType::Health), 100.0);
    }

    #[test]
    fn remove_by_value_removes_first_match_only() {
        let mut store = fighter();
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));

        assert!(store.remove_modifier_by_value(AttributeType::Attack, 5.0));
        assert_eq!(store.modifier_count(), 1);
        assert_eq!(store.current(AttributeType::Attack), 15.0);
        assert!(!store.remove_modifier_by_value(AttributeType::Defense, 5.0));
    }

    #[test]
    fn removing_unknown_modifier_is_a_no_op() {
        let mut store = fighter();
        store.set_current_direct(AttributeType::Health, 1.0);

        assert!(!store.remove_modifier(ModifierId(99)));
        // No recomputation happened, so the direct write is intact.
        assert_eq!(store.current(AttributeType::Health), 1.0);
    }

    #[test]
    fn timed_modifier_expires_on_third_tick() {
        let mut store = fighter();
        let id = store.add_modifier(Modifier::add(AttributeType::Attack, 5.0).with_duration(3.0));

        assert_eq!(store.tick(1.0), 0);
        assert_eq!(store.tick(1.0), 0);
        assert_eq!(store.current(AttributeType::Attack), 15.0);
        assert_eq!(store.tick(1.0), 1);

        assert!(store.modifier(id).is_none());
        assert_eq!(store.current(AttributeType::Attack), 10.0);
    }

    #[test]
    fn permanent_modifiers_never_tick_down() {
        let mut store = fighter();
        let id = store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));
        for _ in 0..100 {
            store.tick(1.0);
        }
        assert_eq!(store.modifier(id).map(|m| m.remaining), Some(0.0));
        assert_eq!(store.current(AttributeType::Attack), 15.0);
    }

    #[test]
    fn tick_without_expiry_keeps_direct_writes() {
        let mut store = fighter();
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0).with_duration(10.0));
        store.set_current_direct(AttributeType::Health, 55.0);

        store.tick(0.5);

        assert_eq!(store.current(AttributeType::Health), 55.0);
    }

    #[test]
    fn additive_kind_is_ignored_by_recomputation() {
        let mut store = fighter();
        let id = store.add_timed_value(AttributeType::Attack, 5.0, 2.0);

        assert_eq!(store.modifier(id).map(|m| m.kind), Some(ModifierType::Additive));
        assert_eq!(store.current(AttributeType::Attack), 10.0);
    }

    #[test]
    fn additive_modifier_expiry_still_recomputes() {
        let mut store = fighter();
        store.add_timed_value(AttributeType::Attack, 5.0, 2.0);
        store.set_current_direct(AttributeType::Health, 40.0);

        assert_eq!(store.tick(1.0), 0);
        assert_eq!(store.current(AttributeType::Health), 40.0);

        assert_eq!(store.tick(1.0), 1);
        assert_eq!(store.modifier_count(), 0);
        assert_eq!(store.current(AttributeType::Attack), 10.0);
        assert_eq!(store.current(AttributeType::Health), 100.0);
    }

    #[test]
    fn clear_modifiers_restores_base() {
        let mut store = fighter();
        store.add_modifier(Modifier::add(AttributeType::Attack, 5.0));
        store.add_modifier(Modifier::override_to(AttributeType::Defense, 0.0));

        store.clear_modifiers();

        assert_eq!(store.modifier_count(), 0);
        assert_eq!(store.current(AttributeType::Attack), 10.0);
        assert_eq!(store.current(AttributeType::Defense), 4.0);
    }
}
