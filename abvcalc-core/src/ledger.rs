//! The ingredient ledger: the list of ingredients in the drink being mixed.
//!
//! Every mutation publishes a [`LedgerEvent`] to subscribers. Totals are not
//! cached; subscribers call [`Ledger::aggregate`] when they need them.

use tokio::sync::broadcast;

use crate::coerce::{clamp_abv, clamp_volume, parse_or_zero};
use crate::error::CalcError;
use crate::models::{EntryField, IngredientEntry, Totals};
use crate::units::{convert, VolumeUnit};

/// Events buffered per subscriber before older ones are dropped.
pub const EVENT_CAPACITY: usize = 64;

/// Something that knows the ABV of ingredients by name.
pub trait AbvLookup {
    /// Returns the ABV for `name`, or `None` if the name is unknown.
    fn lookup(&self, name: &str) -> Option<f64>;
}

/// A change made to a [`Ledger`].
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    EntryAdded { index: usize },
    EntryRemoved { index: usize },
    EntryUpdated { index: usize, field: EntryField },
    /// The entry's name matched a known ingredient and its ABV was replaced.
    AbvFilled { index: usize, abv: f64 },
    UnitChanged { from: VolumeUnit, to: VolumeUnit },
}

/// Ordered list of ingredients sharing one display unit.
#[derive(Debug)]
pub struct Ledger {
    entries: Vec<IngredientEntry>,
    unit: VolumeUnit,
    events: broadcast::Sender<LedgerEvent>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new(unit: VolumeUnit) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: Vec::new(),
            unit,
            events,
        }
    }

    pub fn entries(&self) -> &[IngredientEntry] {
        &self.entries
    }

    pub fn unit(&self) -> VolumeUnit {
        self.unit
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a receiver for every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    /// Appends a blank entry holding the default pour. Returns its index.
    pub fn add_entry(&mut self) -> usize {
        self.entries.push(IngredientEntry::blank(self.unit));
        let index = self.entries.len() - 1;
        tracing::debug!("Added entry {}", index);
        self.publish(LedgerEvent::EntryAdded { index });
        index
    }

    /// Removes and returns the entry at `index`.
    pub fn remove_entry(&mut self, index: usize) -> Result<IngredientEntry, CalcError> {
        if index >= self.entries.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.entries.remove(index);
        tracing::debug!("Removed entry {} ({})", index, removed.name);
        self.publish(LedgerEvent::EntryRemoved { index });
        Ok(removed)
    }

    /// Sets one field of the entry at `index` from raw user input.
    ///
    /// Setting the name looks it up in `known` and, on a match, replaces the
    /// entry's ABV. Numeric fields take the leading number of `raw` or 0,
    /// then clamp to their valid range.
    pub fn update_field(
        &mut self,
        index: usize,
        field: EntryField,
        raw: &str,
        known: &impl AbvLookup,
    ) -> Result<(), CalcError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(CalcError::IndexOutOfRange { index, len })?;

        let mut filled = None;
        match field {
            EntryField::Name => {
                entry.name = raw.to_string();
                if let Some(abv) = known.lookup(raw) {
                    entry.abv = abv;
                    filled = Some(abv);
                }
            }
            EntryField::Volume => entry.volume = clamp_volume(parse_or_zero(raw)),
            EntryField::Abv => entry.abv = clamp_abv(parse_or_zero(raw)),
        }

        tracing::debug!("Updated {} of entry {}", field, index);
        self.publish(LedgerEvent::EntryUpdated { index, field });
        if let Some(abv) = filled {
            tracing::debug!("Filled ABV {} for entry {} from known ingredients", abv, index);
            self.publish(LedgerEvent::AbvFilled { index, abv });
        }
        Ok(())
    }

    /// Switches the display unit, converting every volume.
    ///
    /// Does nothing when `unit` is already active. Converted volumes are
    /// clamped like typed ones.
    pub fn set_unit(&mut self, unit: VolumeUnit) {
        if unit == self.unit {
            return;
        }
        let from = self.unit;
        for entry in &mut self.entries {
            entry.volume = clamp_volume(convert(entry.volume, from, unit));
        }
        self.unit = unit;
        tracing::debug!("Unit changed from {} to {}", from, unit);
        self.publish(LedgerEvent::UnitChanged { from, to: unit });
    }

    /// Switches between ml and oz.
    pub fn toggle_unit(&mut self) {
        self.set_unit(self.unit.toggled());
    }

    /// Totals over the current entries, in the current unit.
    pub fn aggregate(&self) -> Totals {
        Totals::from_entries(&self.entries)
    }

    fn out_of_range(&self, index: usize) -> CalcError {
        CalcError::IndexOutOfRange {
            index,
            len: self.entries.len(),
        }
    }

    fn publish(&self, event: LedgerEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(VolumeUnit::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::MAX_VOLUME;
    use std::collections::HashMap;
    use tokio::sync::broadcast::error::TryRecvError;

    struct Known(HashMap<String, f64>);

    impl Known {
        fn with(items: &[(&str, f64)]) -> Self {
            Self(
                items
                    .iter()
                    .map(|(n, a)| (n.to_lowercase(), *a))
                    .collect(),
            )
        }
    }

    impl AbvLookup for Known {
        fn lookup(&self, name: &str) -> Option<f64> {
            self.0.get(&name.to_lowercase()).copied()
        }
    }

    fn none() -> Known {
        Known::with(&[])
    }

    fn ledger_of(unit: VolumeUnit, rows: &[(&str, &str, &str)]) -> Ledger {
        let mut ledger = Ledger::new(unit);
        for (name, volume, abv) in rows {
            let i = ledger.add_entry();
            ledger.update_field(i, EntryField::Name, name, &none()).unwrap();
            ledger.update_field(i, EntryField::Volume, volume, &none()).unwrap();
            ledger.update_field(i, EntryField::Abv, abv, &none()).unwrap();
        }
        ledger
    }

    #[test]
    fn test_add_entry_defaults() {
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        let i = ledger.add_entry();
        assert_eq!(i, 0);
        assert_eq!(ledger.entries()[0], IngredientEntry::new("", 45.0, 0.0));

        let mut ledger = Ledger::new(VolumeUnit::Oz);
        ledger.add_entry();
        assert_eq!(ledger.entries()[0].volume, 1.5);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut ledger = ledger_of(
            VolumeUnit::Ml,
            &[("a", "10", "0"), ("b", "20", "0"), ("c", "30", "0")],
        );
        let removed = ledger.remove_entry(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(ledger.len(), 2);
        let names: Vec<_> = ledger.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_out_of_range_is_error() {
        let mut ledger = ledger_of(VolumeUnit::Ml, &[("a", "10", "0")]);
        let err = ledger.remove_entry(5).unwrap_err();
        assert_eq!(err, CalcError::IndexOutOfRange { index: 5, len: 1 });
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_update_out_of_range_is_error() {
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        let err = ledger
            .update_field(0, EntryField::Volume, "10", &none())
            .unwrap_err();
        assert_eq!(err, CalcError::IndexOutOfRange { index: 0, len: 0 });
    }

    #[test]
    fn test_name_match_overwrites_abv() {
        let known = Known::with(&[("Vodka", 40.0)]);
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        ledger.add_entry();
        ledger.update_field(0, EntryField::Abv, "12", &known).unwrap();

        ledger.update_field(0, EntryField::Name, "vodka", &known).unwrap();
        assert_eq!(ledger.entries()[0].name, "vodka");
        assert_eq!(ledger.entries()[0].abv, 40.0);
    }

    #[test]
    fn test_unmatched_name_leaves_abv() {
        let known = Known::with(&[("Vodka", 40.0)]);
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        ledger.add_entry();
        ledger.update_field(0, EntryField::Abv, "12", &known).unwrap();

        ledger.update_field(0, EntryField::Name, "Lime juice", &known).unwrap();
        assert_eq!(ledger.entries()[0].abv, 12.0);
    }

    #[test]
    fn test_abv_can_be_overridden_after_fill() {
        let known = Known::with(&[("Vodka", 40.0)]);
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        ledger.add_entry();
        ledger.update_field(0, EntryField::Name, "Vodka", &known).unwrap();
        ledger.update_field(0, EntryField::Abv, "37.5", &known).unwrap();
        assert_eq!(ledger.entries()[0].abv, 37.5);
    }

    #[test]
    fn test_bad_numbers_become_zero() {
        let mut ledger = ledger_of(VolumeUnit::Ml, &[("x", "lots", "strong")]);
        assert_eq!(ledger.entries()[0].volume, 0.0);
        assert_eq!(ledger.entries()[0].abv, 0.0);

        ledger.update_field(0, EntryField::Volume, "-20", &none()).unwrap();
        ledger.update_field(0, EntryField::Abv, "140", &none()).unwrap();
        assert_eq!(ledger.entries()[0].volume, 0.0);
        assert_eq!(ledger.entries()[0].abv, 100.0);
    }

    #[test]
    fn test_set_unit_converts_volumes() {
        let mut ledger = ledger_of(VolumeUnit::Ml, &[("a", "45", "40"), ("b", "10", "0")]);
        ledger.set_unit(VolumeUnit::Oz);
        assert_eq!(ledger.unit(), VolumeUnit::Oz);
        assert_eq!(ledger.entries()[0].volume, 1.5);
        assert_eq!(ledger.entries()[1].volume, 0.33);

        ledger.set_unit(VolumeUnit::Ml);
        assert_eq!(ledger.entries()[0].volume, 45.0);
        assert_eq!(ledger.entries()[1].volume, 10.0);
    }

    #[test]
    fn test_toggle_twice_can_change_values() {
        let mut ledger = ledger_of(VolumeUnit::Oz, &[("a", "1.52", "0")]);
        ledger.toggle_unit();
        ledger.toggle_unit();
        assert_eq!(ledger.unit(), VolumeUnit::Oz);
        assert_eq!(ledger.entries()[0].volume, 1.53);
    }

    #[test]
    fn test_huge_volume_stays_finite() {
        let ledger = ledger_of(VolumeUnit::Ml, &[("a", "1e308", "100")]);
        assert_eq!(ledger.entries()[0].volume, MAX_VOLUME);

        let totals = ledger.aggregate();
        assert!(totals.total_volume.is_finite());
        assert!(totals.total_alcohol.is_finite());
        assert_eq!(totals.total_abv, 100.0);
    }

    #[test]
    fn test_huge_volume_survives_toggle() {
        let mut ledger = ledger_of(VolumeUnit::Oz, &[("a", "1e308", "0"), ("b", "1", "40")]);
        ledger.toggle_unit();

        assert_eq!(ledger.unit(), VolumeUnit::Ml);
        assert_eq!(ledger.entries()[0].volume, MAX_VOLUME);
        assert_eq!(ledger.entries()[1].volume, 30.0);

        let totals = ledger.aggregate();
        assert!(totals.total_volume.is_finite());
        assert!(totals.total_alcohol.is_finite());
        assert!(totals.total_abv.is_finite());

        let json = serde_json::to_string(&totals).unwrap();
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_add_after_unit_change_uses_new_default() {
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        ledger.set_unit(VolumeUnit::Oz);
        ledger.add_entry();
        assert_eq!(ledger.entries()[0].volume, 1.5);
    }

    #[test]
    fn test_aggregate() {
        let ledger = ledger_of(
            VolumeUnit::Ml,
            &[("Vodka", "50", "40"), ("Kahlua", "25", "20"), ("Cream", "25", "0")],
        );
        let totals = ledger.aggregate();
        assert_eq!(totals.total_volume, 100.0);
        assert_eq!(totals.total_alcohol, 25.0);
        assert_eq!(totals.total_abv, 25.0);
    }

    #[test]
    fn test_aggregate_empty() {
        let ledger = Ledger::default();
        assert_eq!(ledger.aggregate(), Totals::default());
    }

    #[test]
    fn test_events_published() {
        let known = Known::with(&[("Gin", 41.2)]);
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        let mut rx = ledger.subscribe();

        ledger.add_entry();
        ledger.update_field(0, EntryField::Name, "gin", &known).unwrap();
        ledger.set_unit(VolumeUnit::Oz);
        ledger.set_unit(VolumeUnit::Oz);
        ledger.remove_entry(0).unwrap();

        assert_eq!(rx.try_recv().unwrap(), LedgerEvent::EntryAdded { index: 0 });
        assert_eq!(
            rx.try_recv().unwrap(),
            LedgerEvent::EntryUpdated {
                index: 0,
                field: EntryField::Name
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            LedgerEvent::AbvFilled {
                index: 0,
                abv: 41.2
            }
        );
        assert_eq!(
            rx.try_recv().unwrap(),
            LedgerEvent::UnitChanged {
                from: VolumeUnit::Ml,
                to: VolumeUnit::Oz
            }
        );
        assert_eq!(rx.try_recv().unwrap(), LedgerEvent::EntryRemoved { index: 0 });
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn test_failed_edit_publishes_nothing() {
        let mut ledger = Ledger::new(VolumeUnit::Ml);
        let mut rx = ledger.subscribe();
        assert!(ledger.remove_entry(0).is_err());
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }
}
