use once_cell::sync::Lazy;

use super::{
    DayOfMonthField, DayOfWeekField, FieldGrammar, HourField, MinuteField, MonthField, SecondField, YearField,
};
use crate::Position;

/// Process-wide registry used by [`crate::Expression`] and the convenience
/// search methods. Built on first use, immutable afterwards.
pub static DEFAULT_REGISTRY: Lazy<FieldRegistry> = Lazy::new(FieldRegistry::new);

/// Maps every [`Position`] to its grammar.
///
/// All seven grammars are built up front, so lookups never allocate and a
/// shared reference is enough for concurrent searches.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: [Box<dyn FieldGrammar>; 7],
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            fields: [
                Box::new(SecondField),
                Box::new(MinuteField),
                Box::new(HourField),
                Box::new(DayOfMonthField),
                Box::new(MonthField),
                Box::new(DayOfWeekField),
                Box::new(YearField),
            ],
        }
    }

    pub fn get(&self, position: Position) -> &dyn FieldGrammar {
        self.fields[position.index()].as_ref()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_reports_its_own_position() {
        let registry = FieldRegistry::new();
        for position in Position::ALL {
            assert_eq!(registry.get(position).position(), position);
        }
    }

    #[test]
    fn default_registry_is_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| DEFAULT_REGISTRY.get(Position::Minute).validate("*/5")))
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
