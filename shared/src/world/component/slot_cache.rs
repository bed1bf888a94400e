use std::{any::TypeId, collections::HashMap, rc::Rc};

use log::debug;

use super::{component::Component, kind::ComponentKind, slots::ComponentSlots};

/// Memoised slot tables, one per component type, shared by every instance.
#[derive(Default)]
pub struct SlotCache {
    tables: HashMap<TypeId, Rc<ComponentSlots>>,
    scans: usize,
}

impl SlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots_for<C: Component>(&mut self) -> Rc<ComponentSlots> {
        self.get_or_scan(TypeId::of::<C>(), || C::slots().into_slots())
    }

    pub fn slots_for_kind(&mut self, kind: &ComponentKind) -> Rc<ComponentSlots> {
        self.get_or_scan(kind.type_id(), || kind.scan_slots())
    }

    fn get_or_scan(&mut self, key: TypeId, scan: impl FnOnce() -> ComponentSlots) -> Rc<ComponentSlots> {
        if let Some(slots) = self.tables.get(&key) {
            return slots.clone();
        }
        let slots = Rc::new(scan());
        self.scans += 1;
        debug!(
            "Scanned slots of {}: {} binding(s)",
            slots.component_name(),
            slots.len()
        );
        self.tables.insert(key, slots.clone());
        slots
    }

    /// How many slot declarations have been scanned so far. Stays at one
    /// per component type no matter how many instances are created.
    pub fn scan_count(&self) -> usize {
        self.scans
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
