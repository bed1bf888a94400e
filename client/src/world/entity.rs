use std::{fmt, rc::Rc};

use axon_shared::{AsAny, Component, ComponentSlots};

/// A component instance and the slot table its writes are routed through.
pub(crate) struct ComponentRecord {
    pub(crate) component: Box<dyn Component>,
    pub(crate) slots: Rc<ComponentSlots>,
}

/// A live replicated entity: an id and the components its template built.
pub struct Entity {
    id: u64,
    type_id: u32,
    components: Vec<ComponentRecord>,
}

impl Entity {
    pub(crate) fn new(id: u64, type_id: u32, parts: Vec<(Box<dyn Component>, Rc<ComponentSlots>)>) -> Self {
        let components = parts
            .into_iter()
            .map(|(component, slots)| ComponentRecord { component, slots })
            .collect();
        Self {
            id,
            type_id,
            components,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Type id of the template this entity was spawned from.
    pub fn type_id(&self) -> u32 {
        self.type_id
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// The first component of type `C`.
    pub fn component<C: Component>(&self) -> Option<&C> {
        self.components
            .iter()
            .find_map(|record| AsAny::as_any(&*record.component).downcast_ref::<C>())
    }

    pub fn component_mut<C: Component>(&mut self) -> Option<&mut C> {
        self.components
            .iter_mut()
            .find_map(|record| AsAny::as_any_mut(&mut *record.component).downcast_mut::<C>())
    }

    pub fn has_component<C: Component>(&self) -> bool {
        self.component::<C>().is_some()
    }

    /// Whether any component has a slot for `type_id`.
    pub fn has_slot(&self, type_id: u32) -> bool {
        self.components
            .iter()
            .any(|record| record.slots.contains(type_id))
    }

    pub fn components(&self) -> impl Iterator<Item = &(dyn Component + 'static)> {
        self.components.iter().map(|record| &*record.component)
    }

    pub(crate) fn records(&self) -> &[ComponentRecord] {
        &self.components
    }

    pub(crate) fn records_mut(&mut self) -> &mut [ComponentRecord] {
        &mut self.components
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self
            .components
            .iter()
            .map(|record| record.slots.component_name())
            .collect();
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("type_id", &self.type_id)
            .field("components", &names)
            .finish()
    }
}
