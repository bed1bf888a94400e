use std::{any::Any, collections::HashMap, marker::PhantomData};

use axon_serde::Value;
use log::warn;
use serde::de::DeserializeOwned;

use crate::protocol::Variant;

use super::{component::Component, error::SlotError};

type Prepare = Box<dyn Fn(&Value) -> Result<PreparedWrite, SlotError>>;

/// Binds one type id to one field of a component.
pub struct SlotBinding {
    field: &'static str,
    prepare: Prepare,
}

impl SlotBinding {
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Convert `value` into the field's type without touching any component.
    pub fn prepare(&self, value: &Value) -> Result<PreparedWrite, SlotError> {
        (self.prepare)(value)
    }
}

/// A converted value waiting to be written into its field.
pub struct PreparedWrite {
    component: &'static str,
    field: &'static str,
    apply: Box<dyn FnOnce(&mut dyn Any) -> bool>,
}

impl PreparedWrite {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn apply(self, target: &mut dyn Any) -> Result<(), SlotError> {
        if (self.apply)(target) {
            Ok(())
        } else {
            Err(SlotError::ComponentMismatch {
                component: self.component,
                field: self.field,
            })
        }
    }
}

/// The slot declaration of component type `C`, built with [`SlotTable::bind`].
///
/// ```ignore
/// fn slots() -> SlotTable<Self> {
///     SlotTable::new()
///         .bind(1000, "position", |mover: &mut Mover| &mut mover.position)
///         .bind_variant::<Health>("health", |mover: &mut Mover| &mut mover.health)
/// }
/// ```
pub struct SlotTable<C> {
    bindings: HashMap<u32, SlotBinding>,
    phantom_c: PhantomData<fn(&mut C)>,
}

impl<C: Component> SlotTable<C> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            phantom_c: PhantomData,
        }
    }

    /// Route values of `type_id` into the field `accessor` points at.
    pub fn bind<T: DeserializeOwned + 'static>(
        mut self,
        type_id: u32,
        field: &'static str,
        accessor: fn(&mut C) -> &mut T,
    ) -> Self {
        let component = std::any::type_name::<C>();
        let prepare = move |value: &Value| -> Result<PreparedWrite, SlotError> {
            let decoded: T = value.decode_as().map_err(|source| SlotError::Conversion {
                component,
                field,
                type_id,
                source,
            })?;
            Ok(PreparedWrite {
                component,
                field,
                apply: Box::new(move |target: &mut dyn Any| match target.downcast_mut::<C>() {
                    Some(instance) => {
                        *accessor(instance) = decoded;
                        true
                    }
                    None => false,
                }),
            })
        };

        let binding = SlotBinding {
            field,
            prepare: Box::new(prepare),
        };
        if let Some(previous) = self.bindings.insert(type_id, binding) {
            warn!(
                "{} binds type id {} twice, '{}' replaces '{}'",
                component, type_id, field, previous.field
            );
        }
        self
    }

    /// [`bind`](Self::bind) keyed by the variant's own type id.
    pub fn bind_variant<V: Variant>(self, field: &'static str, accessor: fn(&mut C) -> &mut V) -> Self {
        self.bind(V::TYPE_ID, field, accessor)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn into_slots(self) -> ComponentSlots {
        ComponentSlots {
            component: std::any::type_name::<C>(),
            bindings: self.bindings,
        }
    }
}

impl<C: Component> Default for SlotTable<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// The cached, type-erased slot table of one component type.
pub struct ComponentSlots {
    component: &'static str,
    bindings: HashMap<u32, SlotBinding>,
}

impl ComponentSlots {
    pub fn component_name(&self) -> &'static str {
        self.component
    }

    pub fn get(&self, type_id: u32) -> Option<&SlotBinding> {
        self.bindings.get(&type_id)
    }

    pub fn contains(&self, type_id: u32) -> bool {
        self.bindings.contains_key(&type_id)
    }

    pub fn type_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.bindings.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
