use std::{collections::HashMap, rc::Rc};

use log::{debug, warn};

use crate::{
    schema::Shape,
    world::component::{
        component::Component, slot_cache::SlotCache, slots::ComponentSlots,
    },
};

pub mod error;
mod template;
mod variant;

pub use error::RegistryError;
pub use template::Template;
pub use variant::{type_id_from_name, Variant};

// Registry Plugin
pub trait RegistryPlugin {
    fn build(&self, registry: &mut TypeRegistry);
}

/// A registered type id and the shape its payloads are mapped through.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantEntry {
    type_id: u32,
    name: String,
    shape: Shape,
}

impl VariantEntry {
    pub fn type_id(&self) -> u32 {
        self.type_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }
}

/// Routes numeric type ids to shapes, spawn templates and component slots.
///
/// Populated at startup, then locked when a replication engine takes it.
/// After that only the slot cache changes, as new component types are seen.
#[derive(Default)]
pub struct TypeRegistry {
    variants: HashMap<u32, VariantEntry>,
    templates: Vec<(u32, Template)>,
    slot_cache: SlotCache,
    locked: bool,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: RegistryPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    /// Register `shape` under `type_id`.
    ///
    /// Registering the same name and shape again is a no-op. A conflicting
    /// registration is refused and logged, the first one stays.
    pub fn register(&mut self, type_id: u32, name: &str, shape: Shape) -> &mut Self {
        self.check_lock();
        if let Err(err) = self.insert_variant(type_id, name, shape) {
            warn!("{}", err);
        }
        self
    }

    pub fn add_variant<V: Variant>(&mut self) -> &mut Self {
        self.register(V::TYPE_ID, V::variant_name(), V::variant_shape())
    }

    /// Add a spawn template. When several templates share a type id, the
    /// first one added is used.
    pub fn add_template(&mut self, type_id: u32, template: Template) -> &mut Self {
        self.check_lock();
        self.push_template(type_id, template);
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: RegistryPlugin>(&mut self, plugin: P) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_register(&mut self, type_id: u32, name: &str, shape: Shape) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;
        self.insert_variant(type_id, name, shape)?;
        Ok(self)
    }

    pub fn try_add_variant<V: Variant>(&mut self) -> Result<&mut Self, RegistryError> {
        self.try_register(V::TYPE_ID, V::variant_name(), V::variant_shape())
    }

    pub fn try_add_template(&mut self, type_id: u32, template: Template) -> Result<&mut Self, RegistryError> {
        self.try_check_lock()?;
        self.push_template(type_id, template);
        Ok(self)
    }

    fn insert_variant(&mut self, type_id: u32, name: &str, shape: Shape) -> Result<(), RegistryError> {
        if let Some(existing) = self.variants.get(&type_id) {
            if existing.name == name && existing.shape == shape {
                return Ok(());
            }
            return Err(RegistryError::ConflictingDescriptor {
                type_id,
                existing: format!("{}: {}", existing.name, existing.shape),
                incoming: format!("{}: {}", name, shape),
            });
        }
        self.variants.insert(
            type_id,
            VariantEntry {
                type_id,
                name: name.to_owned(),
                shape,
            },
        );
        Ok(())
    }

    fn push_template(&mut self, type_id: u32, template: Template) {
        if self.template(type_id).is_some() {
            debug!(
                "Template '{}' for type id {} is shadowed by an earlier template",
                template.name(),
                type_id
            );
        }
        self.templates.push((type_id, template));
    }

    // Locking

    pub fn try_lock(&mut self) -> Result<(), RegistryError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Returns Err if the registry is locked
    pub fn try_check_lock(&self) -> Result<(), RegistryError> {
        if self.locked {
            Err(RegistryError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Panics if the registry is locked
    pub fn check_lock(&self) {
        if self.locked {
            panic!("TypeRegistry already locked!");
        }
    }

    // Lookups

    pub fn resolve(&self, type_id: u32) -> Result<&VariantEntry, RegistryError> {
        self.variants
            .get(&type_id)
            .ok_or(RegistryError::NotFound { type_id })
    }

    pub fn get(&self, type_id: u32) -> Option<&VariantEntry> {
        self.variants.get(&type_id)
    }

    pub fn contains(&self, type_id: u32) -> bool {
        self.variants.contains_key(&type_id)
    }

    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// First template added under `type_id`.
    pub fn template(&self, type_id: u32) -> Option<&Template> {
        self.templates
            .iter()
            .find(|(template_id, _)| *template_id == type_id)
            .map(|(_, template)| template)
    }

    pub fn try_template(&self, type_id: u32) -> Result<&Template, RegistryError> {
        self.template(type_id)
            .ok_or(RegistryError::TemplateNotFound { type_id })
    }

    // Slots

    pub fn slots_for<C: Component>(&mut self) -> Rc<ComponentSlots> {
        self.slot_cache.slots_for::<C>()
    }

    pub fn slot_cache(&self) -> &SlotCache {
        &self.slot_cache
    }

    /// Create the components of the first template under `type_id`, each
    /// paired with its cached slot table.
    pub fn instantiate(&mut self, type_id: u32) -> Option<Vec<(Box<dyn Component>, Rc<ComponentSlots>)>> {
        let template = self
            .templates
            .iter()
            .find(|(template_id, _)| *template_id == type_id)
            .map(|(_, template)| template)?;

        let components = template
            .components()
            .iter()
            .map(|kind| (kind.create(), self.slot_cache.slots_for_kind(kind)))
            .collect();
        Some(components)
    }
}
