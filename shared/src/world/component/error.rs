use axon_serde::SerdeErr;
use thiserror::Error;

/// Errors that can occur while writing a decoded value into a component slot
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlotError {
    /// The decoded value does not convert into the slot's field type
    #[error("Cannot write type id {type_id} into {component}.{field}: {source}")]
    Conversion {
        component: &'static str,
        field: &'static str,
        type_id: u32,
        source: SerdeErr,
    },

    /// A prepared write was applied to a component of another type
    #[error("Slot write for {component}.{field} applied to a different component type")]
    ComponentMismatch {
        component: &'static str,
        field: &'static str,
    },
}
