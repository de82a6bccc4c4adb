//! Entity metadata and module resolution
//!
//! Entity types map to remote modules by convention: the module name is the
//! pluralized type name and the identifier field is the uppercased type name
//! with an `ID` suffix. Irregular types override either half explicitly.
//!
//! # Overview
//!
//! ```
//! use crmkit::entity::{EntityDescriptor, ModuleResolver};
//!
//! static LEAD: EntityDescriptor = EntityDescriptor::new("Lead");
//! static STAGE_HISTORY: EntityDescriptor = EntityDescriptor::new("PotentialStageHistoryEntry")
//!     .with_module("PotStageHistory")
//!     .with_id_field("POTENTIALSTAGEHISTORYID");
//!
//! let binding = ModuleResolver::resolve(&LEAD);
//! assert_eq!(binding.module, "Leads");
//! assert_eq!(binding.id_field, "LEADID");
//!
//! let binding = ModuleResolver::resolve(&STAGE_HISTORY);
//! assert_eq!(binding.module, "PotStageHistory");
//! ```

mod pluralize;

pub use pluralize::pluralize;


/// Static metadata for an entity type
///
/// Declared once per entity type, typically as a `static`; never mutated.
/// Overrides left unset fall back to the naming convention at resolution
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDescriptor {
    type_name: &'static str,
    module_name: Option<&'static str>,
    id_field: Option<&'static str>,
}

impl EntityDescriptor {
    /// Describe an entity type by name, with convention-derived mapping
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            module_name: None,
            id_field: None,
        }
    }

    /// Override the remote module name
    #[must_use]
    pub const fn with_module(mut self, module_name: &'static str) -> Self {
        self.module_name = Some(module_name);
        self
    }

    /// Override the identifier field name
    #[must_use]
    pub const fn with_id_field(mut self, id_field: &'static str) -> Self {
        self.id_field = Some(id_field);
        self
    }

    /// The entity type name
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The explicit module override, when set
    pub fn module_override(&self) -> Option<&'static str> {
        self.module_name
    }

    /// The explicit identifier-field override, when set
    pub fn id_field_override(&self) -> Option<&'static str> {
        self.id_field
    }
}

/// Resolved module mapping for an entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleBinding {
    /// Remote module the entity type is stored in
    pub module: String,
    /// Identifier field within that module
    pub id_field: String,
}

/// Derives the module binding for an entity descriptor
///
/// Resolution is a pure function of the descriptor; it is total over any
/// descriptor with a non-empty type name and cheap enough to recompute on
/// demand.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleResolver;

impl ModuleResolver {
    /// Resolve the module and identifier field for an entity type
    pub fn resolve(descriptor: &EntityDescriptor) -> ModuleBinding {
        let module = match descriptor.module_override() {
            Some(module) => module.to_string(),
            None => pluralize(descriptor.type_name()),
        };
        let id_field = match descriptor.id_field_override() {
            Some(field) => field.to_string(),
            None => format!("{}ID", descriptor.type_name().to_uppercase()),
        };
        ModuleBinding { module, id_field }
    }
}
