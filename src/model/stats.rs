//! Model statistics for developer diagnostics.

use std::fmt;

/// Counts over one compiled model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelStatistics {
    pub elements: usize,
    pub abstract_elements: usize,
    pub element_types: usize,
    pub capability_types: usize,
    pub element_roles: usize,
    pub element_role_sets: usize,
    pub attribute_enums: usize,
    pub attributes: usize,
    pub config_children: usize,
    pub omitted_config_children: usize,
    pub technical_overrides: usize,
    pub failed_elements: usize,
    pub unresolved_name_collisions: usize,
    pub shared_slot_conflicts: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl fmt::Display for ModelStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "elements:               {} ({} abstract)", self.elements, self.abstract_elements)?;
        writeln!(f, "element types:          {} ({} capability)", self.element_types, self.capability_types)?;
        writeln!(f, "element roles:          {}", self.element_roles)?;
        writeln!(f, "element role sets:      {}", self.element_role_sets)?;
        writeln!(f, "attribute enums:        {}", self.attribute_enums)?;
        writeln!(f, "attributes:             {}", self.attributes)?;
        writeln!(f, "config children:        {} ({} omitted)", self.config_children, self.omitted_config_children)?;
        writeln!(f, "technical overrides:    {}", self.technical_overrides)?;
        writeln!(f, "failed elements:        {}", self.failed_elements)?;
        writeln!(f, "name collisions:        {}", self.unresolved_name_collisions)?;
        writeln!(f, "shared slot conflicts:  {}", self.shared_slot_conflicts)?;
        write!(f, "diagnostics:            {} errors, {} warnings", self.errors, self.warnings)
    }
}
