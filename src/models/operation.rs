//! Tipo de operación sobre el recurso locations
//!
//! Lo usan la política de acceso y la selección de representación (Feature / lista).

/// Operaciones expuestas por la API de locations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Delete,
    Nearby,
    WithinBounds,
}

impl Operation {
    /// true para operaciones que modifican datos
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::Update | Operation::PartialUpdate | Operation::Delete
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Retrieve => "retrieve",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::PartialUpdate => "partial_update",
            Operation::Delete => "delete",
            Operation::Nearby => "nearby",
            Operation::WithinBounds => "within_bounds",
        }
    }
}
