use crate::config::WritePolicy;
use crate::middleware::auth::Caller;
use crate::models::Operation;
use crate::utils::errors::{AppError, AppResult};

/// Decide si un caller (o nadie) puede ejecutar una operación.
///
/// Lecturas siempre permitidas; escrituras según `WritePolicy`.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    write_policy: WritePolicy,
}

impl AccessPolicy {
    pub fn new(write_policy: WritePolicy) -> Self {
        Self { write_policy }
    }

    pub fn authorize(&self, caller: Option<&Caller>, operation: Operation) -> AppResult<()> {
        if !operation.is_write() {
            return Ok(());
        }

        match (self.write_policy, caller) {
            (WritePolicy::Open, _) => Ok(()),
            (WritePolicy::Authenticated | WritePolicy::Admin, None) => Err(AppError::Unauthorized(
                format!("Authentication required to {}", operation.name()),
            )),
            (WritePolicy::Admin, Some(caller))
                if operation == Operation::Delete && !caller.is_admin() =>
            {
                Err(AppError::Forbidden(format!(
                    "Cannot {}: admin role required",
                    operation.name()
                )))
            }
            (_, Some(_)) => Ok(()),
        }
    }
}
