//! Built-in checks.
//!
//! Each check is a plain struct holding its [`CheckMeta`](crate::check::CheckMeta).
//! [`register_builtin`] is the single place they are wired into a registry.

mod kserve;
mod modelmesh;
mod servicemesh;

pub use kserve::{KserveServerlessRemovalCheck, ServerlessInferenceServicesCheck};
pub use modelmesh::ModelMeshRemovalCheck;
pub use servicemesh::ServiceMeshV2Check;

use crate::error::Result;
use crate::registry::CheckRegistry;

/// Major platform version the built-in migration checks target.
pub const NEXT_MAJOR: u64 = 3;

/// Register every built-in check.
///
/// # Errors
/// Returns `DuplicateCheck` if any of them is already registered.
pub fn register_builtin(registry: &CheckRegistry) -> Result<()> {
    registry.register(KserveServerlessRemovalCheck::new())?;
    registry.register(ModelMeshRemovalCheck::new())?;
    registry.register(ServerlessInferenceServicesCheck::new())?;
    registry.register(ServiceMeshV2Check::new())?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
