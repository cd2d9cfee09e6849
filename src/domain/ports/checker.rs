//! The [`ConditionChecker`] capability and its registry key.

use std::any::{self, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

use super::progress::ProgressMonitor;
use crate::domain::models::status::StatusReport;

/// Identifies a checker implementation. One key per concrete type.
///
/// Equality and hashing use the [`TypeId`] only; the type name is kept for
/// messages and output.
#[derive(Clone, Copy)]
pub struct CheckerKey {
    id: TypeId,
    name: &'static str,
}

impl CheckerKey {
    /// Key for the checker type `C`.
    pub fn of<C: ConditionChecker>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: any::type_name::<C>(),
        }
    }

    /// Fully qualified type name of the checker.
    pub const fn type_name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for CheckerKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CheckerKey {}

impl Hash for CheckerKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CheckerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CheckerKey").field(&self.name).finish()
    }
}

impl fmt::Display for CheckerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl Serialize for CheckerKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// A unit of validation logic contributed by a participant.
///
/// Checkers are shared: every participant that needs the same kind of
/// validation looks up the one registered instance and feeds it, and the
/// check itself runs once for all of them.
///
/// `check` receives a progress monitor already bound to this checker's slice
/// of the overall budget. Implementations should call `begin_task` on it and
/// may poll `is_canceled` to stop early. Returning `Err` aborts the whole
/// run; reporting problems belongs in the returned [`StatusReport`].
pub trait ConditionChecker: Any {
    /// Human-readable name used in logs and entry attribution.
    fn name(&self) -> &str {
        any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("checker")
    }

    /// Run the check.
    fn check(&self, progress: &dyn ProgressMonitor) -> anyhow::Result<StatusReport>;
}
