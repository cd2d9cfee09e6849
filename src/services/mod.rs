pub mod checkers;
pub mod condition_registry;

pub use checkers::ValidateEditChecker;
pub use condition_registry::ConditionCheckRegistry;
