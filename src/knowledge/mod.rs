//! Knowledge base: typed schema, file loading, and the context selector.

mod loader;
mod selector;
mod types;

pub use loader::KnowledgeError;
pub use types::{
    FaqEntry, KnowledgeBase, Package, ReducedContext, RoutingConfig, SuggestionRule,
};
