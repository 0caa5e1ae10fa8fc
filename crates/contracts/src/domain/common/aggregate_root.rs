use super::EntityMetadata;

/// Trait for the root of an aggregate
///
/// Defines the required instance accessors and the static metadata every
/// aggregate class carries.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    // ========================================================================
    // Instance accessors
    // ========================================================================

    /// Record ID
    fn id(&self) -> Self::Id;

    /// Business code of the record (e.g. "LOJA-1")
    fn code(&self) -> &str;

    /// Display name of the record
    fn description(&self) -> &str;

    /// Lifecycle metadata
    fn metadata(&self) -> &EntityMetadata;

    /// Mutable lifecycle metadata
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ========================================================================
    // Class-level metadata
    // ========================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for the DB (e.g. "store")
    fn collection_name() -> &'static str;

    /// UI element name, singular (e.g. "Loja")
    fn element_name() -> &'static str;

    /// UI list name, plural (e.g. "Lojas")
    fn list_name() -> &'static str;

    // ========================================================================
    // Default implementations
    // ========================================================================

    /// Full system name of the aggregate (e.g. "a001_store")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// DB table prefix (e.g. "a001_store_")
    fn table_prefix() -> String {
        format!("{}_", Self::full_name())
    }
}
