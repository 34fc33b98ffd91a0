//! Alias table - logical names to physical identifiers

use indexmap::IndexMap;

/// What a logical name was declared as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasKind {
    Database,
    Table,
}

/// Mapping from logical database/table names to their physical identifiers
///
/// Databases and tables live in separate namespaces, so a table may share
/// its database's name.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    databases: IndexMap<String, String>,
    tables: IndexMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a logical name, returning the physical name of the same kind it replaced
    pub fn register(
        &mut self,
        logical: impl Into<String>,
        physical: impl Into<String>,
        kind: AliasKind,
    ) -> Option<String> {
        let names = match kind {
            AliasKind::Database => &mut self.databases,
            AliasKind::Table => &mut self.tables,
        };
        names.insert(logical.into(), physical.into())
    }

    /// Physical name of a previously declared database
    pub fn resolve_database(&self, logical: &str) -> Option<&str> {
        self.databases.get(logical).map(String::as_str)
    }

    /// Physical name of a previously declared table
    pub fn resolve_table(&self, logical: &str) -> Option<&str> {
        self.tables.get(logical).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_database() {
        let mut aliases = AliasTable::new();
        aliases.register("Shop", "k3j2h1g0", AliasKind::Database);
        aliases.register("Orders", "p0o9i8u7", AliasKind::Table);

        assert_eq!(aliases.resolve_database("Shop"), Some("k3j2h1g0"));
        assert_eq!(aliases.resolve_database("Orders"), None);
        assert_eq!(aliases.resolve_database("Missing"), None);
        assert_eq!(aliases.resolve_table("Orders"), Some("p0o9i8u7"));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut aliases = AliasTable::new();
        assert!(aliases
            .register("Shop", "first", AliasKind::Database)
            .is_none());
        let previous = aliases.register("Shop", "second", AliasKind::Database);

        assert_eq!(previous.as_deref(), Some("first"));
        assert_eq!(aliases.resolve_database("Shop"), Some("second"));
        assert_eq!(aliases.resolve_table("Shop"), None);
    }

    #[test]
    fn test_table_does_not_shadow_database() {
        let mut aliases = AliasTable::new();
        aliases.register("Users", "dbusers", AliasKind::Database);
        let previous = aliases.register("Users", "tbusers", AliasKind::Table);

        assert!(previous.is_none());
        assert_eq!(aliases.resolve_database("Users"), Some("dbusers"));
        assert_eq!(aliases.resolve_table("Users"), Some("tbusers"));
    }
}
