//! Static relation descriptors.
//!
//! Relation-based filtering and sorting resolve relation names against this
//! table instead of reflecting on the ORM at runtime. Every entity registers
//! its relations once; unknown names resolve to `None` and the caller skips
//! them silently.

/// How a relation's key columns line up between the two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The base table holds the foreign key (`base.foreign_key = related.owner_key`).
    BelongsTo {
        foreign_key: &'static str,
        owner_key: &'static str,
    },
    /// The related table holds the foreign key (`base.local_key = related.foreign_key`).
    /// Covers both has-one and has-many.
    HasMany {
        local_key: &'static str,
        foreign_key: &'static str,
    },
    /// Linked through a pivot table
    /// (`base.local_key = pivot.pivot_local_key`, `pivot.pivot_related_key = related.related_key`).
    ManyToMany {
        pivot_table: &'static str,
        local_key: &'static str,
        pivot_local_key: &'static str,
        pivot_related_key: &'static str,
        related_key: &'static str,
    },
}

/// One named relation from a base table to a related table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDescriptor {
    /// Relation name as used in query parameters (e.g. "evidences").
    pub name: &'static str,
    /// Related table name.
    pub table: &'static str,
    pub kind: RelationKind,
}

/// Lookup table of relation descriptors, keyed by base table name.
pub struct RelationRegistry {
    entries: &'static [(&'static str, &'static [RelationDescriptor])],
}

impl RelationRegistry {
    #[must_use]
    pub const fn new(
        entries: &'static [(&'static str, &'static [RelationDescriptor])],
    ) -> Self {
        Self { entries }
    }

    /// All relations registered for a base table.
    #[must_use]
    pub fn relations_of(&self, table: &str) -> &'static [RelationDescriptor] {
        self.entries
            .iter()
            .find(|(base, _)| *base == table)
            .map_or(&[], |(_, descriptors)| *descriptors)
    }

    /// Resolve a single relation by name on a base table.
    #[must_use]
    pub fn resolve(&self, table: &str, name: &str) -> Option<&'static RelationDescriptor> {
        self.relations_of(table)
            .iter()
            .find(|descriptor| descriptor.name == name)
    }

    /// Resolve a dot-separated relation path, walking each segment through
    /// the table it lands on. Returns `None` if any segment is unknown.
    #[must_use]
    pub fn resolve_path(
        &self,
        table: &str,
        path: &str,
    ) -> Option<Vec<&'static RelationDescriptor>> {
        let mut current = table;
        let mut chain = Vec::new();
        for segment in path.split('.') {
            let descriptor = self.resolve(current, segment)?;
            current = descriptor.table;
            chain.push(descriptor);
        }
        if chain.is_empty() { None } else { Some(chain) }
    }
}
