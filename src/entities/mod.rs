pub mod complaint;
pub mod complaint_evidence;
pub mod user;

use crate::relations::{RelationDescriptor, RelationKind, RelationRegistry};

/// Relation descriptors for every entity, resolved once at compile time.
/// Relation-based filters and sorts look names up here instead of
/// reflecting on the ORM.
pub static RELATIONS: RelationRegistry = RelationRegistry::new(&[
    (
        "complaints",
        &[RelationDescriptor {
            name: "evidences",
            table: "complaint_evidences",
            kind: RelationKind::HasMany {
                local_key: "id",
                foreign_key: "complaint_id",
            },
        }],
    ),
    (
        "complaint_evidences",
        &[RelationDescriptor {
            name: "complaint",
            table: "complaints",
            kind: RelationKind::BelongsTo {
                foreign_key: "complaint_id",
                owner_key: "id",
            },
        }],
    ),
    ("users", &[]),
]);
