use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ConnectionTrait, NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::traits::{CrudResource, MergeIntoActiveModel};
use crate::mime;
use crate::selection::{FieldValue, SelectableResource};
use crate::validation::{Validatable, ValidationErrors, validators};

/// A file attached to exactly one complaint.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "complaint_evidences")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub complaint_id: i32,
    pub title: String,
    pub file_path: String,
    /// Inferred from the file extension when absent; never overwritten once
    /// set.
    pub file_type: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::complaint::Entity",
        from = "Column::ComplaintId",
        to = "super::complaint::Column::Id"
    )]
    Complaint,
}

impl Related<super::complaint::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Complaint.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    /// Infer `file_type` from the file path exactly once: only when no
    /// value is set and none is already stored.
    async fn before_save<C>(mut self, _db: &C, _insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let current = match &self.file_type {
            ActiveValue::Set(value) | ActiveValue::Unchanged(value) => value.as_deref(),
            ActiveValue::NotSet => None,
        };
        if current.is_none()
            && let ActiveValue::Set(path) | ActiveValue::Unchanged(path) = &self.file_path
        {
            self.file_type = Set(Some(mime::from_path(path).to_string()));
        }
        Ok(self)
    }
}

/// Payload for attaching evidence to a complaint.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EvidenceCreate {
    pub title: String,
    pub file_path: String,
    /// Explicit MIME type; inferred from the path when omitted.
    pub file_type: Option<String>,
}

impl Validatable for EvidenceCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_required("title", &self.title));
        errors.check(validators::validate_required("file_path", &self.file_path));
        errors.result()
    }
}

impl EvidenceCreate {
    #[must_use]
    pub fn into_active_model(self, complaint_id: i32) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            id: NotSet,
            complaint_id: Set(complaint_id),
            title: Set(self.title),
            file_path: Set(self.file_path),
            file_type: match self.file_type {
                Some(file_type) => Set(Some(file_type)),
                None => NotSet,
            },
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EvidenceUpdate {
    pub title: Option<String>,
    pub file_path: Option<String>,
}

impl MergeIntoActiveModel<ActiveModel> for EvidenceUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(value) = self.title {
            existing.title = Set(value);
        }
        if let Some(value) = self.file_path {
            existing.file_path = Set(value);
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

impl CrudResource for Model {
    type Entity = Entity;
    type Column = Column;

    const RESOURCE_NAME_SINGULAR: &'static str = "evidence";
    const RESOURCE_NAME_PLURAL: &'static str = "evidences";
    const TABLE_NAME: &'static str = "complaint_evidences";

    fn id_column() -> Self::Column {
        Column::Id
    }

    fn searchable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![("title", Column::Title), ("file_path", Column::FilePath)]
    }

    fn filterable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("id", Column::Id),
            ("complaint_id", Column::ComplaintId),
            ("file_type", Column::FileType),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn sortable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("id", Column::Id),
            ("title", Column::Title),
            ("file_type", Column::FileType),
            ("created_at", Column::CreatedAt),
        ]
    }
}

impl SelectableResource for Model {
    const RESOURCE_KEY: &'static str = "complaint_evidence";

    fn fields(self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::eager(self.id)),
            ("complaint_id", FieldValue::eager(self.complaint_id)),
            ("title", FieldValue::eager(&self.title)),
            ("file_path", FieldValue::eager(&self.file_path)),
            ("file_type", FieldValue::eager(&self.file_type)),
            ("created_at", FieldValue::eager(self.created_at)),
            ("updated_at", FieldValue::eager(self.updated_at)),
        ]
    }
}
