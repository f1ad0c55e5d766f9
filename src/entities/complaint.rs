use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, NotSet, Set};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::traits::{CrudResource, MergeIntoActiveModel};
use crate::filtering::RelationFilterBinding;
use crate::selection::{FieldValue, SelectableResource};
use crate::validation::{Validatable, ValidationErrors, identity, validators};

/// Triage state of a complaint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "resolved")]
    Resolved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl ComplaintStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Rejected => "Rejected",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum ComplaintPriority {
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

impl ComplaintPriority {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Identity document presented by the reporter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "snake_case")]
pub enum IdentityType {
    #[sea_orm(string_value = "ktp")]
    Ktp,
    #[sea_orm(string_value = "sim")]
    Sim,
    #[sea_orm(string_value = "passport")]
    Passport,
}

/// A citizen-filed case record.
///
/// `complaint_number` stays NULL until first persistence assigns it from the
/// creation date and row id; once set it never changes.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub complaint_number: Option<String>,
    pub reporter_name: String,
    pub reporter_contact: String,
    pub reporter_identity_type: IdentityType,
    pub reporter_identity_number: String,
    pub incident_title: String,
    pub incident_description: String,
    pub incident_time: chrono::DateTime<Utc>,
    pub reported_person: String,
    pub status: ComplaintStatus,
    pub priority: ComplaintPriority,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::complaint_evidence::Entity")]
    Evidences,
}

impl Related<super::complaint_evidence::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evidences.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Payload for public submission and staff entry.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ComplaintCreate {
    pub reporter_name: String,
    pub reporter_contact: String,
    pub reporter_identity_type: IdentityType,
    pub reporter_identity_number: String,
    pub incident_title: String,
    pub incident_description: String,
    pub incident_time: chrono::DateTime<Utc>,
    pub reported_person: String,
    /// Staff entry may pre-set a priority; public submissions leave it at
    /// the default.
    pub priority: Option<ComplaintPriority>,
}

impl Validatable for ComplaintCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_required(
            "reporter_name",
            &self.reporter_name,
        ));
        errors.check(validators::validate_required(
            "reporter_contact",
            &self.reporter_contact,
        ));
        errors.check(validators::validate_required(
            "incident_title",
            &self.incident_title,
        ));
        errors.check(validators::validate_required(
            "incident_description",
            &self.incident_description,
        ));
        errors.check(validators::validate_required(
            "reported_person",
            &self.reported_person,
        ));
        errors.check(match self.reporter_identity_type {
            IdentityType::Ktp => identity::validate_ktp(
                "reporter_identity_number",
                &self.reporter_identity_number,
            ),
            IdentityType::Sim => identity::validate_sim(
                "reporter_identity_number",
                &self.reporter_identity_number,
            ),
            IdentityType::Passport => identity::validate_passport(
                "reporter_identity_number",
                &self.reporter_identity_number,
            ),
        });
        errors.result()
    }
}

impl From<ComplaintCreate> for ActiveModel {
    fn from(create: ComplaintCreate) -> Self {
        let now = Utc::now();
        Self {
            id: NotSet,
            complaint_number: NotSet,
            reporter_name: Set(create.reporter_name),
            reporter_contact: Set(create.reporter_contact),
            reporter_identity_type: Set(create.reporter_identity_type),
            reporter_identity_number: Set(create.reporter_identity_number),
            incident_title: Set(create.incident_title),
            incident_description: Set(create.incident_description),
            incident_time: Set(create.incident_time),
            reported_person: Set(create.reported_person),
            status: Set(ComplaintStatus::Pending),
            priority: Set(create.priority.unwrap_or(ComplaintPriority::Medium)),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Staff update payload. The complaint number is immutable and deliberately
/// absent here.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ComplaintUpdate {
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub reporter_identity_type: Option<IdentityType>,
    pub reporter_identity_number: Option<String>,
    pub incident_title: Option<String>,
    pub incident_description: Option<String>,
    pub incident_time: Option<chrono::DateTime<Utc>>,
    pub reported_person: Option<String>,
    pub status: Option<ComplaintStatus>,
    pub priority: Option<ComplaintPriority>,
}

impl MergeIntoActiveModel<ActiveModel> for ComplaintUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(value) = self.reporter_name {
            existing.reporter_name = Set(value);
        }
        if let Some(value) = self.reporter_contact {
            existing.reporter_contact = Set(value);
        }
        if let Some(value) = self.reporter_identity_type {
            existing.reporter_identity_type = Set(value);
        }
        if let Some(value) = self.reporter_identity_number {
            existing.reporter_identity_number = Set(value);
        }
        if let Some(value) = self.incident_title {
            existing.incident_title = Set(value);
        }
        if let Some(value) = self.incident_description {
            existing.incident_description = Set(value);
        }
        if let Some(value) = self.incident_time {
            existing.incident_time = Set(value);
        }
        if let Some(value) = self.reported_person {
            existing.reported_person = Set(value);
        }
        if let Some(value) = self.status {
            existing.status = Set(value);
        }
        if let Some(value) = self.priority {
            existing.priority = Set(value);
        }
        existing.updated_at = Set(Utc::now());
        // the assigned complaint number never changes
        existing.complaint_number = ActiveValue::NotSet;
        Ok(existing)
    }
}

impl CrudResource for Model {
    type Entity = Entity;
    type Column = Column;

    const RESOURCE_NAME_SINGULAR: &'static str = "complaint";
    const RESOURCE_NAME_PLURAL: &'static str = "complaints";
    const TABLE_NAME: &'static str = "complaints";

    fn id_column() -> Self::Column {
        Column::Id
    }

    fn searchable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("complaint_number", Column::ComplaintNumber),
            ("reporter_name", Column::ReporterName),
            ("incident_title", Column::IncidentTitle),
            ("incident_description", Column::IncidentDescription),
            ("reported_person", Column::ReportedPerson),
        ]
    }

    fn filterable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("id", Column::Id),
            ("complaint_number", Column::ComplaintNumber),
            ("reporter_identity_type", Column::ReporterIdentityType),
            ("status", Column::Status),
            ("priority", Column::Priority),
            ("incident_time", Column::IncidentTime),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn sortable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("id", Column::Id),
            ("complaint_number", Column::ComplaintNumber),
            ("reporter_name", Column::ReporterName),
            ("incident_title", Column::IncidentTitle),
            ("incident_time", Column::IncidentTime),
            ("status", Column::Status),
            ("priority", Column::Priority),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn relation_filter_bindings() -> Vec<RelationFilterBinding> {
        vec![
            RelationFilterBinding {
                key: "evidence_types",
                relation: "evidences",
                column: "file_type",
            },
            RelationFilterBinding {
                key: "evidence_titles",
                relation: "evidences",
                column: "title",
            },
        ]
    }
}

impl SelectableResource for Model {
    const RESOURCE_KEY: &'static str = "complaint";

    fn fields(self) -> Vec<(&'static str, FieldValue)> {
        let status = self.status;
        let priority = self.priority;
        vec![
            ("id", FieldValue::eager(self.id)),
            ("complaint_number", FieldValue::eager(&self.complaint_number)),
            ("reporter_name", FieldValue::eager(&self.reporter_name)),
            ("reporter_contact", FieldValue::eager(&self.reporter_contact)),
            (
                "reporter_identity_type",
                FieldValue::eager(self.reporter_identity_type),
            ),
            (
                "reporter_identity_number",
                FieldValue::eager(&self.reporter_identity_number),
            ),
            ("incident_title", FieldValue::eager(&self.incident_title)),
            (
                "incident_description",
                FieldValue::eager(&self.incident_description),
            ),
            ("incident_time", FieldValue::eager(self.incident_time)),
            ("reported_person", FieldValue::eager(&self.reported_person)),
            ("status", FieldValue::eager(status)),
            (
                "status_label",
                FieldValue::lazy(move || serde_json::Value::String(status.label().to_string())),
            ),
            ("priority", FieldValue::eager(priority)),
            (
                "priority_label",
                FieldValue::lazy(move || serde_json::Value::String(priority.label().to_string())),
            ),
            ("created_at", FieldValue::eager(self.created_at)),
            ("updated_at", FieldValue::eager(self.updated_at)),
        ]
    }
}
