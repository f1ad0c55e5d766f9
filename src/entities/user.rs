use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::traits::{CrudResource, MergeIntoActiveModel};
use crate::selection::{FieldValue, SelectableResource};
use crate::validation::{Validatable, ValidationError, ValidationErrors, validators};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
    #[sea_orm(string_value = "employee")]
    Employee,
}

/// A staff account, keyed by the employee identification number (NIP).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub nip: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub home_address: String,
    pub role: Role,
    /// Argon2 hash, never the plain text.
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserCreate {
    pub nip: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub home_address: String,
    pub role: Role,
    pub password: String,
    pub password_confirmation: String,
}

impl Validatable for UserCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check(validators::validate_required("nip", &self.nip));
        errors.check(validators::validate_required("name", &self.name));
        errors.check(validators::validate_required(
            "phone_number",
            &self.phone_number,
        ));
        errors.check(validators::validate_email("email", &self.email));
        errors.check(validators::validate_required(
            "home_address",
            &self.home_address,
        ));
        errors.check(validators::validate_length(
            "password",
            &self.password,
            Some(8),
            Some(72),
        ));
        if self.password != self.password_confirmation {
            errors.add(ValidationError::new(
                "password_confirmation",
                "Password confirmation does not match",
            ));
        }
        errors.result()
    }
}

impl UserCreate {
    /// Build the active model with an already-hashed password.
    #[must_use]
    pub fn into_active_model(self, password_hash: String) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            nip: Set(self.nip),
            name: Set(self.name),
            phone_number: Set(self.phone_number),
            email: Set(self.email),
            home_address: Set(self.home_address),
            role: Set(self.role),
            password: Set(password_hash),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub home_address: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl Validatable for UserUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(email) = &self.email {
            errors.check(validators::validate_email("email", email));
        }
        if let Some(password) = &self.password {
            errors.check(validators::validate_length(
                "password",
                password,
                Some(8),
                Some(72),
            ));
            if Some(password) != self.password_confirmation.as_ref() {
                errors.add(ValidationError::new(
                    "password_confirmation",
                    "Password confirmation does not match",
                ));
            }
        }
        errors.result()
    }
}

/// Merges everything except the password, which the service layer hashes
/// before setting.
impl MergeIntoActiveModel<ActiveModel> for UserUpdate {
    fn merge_into_activemodel(self, mut existing: ActiveModel) -> Result<ActiveModel, DbErr> {
        if let Some(value) = self.name {
            existing.name = Set(value);
        }
        if let Some(value) = self.phone_number {
            existing.phone_number = Set(value);
        }
        if let Some(value) = self.email {
            existing.email = Set(value);
        }
        if let Some(value) = self.home_address {
            existing.home_address = Set(value);
        }
        if let Some(value) = self.role {
            existing.role = Set(value);
        }
        existing.updated_at = Set(Utc::now());
        Ok(existing)
    }
}

impl CrudResource for Model {
    type Entity = Entity;
    type Column = Column;

    const RESOURCE_NAME_SINGULAR: &'static str = "user";
    const RESOURCE_NAME_PLURAL: &'static str = "users";
    const TABLE_NAME: &'static str = "users";

    fn id_column() -> Self::Column {
        Column::Nip
    }

    fn searchable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("nip", Column::Nip),
            ("name", Column::Name),
            ("email", Column::Email),
        ]
    }

    fn filterable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("nip", Column::Nip),
            ("role", Column::Role),
            ("created_at", Column::CreatedAt),
        ]
    }

    fn sortable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![
            ("nip", Column::Nip),
            ("name", Column::Name),
            ("email", Column::Email),
            ("created_at", Column::CreatedAt),
        ]
    }
}

impl SelectableResource for Model {
    const RESOURCE_KEY: &'static str = "user";

    fn fields(self) -> Vec<(&'static str, FieldValue)> {
        // the password hash is deliberately not part of the field set
        vec![
            ("nip", FieldValue::eager(&self.nip)),
            ("name", FieldValue::eager(&self.name)),
            ("phone_number", FieldValue::eager(&self.phone_number)),
            ("email", FieldValue::eager(&self.email)),
            ("home_address", FieldValue::eager(&self.home_address)),
            ("role", FieldValue::eager(self.role)),
            ("created_at", FieldValue::eager(self.created_at)),
            ("updated_at", FieldValue::eager(self.updated_at)),
        ]
    }
}
