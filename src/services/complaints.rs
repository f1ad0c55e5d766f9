use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, Set,
};

use crate::core::traits::{CrudResource, MergeIntoActiveModel};
use crate::entities::{complaint, complaint_evidence};
use crate::errors::ApiError;
use crate::validation::Validatable;

/// Render the human-readable complaint number for a row.
///
/// Format is the creation date plus the zero-padded row id. Ids wider than
/// four digits keep their natural width.
#[must_use]
pub fn complaint_number(date: NaiveDate, id: i32) -> String {
    format!("{}-{id:04}", date.format("%Y%m%d"))
}

/// Assign the complaint number after first persistence. A no-op when the
/// number is already set, so the update below can never re-trigger it.
async fn assign_complaint_number(
    db: &DatabaseConnection,
    model: complaint::Model,
) -> Result<complaint::Model, ApiError> {
    if model.complaint_number.is_some() {
        return Ok(model);
    }
    let number = complaint_number(model.created_at.date_naive(), model.id);
    let update = complaint::ActiveModel {
        id: ActiveValue::Unchanged(model.id),
        complaint_number: Set(Some(number)),
        ..Default::default()
    };
    Ok(update.update(db).await?)
}

/// Create a complaint from a public submission or staff entry.
///
/// # Errors
///
/// Returns a 422 on validation failure, otherwise database errors.
pub async fn create(
    db: &DatabaseConnection,
    payload: complaint::ComplaintCreate,
) -> Result<complaint::Model, ApiError> {
    payload.validate()?;
    let active: complaint::ActiveModel = payload.into();
    let model = active.insert(db).await?;
    let model = assign_complaint_number(db, model).await?;
    tracing::info!(
        id = model.id,
        number = model.complaint_number.as_deref().unwrap_or_default(),
        "Complaint filed"
    );
    Ok(model)
}

/// Apply a staff update to a complaint. The complaint number is immutable.
///
/// # Errors
///
/// Returns a 404 for unknown ids, otherwise database errors.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: complaint::ComplaintUpdate,
) -> Result<complaint::Model, ApiError> {
    let model = complaint::Model::get_one(db, id).await?;
    let existing = model.into_active_model();
    let merged = payload.merge_into_activemodel(existing)?;
    Ok(merged.update(db).await?)
}

/// Delete a complaint and its evidence rows.
///
/// The schema does not cascade; evidence is removed explicitly first.
///
/// # Errors
///
/// Returns a 404 for unknown ids, otherwise database errors.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let model = complaint::Model::get_one(db, id).await?;
    complaint_evidence::Entity::delete_many()
        .filter(complaint_evidence::Column::ComplaintId.eq(id))
        .exec(db)
        .await?;
    model.delete(db).await?;
    Ok(())
}

/// Attach an evidence record to an existing complaint.
///
/// # Errors
///
/// Returns a 404 when the complaint does not exist and a 422 on validation
/// failure.
pub async fn attach_evidence(
    db: &DatabaseConnection,
    complaint_id: i32,
    payload: complaint_evidence::EvidenceCreate,
) -> Result<complaint_evidence::Model, ApiError> {
    // 404 before 422 so probing an unknown id does not leak field errors
    let complaint = complaint::Model::get_one(db, complaint_id).await?;
    payload.validate()?;
    let active = payload.into_active_model(complaint.id);
    Ok(active.insert(db).await?)
}

/// Apply an update to an evidence record. `file_type`, once inferred or
/// set, is retained even when the path changes.
///
/// # Errors
///
/// Returns a 404 for unknown ids, otherwise database errors.
pub async fn update_evidence(
    db: &DatabaseConnection,
    id: i32,
    payload: complaint_evidence::EvidenceUpdate,
) -> Result<complaint_evidence::Model, ApiError> {
    let model = complaint_evidence::Model::get_one(db, id).await?;
    let existing = model.into_active_model();
    let merged = payload.merge_into_activemodel(existing)?;
    Ok(merged.update(db).await?)
}
