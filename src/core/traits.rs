use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    PrimaryKeyTrait, QueryFilter, QuerySelect, Select,
};

use crate::filtering::{
    RelationFilterBinding, apply_column_filters, apply_relation_filters, apply_sorting,
    parse_column_filters, parse_pagination, parse_relation_filters, parse_sorting,
    search_condition, SortContext,
};
use crate::models::ListParams;
use crate::relations::RelationRegistry;

/// Merge an update payload into an existing active model.
pub trait MergeIntoActiveModel<ActiveModelType> {
    /// Merge this update into `existing`, leaving absent fields untouched.
    ///
    /// # Errors
    ///
    /// Returns a `DbErr` if a value cannot be converted.
    fn merge_into_activemodel(self, existing: ActiveModelType) -> Result<ActiveModelType, DbErr>;
}

/// A queryable resource wired into the shared list pipeline.
///
/// Implementors declare their allow-lists (searchable, filterable and
/// sortable columns) plus relation filter bindings; the pipeline composes
/// free-text search, relation-array filters, column filters and sorting in
/// that order, then paginates.
#[async_trait]
pub trait CrudResource: Send + Sync
where
    <Self::Entity as EntityTrait>::Model: Send + Sync,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType: Send + Clone,
{
    type Entity: EntityTrait;
    type Column: ColumnTrait + Copy;

    const RESOURCE_NAME_SINGULAR: &'static str;
    const RESOURCE_NAME_PLURAL: &'static str;
    const TABLE_NAME: &'static str;

    fn id_column() -> Self::Column;

    #[must_use]
    fn default_sort_column() -> Self::Column {
        Self::id_column()
    }

    /// Columns reachable by the free-text `search` parameter.
    #[must_use]
    fn searchable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![]
    }

    /// Columns reachable by `column_filters`.
    #[must_use]
    fn filterable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![]
    }

    /// Columns reachable by `sort_by`.
    #[must_use]
    fn sortable_columns() -> Vec<(&'static str, Self::Column)> {
        vec![("id", Self::id_column())]
    }

    /// Logical relation-filter keys this resource exposes.
    #[must_use]
    fn relation_filter_bindings() -> Vec<RelationFilterBinding> {
        vec![]
    }

    #[must_use]
    fn relation_registry() -> &'static RelationRegistry {
        &crate::entities::RELATIONS
    }

    /// Build the filtered, sorted list query for a request.
    #[must_use]
    fn list_query(params: &ListParams) -> Select<Self::Entity> {
        let mut condition = Condition::all();

        if let Some(term) = params.search.as_deref()
            && let Some(search) = search_condition(term, &Self::searchable_columns())
        {
            condition = condition.add(search);
        }

        let relation_filters = parse_relation_filters(params.relations_array_filters.as_deref());
        condition = apply_relation_filters(
            condition,
            &relation_filters,
            &Self::relation_filter_bindings(),
            Self::TABLE_NAME,
            Self::relation_registry(),
        );

        let column_filters = parse_column_filters(params.column_filters.as_deref());
        condition = apply_column_filters(condition, &column_filters, &Self::filterable_columns());

        let query = Self::Entity::find().filter(condition);
        apply_sorting(
            query,
            &parse_sorting(params),
            &SortContext {
                table: Self::TABLE_NAME,
                sortable: &Self::sortable_columns(),
                default_column: Self::default_sort_column(),
                registry: Self::relation_registry(),
            },
        )
    }

    /// Run the list pipeline and return the page plus the total row count
    /// for the filtered set.
    async fn find_page(
        db: &DatabaseConnection,
        params: &ListParams,
    ) -> Result<(Vec<<Self::Entity as EntityTrait>::Model>, u64), DbErr> {
        let query = Self::list_query(params);
        let total = PaginatorTrait::count(query.clone(), db).await?;
        let models = match parse_pagination(params) {
            Some((offset, limit)) => query.offset(offset).limit(limit).all(db).await?,
            None => query.all(db).await?,
        };
        Ok((models, total))
    }

    async fn get_one(
        db: &DatabaseConnection,
        id: <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<<Self::Entity as EntityTrait>::Model, DbErr> {
        Self::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound(format!(
                "{} not found",
                Self::RESOURCE_NAME_SINGULAR
            )))
    }

    async fn delete(
        db: &DatabaseConnection,
        id: <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<(), DbErr> {
        let res = Self::Entity::delete_by_id(id).exec(db).await?;
        match res.rows_affected {
            0 => Err(DbErr::RecordNotFound(format!(
                "{} not found",
                Self::RESOURCE_NAME_SINGULAR
            ))),
            _ => Ok(()),
        }
    }
}
