//! `PostgreSQL` repository implementation for scripts.

use super::{
    models::{NewScriptRow, ScriptChangesetRow, ScriptRow},
    schema::scripts,
};
use crate::db::PgPool;
use crate::pagination::{Page, SortOrder, contains_pattern, folded_order_sql};
use crate::process::domain::ProcessId;
use crate::script::{
    domain::{
        PersistedScriptData, Script, ScriptDescription, ScriptId, ScriptLanguage, ScriptSortField,
        ScriptTitle,
    },
    ports::{ScriptListQuery, ScriptRepository, ScriptRepositoryError, ScriptRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::sql;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Bool, Text};

type ScriptPredicate = Box<dyn BoxableExpression<scripts::table, Pg, SqlType = Bool>>;

/// Name of the unique index enforcing title uniqueness.
const TITLE_INDEX: &str = "idx_scripts_title";

/// `PostgreSQL`-backed script repository.
#[derive(Debug, Clone)]
pub struct PostgresScriptRepository {
    pool: PgPool,
}

impl PostgresScriptRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ScriptRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ScriptRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ScriptRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ScriptRepositoryError::persistence)?
    }
}

#[async_trait]
impl ScriptRepository for PostgresScriptRepository {
    async fn insert(&self, script: &Script) -> ScriptRepositoryResult<()> {
        let script_id = script.id();
        let title = script.title().clone();
        let new_row = NewScriptRow {
            id: script.id().into_inner(),
            process_id: script.process_id().into_inner(),
            title: script.title().as_str().to_owned(),
            description: script.description().as_str().to_owned(),
            language: script.language().as_str().to_owned(),
            code: script.code().to_owned(),
            created_at: script.created_at(),
            updated_at: script.updated_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(scripts::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some(TITLE_INDEX) =>
                    {
                        ScriptRepositoryError::DuplicateTitle(title.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ScriptRepositoryError::DuplicateScript(script_id)
                    }
                    _ => ScriptRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, script: &Script) -> ScriptRepositoryResult<()> {
        let script_id = script.id();
        let title = script.title().clone();
        let changes = ScriptChangesetRow {
            title: script.title().as_str().to_owned(),
            description: script.description().as_str().to_owned(),
            language: script.language().as_str().to_owned(),
            code: script.code().to_owned(),
            updated_at: script.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated_count =
                diesel::update(scripts::table.filter(scripts::id.eq(script_id.into_inner())))
                    .set(&changes)
                    .execute(connection)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                            if info.constraint_name() == Some(TITLE_INDEX) =>
                        {
                            ScriptRepositoryError::DuplicateTitle(title.clone())
                        }
                        _ => ScriptRepositoryError::persistence(err),
                    })?;

            if updated_count == 0 {
                return Err(ScriptRepositoryError::NotFound(script_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ScriptId) -> ScriptRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(scripts::table.filter(scripts::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(ScriptRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(ScriptRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ScriptId) -> ScriptRepositoryResult<Option<Script>> {
        self.run_blocking(move |connection| {
            let row = scripts::table
                .filter(scripts::id.eq(id.into_inner()))
                .select(ScriptRow::as_select())
                .first::<ScriptRow>(connection)
                .optional()
                .map_err(ScriptRepositoryError::persistence)?;
            row.map(row_to_script).transpose()
        })
        .await
    }

    async fn find_by_title(&self, title: &ScriptTitle) -> ScriptRepositoryResult<Option<Script>> {
        let title_str = title.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = scripts::table
                .filter(scripts::title.eq(&title_str))
                .select(ScriptRow::as_select())
                .first::<ScriptRow>(connection)
                .optional()
                .map_err(ScriptRepositoryError::persistence)?;
            row.map(row_to_script).transpose()
        })
        .await
    }

    async fn list_for_process(
        &self,
        process_id: ProcessId,
        query: &ScriptListQuery,
    ) -> ScriptRepositoryResult<Page<Script>> {
        let process_uuid = process_id.into_inner();
        let pattern = query.filter().map(contains_pattern);
        let sort = query.sort();
        let page = query.page();
        let limit = i64::from(page.per_page());
        let offset = i64::try_from(page.offset()).map_err(ScriptRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let total: i64 = scripts::table
                .filter(scope_predicate(process_uuid, pattern.as_deref()))
                .count()
                .get_result(connection)
                .map_err(ScriptRepositoryError::persistence)?;

            let filtered = scripts::table
                .filter(scope_predicate(process_uuid, pattern.as_deref()))
                .select(ScriptRow::as_select())
                .into_boxed();
            let select = match (sort.field(), sort.order()) {
                (ScriptSortField::Title, order) => {
                    filtered.order(sql::<Text>(&folded_order_sql("title", order)))
                }
                (ScriptSortField::Description, order) => {
                    filtered.order(sql::<Text>(&folded_order_sql("description", order)))
                }
                (ScriptSortField::Language, SortOrder::Asc) => {
                    filtered.order(scripts::language.asc())
                }
                (ScriptSortField::Language, SortOrder::Desc) => {
                    filtered.order(scripts::language.desc())
                }
                (ScriptSortField::CreatedAt, SortOrder::Asc) => {
                    filtered.order(scripts::created_at.asc())
                }
                (ScriptSortField::CreatedAt, SortOrder::Desc) => {
                    filtered.order(scripts::created_at.desc())
                }
                (ScriptSortField::UpdatedAt, SortOrder::Asc) => {
                    filtered.order(scripts::updated_at.asc())
                }
                (ScriptSortField::UpdatedAt, SortOrder::Desc) => {
                    filtered.order(scripts::updated_at.desc())
                }
            };

            let rows = select
                .then_order_by(scripts::id.asc())
                .limit(limit)
                .offset(offset)
                .load::<ScriptRow>(connection)
                .map_err(ScriptRepositoryError::persistence)?;

            let items = rows
                .into_iter()
                .map(row_to_script)
                .collect::<ScriptRepositoryResult<Vec<_>>>()?;
            let total =
                u64::try_from(total).map_err(ScriptRepositoryError::invalid_persisted_data)?;
            Ok(Page::new(items, total, page))
        })
        .await
    }
}

fn scope_predicate(process_uuid: uuid::Uuid, pattern: Option<&str>) -> ScriptPredicate {
    let scoped = scripts::process_id.eq(process_uuid);
    match pattern {
        None => Box::new(scoped),
        Some(pattern) => Box::new(
            scoped.and(
                scripts::title
                    .ilike(pattern.to_owned())
                    .or(scripts::description.ilike(pattern.to_owned()))
                    .or(scripts::language.ilike(pattern.to_owned())),
            ),
        ),
    }
}

fn row_to_script(row: ScriptRow) -> ScriptRepositoryResult<Script> {
    let ScriptRow {
        id,
        process_id,
        title,
        description,
        language,
        code,
        created_at,
        updated_at,
    } = row;

    let data = PersistedScriptData {
        id: ScriptId::from_uuid(id),
        process_id: ProcessId::from_uuid(process_id),
        title: ScriptTitle::new(title).map_err(ScriptRepositoryError::invalid_persisted_data)?,
        description: ScriptDescription::new(description)
            .map_err(ScriptRepositoryError::invalid_persisted_data)?,
        language: ScriptLanguage::try_from(language.as_str())
            .map_err(ScriptRepositoryError::invalid_persisted_data)?,
        code,
        created_at,
        updated_at,
    };
    Ok(Script::from_persisted(data))
}
