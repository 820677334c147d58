//! `PostgreSQL` repository implementation for the process catalogue.

use super::{
    models::{NewProcessRow, ProcessRow},
    schema::processes,
};
use crate::db::PgPool;
use crate::pagination::{Page, SortOrder, contains_pattern, folded_order_sql};
use crate::process::{
    domain::{PersistedProcessData, Process, ProcessId, ProcessName, ProcessSortField},
    ports::{ProcessListQuery, ProcessRepository, ProcessRepositoryError, ProcessRepositoryResult},
};
use async_trait::async_trait;
use diesel::dsl::{count_star, sql};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::{Bool, Text};

type ProcessPredicate = Box<dyn BoxableExpression<processes::table, Pg, SqlType = Bool>>;

/// `PostgreSQL`-backed process repository.
#[derive(Debug, Clone)]
pub struct PostgresProcessRepository {
    pool: PgPool,
}

impl PostgresProcessRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProcessRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProcessRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProcessRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProcessRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProcessRepository for PostgresProcessRepository {
    async fn insert(&self, process: &Process) -> ProcessRepositoryResult<()> {
        let process_id = process.id();
        let process_name = process.name().clone();
        let new_row = NewProcessRow {
            id: process.id().into_inner(),
            name: process.name().as_str().to_owned(),
            description: process.description().map(str::to_owned),
            created_at: process.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(processes::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if info.constraint_name() == Some("idx_processes_name") =>
                    {
                        ProcessRepositoryError::DuplicateProcessName(process_name.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProcessRepositoryError::DuplicateProcess(process_id)
                    }
                    _ => ProcessRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProcessId) -> ProcessRepositoryResult<Option<Process>> {
        self.run_blocking(move |connection| {
            let row = processes::table
                .filter(processes::id.eq(id.into_inner()))
                .select(ProcessRow::as_select())
                .first::<ProcessRow>(connection)
                .optional()
                .map_err(ProcessRepositoryError::persistence)?;
            row.map(row_to_process).transpose()
        })
        .await
    }

    async fn find_by_name(&self, name: &ProcessName) -> ProcessRepositoryResult<Option<Process>> {
        let name_str = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = processes::table
                .filter(processes::name.eq(&name_str))
                .select(ProcessRow::as_select())
                .first::<ProcessRow>(connection)
                .optional()
                .map_err(ProcessRepositoryError::persistence)?;
            row.map(row_to_process).transpose()
        })
        .await
    }

    async fn list(&self, query: &ProcessListQuery) -> ProcessRepositoryResult<Page<Process>> {
        let pattern = query.filter().map(contains_pattern);
        let sort = query.sort();
        let page = query.page();
        let limit = i64::from(page.per_page());
        let offset = i64::try_from(page.offset()).map_err(ProcessRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let total: i64 = processes::table
                .filter(filter_predicate(pattern.as_deref()))
                .select(count_star())
                .first(connection)
                .map_err(ProcessRepositoryError::persistence)?;

            let mut select = processes::table
                .filter(filter_predicate(pattern.as_deref()))
                .select(ProcessRow::as_select())
                .into_boxed();
            select = match (sort.field(), sort.order()) {
                (ProcessSortField::Name, order) => {
                    select.order(sql::<Text>(&folded_order_sql("name", order)))
                }
                (ProcessSortField::CreatedAt, SortOrder::Asc) => {
                    select.order(processes::created_at.asc())
                }
                (ProcessSortField::CreatedAt, SortOrder::Desc) => {
                    select.order(processes::created_at.desc())
                }
            };
            let rows = select
                .then_order_by(processes::id.asc())
                .limit(limit)
                .offset(offset)
                .load::<ProcessRow>(connection)
                .map_err(ProcessRepositoryError::persistence)?;

            let items = rows
                .into_iter()
                .map(row_to_process)
                .collect::<ProcessRepositoryResult<Vec<_>>>()?;
            let total =
                u64::try_from(total).map_err(ProcessRepositoryError::invalid_persisted_data)?;
            Ok(Page::new(items, total, page))
        })
        .await
    }
}

fn filter_predicate(pattern: Option<&str>) -> ProcessPredicate {
    match pattern {
        None => Box::new(diesel::dsl::sql::<Bool>("TRUE")),
        Some(pattern) => Box::new(
            processes::name
                .ilike(pattern.to_owned())
                .or(processes::description.ilike(pattern.to_owned()).assume_not_null()),
        ),
    }
}

fn row_to_process(row: ProcessRow) -> ProcessRepositoryResult<Process> {
    let ProcessRow {
        id,
        name,
        description,
        created_at,
    } = row;

    let parsed_name =
        ProcessName::new(name).map_err(ProcessRepositoryError::invalid_persisted_data)?;
    Ok(Process::from_persisted(PersistedProcessData {
        id: ProcessId::from_uuid(id),
        name: parsed_name,
        description,
        created_at,
    }))
}
