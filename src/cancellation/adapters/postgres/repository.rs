//! `PostgreSQL` repository implementation for the canceled-request list.

use super::{models::CanceledRequestRow, schema::list_canceled};
use crate::cancellation::{
    domain::{
        ApplicationRef, CanceledRequest, CurrentDelegate, Delegation, DelegationPriority, Uid,
        UserRef, WorkflowRef,
    },
    ports::{
        CanceledRequestRepository, CanceledRequestRepositoryError,
        CanceledRequestRepositoryResult, CancellationListQuery, PurgeScope,
    },
};
use crate::db::PgPool;
use crate::pagination::Page;
use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sql_types::Bool;
use std::num::NonZeroU32;

type CanceledPredicate = Box<dyn BoxableExpression<list_canceled::table, Pg, SqlType = Bool>>;

/// `PostgreSQL`-backed canceled-request repository.
#[derive(Debug, Clone)]
pub struct PostgresCanceledRequestRepository {
    pool: PgPool,
}

impl PostgresCanceledRequestRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CanceledRequestRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CanceledRequestRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(CanceledRequestRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CanceledRequestRepositoryError::persistence)?
    }
}

#[async_trait]
impl CanceledRequestRepository for PostgresCanceledRequestRepository {
    async fn record(&self, request: &CanceledRequest) -> CanceledRequestRepositoryResult<()> {
        let app_uid = request.app_uid().clone();
        let row = request_to_row(request)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(list_canceled::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        CanceledRequestRepositoryError::DuplicateApplication(app_uid.clone())
                    }
                    _ => CanceledRequestRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_app_uid(
        &self,
        app_uid: &Uid,
    ) -> CanceledRequestRepositoryResult<Option<CanceledRequest>> {
        let key = app_uid.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = list_canceled::table
                .filter(list_canceled::app_uid.eq(&key))
                .select(CanceledRequestRow::as_select())
                .first::<CanceledRequestRow>(connection)
                .optional()
                .map_err(CanceledRequestRepositoryError::persistence)?;
            row.map(row_to_request).transpose()
        })
        .await
    }

    async fn list(
        &self,
        query: &CancellationListQuery,
    ) -> CanceledRequestRepositoryResult<Page<CanceledRequest>> {
        let user_uid = query.user_uid().map(|uid| uid.as_str().to_owned());
        let process_uid = query.process_uid().map(|uid| uid.as_str().to_owned());
        let page = query.page();
        let limit = i64::from(page.per_page());
        let offset =
            i64::try_from(page.offset()).map_err(CanceledRequestRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let total: i64 = list_canceled::table
                .filter(filter_predicate(user_uid.as_deref(), process_uid.as_deref()))
                .select(count_star())
                .first(connection)
                .map_err(CanceledRequestRepositoryError::persistence)?;

            let rows = list_canceled::table
                .filter(filter_predicate(user_uid.as_deref(), process_uid.as_deref()))
                .select(CanceledRequestRow::as_select())
                .order(list_canceled::app_canceled_date.desc())
                .then_order_by(list_canceled::app_uid.asc())
                .limit(limit)
                .offset(offset)
                .load::<CanceledRequestRow>(connection)
                .map_err(CanceledRequestRepositoryError::persistence)?;

            let items = rows
                .into_iter()
                .map(row_to_request)
                .collect::<CanceledRequestRepositoryResult<Vec<_>>>()?;
            let total_count = u64::try_from(total)
                .map_err(CanceledRequestRepositoryError::invalid_persisted_data)?;
            Ok(Page::new(items, total_count, page))
        })
        .await
    }

    async fn purge(&self, scope: &PurgeScope) -> CanceledRequestRepositoryResult<u64> {
        let process_uid = match scope {
            PurgeScope::All => None,
            PurgeScope::Process(uid) => Some(uid.as_str().to_owned()),
        };
        self.run_blocking(move |connection| {
            let removed = match process_uid {
                None => diesel::delete(list_canceled::table).execute(connection),
                Some(uid) => {
                    diesel::delete(list_canceled::table.filter(list_canceled::pro_uid.eq(uid)))
                        .execute(connection)
                }
            }
            .map_err(CanceledRequestRepositoryError::persistence)?;
            u64::try_from(removed).map_err(CanceledRequestRepositoryError::persistence)
        })
        .await
    }
}

fn filter_predicate(user_uid: Option<&str>, process_uid: Option<&str>) -> CanceledPredicate {
    let mut predicate: CanceledPredicate = Box::new(diesel::dsl::sql::<Bool>("TRUE"));
    if let Some(uid) = user_uid {
        predicate = Box::new(predicate.and(list_canceled::usr_uid.eq(uid.to_owned())));
    }
    if let Some(uid) = process_uid {
        predicate = Box::new(predicate.and(list_canceled::pro_uid.eq(uid.to_owned())));
    }
    predicate
}

fn to_column(value: u32) -> CanceledRequestRepositoryResult<i32> {
    i32::try_from(value).map_err(CanceledRequestRepositoryError::persistence)
}

fn from_column(value: i32) -> CanceledRequestRepositoryResult<u32> {
    u32::try_from(value).map_err(CanceledRequestRepositoryError::invalid_persisted_data)
}

fn non_zero_from_column(value: i32) -> CanceledRequestRepositoryResult<NonZeroU32> {
    NonZeroU32::try_from(from_column(value)?)
        .map_err(CanceledRequestRepositoryError::invalid_persisted_data)
}

fn uid_from_column(value: String) -> CanceledRequestRepositoryResult<Uid> {
    Uid::new(value).map_err(CanceledRequestRepositoryError::invalid_persisted_data)
}

fn request_to_row(
    request: &CanceledRequest,
) -> CanceledRequestRepositoryResult<CanceledRequestRow> {
    let CanceledRequest {
        application,
        process,
        task,
        user,
        delegation,
        canceled_at,
    } = request;

    Ok(CanceledRequestRow {
        app_uid: application.uid.as_str().to_owned(),
        usr_uid: user.uid.as_str().to_owned(),
        tas_uid: task.uid.as_str().to_owned(),
        pro_uid: process.uid.as_str().to_owned(),
        app_number: to_column(application.number.get())?,
        app_title: application.title.clone(),
        app_pro_title: process.title.clone(),
        app_tas_title: task.title.clone(),
        app_canceled_date: *canceled_at,
        del_index: to_column(delegation.index.get())?,
        del_previous_usr_uid: delegation
            .previous_user_uid
            .as_ref()
            .map_or_else(String::new, |uid| uid.as_str().to_owned()),
        del_current_usr_username: delegation.current_user.username.clone(),
        del_current_usr_firstname: delegation.current_user.first_name.clone(),
        del_current_usr_lastname: delegation.current_user.last_name.clone(),
        del_delegate_date: delegation.delegated_at,
        del_init_date: delegation.initiated_at,
        del_due_date: delegation.due_at,
        del_priority: delegation.priority.as_str().to_owned(),
        pro_id: to_column(process.id)?,
        usr_id: to_column(user.id)?,
        tas_id: to_column(task.id)?,
    })
}

fn row_to_request(row: CanceledRequestRow) -> CanceledRequestRepositoryResult<CanceledRequest> {
    let CanceledRequestRow {
        app_uid,
        usr_uid,
        tas_uid,
        pro_uid,
        app_number,
        app_title,
        app_pro_title,
        app_tas_title,
        app_canceled_date,
        del_index,
        del_previous_usr_uid,
        del_current_usr_username,
        del_current_usr_firstname,
        del_current_usr_lastname,
        del_delegate_date,
        del_init_date,
        del_due_date,
        del_priority,
        pro_id,
        usr_id,
        tas_id,
    } = row;

    let previous_user_uid = if del_previous_usr_uid.trim().is_empty() {
        None
    } else {
        Some(uid_from_column(del_previous_usr_uid)?)
    };
    let priority = DelegationPriority::try_from(del_priority.as_str())
        .map_err(CanceledRequestRepositoryError::invalid_persisted_data)?;

    Ok(CanceledRequest {
        application: ApplicationRef {
            uid: uid_from_column(app_uid)?,
            number: non_zero_from_column(app_number)?,
            title: app_title,
        },
        process: WorkflowRef {
            uid: uid_from_column(pro_uid)?,
            id: from_column(pro_id)?,
            title: app_pro_title,
        },
        task: WorkflowRef {
            uid: uid_from_column(tas_uid)?,
            id: from_column(tas_id)?,
            title: app_tas_title,
        },
        user: UserRef {
            uid: uid_from_column(usr_uid)?,
            id: from_column(usr_id)?,
        },
        delegation: Delegation {
            index: non_zero_from_column(del_index)?,
            previous_user_uid,
            current_user: CurrentDelegate {
                username: del_current_usr_username,
                first_name: del_current_usr_firstname,
                last_name: del_current_usr_lastname,
            },
            delegated_at: del_delegate_date,
            initiated_at: del_init_date,
            due_at: del_due_date,
            priority,
        },
        canceled_at: app_canceled_date,
    })
}
