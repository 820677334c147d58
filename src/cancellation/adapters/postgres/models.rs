//! Diesel row model for canceled-request persistence.

use super::schema::list_canceled;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for `list_canceled`.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = list_canceled)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CanceledRequestRow {
    pub app_uid: String,
    pub usr_uid: String,
    pub tas_uid: String,
    pub pro_uid: String,
    pub app_number: i32,
    pub app_title: String,
    pub app_pro_title: String,
    pub app_tas_title: String,
    pub app_canceled_date: Option<DateTime<Utc>>,
    pub del_index: i32,
    pub del_previous_usr_uid: String,
    pub del_current_usr_username: String,
    pub del_current_usr_firstname: String,
    pub del_current_usr_lastname: String,
    pub del_delegate_date: DateTime<Utc>,
    pub del_init_date: Option<DateTime<Utc>>,
    pub del_due_date: Option<DateTime<Utc>>,
    pub del_priority: String,
    pub pro_id: i32,
    pub usr_id: i32,
    pub tas_id: i32,
}
