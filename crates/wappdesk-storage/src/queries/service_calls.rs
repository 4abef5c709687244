// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service-call operations.
//!
//! Call numbers are assigned by the database (AUTOINCREMENT rowid seeded at
//! 1000), never by callers.

use rusqlite::params;

use wappdesk_core::types::{new_id, now_rfc3339, ServiceCallStatus};
use wappdesk_core::WappdeskError;

use crate::database::Database;
use crate::models::{ServiceCall, ServiceCallDraft};
use crate::queries::parse_enum;

fn row_to_service_call(row: &rusqlite::Row<'_>) -> Result<ServiceCall, rusqlite::Error> {
    Ok(ServiceCall {
        call_number: row.get(0)?,
        id: row.get(1)?,
        customer_id: row.get(2)?,
        address: row.get(3)?,
        site: row.get(4)?,
        description: row.get(5)?,
        contact_name: row.get(6)?,
        contact_mobile: row.get(7)?,
        service_type: parse_enum(8, row.get(8)?)?,
        status: parse_enum(9, row.get(9)?)?,
        last_update_at: row.get(10)?,
        created_at: row.get(11)?,
    })
}

const SELECT_COLUMNS: &str = "call_number, id, customer_id, address, site, description,
     contact_name, contact_mobile, service_type, status, last_update_at, created_at";

/// Create a service call from the draft and return the stored record with its
/// database-assigned call number. Status starts as `open`.
pub async fn create_from_draft(
    db: &Database,
    draft: &ServiceCallDraft,
) -> Result<ServiceCall, WappdeskError> {
    let draft = draft.clone();
    db.connection()
        .call(move |conn| {
            let id = new_id();
            let now = now_rfc3339();
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO service_calls
                 (id, customer_id, address, site, description, contact_name,
                  contact_mobile, service_type, status, last_update_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    id,
                    draft.customer_id,
                    draft.address,
                    "",
                    draft.description,
                    draft.contact_name,
                    draft.contact_mobile,
                    draft.service_type.to_string(),
                    ServiceCallStatus::Open.to_string(),
                    now,
                    now,
                ],
            )?;
            let call_number = tx.last_insert_rowid();
            let call = tx.query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM service_calls WHERE call_number = ?1"),
                params![call_number],
                row_to_service_call,
            )?;
            tx.commit()?;
            Ok(call)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Open or in-progress service calls for a customer, newest first.
pub async fn open_for_customer(
    db: &Database,
    customer_id: &str,
    limit: Option<i64>,
) -> Result<Vec<ServiceCall>, WappdeskError> {
    let customer_id = customer_id.to_string();
    db.connection()
        .call(move |conn| {
            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM service_calls
                 WHERE customer_id = ?1 AND status IN ('open', 'in_progress')
                 ORDER BY created_at DESC, call_number DESC LIMIT ?2"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(
                params![customer_id, limit.unwrap_or(-1)],
                row_to_service_call,
            )?;
            let mut calls = Vec::new();
            for row in rows {
                calls.push(row?);
            }
            Ok(calls)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
