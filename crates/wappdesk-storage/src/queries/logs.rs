// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only log operations.
//!
//! There is intentionally no update or delete here: log rows are immutable
//! once written.

use rusqlite::{params, params_from_iter, types::Value};

use wappdesk_core::WappdeskError;

use crate::database::Database;
use crate::models::{LogQuery, Page, WhatsAppLog};
use crate::queries::parse_enum;

const DEFAULT_PAGE_SIZE: i64 = 100;
const MAX_PAGE_SIZE: i64 = 500;

fn row_to_log(row: &rusqlite::Row<'_>) -> Result<WhatsAppLog, rusqlite::Error> {
    Ok(WhatsAppLog {
        id: row.get(0)?,
        phone: row.get(1)?,
        customer_id: row.get(2)?,
        kind: parse_enum(3, row.get(3)?)?,
        details: row.get(4)?,
        related_message_id: row.get(5)?,
        related_service_call_id: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const SELECT_COLUMNS: &str =
    "id, phone, customer_id, kind, details, related_message_id, related_service_call_id, created_at";

/// Append one log event.
pub async fn insert_log(db: &Database, entry: &WhatsAppLog) -> Result<(), WappdeskError> {
    let entry = entry.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO whatsapp_logs
                 (id, phone, customer_id, kind, details, related_message_id,
                  related_service_call_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entry.id,
                    entry.phone,
                    entry.customer_id,
                    entry.kind.to_string(),
                    entry.details,
                    entry.related_message_id,
                    entry.related_service_call_id,
                    entry.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Paged log list, newest first, with optional filter/kind.
pub async fn list_logs(db: &Database, query: &LogQuery) -> Result<Page<WhatsAppLog>, WappdeskError> {
    let query = query.clone();
    db.connection()
        .call(move |conn| {
            let mut where_clauses: Vec<String> = Vec::new();
            let mut args: Vec<Value> = Vec::new();

            if let Some(filter) = query.filter.as_deref().filter(|f| !f.is_empty()) {
                let pattern = format!("%{filter}%");
                where_clauses.push(format!(
                    "(phone LIKE ?{n} OR details LIKE ?{n})",
                    n = args.len() + 1
                ));
                args.push(Value::Text(pattern));
            }
            if let Some(kind) = query.kind {
                where_clauses.push(format!("kind = ?{}", args.len() + 1));
                args.push(Value::Text(kind.to_string()));
            }

            let where_sql = if where_clauses.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", where_clauses.join(" AND "))
            };

            let total: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM whatsapp_logs {where_sql}"),
                params_from_iter(args.iter()),
                |row| row.get(0),
            )?;

            let page_size = query
                .page_size
                .unwrap_or(DEFAULT_PAGE_SIZE)
                .clamp(1, MAX_PAGE_SIZE);
            let page = query.page.unwrap_or(1).max(1);
            let offset = (page - 1) * page_size;

            let sql = format!(
                "SELECT {SELECT_COLUMNS} FROM whatsapp_logs {where_sql}
                 ORDER BY created_at DESC LIMIT ?{} OFFSET ?{}",
                args.len() + 1,
                args.len() + 2
            );
            args.push(Value::Integer(page_size));
            args.push(Value::Integer(offset));

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(args.iter()), row_to_log)?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(Page { items, total })
        })
        .await
        .map_err(crate::database::map_tr_err)
}
