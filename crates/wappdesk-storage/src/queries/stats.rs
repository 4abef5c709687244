// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dashboard counters for the admin API.

use rusqlite::params;

use wappdesk_core::WappdeskError;

use crate::database::Database;
use crate::models::DashboardStats;

/// Compute the dashboard counters in one round trip.
///
/// "Today" is the UTC day boundary; timestamps are stored in sortable RFC 3339
/// form so a string comparison suffices.
pub async fn dashboard_stats(db: &Database) -> Result<DashboardStats, WappdeskError> {
    db.connection()
        .call(|conn| {
            let midnight: String =
                conn.query_row("SELECT strftime('%Y-%m-%dT00:00:00.000Z', 'now')", [], |row| {
                    row.get(0)
                })?;

            let pending_messages: i64 = conn.query_row(
                "SELECT COUNT(*) FROM whatsapp_messages WHERE status = 'pending'",
                [],
                |row| row.get(0),
            )?;
            let open_service_calls: i64 = conn.query_row(
                "SELECT COUNT(*) FROM service_calls WHERE status IN ('open', 'in_progress')",
                [],
                |row| row.get(0),
            )?;
            let today_messages: i64 = conn.query_row(
                "SELECT COUNT(*) FROM whatsapp_messages WHERE created_at >= ?1",
                params![midnight],
                |row| row.get(0),
            )?;
            let today_service_calls: i64 = conn.query_row(
                "SELECT COUNT(*) FROM service_calls WHERE created_at >= ?1",
                params![midnight],
                |row| row.get(0),
            )?;

            Ok(DashboardStats {
                pending_messages,
                open_service_calls,
                today_messages,
                today_service_calls,
            })
        })
        .await
        .map_err(crate::database::map_tr_err)
}
