// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message record CRUD operations.

use rusqlite::{params, params_from_iter, types::Value};

use wappdesk_core::types::MessageStatus;
use wappdesk_core::WappdeskError;

use crate::database::Database;
use crate::models::{MessageQuery, Page, WhatsAppMessage};
use crate::queries::parse_enum;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 500;

fn row_to_message(row: &rusqlite::Row<'_>) -> Result<WhatsAppMessage, rusqlite::Error> {
    Ok(WhatsAppMessage {
        id: row.get(0)?,
        phone: row.get(1)?,
        customer_id: row.get(2)?,
        customer_name: row.get(3)?,
        text: row.get(4)?,
        direction: parse_enum(5, row.get(5)?)?,
        status: parse_enum(6, row.get(6)?)?,
        related_service_call_id: row.get(7)?,
        created_at: row.get(8)?,
    })
}

const SELECT_COLUMNS: &str = "id, phone, customer_id, customer_name, message_text,
     direction, status, related_service_call_id, created_at";

/// Insert a new message record.
pub async fn insert_message(db: &Database, msg: &WhatsAppMessage) -> Result<(), WappdeskError> {
    let msg = msg.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO whatsapp_messages
                 (id, phone, customer_id, customer_name, message_text, direction,
                  status, related_service_call_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    msg.id,
                    msg.phone,
                    msg.customer_id,
                    msg.customer_name,
                    msg.text,
                    msg.direction.to_string(),
                    msg.status.to_string(),
                    msg.related_service_call_id,
                    msg.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Flip a message record's processing status.
pub async fn update_status(
    db: &Database,
    id: &str,
    status: MessageStatus,
) -> Result<(), WappdeskError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE whatsapp_messages SET status = ?1 WHERE id = ?2",
                params![status.to_string(), id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Paged message list, newest first, with optional filter/status/direction.
pub async fn list_messages(
    db: &Database,
    query: &MessageQuery,
) -> Result<Page<WhatsAppMessage>, WappdeskError> {
    let query = query.clone();
    db.connection()
        .call(move |conn| {
            let mut where_clauses: Vec<String> = Vec::new();
            let mut args: Vec<Value> = Vec::new();

            if let Some(filter) = query.filter.as_deref().filter(|f| !f.is_empty()) {
                let pattern = format!("%{filter}%");
                where_clauses.push(format!(
                    "(phone LIKE ?{n} OR customer_name LIKE ?{n} OR message_text LIKE ?{n})",
                    n = args.len() + 1
                ));
                args.push(Value::Text(pattern));
            }
            if let Some(status) = query.status {
                where_clauses.push(format!("status = ?{}", args.len() + 1));
                args.push(Value::Text(status.to_string()));
            }
            if let Some(direction) = query.direction {
                where_clauses.push(format!("direction = ?{}", args.len() + 1));
                args.push(Value::Text(direction.to_string()));
            }

            let where_sql = if where_clauses.is_empty() {
                String::new()
            } else {
                format!("WHERE {}", where_clauses.join(" AND "))
            };

            let total: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM whatsapp_messages {where_sql}"),
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
                "SELECT {SELECT_COLUMNS} FROM whatsapp_messages {where_sql}
                 ORDER BY created_at DESC LIMIT ?{} OFFSET ?{}",
                args.len() + 1,
                args.len() + 2
            );
            args.push(Value::Integer(page_size));
            args.push(Value::Integer(offset));

            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(args.iter()), row_to_message)?;
            let mut items = Vec::new();
            for row in rows {
                items.push(row?);
            }
            Ok(Page { items, total })
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use wappdesk_core::types::{Customer, MessageDirection};

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn insert_and_flip_status() {
        let (db, _dir) = setup_db().await;

        let customer = Customer::new("דנה", "0501234567");
        let msg = WhatsAppMessage::incoming("0501234567", "1", Some(&customer));
        insert_message(&db, &msg).await.unwrap();

        update_status(&db, &msg.id, MessageStatus::Processed)
            .await
            .unwrap();

        let page = list_messages(&db, &MessageQuery::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].status, MessageStatus::Processed);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_filters_by_text_and_status() {
        let (db, _dir) = setup_db().await;

        let m1 = WhatsAppMessage::incoming("0501234567", "מצלמה לא עובדת", None);
        let m2 = WhatsAppMessage::incoming("0509999999", "תקלה במעלית", None);
        insert_message(&db, &m1).await.unwrap();
        insert_message(&db, &m2).await.unwrap();
        update_status(&db, &m2.id, MessageStatus::Processed)
            .await
            .unwrap();

        let by_text = list_messages(
            &db,
            &MessageQuery {
                filter: Some("מצלמה".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_text.total, 1);
        assert_eq!(by_text.items[0].id, m1.id);

        let by_status = list_messages(
            &db,
            &MessageQuery {
                status: Some(MessageStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_status.total, 1);
        assert_eq!(by_status.items[0].id, m1.id);

        let by_direction = list_messages(
            &db,
            &MessageQuery {
                direction: Some(MessageDirection::Outgoing),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(by_direction.total, 0);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn list_pages_with_total() {
        let (db, _dir) = setup_db().await;

        for i in 0..5 {
            let mut msg = WhatsAppMessage::incoming("0501234567", format!("msg {i}"), None);
            msg.created_at = format!("2026-01-01T00:00:0{i}.000Z");
            insert_message(&db, &msg).await.unwrap();
        }

        let page = list_messages(
            &db,
            &MessageQuery {
                page: Some(2),
                page_size: Some(2),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items.len(), 2);
        // Newest first: page 2 holds msg 2 and msg 1.
        assert_eq!(page.items[0].text, "msg 2");
        assert_eq!(page.items[1].text, "msg 1");

        db.close().await.unwrap();
    }
}
