// SPDX-FileCopyrightText: 2026 Wappdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Customer CRUD operations.

use rusqlite::params;

use wappdesk_core::WappdeskError;

use crate::database::Database;
use crate::models::Customer;

fn row_to_customer(row: &rusqlite::Row<'_>) -> Result<Customer, rusqlite::Error> {
    Ok(Customer {
        id: row.get(0)?,
        name: row.get(1)?,
        mobile: row.get(2)?,
        email: row.get(3)?,
        address: row.get(4)?,
        created_at: row.get(5)?,
    })
}

/// Insert a new customer.
pub async fn insert_customer(db: &Database, customer: &Customer) -> Result<(), WappdeskError> {
    let customer = customer.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO customers (id, name, mobile, email, address, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    customer.id,
                    customer.name,
                    customer.mobile,
                    customer.email,
                    customer.address,
                    customer.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Find a customer by local-form mobile phone. Returns the oldest match when
/// several exist.
pub async fn find_by_phone(db: &Database, phone: &str) -> Result<Option<Customer>, WappdeskError> {
    let phone = phone.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, mobile, email, address, created_at
                 FROM customers WHERE mobile = ?1
                 ORDER BY created_at ASC LIMIT 1",
            )?;
            let mut rows = stmt.query_map(params![phone], |row| row_to_customer(row))?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
