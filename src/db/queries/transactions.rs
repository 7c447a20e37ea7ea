use crate::models::Transaction;
use rusqlite::{params, Connection, Row};
use tracing::{debug, info};

const SELECT_COLUMNS: &str =
    "SELECT id, title, price, description, category, image, sold, date_of_sale FROM transactions";

fn row_to_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        image: row.get(5)?,
        sold: row.get(6)?,
        date_of_sale: row.get(7)?,
    })
}

/// Transactions sold in `month` (1-12) in insertion order, optionally windowed.
pub fn list_for_month(
    conn: &Connection,
    month: u32,
    limit: Option<i64>,
    offset: Option<i64>,
) -> rusqlite::Result<Vec<Transaction>> {
    let mut sql = format!("{} WHERE sale_month = ? ORDER BY rowid", SELECT_COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(month)];

    if limit.is_some() || offset.is_some() {
        // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded
        sql.push_str(" LIMIT ? OFFSET ?");
        params_vec.push(Box::new(limit.unwrap_or(-1)));
        params_vec.push(Box::new(offset.unwrap_or(0).max(0)));
    }

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let transactions = stmt
        .query_map(params_refs.as_slice(), row_to_transaction)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(month, count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

pub fn count_for_month(conn: &Connection, month: u32) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE sale_month = ?",
        [month],
        |row| row.get(0),
    )
}

/// Delete every transaction and insert `transactions` in their place.
///
/// Runs in one SQL transaction: a failed insert leaves the previous contents.
pub fn replace_all(conn: &mut Connection, transactions: &[Transaction]) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;

    let deleted = tx.execute("DELETE FROM transactions", [])?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO transactions
                (id, title, price, description, category, image, sold, date_of_sale, sale_month)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )?;
        for t in transactions {
            stmt.execute(params![
                t.id,
                t.title,
                t.price,
                t.description,
                t.category,
                t.image,
                t.sold,
                t.date_of_sale,
                t.sale_month(),
            ])?;
        }
    }

    tx.commit()?;
    info!(
        deleted,
        inserted = transactions.len(),
        "Replaced all transactions"
    );
    Ok(transactions.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use chrono::{TimeZone, Utc};

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn transaction(id: i64, month: u32) -> Transaction {
        Transaction {
            id,
            title: format!("Item {}", id),
            price: 10.0 * id as f64,
            description: "desc".into(),
            category: "electronics".into(),
            image: String::new(),
            sold: id % 2 == 0,
            date_of_sale: Utc.with_ymd_and_hms(2021, month, 5, 8, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_replace_and_list_round_trip() {
        let mut conn = setup();
        let items = vec![transaction(1, 3), transaction(2, 3), transaction(3, 4)];
        assert_eq!(replace_all(&mut conn, &items).unwrap(), 3);

        let march = list_for_month(&conn, 3, None, None).unwrap();
        assert_eq!(march, items[..2].to_vec());
        assert_eq!(count_for_month(&conn, 3).unwrap(), 2);
        assert_eq!(count_for_month(&conn, 4).unwrap(), 1);
    }

    #[test]
    fn test_replace_discards_previous_rows() {
        let mut conn = setup();
        replace_all(&mut conn, &[transaction(1, 3), transaction(2, 3)]).unwrap();
        replace_all(&mut conn, &[transaction(9, 3)]).unwrap();

        let march = list_for_month(&conn, 3, None, None).unwrap();
        assert_eq!(march.len(), 1);
        assert_eq!(march[0].id, 9);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let mut conn = setup();
        replace_all(&mut conn, &[transaction(1, 3), transaction(1, 3)]).unwrap();
        assert_eq!(count_for_month(&conn, 3).unwrap(), 2);
    }

    #[test]
    fn test_window_keeps_insertion_order() {
        let mut conn = setup();
        let items: Vec<Transaction> = [5, 3, 8, 1, 7].iter().map(|&id| transaction(id, 6)).collect();
        replace_all(&mut conn, &items).unwrap();

        let page: Vec<i64> = list_for_month(&conn, 6, Some(2), Some(1))
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(page, vec![3, 8]);

        let tail: Vec<i64> = list_for_month(&conn, 6, None, Some(3))
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(tail, vec![1, 7]);
    }
}
