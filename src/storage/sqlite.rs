//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::crawler::{CrawlOutcome, HeadingCounts};
use crate::state::CrawlStatus;
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{truncate_link_url, CrawlResultRecord, StoredLink, UrlRecord};
use crate::url::LinkKind;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

const URL_COLUMNS: &str = "id, url, status, error_message, created_at, updated_at";

const RESULT_COLUMNS: &str = "id, url_id, title, html_version, has_login_form,
     h1_count, h2_count, h3_count, h4_count, h5_count, h6_count,
     internal_links, external_links, broken_links, created_at";

/// SQLite storage backend
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Creates a new SqliteStorage instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStorage)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }
}

fn url_from_row(row: &Row<'_>) -> rusqlite::Result<UrlRecord> {
    Ok(UrlRecord {
        id: row.get(0)?,
        url: row.get(1)?,
        status: CrawlStatus::from_db_string(&row.get::<_, String>(2)?)
            .unwrap_or(CrawlStatus::Error),
        error_message: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn result_from_row(row: &Row<'_>) -> rusqlite::Result<CrawlResultRecord> {
    Ok(CrawlResultRecord {
        id: row.get(0)?,
        url_id: row.get(1)?,
        title: row.get(2)?,
        html_version: row.get(3)?,
        has_login_form: row.get(4)?,
        heading_counts: HeadingCounts::from_levels([
            row.get(5)?,
            row.get(6)?,
            row.get(7)?,
            row.get(8)?,
            row.get(9)?,
            row.get(10)?,
        ]),
        internal_links: row.get(11)?,
        external_links: row.get(12)?,
        broken_links: row.get(13)?,
        created_at: row.get(14)?,
    })
}

fn link_from_row(row: &Row<'_>) -> rusqlite::Result<StoredLink> {
    Ok(StoredLink {
        id: row.get(0)?,
        crawl_result_id: row.get(1)?,
        url: row.get(2)?,
        kind: LinkKind::from_db_string(&row.get::<_, String>(3)?).unwrap_or(LinkKind::External),
        status_code: row.get(4)?,
        is_broken: row.get(5)?,
    })
}

impl Storage for SqliteStorage {
    // ===== URL Records =====

    fn insert_url(&mut self, url: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO urls (url, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![url, CrawlStatus::Queued.to_db_string(), now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_url(&self, id: i64) -> StorageResult<UrlRecord> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM urls WHERE id = ?1", URL_COLUMNS),
                params![id],
                url_from_row,
            )
            .optional()?
            .ok_or(StorageError::UrlNotFound(id))
    }

    fn list_urls(&self) -> StorageResult<Vec<UrlRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM urls ORDER BY id", URL_COLUMNS))?;
        let urls = stmt
            .query_map([], url_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(urls)
    }

    fn update_url_status(
        &mut self,
        id: i64,
        status: CrawlStatus,
        error_message: Option<&str>,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE urls SET status = ?1, error_message = ?2, updated_at = ?3 WHERE id = ?4",
            params![status.to_db_string(), error_message, now, id],
        )?;

        if updated == 0 {
            return Err(StorageError::UrlNotFound(id));
        }
        Ok(())
    }

    // ===== Crawl Results =====

    fn save_crawl_outcome(&mut self, url_id: i64, outcome: &CrawlOutcome) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        let [h1, h2, h3, h4, h5, h6] = outcome.heading_counts.as_levels();

        let tx = self.conn.transaction()?;

        tx.execute(
            "INSERT INTO crawl_results (url_id, title, html_version, has_login_form,
             h1_count, h2_count, h3_count, h4_count, h5_count, h6_count,
             internal_links, external_links, broken_links, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                url_id,
                outcome.title,
                outcome.html_version.label(),
                outcome.has_login_form,
                h1,
                h2,
                h3,
                h4,
                h5,
                h6,
                outcome.internal_link_count as i64,
                outcome.external_link_count as i64,
                outcome.broken_link_count as i64,
                now,
            ],
        )?;
        let result_id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(
                "INSERT INTO links (crawl_result_id, url, link_type, status_code, is_broken, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for link in &outcome.links {
                stmt.execute(params![
                    result_id,
                    truncate_link_url(&link.url),
                    link.kind.to_db_string(),
                    link.status_code,
                    link.is_broken,
                    now,
                ])?;
            }
        }

        tx.commit()?;
        Ok(result_id)
    }

    fn latest_result(&self, url_id: i64) -> StorageResult<Option<CrawlResultRecord>> {
        let result = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM crawl_results WHERE url_id = ?1 ORDER BY id DESC LIMIT 1",
                    RESULT_COLUMNS
                ),
                params![url_id],
                result_from_row,
            )
            .optional()?;
        Ok(result)
    }

    fn get_links(&self, crawl_result_id: i64) -> StorageResult<Vec<StoredLink>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, crawl_result_id, url, link_type, status_code, is_broken
             FROM links WHERE crawl_result_id = ?1 ORDER BY id",
        )?;
        let links = stmt
            .query_map(params![crawl_result_id], link_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }

    // ===== Statistics =====

    fn count_urls_by_status(&self, status: CrawlStatus) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM urls WHERE status = ?1",
            params![status.to_db_string()],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    fn count_total_urls(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM urls", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn count_broken_links(&self) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(broken_links), 0) FROM crawl_results
             WHERE id IN (SELECT MAX(id) FROM crawl_results GROUP BY url_id)",
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
