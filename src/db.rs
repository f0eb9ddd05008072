use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

use crate::faq::{Category, CreateFaq, Faq, LocalizedText, Metadata};

const FAQ_COLUMNS: &str = "id, question_en, question_hi, question_bn, \
     answer_en, answer_hi, answer_bn, category, sort_order, is_active, \
     created_by, last_updated_by, created_at, updated_at";

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Initialize database connection and create tables
    pub fn new(database_path: &str) -> Result<Self> {
        let conn = Connection::open(database_path)
            .context(format!("Failed to open database at {}", database_path))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS faqs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                question_en TEXT NOT NULL,
                question_hi TEXT,
                question_bn TEXT,
                answer_en TEXT NOT NULL,
                answer_hi TEXT,
                answer_bn TEXT,
                category TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_by TEXT NOT NULL,
                last_updated_by TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create faqs table")?;

        // Covering index for the listing query
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_faqs_listing
             ON faqs (is_active, category, sort_order)",
            [],
        )
        .context("Failed to create listing index")?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert a new record. Timestamps and the identifier are assigned here.
    pub fn insert(&self, input: &CreateFaq, translations: &FaqTranslations, created_by: &str) -> Result<Faq> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO faqs (question_en, question_hi, question_bn,
                               answer_en, answer_hi, answer_bn,
                               category, sort_order, is_active,
                               created_by, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9, ?10, ?10)",
            params![
                input.question,
                translations.question_hi,
                translations.question_bn,
                input.answer,
                translations.answer_hi,
                translations.answer_bn,
                input.category.as_str(),
                input.order,
                created_by,
                now.to_rfc3339(),
            ],
        )
        .context("Failed to insert FAQ")?;

        let id = conn.last_insert_rowid();

        Ok(Faq {
            id,
            question: LocalizedText {
                en: input.question.clone(),
                hi: Some(translations.question_hi.clone()),
                bn: Some(translations.question_bn.clone()),
            },
            answer: LocalizedText {
                en: input.answer.clone(),
                hi: Some(translations.answer_hi.clone()),
                bn: Some(translations.answer_bn.clone()),
            },
            category: input.category,
            order: input.order,
            is_active: true,
            metadata: Metadata {
                created_by: created_by.to_string(),
                last_updated_by: None,
            },
            created_at: now,
            updated_at: now,
        })
    }

    /// Look up a single record by id. Inactive records are returned too;
    /// the active-only filter applies to listing, not direct lookup.
    pub fn get(&self, id: i64) -> Result<Option<Faq>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!("SELECT {} FROM faqs WHERE id = ?1", FAQ_COLUMNS))
            .context("Failed to prepare FAQ lookup")?;

        let faq = stmt
            .query_row(params![id], row_to_faq)
            .optional()
            .context("Failed to look up FAQ")?;

        Ok(faq)
    }

    /// Persist an updated record. `updated_at` is refreshed here; the
    /// returned value carries the stored timestamp.
    pub fn update(&self, faq: &Faq) -> Result<Faq> {
        let conn = self.conn.lock().unwrap();
        let now = Utc::now();

        conn.execute(
            "UPDATE faqs SET question_en = ?1, question_hi = ?2, question_bn = ?3,
                             answer_en = ?4, answer_hi = ?5, answer_bn = ?6,
                             category = ?7, sort_order = ?8, is_active = ?9,
                             last_updated_by = ?10, updated_at = ?11
             WHERE id = ?12",
            params![
                faq.question.en,
                faq.question.hi,
                faq.question.bn,
                faq.answer.en,
                faq.answer.hi,
                faq.answer.bn,
                faq.category.as_str(),
                faq.order,
                faq.is_active as i64,
                faq.metadata.last_updated_by,
                now.to_rfc3339(),
                faq.id,
            ],
        )
        .context("Failed to update FAQ")?;

        let mut updated = faq.clone();
        updated.updated_at = now;
        Ok(updated)
    }

    /// Hard-delete a record. Returns false when the id does not exist.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let rows_affected = conn
            .execute("DELETE FROM faqs WHERE id = ?1", params![id])
            .context("Failed to delete FAQ")?;

        Ok(rows_affected > 0)
    }

    /// One page of active records, optionally filtered by category, sorted
    /// by (sort order ascending, creation time descending).
    ///
    /// The category filter is a plain string match: an unknown category
    /// matches nothing, it is not an error. The closed set is enforced on
    /// write.
    pub fn list(&self, category: Option<&str>, page: u32, limit: u32) -> Result<Vec<Faq>> {
        let conn = self.conn.lock().unwrap();
        let offset = (page.saturating_sub(1) as i64) * limit as i64;

        let sql = format!(
            "SELECT {} FROM faqs
             WHERE is_active = 1 {}
             ORDER BY sort_order ASC, created_at DESC
             LIMIT ?1 OFFSET ?2",
            FAQ_COLUMNS,
            if category.is_some() { "AND category = ?3" } else { "" }
        );

        let mut stmt = conn.prepare(&sql).context("Failed to prepare FAQ listing")?;

        let faqs = match category {
            Some(cat) => stmt
                .query_map(params![limit as i64, offset, cat], row_to_faq)?
                .collect::<Result<Vec<_>, _>>(),
            None => stmt
                .query_map(params![limit as i64, offset], row_to_faq)?
                .collect::<Result<Vec<_>, _>>(),
        }
        .context("Failed to list FAQs")?;

        Ok(faqs)
    }

    /// Count of all active records matching the filter, independent of
    /// pagination. This feeds the `total` field of the pagination block.
    pub fn count(&self, category: Option<&str>) -> Result<u64> {
        let conn = self.conn.lock().unwrap();

        let count: i64 = match category {
            Some(cat) => conn.query_row(
                "SELECT COUNT(*) FROM faqs WHERE is_active = 1 AND category = ?1",
                params![cat],
                |row| row.get(0),
            ),
            None => conn.query_row(
                "SELECT COUNT(*) FROM faqs WHERE is_active = 1",
                [],
                |row| row.get(0),
            ),
        }
        .context("Failed to count FAQs")?;

        Ok(count as u64)
    }
}

/// The four derived translations produced by the write-path fan-out.
#[derive(Debug, Clone)]
pub struct FaqTranslations {
    pub question_hi: String,
    pub question_bn: String,
    pub answer_hi: String,
    pub answer_bn: String,
}

fn row_to_faq(row: &Row) -> rusqlite::Result<Faq> {
    let category_str: String = row.get(7)?;
    let category = Category::parse(&category_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            7,
            rusqlite::types::Type::Text,
            format!("unknown category '{}'", category_str).into(),
        )
    })?;

    Ok(Faq {
        id: row.get(0)?,
        question: LocalizedText {
            en: row.get(1)?,
            hi: row.get(2)?,
            bn: row.get(3)?,
        },
        answer: LocalizedText {
            en: row.get(4)?,
            hi: row.get(5)?,
            bn: row.get(6)?,
        },
        category,
        order: row.get(8)?,
        is_active: row.get::<_, i64>(9)? != 0,
        metadata: Metadata {
            created_by: row.get(10)?,
            last_updated_by: row.get(11)?,
        },
        created_at: parse_timestamp(row, 12)?,
        updated_at: parse_timestamp(row, 13)?,
    })
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::new(":memory:").expect("in-memory database")
    }

    fn sample_input(question: &str, category: Category, order: i64) -> CreateFaq {
        CreateFaq {
            question: question.to_string(),
            answer: format!("An answer of sufficient length for {}.", question),
            category,
            order,
        }
    }

    fn sample_translations() -> FaqTranslations {
        FaqTranslations {
            question_hi: "प्रश्न".to_string(),
            question_bn: "প্রশ্ন".to_string(),
            answer_hi: "उत्तर".to_string(),
            answer_bn: "উত্তর".to_string(),
        }
    }

    #[test]
    fn test_insert_then_get_roundtrip() {
        let db = test_db();
        let inserted = db
            .insert(
                &sample_input("What is the refund policy?", Category::Billing, 0),
                &sample_translations(),
                "admin",
            )
            .expect("insert");

        let fetched = db.get(inserted.id).expect("get").expect("present");
        assert_eq!(fetched.question.en, "What is the refund policy?");
        assert_eq!(fetched.question.hi.as_deref(), Some("प्रश्न"));
        assert_eq!(fetched.category, Category::Billing);
        assert!(fetched.is_active);
        assert_eq!(fetched.metadata.created_by, "admin");
        assert_eq!(fetched.metadata.last_updated_by, None);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = test_db();
        assert!(db.get(999).expect("get").is_none());
    }

    #[test]
    fn test_list_sorts_by_order_then_newest() {
        let db = test_db();
        for order in [3, 1, 2] {
            db.insert(
                &sample_input(&format!("Question with order {}?", order), Category::General, order),
                &sample_translations(),
                "admin",
            )
            .expect("insert");
        }

        let listed = db.list(None, 1, 10).expect("list");
        let orders: Vec<i64> = listed.iter().map(|f| f.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_list_excludes_inactive() {
        let db = test_db();
        let faq = db
            .insert(
                &sample_input("Will this question disappear?", Category::General, 0),
                &sample_translations(),
                "admin",
            )
            .expect("insert");

        let mut deactivated = faq.clone();
        deactivated.is_active = false;
        db.update(&deactivated).expect("update");

        assert!(db.list(None, 1, 10).expect("list").is_empty());
        assert_eq!(db.count(None).expect("count"), 0);
        // Direct lookup still resolves the record
        assert!(db.get(faq.id).expect("get").is_some());
    }

    #[test]
    fn test_list_filters_by_category() {
        let db = test_db();
        db.insert(
            &sample_input("A billing question?", Category::Billing, 0),
            &sample_translations(),
            "admin",
        )
        .expect("insert");
        db.insert(
            &sample_input("A technical question?", Category::Technical, 0),
            &sample_translations(),
            "admin",
        )
        .expect("insert");

        let billing = db.list(Some("billing"), 1, 10).expect("list");
        assert_eq!(billing.len(), 1);
        assert_eq!(billing[0].category, Category::Billing);
        assert_eq!(db.count(Some("billing")).expect("count"), 1);

        // Unknown category matches nothing rather than erroring
        assert!(db.list(Some("nonsense"), 1, 10).expect("list").is_empty());
        assert_eq!(db.count(Some("nonsense")).expect("count"), 0);
    }

    #[test]
    fn test_pagination_bounds_and_total() {
        let db = test_db();
        for i in 0..5 {
            db.insert(
                &sample_input(&format!("Question number {}?", i), Category::General, i),
                &sample_translations(),
                "admin",
            )
            .expect("insert");
        }

        let first = db.list(None, 1, 2).expect("list");
        let second = db.list(None, 2, 2).expect("list");
        let third = db.list(None, 3, 2).expect("list");
        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(third.len(), 1);
        assert_eq!(db.count(None).expect("count"), 5);

        // Pages do not overlap
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_update_applies_fields_and_refreshes_timestamp() {
        let db = test_db();
        let faq = db
            .insert(
                &sample_input("Original question text here?", Category::General, 0),
                &sample_translations(),
                "admin",
            )
            .expect("insert");

        let mut changed = faq.clone();
        changed.question.en = "Updated question text here?".to_string();
        changed.order = 5;
        changed.metadata.last_updated_by = Some("editor".to_string());
        let updated = db.update(&changed).expect("update");

        assert!(updated.updated_at >= faq.updated_at);

        let fetched = db.get(faq.id).expect("get").expect("present");
        assert_eq!(fetched.question.en, "Updated question text here?");
        assert_eq!(fetched.order, 5);
        assert_eq!(fetched.metadata.last_updated_by.as_deref(), Some("editor"));
        assert_eq!(fetched.created_at, faq.created_at);
    }

    #[test]
    fn test_reopening_database_file_preserves_records() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("faq.db");
        let path = path.to_str().expect("utf-8 path");

        let id = {
            let db = Database::new(path).expect("open");
            db.insert(
                &sample_input("Does this survive a restart?", Category::General, 0),
                &sample_translations(),
                "admin",
            )
            .expect("insert")
            .id
        };

        let db = Database::new(path).expect("reopen");
        let faq = db.get(id).expect("get").expect("present");
        assert_eq!(faq.question.en, "Does this survive a restart?");
    }

    #[test]
    fn test_delete_is_hard_removal() {
        let db = test_db();
        let faq = db
            .insert(
                &sample_input("A question destined for removal?", Category::Other, 0),
                &sample_translations(),
                "admin",
            )
            .expect("insert");

        assert!(db.delete(faq.id).expect("delete"));
        assert!(db.get(faq.id).expect("get").is_none());
        // Second delete reports absence
        assert!(!db.delete(faq.id).expect("delete"));
    }
}
