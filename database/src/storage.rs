use crate::{Collection, Database, DatabaseError, Record, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::marker::PhantomData;
use tracing::{debug, info};
use ulid::Ulid;

/// A record as the persistence backend returns it: an opaque id, the record
/// fields as a JSON object, and the row timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRow {
    pub id: String,
    pub data: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equality filters and a row limit for listing a collection
///
/// Results are always ordered newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    filters: Vec<(String, JsonValue)>,
    limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only keep rows whose top-level `field` equals `value`
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Return at most `limit` rows
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filters(&self) -> &[(String, JsonValue)] {
        &self.filters
    }

    pub fn max_rows(&self) -> Option<usize> {
        self.limit
    }
}

/// Row-oriented create/read/update/delete interface over the record
/// collections
///
/// Updates are last-write-wins: there is no version check, so concurrent
/// editors overwrite each other.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record and assign it a new id
    async fn insert(&self, collection: Collection, data: JsonValue) -> Result<StoredRow>;

    /// Get a record by id
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<StoredRow>>;

    /// List records, newest first
    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<StoredRow>>;

    /// Replace the fields of an existing record
    async fn update(&self, collection: Collection, id: &str, data: JsonValue) -> Result<StoredRow>;

    /// Delete a record by id
    async fn delete(&self, collection: Collection, id: &str) -> Result<()>;

    /// Count the records of a collection
    async fn count(&self, collection: Collection) -> Result<i64>;
}

enum SqlParam {
    Text(String),
    Integer(i64),
    Real(f64),
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|e| DatabaseError::Other(format!("Invalid timestamp '{}': {}", value, e)))
}

fn ensure_object(data: &JsonValue) -> Result<()> {
    if data.is_object() {
        Ok(())
    } else {
        Err(DatabaseError::InvalidRecord(
            "record data must be a JSON object".to_string(),
        ))
    }
}

fn filter_clause(field: &str, value: &JsonValue) -> Result<(&'static str, Vec<SqlParam>)> {
    if field.is_empty()
        || !field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(DatabaseError::InvalidField(field.to_string()));
    }

    let path = SqlParam::Text(format!("$.{}", field));
    let value = match value {
        JsonValue::Null => return Ok(("json_extract(data, ?) IS NULL", vec![path])),
        JsonValue::String(s) => SqlParam::Text(s.clone()),
        JsonValue::Bool(b) => SqlParam::Integer(i64::from(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                SqlParam::Integer(i)
            } else if let Some(f) = n.as_f64() {
                SqlParam::Real(f)
            } else {
                SqlParam::Text(n.to_string())
            }
        }
        JsonValue::Array(_) | JsonValue::Object(_) => {
            return Err(DatabaseError::InvalidField(format!(
                "{} (cannot filter on a structured value)",
                field
            )))
        }
    };

    Ok(("json_extract(data, ?) = ?", vec![path, value]))
}

fn decode_row(row: &SqliteRow) -> Result<StoredRow> {
    let data: String = row.try_get("data")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(StoredRow {
        id: row.try_get("id")?,
        data: serde_json::from_str(&data)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

#[async_trait]
impl RecordStore for Database {
    async fn insert(&self, collection: Collection, data: JsonValue) -> Result<StoredRow> {
        ensure_object(&data)?;

        let id = Ulid::new().to_string();
        let now = Utc::now().trunc_subsecs(6);
        let sql = format!(
            "INSERT INTO {} (id, data, created_at, updated_at) VALUES (?, ?, ?, ?)",
            collection.table_name()
        );

        debug!("Executing SQL: {}", sql);

        sqlx::query(&sql)
            .bind(id.as_str())
            .bind(data.to_string())
            .bind(format_timestamp(&now))
            .bind(format_timestamp(&now))
            .execute(self.pool())
            .await?;

        info!("Created {} record with id: {}", collection, id);

        Ok(StoredRow {
            id,
            data,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<StoredRow>> {
        let sql = format!(
            "SELECT id, data, created_at, updated_at FROM {} WHERE id = ?",
            collection.table_name()
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?;

        row.as_ref().map(decode_row).transpose()
    }

    async fn list(&self, collection: Collection, query: &ListQuery) -> Result<Vec<StoredRow>> {
        let mut sql = format!(
            "SELECT id, data, created_at, updated_at FROM {}",
            collection.table_name()
        );

        let mut clauses = Vec::new();
        let mut params = Vec::new();
        for (field, value) in query.filters() {
            let (clause, clause_params) = filter_clause(field, value)?;
            clauses.push(clause);
            params.extend(clause_params);
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        sql.push_str(" ORDER BY created_at DESC, seq DESC");

        if let Some(limit) = query.max_rows() {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        debug!("Executing SQL: {}", sql);

        let mut statement = sqlx::query(&sql);
        for param in params {
            statement = match param {
                SqlParam::Text(s) => statement.bind(s),
                SqlParam::Integer(i) => statement.bind(i),
                SqlParam::Real(f) => statement.bind(f),
            };
        }

        let rows = statement.fetch_all(self.pool()).await?;

        rows.iter().map(decode_row).collect()
    }

    async fn update(&self, collection: Collection, id: &str, data: JsonValue) -> Result<StoredRow> {
        ensure_object(&data)?;

        let now = Utc::now().trunc_subsecs(6);
        let sql = format!(
            "UPDATE {} SET data = ?, updated_at = ? WHERE id = ?",
            collection.table_name()
        );

        debug!("Executing SQL: {}", sql);

        let result = sqlx::query(&sql)
            .bind(data.to_string())
            .bind(format_timestamp(&now))
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "{} with id: {}",
                collection, id
            )));
        }

        info!("Updated {} record with id: {}", collection, id);

        self.get(collection, id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} with id: {}", collection, id)))
    }

    async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", collection.table_name());

        let result = sqlx::query(&sql).bind(id).execute(self.pool()).await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "{} with id: {}",
                collection, id
            )));
        }

        info!("Deleted {} record with id: {}", collection, id);

        Ok(())
    }

    async fn count(&self, collection: Collection) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", collection.table_name());
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(self.pool()).await?;
        Ok(count)
    }
}

/// A typed record together with its id and timestamps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stored<T> {
    pub id: String,
    #[serde(flatten)]
    pub record: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: Record> Stored<T> {
    /// Decode the record fields of a raw row
    pub fn from_row(row: StoredRow) -> Result<Self> {
        Ok(Self {
            record: serde_json::from_value(row.data)?,
            id: row.id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Typed access to the collection of record type `T`
pub struct Records<'a, T> {
    store: &'a dyn RecordStore,
    record: PhantomData<fn() -> T>,
}

impl<'a, T: Record> Records<'a, T> {
    pub fn new(store: &'a dyn RecordStore) -> Self {
        Self {
            store,
            record: PhantomData,
        }
    }

    pub async fn create(&self, record: &T) -> Result<Stored<T>> {
        let row = self
            .store
            .insert(T::collection(), serde_json::to_value(record)?)
            .await?;
        Stored::from_row(row)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Stored<T>>> {
        self.store
            .get(T::collection(), id)
            .await?
            .map(Stored::from_row)
            .transpose()
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Stored<T>>> {
        self.store
            .list(T::collection(), query)
            .await?
            .into_iter()
            .map(Stored::from_row)
            .collect()
    }

    /// List every record, newest first
    pub async fn all(&self) -> Result<Vec<Stored<T>>> {
        self.list(&ListQuery::new()).await
    }

    /// Get the newest record whose `field` equals `value`
    pub async fn find_by(&self, field: &str, value: JsonValue) -> Result<Option<Stored<T>>> {
        let query = ListQuery::new().filter(field, value).limit(1);
        Ok(self.list(&query).await?.into_iter().next())
    }

    pub async fn update(&self, id: &str, record: &T) -> Result<Stored<T>> {
        let row = self
            .store
            .update(T::collection(), id, serde_json::to_value(record)?)
            .await?;
        Stored::from_row(row)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(T::collection(), id).await
    }

    pub async fn count(&self) -> Result<i64> {
        self.store.count(T::collection()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_collection_tables;
    use entities::{BlogPost, Certificate, PostStatus};
    use serde_json::json;

    async fn create_test_db() -> Database {
        let db = Database::in_memory().await.unwrap();
        create_collection_tables(&db).await.unwrap();
        db
    }

    fn post(title: &str, slug: &str, status: PostStatus, is_featured: bool) -> BlogPost {
        BlogPost {
            title: title.to_string(),
            slug: slug.to_string(),
            content: "<p>Body</p>".to_string(),
            excerpt: None,
            category: None,
            tags: vec!["rust".to_string()],
            keywords: Vec::new(),
            featured_image: None,
            read_time: None,
            status,
            is_featured,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = create_test_db().await;

        let row = db
            .insert(Collection::Contacts, json!({ "name": "Sam" }))
            .await
            .unwrap();
        assert_eq!(row.id.len(), 26);

        let fetched = db.get(Collection::Contacts, &row.id).await.unwrap().unwrap();
        assert_eq!(fetched, row);

        assert!(db.get(Collection::Contacts, "missing").await.unwrap().is_none());
        assert!(db.get(Collection::Projects, &row.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_non_objects() {
        let db = create_test_db().await;
        let result = db.insert(Collection::Contacts, json!(["not", "a", "record"])).await;
        assert!(matches!(result, Err(DatabaseError::InvalidRecord(_))));
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = create_test_db().await;

        for name in ["first", "second", "third"] {
            db.insert(Collection::Contacts, json!({ "name": name }))
                .await
                .unwrap();
        }

        let rows = db.list(Collection::Contacts, &ListQuery::new()).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.data["name"].clone()).collect();
        assert_eq!(names, vec![json!("third"), json!("second"), json!("first")]);
    }

    #[tokio::test]
    async fn test_list_filters_and_limit() {
        let db = create_test_db().await;
        let posts = Records::<BlogPost>::new(&db);

        posts.create(&post("Draft", "draft", PostStatus::Draft, true)).await.unwrap();
        for i in 0..4 {
            posts
                .create(&post(&format!("Post {i}"), &format!("post-{i}"), PostStatus::Published, true))
                .await
                .unwrap();
        }
        posts
            .create(&post("Plain", "plain", PostStatus::Published, false))
            .await
            .unwrap();

        let query = ListQuery::new()
            .filter("status", "published")
            .filter("is_featured", true)
            .limit(3);
        let featured = posts.list(&query).await.unwrap();

        let slugs: Vec<_> = featured.iter().map(|p| p.record.slug.as_str()).collect();
        assert_eq!(slugs, vec!["post-3", "post-2", "post-1"]);
    }

    #[tokio::test]
    async fn test_filter_on_missing_field_with_null() {
        let db = create_test_db().await;
        db.insert(Collection::Projects, json!({ "title": "a" })).await.unwrap();
        db.insert(Collection::Projects, json!({ "title": "b", "link": "x" }))
            .await
            .unwrap();

        let rows = db
            .list(Collection::Projects, &ListQuery::new().filter("link", JsonValue::Null))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].data["title"], json!("a"));
    }

    #[tokio::test]
    async fn test_invalid_filter_field() {
        let db = create_test_db().await;

        let injected = ListQuery::new().filter("title') OR 1=1 --", "x");
        assert!(matches!(
            db.list(Collection::BlogPosts, &injected).await,
            Err(DatabaseError::InvalidField(_))
        ));

        let structured = ListQuery::new().filter("tags", json!(["rust"]));
        assert!(matches!(
            db.list(Collection::BlogPosts, &structured).await,
            Err(DatabaseError::InvalidField(_))
        ));
    }

    #[tokio::test]
    async fn test_update_is_last_write_wins() {
        let db = create_test_db().await;
        let certificates = Records::<Certificate>::new(&db);

        let stored = certificates
            .create(&Certificate {
                title: "Original".to_string(),
                issuer: "Acme".to_string(),
                image: None,
            })
            .await
            .unwrap();

        let first_edit = Certificate {
            title: "First editor".to_string(),
            ..stored.record.clone()
        };
        let second_edit = Certificate {
            title: "Second editor".to_string(),
            ..stored.record.clone()
        };
        certificates.update(&stored.id, &first_edit).await.unwrap();
        let updated = certificates.update(&stored.id, &second_edit).await.unwrap();

        assert_eq!(updated.record.title, "Second editor");
        assert_eq!(updated.created_at, stored.created_at);
        assert!(updated.updated_at >= stored.updated_at);

        let missing = certificates.update("missing", &second_edit).await;
        assert!(matches!(missing, Err(DatabaseError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let db = create_test_db().await;
        let a = db.insert(Collection::Contacts, json!({ "name": "a" })).await.unwrap();
        db.insert(Collection::Contacts, json!({ "name": "b" })).await.unwrap();

        assert_eq!(db.count(Collection::Contacts).await.unwrap(), 2);
        db.delete(Collection::Contacts, &a.id).await.unwrap();
        assert_eq!(db.count(Collection::Contacts).await.unwrap(), 1);

        assert!(matches!(
            db.delete(Collection::Contacts, &a.id).await,
            Err(DatabaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_find_by_slug() {
        let db = create_test_db().await;
        let posts = Records::<BlogPost>::new(&db);
        posts
            .create(&post("Hello", "hello", PostStatus::Published, false))
            .await
            .unwrap();

        let found = posts.find_by("slug", json!("hello")).await.unwrap().unwrap();
        assert_eq!(found.record.title, "Hello");
        assert!(posts.find_by("slug", json!("nope")).await.unwrap().is_none());
        assert_eq!(posts.count().await.unwrap(), 1);
    }

    #[test]
    fn test_stored_serializes_flat() {
        let row = StoredRow {
            id: "01ABC".to_string(),
            data: json!({ "title": "T", "issuer": "I" }),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let stored = Stored::<Certificate>::from_row(row).unwrap();
        let value = serde_json::to_value(&stored).unwrap();

        assert_eq!(value["id"], json!("01ABC"));
        assert_eq!(value["title"], json!("T"));
        assert!(value.get("record").is_none());
    }
}
