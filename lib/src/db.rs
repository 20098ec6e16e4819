use crate::error::Result;
use crate::models::{Item, NewItem, NewTag, Tag, TagColor};
use crate::repository::Repository;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

pub struct FavedDb {
    conn: Connection,
    db_path: PathBuf,
}

impl FavedDb {
    pub fn init_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        db.setup_tables()?;
        Ok(db)
    }

    pub fn init(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self {
            conn,
            db_path: db_path.to_path_buf(),
        };
        db.setup_tables()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn get_path(&self) -> &Path {
        &self.db_path
    }

    fn setup_tables(&self) -> Result<()> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS tags (
                id integer PRIMARY KEY AUTOINCREMENT,
                parent_id integer NOT NULL DEFAULT 0,
                title text NOT NULL,
                description text NOT NULL DEFAULT '',
                color text NOT NULL DEFAULT 'gray',
                pinned integer NOT NULL DEFAULT 0,
                created_at text NOT NULL,
                updated_at text DEFAULT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS items (
                id integer PRIMARY KEY AUTOINCREMENT,
                title text NOT NULL,
                url text NOT NULL,
                description text NOT NULL DEFAULT '',
                comments text NOT NULL DEFAULT '',
                image text NOT NULL DEFAULT '',
                created_at text NOT NULL,
                updated_at text DEFAULT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS items_tags (
                item_id integer NOT NULL REFERENCES items(id) ON DELETE CASCADE,
                tag_id integer NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
                PRIMARY KEY (item_id, tag_id)
            )",
            [],
        )?;

        // Sibling titles are unique regardless of case; concurrent creators
        // that both miss the lookup collide here instead of duplicating.
        self.conn.execute(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_tags_parent_title ON tags(parent_id, lower(title))",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_items_url ON items(url)",
            [],
        )?;

        Ok(())
    }

    fn tag_from_row(row: &Row) -> rusqlite::Result<Tag> {
        let color: String = row.get(4)?;
        Ok(Tag {
            id: row.get(0)?,
            parent_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            color: color.parse().unwrap_or_default(),
            pinned: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn item_from_row(row: &Row) -> rusqlite::Result<Item> {
        Ok(Item {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            comments: row.get(4)?,
            image: row.get(5)?,
            tags: BTreeSet::new(),
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn item_tag_ids(&self, item_id: i64) -> Result<BTreeSet<i64>> {
        let mut stmt = self
            .conn
            .prepare("SELECT tag_id FROM items_tags WHERE item_id = ?1")?;
        let ids = stmt
            .query_map([item_id], |row| row.get::<_, i64>(0))?
            .collect::<rusqlite::Result<BTreeSet<_>>>()?;
        Ok(ids)
    }

    fn touch_tag(&self, sql: &str, value: &dyn rusqlite::ToSql, tag_id: i64) -> Result<bool> {
        let now: DateTime<Utc> = Utc::now();
        let changed = self.conn.execute(sql, params![value, now, tag_id])?;
        Ok(changed > 0)
    }
}

impl Repository for FavedDb {
    fn get_tags(&self) -> Result<HashMap<i64, Tag>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, parent_id, title, description, color, pinned, created_at, updated_at FROM tags",
        )?;
        let rows = stmt.query_map([], Self::tag_from_row)?;

        let mut tags = HashMap::new();
        for row in rows {
            let tag = row?;
            tags.insert(tag.id, tag);
        }
        Ok(tags)
    }

    fn create_tag(&self, tag: &NewTag) -> Result<i64> {
        let now: DateTime<Utc> = Utc::now();
        self.conn.execute(
            "INSERT INTO tags (parent_id, title, description, color, pinned, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                tag.parent_id,
                tag.title,
                tag.description,
                tag.color.unwrap_or_default().as_str(),
                tag.pinned,
                now
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_tag_color(&self, tag_id: i64, color: TagColor) -> Result<bool> {
        self.touch_tag(
            "UPDATE tags SET color = ?1, updated_at = ?2 WHERE id = ?3",
            &color.as_str(),
            tag_id,
        )
    }

    fn update_tag_pinned(&self, tag_id: i64, pinned: bool) -> Result<bool> {
        self.touch_tag(
            "UPDATE tags SET pinned = ?1, updated_at = ?2 WHERE id = ?3",
            &pinned,
            tag_id,
        )
    }

    fn update_tag_title(&self, tag_id: i64, title: &str) -> Result<bool> {
        self.touch_tag(
            "UPDATE tags SET title = ?1, updated_at = ?2 WHERE id = ?3",
            &title,
            tag_id,
        )
    }

    fn delete_tags(&self, tag_ids: &[i64]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut deleted = 0;
        for tag_id in tag_ids {
            deleted += tx.execute("DELETE FROM tags WHERE id = ?1", [*tag_id])?;
        }
        tx.commit()?;
        Ok(deleted)
    }

    fn get_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, url, description, comments, image, created_at, updated_at
             FROM items ORDER BY created_at DESC, id DESC",
        )?;
        let mut items = stmt
            .query_map([], Self::item_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        // One pass over the join table instead of a query per item
        let mut memberships: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        let mut stmt = self
            .conn
            .prepare("SELECT item_id, tag_id FROM items_tags")?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?;
        for row in rows {
            let (item_id, tag_id) = row?;
            memberships.entry(item_id).or_default().insert(tag_id);
        }

        for item in &mut items {
            if let Some(tags) = memberships.remove(&item.id) {
                item.tags = tags;
            }
        }
        Ok(items)
    }

    fn get_item(&self, item_id: i64) -> Result<Option<Item>> {
        let item = self
            .conn
            .query_row(
                "SELECT id, title, url, description, comments, image, created_at, updated_at
                 FROM items WHERE id = ?1",
                [item_id],
                Self::item_from_row,
            )
            .optional()?;

        match item {
            Some(mut item) => {
                item.tags = self.item_tag_ids(item.id)?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn find_item_by_url(&self, url: &str) -> Result<Option<Item>> {
        let id: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM items WHERE url = ?1 ORDER BY id LIMIT 1",
                [url],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => self.get_item(id),
            None => Ok(None),
        }
    }

    fn create_item(&self, item: &NewItem, parent_tag_id: Option<i64>) -> Result<i64> {
        let created_at = item.created_at.unwrap_or_else(Utc::now);
        self.conn.execute(
            "INSERT INTO items (title, url, description, comments, image, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.title,
                item.url,
                item.description,
                item.comments,
                item.image,
                created_at
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        if let Some(parent) = parent_tag_id {
            log::debug!("Item {} created under tag {}", id, parent);
        }
        Ok(id)
    }

    fn attach_item_tags(&self, tag_ids: &[i64], item_id: i64) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        for tag_id in tag_ids {
            tx.execute(
                "INSERT OR IGNORE INTO items_tags (item_id, tag_id) VALUES (?1, ?2)",
                [item_id, *tag_id],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn update_item(&self, item_id: i64, item: &NewItem) -> Result<bool> {
        let now: DateTime<Utc> = Utc::now();
        let changed = self.conn.execute(
            "UPDATE items SET title = ?1, url = ?2, description = ?3, comments = ?4, image = ?5, updated_at = ?6
             WHERE id = ?7",
            params![
                item.title,
                item.url,
                item.description,
                item.comments,
                item.image,
                now,
                item_id
            ],
        )?;
        Ok(changed > 0)
    }

    fn set_item_tags(&self, tag_ids: &[i64], item_id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;

        let exists: bool = tx
            .query_row("SELECT 1 FROM items WHERE id = ?1", [item_id], |_| Ok(true))
            .optional()?
            .unwrap_or(false);
        if !exists {
            return Ok(false);
        }

        tx.execute("DELETE FROM items_tags WHERE item_id = ?1", [item_id])?;
        for tag_id in tag_ids {
            tx.execute(
                "INSERT OR IGNORE INTO items_tags (item_id, tag_id) VALUES (?1, ?2)",
                [item_id, *tag_id],
            )?;
        }
        tx.commit()?;
        Ok(true)
    }

    fn delete_item(&self, item_id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM items WHERE id = ?1", [item_id])?;
        Ok(changed > 0)
    }

    fn run_raw_sql(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }
}
