use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use open_in_git_host::{HostType, Mapping};
use rusqlite::{Connection, OptionalExtension, Row, params};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open sqlite at {}", path.display()))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS mappings (
                id INTEGER PRIMARY KEY,
                base_dir TEXT NOT NULL UNIQUE,
                host_type TEXT NOT NULL,
                host_url TEXT NOT NULL,
                project TEXT NOT NULL,
                repository TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )?;
        Ok(())
    }

    pub fn upsert_mapping(&self, mapping: &Mapping) -> Result<()> {
        let base_dir = base_dir_text(&mapping.base_dir)?;
        self.conn.execute(
            "INSERT INTO mappings(base_dir, host_type, host_url, project, repository)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(base_dir) DO UPDATE SET
                host_type = excluded.host_type,
                host_url = excluded.host_url,
                project = excluded.project,
                repository = excluded.repository,
                updated_at = CURRENT_TIMESTAMP",
            params![
                base_dir,
                mapping.host_type.as_str(),
                mapping.host_url,
                mapping.project,
                mapping.repository
            ],
        )?;
        Ok(())
    }

    pub fn mapping_by_base_dir(&self, base_dir: &Path) -> Result<Option<Mapping>> {
        let base_dir = base_dir_text(base_dir)?;
        let raw = self
            .conn
            .query_row(
                "SELECT base_dir, host_type, host_url, project, repository
                 FROM mappings WHERE base_dir = ?1",
                params![base_dir],
                RawMapping::from_row,
            )
            .optional()?;
        raw.map(RawMapping::into_mapping).transpose()
    }

    pub fn list_mappings(&self) -> Result<Vec<Mapping>> {
        let mut stmt = self.conn.prepare(
            "SELECT base_dir, host_type, host_url, project, repository
             FROM mappings ORDER BY base_dir",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(RawMapping::from_row(row)?.into_mapping()?);
        }
        Ok(out)
    }

    pub fn remove_mapping(&self, base_dir: &Path) -> Result<bool> {
        let base_dir = base_dir_text(base_dir)?;
        let removed = self
            .conn
            .execute("DELETE FROM mappings WHERE base_dir = ?1", params![base_dir])?;
        Ok(removed > 0)
    }
}

struct RawMapping {
    base_dir: String,
    host_type: String,
    host_url: String,
    project: String,
    repository: String,
}

impl RawMapping {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            base_dir: row.get(0)?,
            host_type: row.get(1)?,
            host_url: row.get(2)?,
            project: row.get(3)?,
            repository: row.get(4)?,
        })
    }

    fn into_mapping(self) -> Result<Mapping> {
        let host_type: HostType = self.host_type.parse().with_context(|| {
            format!("mapping for '{}' has an unknown host type", self.base_dir)
        })?;
        Ok(Mapping {
            base_dir: PathBuf::from(self.base_dir),
            host_type,
            host_url: self.host_url,
            project: self.project,
            repository: self.repository,
        })
    }
}

fn base_dir_text(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("base directory {} is not valid UTF-8", path.display()))
}
