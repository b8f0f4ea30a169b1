//! SQLite ledger: `clients`, `calculations` and `feedback`.
//!
//! Every call opens its own connection, so a `Ledger` can be shared freely
//! between front-end handlers without locking.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use destiny_core::{CoreConfig, Gender, MatrixInput, MatrixResult};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use serde::Serialize;

use crate::error::LedgerError;

/// A stored client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
    pub id: String,
    /// Identity in an outer system (e.g. a chat user id). Unique when set.
    pub external_ref: Option<String>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl Client {
    /// Engine input rebuilt from the stored fields.
    pub fn input(&self) -> MatrixInput {
        MatrixInput::new(self.name.clone(), self.birth_date, self.gender)
    }
}

/// Fields for a new client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub external_ref: Option<String>,
    pub name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl NewClient {
    pub fn new(name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            external_ref: None,
            name: name.into(),
            birth_date,
            gender: None,
            phone: None,
            email: None,
            notes: None,
        }
    }

    pub fn from_input(input: &MatrixInput) -> Self {
        Self {
            gender: input.gender,
            ..Self::new(input.name.clone(), input.birth_date)
        }
    }
}

/// One stored calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculationRow {
    pub id: String,
    pub client_id: String,
    pub result: MatrixResult,
    pub notes: Option<String>,
    pub created_at_ms: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackRow {
    pub id: String,
    pub client_id: Option<String>,
    pub calculation_id: Option<String>,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at_ms: i64,
}

fn now_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// `table` is one of this module's own table names, never user input.
fn row_exists(conn: &Connection, table: &str, id: &str) -> Result<bool, LedgerError> {
    let sql = format!("SELECT 1 FROM {table} WHERE id = ?1 LIMIT 1");
    let found = conn
        .query_row(&sql, params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

fn trimmed(s: Option<&str>) -> Option<String> {
    s.map(str::trim).filter(|s| !s.is_empty()).map(String::from)
}

const CLIENT_COLUMNS: &str =
    "id, external_ref, name, birth_date, gender, phone, email, notes, created_at_ms, updated_at_ms";

/// Client columns as read, before the date and gender are parsed.
struct RawClient {
    id: String,
    external_ref: Option<String>,
    name: String,
    birth_date: String,
    gender: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    notes: Option<String>,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl RawClient {
    fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            external_ref: r.get(1)?,
            name: r.get(2)?,
            birth_date: r.get(3)?,
            gender: r.get(4)?,
            phone: r.get(5)?,
            email: r.get(6)?,
            notes: r.get(7)?,
            created_at_ms: r.get(8)?,
            updated_at_ms: r.get(9)?,
        })
    }
}

impl TryFrom<RawClient> for Client {
    type Error = LedgerError;

    fn try_from(raw: RawClient) -> Result<Self, Self::Error> {
        let birth_date = NaiveDate::parse_from_str(&raw.birth_date, "%Y-%m-%d")
            .map_err(|_| LedgerError::BadDate(raw.birth_date.clone()))?;
        let gender = raw.gender.as_deref().and_then(Gender::from_stored);
        Ok(Client {
            id: raw.id,
            external_ref: raw.external_ref,
            name: raw.name,
            birth_date,
            gender,
            phone: raw.phone,
            email: raw.email,
            notes: raw.notes,
            created_at_ms: raw.created_at_ms,
            updated_at_ms: raw.updated_at_ms,
        })
    }
}

/// Calculation columns as read, before the JSON result is decoded.
struct RawCalculation {
    id: String,
    client_id: String,
    result_json: String,
    notes: Option<String>,
    created_at_ms: i64,
}

impl RawCalculation {
    fn from_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            client_id: r.get(1)?,
            result_json: r.get(2)?,
            notes: r.get(3)?,
            created_at_ms: r.get(4)?,
        })
    }

    fn decode(self) -> Result<CalculationRow, LedgerError> {
        Ok(CalculationRow {
            id: self.id,
            client_id: self.client_id,
            result: serde_json::from_str(&self.result_json)?,
            notes: self.notes,
            created_at_ms: self.created_at_ms,
        })
    }
}

/// Storage for clients and their calculation history.
#[derive(Debug, Clone)]
pub struct Ledger {
    db_path: PathBuf,
}

impl Ledger {
    /// Open or create the database and ensure the tables exist.
    pub fn new(db_path: PathBuf) -> Result<Self, LedgerError> {
        let this = Self { db_path };
        this.init()?;
        Ok(this)
    }

    /// Open at `config.ledger_path()`.
    pub fn open(config: &CoreConfig) -> Result<Self, LedgerError> {
        Self::new(config.ledger_path())
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection, LedgerError> {
        let conn = Connection::open_with_flags(
            &self.db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
        )?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }

    fn init(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.db_path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(
                    path = %parent.display(),
                    error = %e,
                    "could not create ledger directory"
                );
            }
        }
        let conn = self.connect()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS clients (
                id TEXT PRIMARY KEY,
                external_ref TEXT NULL UNIQUE,
                name TEXT NOT NULL,
                birth_date TEXT NOT NULL,
                gender TEXT NULL,
                phone TEXT NULL,
                email TEXT NULL,
                notes TEXT NULL,
                created_at_ms INTEGER NOT NULL,
                updated_at_ms INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_clients_created_at ON clients(created_at_ms);

            CREATE TABLE IF NOT EXISTS calculations (
                id TEXT PRIMARY KEY,
                client_id TEXT NOT NULL,
                result_json TEXT NOT NULL,
                notes TEXT NULL,
                created_at_ms INTEGER NOT NULL,
                FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE CASCADE
            );
            CREATE INDEX IF NOT EXISTS idx_calculations_client_id ON calculations(client_id);

            CREATE TABLE IF NOT EXISTS feedback (
                id TEXT PRIMARY KEY,
                client_id TEXT NULL,
                calculation_id TEXT NULL,
                rating INTEGER NOT NULL,
                comment TEXT NULL,
                created_at_ms INTEGER NOT NULL,
                FOREIGN KEY(client_id) REFERENCES clients(id) ON DELETE SET NULL,
                FOREIGN KEY(calculation_id) REFERENCES calculations(id) ON DELETE SET NULL
            );
            "#,
        )?;
        Ok(())
    }

    pub fn create_client(&self, new: NewClient) -> Result<Client, LedgerError> {
        let id = uuid::Uuid::new_v4().to_string();
        let ts = now_ms();
        let client = Client {
            id,
            external_ref: trimmed(new.external_ref.as_deref()),
            name: new.name.trim().to_string(),
            birth_date: new.birth_date,
            gender: new.gender,
            phone: trimmed(new.phone.as_deref()),
            email: trimmed(new.email.as_deref()),
            notes: trimmed(new.notes.as_deref()),
            created_at_ms: ts,
            updated_at_ms: ts,
        };
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO clients (id, external_ref, name, birth_date, gender, phone, email, notes,
                                 created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                client.id,
                client.external_ref,
                client.name,
                client.birth_date.format("%Y-%m-%d").to_string(),
                client.gender.map(|g| g.as_str()),
                client.phone,
                client.email,
                client.notes,
                client.created_at_ms,
                client.updated_at_ms,
            ],
        )?;
        tracing::info!(client_id = %client.id, "client created");
        Ok(client)
    }

    pub fn get_client(&self, id: &str) -> Result<Option<Client>, LedgerError> {
        self.client_where("id = ?1", id.trim())
    }

    pub fn find_client_by_external_ref(
        &self,
        external_ref: &str,
    ) -> Result<Option<Client>, LedgerError> {
        let needle = external_ref.trim();
        if needle.is_empty() {
            return Ok(None);
        }
        self.client_where("external_ref = ?1", needle)
    }

    fn client_where(&self, clause: &str, value: &str) -> Result<Option<Client>, LedgerError> {
        let conn = self.connect()?;
        let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE {clause} LIMIT 1");
        let raw = conn
            .query_row(&sql, params![value], RawClient::from_row)
            .optional()?;
        raw.map(Client::try_from).transpose()
    }

    /// Reuse the client with this external ref, or create one carrying it.
    pub fn find_or_create_client(
        &self,
        external_ref: &str,
        new: NewClient,
    ) -> Result<Client, LedgerError> {
        if let Some(existing) = self.find_client_by_external_ref(external_ref)? {
            return Ok(existing);
        }
        self.create_client(NewClient {
            external_ref: Some(external_ref.to_string()),
            ..new
        })
    }

    /// Clients in creation order.
    pub fn list_clients(&self, skip: usize, limit: usize) -> Result<Vec<Client>, LedgerError> {
        let conn = self.connect()?;
        let sql = format!(
            "SELECT {CLIENT_COLUMNS} FROM clients
             ORDER BY created_at_ms ASC, rowid ASC LIMIT ?1 OFFSET ?2"
        );
        let mut stmt = conn.prepare(&sql)?;
        let raws = stmt
            .query_map(params![limit as i64, skip as i64], RawClient::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(Client::try_from).collect()
    }

    /// Store a result against an existing client.
    pub fn record_calculation(
        &self,
        client_id: &str,
        result: &MatrixResult,
        notes: Option<&str>,
    ) -> Result<CalculationRow, LedgerError> {
        let client_id = client_id.trim();
        let id = uuid::Uuid::new_v4().to_string();
        let ts = now_ms();
        let notes = trimmed(notes);
        let result_json = serde_json::to_string(result)?;

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        if !row_exists(&tx, "clients", client_id)? {
            return Err(LedgerError::ClientNotFound(client_id.to_string()));
        }
        tx.execute(
            "INSERT INTO calculations (id, client_id, result_json, notes, created_at_ms)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, client_id, result_json, notes, ts],
        )?;
        tx.execute(
            "UPDATE clients SET updated_at_ms = ?1 WHERE id = ?2",
            params![ts, client_id],
        )?;
        tx.commit()?;
        tracing::info!(client_id = %client_id, calculation_id = %id, "calculation recorded");
        Ok(CalculationRow {
            id,
            client_id: client_id.to_string(),
            result: result.clone(),
            notes,
            created_at_ms: ts,
        })
    }

    /// Whole history for a client, oldest first.
    pub fn list_calculations(&self, client_id: &str) -> Result<Vec<CalculationRow>, LedgerError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, client_id, result_json, notes, created_at_ms
             FROM calculations WHERE client_id = ?1 ORDER BY created_at_ms ASC, rowid ASC",
        )?;
        let raws = stmt
            .query_map(params![client_id], RawCalculation::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(RawCalculation::decode).collect()
    }

    /// The last `limit` calculations, oldest first.
    pub fn recent_calculations(
        &self,
        client_id: &str,
        limit: usize,
    ) -> Result<Vec<CalculationRow>, LedgerError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, client_id, result_json, notes, created_at_ms
             FROM calculations WHERE client_id = ?1
             ORDER BY created_at_ms DESC, rowid DESC LIMIT ?2",
        )?;
        let mut raws = stmt
            .query_map(params![client_id, limit as i64], RawCalculation::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.reverse();
        raws.into_iter().map(RawCalculation::decode).collect()
    }

    pub fn count_calculations(&self, client_id: &str) -> Result<u64, LedgerError> {
        let conn = self.connect()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM calculations WHERE client_id = ?1",
            params![client_id],
            |r| r.get(0),
        )?;
        Ok(n.max(0) as u64)
    }

    /// Store a 1–5 rating, optionally tied to a client and a calculation.
    pub fn record_feedback(
        &self,
        client_id: Option<&str>,
        calculation_id: Option<&str>,
        rating: u8,
        comment: Option<&str>,
    ) -> Result<FeedbackRow, LedgerError> {
        if !(1..=5).contains(&rating) {
            return Err(LedgerError::InvalidRating(rating));
        }
        let row = FeedbackRow {
            id: uuid::Uuid::new_v4().to_string(),
            client_id: trimmed(client_id),
            calculation_id: trimmed(calculation_id),
            rating,
            comment: trimmed(comment),
            created_at_ms: now_ms(),
        };
        let conn = self.connect()?;
        if let Some(client_id) = &row.client_id {
            if !row_exists(&conn, "clients", client_id)? {
                return Err(LedgerError::ClientNotFound(client_id.clone()));
            }
        }
        if let Some(calculation_id) = &row.calculation_id {
            if !row_exists(&conn, "calculations", calculation_id)? {
                return Err(LedgerError::CalculationNotFound(calculation_id.clone()));
            }
        }
        conn.execute(
            "INSERT INTO feedback (id, client_id, calculation_id, rating, comment, created_at_ms)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.id,
                row.client_id,
                row.calculation_id,
                row.rating as i64,
                row.comment,
                row.created_at_ms,
            ],
        )?;
        tracing::info!(feedback_id = %row.id, rating, "feedback recorded");
        Ok(row)
    }
}
