//! Database connection and schema management
//!
//! Uses Turso (async SQLite-compatible) for all persisted state: users,
//! interaction events, and session boundaries.
//!
//! # Architecture
//!
//! A single [`Storage`] owns the database handle and is constructed once by
//! the process entry point, then shared (`Arc`) with every component that
//! needs it — there are no module-level globals. Repositories are cheap
//! views over the handle:
//!
//! - [`UserRepo`] — user directory: idempotent creation, atomic counters
//! - [`InteractionRepo`] — append-only event store plus the range/group
//!   queries aggregation needs
//! - [`SessionRepo`] — session boundary records
//!
//! Concurrency guarantees live in the schema, not in process memory: the
//! `users.user_id` primary key absorbs duplicate-creation races, and counter
//! bumps are single `UPDATE ... SET c = c + 1` statements.

pub mod error;
pub mod repos;

pub use error::{Result, StoreError};
pub use repos::interactions::InteractionRepo;
pub use repos::sessions::{Session, SessionRepo};
pub use repos::users::{User, UserRepo};

use tracing::info;
use turso::{Builder, Database};

/// Storage handle
///
/// Owns the database and initializes the schema on open.
pub struct Storage {
    db: Database,
}

impl Storage {
    /// Open (or create) a file-based database
    pub async fn open(path: &str) -> Result<Self> {
        if let Some(parent) = std::path::Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::invalid("database path", format!("failed to create directory: {}", e))
            })?;
        }

        info!(path, "Opening analytics database");
        let db = Builder::new_local(path).build().await?;

        let storage = Self { db };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Open an in-memory database (for testing)
    pub async fn new_memory() -> Result<Self> {
        let db = Builder::new_local(":memory:").build().await?;

        let storage = Self { db };
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Get the underlying database handle
    pub fn db(&self) -> &Database {
        &self.db
    }

    /// User directory repository
    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(&self.db)
    }

    /// Event store repository
    pub fn interactions(&self) -> InteractionRepo<'_> {
        InteractionRepo::new(&self.db)
    }

    /// Session boundary repository
    pub fn sessions(&self) -> SessionRepo<'_> {
        SessionRepo::new(&self.db)
    }

    /// Initialize the schema
    async fn init_schema(&self) -> Result<()> {
        let conn = self.db.connect()?;

        conn.execute(SCHEMA_USERS, ()).await?;
        conn.execute(INDEX_USERS_CREATED, ()).await?;

        conn.execute(SCHEMA_INTERACTIONS, ()).await?;
        conn.execute(INDEX_INTERACTIONS_USER_TIME, ()).await?;
        conn.execute(INDEX_INTERACTIONS_EVENT_TYPE, ()).await?;
        conn.execute(INDEX_INTERACTIONS_TIMESTAMP, ()).await?;

        conn.execute(SCHEMA_SESSIONS, ()).await?;
        conn.execute(INDEX_SESSIONS_STARTED, ()).await?;

        info!("Database schema initialized");
        Ok(())
    }
}

// =============================================================================
// Schema
// =============================================================================

const SCHEMA_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY,
    fingerprint TEXT NOT NULL DEFAULT '{}',
    metadata TEXT NOT NULL DEFAULT '{}',
    created_at TEXT NOT NULL,
    last_seen TEXT NOT NULL,
    total_interactions INTEGER NOT NULL DEFAULT 0,
    total_sessions INTEGER NOT NULL DEFAULT 0
)
"#;

const SCHEMA_INTERACTIONS: &str = r#"
CREATE TABLE IF NOT EXISTS interactions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    event_type TEXT NOT NULL,
    timestamp REAL NOT NULL,
    session_id TEXT,
    element TEXT,
    page_url TEXT,
    target TEXT,
    value TEXT,
    x REAL,
    y REAL,
    scroll_depth REAL,
    duration REAL,
    metadata TEXT,
    received_at TEXT NOT NULL
)
"#;

const SCHEMA_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS sessions (
    user_id TEXT NOT NULL,
    session_id TEXT NOT NULL,
    started_at TEXT NOT NULL,
    ended_at TEXT,
    active INTEGER NOT NULL DEFAULT 1,
    PRIMARY KEY (user_id, session_id)
)
"#;

const INDEX_USERS_CREATED: &str =
    "CREATE INDEX IF NOT EXISTS idx_users_created ON users(created_at)";

const INDEX_INTERACTIONS_USER_TIME: &str =
    "CREATE INDEX IF NOT EXISTS idx_interactions_user_time ON interactions(user_id, timestamp DESC)";

const INDEX_INTERACTIONS_EVENT_TYPE: &str =
    "CREATE INDEX IF NOT EXISTS idx_interactions_event_type ON interactions(event_type)";

const INDEX_INTERACTIONS_TIMESTAMP: &str =
    "CREATE INDEX IF NOT EXISTS idx_interactions_timestamp ON interactions(timestamp)";

const INDEX_SESSIONS_STARTED: &str =
    "CREATE INDEX IF NOT EXISTS idx_sessions_started ON sessions(started_at)";
