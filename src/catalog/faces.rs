//! Face name lookup.
//!
//! Face rectangles live in `AlbumData.xml`, but the names people typed in
//! are stored separately in a SQLite database, `Faces.db`. Its location moved
//! between iPhoto versions, so both known locations are probed.

use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Known `Faces.db` locations, relative to the library root, newest first.
const FACE_DB_LOCATIONS: &[&str] = &["Database/apdb/Faces.db", "Database/Faces.db"];

/// Resolves a catalog face key to a person's name.
pub trait FaceNameLookup {
    fn face_name(&self, key: i64) -> Option<String>;
}

impl FaceNameLookup for HashMap<i64, String> {
    fn face_name(&self, key: i64) -> Option<String> {
        self.get(&key).cloned()
    }
}

/// Reads names from the library's `Faces.db`, opened on first lookup.
#[derive(Debug)]
pub struct SqliteFaceNames {
    library: PathBuf,
    conn: OnceCell<Option<Connection>>,
}

impl SqliteFaceNames {
    pub fn new(library: &Path) -> Self {
        Self {
            library: library.to_path_buf(),
            conn: OnceCell::new(),
        }
    }

    fn connection(&self) -> Option<&Connection> {
        self.conn.get_or_init(|| open_face_db(&self.library)).as_ref()
    }
}

fn open_face_db(library: &Path) -> Option<Connection> {
    for location in FACE_DB_LOCATIONS {
        let path = library.join(location);
        if !path.is_file() {
            continue;
        }
        match Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY) {
            Ok(conn) => {
                debug!(path = %path.display(), "opened face database");
                return Some(conn);
            }
            Err(e) => warn!(path = %path.display(), "could not open face database: {e}"),
        }
    }
    debug!(library = %library.display(), "no face database found");
    None
}

impl FaceNameLookup for SqliteFaceNames {
    fn face_name(&self, key: i64) -> Option<String> {
        let conn = self.connection()?;
        let result = conn
            .query_row(
                "SELECT name FROM RKFaceName WHERE faceKey = ?1",
                [key],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional();
        match result {
            Ok(name) => name.flatten(),
            Err(e) => {
                warn!(face_key = key, "face name lookup failed: {e}");
                None
            }
        }
    }
}
