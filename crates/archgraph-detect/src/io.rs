//! I/O capability markers.
//!
//! A file's flags come from substring tables matched against its lower-cased
//! text. The database sub-kind is only consulted once a generic database-client
//! marker has fired: a file that merely mentions `mongo` does not touch a database.

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

/// One independently detected I/O capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IoFlag {
    FsRead,
    FsWrite,
    Network,
    Db,
    Env,
    Concurrency,
}

/// Database engine inferred from more specific markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[derive(Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DbKind {
    Postgres,
    Mysql,
    Sqlite,
    Mongo,
    Redis,
}

impl DbKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// Per-file or per-module I/O capabilities.
///
/// Merging is an OR over the boolean flags; `db_kind` keeps the first value seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IoFlags {
    pub fs_read: bool,
    pub fs_write: bool,
    pub network: bool,
    pub db: bool,
    pub env: bool,
    pub concurrency_hint: bool,
    pub db_kind: Option<DbKind>,
}

impl IoFlags {
    pub fn set(&mut self, flag: IoFlag) {
        match flag {
            IoFlag::FsRead => self.fs_read = true,
            IoFlag::FsWrite => self.fs_write = true,
            IoFlag::Network => self.network = true,
            IoFlag::Db => self.db = true,
            IoFlag::Env => self.env = true,
            IoFlag::Concurrency => self.concurrency_hint = true,
        }
    }

    pub fn merge(&mut self, other: &IoFlags) {
        self.fs_read |= other.fs_read;
        self.fs_write |= other.fs_write;
        self.network |= other.network;
        self.db |= other.db;
        self.env |= other.env;
        self.concurrency_hint |= other.concurrency_hint;
        if self.db_kind.is_none() {
            self.db_kind = other.db_kind;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == IoFlags::default()
    }
}

struct MarkerRule {
    flag: IoFlag,
    markers: &'static [&'static str],
}

const IO_RULES: &[MarkerRule] = &[
    MarkerRule {
        flag: IoFlag::FsRead,
        markers: &[
            "readfile",
            "read_to_string",
            "fs::read",
            "fs.read",
            "file::open",
            "os.open(",
            "ioutil.readall",
            "with open(",
            "= open(",
            "fopen(",
            "files.read",
            "new filereader",
            "fileinputstream",
            "bufio.newreader",
        ],
    },
    MarkerRule {
        flag: IoFlag::FsWrite,
        markers: &[
            "writefile",
            "fs::write",
            "fs.write",
            "file::create",
            "os.create(",
            "create_dir",
            "mkdir",
            "files.write",
            "fileoutputstream",
            "new filewriter",
            "fwrite(",
            "appendfile",
        ],
    },
    MarkerRule {
        flag: IoFlag::Network,
        markers: &[
            " fetch(",
            "(fetch(",
            ".fetch(",
            "\tfetch(",
            "\nfetch(",
            "axios",
            "http.get(",
            "http.post(",
            "http.newrequest",
            "http.client",
            "httpclient",
            "requests.get",
            "requests.post",
            "urllib",
            "aiohttp",
            "reqwest",
            "hyper::client",
            "net.dial",
            "okhttp",
            "resttemplate",
            "webclient",
            "grpc.dial",
        ],
    },
    MarkerRule {
        flag: IoFlag::Db,
        markers: &[
            "database/sql",
            "sql.open(",
            "sqlx",
            "diesel",
            "gorm",
            "sqlalchemy",
            "psycopg",
            "jdbc",
            "prisma",
            "typeorm",
            "sequelize",
            "knex",
            "mongoose",
            "mongoclient",
            "redis.newclient",
            "createclient(",
            "rusqlite",
            "sqlite3.connect",
            "createpool",
            "db.query",
            "db.exec",
            "entitymanager",
        ],
    },
    MarkerRule {
        flag: IoFlag::Env,
        markers: &[
            "process.env",
            "os.getenv",
            "os.environ",
            "os.lookupenv",
            "env::var",
            "system.getenv",
            "dotenv",
            "import.meta.env",
        ],
    },
    MarkerRule {
        flag: IoFlag::Concurrency,
        markers: &[
            "go func",
            "sync.waitgroup",
            "sync.mutex",
            "make(chan",
            "tokio::spawn",
            "thread::spawn",
            "std::sync::",
            "rayon",
            "threading",
            "asyncio",
            "multiprocessing",
            "concurrent.futures",
            "promise.all",
            "worker_threads",
            "executorservice",
            "completablefuture",
            "coroutinescope",
        ],
    },
];

/// Database sub-kinds in priority order; the first matching row wins.
const DB_KIND_RULES: &[(DbKind, &[&str])] = &[
    (
        DbKind::Postgres,
        &["postgres", "psycopg", "pgx", "lib/pq", "'pg'", "\"pg\"", "pg_catalog"],
    ),
    (DbKind::Mysql, &["mysql", "mariadb"]),
    (DbKind::Sqlite, &["sqlite"]),
    (DbKind::Mongo, &["mongo"]),
    (DbKind::Redis, &["redis"]),
];

/// Classify a single file's lower-cased text.
pub fn detect_io(lowered: &str) -> IoFlags {
    let mut flags = IoFlags::default();
    for rule in IO_RULES {
        if rule.markers.iter().any(|marker| lowered.contains(marker)) {
            flags.set(rule.flag);
        }
    }
    if flags.db {
        flags.db_kind = classify_db_kind(lowered);
    }
    flags
}

fn classify_db_kind(lowered: &str) -> Option<DbKind> {
    DB_KIND_RULES
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| lowered.contains(marker)))
        .map(|(kind, _)| *kind)
}
