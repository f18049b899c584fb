#![forbid(unsafe_code)]

mod entry;
mod handlers;
mod server;
mod support;

pub(crate) use support::*;

use cl_storage::SqliteStore;

// Protocol negotiation baseline. Clients that declare their own version get
// it echoed back; see server::lifecycle.
const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "courselab-api";
const SERVER_VERSION: &str = "0.1.0";

pub(crate) struct ApiServer {
    initialized: bool,
    store: SqliteStore,
}

fn usage() -> &'static str {
    "cl_api - CourseLab backend (JSON-RPC over stdio)\n\n\
USAGE:\n\
  cl_api [--storage-dir DIR]\n\
\n\
FLAGS:\n\
  -h, --help       Print this help and exit\n\
  -V, --version    Print version and exit\n\
\n\
NOTES:\n\
  - Store directory default: ./.courselab (override with COURSELAB_STORAGE_DIR)\n"
}

fn parse_storage_dir() -> std::path::PathBuf {
    let args = std::env::args().collect::<Vec<_>>();
    for pair in args.windows(2) {
        if pair[0] == "--storage-dir" {
            return std::path::PathBuf::from(&pair[1]);
        }
    }
    if let Ok(dir) = std::env::var("COURSELAB_STORAGE_DIR")
        && !dir.trim().is_empty()
    {
        return std::path::PathBuf::from(dir);
    }
    std::path::PathBuf::from(".courselab")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = std::env::args().collect::<Vec<_>>();
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-h" | "--help"))
    {
        print!("{}", usage());
        return Ok(());
    }
    if args
        .iter()
        .any(|arg| matches!(arg.as_str(), "-V" | "--version"))
    {
        println!("{SERVER_NAME} {SERVER_VERSION}");
        return Ok(());
    }

    let storage_dir = parse_storage_dir();
    let store = SqliteStore::open(&storage_dir)?;
    let mut server = ApiServer::new(store);
    entry::run_stdio(&mut server)
}
