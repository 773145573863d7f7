//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `leadflow_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use leadflow_core::db::open_db_in_memory;
use leadflow_core::{BoardService, SqliteStateStore, Status};

fn main() {
    println!("leadflow_core ping={}", leadflow_core::ping());
    println!("leadflow_core version={}", leadflow_core::core_version());

    // Probe the full open path against a throwaway in-memory store.
    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("leadflow_core db_open failed: {err}");
            std::process::exit(1);
        }
    };
    let store = match SqliteStateStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("leadflow_core store init failed: {err}");
            std::process::exit(1);
        }
    };
    match BoardService::open(store) {
        Ok(service) => {
            for status in Status::ALL {
                let column = service.board().column(status);
                println!(
                    "column {}: {} lead(s)",
                    status.title(),
                    column.lead_ids.len()
                );
            }
        }
        Err(err) => {
            eprintln!("leadflow_core board open failed: {err}");
            std::process::exit(1);
        }
    }
}
