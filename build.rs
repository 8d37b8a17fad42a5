//! Build script that ensures Cargo rebuilds when migrations change.
//!
//! `embed_migrations!` reads the SQL files at compile time, but Cargo does not
//! track them on its own.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
