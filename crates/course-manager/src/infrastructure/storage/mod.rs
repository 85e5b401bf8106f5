//! Storage infrastructure.
//!
//! - **`records`** – [`records::FileRecordStore`], the `RecordStore` used in
//!   production: one record per line in a plain text file.
//! - **`mock`**    – [`mock::MemoryRecordStore`], an in-memory store for tests
//!   that can be told to fail.
//! - **`config`**  – reading and writing the TOML configuration file.

pub mod config;
pub mod mock;
pub mod records;

pub use mock::MemoryRecordStore;
pub use records::FileRecordStore;
