//! ts-catalog
//!
//! Parser, validator, and runtime lookup for Qt Linguist `.ts` translation
//! catalogs.

pub mod catalog;
pub mod config;
pub mod lint;
pub mod plural;
pub mod ts;
pub mod types;
pub mod workspace;

pub use catalog::Catalog;
pub use ts::{
    TsDocument,
    TsError,
    read_ts_file,
    read_ts_str,
    write_ts_string,
};
