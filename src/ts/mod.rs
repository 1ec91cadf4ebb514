//! Qt Linguist TS documents: model, reader and writer.

mod error;
mod language;
mod model;
mod reader;
mod writer;

pub use error::TsError;
pub use language::detect_language_from_path;
pub use model::{
    Context,
    Location,
    Message,
    MessageKey,
    Translation,
    TranslationStatus,
    TsDocument,
    base_language,
};
pub use reader::{
    read_ts_file,
    read_ts_str,
};
pub use writer::write_ts_string;
