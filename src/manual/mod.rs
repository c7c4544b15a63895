//! Game manuals.
//!
//! The catalog of manuals and variations, plus JSON import/export of single
//! manuals.

pub mod catalog;
pub mod transfer;

pub use catalog::{Catalog, Manual, Move, Variation};
pub use transfer::{
    export_file_name, export_manual, export_to_dir, import_file, import_manual, ManualError,
};
