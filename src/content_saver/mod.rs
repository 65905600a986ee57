//! Converting page bodies to AsciiDoc and saving them to disk

pub mod asciidoc_converter;
mod asciidoc_saver;
mod naming;

pub use asciidoc_converter::{
    ConversionError, ConversionOptions, ConversionResult, convert_storage_to_asciidoc,
};
pub use asciidoc_saver::{ensure_output_folder, save_asciidoc_page};
pub use naming::filename_basis;
