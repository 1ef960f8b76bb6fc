//! Output formats for parse trees and parse tables
//!
//! Trees serialize through a [FormatRegistry] (treeviz, json, yaml). Tables have their own
//! text and JSON dumps in [table].

pub mod registry;
pub mod table;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter, JsonFormatter, YamlFormatter};
pub use table::{table_to_json, table_to_text, TableDump};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
