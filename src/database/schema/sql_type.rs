use serde::{Deserialize, Serialize};
use std::fmt;

/// Value types known to the analyzer.
///
/// Symbols and tuple descriptor fields carry one of these. `Unknown` is used
/// for untyped NULL literals and for anything the type checker has not
/// resolved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlType {
    /// SQL boolean
    Boolean,
    /// 64-bit integer
    Bigint,
    /// Double precision floating point
    Double,
    /// Variable length string
    Varchar,
    /// Not resolved yet
    Unknown,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SqlType::Boolean => "boolean",
            SqlType::Bigint => "bigint",
            SqlType::Double => "double",
            SqlType::Varchar => "varchar",
            SqlType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}
