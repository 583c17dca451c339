use std::fmt;

/// Constant value appearing in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    String(String),
    Null,
}

impl Literal {
    pub const TRUE: Literal = Literal::Bool(true);
    pub const FALSE: Literal = Literal::Bool(false);

    pub fn is_true(&self) -> bool {
        *self == Literal::TRUE
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(true) => f.write_str("TRUE"),
            Literal::Bool(false) => f.write_str("FALSE"),
            Literal::Int(value) => write!(f, "{}", value),
            // SQL quoting: embedded quotes are doubled
            Literal::String(value) => write!(f, "'{}'", value.replace('\'', "''")),
            Literal::Null => f.write_str("NULL"),
        }
    }
}
