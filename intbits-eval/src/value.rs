use std::fmt::{self, Display};

use intbits_set::BitSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Set(BitSet),
    Int(usize),
    Bool(bool),
    List(Vec<usize>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Set(_) => "set",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::List(_) => "list",
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Set(set) => write!(f, "{set}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(elems) => {
                f.write_str("[")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str("]")
            }
        }
    }
}
