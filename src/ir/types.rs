use std::fmt;

use itertools::Itertools;

/// A named heap type, e.g. a struct, array or function type declared in the
/// module's type section.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeapType(String);

impl HeapType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// An atom type. Equality is structural, tuples compare element-wise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    I32,
    I64,
    F64,
    /// A reference to a value of the given heap type.
    Ref(HeapType),
    Tuple(Vec<Type>),
}

impl Type {
    pub fn tuple(types: impl IntoIterator<Item = Type>) -> Self {
        Type::Tuple(types.into_iter().collect())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Type::Ref(HeapType::new(name))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, Type::Tuple(_))
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::I32 => write!(f, "i32"),
            Type::I64 => write!(f, "i64"),
            Type::F64 => write!(f, "f64"),
            Type::Ref(ty) => write!(f, "(ref {ty})"),
            Type::Tuple(types) if types.is_empty() => write!(f, "(tuple)"),
            Type::Tuple(types) => write!(f, "(tuple {})", types.iter().join(" ")),
        }
    }
}
