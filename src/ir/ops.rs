use std::fmt;

use super::types::HeapType;

/// Operand width of integer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Width {
    W32,
    W64,
}

impl Width {
    fn prefix(self) -> &'static str {
        match self {
            Width::W32 => "i32",
            Width::W64 => "i64",
        }
    }
}

/// How the raw bits of an integer are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl Signedness {
    fn suffix(self) -> &'static str {
        match self {
            Signedness::Signed => "_s",
            Signedness::Unsigned => "_u",
        }
    }
}

/// Relational comparisons. Ordering comparisons carry their signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelOp {
    Eq,
    Ne,
    Lt(Signedness),
    Gt(Signedness),
    Le(Signedness),
    Ge(Signedness),
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelOp::Eq => write!(f, "eq"),
            RelOp::Ne => write!(f, "ne"),
            RelOp::Lt(s) => write!(f, "lt{}", s.suffix()),
            RelOp::Gt(s) => write!(f, "gt{}", s.suffix()),
            RelOp::Le(s) => write!(f, "le{}", s.suffix()),
            RelOp::Ge(s) => write!(f, "ge{}", s.suffix()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntOp {
    Add,
    Sub,
    Mul,
    And,
    Or,
    Xor,
    Shl,
    Shr(Signedness),
}

impl fmt::Display for IntOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntOp::Add => write!(f, "add"),
            IntOp::Sub => write!(f, "sub"),
            IntOp::Mul => write!(f, "mul"),
            IntOp::And => write!(f, "and"),
            IntOp::Or => write!(f, "or"),
            IntOp::Xor => write!(f, "xor"),
            IntOp::Shl => write!(f, "shl"),
            IntOp::Shr(s) => write!(f, "shr{}", s.suffix()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FloatOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for FloatOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatOp::Add => write!(f, "add"),
            FloatOp::Sub => write!(f, "sub"),
            FloatOp::Mul => write!(f, "mul"),
            FloatOp::Div => write!(f, "div"),
        }
    }
}

/// A binary operation producing a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinOp {
    Compare(Width, RelOp),
    Int(Width, IntOp),
    Float(FloatOp),
    /// Reference identity.
    RefEq,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Compare(width, op) => write!(f, "{}.{op}", width.prefix()),
            BinOp::Int(width, op) => write!(f, "{}.{op}", width.prefix()),
            BinOp::Float(op) => write!(f, "f64.{op}"),
            BinOp::RefEq => write!(f, "ref.eq"),
        }
    }
}

/// A unary operation producing a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnOp {
    /// Unbox a compact small-integer reference, sign extending it.
    I31GetS,
    /// Box an `i32` into a compact small-integer reference.
    RefI31,
    /// Test whether a reference is a compact small integer.
    IsI31,
    StructGet {
        ty: HeapType,
        field: u32,
    },
    /// Read a sub-word field, extending it to `i32`.
    StructGetPacked {
        ty: HeapType,
        field: u32,
        extend: Signedness,
    },
    ArrayLen,
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::I31GetS => write!(f, "i31.get_s"),
            UnOp::RefI31 => write!(f, "ref.i31"),
            UnOp::IsI31 => write!(f, "ref.test i31"),
            UnOp::StructGet { ty, field } => write!(f, "struct.get {ty} {field}"),
            UnOp::StructGetPacked { ty, field, extend } => {
                write!(f, "struct.get{} {ty} {field}", extend.suffix())
            }
            UnOp::ArrayLen => write!(f, "array.len"),
        }
    }
}

/// A binary operation whose result is a heap mutation rather than a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreOp {
    StructSet { ty: HeapType, field: u32 },
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::StructSet { ty, field } => write!(f, "struct.set {ty} {field}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BinOp, FloatOp, IntOp, RelOp, Signedness, StoreOp, UnOp, Width};
    use crate::ir::types::HeapType;
    use test_case::test_case;

    #[test_case(BinOp::Int(Width::W32, IntOp::Add), "i32.add" ; "add")]
    #[test_case(BinOp::Int(Width::W64, IntOp::Shr(Signedness::Unsigned)), "i64.shr_u" ; "shr_u")]
    #[test_case(BinOp::Compare(Width::W32, RelOp::Lt(Signedness::Signed)), "i32.lt_s" ; "lt_s")]
    #[test_case(BinOp::Compare(Width::W64, RelOp::Eq), "i64.eq" ; "eq")]
    #[test_case(BinOp::Float(FloatOp::Div), "f64.div" ; "fdiv")]
    #[test_case(BinOp::RefEq, "ref.eq" ; "ref_eq")]
    fn binop_mnemonics(op: BinOp, expected: &str) {
        assert_eq!(op.to_string(), expected);
    }

    #[test]
    fn field_access_mnemonics() {
        let block = HeapType::new("block");
        assert_eq!(
            UnOp::StructGet {
                ty: block.clone(),
                field: 2
            }
            .to_string(),
            "struct.get $block 2"
        );
        assert_eq!(
            UnOp::StructGetPacked {
                ty: block.clone(),
                field: 0,
                extend: Signedness::Unsigned
            }
            .to_string(),
            "struct.get_u $block 0"
        );
        assert_eq!(
            StoreOp::StructSet {
                ty: block,
                field: 1
            }
            .to_string(),
            "struct.set $block 1"
        );
    }
}
