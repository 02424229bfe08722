pub mod errors;
pub mod expr;
pub mod ident;
pub mod locals;
pub mod ops;
pub mod printer;
pub mod types;
pub mod visit;

pub use errors::{LocalsError, PrintError};
pub use expr::{ContParam, Effect, Tail, Value};
pub use ident::{FuncId, GlobalId, IdGenerator, Label, Local, Param, Slot, Var};
pub use locals::{RequiredLocals, required_locals};
pub use types::{HeapType, Type};

/// The body of a function, as built by the lowering stage.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    /// A function returning one value of type `result`.
    Value { body: Value, result: Type },
    /// A function with no result.
    Effect(Effect),
}

impl FunctionBody {
    pub fn result_type(&self) -> Option<&Type> {
        match self {
            FunctionBody::Value { result, .. } => Some(result),
            FunctionBody::Effect(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: FuncId,
    /// Declared by the signature, so never part of the body's locals.
    pub params: Vec<(Param, Type)>,
    pub body: FunctionBody,
}

impl Function {
    pub fn get_params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().map(|(param, _)| param)
    }
}
