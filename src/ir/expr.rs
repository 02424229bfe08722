//! The stratified expression tree.
//!
//! Expressions are split by how they hand control back:
//! - [`Value`] evaluates to exactly one value,
//! - [`Effect`] evaluates for its side effects and produces nothing,
//! - [`Tail`] never returns to its syntactic successor.
//!
//! A branch table can't be read as a value and an effect can't be used as
//! an operand: the emitter gets those guarantees from the types.

use super::{
    ident::{FuncId, GlobalId, Label, Local, Var},
    ops::{BinOp, StoreOp, UnOp},
    types::{HeapType, Type},
};

/// A parameter of a join point. Unnamed parameters are placeholders that
/// nothing reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ContParam {
    pub local: Option<Local>,
    pub ty: Type,
}

impl ContParam {
    pub fn named(local: Local, ty: Type) -> Self {
        Self {
            local: Some(local),
            ty,
        }
    }

    pub fn unnamed(ty: Type) -> Self {
        Self { local: None, ty }
    }
}

/// An expression producing one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    I32(i32),
    I64(i64),
    F64(f64),
    RefFunc(FuncId),
    Var(Var),
    /// Binds `local` to `defining`, visible only in `body`.
    Let {
        local: Local,
        ty: Type,
        defining: Box<Value>,
        body: Box<Value>,
    },
    If {
        ty: Type,
        cond: Box<Value>,
        then: Box<Value>,
        else_: Box<Value>,
    },
    BinOp {
        op: BinOp,
        lhs: Box<Value>,
        rhs: Box<Value>,
    },
    UnOp {
        op: UnOp,
        arg: Box<Value>,
    },
    StructNew {
        ty: HeapType,
        fields: Vec<Value>,
    },
    ArrayNewFixed {
        ty: HeapType,
        elems: Vec<Value>,
    },
    /// Checked downcast to `ty`.
    RefCast {
        ty: HeapType,
        value: Box<Value>,
    },
    Call {
        func: FuncId,
        args: Vec<Value>,
    },
    /// Call through a function reference of type `ty`. The arguments are
    /// evaluated before the callee.
    CallRef {
        ty: HeapType,
        args: Vec<Value>,
        func: Box<Value>,
    },
    GlobalGet(GlobalId),
    Seq {
        effects: Vec<Effect>,
        last: Box<Value>,
    },
    /// Introduces the join point `cont`. Its parameters are visible only in
    /// `handler`, the label only in `body`.
    LetCont {
        cont: Label,
        params: Vec<ContParam>,
        handler: Box<Value>,
        body: Box<Value>,
    },
    /// Jumps to `cont`, whose handler produces the value.
    ApplyCont {
        cont: Label,
        args: Vec<Value>,
    },
    /// Branches to `if_cast` with the recast value when `value` has heap type
    /// `cast`, evaluates `if_else` otherwise.
    BrOnCast {
        value: Box<Value>,
        cast: HeapType,
        if_cast: Label,
        if_else: Box<Value>,
    },
    BrIf {
        cond: Box<Value>,
        if_true: Label,
        if_else: Box<Value>,
    },
    /// Evaluates `body`; if it throws, binds the thrown value to `param` and
    /// evaluates `handler` instead.
    Try {
        ty: Type,
        body: Box<Value>,
        param: Local,
        param_ty: Type,
        handler: Box<Value>,
    },
    Throw(Box<Value>),
    Effect(Box<Effect>),
    NoReturn(Box<Tail>),
}

/// An expression evaluated only for its side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Seq(Vec<Effect>),
    Drop(Box<Value>),
    Store {
        op: StoreOp,
        target: Box<Value>,
        value: Box<Value>,
    },
    Assign {
        var: Var,
        value: Box<Value>,
    },
    /// Binds `cont` for backward branches from inside `body`.
    Loop {
        cont: Label,
        body: Box<Effect>,
    },
    BrIf {
        cond: Box<Value>,
        if_true: Label,
    },
    If {
        cond: Box<Value>,
        then: Box<Effect>,
        else_: Box<Effect>,
    },
    Nop,
}

/// An expression that never returns to its successor.
#[derive(Debug, Clone, PartialEq)]
pub enum Tail {
    LetCont {
        cont: Label,
        params: Vec<ContParam>,
        handler: Box<Tail>,
        body: Box<Tail>,
    },
    If {
        cond: Box<Value>,
        then: Box<Tail>,
        else_: Box<Tail>,
    },
    /// Jumps to `cases[index]`, or to `default` when out of range.
    BrTable {
        index: Box<Value>,
        cases: Vec<Label>,
        default: Label,
    },
    Br {
        cont: Label,
        arg: Option<Box<Value>>,
    },
    Unreachable,
}

impl Value {
    pub fn var(var: impl Into<Var>) -> Self {
        Value::Var(var.into())
    }

    pub fn let_(local: Local, ty: Type, defining: Value, body: Value) -> Self {
        Value::Let {
            local,
            ty,
            defining: Box::new(defining),
            body: Box::new(body),
        }
    }

    pub fn if_(ty: Type, cond: Value, then: Value, else_: Value) -> Self {
        Value::If {
            ty,
            cond: Box::new(cond),
            then: Box::new(then),
            else_: Box::new(else_),
        }
    }

    pub fn binop(op: BinOp, lhs: Value, rhs: Value) -> Self {
        Value::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unop(op: UnOp, arg: Value) -> Self {
        Value::UnOp {
            op,
            arg: Box::new(arg),
        }
    }

    pub fn struct_new(ty: HeapType, fields: Vec<Value>) -> Self {
        Value::StructNew { ty, fields }
    }

    pub fn array_new_fixed(ty: HeapType, elems: Vec<Value>) -> Self {
        Value::ArrayNewFixed { ty, elems }
    }

    pub fn ref_cast(ty: HeapType, value: Value) -> Self {
        Value::RefCast {
            ty,
            value: Box::new(value),
        }
    }

    pub fn call(func: FuncId, args: Vec<Value>) -> Self {
        Value::Call { func, args }
    }

    pub fn call_ref(ty: HeapType, args: Vec<Value>, func: Value) -> Self {
        Value::CallRef {
            ty,
            args,
            func: Box::new(func),
        }
    }

    pub fn seq(effects: Vec<Effect>, last: Value) -> Self {
        Value::Seq {
            effects,
            last: Box::new(last),
        }
    }

    pub fn let_cont(cont: Label, params: Vec<ContParam>, handler: Value, body: Value) -> Self {
        Value::LetCont {
            cont,
            params,
            handler: Box::new(handler),
            body: Box::new(body),
        }
    }

    pub fn apply_cont(cont: Label, args: Vec<Value>) -> Self {
        Value::ApplyCont { cont, args }
    }

    pub fn br_on_cast(value: Value, cast: HeapType, if_cast: Label, if_else: Value) -> Self {
        Value::BrOnCast {
            value: Box::new(value),
            cast,
            if_cast,
            if_else: Box::new(if_else),
        }
    }

    pub fn br_if(cond: Value, if_true: Label, if_else: Value) -> Self {
        Value::BrIf {
            cond: Box::new(cond),
            if_true,
            if_else: Box::new(if_else),
        }
    }

    pub fn try_(ty: Type, body: Value, param: Local, param_ty: Type, handler: Value) -> Self {
        Value::Try {
            ty,
            body: Box::new(body),
            param,
            param_ty,
            handler: Box::new(handler),
        }
    }

    pub fn throw(value: Value) -> Self {
        Value::Throw(Box::new(value))
    }

    pub fn effect(effect: Effect) -> Self {
        Value::Effect(Box::new(effect))
    }

    pub fn no_return(tail: Tail) -> Self {
        Value::NoReturn(Box::new(tail))
    }
}

impl From<Effect> for Value {
    fn from(effect: Effect) -> Self {
        Value::effect(effect)
    }
}

impl From<Tail> for Value {
    fn from(tail: Tail) -> Self {
        Value::no_return(tail)
    }
}

impl Effect {
    pub fn seq(effects: Vec<Effect>) -> Self {
        Effect::Seq(effects)
    }

    pub fn drop(value: Value) -> Self {
        Effect::Drop(Box::new(value))
    }

    pub fn store(op: StoreOp, target: Value, value: Value) -> Self {
        Effect::Store {
            op,
            target: Box::new(target),
            value: Box::new(value),
        }
    }

    pub fn struct_set(ty: HeapType, field: u32, target: Value, value: Value) -> Self {
        Effect::store(StoreOp::StructSet { ty, field }, target, value)
    }

    pub fn assign(var: impl Into<Var>, value: Value) -> Self {
        Effect::Assign {
            var: var.into(),
            value: Box::new(value),
        }
    }

    pub fn loop_(cont: Label, body: Effect) -> Self {
        Effect::Loop {
            cont,
            body: Box::new(body),
        }
    }

    pub fn br_if(cond: Value, if_true: Label) -> Self {
        Effect::BrIf {
            cond: Box::new(cond),
            if_true,
        }
    }

    pub fn if_(cond: Value, then: Effect, else_: Effect) -> Self {
        Effect::If {
            cond: Box::new(cond),
            then: Box::new(then),
            else_: Box::new(else_),
        }
    }
}

impl Tail {
    pub fn let_cont(cont: Label, params: Vec<ContParam>, handler: Tail, body: Tail) -> Self {
        Tail::LetCont {
            cont,
            params,
            handler: Box::new(handler),
            body: Box::new(body),
        }
    }

    pub fn if_(cond: Value, then: Tail, else_: Tail) -> Self {
        Tail::If {
            cond: Box::new(cond),
            then: Box::new(then),
            else_: Box::new(else_),
        }
    }

    pub fn br_table(index: Value, cases: Vec<Label>, default: Label) -> Self {
        Tail::BrTable {
            index: Box::new(index),
            cases,
            default,
        }
    }

    pub fn br(cont: Label, arg: Value) -> Self {
        Tail::Br {
            cont,
            arg: Some(Box::new(arg)),
        }
    }

    /// Branch to a join point that takes no parameters.
    pub fn br_empty(cont: Label) -> Self {
        Tail::Br { cont, arg: None }
    }
}
