//! Read-only traversal of the three strata.
//!
//! The `walk_*` functions visit every subtree, in the order a left-to-right
//! evaluator would run them: operands before the operation that consumes
//! them, a binder's defining expression before the binder, and both arms of
//! every conditional.

use super::{
    expr::{ContParam, Effect, Tail, Value},
    ident::{Label, Local},
    types::Type,
};

pub trait Visitor: Sized {
    type Error;

    fn visit_value(&mut self, value: &Value) -> Result<(), Self::Error> {
        walk_value(self, value)
    }

    fn visit_effect(&mut self, effect: &Effect) -> Result<(), Self::Error> {
        walk_effect(self, effect)
    }

    fn visit_tail(&mut self, tail: &Tail) -> Result<(), Self::Error> {
        walk_tail(self, tail)
    }

    /// Called for the local bound by a `Let`, a `Try`, or a named join-point
    /// parameter.
    fn visit_binder(&mut self, _local: &Local, _ty: &Type) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once per join point, before its handler is visited.
    fn visit_join_point(&mut self, cont: &Label, params: &[ContParam]) -> Result<(), Self::Error> {
        walk_join_point(self, cont, params)
    }
}

pub fn walk_join_point<V: Visitor>(
    visitor: &mut V,
    _cont: &Label,
    params: &[ContParam],
) -> Result<(), V::Error> {
    for param in params {
        if let Some(local) = &param.local {
            visitor.visit_binder(local, &param.ty)?;
        }
    }
    Ok(())
}

pub fn walk_value<V: Visitor>(visitor: &mut V, value: &Value) -> Result<(), V::Error> {
    match value {
        Value::I32(_)
        | Value::I64(_)
        | Value::F64(_)
        | Value::RefFunc(_)
        | Value::Var(_)
        | Value::GlobalGet(_) => Ok(()),
        Value::Let {
            local,
            ty,
            defining,
            body,
        } => {
            visitor.visit_value(defining)?;
            visitor.visit_binder(local, ty)?;
            visitor.visit_value(body)
        }
        Value::If {
            cond, then, else_, ..
        } => {
            visitor.visit_value(cond)?;
            visitor.visit_value(then)?;
            visitor.visit_value(else_)
        }
        Value::BinOp { lhs, rhs, .. } => {
            visitor.visit_value(lhs)?;
            visitor.visit_value(rhs)
        }
        Value::UnOp { arg, .. } | Value::RefCast { value: arg, .. } | Value::Throw(arg) => {
            visitor.visit_value(arg)
        }
        Value::StructNew { fields: values, .. }
        | Value::ArrayNewFixed { elems: values, .. }
        | Value::Call { args: values, .. }
        | Value::ApplyCont { args: values, .. } => {
            values.iter().try_for_each(|v| visitor.visit_value(v))
        }
        Value::CallRef { args, func, .. } => {
            args.iter().try_for_each(|v| visitor.visit_value(v))?;
            visitor.visit_value(func)
        }
        Value::Seq { effects, last } => {
            effects.iter().try_for_each(|e| visitor.visit_effect(e))?;
            visitor.visit_value(last)
        }
        Value::LetCont {
            cont,
            params,
            handler,
            body,
        } => {
            visitor.visit_join_point(cont, params)?;
            visitor.visit_value(handler)?;
            visitor.visit_value(body)
        }
        Value::BrOnCast { value, if_else, .. } => {
            visitor.visit_value(value)?;
            visitor.visit_value(if_else)
        }
        Value::BrIf { cond, if_else, .. } => {
            visitor.visit_value(cond)?;
            visitor.visit_value(if_else)
        }
        Value::Try {
            body,
            param,
            param_ty,
            handler,
            ..
        } => {
            visitor.visit_value(body)?;
            visitor.visit_binder(param, param_ty)?;
            visitor.visit_value(handler)
        }
        Value::Effect(effect) => visitor.visit_effect(effect),
        Value::NoReturn(tail) => visitor.visit_tail(tail),
    }
}

pub fn walk_effect<V: Visitor>(visitor: &mut V, effect: &Effect) -> Result<(), V::Error> {
    match effect {
        Effect::Seq(effects) => effects.iter().try_for_each(|e| visitor.visit_effect(e)),
        Effect::Drop(value) | Effect::BrIf { cond: value, .. } => visitor.visit_value(value),
        Effect::Store { target, value, .. } => {
            visitor.visit_value(target)?;
            visitor.visit_value(value)
        }
        Effect::Assign { value, .. } => visitor.visit_value(value),
        Effect::Loop { body, .. } => visitor.visit_effect(body),
        Effect::If { cond, then, else_ } => {
            visitor.visit_value(cond)?;
            visitor.visit_effect(then)?;
            visitor.visit_effect(else_)
        }
        Effect::Nop => Ok(()),
    }
}

pub fn walk_tail<V: Visitor>(visitor: &mut V, tail: &Tail) -> Result<(), V::Error> {
    match tail {
        Tail::LetCont {
            cont,
            params,
            handler,
            body,
        } => {
            visitor.visit_join_point(cont, params)?;
            visitor.visit_tail(handler)?;
            visitor.visit_tail(body)
        }
        Tail::If { cond, then, else_ } => {
            visitor.visit_value(cond)?;
            visitor.visit_tail(then)?;
            visitor.visit_tail(else_)
        }
        Tail::BrTable { index, .. } => visitor.visit_value(index),
        Tail::Br { arg, .. } => match arg {
            Some(arg) => visitor.visit_value(arg),
            None => Ok(()),
        },
        Tail::Unreachable => Ok(()),
    }
}
