//! Computes the locals a function body has to declare.

use std::collections::{BTreeMap, btree_map::Entry};

use tracing::{debug, error, instrument, trace};

use super::{
    FunctionBody,
    errors::LocalsError,
    expr::ContParam,
    ident::{Label, Local, Slot},
    types::Type,
    visit::{Visitor, walk_join_point},
};
use crate::compile_unit_info::BackendMode;

/// Every slot bound in a body, with its one type.
pub type RequiredLocals = BTreeMap<Slot, Type>;

/// Collects every local bound anywhere in `body`.
///
/// Function parameters are never part of the result. A local bound at several
/// places must have the same type at each of them, otherwise the tree is
/// rejected. In [`BackendMode::Aggregate`], a join point with two or more
/// parameters also requires a tuple slot keyed by its label.
#[instrument(level = "debug", skip_all, fields(mode = ?mode))]
pub fn required_locals(
    body: &FunctionBody,
    mode: BackendMode,
) -> Result<RequiredLocals, LocalsError> {
    let mut collector = LocalsCollector {
        mode,
        locals: RequiredLocals::new(),
    };

    match body {
        FunctionBody::Value { body, .. } => collector.visit_value(body)?,
        FunctionBody::Effect(body) => collector.visit_effect(body)?,
    }

    debug!("found {} required locals", collector.locals.len());
    Ok(collector.locals)
}

struct LocalsCollector {
    mode: BackendMode,
    locals: RequiredLocals,
}

impl LocalsCollector {
    fn declare(&mut self, slot: Slot, ty: &Type) -> Result<(), LocalsError> {
        match self.locals.entry(slot) {
            Entry::Vacant(entry) => {
                trace!("declaring {} : {}", entry.key(), ty);
                entry.insert(ty.clone());
            }
            Entry::Occupied(entry) => {
                if entry.get() != ty {
                    error!(
                        "{} rebound as {} but declared as {}",
                        entry.key(),
                        ty,
                        entry.get()
                    );
                    return Err(LocalsError::TypeMismatch {
                        slot: entry.key().clone(),
                        previous: entry.get().clone(),
                        found: ty.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Visitor for LocalsCollector {
    type Error = LocalsError;

    fn visit_binder(&mut self, local: &Local, ty: &Type) -> Result<(), LocalsError> {
        self.declare(Slot::Local(local.clone()), ty)
    }

    fn visit_join_point(&mut self, cont: &Label, params: &[ContParam]) -> Result<(), LocalsError> {
        walk_join_point(self, cont, params)?;

        if self.mode == BackendMode::Aggregate && params.len() >= 2 {
            let tuple = Type::tuple(params.iter().map(|param| param.ty.clone()));
            self.declare(Slot::Label(cont.clone()), &tuple)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{RequiredLocals, required_locals};
    use crate::{
        compile_unit_info::BackendMode,
        ir::{
            FunctionBody,
            errors::LocalsError,
            expr::{ContParam, Effect, Tail, Value},
            ident::{IdGenerator, Slot},
            ops::{BinOp, IntOp, UnOp, Width},
            types::Type,
        },
    };

    fn value_body(body: Value) -> FunctionBody {
        FunctionBody::Value {
            body,
            result: Type::I32,
        }
    }

    fn analyze(body: Value, mode: BackendMode) -> RequiredLocals {
        required_locals(&value_body(body), mode).expect("well-formed tree")
    }

    #[test]
    fn let_binds_its_local() {
        let mut ids = IdGenerator::new();
        let x = ids.fresh_local("x");

        let body = Value::let_(x.clone(), Type::I32, Value::I32(5), Value::var(x.clone()));
        let locals = analyze(body, BackendMode::PerParameter);

        assert_eq!(locals.len(), 1);
        assert_eq!(locals.get(&Slot::Local(x)), Some(&Type::I32));
    }

    #[test]
    fn parameters_are_not_declared() {
        let mut ids = IdGenerator::new();
        let p = ids.fresh_param("p");

        let body = Value::binop(
            BinOp::Int(Width::W32, IntOp::Add),
            Value::var(p.clone()),
            Value::I32(1),
        );
        assert!(analyze(body, BackendMode::Aggregate).is_empty());
    }

    #[test]
    fn both_branches_are_visited() {
        let mut ids = IdGenerator::new();
        let a = ids.fresh_local("a");
        let b = ids.fresh_local("b");

        let body = Value::if_(
            Type::I32,
            Value::I32(1),
            Value::let_(a.clone(), Type::I32, Value::I32(2), Value::var(a.clone())),
            Value::let_(b.clone(), Type::I64, Value::I64(3), Value::I32(0)),
        );
        let locals = analyze(body, BackendMode::PerParameter);

        assert_eq!(locals.get(&Slot::Local(a)), Some(&Type::I32));
        assert_eq!(locals.get(&Slot::Local(b)), Some(&Type::I64));
    }

    #[test]
    fn same_local_same_type_is_declared_once() {
        let mut ids = IdGenerator::new();
        let x = ids.fresh_local("x");

        let body = Value::if_(
            Type::I32,
            Value::I32(1),
            Value::let_(x.clone(), Type::I32, Value::I32(2), Value::var(x.clone())),
            Value::let_(x.clone(), Type::I32, Value::I32(3), Value::var(x.clone())),
        );
        let locals = analyze(body, BackendMode::PerParameter);

        assert_eq!(locals.len(), 1);
    }

    #[test]
    fn rebinding_with_another_type_fails() {
        let mut ids = IdGenerator::new();
        let x = ids.fresh_local("x");

        let body = Value::let_(
            x.clone(),
            Type::I32,
            Value::I32(1),
            Value::let_(x.clone(), Type::F64, Value::F64(1.0), Value::I32(0)),
        );
        let error = required_locals(&value_body(body), BackendMode::PerParameter)
            .expect_err("type mismatch");

        assert_eq!(
            error,
            LocalsError::TypeMismatch {
                slot: Slot::Local(x),
                previous: Type::I32,
                found: Type::F64,
            }
        );
    }

    #[test]
    fn try_binds_exception_parameter() {
        let mut ids = IdGenerator::new();
        let exn = ids.fresh_local("exn");

        let body = Value::try_(
            Type::I32,
            Value::throw(Value::unop(UnOp::RefI31, Value::I32(3))),
            exn.clone(),
            Type::reference("exn"),
            Value::I32(0),
        );
        let locals = analyze(body, BackendMode::PerParameter);

        assert_eq!(locals.get(&Slot::Local(exn)), Some(&Type::reference("exn")));
    }

    #[test]
    fn join_point_parameters_by_mode() {
        let mut ids = IdGenerator::new();
        let k = ids.fresh_label("k");
        let a = ids.fresh_local("a");
        let b = ids.fresh_local("b");

        let body = Value::let_cont(
            k.clone(),
            vec![
                ContParam::named(a.clone(), Type::I32),
                ContParam::named(b.clone(), Type::I32),
            ],
            Value::binop(
                BinOp::Int(Width::W32, IntOp::Add),
                Value::var(a.clone()),
                Value::var(b.clone()),
            ),
            Value::apply_cont(k.clone(), vec![Value::I32(1), Value::I32(2)]),
        );

        let per_param = analyze(body.clone(), BackendMode::PerParameter);
        assert_eq!(per_param.len(), 2);
        assert!(!per_param.contains_key(&Slot::Label(k.clone())));

        let aggregate = analyze(body, BackendMode::Aggregate);
        assert_eq!(aggregate.len(), 3);
        assert_eq!(
            aggregate.get(&Slot::Label(k)),
            Some(&Type::tuple([Type::I32, Type::I32]))
        );
    }

    #[test]
    fn unnamed_parameters_count_towards_the_tuple() {
        let mut ids = IdGenerator::new();
        let k = ids.fresh_label("k");
        let a = ids.fresh_local("a");

        let body = Tail::let_cont(
            k.clone(),
            vec![
                ContParam::unnamed(Type::F64),
                ContParam::named(a.clone(), Type::I64),
            ],
            Tail::Unreachable,
            Tail::br(k.clone(), Value::I32(0)),
        );
        let locals = required_locals(
            &FunctionBody::Effect(Effect::drop(Value::no_return(body))),
            BackendMode::Aggregate,
        )
        .expect("well-formed tree");

        assert_eq!(locals.len(), 2);
        assert_eq!(locals.get(&Slot::Local(a)), Some(&Type::I64));
        assert_eq!(
            locals.get(&Slot::Label(k)),
            Some(&Type::tuple([Type::F64, Type::I64]))
        );
    }
}
