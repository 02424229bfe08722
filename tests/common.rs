use strata::ir::{
    ContParam, Effect, Function, FunctionBody, HeapType, IdGenerator, Tail, Type, Value,
    ident::FuncId,
    ops::{BinOp, IntOp, RelOp, Signedness, UnOp, Width},
};
use tracing_subscriber::EnvFilter;

#[allow(unused)] // false positive
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(unused)]
pub fn block() -> HeapType {
    HeapType::new("block")
}

#[allow(unused)]
pub fn i32_add(lhs: Value, rhs: Value) -> Value {
    Value::binop(BinOp::Int(Width::W32, IntOp::Add), lhs, rhs)
}

/// `tag_of(v)`: the tag byte of a block, or the unboxed integer itself.
///
/// Binds `b` through a join point and `tag` through a `Let`.
#[allow(unused)]
pub fn tag_of(ids: &mut IdGenerator) -> Function {
    let v = ids.fresh_param("v");
    let on_block = ids.fresh_label("on_block");
    let b = ids.fresh_local("b");
    let tag = ids.fresh_local("tag");

    let handler = Value::let_(
        tag.clone(),
        Type::I32,
        Value::unop(
            UnOp::StructGetPacked {
                ty: block(),
                field: 0,
                extend: Signedness::Unsigned,
            },
            Value::var(b.clone()),
        ),
        Value::var(tag),
    );
    let body = Value::br_on_cast(
        Value::var(v.clone()),
        block(),
        on_block.clone(),
        Value::unop(UnOp::I31GetS, Value::var(v.clone())),
    );

    Function {
        name: FuncId::new("tag_of"),
        params: vec![(v, Type::reference("value"))],
        body: FunctionBody::Value {
            body: Value::let_cont(
                on_block,
                vec![ContParam::named(b, Type::Ref(block()))],
                handler,
                body,
            ),
            result: Type::I32,
        },
    }
}

/// `count_down(n)`: loops until `next(n)` reaches zero, then dispatches on
/// the remainder through a two-parameter join point.
#[allow(unused)]
pub fn count_down(ids: &mut IdGenerator) -> Function {
    let n = ids.fresh_param("n");
    let head = ids.fresh_label("head");
    let i = ids.fresh_local("i");
    let done = ids.fresh_label("done");
    let lo = ids.fresh_local("lo");
    let hi = ids.fresh_local("hi");
    let case0 = ids.fresh_label("case0");
    let exit = ids.fresh_label("exit");

    let step = Effect::loop_(
        head.clone(),
        Effect::drop(Value::let_(
            i.clone(),
            Type::I32,
            Value::call(FuncId::new("next"), vec![Value::var(n.clone())]),
            Value::seq(
                vec![
                    Effect::assign(n.clone(), Value::var(i.clone())),
                    Effect::br_if(
                        Value::binop(
                            BinOp::Compare(Width::W32, RelOp::Ne),
                            Value::var(i.clone()),
                            Value::I32(0),
                        ),
                        head,
                    ),
                ],
                Value::I32(0),
            ),
        )),
    );

    let dispatch = Tail::let_cont(
        done.clone(),
        vec![
            ContParam::named(lo.clone(), Type::I32),
            ContParam::named(hi.clone(), Type::I32),
        ],
        Tail::br_table(
            i32_add(Value::var(lo), Value::var(hi)),
            vec![case0],
            exit,
        ),
        Tail::Unreachable,
    );

    Function {
        name: FuncId::new("count_down"),
        params: vec![(n, Type::I32)],
        body: FunctionBody::Effect(Effect::seq(vec![
            step,
            Effect::drop(Value::no_return(dispatch)),
        ])),
    }
}
