//! Debug listing of the IR as nested s-expressions.
//!
//! The layout is stable so listings can be compared in tests. Every node
//! opens a new line, indented two spaces per level; its closing paren goes at
//! the end of its last child.

use std::fmt::Display;

use itertools::Itertools;

use super::{
    Function, FunctionBody,
    errors::PrintError,
    expr::{ContParam, Effect, Tail, Value},
    ident::Label,
};

const INDENT: &str = "  ";

pub fn print_value(value: &Value) -> Result<String, PrintError> {
    let mut printer = Printer::default();
    printer.value(value)?;
    Ok(printer.out)
}

pub fn print_effect(effect: &Effect) -> Result<String, PrintError> {
    let mut printer = Printer::default();
    printer.effect(effect)?;
    Ok(printer.out)
}

pub fn print_tail(tail: &Tail) -> Result<String, PrintError> {
    let mut printer = Printer::default();
    printer.tail(tail)?;
    Ok(printer.out)
}

pub fn print_body(body: &FunctionBody) -> Result<String, PrintError> {
    let mut printer = Printer::default();
    match body {
        FunctionBody::Value { body, result } => {
            printer.node(format!("body (result {result})"), |p| p.value(body))?
        }
        FunctionBody::Effect(body) => printer.node("body", |p| p.effect(body))?,
    }
    Ok(printer.out)
}

pub fn print_function(function: &Function) -> Result<String, PrintError> {
    let mut head = format!("func {}", function.name);
    for (param, ty) in &function.params {
        head.push_str(&format!(" (param {param} {ty})"));
    }
    if let Some(result) = function.body.result_type() {
        head.push_str(&format!(" (result {result})"));
    }

    let mut printer = Printer::default();
    printer.node(head, |p| match &function.body {
        FunctionBody::Value { body, .. } => p.value(body),
        FunctionBody::Effect(body) => p.effect(body),
    })?;
    Ok(printer.out)
}

fn join_point_head(cont: &Label, params: &[ContParam]) -> String {
    let params = params
        .iter()
        .map(|param| match &param.local {
            Some(local) => format!("({local} {})", param.ty),
            None => format!("(_ {})", param.ty),
        })
        .join(" ");

    if params.is_empty() {
        format!("let_cont {cont}")
    } else {
        format!("let_cont {cont} {params}")
    }
}

#[derive(Debug, Default)]
struct Printer {
    out: String,
    depth: usize,
}

impl Printer {
    fn line(&mut self, text: &str) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
    }

    fn atom(&mut self, text: impl Display) -> Result<(), PrintError> {
        self.line(&format!("({text})"));
        Ok(())
    }

    fn node<F>(&mut self, head: impl Display, children: F) -> Result<(), PrintError>
    where
        F: FnOnce(&mut Self) -> Result<(), PrintError>,
    {
        self.line(&format!("({head}"));
        self.depth += 1;
        children(self)?;
        self.depth -= 1;
        self.out.push(')');
        Ok(())
    }

    fn values(&mut self, values: &[Value]) -> Result<(), PrintError> {
        values.iter().try_for_each(|value| self.value(value))
    }

    fn value(&mut self, value: &Value) -> Result<(), PrintError> {
        match value {
            Value::I32(n) => self.atom(format!("i32.const {n}")),
            Value::I64(n) => self.atom(format!("i64.const {n}")),
            Value::F64(n) => self.atom(format!("f64.const {n:?}")),
            Value::RefFunc(func) => self.atom(format!("ref.func {func}")),
            Value::Var(var) => self.atom(format!("local.get {var}")),
            Value::Let {
                local,
                ty,
                defining,
                body,
            } => self.node(format!("let {local} {ty}"), |p| {
                p.value(defining)?;
                p.value(body)
            }),
            Value::If {
                ty,
                cond,
                then,
                else_,
            } => self.node(format!("if (result {ty})"), |p| {
                p.value(cond)?;
                p.node("then", |p| p.value(then))?;
                p.node("else", |p| p.value(else_))
            }),
            Value::BinOp { op, lhs, rhs } => self.node(op, |p| {
                p.value(lhs)?;
                p.value(rhs)
            }),
            Value::UnOp { op, arg } => self.node(op, |p| p.value(arg)),
            Value::StructNew { ty, fields } => {
                self.node(format!("struct.new {ty}"), |p| p.values(fields))
            }
            Value::ArrayNewFixed { ty, elems } => self.node(
                format!("array.new_fixed {ty} {}", elems.len()),
                |p| p.values(elems),
            ),
            Value::RefCast { ty, value } => self.node(format!("ref.cast {ty}"), |p| p.value(value)),
            Value::Call { func, args } => self.node(format!("call {func}"), |p| p.values(args)),
            Value::CallRef { ty, args, func } => self.node(format!("call_ref {ty}"), |p| {
                p.values(args)?;
                p.value(func)
            }),
            Value::GlobalGet(global) => self.atom(format!("global.get {global}")),
            Value::Seq { effects, last } => self.node("seq", |p| {
                effects.iter().try_for_each(|effect| p.effect(effect))?;
                p.value(last)
            }),
            Value::LetCont {
                cont,
                params,
                handler,
                body,
            } => self.node(join_point_head(cont, params), |p| {
                p.node("handler", |p| p.value(handler))?;
                p.node("body", |p| p.value(body))
            }),
            Value::ApplyCont { cont, args } => {
                self.node(format!("apply_cont {cont}"), |p| p.values(args))
            }
            Value::BrOnCast {
                value,
                cast,
                if_cast,
                if_else,
            } => self.node(format!("br_on_cast {if_cast} {cast}"), |p| {
                p.value(value)?;
                p.node("else", |p| p.value(if_else))
            }),
            Value::BrIf {
                cond,
                if_true,
                if_else,
            } => self.node(format!("br_if {if_true}"), |p| {
                p.value(cond)?;
                p.node("else", |p| p.value(if_else))
            }),
            // TODO: print exception handlers once the emitter supports them.
            Value::Try { .. } => Err(PrintError::Unsupported { construct: "Try" }),
            Value::Throw(_) => Err(PrintError::Unsupported { construct: "Throw" }),
            Value::Effect(effect) => self.node("effect", |p| p.effect(effect)),
            Value::NoReturn(tail) => self.node("no_return", |p| p.tail(tail)),
        }
    }

    fn effect(&mut self, effect: &Effect) -> Result<(), PrintError> {
        match effect {
            Effect::Seq(effects) => self.node("seq", |p| {
                effects.iter().try_for_each(|effect| p.effect(effect))
            }),
            Effect::Drop(value) => self.node("drop", |p| p.value(value)),
            Effect::Store { op, target, value } => self.node(op, |p| {
                p.value(target)?;
                p.value(value)
            }),
            Effect::Assign { var, value } => self.node(format!("local.set {var}"), |p| p.value(value)),
            Effect::Loop { cont, body } => self.node(format!("loop {cont}"), |p| p.effect(body)),
            Effect::BrIf { cond, if_true } => {
                self.node(format!("br_if {if_true}"), |p| p.value(cond))
            }
            Effect::If { cond, then, else_ } => self.node("if", |p| {
                p.value(cond)?;
                p.node("then", |p| p.effect(then))?;
                p.node("else", |p| p.effect(else_))
            }),
            Effect::Nop => self.atom("nop"),
        }
    }

    fn tail(&mut self, tail: &Tail) -> Result<(), PrintError> {
        match tail {
            Tail::LetCont {
                cont,
                params,
                handler,
                body,
            } => self.node(join_point_head(cont, params), |p| {
                p.node("handler", |p| p.tail(handler))?;
                p.node("body", |p| p.tail(body))
            }),
            Tail::If { cond, then, else_ } => self.node("if", |p| {
                p.value(cond)?;
                p.node("then", |p| p.tail(then))?;
                p.node("else", |p| p.tail(else_))
            }),
            Tail::BrTable {
                index,
                cases,
                default,
            } => {
                let head = if cases.is_empty() {
                    format!("br_table {default}")
                } else {
                    format!("br_table {} {default}", cases.iter().join(" "))
                };
                self.node(head, |p| p.value(index))
            }
            Tail::Br { cont, arg: Some(arg) } => self.node(format!("br {cont}"), |p| p.value(arg)),
            Tail::Br { cont, arg: None } => self.atom(format!("br {cont}")),
            Tail::Unreachable => self.atom("unreachable"),
        }
    }
}
