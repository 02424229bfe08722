use std::{collections::HashSet, time::Instant};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    compile_unit_info::CompileUnitInfo,
    ir::{
        Function, LocalsError, PrintError, Slot, Type,
        ident::{FuncId, Param},
        locals::required_locals,
        printer::print_function,
    },
};

pub mod config;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DriverError {
    #[error("in function {function}: {source}")]
    Locals {
        function: FuncId,
        #[source]
        source: LocalsError,
    },
    #[error("in function {function}: {source}")]
    Print {
        function: FuncId,
        #[source]
        source: PrintError,
    },
    #[error("parameter {param} of function {function} is declared more than once")]
    DuplicateParam { function: FuncId, param: Param },
}

/// A function ready for emission: the tree together with the locals it has
/// to declare.
#[derive(Debug, Clone)]
pub struct PreparedFunction<'f> {
    pub function: &'f Function,
    /// Body locals, in declaration order. Parameters are not included.
    pub locals: Vec<(Slot, Type)>,
    /// The debug listing, when [`CompileUnitInfo::print_ir`] is set.
    pub listing: Option<String>,
}

/// Computes the local declarations of `function`, and its listing if asked.
#[instrument(level = "debug", skip_all, fields(name = %function.name))]
pub fn prepare_function<'f>(
    session: &CompileUnitInfo,
    function: &'f Function,
) -> Result<PreparedFunction<'f>, DriverError> {
    let mut seen = HashSet::new();
    for param in function.get_params() {
        if !seen.insert(param) {
            return Err(DriverError::DuplicateParam {
                function: function.name.clone(),
                param: param.clone(),
            });
        }
    }

    let locals = required_locals(&function.body, session.backend_mode).map_err(|source| {
        DriverError::Locals {
            function: function.name.clone(),
            source,
        }
    })?;

    let listing = if session.print_ir {
        let listing = print_function(function).map_err(|source| DriverError::Print {
            function: function.name.clone(),
            source,
        })?;
        debug!("listing:\n{}", listing);
        Some(listing)
    } else {
        None
    };

    Ok(PreparedFunction {
        function,
        locals: locals.into_iter().collect(),
        listing,
    })
}

/// Prepares every function of a compilation unit, stopping at the first
/// malformed one.
pub fn prepare_functions<'f>(
    session: &CompileUnitInfo,
    functions: &'f [Function],
) -> Result<Vec<PreparedFunction<'f>>, DriverError> {
    let start_time = Instant::now();

    let prepared = functions
        .iter()
        .map(|function| prepare_function(session, function))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "prepared {} functions in {:?}",
        prepared.len(),
        start_time.elapsed()
    );
    Ok(prepared)
}
