use std::{cmp::Ordering, fmt};

use educe::Educe;

/// Defines a numbered handle whose identity is its id. The debug name only
/// shows up when printing.
macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $sigil:literal, $anon:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Educe)]
        #[educe(PartialEq, Eq, Hash)]
        pub struct $name {
            id: u32,
            #[educe(PartialEq(ignore), Hash(ignore))]
            name: Option<String>,
        }

        impl $name {
            pub fn new(id: u32, name: Option<&str>) -> Self {
                Self {
                    id,
                    name: name.map(str::to_string),
                }
            }

            pub fn id(&self) -> u32 {
                self.id
            }

            pub fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
        }

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.id.cmp(&other.id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match &self.name {
                    Some(name) => write!(f, "{}{}/{}", $sigil, name, self.id),
                    None => write!(f, "{}{}{}", $sigil, $anon, self.id),
                }
            }
        }
    };
}

handle!(
    /// A local bound inside a function body, by `Let`, `Try` or a join point.
    Local,
    "$",
    "l"
);

handle!(
    /// A function parameter. Declared by the signature, never bound in a body.
    Param,
    "$",
    "p"
);

handle!(
    /// A block label naming a join point or a loop.
    Label,
    "@",
    "k"
);

/// Anything that can be read with `local.get` or written with `local.set`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Var {
    Local(Local),
    Param(Param),
}

impl From<Local> for Var {
    fn from(local: Local) -> Self {
        Var::Local(local)
    }
}

impl From<Param> for Var {
    fn from(param: Param) -> Self {
        Var::Param(param)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Var::Local(local) => local.fmt(f),
            Var::Param(param) => param.fmt(f),
        }
    }
}

/// A storage slot the emitted function has to declare.
///
/// Most slots are locals; in aggregate mode a join point with several
/// parameters also gets a slot keyed by its label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    Local(Local),
    Label(Label),
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Local(local) => local.fmt(f),
            Slot::Label(label) => label.fmt(f),
        }
    }
}

/// A reference to a function of the module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FuncId(String);

impl FuncId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FuncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobalId(String);

impl GlobalId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Hands out fresh handles. All kinds share one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IdGenerator {
    current_id: u32,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self { current_id: 0 }
    }

    fn next_id(&mut self) -> u32 {
        self.current_id += 1;
        self.current_id
    }

    pub fn fresh_local(&mut self, name: &str) -> Local {
        Local::new(self.next_id(), Some(name))
    }

    /// A compiler temporary without a debug name.
    pub fn fresh_temp(&mut self) -> Local {
        Local::new(self.next_id(), None)
    }

    pub fn fresh_param(&mut self, name: &str) -> Param {
        Param::new(self.next_id(), Some(name))
    }

    pub fn fresh_label(&mut self, name: &str) -> Label {
        Label::new(self.next_id(), Some(name))
    }
}
