//! IR blocks and instructions.
//!
//! Both hierarchies are closed: every consumer matches on them exhaustively,
//! so adding a variant is a compile error until every pass handles it.

use std::fmt;

use crate::{
    defs::Literal,
    error::IrError,
    symbol::{Name, Symbol},
};

/// Operand of a block or an instruction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Name(Name),
    Literal(Literal),
    Array(Vec<Literal>),
    Block(Box<IrBlock>),
    Instr(Box<IrInstr>),
}

impl From<Name> for Value {
    fn from(name: Name) -> Self {
        Self::Name(name)
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<IrInstr> for Value {
    fn from(instr: IrInstr) -> Self {
        Self::Instr(Box::new(instr))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Block(IrBlock),
    Instr(IrInstr),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrBlock {
    Body(Vec<Stmt>),
    Args(Vec<Value>),
    ArgsValues(Vec<(Symbol, Value)>),
    Return(Vec<Value>),
    /// `option: body` pairs
    Option(Vec<(Value, Stmt)>),
    /// `obj<mods>`
    Modifier { obj: Box<Value>, mods: Vec<Value> },
}

impl IrBlock {
    pub fn body(stmts: impl IntoIterator<Item = Stmt>) -> Self {
        Self::Body(stmts.into_iter().collect())
    }

    pub fn empty_body() -> Self {
        Self::Body(Vec::new())
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Body(stmts) => stmts.len(),
            Self::Args(values) | Self::Return(values) => values.len(),
            Self::ArgsValues(pairs) => pairs.len(),
            Self::Option(pairs) => pairs.len(),
            Self::Modifier { mods, .. } => mods.len() + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of every function called anywhere inside this block.
    pub fn called_names(&self) -> Vec<&Name> {
        let mut out = Vec::new();
        self.collect_calls(&mut out);
        out
    }

    fn collect_calls<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Self::Body(stmts) => stmts.iter().for_each(|stmt| stmt.collect_calls(out)),
            Self::Args(values) | Self::Return(values) => {
                values.iter().for_each(|value| value.collect_calls(out))
            }
            Self::ArgsValues(pairs) => pairs.iter().for_each(|(_, value)| value.collect_calls(out)),
            Self::Option(pairs) => pairs.iter().for_each(|(option, stmt)| {
                option.collect_calls(out);
                stmt.collect_calls(out);
            }),
            Self::Modifier { obj, mods } => {
                obj.collect_calls(out);
                mods.iter().for_each(|value| value.collect_calls(out));
            }
        }
    }
}

impl Stmt {
    fn collect_calls<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Self::Block(block) => block.collect_calls(out),
            Self::Instr(instr) => instr.collect_calls(out),
        }
    }
}

impl Value {
    fn collect_calls<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Self::Name(_) | Self::Literal(_) | Self::Array(_) => {}
            Self::Block(block) => block.collect_calls(out),
            Self::Instr(instr) => instr.collect_calls(out),
        }
    }
}

/// How a function is called, derived from which parts a call carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// `caller(args*)`
    Fn,
    /// `caller(option_expr*)`
    Optn,
    /// `caller(args*){body*}`
    Bdn,
    /// `caller(args*){option_expr*}`
    OptBdn,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallInstr {
    callee: Name,
    kind: CallKind,
    args: Option<IrBlock>,
    option: Option<IrBlock>,
    body: Option<IrBlock>,
}

impl CallInstr {
    pub fn new(
        callee: impl Into<Name>,
        args: Option<IrBlock>,
        option: Option<IrBlock>,
        body: Option<IrBlock>,
    ) -> Result<Self, IrError> {
        let callee = callee.into();

        let kind = match (&args, &option, &body) {
            (Some(_), None, None) => CallKind::Fn,
            (None, Some(_), None) => CallKind::Optn,
            (Some(_), Some(_), None) => CallKind::OptBdn,
            (_, None, Some(_)) => CallKind::Bdn,
            _ => return Err(IrError::InvalidCall { callee }),
        };

        Ok(Self {
            callee,
            kind,
            args,
            option,
            body,
        })
    }

    pub fn callee(&self) -> &Name {
        &self.callee
    }

    pub fn kind(&self) -> CallKind {
        self.kind
    }

    fn blocks(&self) -> impl Iterator<Item = &IrBlock> {
        [&self.args, &self.option, &self.body].into_iter().flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IrFlag {
    BuiltinCall,
    Call(CallKind),
    Cast,
    Assign,
    Declare,
    DeclareAssign,
    Return,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrInstr {
    Builtin { name: Symbol, args: Vec<Value> },
    Call(CallInstr),
    /// `data*type`
    Cast { data: Value, to: Name },
    /// `var=expr`
    Assign { var: Name, value: Value },
    /// `var:type`
    Declare { var: Symbol, ty: Name },
    /// `var:type=expr`
    DeclareAssign { var: Symbol, ty: Name, value: Value },
    /// `::expr`
    Return(Value),
}

impl IrInstr {
    pub fn flag(&self) -> IrFlag {
        match self {
            Self::Builtin { .. } => IrFlag::BuiltinCall,
            Self::Call(call) => IrFlag::Call(call.kind()),
            Self::Cast { .. } => IrFlag::Cast,
            Self::Assign { .. } => IrFlag::Assign,
            Self::Declare { .. } => IrFlag::Declare,
            Self::DeclareAssign { .. } => IrFlag::DeclareAssign,
            Self::Return(_) => IrFlag::Return,
        }
    }

    fn collect_calls<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Self::Builtin { args, .. } => args.iter().for_each(|value| value.collect_calls(out)),
            Self::Call(call) => {
                out.push(call.callee());
                call.blocks().for_each(|block| block.collect_calls(out));
            }
            Self::Cast { data: value, .. }
            | Self::Assign { value, .. }
            | Self::DeclareAssign { value, .. }
            | Self::Return(value) => value.collect_calls(out),
            Self::Declare { .. } => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Literal(literal) => write!(f, "{literal}"),
            Self::Array(items) => {
                write!(f, "[")?;
                write_separated(f, items, " ")?;
                write!(f, "]")
            }
            Self::Block(block) => write!(f, "{block}"),
            Self::Instr(instr) => write!(f, "{instr}"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(block) => write!(f, "{block}"),
            Self::Instr(instr) => write!(f, "{instr}"),
        }
    }
}

impl fmt::Display for IrBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Body(stmts) => write_separated(f, stmts, "\n"),
            Self::Args(values) => write_separated(f, values, " "),
            Self::ArgsValues(pairs) => {
                write!(f, "ARG-VALUE#[")?;
                for (i, (arg, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{arg}:{value}")?;
                }
                write!(f, "]")
            }
            Self::Return(values) => {
                write!(f, "RETURN#[")?;
                write_separated(f, values, " ")?;
                write!(f, "]")
            }
            Self::Option(pairs) => {
                write!(f, "OPTION#[")?;
                for (i, (option, stmt)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{option}:{stmt}")?;
                }
                write!(f, "]")
            }
            Self::Modifier { obj, mods } => {
                write!(f, "{obj}<")?;
                write_separated(f, mods, " ")?;
                write!(f, ">")
            }
        }
    }
}

impl fmt::Display for IrInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin { name, args } => {
                write!(f, "BUILTIN({name} ")?;
                write_separated(f, args, " ")?;
                write!(f, ")")
            }
            Self::Call(call) => {
                write!(f, "CALL[{}](", call.callee())?;
                for (i, block) in call.blocks().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{block}")?;
                }
                write!(f, ")")
            }
            Self::Cast { data, to } => write!(f, "CAST({data}*{to})"),
            Self::Assign { var, value } => write!(f, "ASSIGN({var}={value})"),
            Self::Declare { var, ty } => write!(f, "DECLARE({var}:{ty})"),
            Self::DeclareAssign { var, ty, value } => write!(f, "DECLARE({var}:{ty}={value})"),
            Self::Return(value) => write!(f, "::{value}"),
        }
    }
}

fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: &str) -> Value {
        Value::Literal(Literal::new(value, "int"))
    }

    #[test]
    fn call_kind_from_parts() {
        let args = || Some(IrBlock::Args(vec![lit("1")]));
        let option = || Some(IrBlock::Option(Vec::new()));
        let body = || Some(IrBlock::empty_body());

        let kind = |a, o, b| CallInstr::new("f", a, o, b).map(|c| c.kind());

        assert_eq!(kind(args(), None, None), Ok(CallKind::Fn));
        assert_eq!(kind(None, option(), None), Ok(CallKind::Optn));
        assert_eq!(kind(args(), option(), None), Ok(CallKind::OptBdn));
        assert_eq!(kind(args(), None, body()), Ok(CallKind::Bdn));
        assert_eq!(kind(None, None, body()), Ok(CallKind::Bdn));
        assert!(kind(None, None, None).is_err());
        assert!(kind(args(), option(), body()).is_err());
    }

    #[test]
    fn called_names_walks_nested_blocks() {
        let args = IrBlock::Args(vec![lit("1"), lit("2")]);
        let inner = CallInstr::new("add", Some(args), None, None).unwrap();
        let outer = CallInstr::new(
            "print",
            Some(IrBlock::Args(vec![Value::from(IrInstr::Call(inner))])),
            None,
            None,
        )
        .unwrap();

        let main = IrBlock::body([
            Stmt::Instr(IrInstr::Declare {
                var: Symbol::from("x"),
                ty: Name::from("int"),
            }),
            Stmt::Instr(IrInstr::Call(outer)),
        ]);

        let names = main.called_names();
        assert_eq!(names, vec![&Name::from("print"), &Name::from("add")]);
    }

    #[test]
    fn flags_follow_variants() {
        let instr = IrInstr::Cast {
            data: lit("1"),
            to: Name::from("@u2"),
        };
        assert_eq!(instr.flag(), IrFlag::Cast);
        assert_eq!(instr.to_string(), "CAST(1:int*@u2)");
    }
}
