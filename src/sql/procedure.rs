//! Stored-procedure descriptors and the `CALL` statements built from them.
//!
//! Each procedure is a type implementing [`Procedure`]. Its `args()` returns a
//! fixed-size array, so the number of placeholders in the generated statement is
//! known at compile time and argument order is declared once, next to the type.

use crate::sql::BindValue;
use serde_json::Value;

/// How the rows a procedure returns are handed back to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Rows,
    SingleRow,
    NoRows,
}

/// Declared result shape of a procedure; adapts raw rows into the caller's type.
pub trait ResultShape {
    type Output;
    const KIND: ShapeKind;

    fn adapt(rows: Vec<Value>) -> Self::Output;
}

/// Zero or more records. An empty sequence is a valid result.
pub struct Rows;

/// At most one record; zero rows is `None`, not an error.
pub struct SingleRow;

/// Mutation; only success or failure is observed.
pub struct NoRows;

impl ResultShape for Rows {
    type Output = Vec<Value>;
    const KIND: ShapeKind = ShapeKind::Rows;

    fn adapt(rows: Vec<Value>) -> Self::Output {
        rows
    }
}

impl ResultShape for SingleRow {
    type Output = Option<Value>;
    const KIND: ShapeKind = ShapeKind::SingleRow;

    fn adapt(rows: Vec<Value>) -> Self::Output {
        rows.into_iter().next()
    }
}

impl ResultShape for NoRows {
    type Output = ();
    const KIND: ShapeKind = ShapeKind::NoRows;

    fn adapt(_rows: Vec<Value>) -> Self::Output {}
}

/// A stored procedure taking `N` positional IN parameters.
pub trait Procedure<const N: usize> {
    const NAME: &'static str;
    /// Session variable that receives a trailing OUT parameter, read back after the call.
    const OUT_PARAM: Option<&'static str> = None;
    type Shape: ResultShape;

    fn args(&self) -> [BindValue; N];
}

/// A fully bound call, ready to be issued on a session.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcedureCall {
    pub name: &'static str,
    pub params: Vec<BindValue>,
    pub kind: ShapeKind,
    pub out_param: Option<&'static str>,
}

/// Quote identifier for MySQL (safe: names are compile-time constants).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

impl ProcedureCall {
    pub fn of<P: Procedure<N>, const N: usize>(procedure: &P) -> Self {
        ProcedureCall {
            name: P::NAME,
            params: procedure.args().into(),
            kind: <P::Shape as ResultShape>::KIND,
            out_param: P::OUT_PARAM,
        }
    }

    /// `CALL name(?, ?, ..)`, with `@var` appended for an OUT parameter.
    pub fn statement(&self) -> String {
        let mut args: Vec<String> = self.params.iter().map(|_| "?".to_string()).collect();
        if let Some(var) = self.out_param {
            args.push(format!("@{}", var));
        }
        format!("CALL {}({})", quoted(self.name), args.join(", "))
    }

    /// Query reading the OUT parameter back on the same session.
    pub fn out_select(&self) -> Option<String> {
        self.out_param
            .map(|var| format!("SELECT @{} AS {}", var, quoted(var)))
    }
}

/// Turn the row returned by `SELECT @var` into the procedure's result rows.
/// NULL means absent; a JSON document stored as text is parsed.
pub(crate) fn out_param_rows(rows: Vec<Value>, var: &str) -> Vec<Value> {
    let value = rows
        .into_iter()
        .next()
        .and_then(|mut row| row.get_mut(var).map(Value::take))
        .unwrap_or(Value::Null);
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Null) => Vec::new(),
            Ok(parsed) => vec![parsed],
            Err(_) => vec![Value::String(s)],
        },
        other => vec![other],
    }
}
