//! Scalar values bound positionally to a MySQL statement.

use sqlx::encode::{Encode, IsNull};
use sqlx::error::BoxDynError;
use sqlx::mysql::{MySql, MySqlTypeInfo};
use sqlx::{Database, Type};

/// A value that can be bound to a MySQL query. Procedures only take scalars or NULL.
#[derive(Clone, Debug, PartialEq)]
pub enum BindValue {
    Null,
    Bool(bool),
    I64(i64),
    F64(f64),
    String(String),
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::String(s.to_string())
    }
}

impl From<String> for BindValue {
    fn from(s: String) -> Self {
        BindValue::String(s)
    }
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::I64(n)
    }
}

impl From<u32> for BindValue {
    fn from(n: u32) -> Self {
        BindValue::I64(n.into())
    }
}

impl From<bool> for BindValue {
    fn from(b: bool) -> Self {
        BindValue::Bool(b)
    }
}

impl From<f64> for BindValue {
    fn from(n: f64) -> Self {
        BindValue::F64(n)
    }
}

impl<T: Into<BindValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(BindValue::Null)
    }
}

impl<'q> Encode<'q, MySql> for BindValue {
    fn encode_by_ref(
        &self,
        buf: &mut <MySql as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        match self {
            BindValue::Null => Ok(IsNull::Yes),
            BindValue::Bool(b) => <bool as Encode<MySql>>::encode_by_ref(b, buf),
            BindValue::I64(n) => <i64 as Encode<MySql>>::encode_by_ref(n, buf),
            BindValue::F64(n) => <f64 as Encode<MySql>>::encode_by_ref(n, buf),
            BindValue::String(s) => <&str as Encode<MySql>>::encode_by_ref(&s.as_str(), buf),
        }
    }

    fn produces(&self) -> Option<MySqlTypeInfo> {
        Some(match self {
            BindValue::Null | BindValue::String(_) => <str as Type<MySql>>::type_info(),
            BindValue::Bool(_) => <bool as Type<MySql>>::type_info(),
            BindValue::I64(_) => <i64 as Type<MySql>>::type_info(),
            BindValue::F64(_) => <f64 as Type<MySql>>::type_info(),
        })
    }
}

impl Type<MySql> for BindValue {
    fn type_info() -> MySqlTypeInfo {
        <str as Type<MySql>>::type_info()
    }

    fn compatible(_ty: &MySqlTypeInfo) -> bool {
        true
    }
}
