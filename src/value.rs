// vidbind/src/value.rs
//
//! The scripting host's value representation, as far as this crate needs to see it.
//!
//! The host object model itself lives outside this crate. Bindings only rely on a conversion
//! contract: given a host value, obtain a native structure or null; given a native structure,
//! produce a host value.

use crate::geom::{self, Point, Rect, Rgb};

use std::fmt::{self, Display, Formatter};

/// A value handed across the binding boundary by the scripting host.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Symbol(String),
    Array(Vec<Value>),
    Rect(Rect),
    Point(Point),
    Rgb(Rgb),
    /// Any other host object, identified by its class name. It has no string conversion.
    Object(&'static str),
}

impl Value {
    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(*self, Value::Nil)
    }

    /// Resolves a rectangle. Anything that isn't a rectangle resolves to null.
    #[inline]
    pub fn to_rect(&self) -> Option<Rect> {
        match *self {
            Value::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    #[inline]
    pub fn to_point(&self) -> Option<Point> {
        match *self {
            Value::Point(point) => Some(point),
            _ => None,
        }
    }

    #[inline]
    pub fn to_rgb(&self) -> Option<Rgb> {
        match *self {
            Value::Rgb(rgb) => Some(rgb),
            _ => None,
        }
    }

    /// Returns the elements if this is a host sequence.
    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match *self {
            Value::Array(ref items) => Some(items),
            _ => None,
        }
    }

    /// The host's "convert to string" protocol.
    ///
    /// Strings and symbols convert to themselves and scalars to their printed form. Sequences,
    /// geometry and opaque objects have no conversion.
    pub fn to_host_string(&self) -> Option<String> {
        match *self {
            Value::Str(ref string) | Value::Symbol(ref string) => Some(string.clone()),
            Value::Nil => Some(String::new()),
            Value::Bool(value) => Some(value.to_string()),
            Value::Int(value) => Some(value.to_string()),
            Value::Float(value) => Some(value.to_string()),
            Value::Array(_) | Value::Rect(_) | Value::Point(_) | Value::Rgb(_) |
            Value::Object(_) => None,
        }
    }

    /// The host class name, used in type error messages.
    pub fn type_name(&self) -> &'static str {
        match *self {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Symbol(_) => "Symbol",
            Value::Array(_) => "Array",
            Value::Rect(_) => "Rect",
            Value::Point(_) => "Point",
            Value::Rgb(_) => "RGB",
            Value::Object(name) => name,
        }
    }
}

/// Copies each element of a host sequence into a contiguous buffer of native rectangles.
///
/// Elements that do not resolve to a rectangle become a zero-sized rectangle at the origin
/// instead of failing the whole call.
pub(crate) fn resolve_rects(items: &[Value]) -> Vec<Rect> {
    items.iter()
         .enumerate()
         .map(|(index, item)| {
             item.to_rect().unwrap_or_else(|| {
                 warn!("Element {} ({}) is not a rectangle; substituting an empty rectangle",
                       index,
                       item.type_name());
                 geom::zero_rect()
             })
         })
         .collect()
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.to_host_string() {
            Some(string) => f.write_str(&string),
            None => write!(f, "#<{}>", self.type_name()),
        }
    }
}

impl From<Rect> for Value {
    #[inline]
    fn from(rect: Rect) -> Value {
        Value::Rect(rect)
    }
}

impl From<Point> for Value {
    #[inline]
    fn from(point: Point) -> Value {
        Value::Point(point)
    }
}

impl From<Rgb> for Value {
    #[inline]
    fn from(rgb: Rgb) -> Value {
        Value::Rgb(rgb)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(string: &str) -> Value {
        Value::Str(string.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(string: String) -> Value {
        Value::Str(string)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Value {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl<T> From<Vec<T>> for Value where T: Into<Value> {
    fn from(items: Vec<T>) -> Value {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for Value where T: Into<Value> {
    fn from(value: Option<T>) -> Value {
        value.map_or(Value::Nil, Into::into)
    }
}
