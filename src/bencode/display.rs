//! Human-readable rendering of decoded values.
//!
//! `{}` prints a value on one line; `{:#}` breaks containers over indented lines.
//! Text strings are quoted with Rust escaping, other byte strings print as
//! `b"..."` with `\xNN` escapes.

use super::value::Value;
use std::fmt;

const INDENT: &str = "    ";

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = f.alternate();
        write_value(self, f, 0, pretty)
    }
}

fn write_value(
    value: &Value,
    f: &mut fmt::Formatter<'_>,
    level: usize,
    pretty: bool,
) -> fmt::Result {
    match value {
        Value::Integer(i) => write!(f, "{}", i),
        Value::Bytes(b) => write_bytes(b, f),
        Value::List(l) if l.is_empty() => f.write_str("[]"),
        Value::List(l) => {
            f.write_str("[")?;
            for (n, item) in l.iter().enumerate() {
                separator(f, n, level + 1, pretty)?;
                write_value(item, f, level + 1, pretty)?;
            }
            close(f, level, pretty)?;
            f.write_str("]")
        }
        Value::Dict(d) if d.is_empty() => f.write_str("{}"),
        Value::Dict(d) => {
            f.write_str("{")?;
            for (n, (key, val)) in d.iter().enumerate() {
                separator(f, n, level + 1, pretty)?;
                write_bytes(key, f)?;
                f.write_str(": ")?;
                write_value(val, f, level + 1, pretty)?;
            }
            close(f, level, pretty)?;
            f.write_str("}")
        }
    }
}

fn write_bytes(b: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match std::str::from_utf8(b) {
        Ok(s) => write!(f, "{:?}", s),
        Err(_) => write!(f, "b\"{}\"", b.escape_ascii()),
    }
}

fn separator(f: &mut fmt::Formatter<'_>, n: usize, level: usize, pretty: bool) -> fmt::Result {
    if pretty {
        if n > 0 {
            f.write_str(",")?;
        }
        newline(f, level)
    } else if n > 0 {
        f.write_str(", ")
    } else {
        Ok(())
    }
}

fn close(f: &mut fmt::Formatter<'_>, level: usize, pretty: bool) -> fmt::Result {
    if pretty {
        f.write_str(",")?;
        newline(f, level)?;
    }
    Ok(())
}

fn newline(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    f.write_str("\n")?;
    for _ in 0..level {
        f.write_str(INDENT)?;
    }
    Ok(())
}
