//! Get command implementation

use crate::cli::ValueKind;
use crate::config::{Coerced, ConfigEntry, FromEntry};
use anyhow::Result;
use std::fmt::Display;
use std::path::PathBuf;

/// Execute the get command
pub fn execute(token: String, files: Vec<PathBuf>, kind: ValueKind, strict: bool) -> Result<()> {
    let mut store = super::load_store(&files, strict)?;

    let rendered = if strict {
        let entry = store.try_get(&token)?;
        render_strict(entry, kind)?
    } else {
        render_lenient(store.lookup(&token), kind)
    };

    println!("{}", rendered);
    Ok(())
}

/// Format a converted value; the null char prints as nothing
fn render<T: Display>(value: T) -> String {
    let text = value.to_string();
    if text == "\0" {
        String::new()
    } else {
        text
    }
}

fn lenient<T: FromEntry + Display>(entry: &ConfigEntry) -> String {
    let Coerced { value, .. } = entry.extract::<T>();
    render(value)
}

fn strict<T: FromEntry + Display>(entry: &ConfigEntry) -> Result<String> {
    Ok(render(entry.try_extract::<T>()?))
}

pub fn render_lenient(entry: &ConfigEntry, kind: ValueKind) -> String {
    match kind {
        ValueKind::String => lenient::<String>(entry),
        ValueKind::Float => lenient::<f32>(entry),
        ValueKind::Double => lenient::<f64>(entry),
        ValueKind::Int => lenient::<i32>(entry),
        ValueKind::Uint => lenient::<u32>(entry),
        ValueKind::Bool => lenient::<bool>(entry),
        ValueKind::Char => lenient::<char>(entry),
    }
}

pub fn render_strict(entry: &ConfigEntry, kind: ValueKind) -> Result<String> {
    match kind {
        ValueKind::String => strict::<String>(entry),
        ValueKind::Float => strict::<f32>(entry),
        ValueKind::Double => strict::<f64>(entry),
        ValueKind::Int => strict::<i32>(entry),
        ValueKind::Uint => strict::<u32>(entry),
        ValueKind::Bool => strict::<bool>(entry),
        ValueKind::Char => strict::<char>(entry),
    }
}
