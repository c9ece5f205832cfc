use std::fs;

use toml::{Table, Value};

const DEFAULT_CONFIG: &str = "src/default_config.toml";
const FORMATS: &[&str] = &["text", "json", "debug"];

fn main() {
    println!("cargo:rerun-if-changed={DEFAULT_CONFIG}");

    let content = fs::read_to_string(DEFAULT_CONFIG)
        .unwrap_or_else(|e| panic!("Failed to read {DEFAULT_CONFIG}: {e}"));
    let root: Table = content
        .parse()
        .unwrap_or_else(|e| panic!("Invalid TOML in {DEFAULT_CONFIG}: {e}"));

    if let Err(problem) = check_config(&root) {
        panic!("{DEFAULT_CONFIG} does not match Config: {problem}");
    }
}

/// Mirror of `Config` in src/config.rs. Every section and field must be spelled
/// out so the embedded defaults stay the single source of truth.
fn check_config(root: &Table) -> Result<(), String> {
    let list = section(root, "list")?;
    string(list, "list.bullet")?;
    let indent = field(list, "list.indent")?;
    match indent.as_integer() {
        Some(n) if n >= 0 => {}
        _ => return Err(format!("list.indent must be a non-negative integer, got {indent}")),
    }

    let table = section(root, "table")?;
    string(table, "table.separator")?;
    let header_rule = field(table, "table.header_rule")?;
    if !header_rule.is_bool() {
        return Err(format!("table.header_rule must be a boolean, got {header_rule}"));
    }

    let output = section(root, "output")?;
    let format = string(output, "output.format")?;
    if !FORMATS.contains(&format) {
        return Err(format!(
            "output.format must be one of {FORMATS:?}, got {format:?}"
        ));
    }

    Ok(())
}

fn section<'a>(root: &'a Table, name: &str) -> Result<&'a Table, String> {
    root.get(name)
        .ok_or_else(|| format!("missing [{name}] section"))?
        .as_table()
        .ok_or_else(|| format!("[{name}] must be a table"))
}

fn field<'a>(table: &'a Table, path: &str) -> Result<&'a Value, String> {
    let key = path.rsplit('.').next().unwrap_or(path);
    table.get(key).ok_or_else(|| format!("missing {path}"))
}

fn string<'a>(table: &'a Table, path: &str) -> Result<&'a str, String> {
    let value = field(table, path)?;
    value
        .as_str()
        .ok_or_else(|| format!("{path} must be a string, got {value}"))
}
