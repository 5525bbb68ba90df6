use anyhow::Context;
use log::warn;
use std::path::Path;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("line {0}: empty shader name")]
    EmptyName(usize),
    #[error("line {line}: invalid shader name `{name}`")]
    InvalidName { line: usize, name: String },
}

/// Loads a shader name listing: one name per line, order preserved.
///
/// Names must be valid C identifiers since they are pasted into macro
/// invocations and a `::name##_Bytecode` token concatenation. Duplicates are
/// kept as-is, the resulting declarations are redundant but harmless.
pub fn load_shader_list(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read shader list {}", path.display()))?;
    let names = parse_shader_list(&text).with_context(|| format!("in shader list {}", path.display()))?;

    for (i, name) in names.iter().enumerate() {
        if names[..i].contains(name) {
            warn!("duplicate shader name {name} (line {})", i + 1);
        }
    }

    Ok(names)
}

fn parse_shader_list(text: &str) -> Result<Vec<String>, Error> {
    let mut names = Vec::new();
    for (i, line) in text.lines().enumerate() {
        validate_name(i + 1, line)?;
        names.push(line.to_string());
    }
    Ok(names)
}

fn validate_name(line: usize, name: &str) -> Result<(), Error> {
    if name.trim().is_empty() {
        return Err(Error::EmptyName(line));
    }

    let mut chars = name.chars();
    let first = chars.next().unwrap();
    let first_valid = first.is_ascii_alphabetic() || first == '_';
    if !first_valid || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::InvalidName {
            line,
            name: name.to_string(),
        });
    }

    Ok(())
}
