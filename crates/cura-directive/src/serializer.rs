//! Rendering objects and settings back into directive text

use crate::error::{Error, Result};
use crate::object::{ObjectKind, ObjectReference};
use crate::settings::{SettingsMap, quote};
use crate::token::TokenKind;

/// Render one object and its settings.
///
/// ```text
///   FILE 'bracket.stl' AS bracket SETTINGS
///     support_enable = True,
///     infill_sparse_density = 20
/// ```
///
/// The output parses back to an equal object with equal settings, in the
/// same order.
pub fn serialize_object(object: &ObjectReference, settings: &SettingsMap) -> Result<String> {
    let mut out = String::from("  ");
    if object.kind() == ObjectKind::File {
        out.push_str("FILE ");
    }
    out.push_str(&quote(object.source())?);

    if object.is_named() {
        out.push_str(" AS ");
        out.push_str(bare_name(object.name())?);
    }

    if !settings.is_empty() {
        let lines = settings
            .iter()
            .map(|(key, value)| Ok(format!("    {} = {}", bare_name(key)?, value.to_literal()?)))
            .collect::<Result<Vec<_>>>()?;
        out.push_str(" SETTINGS\n");
        out.push_str(&lines.join(",\n"));
    }

    Ok(out)
}

/// Render several objects, one after another on separate lines.
pub fn serialize_objects<'o>(
    objects: impl IntoIterator<Item = (&'o ObjectReference, &'o SettingsMap)>,
) -> Result<String> {
    let rendered = objects
        .into_iter()
        .map(|(object, settings)| serialize_object(object, settings))
        .collect::<Result<Vec<_>>>()?;
    Ok(rendered.join("\n"))
}

/// Check that `name` lexes as a single bare name.
fn bare_name(name: &str) -> Result<&str> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_alphabetic());
    let valid_rest = chars.all(|c| c == '_' || c.is_ascii_alphanumeric());

    if valid_start && valid_rest && TokenKind::keyword(name).is_none() {
        Ok(name)
    } else {
        Err(Error::InvalidName {
            name: name.to_string(),
        })
    }
}
