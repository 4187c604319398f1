//! Sanitising of untrusted style and URL values.
//!
//! Both render paths run user and generated values through these helpers, so
//! a value that is dropped on one path is dropped on the other.

use crate::document::Styles;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Style overrides that are safe to place in a `style` attribute, in key order.
/// Keys differing only in case or padding collapse to one declaration; the
/// key already written in canonical form wins.
pub fn sanitize_styles(styles: &Styles) -> Vec<(String, String)> {
    let mut safe: BTreeMap<String, (bool, String)> = BTreeMap::new();

    for (raw, value) in styles {
        let property = raw.trim().to_ascii_lowercase();
        let value = value.trim();
        if !is_safe_property(&property) || !is_safe_value(value) {
            tracing::warn!(%property, "dropping unsafe style override");
            continue;
        }

        let canonical = *raw == property;
        match safe.entry(property) {
            Entry::Vacant(slot) => {
                slot.insert((canonical, value.to_string()));
            }
            Entry::Occupied(mut slot) if canonical && !slot.get().0 => {
                slot.insert((canonical, value.to_string()));
            }
            Entry::Occupied(slot) => {
                tracing::debug!(property = %slot.key(), "ignoring repeated style override");
            }
        }
    }

    safe.into_iter().map(|(property, (_, value))| (property, value)).collect()
}

/// Inline style declaration list (`a: b; c: d`), `None` when nothing survives
pub fn style_attribute(styles: &Styles) -> Option<String> {
    let declarations = sanitize_styles(styles);
    if declarations.is_empty() {
        return None;
    }
    Some(
        declarations
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

fn is_safe_property(property: &str) -> bool {
    !property.is_empty()
        && property
            .chars()
            .all(|c| c.is_ascii_lowercase() || c == '-')
}

fn is_safe_value(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|c| matches!(c, ';' | '{' | '}' | '<' | '>' | '"' | '\\'))
        && !value.to_ascii_lowercase().contains("expression(")
        && !value.to_ascii_lowercase().contains("javascript:")
}

/// Link or image target with script-capable schemes replaced by `#`
pub fn safe_url(url: &str) -> String {
    let trimmed = url.trim();
    let scheme: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take(11)
        .collect::<String>()
        .to_ascii_lowercase();

    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") || scheme.starts_with("data:")
    {
        "#".to_string()
    } else if trimmed.is_empty() {
        "#".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Accent colour accepted for the `--pk-accent` custom property
pub fn safe_color(color: &str) -> Option<String> {
    let color = color.trim();

    if let Some(hex) = color.strip_prefix('#') {
        return (matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()))
            .then(|| color.to_ascii_lowercase());
    }

    let lower = color.to_ascii_lowercase();
    for function in ["rgb(", "rgba(", "hsl(", "hsla("] {
        if let Some(args) = lower.strip_prefix(function) {
            let valid = args.ends_with(')')
                && args[..args.len() - 1]
                    .chars()
                    .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | ' ' | '%' | '/'));
            return valid.then_some(lower);
        }
    }

    (!lower.is_empty() && lower.len() <= 32 && lower.chars().all(|c| c.is_ascii_lowercase()))
        .then_some(lower)
}
