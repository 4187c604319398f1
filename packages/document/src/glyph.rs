//! Icon-name → glyph resolution.
//!
//! Generated content names icons freely ("Lightning", "shield-check",
//! "rocketIcon"). Names are normalised, mapped through a small alias table and
//! looked up in the built-in set; anything unresolved gets the neutral
//! [`FALLBACK`] glyph so an icon slot is never empty.

/// View box shared by every glyph path
pub const VIEW_BOX: &str = "0 0 24 24";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub name: &'static str,
    /// SVG path data drawn with `stroke="currentColor"`
    pub path: &'static str,
}

pub const FALLBACK: Glyph = Glyph {
    name: "circle",
    path: "M12 3a9 9 0 1 0 0 18a9 9 0 1 0 0-18z",
};

const GLYPHS: &[Glyph] = &[
    FALLBACK,
    Glyph { name: "zap", path: "M13 2L3 14h9l-1 8 10-12h-9l1-8z" },
    Glyph { name: "shield", path: "M12 22s8-4 8-10V5l-8-3-8 3v7c0 6 8 10 8 10z" },
    Glyph { name: "sparkles", path: "M12 3l1.9 5.1L19 10l-5.1 1.9L12 17l-1.9-5.1L5 10l5.1-1.9z" },
    Glyph { name: "star", path: "M12 2l3.1 6.3 6.9 1-5 4.9 1.2 6.8L12 17.8 5.8 21l1.2-6.8-5-4.9 6.9-1z" },
    Glyph { name: "check", path: "M20 6L9 17l-5-5" },
    Glyph { name: "heart", path: "M20.8 4.6a5.5 5.5 0 0 0-7.8 0L12 5.7l-1-1.1a5.5 5.5 0 0 0-7.8 7.8L12 21.2l8.8-8.8a5.5 5.5 0 0 0 0-7.8z" },
    Glyph { name: "rocket", path: "M5 15c-1.5 1.3-2 5-2 5s3.7-.5 5-2M9 12a22 22 0 0 1 11-9 22 22 0 0 1-9 11l-2-2zM9 12H4l3-4h5M12 15v5l4-3v-5" },
    Glyph { name: "globe", path: "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20zM2 12h20M12 2a15 15 0 0 1 0 20M12 2a15 15 0 0 0 0 20" },
    Glyph { name: "lock", path: "M5 11h14v10H5zM8 11V7a4 4 0 0 1 8 0v4" },
    Glyph { name: "users", path: "M17 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2M9 3a4 4 0 1 0 0 8a4 4 0 1 0 0-8zM23 21v-2a4 4 0 0 0-3-3.9M16 3.1a4 4 0 0 1 0 7.8" },
    Glyph { name: "chart", path: "M3 3v18h18M8 17V11M13 17V7M18 17v-4" },
    Glyph { name: "clock", path: "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20zM12 6v6l4 2" },
    Glyph { name: "mail", path: "M4 4h16v16H4zM22 6l-10 7L2 6" },
    Glyph { name: "phone", path: "M22 16.9v3a2 2 0 0 1-2.2 2A19.8 19.8 0 0 1 2.1 4.2 2 2 0 0 1 4.1 2h3a2 2 0 0 1 2 1.7l.7 3.3-2 2a16 16 0 0 0 6 6l2-2 3.3.7a2 2 0 0 1 1.7 2z" },
    Glyph { name: "settings", path: "M12 9a3 3 0 1 0 0 6a3 3 0 1 0 0-6zM12 1v3M12 20v3M4.2 4.2l2.1 2.1M17.7 17.7l2.1 2.1M1 12h3M20 12h3M4.2 19.8l2.1-2.1M17.7 6.3l2.1-2.1" },
    Glyph { name: "cloud", path: "M18 10h-1.3A8 8 0 1 0 9 20h9a5 5 0 0 0 0-10z" },
    Glyph { name: "code", path: "M16 18l6-6-6-6M8 6l-6 6 6 6" },
    Glyph { name: "layers", path: "M12 2L2 7l10 5 10-5-10-5zM2 17l10 5 10-5M2 12l10 5 10-5" },
    Glyph { name: "smile", path: "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20zM8 14s1.5 2 4 2 4-2 4-2M9 9h.01M15 9h.01" },
    Glyph { name: "target", path: "M12 2a10 10 0 1 0 0 20a10 10 0 1 0 0-20zM12 6a6 6 0 1 0 0 12a6 6 0 1 0 0-12zM12 10a2 2 0 1 0 0 4a2 2 0 1 0 0-4z" },
    Glyph { name: "trending-up", path: "M23 6l-9.5 9.5-5-5L1 18M17 6h6v6" },
    Glyph { name: "dollar", path: "M12 1v22M17 5H9.5a3.5 3.5 0 0 0 0 7h5a3.5 3.5 0 0 1 0 7H6" },
];

const ALIASES: &[(&str, &str)] = &[
    ("lightning", "zap"),
    ("bolt", "zap"),
    ("fast", "zap"),
    ("speed", "zap"),
    ("security", "shield"),
    ("secure", "shield"),
    ("shieldcheck", "shield"),
    ("magic", "sparkles"),
    ("sparkle", "sparkles"),
    ("tick", "check"),
    ("checkmark", "check"),
    ("checkcircle", "check"),
    ("love", "heart"),
    ("launch", "rocket"),
    ("world", "globe"),
    ("earth", "globe"),
    ("team", "users"),
    ("people", "users"),
    ("user", "users"),
    ("analytics", "chart"),
    ("graph", "chart"),
    ("barchart", "chart"),
    ("time", "clock"),
    ("email", "mail"),
    ("cog", "settings"),
    ("gear", "settings"),
    ("growth", "trending-up"),
    ("trendingup", "trending-up"),
    ("money", "dollar"),
    ("price", "dollar"),
    ("padlock", "lock"),
];

/// Resolve an arbitrary icon name; never fails
pub fn resolve(name: &str) -> Glyph {
    let key = normalize(name);

    let key = ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, target)| target.to_string())
        .unwrap_or(key);

    GLYPHS
        .iter()
        .find(|glyph| glyph.name.replace('-', "") == key.replace('-', ""))
        .copied()
        .unwrap_or(FALLBACK)
}

fn normalize(name: &str) -> String {
    let lower: String = name
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect();

    match lower.strip_suffix("icon") {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => lower,
    }
}
