use super::params::EnhanceParams;

/// Built-in profile catalog: named constant presets, never modified at
/// runtime. "Manual" is not an entry here; it is the server-side marker for
/// "keep the current processed output as-is".
pub const PROFILES: [(&str, EnhanceParams); 5] = [
    ("Brasil", preset(20, 1.2, 1.7, 1.3, 1.1)),
    ("Tokio", preset(10, 1.5, 2.0, 1.1, 0.9)),
    ("Autumn", preset(5, 1.1, 1.4, 1.5, 1.0)),
    ("Sunday", preset(15, 1.3, 1.6, 1.2, 1.0)),
    ("Winday", preset(-5, 1.0, 1.3, 1.0, 1.2)),
];

const fn preset(
    brightness: i32,
    contrast: f32,
    sharpness: f32,
    saturation: f32,
    gamma: f32,
) -> EnhanceParams {
    EnhanceParams {
        brightness,
        contrast,
        sharpness,
        saturation,
        gamma,
        color_temp: 0,
        edge_mark: 0.0,
        denoise: 0,
    }
}

/// Look up a profile by name. Returns `None` for unknown names, including
/// "Manual".
pub fn lookup(name: &str) -> Option<EnhanceParams> {
    PROFILES
        .iter()
        .find(|(profile, _)| *profile == name)
        .map(|(_, params)| *params)
}

/// Names of all built-in profiles, in catalog order
pub fn names() -> Vec<&'static str> {
    PROFILES.iter().map(|(name, _)| *name).collect()
}
