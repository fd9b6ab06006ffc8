use serde::{Deserialize, Serialize};

/// Full parameter vector for one pipeline run.
///
/// Immutable input to a single invocation; constructed fresh per request by
/// the estimator, a profile lookup, or an adjust-request merge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhanceParams {
    /// Additive offset applied after the contrast scale, roughly [-100, 100]
    pub brightness: i32,
    /// Multiplier, roughly [0.5, 3.0]
    pub contrast: f32,
    /// Unsharp-mask strength; 1.0 is the identity
    pub sharpness: f32,
    /// Saturation multiplier; 1.0 is the identity
    pub saturation: f32,
    /// Gamma; 1.0 is the identity
    pub gamma: f32,
    /// Positive warms (red channel), negative cools (blue channel)
    pub color_temp: i32,
    /// Edge-overlay strength; 0 disables the stage
    pub edge_mark: f32,
    /// Non-local-means level; 0 disables the stage
    pub denoise: u32,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 1.0,
            sharpness: 1.5,
            saturation: 1.0,
            gamma: 1.0,
            color_temp: 0,
            edge_mark: 0.0,
            denoise: 0,
        }
    }
}

/// Partial parameters from a manual slider adjustment.
///
/// Missing fields fall back to the documented adjust-time defaults. There is
/// deliberately no `denoise` field: the adjust path always runs at level 0,
/// matching the upstream behavior.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct AdjustParams {
    pub brightness: Option<i32>,
    pub contrast: Option<f32>,
    pub sharpness: Option<f32>,
    pub saturation: Option<f32>,
    pub gamma: Option<f32>,
    pub color_temp: Option<i32>,
    pub edge_mark: Option<f32>,
}

impl AdjustParams {
    /// Merge over the adjust-time defaults into a full parameter vector.
    pub fn merge(&self) -> EnhanceParams {
        EnhanceParams {
            brightness: self.brightness.unwrap_or(0),
            contrast: self.contrast.unwrap_or(1.0),
            sharpness: self.sharpness.unwrap_or(1.5),
            saturation: self.saturation.unwrap_or(1.0),
            gamma: self.gamma.unwrap_or(1.0),
            color_temp: self.color_temp.unwrap_or(0),
            edge_mark: self.edge_mark.unwrap_or(0.0),
            denoise: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let p = EnhanceParams::default();
        assert_eq!(p.brightness, 0);
        assert_eq!(p.contrast, 1.0);
        assert_eq!(p.sharpness, 1.5);
        assert_eq!(p.saturation, 1.0);
        assert_eq!(p.gamma, 1.0);
        assert_eq!(p.color_temp, 0);
        assert_eq!(p.edge_mark, 0.0);
        assert_eq!(p.denoise, 0);
    }

    #[test]
    fn test_merge_empty_adjust_uses_defaults() {
        let merged = AdjustParams::default().merge();
        assert_eq!(merged, EnhanceParams::default());
    }

    #[test]
    fn test_merge_overrides_only_given_fields() {
        let adjust = AdjustParams {
            brightness: Some(30),
            gamma: Some(0.8),
            ..Default::default()
        };
        let merged = adjust.merge();
        assert_eq!(merged.brightness, 30);
        assert_eq!(merged.gamma, 0.8);
        assert_eq!(merged.contrast, 1.0);
        assert_eq!(merged.sharpness, 1.5);
        assert_eq!(merged.denoise, 0);
    }

    #[test]
    fn test_adjust_request_ignores_denoise_field() {
        // The adjust body may carry extra fields; denoise in particular must
        // not reach the pipeline through this path.
        let adjust: AdjustParams =
            serde_json::from_str(r#"{"brightness": 10, "denoise": 4}"#).unwrap();
        assert_eq!(adjust.merge().denoise, 0);
    }
}
