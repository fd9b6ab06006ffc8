//! Individual enhancement stages, one file per transform

pub mod brightness_contrast;
pub mod color_temp;
pub mod denoise;
pub mod edge_overlay;
pub mod gamma;
pub mod local_contrast;
pub mod saturation;
pub mod sharpen;
pub mod upscale;
