use crate::enhance::params::EnhanceParams;
use crate::enhance::stages;
use crate::error::EnhanceError;
use crate::storage;
use image::RgbImage;
use std::path::Path;
use std::time::Instant;

/// Run the full enhancement pipeline from `input_path` to `output_path`.
///
/// The source is decoded fresh on every invocation; runs never chain from a
/// previously enhanced output, so repeated calls with the same parameters
/// are idempotent. The result is written atomically, overwriting any file
/// already at `output_path`.
pub fn enhance(
    input_path: &Path,
    output_path: &Path,
    params: &EnhanceParams,
) -> Result<(), EnhanceError> {
    let start = Instant::now();

    let img = image::open(input_path)?.to_rgb8();
    let img = apply_stages(img, params);
    storage::save_image_atomic(&img, output_path)?;

    tracing::info!(
        input = %input_path.display(),
        output = %output_path.display(),
        time_ms = start.elapsed().as_millis() as u64,
        "Enhancement complete"
    );
    Ok(())
}

/// The fixed stage sequence. Stages compose by strict sequential
/// application; a stage skips only via its own no-op guard.
pub fn apply_stages(img: RgbImage, params: &EnhanceParams) -> RgbImage {
    let img = run_stage("upscale", img, stages::upscale::apply);
    let img = run_stage("gamma", img, |i| stages::gamma::apply(i, params.gamma));
    let img = run_stage("brightness_contrast", img, |i| {
        stages::brightness_contrast::apply(i, params.contrast, params.brightness)
    });
    let img = run_stage("local_contrast", img, stages::local_contrast::apply);
    let img = run_stage("sharpen", img, |i| {
        stages::sharpen::apply(i, params.sharpness)
    });
    let img = run_stage("saturation", img, |i| {
        stages::saturation::apply(i, params.saturation)
    });
    let img = run_stage("color_temp", img, |i| {
        stages::color_temp::apply(i, params.color_temp)
    });
    let img = run_stage("edge_overlay", img, |i| {
        stages::edge_overlay::apply(i, params.edge_mark)
    });
    run_stage("denoise", img, |i| stages::denoise::apply(i, params.denoise))
}

fn run_stage<F>(name: &str, img: RgbImage, stage_fn: F) -> RgbImage
where
    F: FnOnce(RgbImage) -> RgbImage,
{
    let stage_start = Instant::now();
    let result = stage_fn(img);
    tracing::debug!(
        stage = name,
        time_ms = stage_start.elapsed().as_millis() as u64,
        "Stage complete"
    );
    result
}
