//! Image normalization tools
//!
//! `save_image` accepts the same payload forms as inscription, verifies that
//! the bytes decode as an image, and writes a normalized JPEG into the
//! uploads directory. `compress_image` re-encodes an existing image under a
//! byte ceiling by walking dimensions and JPEG quality downwards.

use crate::config::FileConfig;
use crate::payload::{Stager, classify};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use ordbridge_domain::{
    RiskLevel, ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult,
    ToolResultMetadata,
};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SAVE_IMAGE: &str = "save_image";
pub const COMPRESS_IMAGE: &str = "compress_image";

/// Default byte ceiling for compression; small enough to inscribe cheaply.
const DEFAULT_MAX_BYTES: u64 = 1024;

/// Smallest square dimension the compressor will try.
const MIN_DIMENSION: u32 = 16;

const QUALITY_STEPS: [u8; 6] = [40, 35, 30, 25, 20, 15];

pub fn save_image_definition() -> ToolDefinition {
    ToolDefinition::new(
        SAVE_IMAGE,
        "Save an image from a file path, URL or data URI into the uploads directory as a normalized JPEG.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "data",
        "Image source: local file path, http(s) URL or data URI",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "filename",
        "Target filename (default: timestamped)",
        false,
    ))
}

pub fn compress_image_definition() -> ToolDefinition {
    ToolDefinition::new(
        COMPRESS_IMAGE,
        "Compress an image file below a byte budget by reducing dimensions and JPEG quality.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new("file_path", "Path to the image to compress", true))
    .with_parameter(ToolParameter::new(
        "output_path",
        "Where to write the compressed JPEG (default: alongside the input)",
        false,
    ))
    .with_parameter(
        ToolParameter::new("max_bytes", "Byte budget (default: 1024)", false)
            .with_type("number"),
    )
}

/// Check that the file at `path` decodes as an image.
pub(crate) fn verify_image(path: &Path) -> Result<(), ToolError> {
    image::open(path)
        .map(|_| ())
        .map_err(|e| ToolError::invalid_image(format!("Content is not a valid image: {}", e)))
}

pub async fn execute_save_image(
    config: &FileConfig,
    stager: &Stager,
    call: &ToolCall,
) -> ToolResult {
    let data = match call.require_string("data") {
        Ok(d) => d,
        Err(e) => return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e)),
    };

    let staged = match stager.stage(classify(data), Some("image")).await {
        Ok(s) => s,
        Err(e) => return ToolResult::failure(&call.tool_name, ToolError::from(e)),
    };

    let img = match image::open(staged.path()) {
        Ok(img) => img,
        Err(e) => {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::invalid_image(format!("Content is not a valid image: {}", e)),
            );
        }
    };

    let uploads = Path::new(&config.uploads.dir);
    if let Err(e) = fs::create_dir_all(uploads) {
        return ToolResult::failure(
            &call.tool_name,
            ToolError::execution_failed(format!(
                "Failed to create uploads directory {}: {}",
                uploads.display(),
                e
            )),
        );
    }

    let filename = call
        .get_string("filename")
        .map(str::to_string)
        .unwrap_or_else(|| format!("image_{}.jpg", chrono::Utc::now().timestamp()));
    let save_path = uploads.join(filename);

    // Normalize to RGB: JPEG has no alpha channel.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    if let Err(e) = rgb.save_with_format(&save_path, ImageFormat::Jpeg) {
        return ToolResult::failure(
            &call.tool_name,
            ToolError::execution_failed(format!(
                "Failed to write {}: {}",
                save_path.display(),
                e
            )),
        );
    }

    info!(path = %save_path.display(), width = rgb.width(), height = rgb.height(), "image saved");
    ToolResult::success(
        &call.tool_name,
        json!({
            "success": true,
            "path": save_path.display().to_string(),
            "width": rgb.width(),
            "height": rgb.height(),
        }),
    )
    .with_metadata(ToolResultMetadata {
        path: Some(save_path.display().to_string()),
        ..Default::default()
    })
}

pub fn execute_compress_image(call: &ToolCall) -> ToolResult {
    let file_path = match call.require_string("file_path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e)),
    };
    let input = Path::new(file_path);
    if !input.is_file() {
        return ToolResult::failure(&call.tool_name, ToolError::not_found(file_path));
    }

    let max_bytes = if call.has_arg("max_bytes") {
        match call.get_u64("max_bytes").filter(|b| *b > 0) {
            Some(b) => b,
            None => {
                return ToolResult::failure(
                    &call.tool_name,
                    ToolError::invalid_argument("max_bytes must be a positive integer"),
                );
            }
        }
    } else {
        DEFAULT_MAX_BYTES
    };

    let img = match image::open(input) {
        Ok(img) => img,
        Err(e) => {
            return ToolResult::failure(
                &call.tool_name,
                ToolError::invalid_image(format!("Content is not a valid image: {}", e)),
            );
        }
    };

    let output_path = call
        .get_string("output_path")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output_path(input));

    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let max_dimension = rgb.width().min(rgb.height());

    match compress_to_budget(&rgb, max_dimension, max_bytes) {
        Some((bytes, dimension, quality)) => {
            if let Err(e) = fs::write(&output_path, &bytes) {
                return ToolResult::failure(
                    &call.tool_name,
                    ToolError::execution_failed(format!(
                        "Failed to write {}: {}",
                        output_path.display(),
                        e
                    )),
                );
            }
            info!(
                path = %output_path.display(),
                bytes = bytes.len(),
                dimension,
                quality,
                "image compressed"
            );
            ToolResult::success(
                &call.tool_name,
                json!({
                    "success": true,
                    "path": output_path.display().to_string(),
                    "bytes": bytes.len(),
                    "dimension": dimension,
                    "quality": quality,
                }),
            )
            .with_metadata(ToolResultMetadata {
                path: Some(output_path.display().to_string()),
                ..Default::default()
            })
        }
        None => ToolResult::failure(
            &call.tool_name,
            ToolError::execution_failed(format!(
                "Could not compress image below {} bytes",
                max_bytes
            )),
        ),
    }
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    input.with_file_name(format!("{}_compressed.jpg", stem))
}

/// Walk square dimensions downwards, and JPEG quality within each dimension,
/// until an encoding fits the budget.
fn compress_to_budget(
    img: &DynamicImage,
    max_dimension: u32,
    max_bytes: u64,
) -> Option<(Vec<u8>, u32, u8)> {
    let mut dimension = max_dimension;
    while dimension >= MIN_DIMENSION {
        let resized = img.resize_exact(dimension, dimension, FilterType::Lanczos3);
        for quality in QUALITY_STEPS {
            let mut buf = Vec::new();
            let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
            if resized.write_with_encoder(encoder).is_err() {
                continue;
            }
            if buf.len() as u64 <= max_bytes {
                return Some((buf, dimension, quality));
            }
        }
        dimension = dimension.saturating_sub(8);
    }
    None
}
