//! Rendering the crop to an encoded file.
//!
//! The pipeline is: resolve the source to bytes, decode, cut out the
//! [`ExportedCropArea`], resample to the requested output size, encode.
//! The same [`ExportOutput`] is then handed back as raw bytes, as a named
//! file, or as a `data:` URL.
//!
//! Failures are local to the export call and never touch a live
//! [`Cropper`](crate::Cropper).

use std::borrow::Cow;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{decode_image, resize, DecodeError, DecodedImage, FilterType};
use crate::encode::{encode_image, EncodeError, OutputFormat, DEFAULT_QUALITY};
use crate::geometry::ExportedCropArea;
use crate::transform::apply_crop;

/// Largest output side accepted for a raster surface.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

/// File stem used when the source has no name of its own.
pub const DEFAULT_FILE_STEM: &str = "cropped";

/// Errors that fail a single export.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    #[error("Failed to decode source: {0}")]
    Decode(#[from] DecodeError),

    /// The output surface could not be created at the requested size.
    #[error("Cannot create {width}x{height} output surface: {reason}")]
    Surface {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("Failed to encode output: {0}")]
    Encode(#[from] EncodeError),

    /// The source bytes could not be obtained.
    #[error("Failed to load source: {0}")]
    Source(String),

    /// The crop rectangle has no area inside the image.
    #[error("Crop area is empty")]
    EmptyCrop,
}

/// Where the pixels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Remote image, fetched through a [`SourceFetcher`].
    Url(String),
    /// A named in-memory file.
    File { name: String, bytes: Vec<u8> },
    /// Anonymous in-memory bytes.
    Blob(Vec<u8>),
}

impl ImageSource {
    /// Stem for the output file name (`"holiday.jpg"` gives `"holiday"`).
    pub fn file_stem(&self) -> &str {
        let name = match self {
            ImageSource::Url(url) => url
                .split(['?', '#'])
                .next()
                .and_then(|path| path.rsplit('/').next())
                .unwrap_or_default(),
            ImageSource::File { name, .. } => name.as_str(),
            ImageSource::Blob(_) => "",
        };
        let stem = match name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => name,
        };
        if stem.is_empty() {
            DEFAULT_FILE_STEM
        } else {
            stem
        }
    }
}

/// Host capability for obtaining source bytes.
pub trait SourceFetcher {
    /// Fetch the bytes behind `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, String>;

    /// Called once an in-memory source is no longer needed by an export.
    fn release(&self, _source: &ImageSource) {}
}

/// Fetcher for hosts that only export in-memory sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFetch;

impl SourceFetcher for NoFetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, String> {
        Err(format!("fetching is not available for {url}"))
    }
}

/// Source bytes held for the duration of one export.
///
/// In-memory sources carry a release hook that runs when the guard drops,
/// so it fires on every exit path.
pub struct SourceGuard<'a> {
    bytes: Cow<'a, [u8]>,
    on_release: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a> SourceGuard<'a> {
    /// Owned bytes with nothing to release.
    pub fn owned(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Cow::Owned(bytes),
            on_release: None,
        }
    }

    /// Borrowed bytes with a hook to run on drop.
    pub fn with_release<F>(bytes: &'a [u8], on_release: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        Self {
            bytes: Cow::Borrowed(bytes),
            on_release: Some(Box::new(on_release)),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for SourceGuard<'_> {
    fn drop(&mut self) {
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}

/// Turn `source` into bytes, fetching URLs through `fetcher`.
pub fn resolve_source<'a>(
    source: &'a ImageSource,
    fetcher: &'a dyn SourceFetcher,
) -> Result<SourceGuard<'a>, ExportError> {
    match source {
        ImageSource::Url(url) => fetcher
            .fetch(url)
            .map(SourceGuard::owned)
            .map_err(ExportError::Source),
        ImageSource::File { bytes, .. } | ImageSource::Blob(bytes) => {
            Ok(SourceGuard::with_release(bytes, move || fetcher.release(source)))
        }
    }
}

/// What to render and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportRequest {
    /// Region of the source image, in image pixels.
    pub crop: ExportedCropArea,
    pub format: OutputFormat,
    /// Encoder quality (1-100); ignored by lossless formats.
    pub quality: u8,
    /// Output width; defaults to the crop width (or keeps the aspect of `output_height`).
    pub output_width: Option<u32>,
    /// Output height; defaults to the crop height (or keeps the aspect of `output_width`).
    pub output_height: Option<u32>,
    pub filter: FilterType,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            crop: ExportedCropArea::default(),
            format: OutputFormat::default(),
            quality: DEFAULT_QUALITY,
            output_width: None,
            output_height: None,
            filter: FilterType::default(),
        }
    }
}

impl ExportRequest {
    pub fn new(crop: ExportedCropArea) -> Self {
        Self {
            crop,
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: OutputFormat, quality: u8) -> Self {
        self.format = format;
        self.quality = quality;
        self
    }

    pub fn with_output_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.output_width = width;
        self.output_height = height;
        self
    }

    /// Output size for a crop of `crop_width` x `crop_height`.
    ///
    /// A single requested side scales the other to keep the crop's aspect.
    pub fn output_size(&self, crop_width: u32, crop_height: u32) -> (u32, u32) {
        let scaled = |value: u32, num: u32, den: u32| -> u32 {
            if den == 0 {
                return 0;
            }
            ((value as f64 * num as f64 / den as f64).round() as u32).max(1)
        };
        match (self.output_width, self.output_height) {
            (Some(width), Some(height)) => (width, height),
            (Some(width), None) => (width, scaled(width, crop_height, crop_width)),
            (None, Some(height)) => (scaled(height, crop_width, crop_height), height),
            (None, None) => (crop_width, crop_height),
        }
    }
}

/// An encoded export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutput {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

/// An export packaged as a named file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ExportOutput {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Raw encoded bytes (the blob variant).
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Named file with the format's extension appended to `stem`.
    pub fn into_file(self, stem: &str) -> ExportedFile {
        ExportedFile {
            name: format!("{}.{}", stem, self.format.extension()),
            mime_type: self.format.mime_type().to_string(),
            bytes: self.bytes,
        }
    }

    /// `data:<mime>;base64,<payload>` string.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime_type(),
            BASE64.encode(&self.bytes)
        )
    }
}

/// Render `request` from an already decoded image.
///
/// # Arguments
///
/// * `image` - Decoded source pixels
/// * `request` - Crop, output size, format and quality
///
/// # Errors
///
/// * `ExportError::EmptyCrop` if the crop has no area inside the image
/// * `ExportError::Surface` for a zero or oversized output size
/// * `ExportError::Encode` if the encoder fails or produces nothing
pub fn export_decoded(
    image: &DecodedImage,
    request: &ExportRequest,
) -> Result<ExportOutput, ExportError> {
    let area = request.crop.clamped_to(image.dimensions());
    if area.is_empty() {
        return Err(ExportError::EmptyCrop);
    }

    let (width, height) = request.output_size(area.width, area.height);
    check_surface(width, height)?;

    let cropped = apply_crop(image, &area);
    let rendered = if (cropped.width, cropped.height) == (width, height) {
        cropped
    } else {
        resize(&cropped, width, height, request.filter)?
    };

    let bytes = encode_image(
        &rendered.pixels,
        rendered.width,
        rendered.height,
        request.format,
        request.quality,
    )?;
    log::debug!(
        "Exported {}x{} {} ({} bytes)",
        width,
        height,
        request.format,
        bytes.len()
    );

    Ok(ExportOutput {
        bytes,
        format: request.format,
        width,
        height,
    })
}

/// Resolve, decode and render `source`.
///
/// Any release hook attached to the source runs before this returns,
/// whether the export succeeded or not.
pub fn export_crop(
    source: &ImageSource,
    fetcher: &dyn SourceFetcher,
    request: &ExportRequest,
) -> Result<ExportOutput, ExportError> {
    let guard = resolve_source(source, fetcher)?;
    let image = decode_image(guard.bytes())?;
    export_decoded(&image, request).map_err(|err| {
        log::warn!("Export failed: {}", err);
        err
    })
}

/// Export as raw encoded bytes.
pub fn export_bytes(
    source: &ImageSource,
    fetcher: &dyn SourceFetcher,
    request: &ExportRequest,
) -> Result<Vec<u8>, ExportError> {
    export_crop(source, fetcher, request).map(ExportOutput::into_bytes)
}

/// Export as a file named after the source.
pub fn export_file(
    source: &ImageSource,
    fetcher: &dyn SourceFetcher,
    request: &ExportRequest,
) -> Result<ExportedFile, ExportError> {
    export_crop(source, fetcher, request).map(|output| output.into_file(source.file_stem()))
}

/// Export as a base64 `data:` URL.
pub fn export_data_url(
    source: &ImageSource,
    fetcher: &dyn SourceFetcher,
    request: &ExportRequest,
) -> Result<String, ExportError> {
    export_crop(source, fetcher, request).map(|output| output.to_data_url())
}

fn check_surface(width: u32, height: u32) -> Result<(), ExportError> {
    let reason = if width == 0 || height == 0 {
        "size must be non-zero"
    } else if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        "size exceeds the maximum surface dimension"
    } else {
        return Ok(());
    };
    Err(ExportError::Surface {
        width,
        height,
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::decode::probe_dimensions;
    use crate::geometry::ImageDimensions;

    fn gradient(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width.max(1)) as u8);
                pixels.push((y * 255 / height.max(1)) as u8);
                pixels.push(64);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn png_source(width: u32, height: u32) -> Vec<u8> {
        let image = gradient(width, height);
        encode_image(&image.pixels, width, height, OutputFormat::Png, 90).unwrap()
    }

    /// Counts release calls; URL fetches serve a fixed PNG.
    struct CountingFetcher {
        released: Cell<usize>,
        body: Vec<u8>,
    }

    impl CountingFetcher {
        fn new() -> Self {
            Self {
                released: Cell::new(0),
                body: png_source(16, 12),
            }
        }
    }

    impl SourceFetcher for CountingFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, String> {
            if url.starts_with("https://") {
                Ok(self.body.clone())
            } else {
                Err(format!("404 for {url}"))
            }
        }

        fn release(&self, _source: &ImageSource) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn test_output_size_defaults() {
        let request = ExportRequest::default();
        assert_eq!(request.output_size(400, 300), (400, 300));

        let request = ExportRequest::default().with_output_size(Some(200), None);
        assert_eq!(request.output_size(400, 300), (200, 150));

        let request = ExportRequest::default().with_output_size(None, Some(100));
        assert_eq!(request.output_size(400, 300), (133, 100));

        let request = ExportRequest::default().with_output_size(Some(64), Some(64));
        assert_eq!(request.output_size(400, 300), (64, 64));
    }

    #[test]
    fn test_export_decoded_crop_size() {
        let image = gradient(40, 30);
        let request = ExportRequest::new(ExportedCropArea::new(10, 5, 20, 10))
            .with_format(OutputFormat::Png, 90);

        let output = export_decoded(&image, &request).unwrap();
        assert_eq!((output.width, output.height), (20, 10));
        assert_eq!(
            probe_dimensions(&output.bytes).unwrap(),
            ImageDimensions::new(20, 10)
        );
    }

    #[test]
    fn test_export_decoded_resamples() {
        let image = gradient(40, 30);
        let request = ExportRequest::new(ExportedCropArea::new(0, 0, 40, 30))
            .with_output_size(Some(10), None);

        let output = export_decoded(&image, &request).unwrap();
        assert_eq!((output.width, output.height), (10, 8));
        assert_eq!(&output.bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_crop_is_clamped_into_image() {
        let image = gradient(40, 30);
        let request = ExportRequest::new(ExportedCropArea::new(30, 20, 50, 50))
            .with_format(OutputFormat::Png, 90);

        let output = export_decoded(&image, &request).unwrap();
        assert_eq!((output.width, output.height), (40, 30));
    }

    #[test]
    fn test_empty_crop_rejected() {
        let image = gradient(40, 30);
        let request = ExportRequest::new(ExportedCropArea::new(0, 0, 0, 10));
        assert_eq!(export_decoded(&image, &request), Err(ExportError::EmptyCrop));
    }

    #[test]
    fn test_surface_limits() {
        let image = gradient(40, 30);
        let request = ExportRequest::new(ExportedCropArea::full(ImageDimensions::new(40, 30)))
            .with_output_size(Some(0), Some(10));
        assert!(matches!(
            export_decoded(&image, &request),
            Err(ExportError::Surface { width: 0, .. })
        ));

        let request = request.with_output_size(Some(MAX_SURFACE_DIMENSION + 1), Some(10));
        assert!(matches!(
            export_decoded(&image, &request),
            Err(ExportError::Surface { .. })
        ));
    }

    #[test]
    fn test_release_runs_on_success_and_failure() {
        let fetcher = CountingFetcher::new();
        let request = ExportRequest::new(ExportedCropArea::new(0, 0, 8, 6));

        let good = ImageSource::Blob(png_source(16, 12));
        assert!(export_bytes(&good, &fetcher, &request).is_ok());
        assert_eq!(fetcher.released.get(), 1);

        let bad = ImageSource::Blob(vec![0, 1, 2, 3]);
        let err = export_bytes(&bad, &fetcher, &request).unwrap_err();
        assert!(matches!(err, ExportError::Decode(_)));
        assert_eq!(fetcher.released.get(), 2);
    }

    #[test]
    fn test_url_sources_are_fetched_not_released() {
        let fetcher = CountingFetcher::new();
        let request = ExportRequest::new(ExportedCropArea::new(4, 4, 8, 4));

        let url = ImageSource::Url("https://example.com/photos/beach.png?w=1".into());
        let file = export_file(&url, &fetcher, &request).unwrap();
        assert_eq!(file.name, "beach.jpg");
        assert_eq!(file.mime_type, "image/jpeg");
        assert_eq!(fetcher.released.get(), 0);

        let missing = ImageSource::Url("ftp://nowhere/x.png".into());
        assert!(matches!(
            export_bytes(&missing, &fetcher, &request),
            Err(ExportError::Source(_))
        ));
    }

    #[test]
    fn test_file_export_uses_source_name() {
        let source = ImageSource::File {
            name: "holiday.final.png".into(),
            bytes: png_source(16, 12),
        };
        let request = ExportRequest::new(ExportedCropArea::new(0, 0, 16, 12))
            .with_format(OutputFormat::Png, 90);

        let file = export_file(&source, &NoFetch, &request).unwrap();
        assert_eq!(file.name, "holiday.final.png");
        assert_eq!(file.mime_type, "image/png");
    }

    #[test]
    fn test_data_url() {
        let source = ImageSource::Blob(png_source(16, 12));
        let request = ExportRequest::new(ExportedCropArea::new(0, 0, 4, 4))
            .with_format(OutputFormat::Png, 90);

        let url = export_data_url(&source, &NoFetch, &request).unwrap();
        assert!(url.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(ImageSource::Blob(vec![]).file_stem(), DEFAULT_FILE_STEM);
        assert_eq!(ImageSource::Url("https://x.org/".into()).file_stem(), DEFAULT_FILE_STEM);
        assert_eq!(ImageSource::Url("https://x.org/a/cat.webp".into()).file_stem(), "cat");
        assert_eq!(
            ImageSource::File {
                name: ".hidden".into(),
                bytes: vec![]
            }
            .file_stem(),
            ".hidden"
        );
    }

    #[test]
    fn test_no_fetch_rejects_urls() {
        let source = ImageSource::Url("https://example.com/a.png".into());
        let request = ExportRequest::new(ExportedCropArea::new(0, 0, 1, 1));
        assert!(matches!(
            export_crop(&source, &NoFetch, &request),
            Err(ExportError::Source(_))
        ));
    }

    #[test]
    fn test_request_from_partial_json() {
        let request: ExportRequest =
            serde_json::from_str(r#"{"crop":{"x":1,"y":2,"width":3,"height":4},"format":"png"}"#)
                .unwrap();
        assert_eq!(request.crop, ExportedCropArea::new(1, 2, 3, 4));
        assert_eq!(request.format, OutputFormat::Png);
        assert_eq!(request.quality, DEFAULT_QUALITY);
        assert_eq!(request.output_width, None);
    }
}
