//! Payload validation for writes

use crate::contract::{
    GalleryEventPatch, NewGalleryEvent, NewGalleryImage, NewResource, PortalError, ResourcePatch,
};

/// Limits enforced by the upload provider
pub struct UploadPolicy;

impl UploadPolicy {
    /// Largest accepted image
    pub const MAX_IMAGE_BYTES: u64 = 4 * 1024 * 1024;
    /// Images per upload batch
    pub const MAX_IMAGES_PER_UPLOAD: usize = 4;
    /// Largest accepted PDF
    pub const MAX_PDF_BYTES: u64 = 16 * 1024 * 1024;
    /// PDFs per upload batch
    pub const MAX_PDFS_PER_UPLOAD: usize = 1;
}

/// Format a byte count the way the upload form displays it, e.g. "2.35 MB"
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Parse a display size back into bytes; `None` for anything not in "N MB"/"N KB" form
pub fn parse_file_size(display: &str) -> Option<u64> {
    let (number, unit) = display.trim().split_once(char::is_whitespace)?;
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let scale = match unit.trim().to_ascii_uppercase().as_str() {
        "B" => 1.0,
        "KB" => 1024.0,
        "MB" => 1024.0 * 1024.0,
        _ => return None,
    };
    Some((value * scale).round() as u64)
}

fn required(field: &str, value: &str) -> Result<String, PortalError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PortalError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Check and normalise a new resource
pub fn validate_new_resource(resource: NewResource) -> Result<NewResource, PortalError> {
    let title = required("title", &resource.title)?;
    let file_url = required("file_url", &resource.file_url)?;
    let file_size = optional(resource.file_size.as_deref());

    if let Some(bytes) = file_size.as_deref().and_then(parse_file_size) {
        if bytes > UploadPolicy::MAX_PDF_BYTES {
            return Err(PortalError::validation(format!(
                "file size {} exceeds the {} limit",
                format_file_size(bytes),
                format_file_size(UploadPolicy::MAX_PDF_BYTES)
            )));
        }
    }

    Ok(NewResource {
        title,
        description: optional(resource.description.as_deref()),
        category: resource.category,
        file_url,
        file_size,
    })
}

/// Check and normalise a new gallery event
pub fn validate_new_event(event: NewGalleryEvent) -> Result<NewGalleryEvent, PortalError> {
    let title = required("title", &event.title)?;
    if event.image_urls.is_empty() {
        return Err(PortalError::validation("at least one image required"));
    }
    let image_urls = event
        .image_urls
        .iter()
        .map(|url| required("image_url", url))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewGalleryEvent {
        title,
        description: optional(event.description.as_deref()),
        image_urls,
    })
}

pub fn validate_new_image(image: NewGalleryImage) -> Result<NewGalleryImage, PortalError> {
    Ok(NewGalleryImage {
        title: optional(image.title.as_deref()),
        image_url: required("image_url", &image.image_url)?,
    })
}

/// A patch may omit the title but never blank it
pub fn validate_resource_patch(patch: ResourcePatch) -> Result<ResourcePatch, PortalError> {
    Ok(ResourcePatch {
        title: patch.title.as_deref().map(|t| required("title", t)).transpose()?,
        description: patch.description.map(|d| d.trim().to_string()),
        category: patch.category,
    })
}

pub fn validate_event_patch(patch: GalleryEventPatch) -> Result<GalleryEventPatch, PortalError> {
    Ok(GalleryEventPatch {
        title: patch.title.as_deref().map(|t| required("title", t)).transpose()?,
        description: patch.description.map(|d| d.trim().to_string()),
    })
}
