/// Used when neither the caller nor the magic bytes identify the image.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Identifies common photo formats by their leading bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        [_, _, _, _, 0x66, 0x74, 0x79, 0x70, 0x68, 0x65, 0x69, 0x63, ..] => Some("image/heic"),
        _ => None,
    }
}

/// Picks the MIME type to forward: the declared one when present, else a
/// sniffed one, else [`FALLBACK_MIME`].
pub fn resolve_image_mime(declared: Option<&str>, bytes: &[u8]) -> String {
    if let Some(declared) = declared.map(str::trim).filter(|m| !m.is_empty()) {
        return declared.to_string();
    }

    match sniff_image_mime(bytes) {
        Some(mime) => mime.to_string(),
        None => {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), forwarding as {}",
                &bytes[..bytes.len().min(4)],
                FALLBACK_MIME
            );
            FALLBACK_MIME.to_string()
        }
    }
}
