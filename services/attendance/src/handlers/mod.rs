pub mod access_event;
pub mod check;
pub mod employee;
pub mod enrollment;
pub mod health;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::AttendanceError;

/// Decode a base64 image payload; empty or undecodable input is `InvalidImage`.
pub(crate) fn decode_image(image_base64: &str) -> Result<Vec<u8>, AttendanceError> {
    let image = STANDARD
        .decode(image_base64.trim())
        .map_err(|_| AttendanceError::InvalidImage)?;
    if image.is_empty() {
        return Err(AttendanceError::InvalidImage);
    }
    Ok(image)
}
