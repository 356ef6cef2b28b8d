//! Multipart form collection: text fields by name, file fields kept with their metadata.

use crate::error::AppError;
use crate::model::{NewImage, ProfilePic};
use axum::extract::multipart::{Multipart, MultipartRejection};
use std::collections::HashMap;
use std::path::Path;
use uuid::Uuid;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

pub struct UploadedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    fn require_image(&self) -> Result<(), AppError> {
        if self.bytes.is_empty() {
            return Err(AppError::Validation(format!("{} is empty", self.field)));
        }
        if !self.content_type.starts_with("image/") {
            return Err(AppError::Validation(format!(
                "{} must be an image (got {})",
                self.field, self.content_type
            )));
        }
        Ok(())
    }

    pub fn into_profile_pic(self) -> Result<ProfilePic, AppError> {
        self.require_image()?;
        Ok(ProfilePic {
            content_type: self.content_type,
            bytes: self.bytes,
        })
    }

    /// Clients do not always send a filename; generate one from the content type.
    pub fn into_image(self) -> Result<NewImage, AppError> {
        self.require_image()?;
        let file_name = match self.file_name.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => base_name(n),
            _ => {
                let ext = self.content_type.strip_prefix("image/").unwrap_or("bin");
                format!("{}.{}", Uuid::new_v4(), ext)
            }
        };
        Ok(NewImage {
            file_name,
            content_type: self.content_type,
            bytes: self.bytes,
        })
    }
}

fn base_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string())
}

#[derive(Default)]
pub struct FormData {
    text: HashMap<String, String>,
    files: Vec<UploadedFile>,
}

impl FormData {
    pub fn take_text(&mut self, name: &str) -> Option<String> {
        self.text.remove(name)
    }

    /// First file sent under `name`.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        let idx = self.files.iter().position(|f| f.field == name)?;
        Some(self.files.remove(idx))
    }

    /// Every file sent under `name`, in upload order.
    pub fn take_files(&mut self, name: &str) -> Vec<UploadedFile> {
        let (matching, rest): (Vec<_>, Vec<_>) = self.files.drain(..).partition(|f| f.field == name);
        self.files = rest;
        matching
    }
}

/// Buffer the whole form. A part counts as a file when it carries a filename or a non-text content type.
pub async fn read_form(multipart: Result<Multipart, MultipartRejection>) -> Result<FormData, AppError> {
    let mut multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let mut form = FormData::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let is_file = file_name.is_some()
            || content_type
                .as_deref()
                .is_some_and(|ct| !ct.starts_with("text/plain") && ct != "application/json");
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid multipart request: {}", e.body_text())))?;
        if is_file {
            form.files.push(UploadedFile {
                field: name,
                file_name,
                content_type: content_type.unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string()),
                bytes: bytes.to_vec(),
            });
        } else {
            let value = String::from_utf8(bytes.to_vec())
                .map_err(|_| AppError::BadRequest(format!("{} must be UTF-8 text", name)))?;
            form.text.insert(name, value);
        }
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(field: &str, name: Option<&str>, ct: &str) -> UploadedFile {
        UploadedFile {
            field: field.into(),
            file_name: name.map(str::to_string),
            content_type: ct.into(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[test]
    fn image_keeps_base_name() {
        let img = file("image", Some("../photos/front.jpg"), "image/jpeg").into_image().unwrap();
        assert_eq!(img.file_name, "front.jpg");
    }

    #[test]
    fn image_without_name_gets_generated_one() {
        let img = file("image", None, "image/png").into_image().unwrap();
        assert!(img.file_name.ends_with(".png"));
        assert!(img.file_name.len() > 4);
    }

    #[test]
    fn non_image_is_rejected() {
        let err = file("ProfilePic", Some("cv.pdf"), "application/pdf").into_profile_pic().err().unwrap();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn take_files_keeps_other_fields() {
        let mut form = FormData::default();
        form.files.push(file("image", Some("a.jpg"), "image/jpeg"));
        form.files.push(file("logo", Some("b.jpg"), "image/jpeg"));
        form.files.push(file("image", Some("c.jpg"), "image/jpeg"));
        let images = form.take_files("image");
        assert_eq!(images.len(), 2);
        assert_eq!(images[1].file_name.as_deref(), Some("c.jpg"));
        assert!(form.take_file("logo").is_some());
        assert!(form.take_file("logo").is_none());
    }
}
