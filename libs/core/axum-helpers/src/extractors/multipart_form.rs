//! Buffered `multipart/form-data` extractor for HTML-style forms.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
};

use crate::errors::AppError;

/// A file part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Browsers submit an unnamed, empty part for an untouched file input.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty() && self.file_name.as_deref().is_none_or(str::is_empty)
    }
}

/// Every part of a multipart body, read into memory.
///
/// Text values are trimmed and empty ones read as absent, the way form frameworks
/// normalise input. Presence of a key is tracked separately so checkbox-style
/// flags can be read with [`MultipartForm::contains`].
///
/// The request body limit (`DefaultBodyLimit`) bounds the buffered size.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// True when a part named `name` was submitted, whatever its value.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name) || self.files.contains_key(name)
    }

    /// Trimmed text value; `None` when missing or blank.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Removes and returns the file part `name` unless it is an empty placeholder.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(|file| !file.is_empty())
    }

    pub fn insert_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn insert_file(&mut self, name: impl Into<String>, file: UploadedFile) {
        self.files.insert(name.into(), file);
    }
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if field.file_name().is_some() {
                let file_name = field.file_name().map(str::to_owned);
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;
                form.insert_file(
                    name,
                    UploadedFile {
                        file_name,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let value = field.text().await?;
                form.insert_text(name, value);
            }
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use test_utils::MultipartBody;

    async fn extract(body: MultipartBody) -> MultipartForm {
        let (content_type, bytes) = body.build();
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(bytes))
            .unwrap();

        MultipartForm::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_text_fields_are_trimmed_and_blank_is_absent() {
        let form = extract(
            MultipartBody::new()
                .text("title", "  Sito Vetrina  ")
                .text("type_id", "   ")
                .text("is_completed", ""),
        )
        .await;

        assert_eq!(form.text("title"), Some("Sito Vetrina"));
        assert_eq!(form.text("type_id"), None);
        assert!(form.contains("type_id"));
        assert!(form.contains("is_completed"));
        assert!(!form.contains("description"));
    }

    #[tokio::test]
    async fn test_file_parts_are_buffered() {
        let mut form = extract(MultipartBody::new().file(
            "image",
            "cover.png",
            "image/png",
            b"\x89PNG\r\n\x1a\n".to_vec(),
        ))
        .await;

        let file = form.take_file("image").unwrap();
        assert_eq!(file.file_name.as_deref(), Some("cover.png"));
        assert_eq!(file.content_type.as_deref(), Some("image/png"));
        assert_eq!(file.bytes.len(), 8);
        assert!(form.take_file("image").is_none());
    }

    #[tokio::test]
    async fn test_empty_file_input_reads_as_absent() {
        let mut form = extract(MultipartBody::new().file(
            "image",
            "",
            "application/octet-stream",
            Vec::new(),
        ))
        .await;

        assert!(form.contains("image"));
        assert!(form.take_file("image").is_none());
    }

    #[tokio::test]
    async fn test_non_multipart_request_is_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let result = MultipartForm::from_request(request, &()).await;
        assert!(matches!(result, Err(AppError::MultipartRejection(_))));
    }
}
