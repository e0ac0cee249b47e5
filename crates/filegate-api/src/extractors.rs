//! Extractors for the generative AI routes.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{FromRequest, FromRequestParts, Multipart, Request},
    http::{header::CONTENT_TYPE, request::Parts},
    Form,
};
use filegate_core::AppError;
use filegate_gateway::Gateway;
use filegate_processing::Upload;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::read_upload;

/// The configured gateway. Rejects with 503 before the body is touched
/// when no API key is configured.
pub struct AvailableGateway(pub Arc<Gateway>);

impl FromRequestParts<Arc<AppState>> for AvailableGateway {
    type Rejection = HttpAppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        state.gateway.clone().map(AvailableGateway).ok_or_else(|| {
            HttpAppError(AppError::ServiceUnavailable(
                "Generative AI service is not available. Configure GOOGLE_API_KEY".to_string(),
            ))
        })
    }
}

/// Form body, either `multipart/form-data` or urlencoded.
///
/// Text fields may repeat; file parts are kept by field name (first wins).
#[derive(Debug, Default)]
pub struct FormFields {
    text: HashMap<String, Vec<String>>,
    files: HashMap<String, Upload>,
}

impl<S> FromRequest<S> for FormFields
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_lowercase().starts_with("multipart/form-data"));

        let mut fields = FormFields::default();

        if is_multipart {
            let mut multipart = Multipart::from_request(req, state).await?;
            while let Some(field) = multipart.next_field().await? {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                if field.file_name().is_some() {
                    let upload = read_upload(field).await?;
                    fields.files.entry(name).or_insert(upload);
                } else {
                    let value = field.text().await?;
                    fields.text.entry(name).or_default().push(value);
                }
            }
        } else {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| {
                    HttpAppError(AppError::InvalidInput(format!(
                        "Invalid form body: {}",
                        e.body_text()
                    )))
                })?;
            for (name, value) in pairs {
                fields.text.entry(name).or_default().push(value);
            }
        }

        Ok(fields)
    }
}

impl FormFields {
    /// First value of a text field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn text_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.text(name).unwrap_or(default)
    }

    pub fn required_text(&self, name: &str) -> Result<&str, HttpAppError> {
        self.text(name).ok_or_else(|| missing(name))
    }

    /// Every value of a repeated text field, in order.
    pub fn texts(&self, name: &str) -> &[String] {
        self.text.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn flag(&self, name: &str, default: bool) -> Result<bool, HttpAppError> {
        match self.text(name) {
            None => Ok(default),
            Some(raw) => match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(HttpAppError(AppError::InvalidInput(format!(
                    "Field '{}' must be a boolean, got '{}'",
                    name, raw
                )))),
            },
        }
    }

    pub fn number(&self, name: &str, default: f32) -> Result<f32, HttpAppError> {
        match self.text(name) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| {
                HttpAppError(AppError::InvalidInput(format!(
                    "Field '{}' must be a number, got '{}'",
                    name, raw
                )))
            }),
        }
    }

    pub fn file(&self, name: &str) -> Option<&Upload> {
        self.files.get(name)
    }

    pub fn take_file(&mut self, name: &str) -> Result<Upload, HttpAppError> {
        self.files.remove(name).ok_or_else(|| missing(name))
    }
}

fn missing(name: &str) -> HttpAppError {
    HttpAppError(AppError::InvalidInput(format!(
        "Missing required field '{}'",
        name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        let mut fields = FormFields::default();
        for (name, value) in pairs {
            fields
                .text
                .entry(name.to_string())
                .or_default()
                .push(value.to_string());
        }
        fields
    }

    #[test]
    fn test_text_defaults_and_required() {
        let form = fields(&[("text", "hello")]);
        assert_eq!(form.text_or("text", "x"), "hello");
        assert_eq!(form.text_or("model", "flash"), "flash");
        assert!(form.required_text("text").is_ok());
        assert!(form.required_text("message").is_err());
    }

    #[test]
    fn test_repeated_texts() {
        let form = fields(&[("texts", "a"), ("texts", "b")]);
        assert_eq!(form.texts("texts"), ["a".to_string(), "b".to_string()]);
        assert!(form.texts("missing").is_empty());
    }

    #[test]
    fn test_flag_and_number_parsing() {
        let form = fields(&[("detailed", "True"), ("temperature", "0.25"), ("bad", "maybe")]);
        assert!(form.flag("detailed", false).unwrap());
        assert!(!form.flag("absent", false).unwrap());
        assert!(form.flag("bad", false).is_err());
        assert_eq!(form.number("temperature", 0.7).unwrap(), 0.25);
        assert_eq!(form.number("absent", 0.7).unwrap(), 0.7);
        assert!(form.number("bad", 0.7).is_err());
    }

    #[test]
    fn test_take_file() {
        let mut form = FormFields::default();
        form.files.insert(
            "file".to_string(),
            Upload::new("a.png", None, Bytes::from_static(b"x")),
        );
        assert!(form.file("file").is_some());
        assert_eq!(form.take_file("file").unwrap().filename, "a.png");
        assert!(form.take_file("file").is_err());
    }
}
