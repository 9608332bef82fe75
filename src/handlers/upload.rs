use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::AppError;
use crate::storage::ImageUpload;

const IMAGE_FIELD: &str = "image";

/// Text fields and the optional image of a product form.
#[derive(Debug, Default)]
pub struct ProductForm {
    fields: HashMap<String, String>,
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    /// Trimmed non-blank value of a text field.
    pub fn required(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Value of a text field exactly as submitted, `None` when the field was not sent.
    pub fn optional(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }
}

/// Reads the whole multipart body. Nothing is uploaded here.
pub async fn read_product_form(
    mut multipart: Multipart,
    max_image_bytes: usize,
) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid form data: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Invalid image data: {}", e.body_text())))?;
            if bytes.len() > max_image_bytes {
                return Err(AppError::validation(format!(
                    "Image exceeds the {max_image_bytes} byte limit."
                )));
            }
            if !bytes.is_empty() {
                form.image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Invalid form field {name}: {}", e.body_text())))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}
