use std::io::{Read, Seek};

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use csv::Trim;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use super::{empty_string_as_none, sanitize_inline_text};
use crate::domain::promotion::NewPromotion;

const TITLE_MAX_LEN: u64 = 200;
const LINK_MAX_LEN: u64 = 2048;

#[derive(Debug, Error)]
pub enum PromotionFormError {
    #[error("title and link required")]
    MissingFields,
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddPromotionForm {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = TITLE_MAX_LEN))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(length(max = LINK_MAX_LEN))]
    pub link: Option<String>,
}

impl AddPromotionForm {
    pub fn into_new_promotion(self) -> Result<NewPromotion, PromotionFormError> {
        let (Some(title), Some(link)) = (self.title.as_deref(), self.link.as_deref()) else {
            return Err(PromotionFormError::MissingFields);
        };

        self.validate()?;

        Ok(NewPromotion::new(sanitize_inline_text(title), link.trim()))
    }
}

#[derive(MultipartForm)]
/// Multipart form carrying a `title,link` CSV of promotions.
pub struct UploadPromotionsForm {
    #[multipart(limit = "2MB")]
    pub csv: TempFile,
}

#[derive(Debug, Error)]
pub enum UploadPromotionsFormError {
    #[error("error reading csv file")]
    FileReadError,
    #[error("error parsing csv file")]
    CsvParseError,
    #[error("upload contains no promotions")]
    EmptyUpload,
}

impl From<std::io::Error> for UploadPromotionsFormError {
    fn from(_: std::io::Error) -> Self {
        UploadPromotionsFormError::FileReadError
    }
}

impl From<csv::Error> for UploadPromotionsFormError {
    fn from(_: csv::Error) -> Self {
        UploadPromotionsFormError::CsvParseError
    }
}

impl UploadPromotionsForm {
    /// Parse the uploaded CSV into promotions, skipping incomplete rows.
    pub fn parse(&mut self) -> Result<Vec<NewPromotion>, UploadPromotionsFormError> {
        self.csv.file.rewind()?;
        parse_promotions(self.csv.file.by_ref())
    }
}

#[derive(Deserialize)]
struct PromotionCsvRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    title: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    link: Option<String>,
}

fn parse_promotions<R: Read>(reader: R) -> Result<Vec<NewPromotion>, UploadPromotionsFormError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut promotions = Vec::new();

    for row in csv_reader.deserialize::<PromotionCsvRow>() {
        let record = row?;

        if let (Some(title), Some(link)) = (record.title, record.link) {
            promotions.push(NewPromotion::new(sanitize_inline_text(&title), link));
        }
    }

    if promotions.is_empty() {
        return Err(UploadPromotionsFormError::EmptyUpload);
    }

    Ok(promotions)
}
