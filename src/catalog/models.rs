use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::CatalogError;

/// Poster suffix requested from the image CDN in place of the feed's original size.
const RESIZED_POSTER_SUFFIX: &str = "._V0_UX600_.jpg";

/// Top-level shape of the most-popular-movies feed
#[derive(Debug, Clone, Deserialize)]
pub struct MostPopularMovies {
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,
    #[serde(default)]
    pub items: Vec<Movie>,
}

impl MostPopularMovies {
    /// Decodes a raw feed body, treating an API-reported error with no items as a failure
    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        let feed: MostPopularMovies = serde_json::from_str(body)?;

        if feed.items.is_empty() && !feed.error_message.trim().is_empty() {
            return Err(CatalogError::Api(feed.error_message));
        }

        Ok(feed)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Movie {
    #[serde(rename = "fullTitle")]
    pub title: String,
    /// Missing or unparseable ratings stay `None`; only question generation defaults them
    #[serde(rename = "imDbRating", default, deserialize_with = "rating_from_feed")]
    pub rating: Option<f32>,
    #[serde(rename = "image")]
    pub image_url: String,
}

impl Movie {
    pub fn new(title: impl Into<String>, rating: Option<f32>, image_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rating,
            image_url: image_url.into(),
        }
    }

    /// Rewrites the poster URL to the fixed 600px variant when it carries a size suffix
    pub fn resized_image_url(&self) -> String {
        match self.image_url.find("._") {
            Some(index) => format!("{}{}", &self.image_url[..index], RESIZED_POSTER_SUFFIX),
            None => self.image_url.clone(),
        }
    }
}

// The feed sends ratings as strings ("9.2", "" for unrated titles)
fn rating_from_feed<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(raw)) => raw.trim().parse::<f32>().ok(),
        Some(Value::Number(number)) => number.as_f64().map(|n| n as f32),
        _ => None,
    })
}
