use crate::catalog::Movie;

/// A single yes/no question about a movie's rating
#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    image_data: Vec<u8>,
    text: String,
    correct_answer: bool,
}

impl QuizQuestion {
    pub fn new(image_data: Vec<u8>, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image_data,
            text: text.into(),
            correct_answer,
        }
    }

    /// Builds the "rating above threshold?" question for a movie.
    /// An unrated movie counts as rated 0.
    pub fn about_rating(movie: &Movie, image_data: Vec<u8>, rating_threshold: f32) -> Self {
        let rating = movie.rating.unwrap_or(0.0);
        let text = format!("Is the rating of this movie greater than {}?", rating_threshold);
        Self::new(image_data, text, rating > rating_threshold)
    }

    pub fn image_data(&self) -> &[u8] {
        &self.image_data
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }
}
