//! Generation request and result types.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::{ContentType, Error, Result};

/// Accepted range for the requested maximum output length.
pub const MAX_LENGTH_RANGE: RangeInclusive<u32> = 50..=2000;

/// Accepted range for the requested sampling temperature.
pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.1..=1.0;

/// A validated request to generate content.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    input: String,
    content_type: ContentType,
    max_length: u32,
    temperature: f32,
}

impl GenerationRequest {
    /// Creates a request after checking every field against its accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the input is empty or a numeric
    /// parameter is out of range.
    pub fn new(
        input: impl Into<String>,
        content_type: ContentType,
        max_length: u32,
        temperature: f32,
    ) -> Result<Self> {
        let input = input.into();
        if input.is_empty() {
            return Err(Error::invalid_request("input must not be empty"));
        }

        if !MAX_LENGTH_RANGE.contains(&max_length) {
            return Err(Error::invalid_request(format!(
                "max_length must be between {} and {}, got {max_length}",
                MAX_LENGTH_RANGE.start(),
                MAX_LENGTH_RANGE.end()
            )));
        }

        // NaN fails `contains`, so it is rejected here as well.
        if !TEMPERATURE_RANGE.contains(&temperature) {
            return Err(Error::invalid_request(format!(
                "temperature must be between {} and {}, got {temperature}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end()
            )));
        }

        Ok(Self {
            input,
            content_type,
            max_length,
            temperature,
        })
    }

    /// Returns the caller-supplied input text.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the content type.
    #[must_use]
    pub const fn content_type(&self) -> ContentType {
        self.content_type
    }

    /// Returns the maximum output length.
    #[must_use]
    pub const fn max_length(&self) -> u32 {
        self.max_length
    }

    /// Returns the sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Length of the input in characters.
    #[must_use]
    pub fn input_length(&self) -> usize {
        self.input.chars().count()
    }
}

/// Cleaned output returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Cleaned generated text.
    pub content: String,
    /// Content type the request resolved to.
    pub content_type: ContentType,
    /// Input length in characters.
    pub input_length: usize,
    /// Output length in characters.
    pub output_length: usize,
}

impl GenerationResult {
    /// Builds a result for the supplied request and cleaned content.
    #[must_use]
    pub fn new(request: &GenerationRequest, content: String) -> Self {
        let output_length = content.chars().count();
        Self {
            content,
            content_type: request.content_type(),
            input_length: request.input_length(),
            output_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_boundary_values() {
        GenerationRequest::new("topic", ContentType::Blog, 50, 0.1).expect("lower bounds");
        GenerationRequest::new("topic", ContentType::Blog, 2000, 1.0).expect("upper bounds");
    }

    #[test]
    fn rejects_empty_input() {
        let err = GenerationRequest::new("", ContentType::Blog, 500, 0.7).expect_err("empty");
        assert!(matches!(err, Error::InvalidRequest { .. }));
    }

    #[test]
    fn rejects_out_of_range_parameters() {
        for (max_length, temperature) in [(49, 0.7), (2001, 0.7), (500, 0.05), (500, 1.5)] {
            let err = GenerationRequest::new("topic", ContentType::Email, max_length, temperature)
                .expect_err("out of range");
            assert!(matches!(err, Error::InvalidRequest { .. }));
        }
    }

    #[test]
    fn rejects_nan_temperature() {
        let err = GenerationRequest::new("topic", ContentType::Seo, 500, f32::NAN)
            .expect_err("nan temperature");
        assert!(matches!(err, Error::InvalidRequest { .. }));
    }

    #[test]
    fn result_counts_characters_not_bytes() {
        let request = GenerationRequest::new("café", ContentType::Content, 500, 0.7).unwrap();
        let result = GenerationResult::new(&request, "naïve".to_owned());
        assert_eq!(result.input_length, 4);
        assert_eq!(result.output_length, 5);
        assert_eq!(result.content_type, ContentType::Content);
    }
}
