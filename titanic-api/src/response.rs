//! Answer and HTTP response types.
//!
//! Handlers return a structured [`Answer`] carrying the prose and, when a
//! chart was rendered, the SVG markup as a separate field. The HTTP layer
//! maps it to [`AskResponse`] verbatim; no marker substrings are spliced
//! into the text.

use serde::{Deserialize, Serialize};

/// A structured answer from the query agent.
#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    /// Prose answer shown in the chat transcript.
    pub text: String,
    /// Embeddable SVG markup, present only when a chart was rendered.
    pub chart: Option<String>,
}

impl Answer {
    /// Text-only answer.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            chart: None,
        }
    }

    /// Answer accompanied by a rendered chart.
    pub fn with_chart(text: impl Into<String>, chart: String) -> Self {
        Self {
            text: text.into(),
            chart: Some(chart),
        }
    }
}

/// Request body for `POST /api/v1/ask`.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub query: String,
}

/// Response body for `POST /api/v1/ask`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    /// The question as received.
    pub query: String,
    /// Prose answer.
    pub text_response: String,
    /// Embeddable SVG chart markup, when one was rendered.
    pub visualization: Option<String>,
    /// False only when the service itself failed to process the query;
    /// apologetic fallback answers still count as success.
    pub success: bool,
}

impl AskResponse {
    pub fn from_answer(query: String, answer: Answer) -> Self {
        Self {
            query,
            text_response: answer.text,
            visualization: answer.chart,
            success: true,
        }
    }

    pub fn failure(query: String, message: impl Into<String>) -> Self {
        Self {
            query,
            text_response: message.into(),
            visualization: None,
            success: false,
        }
    }
}
