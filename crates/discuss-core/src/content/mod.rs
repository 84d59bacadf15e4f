//! Write-time content pipeline
//!
//! Raw comment text goes through two pure transformations before it is
//! persisted: profanity censoring, then markdown-to-HTML rendering of the
//! censored text. The pipeline is total; degraded rendering is always
//! preferred over failure.

mod censor;
mod render;

pub use censor::WordListCensor;
pub use render::BasicRenderer;

/// Profanity filter seam
pub trait Censor: Send + Sync {
    /// Replace unwanted words in the text
    fn censor(&self, text: &str) -> String;
}

/// Markdown renderer seam
pub trait Render: Send + Sync {
    /// Render text to HTML; unrenderable input degrades to escaped plain text
    fn render(&self, text: &str) -> String;
}

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedContent {
    /// Post-censor text, stored as the comment content
    pub text: String,
    /// HTML derived from the post-censor text
    pub html: String,
}

/// The censor-then-render pipeline
pub struct ContentPipeline {
    censor: Box<dyn Censor>,
    renderer: Box<dyn Render>,
}

impl ContentPipeline {
    /// Create a pipeline from custom censor and renderer implementations
    pub fn new(censor: Box<dyn Censor>, renderer: Box<dyn Render>) -> Self {
        Self { censor, renderer }
    }

    /// Create the built-in pipeline: word-list censor + basic renderer
    pub fn basic(censored_words: &[String]) -> Self {
        Self {
            censor: Box::new(WordListCensor::new(censored_words)),
            renderer: Box::new(BasicRenderer::new()),
        }
    }

    /// Run the pipeline once: censor first, render the censored text
    pub fn process(&self, raw: &str) -> ProcessedContent {
        let text = self.censor.censor(raw);
        let html = self.renderer.render(&text);
        ProcessedContent { text, html }
    }
}

impl std::fmt::Debug for ContentPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentPipeline").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_pipeline() -> ContentPipeline {
        ContentPipeline::basic(&["darn".to_string()])
    }

    #[test]
    fn test_process_censors_before_rendering() {
        let pipeline = create_test_pipeline();
        let out = pipeline.process("**bold** darn text");

        // The stored text is post-censor
        assert_eq!(out.text, "**bold** **** text");
        // The HTML is derived from the censored text, never the raw text
        assert!(!out.html.contains("darn"));
        assert!(out.html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_process_is_deterministic() {
        let pipeline = create_test_pipeline();
        let a = pipeline.process("some **bold** text");
        let b = pipeline.process("some **bold** text");
        assert_eq!(a, b);
    }

    #[test]
    fn test_process_never_fails_on_odd_input() {
        let pipeline = create_test_pipeline();
        let out = pipeline.process("<script>**unclosed `junk\n\n\n*");
        assert!(!out.html.contains("<script>"));
        assert!(out.html.contains("&lt;script&gt;"));
    }
}
