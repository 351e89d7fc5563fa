//! Configuration types for the two pipelines.
//!
//! Each pipeline has its own config struct built via a builder, so callers
//! set only what they care about and rely on documented defaults for the
//! rest. Both structs carry an injectable backend slot (the vision model for
//! classification, the embedded-image source for extraction) so tests can
//! swap the remote API and the PDF engine for deterministic fakes.

use crate::error::SiftError;
use crate::pipeline::pdf::EmbeddedImageSource;
use crate::pipeline::vision::MeaningModel;
use crate::progress::SortProgress;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Base URL of the default OpenAI-compatible vision endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.sambanova.ai/v1";

/// Default vision model identifier.
pub const DEFAULT_MODEL: &str = "Llama-3.2-90B-Vision-Instruct";

/// Default output folder for meaningful images.
pub const DEFAULT_OUTPUT_DIR: &str = "imagenes_significativas";

/// Configuration for the meaningful-image classification pipeline.
///
/// Built via [`ClassifyConfig::builder()`].
///
/// # Example
/// ```rust
/// use imgsift::ClassifyConfig;
///
/// let config = ClassifyConfig::builder()
///     .api_key("sk-…")
///     .output_dir("significant")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ClassifyConfig {
    /// Folder that meaningful images are copied into. Created if absent.
    /// Default: `imagenes_significativas`.
    pub output_dir: PathBuf,

    /// Credential for the vision endpoint, injected explicitly.
    ///
    /// The library never reads environment variables itself; the CLI reads
    /// `SAMBANOVA_API_KEY` at its own boundary and passes the value here.
    pub api_key: String,

    /// Base URL of the OpenAI-compatible endpoint. Default: SambaNova.
    pub base_url: String,

    /// Vision model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// Sampling temperature. Default: 0.1.
    ///
    /// The classifier wants a deterministic one-word answer; low temperature
    /// together with low `top_p` biases the model toward exactly that.
    pub temperature: f32,

    /// Nucleus sampling parameter. Default: 0.1.
    pub top_p: f32,

    /// Per-call timeout for the vision endpoint in seconds. Default: 60.
    pub api_timeout_secs: u64,

    /// Pre-built classification model. Takes precedence over the endpoint
    /// fields above; tests inject deterministic fakes here.
    pub classifier: Option<Arc<dyn MeaningModel>>,

    /// Optional per-file progress callback.
    pub progress: Option<Arc<dyn SortProgress>>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.1,
            top_p: 0.1,
            api_timeout_secs: 60,
            classifier: None,
            progress: None,
        }
    }
}

impl fmt::Debug for ClassifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifyConfig")
            .field("output_dir", &self.output_dir)
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("classifier", &self.classifier.as_ref().map(|_| "<dyn MeaningModel>"))
            .finish()
    }
}

impl ClassifyConfig {
    /// Create a new builder for `ClassifyConfig`.
    pub fn builder() -> ClassifyConfigBuilder {
        ClassifyConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClassifyConfig`].
#[derive(Debug)]
pub struct ClassifyConfigBuilder {
    config: ClassifyConfig,
}

impl ClassifyConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn top_p(mut self, p: f32) -> Self {
        self.config.top_p = p.clamp(0.0, 1.0);
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn classifier(mut self, model: Arc<dyn MeaningModel>) -> Self {
        self.config.classifier = Some(model);
        self
    }

    pub fn progress(mut self, progress: Arc<dyn SortProgress>) -> Self {
        self.config.progress = Some(progress);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// A credential is required unless a pre-built classifier was injected.
    pub fn build(self) -> Result<ClassifyConfig, SiftError> {
        let c = &self.config;
        if c.api_key.is_empty() && c.classifier.is_none() {
            return Err(SiftError::MissingApiKey);
        }
        if c.base_url.is_empty() {
            return Err(SiftError::InvalidConfig("base URL must not be empty".into()));
        }
        Ok(self.config)
    }
}

/// Configuration for the PDF image-extraction pipeline.
///
/// All fields have working defaults; `ExtractConfig::default()` is a valid
/// configuration backed by the real pdfium engine.
#[derive(Clone, Default)]
pub struct ExtractConfig {
    /// JPEG encode quality for written images (1–100). Default: 95.
    ///
    /// `None` means the default of 95; the builder clamps explicit values.
    pub jpeg_quality: Option<u8>,

    /// Root under which per-document folders are created.
    ///
    /// `None` places each folder next to its source PDF, which matches a
    /// current-directory sweep.
    pub output_root: Option<PathBuf>,

    /// Embedded-image backend. `None` uses the pdfium engine; tests inject
    /// synthetic sources here.
    pub source: Option<Arc<dyn EmbeddedImageSource>>,
}

impl fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractConfig")
            .field("jpeg_quality", &self.quality())
            .field("output_root", &self.output_root)
            .field("source", &self.source.as_ref().map(|_| "<dyn EmbeddedImageSource>"))
            .finish()
    }
}

impl ExtractConfig {
    /// Create a new builder for `ExtractConfig`.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }

    /// Effective JPEG quality.
    pub fn quality(&self) -> u8 {
        self.jpeg_quality.unwrap_or(95)
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.config.jpeg_quality = Some(quality.clamp(1, 100));
        self
    }

    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.output_root = Some(root.into());
        self
    }

    pub fn source(mut self, source: Arc<dyn EmbeddedImageSource>) -> Self {
        self.config.source = Some(source);
        self
    }

    pub fn build(self) -> ExtractConfig {
        self.config
    }
}
