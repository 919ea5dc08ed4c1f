//! Core data models for translation and critique

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::core::errors::{ErrorKind, LlmError, Result};

/// Which backend answers LLM calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Synthetic, deterministic answers without network access
    Mock,
    /// Real HTTP calls to the configured endpoint
    Live,
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendMode::Mock => write!(f, "mock"),
            BackendMode::Live => write!(f, "live"),
        }
    }
}

/// Supported target languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Russian,
    French,
    German,
    Spanish,
    Italian,
    Chinese,
    Japanese,
}

impl Language {
    /// All supported languages, in the order shown on the form
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Russian,
        Language::French,
        Language::German,
        Language::Spanish,
        Language::Italian,
        Language::Chinese,
        Language::Japanese,
    ];

    /// Form key, e.g. `french`
    pub fn key(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Russian => "russian",
            Language::French => "french",
            Language::German => "german",
            Language::Spanish => "spanish",
            Language::Italian => "italian",
            Language::Chinese => "chinese",
            Language::Japanese => "japanese",
        }
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Russian => "ru",
            Language::French => "fr",
            Language::German => "de",
            Language::Spanish => "es",
            Language::Italian => "it",
            Language::Chinese => "zh",
            Language::Japanese => "ja",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Russian => "Russian",
            Language::French => "French",
            Language::German => "German",
            Language::Spanish => "Spanish",
            Language::Italian => "Italian",
            Language::Chinese => "Chinese",
            Language::Japanese => "Japanese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Language {
    type Err = LlmError;

    /// Accepts the form key, the ISO code or the display name, ignoring case
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| {
                wanted.eq_ignore_ascii_case(lang.key())
                    || wanted.eq_ignore_ascii_case(lang.code())
                    || wanted.eq_ignore_ascii_case(lang.display_name())
            })
            .ok_or_else(|| LlmError::invalid_input(format!("Unsupported language: {}", wanted)))
    }
}

/// Target language as chosen for one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageSelection {
    pub language: Language,
    /// True when the form omitted a language and the default was used
    pub defaulted: bool,
}

impl LanguageSelection {
    /// Resolve a raw form value, falling back to `default` only when nothing was sent
    pub fn resolve(raw: Option<&str>, default: Language) -> Result<Self> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            Some(value) => Ok(Self {
                language: value.parse()?,
                defaulted: false,
            }),
            None => Ok(Self {
                language: default,
                defaulted: true,
            }),
        }
    }
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_language: Language,
}

impl TranslationRequest {
    pub fn new(source_text: impl Into<String>, target_language: Language) -> Result<Self> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err(LlmError::invalid_input("Text to translate must not be empty"));
        }
        Ok(Self {
            source_text,
            target_language,
        })
    }
}

/// Critique request for an existing translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CritiqueRequest {
    pub original_text: String,
    pub translated_text: String,
}

impl CritiqueRequest {
    pub fn new(original_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            translated_text: translated_text.into(),
        }
    }

    /// Reject pairs with nothing to compare; only the live backend needs this
    pub fn ensure_not_blank(&self) -> Result<()> {
        if self.original_text.trim().is_empty() {
            return Err(LlmError::invalid_input("Original text must not be empty"));
        }
        if self.translated_text.trim().is_empty() {
            return Err(LlmError::invalid_input("Translated text must not be empty"));
        }
        Ok(())
    }
}

/// Check user input and build a [`TranslationRequest`]
pub fn validate_translation_input(
    text: &str,
    language: &str,
    max_text_length: usize,
) -> Result<TranslationRequest> {
    if text.trim().is_empty() {
        return Err(LlmError::invalid_input("Text to translate must not be empty"));
    }

    let length = text.chars().count();
    if length > max_text_length {
        return Err(LlmError::invalid_input(format!(
            "Text is too long: {} characters (maximum {})",
            length, max_text_length
        )));
    }

    let target_language: Language = language.parse()?;
    TranslationRequest::new(text, target_language)
}

/// Outcome of a single LLM client operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LlmResult {
    Success { text: String },
    Failure { kind: ErrorKind, message: String },
}

impl LlmResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LlmResult::Success { .. })
    }

    /// Text of a successful result
    pub fn text(&self) -> Option<&str> {
        match self {
            LlmResult::Success { text } => Some(text),
            LlmResult::Failure { .. } => None,
        }
    }

    /// Kind of a failed result
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            LlmResult::Success { .. } => None,
            LlmResult::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl From<LlmError> for LlmResult {
    fn from(err: LlmError) -> Self {
        LlmResult::Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Result<String>> for LlmResult {
    fn from(result: Result<String>) -> Self {
        match result {
            Ok(text) => LlmResult::Success { text },
            Err(err) => err.into(),
        }
    }
}
