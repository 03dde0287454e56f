//! Knowledge-base creation wizard.
//!
//! Three steps produce a record: Analysis (product data extraction),
//! Configuration (brand voice) and Review. A record can only be built once
//! both the analysis and the tone are in place.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{AnalysisResult, BrandTone, KnowledgeRecord};

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Analysis,
    Configuration,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 3] = [
        WizardStep::Analysis,
        WizardStep::Configuration,
        WizardStep::Review,
    ];

    /// Zero-based position of the step
    pub fn index(&self) -> usize {
        match self {
            Self::Analysis => 0,
            Self::Configuration => 1,
            Self::Review => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Analysis => "Analysis",
            Self::Configuration => "Configuration",
            Self::Review => "Review",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Analysis => "Product data extraction",
            Self::Configuration => "Brand voice setup",
            Self::Review => "Import testimonials",
        }
    }

    fn previous(&self) -> Self {
        match self {
            Self::Analysis | Self::Configuration => Self::Analysis,
            Self::Review => Self::Configuration,
        }
    }
}

/// In-progress knowledge base
#[derive(Debug, Clone)]
pub struct KnowledgeWizard {
    step: WizardStep,
    analysis: Option<AnalysisResult>,
    tone: Option<BrandTone>,
}

impl Default for KnowledgeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Analysis,
            analysis: None,
            tone: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn tone(&self) -> Option<BrandTone> {
        self.tone
    }

    /// Record the analysis result and move to tone selection.
    pub fn complete_analysis(&mut self, result: AnalysisResult) -> WizardStep {
        self.analysis = Some(result);
        self.step = WizardStep::Configuration;
        self.step
    }

    /// Pick the brand tone and move to review.
    pub fn select_tone(&mut self, tone: BrandTone) -> Result<WizardStep> {
        if self.analysis.is_none() {
            return Err(Error::validation("Complete the analysis before selecting a tone"));
        }
        self.tone = Some(tone);
        self.step = WizardStep::Review;
        Ok(self.step)
    }

    /// Go back one step. Data entered so far is kept.
    pub fn back(&mut self) -> WizardStep {
        self.step = self.step.previous();
        self.step
    }

    /// Build the record, timestamped now.
    pub fn finish(&self) -> Result<KnowledgeRecord> {
        self.finish_at(iso_timestamp(Utc::now()))
    }

    /// Build the record with an explicit timestamp.
    pub fn finish_at(&self, timestamp: impl Into<String>) -> Result<KnowledgeRecord> {
        let (Some(analysis), Some(tone)) = (&self.analysis, self.tone) else {
            return Err(Error::validation("Please complete all steps before saving"));
        };
        if self.step != WizardStep::Review {
            return Err(Error::validation("Please complete all steps before saving"));
        }
        let timestamp = timestamp.into();
        if timestamp.is_empty() {
            return Err(Error::validation("Timestamp is required to save a knowledge base"));
        }
        Ok(KnowledgeRecord::new(analysis.clone(), tone, timestamp))
    }

    /// Start over after a successful save.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// ISO-8601 UTC timestamp with millisecond precision, e.g. `2024-05-01T10:00:00.000Z`
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
