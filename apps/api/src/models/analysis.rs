//! Analysis output model — the shape the provider is contracted to return.
//!
//! Wire names are camelCase and the enums are restricted to the exact
//! literals declared in the response schema, so a response that strays from
//! the contract fails deserialization instead of leaking through.

use serde::{Deserialize, Serialize};

/// How badly a missing skill hurts the student's readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Importance {
    High,
    Medium,
    Low,
}

/// Where an internship posting is sourced/held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InternshipType {
    Campus,
    #[serde(rename = "Off-Campus")]
    OffCampus,
    Local,
}

/// Categorical verdict the provider assigns to each recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuitabilityLevel {
    #[serde(rename = "Best Match")]
    BestMatch,
    #[serde(rename = "Good Match")]
    GoodMatch,
}

/// A skill the provider found in the resume, with an estimated
/// confidence level (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

/// A curriculum-expected skill that is absent or weak in the resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGap {
    pub skill: String,
    pub current_level: u8,
    pub target_level: u8,
    pub importance: Importance,
}

/// An internship posting. This is the catalog entity; analysis
/// recommendations carry the same shape plus scoring fields (see
/// [`Recommendation`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Internship {
    /// Empty or absent on a create request; the catalog assigns one.
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub required_skills: Vec<String>,
    #[serde(rename = "type")]
    pub kind: InternshipType,
    pub salary: String,
    /// Set on catalog entries curated by an operator, absent on
    /// provider-generated recommendations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_real: Option<bool>,
}

/// An internship recommendation from the provider: a posting plus the
/// match/pay scoring the model attaches to it. Flattened on the wire so the
/// JSON is a single object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(flatten)]
    pub listing: Internship,
    pub match_score: u8,
    pub suitability_reason: String,
    pub suitability_level: SuitabilityLevel,
    pub salary_score: u8,
}

/// A learning resource suggested to close an identified gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    pub title: String,
    pub provider: String,
    pub url: String,
    pub skill_addressed: String,
    pub duration: String,
}

/// The full analysis output. Treated as an atomic immutable snapshot: a new
/// analysis fully replaces the old one, never a partial update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub extracted_skills: Vec<Skill>,
    pub skill_gaps: Vec<SkillGap>,
    pub recommendations: Vec<Recommendation>,
    pub learning_path: Vec<LearningResource>,
    pub summary: String,
}
