//! Defensive validation over the parsed provider output.
//!
//! The structured-output contract promises the declared shape, but the
//! provider is an untrusted boundary: enum literals are already enforced by
//! deserialization, numeric ranges are not. A violation here is classified
//! the same as an unparseable body — the result never reaches the store.

use crate::models::analysis::AnalysisResult;

/// Checks every score in the result is within 0-100. Returns a description
/// of the first violation for the log; callers surface the generic
/// malformed-response error to the client.
pub fn validate_result(result: &AnalysisResult) -> Result<(), String> {
    for skill in &result.extracted_skills {
        check_range(skill.level, "extractedSkills.level", &skill.name)?;
    }
    for gap in &result.skill_gaps {
        check_range(gap.current_level, "skillGaps.currentLevel", &gap.skill)?;
        check_range(gap.target_level, "skillGaps.targetLevel", &gap.skill)?;
    }
    for rec in &result.recommendations {
        check_range(rec.match_score, "recommendations.matchScore", &rec.listing.id)?;
        check_range(rec.salary_score, "recommendations.salaryScore", &rec.listing.id)?;
    }
    Ok(())
}

fn check_range(value: u8, field: &str, subject: &str) -> Result<(), String> {
    if value > 100 {
        return Err(format!("{field} is {value} for '{subject}', expected 0-100"));
    }
    Ok(())
}
