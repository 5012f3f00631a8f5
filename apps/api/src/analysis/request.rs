//! Analysis Request Builder — normalizes resume input plus academic context
//! into a single provider request.

use crate::analysis::prompts::analysis_system_instruction;
use crate::errors::AppError;
use crate::llm_client::schema::Schema;
use crate::llm_client::{
    Content, GenerateContentRequest, GenerationConfig, InlineData, Part, SystemInstruction,
};
use crate::models::profile::{MAX_SEMESTER, MIN_SEMESTER};

/// Resume input for one analysis. Exactly one variant is active per
/// request: the provider receives either a text part or an inline-binary
/// part, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum ResumeInput {
    Text(String),
    Document {
        /// Base64-encoded document bytes.
        data: String,
        mime_type: String,
    },
}

/// Builds the provider request. Rejects empty input and out-of-range
/// semesters before anything leaves the process.
pub fn build_analysis_request(
    input: &ResumeInput,
    branch: &str,
    semester: u8,
) -> Result<GenerateContentRequest, AppError> {
    if !(MIN_SEMESTER..=MAX_SEMESTER).contains(&semester) {
        return Err(AppError::Validation(format!(
            "semester must be between {MIN_SEMESTER} and {MAX_SEMESTER}"
        )));
    }

    let part = match input {
        ResumeInput::Text(text) => {
            if text.trim().is_empty() {
                return Err(AppError::Validation(
                    "Please provide your resume content or upload a file.".to_string(),
                ));
            }
            Part::Text(text.clone())
        }
        ResumeInput::Document { data, mime_type } => {
            if data.is_empty() {
                return Err(AppError::Validation(
                    "Please provide your resume content or upload a file.".to_string(),
                ));
            }
            Part::InlineData(InlineData {
                mime_type: mime_type.clone(),
                data: data.clone(),
            })
        }
    };

    Ok(GenerateContentRequest {
        system_instruction: SystemInstruction {
            parts: vec![Part::Text(analysis_system_instruction(branch, semester))],
        },
        contents: vec![Content { parts: vec![part] }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: analysis_response_schema(),
        },
    })
}

/// The declared output shape: all five top-level keys, every nested field
/// required, enums restricted to their exact literal sets.
pub fn analysis_response_schema() -> Schema {
    Schema::object(vec![
        (
            "extractedSkills",
            Schema::array(Schema::object(vec![
                ("name", Schema::string()),
                ("level", Schema::integer()),
            ])),
        ),
        (
            "skillGaps",
            Schema::array(Schema::object(vec![
                ("skill", Schema::string()),
                ("currentLevel", Schema::integer()),
                ("targetLevel", Schema::integer()),
                ("importance", Schema::string_enum(&["High", "Medium", "Low"])),
            ])),
        ),
        (
            "recommendations",
            Schema::array(Schema::object(vec![
                ("id", Schema::string()),
                ("title", Schema::string()),
                ("company", Schema::string()),
                ("location", Schema::string()),
                ("matchScore", Schema::integer()),
                ("description", Schema::string()),
                ("requiredSkills", Schema::array(Schema::string())),
                (
                    "type",
                    Schema::string_enum(&["Campus", "Off-Campus", "Local"]),
                ),
                ("salary", Schema::string()),
                ("suitabilityReason", Schema::string()),
                (
                    "suitabilityLevel",
                    Schema::string_enum(&["Best Match", "Good Match"]),
                ),
                ("salaryScore", Schema::integer()),
            ])),
        ),
        (
            "learningPath",
            Schema::array(Schema::object(vec![
                ("title", Schema::string()),
                ("provider", Schema::string()),
                ("url", Schema::string()),
                ("skillAddressed", Schema::string()),
                ("duration", Schema::string()),
            ])),
        ),
        ("summary", Schema::string()),
    ])
}
