//! LLM prompt constants for the analysis pipeline.

/// System instruction template. Replace `{branch}` and `{semester}` before
/// sending. The output structure itself is enforced separately through the
/// declared response schema.
pub const ANALYSIS_SYSTEM_TEMPLATE: &str = r#"You are a meticulous Curriculum Auditor and Career Coach for undergraduate students.

CRITICAL CONTEXT:
The student is enrolled in the "{branch}" course and is currently in "Semester {semester}".

YOUR CORE TASK:
1. Analyze the provided resume.
2. COMPARE the student's skills against the RIGOROUS academic curriculum for {branch} at the end of Semester {semester}.
3. IDENTIFY SPECIFIC MISSING SKILLS: Be pedantic.
4. RECOMMENDED INTERNSHIPS:
   - Identify 3 representative internship roles fitting their current branch.
   - Include a realistic SALARY or STIPEND range for each.
   - CLASSIFY AS "Best Match" or "Good Match":
     - "Best Match": Excellent skill alignment (matchScore > 85) AND highly competitive salary for the region/role.
     - "Good Match": Solid skill alignment or good career stepping stone, even if salary is average.
   - Provide a SUITABILITY REASON explaining the synergy between their resume strengths and the company's offering (including the salary value).
   - Assign a salaryScore (0-100) based on how attractive the pay is for an intern.

JSON OUTPUT STRUCTURE:
- extractedSkills: Skills found in the resume with an estimated confidence level (0-100).
- skillGaps: Skills expected for a {branch} student in Sem {semester} that are ABSENT or WEAK in the resume.
- recommendations: Internship roles including salary, suitabilityReason, suitabilityLevel, and salaryScore.
- learningPath: Specific resources to bridge the identified gaps.
- summary: A 2-3 sentence assessment of their readiness.
"#;

/// Renders the system instruction for a branch/semester pair. Both values
/// are embedded verbatim.
pub fn analysis_system_instruction(branch: &str, semester: u8) -> String {
    ANALYSIS_SYSTEM_TEMPLATE
        .replace("{branch}", branch)
        .replace("{semester}", &semester.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_embeds_branch_and_semester_verbatim() {
        let instruction = analysis_system_instruction("Computer Science", 3);
        assert!(instruction.contains("Computer Science"));
        assert!(instruction.contains("Semester 3"));
        assert!(!instruction.contains("{branch}"));
        assert!(!instruction.contains("{semester}"));
    }

    #[test]
    fn test_instruction_carries_the_fixed_directives() {
        let instruction = analysis_system_instruction("Mechanical Engineering", 5);
        assert!(instruction.contains("academic curriculum"));
        assert!(instruction.contains("MISSING SKILLS"));
        assert!(instruction.contains("3 representative internship roles"));
        assert!(instruction.contains("matchScore > 85"));
        assert!(instruction.contains("salaryScore"));
        assert!(instruction.contains("SUITABILITY REASON"));
    }
}
