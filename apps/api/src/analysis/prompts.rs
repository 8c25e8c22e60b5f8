// Resume analysis prompt template.
// Wording is product copy; the three-section order and the two slots are what callers rely on.

const RESUME_SLOT: &str = "{resume}";
const JOB_DESCRIPTION_SLOT: &str = "{job_description}";

/// ATS analysis prompt. Replace `{resume}` and `{job_description}` before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"As an experienced ATS (Applicant Tracking System), proficient in the technical domain encompassing Software Engineering, Data Science, Data Analysis, Big Data Engineering, Web Development, Mobile App Development, DevOps, Machine Learning, Cybersecurity, Cloud Architecture, Database Administration, Network Engineering, AI Engineering, Systems Analysis, Full Stack Development, UI/UX Design, IT Project Management and related specialized areas, your objective is to assess the resume below against the provided job description. Assign a precise matching percentage based on the job description and identify any missing keywords accurately.

resume: {resume}

description: {job_description}

I want the response in the following structure:
1. "Match Percentage": the first line states the percentage match with the job description.
2. "Missing Keywords": the second section lists the keywords from the job description that are missing from the resume.
3. "Profile Summary": the third section provides a profile summary of the candidate.
Use exactly these three titles, in this order, and leave a blank line between the sections."#;

/// Substitutes the resume text and job description into the analysis template.
///
/// Single pass over the template: slot markers that appear inside the
/// substituted text are left as they are.
pub fn build_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    let mut prompt = String::with_capacity(
        ANALYSIS_PROMPT_TEMPLATE.len() + resume_text.len() + job_description.len(),
    );
    let mut rest = ANALYSIS_PROMPT_TEMPLATE;

    while let Some((index, slot)) = next_slot(rest) {
        prompt.push_str(&rest[..index]);
        prompt.push_str(if slot == RESUME_SLOT {
            resume_text
        } else {
            job_description
        });
        rest = &rest[index + slot.len()..];
    }
    prompt.push_str(rest);
    prompt
}

fn next_slot(text: &str) -> Option<(usize, &'static str)> {
    [RESUME_SLOT, JOB_DESCRIPTION_SLOT]
        .into_iter()
        .filter_map(|slot| text.find(slot).map(|i| (i, slot)))
        .min_by_key(|(i, _)| *i)
}
