/// Resume parsing prompt. `{resume_text}` must already be sanitized: it is
/// embedded inside double quotes.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"You are a resume parsing assistant. Extract the following information from the given resume and return it as valid JSON (DO NOT include "json" prefix):
{
  "full_name": "",
  "title": "",
  "experience": [
    {
      "company": "",
      "location": "",
      "title": "",
      "years": "",
      "description": ""
    }
  ],
  "education": [
    {
      "institution": "",
      "location": "",
      "degree": "",
      "gpa": "",
      "years": ""
    }
  ],
  "skills": [""],
  "location": "",
  "email": "",
  "phone": "",
  "current_company": "",
  "linkedin": "",
  "github": "",
  "portfolio": ""
}

Resume:
"{resume_text}""#;

pub fn build_resume_parse_prompt(sanitized_text: &str) -> String {
    RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", sanitized_text)
}
