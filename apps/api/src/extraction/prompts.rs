// LLM prompt templates for resume and job extraction.

/// System prompt for both extraction calls.
pub const EXTRACTION_SYSTEM: &str = "\
You are an expert technical recruiter and resume analyst. \
Extract structured information from the text you are given. \
Be precise: extract only what is clearly stated, never invent details.";

/// Job extraction prompt. Replace `{job_text}` before sending.
pub const JOB_EXTRACTION_PROMPT: &str = r#"Analyze the following job description and extract structured information.

Job Description:
{job_text}

Return a JSON object with this EXACT schema:
{
  "title": "Senior Full Stack Developer",
  "company": "Acme Corp" | null,
  "required_skills": ["TypeScript", "PostgreSQL"],
  "preferred_skills": ["Kubernetes"],
  "keywords": [{"word": "React", "frequency": 3}],
  "years_of_experience": 5 | null,
  "description": "string"
}

Extract:
- title: be specific, e.g. "Senior Full Stack Developer" not just "Developer"
- company: company name if mentioned, otherwise null
- required_skills: must-have technical skills, frameworks, tools
- preferred_skills: nice-to-have, bonus skills
- keywords: important keywords, each with the number of times it appears in the text
- years_of_experience: required years if stated, otherwise null
- description: a cleaned version of the job description (remove noise, keep essential information)
"#;

/// Resume extraction prompt. Replace `{resume_text}` before sending.
pub const RESUME_EXTRACTION_PROMPT: &str = r#"Analyze the following resume text and extract structured information.

Resume Text:
{resume_text}

Return a JSON object with this EXACT schema:
{
  "skills": ["Rust", "PostgreSQL"],
  "experience": [
    {
      "title": "string",
      "company": "string",
      "start_date": "MM/YYYY or YYYY" | null,
      "end_date": "MM/YYYY or YYYY" | null,
      "description": "string" | null
    }
  ],
  "education": [
    {
      "degree": "Bachelor of Science",
      "institution": "string",
      "field": "string" | null,
      "graduation_date": "MM/YYYY or YYYY" | null
    }
  ]
}

Extract:
- skills: all technical skills, programming languages, frameworks and tools mentioned
- experience: one entry per position; end_date is null for a current position.
  Use separate "start_date" and "end_date" fields, NOT a single "dates" field.
- education: one entry per degree

Be thorough and extract all relevant information.
"#;
