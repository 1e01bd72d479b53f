// Prompt templates for the LLM-backed field extractors.
// `{resume_text}` is replaced with the (truncated) document text.

pub const NAME_PROMPT: &str = r#"Identify the candidate's full name in the resume below.

Respond with valid JSON only, in exactly this shape:
{"name": "<candidate full name>"}

RULES:
- Output the JSON object and nothing else: no prose, no markdown.
- Leave out honorifics and titles such as Mr., Ms., Mrs. or Dr.
- Leave out contact details (email, phone, address, links).
- When several names appear, return the one most likely to belong to the candidate.
- When no clear name is present, return {"name": "Unknown"}.

RESUME TEXT:
{resume_text}
"#;

pub const SKILLS_PROMPT: &str = r#"You are a careful resume parser. Read the whole resume below and list every skill it demonstrates.

Respond with valid JSON only, in exactly this shape:
{"skills": ["skill one", "skill two"]}

LOOK EVERYWHERE:
- Skills sections, work experience, projects, education and certifications all count.
- A skill mentioned only once inside a job description still counts.

INCLUDE:
- Programming languages, frameworks, libraries and tools
- Software products and platforms
- Methodologies and engineering practices
- Domain or industry specific skills
- Soft skills such as communication or leadership
- Certifications and qualifications that stand for a skill

EXCLUDE:
- Job titles and company names
- Bare degree names, unless the degree itself names a skill
- Years of experience and proficiency levels
- Personal details such as names, addresses or phone numbers

FORMAT:
- Keep only the core term ("strong Python experience" becomes "python").
- Use lowercase and list each skill once.

RESUME TEXT:
{resume_text}
"#;

pub fn render(template: &str, resume_text: &str) -> String {
    template.replace("{resume_text}", resume_text)
}
