//! Prompt templates sent to AI collaborators

/// Resume characters included in the ATS prompt.
pub const ATS_RESUME_CHARS: usize = 4000;
/// Job description characters included in the ATS and cover letter prompts.
pub const JOB_CHARS: usize = 2000;
pub const COVER_LETTER_RESUME_CHARS: usize = 3000;
pub const JOB_DETAILS_CHARS: usize = 3000;

const ATS_TEMPLATE: &str = r#"You are an expert ATS (Applicant Tracking System) analyzer.

Analyze this resume against the job description and provide:
1. An ATS compatibility score from 0-100
2. Keywords from the job description that are MISSING from the resume
3. Specific suggestions to improve the resume
4. A brief summary

RESUME:
{resume}

JOB DESCRIPTION:
{job}

Respond in this exact JSON format only (no other text):
{"score": <number>, "missing_keywords": ["keyword1", "keyword2"], "suggestions": ["suggestion1", "suggestion2"], "summary": "Brief summary"}
"#;

const JOB_DETAILS_TEMPLATE: &str = r#"Extract job details from this posting.

JOB POSTING:
{job}

Respond in this exact JSON format only:
{"company": "name or null", "position": "title or null", "location": "location or null", "salary_min": null, "salary_max": null}
"#;

const COVER_LETTER_TEMPLATE: &str = r#"Write a {tone} cover letter for someone applying to {company}.

THEIR RESUME:
{resume}

JOB DESCRIPTION:
{job}

Write a compelling 3-4 paragraph cover letter. Do NOT use placeholders like [Your Name].
Start directly with the letter content:"#;

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}

/// Substitute `{name}` placeholders in a single pass over `template`.
/// Inserted values are never scanned again, and braces that do not name a
/// placeholder are copied as-is.
fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        output.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let placeholder = values.iter().find_map(|(name, value)| {
            let remaining = after.strip_prefix(*name)?.strip_prefix('}')?;
            Some((*value, remaining))
        });

        match placeholder {
            Some((value, remaining)) => {
                output.push_str(value);
                rest = remaining;
            }
            None => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

pub fn render_ats_analysis(resume: &str, job: &str) -> String {
    fill(
        ATS_TEMPLATE,
        &[
            ("resume", truncate_chars(resume, ATS_RESUME_CHARS)),
            ("job", truncate_chars(job, JOB_CHARS)),
        ],
    )
}

pub fn render_job_details(job: &str) -> String {
    fill(JOB_DETAILS_TEMPLATE, &[("job", truncate_chars(job, JOB_DETAILS_CHARS))])
}

pub fn render_cover_letter(resume: &str, job: &str, company: &str, tone: &str) -> String {
    fill(
        COVER_LETTER_TEMPLATE,
        &[
            ("tone", tone),
            ("company", company),
            ("resume", truncate_chars(resume, COVER_LETTER_RESUME_CHARS)),
            ("job", truncate_chars(job, JOB_CHARS)),
        ],
    )
}
