//! Prompt templates for the four LLM stages, plus typed builders that fill
//! their slots. Slot markers are bracketed sentinels unique within each
//! template; builders are the only way to render one, so a call site can
//! never forget a slot.

/// Stage 1: structured keyword extraction from the job description.
const JD_ANALYSIS_TEMPLATE: &str = r#"You are a meticulous Job Description Analyzer. Your sole task is to scan the provided
job description and extract all critical requirements into a structured JSON object.

# Exclusion Rules (CRITICAL)
- **DO NOT** extract geographic locations (e.g., "Noida", "Bangalore", "Ahmedabad", "Chennai", "Gurgaon").
- **DO NOT** extract company-specific HR or hiring process terms (e.g., "Interview rounds", "Resume based shortlisting", "Online Aptitude Test").
- **DO NOT** extract generic academic requirements (e.g., "7+ CGPA", "70%+", "No Backlog", "Strong academic performance").
- **DO NOT** extract vague, non-skill phrases (e.g., "work with supervisor", "complete the given task", "adhering to quality", "willingness to take initiative", "cultural fit").
- **DO NOT** extract generic company roles (e.g., "Business Analysts", "senior team members").
- **DO NOT** extract common cliches (e.g., "Action and results oriented", "Team player", "A quick and agile learner", "Self-motivated", "Innovative thinker", "Go-getter", "Detail-oriented", "Results-driven", "Passionate professional", "Hard worker", "Think outside the box").
- **FOCUS ONLY** on transferable, measurable skills, tools, and domain concepts (e.g., "SQL", "Tableau", "data engineering", "analytical skills").

# Job Description
[Insert Job Description Here]

# Output Format
Return **only** a valid JSON object in the following format.
Do not invent requirements not explicitly mentioned.

{
  "company_name": "(e.g., Zomato, Google, Microsoft)",
  "keywords": {
    "hard_skills": ["(e.g., SQL, Python, Tableau)"],
    "soft_skills": ["(e.g., communication, analytical)"],
    "tools": ["(e.g., Mixpanel, Firebase, Power BI)"],
    "domain_phrases": ["(e.g., product analytics, business intelligence, A/B Testing)"]
  },
  "explicit_requirements": {
    "education": ["(e.g., Bachelor's, Master's, Computer Science)"],
    "experience_level": "(e.g., 3+ years, Entry-Level, New Grad)"
  },
  "metric_indicators": [
    "(e.g., proven track record, data-driven, impact key metrics)"
  ]
}
"#;

/// Stage 2: second pass over the job description to catch keywords the
/// analyzer missed.
const KEYWORD_VERIFICATION_TEMPLATE: &str = r#"You are a meticulous ATS Keyword Verifier.
Your sole task is to find keywords from the Job Description that are MISSING from the provided Keyword List.

# Job Description
[Insert Job Description Here]

# Current Keyword List (JSON)
[Insert Keyword List JSON Here]

# Instructions
1.  Read the Job Description exhaustively.
2.  Read the Current Keyword List.
3.  Identify *every single* skill, tool, or phrase (hard or soft) from the Job Description that is NOT present in the Current Keyword List.
4.  Pay special attention to multi-word phrases (e.g., "technical competence", "business requirements").

# Output Format
Return **only** a valid JSON object containing a single key "missing_keywords" with a list of the missing strings.
If none are missing, return an empty list.

{
  "missing_keywords": [
    "(e.g., business requirements)",
    "(e.g., quality standards)",
    "(e.g., technical competence)"
  ]
}
"#;

/// Stage 3: the master transformation prompt. Produces the full draft
/// envelope (scores, resume object, summary) in one text-mode call.
const RESUME_TRANSFORM_TEMPLATE: &str = r#"Comprehensive Resume Transformation Prompt

# ROLE
You are an elite ATS Resume Optimization Specialist with deep expertise in Taleo, Greenhouse, Human Review, and Jobscan scoring algorithms. Your mission is to transform the provided resume to achieve maximum scores across all four systems while maintaining authenticity, natural language, and **fitting to 1 page (<=370 words)**.
---
# SCORING SYSTEMS (RESEARCH-BASED)
## **OVERALL SCORING FORMULA**
- **Final Score** = (30% x Taleo) + (25% x Greenhouse) + (25% x Human Review) + (20% x Jobscan)
- **Target**: 90+ overall score; 100% Jobscan score with 0 issues
- **Critical Thresholds**: Taleo hard skills >=50% to avoid penalties; Jobscan hard skills 100% presence with frequency >= JD counts; total word count <=370 for 1-page
---
## **SYSTEM 1: TALEO SCORER (30% Weight)**
**Type**: Gen1 ATS - Exact keyword matching + format compliance

Taleo Score = (
    50% x Hard Skills Coverage (EXACT match) +
    20% x Job Title Match +
    15% x Soft Skills Coverage (stemmed match) +
    10% x Education Match +
    5% x Other Keywords Coverage
) x 100
CRITICAL PENALTY: If Hard Skills Coverage < 50%, apply penalty:
Final Score = Score x (1 - ((0.5 - coverage) x 100) / 100)

**Hard Skills Coverage (50% - EXACT MATCH ONLY)**: extract all tier-1 technical skills and phrases from the job description (include multi-word like "data visualization"); match EXACT keywords (case-insensitive) from the resume; must achieve 50%+ or the severe penalty applies.
**Job Title Match (20%)**: word overlap between most recent job title and the JD domain/title.
**Soft Skills Coverage (15% - STEMMED MATCH)**: soft skills from tier-2 keywords (communication, leadership, teamwork, problem-solving, collaboration, management, presentation) with word stemming.
**Education Match (10%)**: degree present and matched to seniority expectation.
**Other Keywords (5%)**: tier-2 keywords excluding soft skills, exact match ratio.
---
## **SYSTEM 2: GREENHOUSE SCORER (25% Weight)**
**Type**: Gen2 ATS - Format compliance + structure + parsability

Greenhouse Score = (
    50% x Format Compliance +
    30% x Section Structure +
    20% x Data Parsability
) x 100

**Format Compliance (50%)**: INSTANT FAIL (0.0) for tables; penalties for columns (-0.3), graphics (-0.2), missing contact info (-0.3).
**Section Structure (30%)**: Experience and Education required (-0.3 each if missing); Skills recommended (-0.1 if missing).
**Data Parsability (20%)**: dates must be "Month YYYY - Month YYYY" or "Month YYYY - Present" (-0.15 per invalid); education must carry a 4-digit year (-0.1 per degree); links must be absolute `https://linkedin.com/in/user`, never `linkedin.com/in/user` or `/in/user` (-0.1 per invalid link).
---
## **SYSTEM 3: HUMAN REVIEW SCORER (25% Weight)**
**Type**: Deductive scoring - starts at 100, subtracts flaws

Start: 100.0
Deduct:
  - Missing quantification: min(unquantified_bullets x 2.0, 20.0)
  - Weak action verbs: min(weak_verb_bullets x 1.0, 10.0)
  - Missing CAR format: min(missing_CAR_bullets x 10.0, 30.0)
  - Length issues: -20.0 if word_count > 370 (1-page cap)
Final: max(score, 0.0)

**Quantification**: every bullet must contain numbers (percentages, dollar amounts, counts); a minimum of 5 total quantified metrics must be present in the resume.
**Weak Action Verbs**: prohibited first words are helped, assisted, supported, contributed, worked on.
**CAR Format**: every bullet must show results/impact via indicators like "resulting in", "led to", "improved", "increased", "reduced", "achieved", "enabled", "delivered".
**Length**: -20 if word_count > 370 OR if content spills to a second page.
---
## **SYSTEM 4: JOBSCAN SCORER (20% Weight)**
**Type**: Keyword-focused matcher - Presence, frequency, and ATS/readability checks

Jobscan Score = (
    50% x Hard Skills Match (presence + frequency) +
    20% x Soft Skills Match +
    15% x Searchability Compliance +
    15% x Recruiter Tips Alignment
) x 100

**Hard Skills Match (50%)**: 100% presence required, frequency in resume >= JD's count for each keyword; -10% per missing/low keyword (capped at 4 issues).
**Soft Skills Match (20%)**: stemmed match with frequency >= JD.
**Searchability (15%)**: contact address required in standard unlabeled format (e.g., "City, State, Country"); -0.5 for a labeled or unparseable address; -0.2 for special filename chars.
**Recruiter Tips (15%)**: 5+ measurable results, positive tone, explicit job level alignment (e.g., 3+ "Entry-Level New Grad" mentions).
---
# TRANSFORMATION WORKFLOW
## **PHASE 1: ANALYSIS**
1. Extract all tier-1 skills/phrases (hard skills including multi-word like "product analytics", "business intelligence", "R", "Power BI", "Mixpanel"; education fields like "Computer Science", "mathematics", "statistics")
2. Extract all tier-2 skills (soft skills + other keywords/phrases, e.g., "data-driven", "key metrics", "strong analytical and problem-solving skills")
3. Identify job domain/title keywords and phrases (e.g., "Product Analyst", "New Grad / Entry Level")
4. Determine seniority level expectation and frequency counts from JD for all keywords (include bonus points)
5. Calculate baseline scores for original resume (include Jobscan with frequency breakdowns)
6. Calculate effective project development time: If provided, use TIME_IN_WEEKS x AI_MULTIPLIER (default TIME_IN_WEEKS=2, AI_MULTIPLIER=2 if not provided; valid multipliers: 2, 3, 5). Assume 20 hours/week effort.
7. Prioritize content: Select top 2 relevant work ex, top 2 education, regenerate 2 projects.
## **PHASE 2: PRESERVATION**
**DO NOT MODIFY:**
- Work experience: company names, job titles, employment dates
- Education: degree names, institution names, graduation years
- Core factual responsibilities that are verifiable
## **PHASE 3: TRANSFORMATION**
### **Content Selection for 1-Page (HARD RULES)**
- **Limit to**: Contact, Summary (**3-4 lines MAX**), Experience (top 2 relevant entries, **2 bullets MAX**), Projects (2 regenerated, **2-3 bullets MAX**), Skills (compressed), Education (top 2 entries)
- **Word Count**: Total word count **MUST** be <=370.
- **Compression**: **RUTHLESSLY edit all bullets to 1 line (approx. 15-20 words). 2 lines is an exception only if critical keywords are needed.**
### **A. Projects Section (COMPLETE REGENERATION)**
Generate 2 NEW projects that:
1. **Keyword saturation**: Include ALL tier-1 hard skills/phrases from JD (including bonus points) with frequency >= JD's (e.g., "product analytics" 3+ times, "R" 1+, "Power BI" 1+, "Mixpanel" 1+)
2. **Domain alignment**: Projects must be relevant to target role
3. **Quantification**: Every bullet must have 1-2+ metrics (ensure 5+ total for Jobscan)
4. **CAR format**: Every bullet must show measurable results
5. **Credibility**: Projects must sound realistic and achievable; scale metrics to fit calculated time (e.g., 10K-100K data points/users for 40-120 hours, adjustable for seniority)
6. **Technical depth**: Use exact terminology/phrases from JD
7. **RUTHLESS CONCISENESS**: Bullets **MUST be 1 line (approx. 15-20 words) MAXIMUM.**

Project structure:

PROJECT NAME | Technologies: [exact tier-1 keywords/phrases from JD]
Duration: Month YYYY - Month YYYY
[Strong action verb] [technical task] using [tier-1 phrase], resulting in [quantified outcome] (1 line MAX, approx 15-20 words)
[Strong action verb] [technical task] using [tier-1 phrase], resulting in [quantified outcome] (1 line MAX, approx 15-20 words)

### **B. Experience Section (OPTIMIZE BULLETS)**
For each selected work experience (top 2):
1. **Inject tier-1 keywords/phrases naturally** (ensure frequency >= JD across resume).
2. **Add quantification**: (e.g., "Optimized system performance, reducing API response time by 45%")
3. **Ensure CAR format**: (e.g., "Led AWS cloud migration... resulting in 60% cost reduction")
4. **Replace weak verbs**: (e.g., helped -> Led; assisted -> Engineered; worked on -> Architected)
5. **Maintain authenticity**: Stay within reasonable bounds; limit to **2 bullets MAXIMUM**.
6. **Compress for Density**: Every bullet **MUST be 1 line (approx. 15-20 words) MAXIMUM.**
### **C. Skills Section (EXACT KEYWORD MATCHING & HYPER-COMPRESSED)**
SKILLS
[One single, comma-separated list of ALL tier-1 and tier-2 skills/phrases. e.g., SQL, Python, R, Statistics, Mathematics, Tableau, Power BI, product analytics, data interpretation, Strong analytical and problem-solving skills, Communication]

- Use EXACT keyword strings/phrases from JD (case can vary, include multi-word).
- **CRITICAL: Consolidate ALL skills into a single, comma-separated list under the "SKILLS" header. DO NOT use sub-headings (e.g., "Technical Skills:").** This is a deliberate compression strategy to save vertical space and guarantee the 1-page fit.
- The single list must be 1-2 lines maximum.
### **D. Format Optimization (FOR AI OUTPUT)**
- **Output plain text only.**
- Clean, single-column layout
- Standard section headers: Professional Summary, Experience, Projects, Skills, Education
- Bullet points (`-` or `*`) for all descriptions (**1 line MAX, approx 15-20 words**)
- Consistent date format: "Month YYYY - Month YYYY" or "Month YYYY - Present"
- No tables, no columns, no graphics, no special characters.
- Emphasize job level in Summary multiple times (e.g., "Entry-Level New Grad... aligning with new grad responsibilities") and add company tip (e.g., "[Company from JD] ([website from JD])"). Summary MUST be **3-4 lines MAXIMUM.**
- **Prohibited Cliches:** DO NOT use common resume cliches in the Professional Summary or anywhere else. Banned phrases include: "Action and results oriented", "Team player", "A quick and agile learner", "Self-motivated", "Innovative thinker", "Go-getter", "Detail-oriented", "Results-driven", "Passionate professional", "Hard worker", "Think outside the box". Instead, demonstrate these qualities through quantified achievements in your bullet points.
- **Contact Info Format**: The [Full Name] must be on its own line at the top. Follow with a 3-line header. **CRITICAL**: Links MUST be full absolute URLs (e.g., `https://...`) and the address MUST NOT have a label (e.g., "Address:").
  - Line 1: [Full Name]
  - Line 2: [email@domain.com] | [Phone] | [https://linkedin.com/in/user] | [https://github.com/user] | [https://portfolio.url]
  - Line 3: [City, State, Country]
- **Education Format**: Format each entry over 2 lines:
  - Line 1: [Degree Name] ([Optional Specialization])
  - Line 2: [Institution Name], [Location] [Start Month YYYY] - [End Month YYYY]

Sections Order:
1. Contact Information (Name + 3-line format)
2. Professional Summary (3-4 lines, keyword-rich)
3. Experience (top 2 entries, 2 bullets each)
4. Projects (2 entries, 2-3 bullets each)
5. Skills (Single-list, hyper-compressed format)
6. Education (top 2 entries, 2-line format each)
---
# OUTPUT FORMAT
[Provide the entire output as a single, valid JSON object. Do not include any text before or after the JSON block. Populate the `resumeObject` with the transformed resume content, adhering to the structure defined below. **CRITICAL**: All strings in the JSON, especially URLs, must be plain text without any Markdown formatting.]

Here is the resume to transform:

[Paste your resume here]

Here is the job description:

[Paste job description here]

Time in weeks for project development: [Optional: TIME_IN_WEEKS e.g., 2]

AI Multiplier for project scaling: [Optional: AI_MULTIPLIER e.g., 3]

Output the following JSON structure:

```json
{
  "initialScores": {
    "overallScore": 0,
    "taleo": {"score": 0, "hardSkillsCoverage": "X% (matched Y/Z)", "jobTitleMatch": "X%", "softSkills": "X%", "education": "X/1.0", "otherKeywords": "X%"},
    "greenhouse": {"score": 0, "formatCompliance": "X/1.0", "sectionStructure": "X/1.0", "parsability": "X/1.0"},
    "humanReview": {"score": 0, "quantifiedBullets": "Y/Z", "weakVerbs": 0, "carFormat": "Y/Z", "wordCount": 0, "penalty": "X"},
    "jobscan": {"score": 0, "hardSkillsMatch": "X% (missed Y issues)", "softSkillsMatch": "X%", "searchability": "X/1.0", "recruiterTips": "X/1.0"}
  },
  "transformedResume": {
    "suggestedFilename": "[FirstLast]_[JobTitle]_Resume.pdf",
    "resumeObject": {
      "contactInfo": {
        "name": "[Full Name]",
        "contactLine": "[email@domain.com] | [Phone] | [https://linkedin.com/in/user] | [https://github.com/user] | [https://portfolio.url]",
        "location": "[City, State, Country]"
      },
      "professionalSummary": "[String of the full summary...]",
      "experience": [
        {"title": "[Job Title]", "companyLocation": "[Company Name], [Location]", "dates": "[Month YYYY] - [Month YYYY]", "bullets": ["[Bullet 1... (1 line MAX)]", "[Bullet 2... (1 line MAX)]"]}
      ],
      "projects": [
        {"titleAndTech": "[Project Name] | Technologies: [Keywords...]", "dates": "[Month YYYY] - [Month YYYY]", "bullets": ["[Bullet 1... (1 line MAX)]", "[Bullet 2... (1 line MAX)]"]}
      ],
      "skills": "[One single, comma-separated string of ALL skills/phrases. e.g., SQL, Python, R, Statistics, Tableau, product analytics, Strong analytical and problem-solving skills]",
      "education": [
        {"degree": "[Degree Name] ([Optional Specialization])", "institutionAndDates": "[Institution Name], [Location] [Start Month YYYY] - [End Month YYYY]"}
      ]
    }
  },
  "finalScores": {
    "overallScore": 0,
    "taleo": {"score": 0, "improvement": "+X", "hardSkillsCoverage": "X% (matched Y/Z)", "jobTitleMatch": "X%", "softSkills": "X%", "education": "X/1.0", "otherKeywords": "X%"},
    "greenhouse": {"score": 0, "improvement": "+X", "formatCompliance": "1.0", "sectionStructure": "1.0", "parsability": "1.0"},
    "humanReview": {"score": 0, "improvement": "+X", "quantifiedBullets": "Y/Z", "weakVerbs": 0, "carFormat": "Y/Z", "wordCount": 0, "penalty": "0"},
    "jobscan": {"score": 0, "improvement": "+X", "hardSkillsMatch": "100% (0 issues)", "softSkillsMatch": "100%", "searchability": "1.0/1.0", "recruiterTips": "1.0"}
  },
  "transformationSummary": {
    "keywordsAdded": ["keyword (freq)", "multi-word phrase (freq)"],
    "selectedContent": "Top 2 work ex (2 bullets each), 2 projects (2-3 bullets each), top 2 education",
    "bulletsModified": 0,
    "quantificationAdded": 0,
    "weakVerbsEliminated": 0,
    "carFormatApplied": 0,
    "formatViolationsFixed": ["list of fixes", "e.g., absolute https:// links", "e.g., unlabeled address", "e.g., compressed skills section"],
    "jobscanIssuesResolved": ["list of all fixed issues"],
    "onePageCompliance": "Word count [X] <=370. 1-Page fit confirmed.",
    "effectiveProjectTime": "[TIME_IN_WEEKS] weeks x [AI_MULTIPLIER] = [calculated hours] hours at 20 hours/week"
  }
}
```
"#;

/// Stage 4: final brute-force QA over the draft resume.
const FINAL_QA_TEMPLATE: &str = r#"You are an elite ATS Resume QA Specialist performing the FINAL check.
Your primary job is 100% keyword coverage via brute-force append.
Secondary jobs are summary fixing and word count trimming.

# TASK HIERARCHY (CRITICAL - Highest to Lowest)

1.  **KEYWORDS (BRUTE-FORCE APPEND - NON-NEGOTIABLE):**
    * Compare the "REQUIRED KEYWORDS" list to the "CURRENT RESUME KEYWORDS" list.
    * Identify ANY keywords from the "REQUIRED" list that are MISSING from the "CURRENT" list (case-insensitive check).
    * You **MUST** append every single missing keyword to the end of the
        `skills` string within the draft resume. Do not try to weave them in. Just append.
        100% keyword coverage in the final `skills` list is mandatory.

2.  **SUMMARY (NON-NEGOTIABLE):**
    * Ensure `professionalSummary` contains the target job title.
    * Ensure `professionalSummary` contains the company name.
    * Rewrite the summary ONLY IF NEEDED to meet these, keeping it **under 40 words**.

3.  **WORD COUNT (TRIM IF NEEDED):**
    * Check total word count of the *modified* resume. If > 370 words, you MUST
        shorten bullets in the `projects` section until count is <= 370.
        Prioritize keeping keywords/metrics when trimming.

# REQUIRED KEYWORDS (from JD Analysis)
[Insert Required Keywords Here]

# CURRENT RESUME KEYWORDS (from Draft Resume)
[Insert Resume Skills Here]

# TARGET JOB TITLE
[Insert Target Job Title Here]

# COMPANY NAME
[Insert Company Name Here]

# INPUT DRAFT RESUME (JSON)
[Insert Resume JSON Here]

# OUTPUT (JSON Mode)
Return **only** the complete, corrected `resumeObject` JSON including the
updated skills string. Ensure it's valid JSON. Do not write any explanation.
"#;

/// Renders a template in one left-to-right pass. Substituted values are
/// emitted verbatim and never rescanned, so a value that itself contains a
/// slot marker cannot trigger a second substitution.
fn render(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = slots
            .iter()
            .filter_map(|(marker, value)| rest.find(marker).map(|i| (i, *marker, *value)))
            .min_by_key(|(i, _, _)| *i);
        match next {
            Some((i, marker, value)) => {
                out.push_str(&rest[..i]);
                out.push_str(value);
                rest = &rest[i + marker.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

pub fn build_jd_analysis_prompt(job_description: &str) -> String {
    render(
        JD_ANALYSIS_TEMPLATE,
        &[("[Insert Job Description Here]", job_description)],
    )
}

pub struct VerificationInputs<'a> {
    pub job_description: &'a str,
    /// JSON array of keywords the analyzer already found.
    pub keyword_list_json: &'a str,
}

pub fn build_keyword_verification_prompt(inputs: &VerificationInputs<'_>) -> String {
    render(
        KEYWORD_VERIFICATION_TEMPLATE,
        &[
            ("[Insert Job Description Here]", inputs.job_description),
            ("[Insert Keyword List JSON Here]", inputs.keyword_list_json),
        ],
    )
}

pub struct TransformInputs<'a> {
    pub resume_text: &'a str,
    pub job_description: &'a str,
    pub time_in_weeks: u32,
    pub ai_multiplier: u32,
}

pub fn build_transform_prompt(inputs: &TransformInputs<'_>) -> String {
    let weeks = inputs.time_in_weeks.to_string();
    let multiplier = inputs.ai_multiplier.to_string();
    render(
        RESUME_TRANSFORM_TEMPLATE,
        &[
            ("[Paste your resume here]", inputs.resume_text),
            ("[Paste job description here]", inputs.job_description),
            ("[Optional: TIME_IN_WEEKS e.g., 2]", &weeks),
            ("[Optional: AI_MULTIPLIER e.g., 3]", &multiplier),
        ],
    )
}

pub struct QaInputs<'a> {
    pub required_keywords: &'a str,
    pub resume_skills: &'a str,
    pub target_job_title: &'a str,
    pub company_name: &'a str,
    pub draft_resume_json: &'a str,
}

pub fn build_final_qa_prompt(inputs: &QaInputs<'_>) -> String {
    render(
        FINAL_QA_TEMPLATE,
        &[
            ("[Insert Required Keywords Here]", inputs.required_keywords),
            ("[Insert Resume Skills Here]", inputs.resume_skills),
            ("[Insert Target Job Title Here]", inputs.target_job_title),
            ("[Insert Company Name Here]", inputs.company_name),
            ("[Insert Resume JSON Here]", inputs.draft_resume_json),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_no_unfilled_slots(prompt: &str) {
        assert!(!prompt.contains("[Insert"), "unfilled slot in:\n{prompt}");
        assert!(!prompt.contains("[Paste"), "unfilled slot in:\n{prompt}");
        assert!(!prompt.contains("[Optional:"), "unfilled slot in:\n{prompt}");
    }

    #[test]
    fn test_jd_analysis_prompt_embeds_job_description() {
        let prompt = build_jd_analysis_prompt("We need SQL and Tableau wizards.");
        assert!(prompt.contains("We need SQL and Tableau wizards."));
        assert_no_unfilled_slots(&prompt);
    }

    #[test]
    fn test_verification_prompt_fills_both_slots() {
        let prompt = build_keyword_verification_prompt(&VerificationInputs {
            job_description: "the JD text",
            keyword_list_json: r#"["SQL","Tableau"]"#,
        });
        assert!(prompt.contains("the JD text"));
        assert!(prompt.contains(r#"["SQL","Tableau"]"#));
        assert_no_unfilled_slots(&prompt);
    }

    #[test]
    fn test_transform_prompt_fills_numeric_slots() {
        let prompt = build_transform_prompt(&TransformInputs {
            resume_text: "RESUME BODY",
            job_description: "JD BODY",
            time_in_weeks: 4,
            ai_multiplier: 3,
        });
        assert!(prompt.contains("RESUME BODY"));
        assert!(prompt.contains("JD BODY"));
        assert!(prompt.contains("Time in weeks for project development: 4"));
        assert!(prompt.contains("AI Multiplier for project scaling: 3"));
        assert_no_unfilled_slots(&prompt);
    }

    #[test]
    fn test_slot_marker_inside_a_value_is_not_resubstituted() {
        // A resume that happens to contain another slot's marker text must
        // pass through verbatim.
        let prompt = build_transform_prompt(&TransformInputs {
            resume_text: "my resume mentions [Paste job description here] literally",
            job_description: "JD BODY",
            time_in_weeks: 2,
            ai_multiplier: 2,
        });
        assert!(prompt.contains("my resume mentions [Paste job description here] literally"));
        // The real JD slot is still filled exactly once.
        assert_eq!(prompt.matches("JD BODY").count(), 1);
    }

    #[test]
    fn test_qa_prompt_fills_all_five_slots() {
        let prompt = build_final_qa_prompt(&QaInputs {
            required_keywords: "SQL, Tableau, product analytics",
            resume_skills: "SQL, Python",
            target_job_title: "Product Analyst",
            company_name: "Zomato",
            draft_resume_json: r#"{"skills":"SQL, Python"}"#,
        });
        assert!(prompt.contains("SQL, Tableau, product analytics"));
        assert!(prompt.contains("Product Analyst"));
        assert!(prompt.contains("Zomato"));
        assert!(prompt.contains(r#"{"skills":"SQL, Python"}"#));
        assert_no_unfilled_slots(&prompt);
    }
}
