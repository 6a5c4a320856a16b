//! Per-backend prompt styling.
//!
//! Each backend gets a persona and section guidance tuned to what it is good
//! at: Claude for structure, GPT-4o for creative nuance, LLaMA for direct,
//! efficient prose. The action templates in `prompt::build_prompt` splice
//! these fragments in; the fragments themselves never mention the action.

use crate::models::{ModelKind, SectionKind};

/// Style fragments for one backend.
///
/// `generate_note`, `enhance_note`, and `rewrite_note` are full sentences
/// without trailing whitespace. `generate_note` may be empty. Guidance
/// blocks start with a newline so they sit flush after the preamble.
#[derive(Debug)]
pub struct PromptStyle {
    /// Adjective phrase in "Please write a {lead} {section} section".
    pub generate_lead: &'static str,
    pub generate_note: &'static str,
    /// Goal phrase in "to make it {goal} while keeping a {tone} tone".
    pub enhance_goal: &'static str,
    pub enhance_note: &'static str,
    /// Goal phrase in "maintaining the same information but {goal}".
    pub rewrite_goal: &'static str,
    pub rewrite_note: &'static str,
    guidance: SectionGuidance,
}

#[derive(Debug)]
struct SectionGuidance {
    summary: &'static str,
    responsibilities: &'static str,
    required_qualifications: &'static str,
    preferred_qualifications: &'static str,
    benefits: &'static str,
    company_blurb: &'static str,
}

impl PromptStyle {
    pub fn guidance(&self, section: SectionKind) -> &'static str {
        match section {
            SectionKind::Summary => self.guidance.summary,
            SectionKind::Responsibilities => self.guidance.responsibilities,
            SectionKind::RequiredQualifications => self.guidance.required_qualifications,
            SectionKind::PreferredQualifications => self.guidance.preferred_qualifications,
            SectionKind::Benefits => self.guidance.benefits,
            SectionKind::CompanyBlurb => self.guidance.company_blurb,
        }
    }
}

pub fn style_for(model: ModelKind) -> &'static PromptStyle {
    match model {
        ModelKind::Claude => &CLAUDE_STYLE,
        ModelKind::Gpt4o => &GPT4O_STYLE,
        ModelKind::Llama => &LLAMA_STYLE,
    }
}

static CLAUDE_STYLE: PromptStyle = PromptStyle {
    generate_lead: "professional",
    generate_note: "",
    enhance_goal: "more compelling and detailed,",
    enhance_note: "Provide well-structured and clear improvements",
    rewrite_goal: "improving the presentation",
    rewrite_note: "Focus on clarity and structure",
    guidance: SectionGuidance {
        summary: "
You are Claude, known for your structured, professional writing style with clear organization. For this role summary:
- Create a well-structured summary with clear paragraphs
- Use professional language that flows naturally
- Maintain consistent tone throughout
- Focus on clarity and precision in your descriptions
- Organize information in a logical sequence
- Avoid excessive jargon but include relevant industry terms",
        responsibilities: "
For the Key Responsibilities section, use your strengths as Claude to:
- Create a well-structured, clearly organized list of duties
- Use precise, professional language for each responsibility
- Organize duties in a logical progression from core to specialized tasks
- Ensure clarity and consistency in format and language
- Balance detail with readability",
        required_qualifications: "
For the Required Qualifications section, use your strengths as Claude to:
- Create a structured, prioritized list of required skills and experiences
- Use clear, precise language for each qualification
- Structure the list in logical categories if appropriate
- Be specific about requirements while avoiding unnecessary jargon
- Focus on essential, measurable qualifications",
        preferred_qualifications: "
For the Preferred Qualifications section, use your strengths as Claude to:
- Create an organized, clear list of additional desirable qualities
- Distinguish these appropriately from the required qualifications
- Present them in a logical, structured manner
- Use precise language that communicates their value
- Avoid making the list overwhelming or discouraging",
        benefits: "
For the Benefits & Perks section, use your strengths as Claude to:
- Create a well-structured, comprehensive list of benefits
- Organize benefits into logical categories
- Use clear, professional language to describe each benefit
- Present information in a clean, scannable format
- Ensure the benefits are described with appropriate detail",
        company_blurb: "
For the Company Description section, use your strengths as Claude to:
- Create a well-structured, professional company description
- Present information in a logical, organized manner
- Use clear, precise language that communicates company values effectively
- Balance formality with approachability
- Ensure the description is comprehensive yet concise",
    },
};

static GPT4O_STYLE: PromptStyle = PromptStyle {
    generate_lead: "professional",
    generate_note: "Note that you're using GPT-4o for this generation, so provide a creative and nuanced response.",
    enhance_goal: "more compelling and detailed,",
    enhance_note: "Make the content more creative and polished, as you're using GPT-4o",
    rewrite_goal: "improving the presentation",
    rewrite_note: "Add your creative flair as GPT-4o",
    guidance: SectionGuidance {
        summary: "
You are GPT-4o, known for your creative and nuanced writing with engaging language. For this role summary:
- Create an engaging, attention-grabbing opening
- Use vivid language that brings the role to life
- Balance creativity with professionalism
- Incorporate nuanced descriptions that highlight both tangible and intangible aspects of the role
- Include compelling reasons why someone would want this position
- Keep it concise but impactful",
        responsibilities: "
For the Key Responsibilities section, use your strengths as GPT-4o to:
- Create clear, action-oriented bullet points
- Use strong, dynamic verbs at the beginning of each point
- Provide a balanced mix of day-to-day tasks and strategic responsibilities
- Emphasize both the what and the why behind each responsibility
- Make the impact of the role clear through your descriptions",
        required_qualifications: "
For the Required Qualifications section, use your strengths as GPT-4o to:
- Create a clear, focused list of essential qualifications
- Differentiate between truly required skills and those that are preferred
- Ensure qualifications are specific and measurable where possible
- Focus on outcomes and capabilities rather than just years of experience
- Make the list comprehensive but not overwhelming",
        preferred_qualifications: "
For the Preferred Qualifications section, use your strengths as GPT-4o to:
- Create a concise list of bonus skills and experiences
- Highlight qualifications that would help someone excel in the role
- Include both technical and soft skills that complement the required qualifications
- Make these attractive without being discouraging to candidates
- Keep the list reasonable in length and scope",
        benefits: "
For the Benefits & Perks section, use your strengths as GPT-4o to:
- Create an engaging list of employee benefits
- Highlight both tangible (compensation, insurance) and intangible (culture, growth) benefits
- Use compelling language that showcases your company's value proposition
- Structure benefits in a clear, scannable format
- Focus on what makes your company unique as an employer",
        company_blurb: "
For the Company Description section, use your strengths as GPT-4o to:
- Create an engaging and authentic company narrative
- Highlight what makes the company unique and appealing to candidates
- Balance professionalism with personality
- Articulate company values, mission, and culture in a compelling way
- Keep it concise but impactful, focusing on what matters most to potential candidates",
    },
};

static LLAMA_STYLE: PromptStyle = PromptStyle {
    generate_lead: "concise and effective",
    generate_note: "Focus on clarity and directness, as you're using LLaMA 3.3 70B for fast, efficient content generation.",
    enhance_goal: "more effective",
    enhance_note: "Focus on clarity and directness, as you're using LLaMA 3.3 70B",
    rewrite_goal: "improving clarity",
    rewrite_note: "Keep it straightforward and direct, as you're using LLaMA 3.3 70B",
    guidance: SectionGuidance {
        summary: "
You are LLaMA 3.3, known for your efficient, direct writing style. For this role summary:
- Get straight to the point with a clear, concise summary
- Use direct language that clearly communicates the role's purpose
- Focus on the most essential information without unnecessary elaboration
- Structure the content in a simple, accessible way
- Use active voice and straightforward sentences
- Keep paragraphs short and focused",
        responsibilities: "
For the Key Responsibilities section, use your strengths as LLaMA to:
- Create concise, direct bullet points for each responsibility
- Use clear, action-oriented language
- Focus on the most important duties without unnecessary detail
- Ensure each point is distinct and meaningful
- Keep the list concise but complete",
        required_qualifications: "
For the Required Qualifications section, use your strengths as LLaMA to:
- Create a concise, direct list of must-have qualifications
- Focus on the truly essential requirements
- Use clear, straightforward language
- Avoid unnecessary jargon or complexity
- Make the requirements specific and measurable where possible",
        preferred_qualifications: "
For the Preferred Qualifications section, use your strengths as LLaMA to:
- Create a focused list of bonus qualifications
- Keep the list short and prioritized
- Use direct language that clearly communicates their value
- Focus on qualifications that genuinely enhance performance
- Avoid making the list too extensive or intimidating",
        benefits: "
For the Benefits & Perks section, use your strengths as LLaMA to:
- Create a clear, direct list of employee benefits
- Focus on the most compelling and valuable benefits
- Use straightforward language without unnecessary elaboration
- Structure the list for easy scanning
- Highlight the most distinctive benefits first",
        company_blurb: "
For the Company Description section, use your strengths as LLaMA to:
- Create a concise, straightforward company description
- Focus on key facts about the company that candidates need to know
- Use clear, direct language that avoids unnecessary elaboration
- Highlight the most relevant aspects of the company culture and mission
- Maintain a professional but efficient tone throughout",
    },
};
