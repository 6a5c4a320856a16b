//! Starter templates for new job descriptions.
//!
//! Static catalog data served to the editor's template gallery. Content is
//! plain text with bullet lines; the editor renders it as-is into the
//! section fields.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::ToneKind;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub job_description: StarterJob,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterJob {
    pub title: &'static str,
    pub seniority: &'static str,
    pub employment_type: &'static str,
    pub remote_option: &'static str,
    pub team_size: &'static str,
    pub reporting_to: &'static str,
    pub tools: &'static str,
    pub tone: ToneKind,
    pub sections: StarterSections,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarterSections {
    pub summary: &'static str,
    pub responsibilities: &'static str,
    pub required_qualifications: &'static str,
    pub preferred_qualifications: &'static str,
    pub benefits: &'static str,
    pub company_blurb: &'static str,
}

pub static TEMPLATES: [StarterTemplate; 3] = [
    StarterTemplate {
        id: "software-engineer",
        name: "Software Engineer",
        category: "Technology",
        description: "A standard template for software engineering roles focused on development skills.",
        job_description: StarterJob {
            title: "Software Engineer",
            seniority: "Mid-Level",
            employment_type: "Full-Time",
            remote_option: "Hybrid",
            team_size: "5-10 people",
            reporting_to: "Engineering Manager",
            tools: "JavaScript, React, Node.js, Git, AWS",
            tone: ToneKind::Professional,
            sections: StarterSections {
                summary: "We are seeking a talented Software Engineer to join our development team. In this role, you will design, develop, and implement software solutions that meet our business requirements. You will collaborate with cross-functional teams to deliver high-quality code that is scalable, maintainable, and efficient.",
                responsibilities: "\
• Design, develop, and maintain software applications using JavaScript, React, and Node.js
• Collaborate with product managers, designers, and other engineers to deliver features
• Write clean, testable code with appropriate documentation
• Participate in code reviews to ensure code quality and share knowledge
• Troubleshoot and debug applications to optimize performance
• Implement automated testing to ensure application reliability
• Stay current with emerging trends and technologies",
                required_qualifications: "\
• Bachelor's degree in Computer Science or equivalent practical experience
• 2-4 years of experience in software development
• Proficiency in JavaScript, including modern ES6+ features
• Experience with React.js and building responsive web applications
• Knowledge of Node.js backend development
• Familiarity with version control systems (Git)
• Strong problem-solving skills and attention to detail
• Good communication and collaboration abilities",
                preferred_qualifications: "\
• Experience with TypeScript and static typing
• Knowledge of cloud services (AWS, Google Cloud, or Azure)
• Familiarity with CI/CD pipelines and DevOps practices
• Understanding of database technologies (SQL and NoSQL)
• Experience with agile development methodologies
• Prior work with microservice architectures
• Open source contributions",
                benefits: "\
• Competitive salary and performance bonuses
• Comprehensive health, dental, and vision insurance
• 401(k) matching program
• Flexible work arrangements and remote options
• Professional development budget
• Regular team-building events
• Casual work environment with modern office amenities
• Paid time off and company holidays",
                company_blurb: "Our company builds innovative software solutions that help businesses streamline their operations and improve customer experiences. We foster a collaborative culture where creativity, continuous learning, and work-life balance are valued. Join our team to work on challenging projects in a supportive environment where your ideas matter.",
            },
        },
    },
    StarterTemplate {
        id: "product-manager",
        name: "Product Manager",
        category: "Technology",
        description: "A comprehensive template for product management positions focused on strategy and execution.",
        job_description: StarterJob {
            title: "Product Manager",
            seniority: "Mid-Level",
            employment_type: "Full-Time",
            remote_option: "Hybrid",
            team_size: "3-5 people",
            reporting_to: "Director of Product",
            tools: "Jira, Figma, Google Analytics, Amplitude, SQL",
            tone: ToneKind::Professional,
            sections: StarterSections {
                summary: "We are looking for a skilled Product Manager to drive the strategy and execution of our digital products. In this role, you will work at the intersection of user needs, business goals, and technology to define product vision and roadmap. You will lead cross-functional teams to deliver exceptional products that solve real customer problems.",
                responsibilities: "\
• Own the product roadmap and strategy for assigned products or features
• Conduct user research and competitive analysis to identify market opportunities
• Define product requirements and create detailed specifications
• Work closely with engineering, design, and marketing teams to deliver successful products
• Prioritize features and enhancements based on business value and user impact
• Track and analyze key metrics to measure product performance
• Communicate product plans, benefits, and results to various stakeholders
• Manage the entire product lifecycle from conception to launch and post-release refinement",
                required_qualifications: "\
• Bachelor's degree in Business, Computer Science, or related field
• 3+ years of experience in product management
• Strong analytical and problem-solving skills
• Excellent communication and presentation abilities
• Experience with agile development methodologies
• Ability to translate business requirements into product specifications
• Data-driven decision-making approach
• Basic understanding of UX design principles",
                preferred_qualifications: "\
• MBA or other advanced degree
• Experience with analytics tools (Google Analytics, Amplitude, Mixpanel)
• Knowledge of SQL for data analysis
• Background in the same industry as our product
• Technical background or experience working closely with development teams
• Previous experience launching successful products
• Certification in product management or agile methodologies",
                benefits: "\
• Competitive salary and bonus structure based on product performance
• Comprehensive health benefits package
• Stock options and equity grants
• Flexible work arrangements
• Professional development opportunities
• Paid parental leave
• Education reimbursement program
• Regular team events and activities",
                company_blurb: "Our company creates innovative digital solutions that transform how businesses engage with their customers. We believe in a collaborative approach to product development where every team member's input is valued. Our culture emphasizes continuous learning, data-driven decision making, and maintaining a healthy work-life balance. Join us to build products that make a difference in people's lives.",
            },
        },
    },
    StarterTemplate {
        id: "marketing-manager",
        name: "Marketing Manager",
        category: "Marketing",
        description: "A template for marketing management roles with a focus on digital campaigns and analytics.",
        job_description: StarterJob {
            title: "Marketing Manager",
            seniority: "Mid-Level",
            employment_type: "Full-Time",
            remote_option: "Hybrid",
            team_size: "3-5 people",
            reporting_to: "Director of Marketing",
            tools: "Google Analytics, HubSpot, Mailchimp, Adobe Creative Suite, Social Media Platforms",
            tone: ToneKind::Professional,
            sections: StarterSections {
                summary: "We are seeking a creative and data-driven Marketing Manager to develop and execute marketing strategies that drive brand awareness, customer acquisition, and business growth. The ideal candidate will have experience managing multi-channel campaigns and a strong understanding of digital marketing techniques.",
                responsibilities: "\
• Develop comprehensive marketing strategies aligned with business objectives
• Plan and execute digital marketing campaigns across multiple channels
• Manage the marketing budget and optimize spending for maximum ROI
• Create and curate engaging content for various platforms
• Analyze campaign performance and customer data to inform marketing decisions
• Collaborate with the design team to create compelling marketing materials
• Maintain brand consistency across all marketing initiatives
• Stay current on marketing trends and best practices",
                required_qualifications: "\
• Bachelor's degree in Marketing, Business, or related field
• 3+ years of experience in marketing, with a focus on digital channels
• Experience managing social media campaigns and content calendars
• Proficiency with marketing analytics tools and data analysis
• Strong project management and organizational skills
• Excellent written and verbal communication abilities
• Experience with email marketing platforms and CRM systems",
                preferred_qualifications: "\
• MBA or advanced degree in Marketing
• Experience with paid advertising platforms (Google Ads, Facebook Ads)
• Knowledge of SEO/SEM and content marketing strategies
• Experience with marketing automation tools
• Understanding of customer journey mapping and funnel optimization
• Background in our industry or market
• Graphic design skills and experience with Adobe Creative Suite",
                benefits: "\
• Competitive salary and performance-based bonuses
• Comprehensive health, dental, and vision insurance
• 401(k) matching program
• Flexible work arrangements
• Professional development budget
• Marketing conference and event attendance
• Latest technology and tools for marketing success
• Collaborative and creative work environment",
                company_blurb: "Our company provides innovative solutions that help businesses thrive in today's competitive marketplace. We value creativity, data-driven decision making, and a collaborative approach to marketing. Our team is passionate about creating meaningful connections with customers and driving measurable results. Join us to grow your marketing career in an environment that fosters professional development and creative expression.",
            },
        },
    },
];

pub fn template_by_id(id: &str) -> Option<&'static StarterTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

#[derive(Debug, Serialize)]
pub struct TemplateCatalog {
    pub templates: &'static [StarterTemplate],
}

/// GET /api/v1/templates
pub async fn handle_list_templates(State(_state): State<AppState>) -> Json<TemplateCatalog> {
    Json(TemplateCatalog {
        templates: &TEMPLATES,
    })
}

/// GET /api/v1/templates/:id
pub async fn handle_get_template(
    State(_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<&'static StarterTemplate>, AppError> {
    template_by_id(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No template named '{id}'")))
}
