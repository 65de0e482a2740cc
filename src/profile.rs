//! Portfolio profile: the static content the site and the assistant share.
//!
//! DESIGN
//! ======
//! The built-in profile mirrors the published site. A deployment may replace
//! it wholesale with a YAML file (`PROFILE_PATH`); missing optional fields
//! default to empty rather than failing, since the assistant only ever
//! concatenates them into text.

use std::path::Path;

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("profile read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("profile parse failed: {0}")]
    Parse(#[from] serde_yaml::Error),
}

impl crate::error::ErrorCode for ProfileError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Read(_) => "E_PROFILE_READ",
            Self::Parse(_) => "E_PROFILE_PARSE",
        }
    }
}

// =============================================================================
// ICONS
// =============================================================================

/// Display capability for a skill icon. Keys outside the closed set map to
/// [`Icon::Code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    BrainCircuit,
    Layout,
    Workflow,
    Cpu,
    Server,
    Database,
    Cloud,
    Layers,
    Terminal,
    Code,
}

impl Icon {
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "BrainCircuit" => Self::BrainCircuit,
            "Layout" => Self::Layout,
            "Workflow" => Self::Workflow,
            "Cpu" => Self::Cpu,
            "Server" => Self::Server,
            "Database" => Self::Database,
            "Cloud" => Self::Cloud,
            "Layers" => Self::Layers,
            "Terminal" => Self::Terminal,
            _ => Self::Code,
        }
    }
}

// =============================================================================
// PROFILE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillCategory {
    Frontend,
    Backend,
    Tools,
    Design,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100.
    #[serde(default)]
    pub level: u8,
    /// Icon key as written in content; resolve with [`Icon::from_key`].
    #[serde(default)]
    pub icon: String,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub long_description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceKind {
    Degree,
    Certification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub id: u32,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ExperienceKind>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Name used in the assistant persona, e.g. `MNM.MINHAJ`.
    pub owner: String,
    /// Short first name used in the chat greeting.
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub contact: ContactInfo,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    /// Exact text of the first assistant turn. Generated from the name when
    /// absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<String>,
}

impl Profile {
    /// Load a profile from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] when the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ProfileError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    /// # Errors
    ///
    /// Returns [`ProfileError::Parse`] for malformed YAML.
    pub fn from_yaml_str(raw: &str) -> Result<Self, ProfileError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Greeting seeded as the first assistant turn of every chat.
    #[must_use]
    pub fn greeting(&self) -> String {
        if let Some(text) = self.greeting.as_deref().filter(|t| !t.trim().is_empty()) {
            return text.to_string();
        }
        let name = if self.short_name.is_empty() { &self.owner } else { &self.short_name };
        format!("Hi! I'm {name}'s assistant. Ask me anything specific about skills, projects, or background.")
    }
}

// =============================================================================
// PROJECT FILTER
// =============================================================================

/// Filter buttons shown above the project grid.
pub const PROJECT_CATEGORIES: [&str; 5] = ["All", "React", "Next.js", "AI", "MERN"];

/// Keep projects with any technology containing `tag`, case-insensitively.
/// `All` and an empty tag keep everything.
#[must_use]
pub fn filter_projects<'a>(projects: &'a [Project], tag: &str) -> Vec<&'a Project> {
    let tag = tag.trim().to_lowercase();
    if tag.is_empty() || tag == "all" {
        return projects.iter().collect();
    }
    projects
        .iter()
        .filter(|p| p.technologies.iter().any(|t| t.to_lowercase().contains(&tag)))
        .collect()
}

// =============================================================================
// BUILT-IN PROFILE
// =============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn skill(name: &str, level: u8, icon: &str, category: SkillCategory) -> Skill {
    Skill { name: name.into(), level, icon: icon.into(), category }
}

#[allow(clippy::too_many_lines)]
#[must_use]
pub fn builtin() -> Profile {
    use SkillCategory::{Backend, Design, Frontend, Tools};

    let projects = vec![
        Project {
            id: 1,
            title: "AI Trip Planner".into(),
            description: "AI-powered travel itinerary generator with 70% time reduction in planning.".into(),
            long_description: "Personalized trip planning using OpenAI GPT-4. Features real-time streaming responses and Google Maps integration.".into(),
            technologies: strings(&["Next.js 14", "OpenAI GPT-4", "Google Maps API", "Vercel"]),
            image: "./Ai Trip Planner.png".into(),
            live_url: "https://ai-trip-planner-web-app-pi.vercel.app/".into(),
            github_url: "https://github.com/MinhajLahith2002/ai-trip-planner-web-app".into(),
            features: strings(&["Streaming API", "Interactive Itinerary", "Cost Estimation"]),
        },
        Project {
            id: 2,
            title: "Quickblog".into(),
            description: "A modern, high-performance blogging platform with integrated AI features.".into(),
            long_description: "Features AI-assisted content generation, multi-category support, and a responsive minimalist design.".into(),
            technologies: strings(&["React", "Node.js", "MongoDB", "Tailwind CSS"]),
            image: "./Quick Blog.png".into(),
            live_url: "https://quick-blog-ruby.vercel.app/".into(),
            github_url: "https://github.com/MinhajLahith2002/QuickBlog".into(),
            features: strings(&["AI Writing Assistant", "SEO Optimized", "Markdown Support"]),
        },
        Project {
            id: 3,
            title: "QuickShow".into(),
            description: "Full-stack theatre booking platform with event-driven workflows.".into(),
            long_description: "Includes movie discovery via IMDb API, Clerk authentication, and secure Stripe payments.".into(),
            technologies: strings(&["MERN Stack", "Stripe", "Clerk", "Inngest"]),
            image: "./Quick Show.png".into(),
            live_url: "https://quickshow-hazel-seven.vercel.app/".into(),
            github_url: "https://github.com/MinhajLahith2002/QuickShow".into(),
            features: strings(&["Seat Selection", "Payment Integration", "Email Notifications"]),
        },
        Project {
            id: 4,
            title: "BeautySalon".into(),
            description: "Premium service landing page and booking system for modern salons.".into(),
            long_description: "A sophisticated dark-themed interface for service exploration and appointment booking.".into(),
            technologies: strings(&["React", "Tailwind CSS", "Framer Motion"]),
            image: "./Beauty Saloon.png".into(),
            live_url: "#".into(),
            github_url: "https://github.com/MinhajLahith2002/beauty-Saloon".into(),
            features: strings(&["Service Menu", "Online Booking", "Responsive Gallery"]),
        },
        Project {
            id: 5,
            title: "Tomato".into(),
            description: "Comprehensive food ordering application with real-time menu browsing.".into(),
            long_description: "A vibrant food delivery platform featuring categorized menus and an intuitive checkout flow.".into(),
            technologies: strings(&["React", "Context API", "CSS Modules"]),
            image: "./Restaurant.png".into(),
            live_url: "#".into(),
            github_url: "#".into(),
            features: strings(&["Cart Management", "Category Filtering", "Mobile-first Design"]),
        },
        Project {
            id: 6,
            title: "ReTech Exchange".into(),
            description: "Campus marketplace for secure student-to-student transactions.".into(),
            long_description: "Real-time chat enabled via Socket.io with optimized database queries for performance.".into(),
            technologies: strings(&["MERN", "Socket.io", "JWT", "Cloudinary"]),
            image: "./ReTechExchange.png".into(),
            live_url: "#".into(),
            github_url: "https://github.com/MinhajLahith2002/ReTechX".into(),
            features: strings(&["Real-time Chat", "Secure Auth", "Image Uploads"]),
        },
    ];

    let experience = vec![
        Experience {
            id: 1,
            role: "AI/ML Certification (Stage 2)".into(),
            company: "SLIIT".into(),
            period: "Jan 2026 (Expected)".into(),
            description: "Deep dive into supervised learning algorithms, predictive modeling, and agentic workflows. Focus on TensorFlow and advanced prompt engineering.".into(),
            technologies: strings(&["Python", "TensorFlow", "LangChain"]),
            kind: Some(ExperienceKind::Certification),
        },
        Experience {
            id: 2,
            role: "AI Engineering 101".into(),
            company: "Finxter Academy".into(),
            period: "Apr 2025".into(),
            description: "Professional certification focused on building autonomous AI agents and financial sentiment analysis systems.".into(),
            technologies: strings(&["NLP", "AI Agents", "Python"]),
            kind: Some(ExperienceKind::Certification),
        },
        Experience {
            id: 3,
            role: "AI/ML Certification (Stage 1)".into(),
            company: "SLIIT".into(),
            period: "2024".into(),
            description: "Foundation of Machine Learning, data preprocessing, and exploratory data analysis using Python and Scikit-learn.".into(),
            technologies: strings(&["Python", "Scikit-Learn", "Pandas"]),
            kind: Some(ExperienceKind::Certification),
        },
        Experience {
            id: 4,
            role: "BSc (Hons) Information Technology".into(),
            company: "SLIIT".into(),
            period: "2023 - 2025".into(),
            description: "Academic degree specializing in Software Engineering. Intensive study of modern architecture, database management, and cloud systems.".into(),
            technologies: strings(&["Java", "PHP", "Cloud Computing", "DSA"]),
            kind: Some(ExperienceKind::Degree),
        },
    ];

    Profile {
        owner: "MNM.MINHAJ".into(),
        short_name: "Minhaj".into(),
        specialization: "Generative AI, LLM Engineering, Agentic Workflows".into(),
        contact: ContactInfo { location: "Batticaloa, Sri Lanka".into(), email: "minhajse2023@gmail.com".into() },
        skills: vec![
            skill("GenAI & LLMs", 95, "BrainCircuit", Frontend),
            skill("Next.js / React", 92, "Layout", Frontend),
            skill("Agentic AI", 88, "Workflow", Backend),
            skill("Python (NumPy/Pandas)", 85, "Cpu", Backend),
            skill("Node.js / Express", 88, "Server", Backend),
            skill("MongoDB / SQL", 82, "Database", Backend),
            skill("Vercel / Clerk", 90, "Cloud", Tools),
            skill("Tailwind CSS", 92, "Layers", Design),
        ],
        projects,
        experience,
        social: vec![
            SocialLink { name: "GitHub".into(), url: "https://github.com/MinhajLahith2002".into() },
            SocialLink { name: "Linkedin".into(), url: "https://www.linkedin.com/in/mohamedminhaj2024".into() },
            SocialLink { name: "Fiverr".into(), url: "https://www.fiverr.com/sellers/mohamedminhaj24".into() },
            SocialLink { name: "Upwork".into(), url: "https://www.upwork.com/freelancers/~01f0f89c4c0a25acc3".into() },
        ],
        greeting: Some(
            "Hi! I'm Minhaj's assistant. Ask me anything specific about his skills, projects, or background.".into(),
        ),
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
