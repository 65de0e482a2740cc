//! Knowledge context: the fixed system instruction for the assistant.
//!
//! Built once per session from the profile and never regenerated. Pure and
//! deterministic: identical profiles produce byte-identical instructions.

use std::fmt::Write;

use crate::profile::Profile;

/// Behavioral directives, in order: conciseness, answer scope, emphasis
/// markup, tone, no repetition.
const DIRECTIVES: [&str; 5] = [
    "BE EXTREMELY CONCISE. Never provide a full biography unless the user specifically asks for a \"summary\" or who the portfolio owner is.",
    "ANSWER ONLY THE QUESTION ASKED. If asked about skills, only list skills. If asked about a project, only talk about that project.",
    "FORMATTING: Use bold text (**like this**) for key terms. Use bullet points for lists.",
    "TONE: Professional, efficient, and direct.",
    "REPETITION: Do not repeat the same introductory phrases.",
];

#[must_use]
pub fn build_context(profile: &Profile) -> String {
    let mut prompt = format!("You are the AI Portfolio Assistant for {}.\n\nSTRICT OPERATIONAL GUIDELINES:\n", profile.owner);
    for (i, directive) in DIRECTIVES.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {directive}", i + 1);
    }

    let skills = profile
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let projects = profile
        .projects
        .iter()
        .map(|p| p.title.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    let experience = profile
        .experience
        .iter()
        .map(|e| format!("{} at {}", e.role, e.company))
        .collect::<Vec<_>>()
        .join("; ");

    prompt.push_str("\nCONTEXT DATA:\n");
    let _ = writeln!(prompt, "- Primary Skills: {skills}.");
    let _ = writeln!(prompt, "- Specialization: {}.", profile.specialization);
    let _ = writeln!(prompt, "- Top Projects: {projects}.");
    let _ = writeln!(prompt, "- Experience/Education: {experience}.");
    let _ = writeln!(prompt, "- Location: {}.", profile.contact.location);
    let _ = writeln!(prompt, "- Contact: {}.", profile.contact.email);
    prompt
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
