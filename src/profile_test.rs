use super::*;

fn titles(projects: &[&Project]) -> Vec<String> {
    projects.iter().map(|p| p.title.clone()).collect()
}

// =============================================================================
// builtin
// =============================================================================

#[test]
fn builtin_profile_has_site_content() {
    let profile = builtin();
    assert_eq!(profile.skills.len(), 8);
    assert_eq!(profile.projects.len(), 6);
    assert_eq!(profile.experience.len(), 4);
    assert_eq!(profile.contact.location, "Batticaloa, Sri Lanka");
    assert_eq!(profile.contact.email, "minhajse2023@gmail.com");
    assert!(profile.skills.iter().all(|s| s.level <= 100));
}

#[test]
fn builtin_greeting_matches_site_text() {
    assert_eq!(
        builtin().greeting(),
        "Hi! I'm Minhaj's assistant. Ask me anything specific about his skills, projects, or background."
    );
}

#[test]
fn greeting_without_override_uses_short_name() {
    let mut profile = builtin();
    profile.greeting = None;
    assert_eq!(
        profile.greeting(),
        "Hi! I'm Minhaj's assistant. Ask me anything specific about skills, projects, or background."
    );
}

#[test]
fn blank_greeting_override_is_ignored() {
    let mut profile = builtin();
    profile.greeting = Some("  ".into());
    assert!(profile.greeting().starts_with("Hi! I'm Minhaj's assistant."));
}

#[test]
fn greeting_falls_back_to_owner() {
    let mut profile = builtin();
    profile.greeting = None;
    profile.short_name.clear();
    assert!(profile.greeting().contains("MNM.MINHAJ's assistant"));
}

// =============================================================================
// Icon::from_key
// =============================================================================

#[test]
fn icon_keys_resolve() {
    assert_eq!(Icon::from_key("BrainCircuit"), Icon::BrainCircuit);
    assert_eq!(Icon::from_key("Database"), Icon::Database);
    assert_eq!(Icon::from_key("Layers"), Icon::Layers);
}

#[test]
fn unknown_icon_key_defaults_to_code() {
    assert_eq!(Icon::from_key("Rocket"), Icon::Code);
    assert_eq!(Icon::from_key(""), Icon::Code);
    // Keys are case-sensitive, as written in content.
    assert_eq!(Icon::from_key("database"), Icon::Code);
}

#[test]
fn builtin_icons_are_all_known() {
    for skill in builtin().skills {
        assert_ne!(Icon::from_key(&skill.icon), Icon::Code, "{} has an unmapped icon", skill.name);
    }
}

// =============================================================================
// filter_projects
// =============================================================================

#[test]
fn filter_all_keeps_everything() {
    let profile = builtin();
    assert_eq!(filter_projects(&profile.projects, "All").len(), 6);
    assert_eq!(filter_projects(&profile.projects, "all").len(), 6);
    assert_eq!(filter_projects(&profile.projects, "").len(), 6);
}

#[test]
fn filter_react_matches_substring_case_insensitive() {
    let profile = builtin();
    let found = titles(&filter_projects(&profile.projects, "react"));
    assert_eq!(found, vec!["Quickblog", "BeautySalon", "Tomato"]);
}

#[test]
fn filter_mern_matches_stack_variants() {
    let profile = builtin();
    let found = titles(&filter_projects(&profile.projects, "MERN"));
    assert_eq!(found, vec!["QuickShow", "ReTech Exchange"]);
}

#[test]
fn filter_ai_matches_inside_words() {
    let profile = builtin();
    let found = titles(&filter_projects(&profile.projects, "AI"));
    // "OpenAI" and "Tailwind CSS" both contain "ai".
    assert_eq!(found, vec!["AI Trip Planner", "Quickblog", "BeautySalon"]);
}

#[test]
fn filter_unknown_tag_is_empty() {
    let profile = builtin();
    assert!(filter_projects(&profile.projects, "Haskell").is_empty());
}

// =============================================================================
// YAML
// =============================================================================

#[test]
fn yaml_profile_defaults_missing_fields() {
    let yaml = r#"
owner: Jane Doe
skills:
  - name: Rust
    category: Backend
projects:
  - id: 1
    title: Folio
experience:
  - id: 1
    company: Acme
    type: Degree
"#;
    let profile = Profile::from_yaml_str(yaml).unwrap();
    assert_eq!(profile.owner, "Jane Doe");
    assert_eq!(profile.skills[0].level, 0);
    assert!(profile.projects[0].technologies.is_empty());
    assert_eq!(profile.experience[0].role, "");
    assert_eq!(profile.experience[0].kind, Some(ExperienceKind::Degree));
    assert_eq!(profile.contact, ContactInfo::default());
    assert!(profile.greeting.is_none());
}

#[test]
fn yaml_greeting_override_is_used() {
    let yaml = "owner: Jane Doe\ngreeting: Hello from Jane's site.\n";
    let profile = Profile::from_yaml_str(yaml).unwrap();
    assert_eq!(profile.greeting(), "Hello from Jane's site.");
}

#[test]
fn yaml_parse_error_has_code() {
    use crate::error::ErrorCode;
    let err = Profile::from_yaml_str("owner: [unclosed").unwrap_err();
    assert_eq!(err.error_code(), "E_PROFILE_PARSE");
}

#[test]
fn missing_file_is_read_error() {
    let err = Profile::from_yaml_file(Path::new("/nonexistent/profile.yaml")).unwrap_err();
    assert!(matches!(err, ProfileError::Read(_)));
}
