//! Portfolio content routes.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::profile::{Experience, Icon, PROJECT_CATEGORIES, Profile, Project, Skill, SocialLink, filter_projects};
use crate::state::AppState;

/// Skill with its icon key resolved to a known icon.
#[derive(Debug, Serialize)]
pub struct SkillView<'a> {
    #[serde(flatten)]
    pub skill: &'a Skill,
    pub icon_kind: Icon,
}

#[derive(Debug, Serialize)]
pub struct ProfileView<'a> {
    pub owner: &'a str,
    pub specialization: &'a str,
    pub location: &'a str,
    pub email: &'a str,
    pub skills: Vec<SkillView<'a>>,
    pub projects: &'a [Project],
    pub experience: &'a [Experience],
    pub social: &'a [SocialLink],
}

impl<'a> From<&'a Profile> for ProfileView<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            owner: &profile.owner,
            specialization: &profile.specialization,
            location: &profile.contact.location,
            email: &profile.contact.email,
            skills: profile
                .skills
                .iter()
                .map(|skill| SkillView { skill, icon_kind: Icon::from_key(&skill.icon) })
                .collect(),
            projects: &profile.projects,
            experience: &profile.experience,
            social: &profile.social,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectsView {
    pub categories: &'static [&'static str],
    pub tag: String,
    pub projects: Vec<Project>,
}

/// `GET /api/profile`
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<serde_json::Value>, StatusCode> {
    // Serialize while the borrow of the shared profile is alive.
    let view = serde_json::to_value(ProfileView::from(state.profile.as_ref())).map_err(|e| {
        tracing::error!(error = %e, "profile: serialization failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(view))
}

/// `GET /api/projects?tag=`
pub async fn list_projects(State(state): State<AppState>, Query(query): Query<ProjectsQuery>) -> Json<ProjectsView> {
    let tag = query.tag.unwrap_or_else(|| "All".into());
    let projects = filter_projects(&state.profile.projects, &tag)
        .into_iter()
        .cloned()
        .collect();
    Json(ProjectsView { categories: &PROJECT_CATEGORIES, tag, projects })
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
