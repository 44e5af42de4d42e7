//! User profile model and demographic enums.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Male" | "male" => Some(Gender::Male),
            "Female" | "female" => Some(Gender::Female),
            "Other" | "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeStage {
    Child,
    Teenager,
    Adult,
    Senior,
}

impl LifeStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifeStage::Child => "Child",
            LifeStage::Teenager => "Teenager",
            LifeStage::Adult => "Adult",
            LifeStage::Senior => "Senior",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Child" | "child" => Some(LifeStage::Child),
            "Teenager" | "teenager" => Some(LifeStage::Teenager),
            "Adult" | "adult" => Some(LifeStage::Adult),
            "Senior" | "senior" => Some(LifeStage::Senior),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            LifeStage::Child => "Under 12 years",
            LifeStage::Teenager => "12-18 years",
            LifeStage::Adult => "18-65 years",
            LifeStage::Senior => "Over 65 years",
        }
    }
}

/// Persistent user profile.
///
/// Created on signup, updated on profile edit, never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub gender: Option<Gender>,
    pub life_stage: Option<LifeStage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    // Preferences
    pub notifications_enabled: bool,
    pub reminder_time: Option<NaiveTime>,
    pub language: String,
}

impl UserProfile {
    pub fn new(user_name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_name: user_name.into(),
            email: email.into(),
            age: None,
            weight: None,
            gender: None,
            life_stage: None,
            created_at: now,
            updated_at: now,
            notifications_enabled: true,
            reminder_time: None,
            language: "English".to_string(),
        }
    }
}
