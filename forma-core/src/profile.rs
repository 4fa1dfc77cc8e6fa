//! User profile collected during onboarding.
//!
//! The profile is owned by an [`OnboardingFlow`] while the steps run and is
//! handed over to an [`AppContext`] once onboarding completes or is skipped.
//! Nothing else holds a copy, so every write goes through one of those two
//! owners.

use crate::config::SessionConfig;
use crate::models::WeightUnit;
use crate::session::Session;
use anyhow::{Result, bail};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct BirthDate {
    pub month: String,
    pub day: String,
    pub year: String,
}

impl BirthDate {
    pub fn is_filled(&self) -> bool {
        !self.month.trim().is_empty() && !self.day.trim().is_empty() && !self.year.trim().is_empty()
    }

    pub fn to_date(&self) -> Result<NaiveDate> {
        let year: i32 = self.year.trim().parse()?;
        let month: u32 = self.month.trim().parse()?;
        let day: u32 = self.day.trim().parse()?;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| anyhow::anyhow!("Invalid birth date {}-{}-{}", year, month, day))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct BodyWeight {
    pub value: String,
    pub unit: WeightUnit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct UserProfile {
    pub gender: Option<Gender>,
    pub birth_date: BirthDate,
    pub weight: BodyWeight,
    pub has_fitness_experience: Option<bool>,
    pub fitness_level: Option<FitnessLevel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum ProfileUpdate {
    Gender(Gender),
    BirthDate(BirthDate),
    Weight(BodyWeight),
    Experience(bool),
    FitnessLevel(FitnessLevel),
}

impl UserProfile {
    pub fn apply(&mut self, update: ProfileUpdate) {
        match update {
            ProfileUpdate::Gender(g) => self.gender = Some(g),
            ProfileUpdate::BirthDate(b) => self.birth_date = b,
            ProfileUpdate::Weight(w) => self.weight = w,
            ProfileUpdate::Experience(e) => self.has_fitness_experience = Some(e),
            ProfileUpdate::FitnessLevel(l) => self.fitness_level = Some(l),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum OnboardingStep {
    Gender,
    BirthDate,
    Weight,
    Experience,
    FitnessLevel,
}

impl OnboardingStep {
    pub const COUNT: usize = 5;

    pub fn number(self) -> usize {
        match self {
            OnboardingStep::Gender => 1,
            OnboardingStep::BirthDate => 2,
            OnboardingStep::Weight => 3,
            OnboardingStep::Experience => 4,
            OnboardingStep::FitnessLevel => 5,
        }
    }

    fn next(self) -> Option<Self> {
        match self {
            OnboardingStep::Gender => Some(OnboardingStep::BirthDate),
            OnboardingStep::BirthDate => Some(OnboardingStep::Weight),
            OnboardingStep::Weight => Some(OnboardingStep::Experience),
            OnboardingStep::Experience => Some(OnboardingStep::FitnessLevel),
            OnboardingStep::FitnessLevel => None,
        }
    }

    fn prev(self) -> Option<Self> {
        match self {
            OnboardingStep::Gender => None,
            OnboardingStep::BirthDate => Some(OnboardingStep::Gender),
            OnboardingStep::Weight => Some(OnboardingStep::BirthDate),
            OnboardingStep::Experience => Some(OnboardingStep::Weight),
            OnboardingStep::FitnessLevel => Some(OnboardingStep::Experience),
        }
    }
}

#[derive(Debug)]
pub enum Advance {
    Step(OnboardingStep),
    Completed(UserProfile),
}

#[derive(Debug)]
pub enum Retreat {
    Step(OnboardingStep),
    Exited(UserProfile),
}

#[derive(Debug)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    profile: UserProfile,
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self::resume(UserProfile::default(), OnboardingStep::Gender)
    }

    /// Pick up a partially filled profile at a given step.
    pub fn resume(profile: UserProfile, step: OnboardingStep) -> Self {
        OnboardingFlow { step, profile }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn update(&mut self, update: ProfileUpdate) {
        debug!("Onboarding step {}: {:?}", self.step.number(), update);
        self.profile.apply(update);
    }

    /// Switch the body weight between kg and lbs, keeping the typed value.
    pub fn toggle_weight_unit(&mut self) -> WeightUnit {
        self.profile.weight.unit = self.profile.weight.unit.toggle();
        self.profile.weight.unit
    }

    pub fn can_continue(&self) -> bool {
        match self.step {
            OnboardingStep::Gender => self.profile.gender.is_some(),
            OnboardingStep::BirthDate => self.profile.birth_date.is_filled(),
            OnboardingStep::Weight => !self.profile.weight.value.trim().is_empty(),
            OnboardingStep::Experience => self.profile.has_fitness_experience.is_some(),
            OnboardingStep::FitnessLevel => true,
        }
    }

    pub fn next(self) -> Result<(Option<Self>, Advance)> {
        if !self.can_continue() {
            bail!("Onboarding step {} is incomplete", self.step.number());
        }
        match self.step.next() {
            Some(step) => Ok((
                Some(OnboardingFlow {
                    step,
                    profile: self.profile,
                }),
                Advance::Step(step),
            )),
            None => {
                info!("Onboarding completed");
                Ok((None, Advance::Completed(self.profile)))
            }
        }
    }

    pub fn back(self) -> (Option<Self>, Retreat) {
        match self.step.prev() {
            Some(step) => (
                Some(OnboardingFlow {
                    step,
                    profile: self.profile,
                }),
                Retreat::Step(step),
            ),
            None => (None, Retreat::Exited(self.profile)),
        }
    }

    pub fn skip(self) -> UserProfile {
        info!("Onboarding skipped at step {}", self.step.number());
        self.profile
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything a screen needs that outlives a single workout. Sessions are
/// created from here so they share its config.
#[derive(Debug)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Object))]
pub struct AppContext {
    config: SessionConfig,
    profile: Mutex<UserProfile>,
}

impl AppContext {
    pub fn new(config: SessionConfig, profile: UserProfile) -> Self {
        AppContext {
            config,
            profile: Mutex::new(profile),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn profile(&self) -> UserProfile {
        self.profile.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn update_profile(&self, update: ProfileUpdate) {
        debug!("Profile update: {:?}", update);
        let mut profile = self.profile.lock().unwrap_or_else(|e| e.into_inner());
        profile.apply(update);
    }

    pub fn new_session(&self) -> Arc<Session> {
        debug!("New session with {:?}", self.config);
        Arc::new(Session::new(self.config.clone()))
    }
}
