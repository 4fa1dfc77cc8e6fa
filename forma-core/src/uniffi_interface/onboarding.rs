use crate::config::SessionConfig;
use crate::models::WeightUnit;
use crate::profile::{
    Advance, AppContext, OnboardingFlow, OnboardingStep, ProfileUpdate, Retreat, UserProfile,
};
use crate::session::Session;
use crate::uniffi_interface::errors::FormaError;
use log::*;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, uniffi::Enum)]
pub enum OnboardingProgress {
    Step { step: OnboardingStep },
    Completed { profile: UserProfile },
    Exited { profile: UserProfile },
}

/// Onboarding screens share one of these. Once it completes, exits or is
/// skipped, the profile has been handed out and every call fails.
#[derive(Debug, uniffi::Object)]
pub struct Onboarding {
    flow: Mutex<Option<OnboardingFlow>>,
}

impl Onboarding {
    fn lock(&self) -> MutexGuard<'_, Option<OnboardingFlow>> {
        self.flow.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn finished() -> FormaError {
    FormaError::from("Onboarding already finished")
}

#[uniffi::export]
impl Onboarding {
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(Onboarding {
            flow: Mutex::new(Some(OnboardingFlow::new())),
        })
    }

    pub fn step(&self) -> Option<OnboardingStep> {
        self.lock().as_ref().map(|f| f.step())
    }

    pub fn step_number(&self) -> Option<u32> {
        self.lock().as_ref().map(|f| f.step().number() as u32)
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.lock().as_ref().map(|f| f.profile().clone())
    }

    pub fn update(&self, update: ProfileUpdate) -> Result<(), FormaError> {
        let mut flow = self.lock();
        flow.as_mut().ok_or_else(finished)?.update(update);
        Ok(())
    }

    pub fn toggle_weight_unit(&self) -> Result<WeightUnit, FormaError> {
        let mut flow = self.lock();
        Ok(flow.as_mut().ok_or_else(finished)?.toggle_weight_unit())
    }

    pub fn can_continue(&self) -> bool {
        self.lock().as_ref().is_some_and(|f| f.can_continue())
    }

    pub fn next(&self) -> Result<OnboardingProgress, FormaError> {
        let mut slot = self.lock();
        let flow = slot.as_ref().ok_or_else(finished)?;
        if !flow.can_continue() {
            return Err(FormaError::from(format!(
                "Onboarding step {} is incomplete",
                flow.step().number()
            )));
        }
        let flow = slot.take().ok_or_else(finished)?;
        let (rest, advance) = flow.next()?;
        *slot = rest;
        Ok(match advance {
            Advance::Step(step) => OnboardingProgress::Step { step },
            Advance::Completed(profile) => OnboardingProgress::Completed { profile },
        })
    }

    pub fn back(&self) -> Result<OnboardingProgress, FormaError> {
        let mut slot = self.lock();
        let flow = slot.take().ok_or_else(finished)?;
        let (rest, retreat) = flow.back();
        *slot = rest;
        Ok(match retreat {
            Retreat::Step(step) => OnboardingProgress::Step { step },
            Retreat::Exited(profile) => OnboardingProgress::Exited { profile },
        })
    }

    pub fn skip(&self) -> Result<UserProfile, FormaError> {
        let flow = self.lock().take().ok_or_else(finished)?;
        Ok(flow.skip())
    }
}

/// Context for the rest of the app, built from the environment config and
/// the profile onboarding produced.
#[uniffi::export]
pub fn create_app_context(profile: UserProfile) -> Result<Arc<AppContext>, FormaError> {
    let config = SessionConfig::from_env()?;
    debug!("Creating app context with {:?}", config);
    Ok(Arc::new(AppContext::new(config, profile)))
}

#[uniffi::export]
impl AppContext {
    pub fn current_profile(&self) -> UserProfile {
        self.profile()
    }

    pub fn apply_profile_update(&self, update: ProfileUpdate) {
        self.update_profile(update);
    }

    pub fn create_session(&self) -> Arc<Session> {
        self.new_session()
    }

    pub fn default_workout_name(&self) -> String {
        self.config().default_workout_name.clone()
    }
}
