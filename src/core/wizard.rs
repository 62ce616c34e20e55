use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::CatalogConfig;
use crate::domain::model::{
    Advice, CompetenceLevel, ContactPreference, Module, Selection,
};
use crate::domain::ports::{Slot, StateStore};
use crate::utils::error::{KeuzeError, Result};

/// The questionnaire steps, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Identity,
    Background,
    Interests,
    Competences,
    Contact,
    Result,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Identity,
        Step::Background,
        Step::Interests,
        Step::Competences,
        Step::Contact,
        Step::Result,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Identity => "identity",
            Step::Background => "background",
            Step::Interests => "interests",
            Step::Competences => "competences",
            Step::Contact => "contact",
            Step::Result => "result",
        }
    }

    pub fn from_name(name: &str) -> Option<Step> {
        Step::ALL.iter().copied().find(|s| s.name() == name)
    }

    fn position(&self) -> usize {
        Step::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    fn next(&self) -> Option<Step> {
        Step::ALL.get(self.position() + 1).copied()
    }

    fn back(&self) -> Option<Step> {
        self.position().checked_sub(1).map(|i| Step::ALL[i])
    }
}

/// Selection fields that step rules may mark as required.
pub const SELECTION_FIELDS: [&str; 7] = [
    "name",
    "email",
    "background",
    "role",
    "interests",
    "competences",
    "wants_contact",
];

fn field_present(selection: &Selection, field: &str) -> Option<bool> {
    let present = match field {
        "name" => !selection.name.trim().is_empty(),
        "email" => !selection.email.trim().is_empty(),
        "background" => !selection.background.trim().is_empty(),
        "role" => !selection.role.trim().is_empty(),
        "interests" => !selection.interests.is_empty(),
        "competences" => !selection.competences.is_empty(),
        "wants_contact" => selection.wants_contact.is_some(),
        _ => return None,
    };
    Some(present)
}

/// The persisted in-progress snapshot: current step plus everything the user
/// has answered so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    pub step: Step,
    pub selection: Selection,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self {
            step: Step::Identity,
            selection: Selection::default(),
        }
    }
}

/// Modules worth recommending: relevant to at least one chosen track and not
/// already mastered. Catalog order is preserved.
pub fn recommend_modules<'a>(config: &'a CatalogConfig, selection: &Selection) -> Vec<&'a Module> {
    config
        .modules()
        .iter()
        .filter(|module| {
            module
                .tracks
                .iter()
                .any(|code| selection.interests.contains(code))
                && !matches!(
                    selection.competences.get(&module.key),
                    Some(CompetenceLevel::Skilled)
                )
        })
        .collect()
}

/// Reads the advice history from its slot. A missing or corrupted slot yields
/// an empty list so the wizard always stays usable.
pub fn load_history<S: StateStore>(store: &S) -> Vec<Advice> {
    match store.load(Slot::History) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(history) => history,
            Err(e) => {
                tracing::warn!("history slot is corrupted, starting empty: {}", e);
                Vec::new()
            }
        },
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!("could not read history slot: {}", e);
            Vec::new()
        }
    }
}

/// Drives one questionnaire session over a state store.
///
/// Every mutation is persisted best-effort to the session slot; storage
/// failures are logged and swallowed so the wizard never dies on a full or
/// unavailable store.
pub struct WizardEngine<S: StateStore> {
    store: S,
    config: CatalogConfig,
    session: WizardSession,
}

impl<S: StateStore> WizardEngine<S> {
    /// Restores a saved session from the store, or starts a fresh one when
    /// the slot is missing or unreadable.
    pub fn resume_or_new(store: S, config: CatalogConfig) -> Self {
        let session = match store.load(Slot::Session) {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!("session slot is corrupted, starting over: {}", e);
                    WizardSession::default()
                }
            },
            Ok(None) => WizardSession::default(),
            Err(e) => {
                tracing::warn!("could not read session slot: {}", e);
                WizardSession::default()
            }
        };

        Self {
            store,
            config,
            session,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn step(&self) -> Step {
        self.session.step
    }

    pub fn selection(&self) -> &Selection {
        &self.session.selection
    }

    pub fn set_name(&mut self, name: &str) {
        self.session.selection.name = name.trim().to_string();
        self.autosave();
    }

    pub fn set_email(&mut self, email: &str) {
        self.session.selection.email = email.trim().to_string();
        self.autosave();
    }

    pub fn set_background(&mut self, background: &str) {
        self.session.selection.background = background.trim().to_string();
        self.autosave();
    }

    pub fn set_role(&mut self, role: &str) {
        self.session.selection.role = role.trim().to_string();
        self.autosave();
    }

    /// Adds the track on first toggle, removes it on the second. Unknown
    /// codes are ignored.
    pub fn toggle_interest(&mut self, code: &str) {
        if self.config.track_label(code).is_none() {
            tracing::debug!("ignoring unknown track code {:?}", code);
            return;
        }
        let interests = &mut self.session.selection.interests;
        match interests.iter().position(|c| c == code) {
            Some(index) => {
                interests.remove(index);
            }
            None => interests.push(code.to_string()),
        }
        self.autosave();
    }

    pub fn set_competence(&mut self, module_key: &str, level: CompetenceLevel) {
        if self.config.module(module_key).is_none() {
            tracing::debug!("ignoring unknown module key {:?}", module_key);
            return;
        }
        self.session
            .selection
            .competences
            .insert(module_key.to_string(), level);
        self.autosave();
    }

    pub fn set_contact_preference(&mut self, preference: ContactPreference) {
        self.session.selection.wants_contact = Some(preference);
        self.autosave();
    }

    /// Advances to the next step, provided every field the configuration
    /// requires for the current step has been filled in.
    pub fn try_next(&mut self) -> Result<Step> {
        let step = self.session.step;
        for field in self.config.required_fields(step.name()) {
            if field_present(&self.session.selection, field) != Some(true) {
                return Err(KeuzeError::StepIncompleteError {
                    step: step.name().to_string(),
                    field: field.clone(),
                });
            }
        }

        if let Some(next) = step.next() {
            self.session.step = next;
            self.autosave();
        }
        Ok(self.session.step)
    }

    /// Steps backward; answers already given are kept. At the first step this
    /// is a no-op.
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.session.step.back() {
            self.session.step = previous;
            self.autosave();
        }
        self.session.step
    }

    /// Freezes the current selection into an advice record, appends it to the
    /// history slot and moves the session to the result step.
    pub fn finalize(&mut self) -> Advice {
        let recommended = recommend_modules(&self.config, &self.session.selection)
            .into_iter()
            .map(|module| module.key.clone())
            .collect();

        let advice = Advice {
            created_at: Utc::now(),
            selection: self.session.selection.clone(),
            recommended,
        };

        self.append_history(&advice);
        self.session.step = Step::Result;
        self.autosave();
        advice
    }

    pub fn history(&self) -> Vec<Advice> {
        load_history(&self.store)
    }

    /// Discards the saved session and starts over at the first step. History
    /// is untouched.
    pub fn reset(&mut self) {
        self.session = WizardSession::default();
        self.autosave();
    }

    fn append_history(&self, advice: &Advice) {
        let mut history = load_history(&self.store);
        history.push(advice.clone());
        match serde_json::to_vec(&history) {
            Ok(bytes) => {
                if let Err(e) = self.store.save(Slot::History, &bytes) {
                    tracing::warn!("could not persist advice history: {}", e);
                }
            }
            Err(e) => tracing::warn!("could not serialize advice history: {}", e),
        }
    }

    fn autosave(&self) {
        match serde_json::to_vec(&self.session) {
            Ok(bytes) => {
                if let Err(e) = self.store.save(Slot::Session, &bytes) {
                    tracing::warn!("could not persist session state: {}", e);
                }
            }
            Err(e) => tracing::warn!("could not serialize session state: {}", e),
        }
    }
}
