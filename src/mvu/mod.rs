// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring form state, messages, and commands.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::logic::evaluator::evaluate_field;
use crate::logic::submission::{self, SubmitRequest, Transport};
use crate::models::category::Category;
use crate::models::fields::{
    CATEGORY_FIELD, FieldInput, FormValues, PHONE_FIELD, SCREENSHOT_FIELD, TERMS_FIELD,
    normalize_phone_input,
};
use crate::models::rules::RuleRegistry;
use crate::ui::components::fields::FieldMsg;
use crate::ui::components::toasts::{self, Toast, ToastMsg, ToastsModel};
use crate::ui::components::upload::{
    self, UploadCommand, UploadEvent, UploadModel, UploadMsg,
};

const INVALID_FORM_TOAST: &str = "Please fix the errors above";
const SUBMIT_FAILED_TOAST: &str = "Registration failed. Please try again.";
const SUBMIT_OK_TOAST: &str =
    "Registration successful! You will receive a confirmation email from sSTREAK shortly.";

/// Inline display state of one field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FieldStatus {
    #[default]
    Neutral,
    Error(String),
    Valid,
}

/// Top-level application state.
#[derive(Default)]
pub struct AppModel {
    /// Everything typed or selected, except the upload.
    pub values: FormValues,
    /// Active validation rules for the selected category.
    pub registry: RuleRegistry,
    /// Error/success marks keyed by field name; absent means neutral.
    pub statuses: BTreeMap<String, FieldStatus>,
    /// Screenshot upload state.
    pub upload: UploadModel,
    /// Visible notifications.
    pub toasts: ToastsModel,
    /// A submission is in flight; the submit button is disabled.
    pub submitting: bool,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn status(&self, field: &str) -> &FieldStatus {
        const NEUTRAL: &FieldStatus = &FieldStatus::Neutral;
        self.statuses.get(field).unwrap_or(NEUTRAL)
    }

    /// Category parsed from the current picker value.
    pub fn category(&self) -> Option<Category> {
        Category::parse(self.values.get(CATEGORY_FIELD))
    }

    fn input<'a>(&'a self, field: &'a str) -> FieldInput<'a> {
        match field {
            TERMS_FIELD => FieldInput::Checkbox(self.values.terms),
            SCREENSHOT_FIELD => FieldInput::File(self.upload.attachment()),
            _ => FieldInput::Text(self.values.get(field)),
        }
    }
}

/// Application messages routed through the update function.
pub enum Msg {
    Field(FieldMsg),
    CategorySelected(Option<Category>),
    TermsToggled(bool),
    Upload(UploadMsg),
    PreviewDecoded {
        path: PathBuf,
        image: egui::ColorImage,
        data_url: String,
    },
    SubmitRequested,
    SubmitCompleted(Result<(), String>),
    ResetForm,
    Toast(ToastMsg),
}

/// Commands represent side-effects executed off the UI thread.
pub enum Command {
    PickFile,
    InspectFile { path: PathBuf },
    ReadPreview { path: PathBuf, mime: String },
    Submit(SubmitRequest),
    /// Reset after the post-submit pause; armed on a [`ResetTimer`], not a worker.
    ScheduleReset,
}

/// Collaborators injected into command execution.
#[derive(Clone)]
pub struct Services {
    pub transport: Arc<dyn Transport>,
}

/// One-shot timer for the pause between a successful submission and the reset.
#[derive(Default)]
pub struct ResetTimer {
    fires: Option<Receiver<Instant>>,
}

impl ResetTimer {
    /// Start (or restart) the countdown.
    pub fn arm(&mut self, delay: Duration) {
        self.fires = Some(crossbeam_channel::after(delay));
    }

    pub fn is_armed(&self) -> bool {
        self.fires.is_some()
    }

    /// `true` exactly once, on the first poll after the delay has elapsed.
    pub fn poll(&mut self) -> bool {
        let fired = self.fires.as_ref().is_some_and(|rx| rx.try_recv().is_ok());
        if fired {
            self.fires = None;
        }
        fired
    }
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Field(FieldMsg::Edited { name, value }) => {
            let value = if name == PHONE_FIELD {
                normalize_phone_input(&value)
            } else {
                value
            };
            model.values.set(&name, value);
            clear_error(model, &name);
        }
        Msg::Field(FieldMsg::Blurred(name)) => {
            validate_field(model, &name);
        }
        Msg::CategorySelected(category) => {
            let raw = category.map(Category::as_str).unwrap_or_default();
            model.values.set(CATEGORY_FIELD, raw.to_string());
            apply_category(model);
            validate_field(model, CATEGORY_FIELD);
        }
        Msg::TermsToggled(checked) => {
            model.values.terms = checked;
            validate_field(model, TERMS_FIELD);
        }
        Msg::Upload(m) => {
            let mut upload_cmds = Vec::new();
            if let Some(event) = upload::update(&mut model.upload, m, &mut upload_cmds) {
                match event {
                    UploadEvent::AttachmentChanged => refresh_screenshot_status(model),
                    UploadEvent::Failed(message) => {
                        model
                            .statuses
                            .insert(SCREENSHOT_FIELD.to_string(), FieldStatus::Error(message));
                    }
                }
            }
            for c in upload_cmds {
                match c {
                    UploadCommand::PickFile => cmds.push(Command::PickFile),
                    UploadCommand::InspectFile { path } => {
                        cmds.push(Command::InspectFile { path })
                    }
                    UploadCommand::ReadPreview { path, mime } => {
                        cmds.push(Command::ReadPreview { path, mime })
                    }
                }
            }
        }
        Msg::PreviewDecoded { path, data_url, .. } => {
            // Texture upload needs the egui context and happens in ui/mod.rs;
            // only the encoded payload is kept when the message lands here.
            upload::update(
                &mut model.upload,
                UploadMsg::DataUrlRead { path, data_url },
                &mut Vec::new(),
            );
        }
        Msg::SubmitRequested => request_submit(model, cmds),
        Msg::SubmitCompleted(result) => {
            model.submitting = false;
            match result {
                Ok(()) => {
                    tracing::info!("registration submitted");
                    model.toasts.push(Toast::success(SUBMIT_OK_TOAST));
                    cmds.push(Command::ScheduleReset);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "registration submission failed");
                    model.toasts.push(Toast::error(SUBMIT_FAILED_TOAST));
                }
            }
        }
        Msg::ResetForm => reset_form(model),
        Msg::Toast(m) => toasts::update(&mut model.toasts, m),
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command, services: &Services) -> Msg {
    match cmd {
        Command::PickFile => {
            let file = rfd::FileDialog::new()
                .set_title("Select payment screenshot")
                .add_filter("Images", &["png", "jpg", "jpeg", "gif"])
                .pick_file();
            match file {
                Some(path) => Msg::Upload(UploadMsg::Picked(path)),
                None => Msg::Upload(UploadMsg::PickCancelled),
            }
        }
        Command::InspectFile { path } => match upload::inspect_file(&path) {
            Ok(attachment) => Msg::Upload(UploadMsg::Inspected(attachment)),
            Err(err) => Msg::Upload(UploadMsg::InspectFailed {
                path,
                error: format!("{err:#}"),
            }),
        },
        Command::ReadPreview { path, mime } => match upload::read_preview(&path, &mime) {
            Ok((image, data_url)) => Msg::PreviewDecoded {
                path,
                image,
                data_url,
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "preview read failed");
                Msg::Upload(UploadMsg::PreviewFailed { path })
            }
        },
        Command::Submit(request) => Msg::SubmitCompleted(
            submission::submit(&request, services.transport.as_ref()).map_err(|e| e.to_string()),
        ),
        // The pause already elapsed on the caller's ResetTimer.
        Command::ScheduleReset => Msg::ResetForm,
    }
}

/// Evaluate one field and record the result; fields without a rule are left untouched.
fn validate_field(model: &mut AppModel, field: &str) -> bool {
    let rules = model.registry.rules();
    if !rules.contains(field) {
        return true;
    }

    let verdict = evaluate_field(rules, field, model.input(field));
    let status = match verdict.message {
        Some(message) if !verdict.valid => FieldStatus::Error(message),
        _ => FieldStatus::Valid,
    };
    model.statuses.insert(field.to_string(), status);
    verdict.valid
}

/// Drop an error mark while keeping a previous success mark.
fn clear_error(model: &mut AppModel, field: &str) {
    if matches!(model.statuses.get(field), Some(FieldStatus::Error(_))) {
        model.statuses.remove(field);
    }
}

/// Recompute the rule set from the category picker and clear stale team errors.
fn apply_category(model: &mut AppModel) {
    let category = model.category();
    let stale = model.registry.set_category(category);
    for field in stale {
        clear_error(model, &field);
    }
    tracing::debug!(
        category = category.map(Category::as_str).unwrap_or("none"),
        rules = model.registry.rules().field_names().len(),
        "category rules applied"
    );
}

/// Show the file verdict for a new selection or removal; success is left unmarked.
fn refresh_screenshot_status(model: &mut AppModel) {
    let verdict = evaluate_field(
        model.registry.rules(),
        SCREENSHOT_FIELD,
        model.input(SCREENSHOT_FIELD),
    );
    match verdict.message {
        Some(message) if !verdict.valid => {
            model
                .statuses
                .insert(SCREENSHOT_FIELD.to_string(), FieldStatus::Error(message));
        }
        _ => clear_error(model, SCREENSHOT_FIELD),
    }
}

/// Validate every registered field and enqueue the submit command when all pass.
fn request_submit(model: &mut AppModel, cmds: &mut Vec<Command>) {
    if model.submitting {
        tracing::debug!("submit ignored: a submission is already in flight");
        return;
    }

    let fields: Vec<String> = model
        .registry
        .rules()
        .field_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    let mut all_valid = true;
    for field in &fields {
        // No short-circuit: every field gets its inline mark.
        all_valid &= validate_field(model, field);
    }

    if !all_valid {
        let failing: Vec<&str> = model
            .statuses
            .iter()
            .filter(|(_, s)| matches!(s, FieldStatus::Error(_)))
            .map(|(name, _)| name.as_str())
            .collect();
        tracing::debug!(?failing, "submit blocked by validation errors");
        model.toasts.push(Toast::error(INVALID_FORM_TOAST));
        return;
    }

    model.submitting = true;
    cmds.push(Command::Submit(SubmitRequest {
        values: model.values.clone(),
        attachment: model.upload.attachment().cloned(),
    }));
}

/// Return every control, the upload, and the category rules to their initial state.
fn reset_form(model: &mut AppModel) {
    model.values = FormValues::default();
    upload::update(&mut model.upload, UploadMsg::Clear, &mut Vec::new());
    model.statuses.clear();
    apply_category(model);
    tracing::debug!("form reset");
}
