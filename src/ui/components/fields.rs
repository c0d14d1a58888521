// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Labelled text/select inputs with inline error and success marks.


use crate::models::fields::{FieldKind, FieldSpec};
use crate::mvu::FieldStatus;

/// Messages produced by a single form input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldMsg {
    /// The value changed (typing or picking an option).
    Edited { name: String, value: String },
    /// Focus left the input, or a select option was chosen.
    Blurred(String),
}

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(0xff, 0x47, 0x57);
const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(0x10, 0xb9, 0x81);

/// Render one field described by a static spec.
pub fn field(
    ui: &mut egui::Ui,
    spec: &FieldSpec,
    value: &str,
    status: &FieldStatus,
) -> Vec<FieldMsg> {
    input(ui, spec.name, spec.label, spec.kind, spec.hint, value, status)
}

/// Render a labelled input and its status line.
pub fn input(
    ui: &mut egui::Ui,
    name: &str,
    label: &str,
    kind: FieldKind,
    hint: &str,
    value: &str,
    status: &FieldStatus,
) -> Vec<FieldMsg> {
    let mut msgs = Vec::new();

    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.label(format!("{label} *"));
            if matches!(status, FieldStatus::Valid) {
                ui.label(egui::RichText::new(egui_phosphor::regular::CHECK_CIRCLE).color(SUCCESS_COLOR));
            }
        });

        match kind {
            FieldKind::Select(options) => {
                let mut current = value.to_string();
                egui::ComboBox::from_id_salt(name)
                    .width(220.0)
                    .selected_text(if value.is_empty() { "Select…" } else { value })
                    .show_ui(ui, |ui| {
                        for option in options {
                            if ui
                                .selectable_value(&mut current, option.to_string(), *option)
                                .clicked()
                            {
                                msgs.push(FieldMsg::Edited {
                                    name: name.to_string(),
                                    value: option.to_string(),
                                });
                                msgs.push(FieldMsg::Blurred(name.to_string()));
                            }
                        }
                    });
            }
            FieldKind::Text | FieldKind::Email | FieldKind::Tel | FieldKind::Number => {
                let mut buffer = value.to_string();
                let response = ui.add(
                    egui::TextEdit::singleline(&mut buffer)
                        .hint_text(hint)
                        .desired_width(220.0),
                );
                if response.changed() {
                    msgs.push(FieldMsg::Edited {
                        name: name.to_string(),
                        value: buffer,
                    });
                }
                if response.lost_focus() {
                    msgs.push(FieldMsg::Blurred(name.to_string()));
                }
            }
        }

        if let FieldStatus::Error(message) = status {
            ui.label(egui::RichText::new(message).small().color(ERROR_COLOR));
        }
    });

    msgs
}

/// Inline error line for controls that are not rendered through [`input`].
pub fn error_line(ui: &mut egui::Ui, status: &FieldStatus) {
    if let FieldStatus::Error(message) = status {
        ui.label(egui::RichText::new(message).small().color(ERROR_COLOR));
    }
}
