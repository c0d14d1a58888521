// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Team name and teammate rows shown for duo/squad brackets.


use crate::models::category::{Category, teammate_phone_field, teammate_uid_field};
use crate::models::fields::FieldKind;
use crate::models::rules::TEAM_NAME_FIELD;
use crate::mvu::AppModel;
use crate::ui::components::fields::{self, FieldMsg};

/// Render the team section; nothing is drawn for solo or unset categories.
pub fn view(ui: &mut egui::Ui, model: &AppModel) -> Vec<FieldMsg> {
    let mut msgs = Vec::new();
    let Some(category) = model.category().filter(|c| c.is_team()) else {
        return msgs;
    };

    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(heading(category));
        ui.add_space(6.0);

        msgs.extend(fields::input(
            ui,
            TEAM_NAME_FIELD,
            "Team name",
            FieldKind::Text,
            "2-30 characters",
            model.values.get(TEAM_NAME_FIELD),
            model.status(TEAM_NAME_FIELD),
        ));

        for slot in 1..=category.teammate_slots() {
            ui.add_space(8.0);
            let uid = teammate_uid_field(slot);
            let phone = teammate_phone_field(slot);
            ui.horizontal_top(|ui| {
                msgs.extend(fields::input(
                    ui,
                    &uid,
                    &format!("Teammate {slot} Game UID"),
                    FieldKind::Text,
                    "At least 7 digits",
                    model.values.get(&uid),
                    model.status(&uid),
                ));
                ui.add_space(12.0);
                msgs.extend(fields::input(
                    ui,
                    &phone,
                    &format!("Teammate {slot} phone"),
                    FieldKind::Tel,
                    "Phone number",
                    model.values.get(&phone),
                    model.status(&phone),
                ));
            });
        }
    });

    msgs
}

fn heading(category: Category) -> String {
    let mates = category.teammate_slots();
    let noun = if mates == 1 { "teammate" } else { "teammates" };
    format!(
        "{} Team details ({mates} {noun})",
        egui_phosphor::regular::USERS_THREE
    )
}
