// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the tournament registration form.
//! Handles layout, host events (drag and drop, focus, clicks), and wiring to
//! the background command workers.

pub mod components;

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;


use crate::config::FormConfig;
use crate::logic::submission::Transport;
use crate::models::category::Category;
use crate::models::fields::{CATEGORY_FIELD, GAME_FIELDS, PLAYER_FIELDS, SCREENSHOT_FIELD, TERMS_FIELD};
use crate::mvu::{self, AppModel, Command, Msg, ResetTimer, Services};
use crate::ui::components::upload::UploadMsg;
use crate::ui::components::{fields, team, toasts, upload};

/// Stateful egui application driving the registration form.
pub struct RegistrationApp {
    model: AppModel,
    inbox: Vec<Msg>,
    reset_delay: Duration,
    reset_timer: ResetTimer,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl RegistrationApp {
    /// Build the app and start `config.workers` command workers sharing `transport`.
    pub fn new(config: FormConfig, transport: Arc<dyn Transport>) -> Self {
        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        let services = Services { transport };
        for _ in 0..config.workers.max(1) {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let services = services.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &services);
                    let _ = msg_tx.send(msg);
                }
            });
        }
        tracing::info!(workers = config.workers.max(1), endpoint = %config.endpoint, "registration form ready");

        Self {
            model: AppModel::default(),
            inbox: Vec::new(),
            reset_delay: config.reset_delay,
            reset_timer: ResetTimer::default(),
            cmd_tx,
            msg_rx,
        }
    }
}

impl eframe::App for RegistrationApp {
    // Required by eframe 0.34; eframe still calls `update` before `ui`
    // each frame, and all rendering happens there.
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    /// Drives a single UI frame: collects worker results and host file
    /// events, applies them through the MVU update in arrival order, then
    /// renders the form. Messages produced while rendering are applied on
    /// the next frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });

        // Pull messages produced by the command workers.
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }
        self.collect_file_drops(ctx);
        if self.reset_timer.poll() {
            self.inbox.push(Msg::ResetForm);
        }

        let mut queue: VecDeque<Msg> = std::mem::take(&mut self.inbox).into();
        while let Some(msg) = queue.pop_front() {
            match msg {
                Msg::PreviewDecoded {
                    path,
                    image,
                    data_url,
                } => {
                    let texture = ctx.load_texture(
                        format!("preview-{}", path.display()),
                        image,
                        egui::TextureOptions::default(),
                    );
                    queue.push_back(Msg::Upload(UploadMsg::DataUrlRead {
                        path: path.clone(),
                        data_url,
                    }));
                    queue.push_back(Msg::Upload(UploadMsg::PreviewReady { path, texture }));
                }
                other => {
                    let mut commands = Vec::new();
                    mvu::update(&mut self.model, other, &mut commands);
                    for cmd in commands {
                        if let Command::ScheduleReset = cmd {
                            self.reset_timer.arm(self.reset_delay);
                        } else if self.cmd_tx.send(cmd).is_ok() {
                            self.model.pending_commands += 1;
                        }
                    }
                }
            }
        }
        if self.model.pending_commands > 0 {
            ctx.request_repaint();
        } else if self.reset_timer.is_armed() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading(format!(
                    "{} Tournament Registration",
                    egui_phosphor::regular::TROPHY
                ));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| self.render_status(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_section(ui, "Player details", |app, ui| {
                    for spec in PLAYER_FIELDS {
                        app.render_field(ui, spec);
                    }
                });
                self.render_section(ui, "Game profile", |app, ui| {
                    for spec in GAME_FIELDS {
                        app.render_field(ui, spec);
                    }
                });
                self.render_section(ui, "Tournament", |app, ui| {
                    app.render_category(ui);
                    ui.add_space(6.0);
                    let msgs = team::view(ui, &app.model);
                    app.inbox.extend(msgs.into_iter().map(Msg::Field));
                });
                self.render_section(ui, "Payment screenshot", |app, ui| {
                    let msgs = upload::view(ui, &app.model.upload);
                    app.inbox.extend(msgs.into_iter().map(Msg::Upload));
                    fields::error_line(ui, app.model.status(SCREENSHOT_FIELD));
                });
                self.render_terms(ui);
                ui.add_space(10.0);
                self.render_submit(ui);
                ui.add_space(12.0);
            });
        });

        let toast_msgs = toasts::view(ctx, &self.model.toasts);
        self.inbox.extend(toast_msgs.into_iter().map(Msg::Toast));
    }
}

impl RegistrationApp {
    /// Forward hover state and the first dropped file to the upload component.
    fn collect_file_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.iter().find_map(|f| f.path.clone()),
            )
        });
        if hovering != self.model.upload.is_drag_hover() {
            self.inbox.push(Msg::Upload(UploadMsg::DragHover(hovering)));
        }
        if let Some(path) = dropped {
            self.inbox.push(Msg::Upload(UploadMsg::Picked(path)));
        }
    }

    fn render_section(
        &mut self,
        ui: &mut egui::Ui,
        title: &str,
        body: impl FnOnce(&mut Self, &mut egui::Ui),
    ) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(title);
            ui.add_space(6.0);
            body(self, ui);
        });
        ui.add_space(12.0);
    }

    fn render_field(&mut self, ui: &mut egui::Ui, spec: &crate::models::fields::FieldSpec) {
        let msgs = fields::field(
            ui,
            spec,
            self.model.values.get(spec.name),
            self.model.status(spec.name),
        );
        self.inbox.extend(msgs.into_iter().map(Msg::Field));
        ui.add_space(4.0);
    }

    /// Category picker; a change swaps the rule set and shows or hides the team section.
    fn render_category(&mut self, ui: &mut egui::Ui) {
        let current = self.model.category();
        let mut choice = current;
        ui.label("Category *");
        egui::ComboBox::from_id_salt(CATEGORY_FIELD)
            .width(220.0)
            .selected_text(current.map(Category::label).unwrap_or("Select category"))
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut choice, None, "Select category");
                for category in Category::ALL {
                    ui.selectable_value(&mut choice, Some(category), category.label());
                }
            });
        fields::error_line(ui, self.model.status(CATEGORY_FIELD));

        if choice != current {
            self.inbox.push(Msg::CategorySelected(choice));
        }
    }

    fn render_terms(&mut self, ui: &mut egui::Ui) {
        let mut agreed = self.model.values.terms;
        if ui
            .checkbox(&mut agreed, "I agree to the terms and conditions")
            .changed()
        {
            self.inbox.push(Msg::TermsToggled(agreed));
        }
        fields::error_line(ui, self.model.status(TERMS_FIELD));
    }

    /// Submit button; disabled with a spinner while a submission is in flight.
    fn render_submit(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let label = if self.model.submitting {
                "Registering...".to_string()
            } else {
                format!("{} Register now", egui_phosphor::regular::PAPER_PLANE_TILT)
            };
            let button = egui::Button::new(label).min_size(egui::vec2(200.0, 36.0));
            if ui
                .add_enabled(!self.model.submitting, button)
                .on_disabled_hover_text("Submitting registration…")
                .clicked()
            {
                self.inbox.push(Msg::SubmitRequested);
            }
            if self.model.submitting {
                ui.add(egui::Spinner::new().size(18.0));
            }
        });
    }

    /// Render background activity when present.
    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0));
                ui.label(
                    egui::RichText::new(format!("{} working…", self.model.pending_commands))
                        .color(egui::Color32::from_gray(110)),
                );
            } else {
                ui.label(
                    egui::RichText::new("All fields marked * are required.")
                        .small()
                        .color(egui::Color32::from_gray(110)),
                );
            }
        });
    }
}
