// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Transient toast notifications drawn over the form.

use std::time::{Duration, Instant};


/// Screen anchor for a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPosition {
    TopRight,
    TopCenter,
}

/// A single notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub text: String,
    pub duration: Duration,
    pub position: ToastPosition,
    pub background: egui::Color32,
    pub foreground: egui::Color32,
    pub shown_at: Instant,
}

impl Toast {
    /// Red top-right toast for failures.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: Duration::from_millis(3000),
            position: ToastPosition::TopRight,
            background: egui::Color32::from_rgb(0xff, 0x47, 0x57),
            foreground: egui::Color32::WHITE,
            shown_at: Instant::now(),
        }
    }

    /// Green top-center toast for a completed registration.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: Duration::from_millis(5000),
            position: ToastPosition::TopCenter,
            background: egui::Color32::from_rgb(0x10, 0xb9, 0x81),
            foreground: egui::Color32::BLACK,
            shown_at: Instant::now(),
        }
    }

    fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

#[derive(Default)]
pub struct ToastsModel {
    toasts: Vec<Toast>,
}

impl ToastsModel {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn push(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}

pub enum ToastMsg {
    Dismiss(usize),
    Expire(Instant),
}

pub fn update(model: &mut ToastsModel, msg: ToastMsg) {
    match msg {
        ToastMsg::Dismiss(index) => {
            if index < model.toasts.len() {
                model.toasts.remove(index);
            }
        }
        ToastMsg::Expire(now) => model.toasts.retain(|t| !t.expired(now)),
    }
}

/// Draw live toasts; clicking one dismisses it.
pub fn view(ctx: &egui::Context, model: &ToastsModel) -> Vec<ToastMsg> {
    let mut msgs = Vec::new();
    if model.toasts.is_empty() {
        return msgs;
    }

    for position in [ToastPosition::TopRight, ToastPosition::TopCenter] {
        let (anchor, offset, id) = match position {
            ToastPosition::TopRight => (egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0), "toasts_right"),
            ToastPosition::TopCenter => (egui::Align2::CENTER_TOP, egui::vec2(0.0, 16.0), "toasts_center"),
        };
        if !model.toasts.iter().any(|t| t.position == position) {
            continue;
        }

        egui::Area::new(egui::Id::new(id))
            .anchor(anchor, offset)
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (index, toast) in model.toasts.iter().enumerate() {
                    if toast.position != position {
                        continue;
                    }
                    let frame = egui::Frame::new()
                        .fill(toast.background)
                        .corner_radius(6.0)
                        .inner_margin(egui::Margin::symmetric(14, 10))
                        .show(ui, |ui| {
                            ui.set_max_width(360.0);
                            ui.label(egui::RichText::new(&toast.text).color(toast.foreground));
                        });
                    if frame.response.interact(egui::Sense::click()).clicked() {
                        msgs.push(ToastMsg::Dismiss(index));
                    }
                    ui.add_space(6.0);
                }
            });
    }

    // Keep repainting so expiry happens without user input.
    ctx.request_repaint_after(Duration::from_millis(250));
    msgs.push(ToastMsg::Expire(Instant::now()));
    msgs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_their_duration() {
        let mut model = ToastsModel::default();
        let error = Toast::error("Please fix the errors above");
        let start = error.shown_at;
        model.push(error);
        model.push(Toast::success("done"));

        update(&mut model, ToastMsg::Expire(start + Duration::from_millis(2999)));
        assert_eq!(model.toasts().len(), 2);

        update(&mut model, ToastMsg::Expire(start + Duration::from_millis(3100)));
        assert_eq!(model.toasts().len(), 1);
        assert_eq!(model.toasts()[0].position, ToastPosition::TopCenter);
    }

    #[test]
    fn dismiss_ignores_out_of_range_index() {
        let mut model = ToastsModel::default();
        model.push(Toast::error("x"));
        update(&mut model, ToastMsg::Dismiss(3));
        assert_eq!(model.toasts().len(), 1);
        update(&mut model, ToastMsg::Dismiss(0));
        assert!(model.toasts().is_empty());
    }
}
