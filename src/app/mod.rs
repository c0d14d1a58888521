// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Application entry point wiring egui/eframe to launch the registration form.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use egui_phosphor::Variant;

use crate::config::FormConfig;
use crate::logic::submission::HttpTransport;
use crate::ui::RegistrationApp;

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run(config: FormConfig) -> Result<()> {
    let transport = Arc::new(HttpTransport::new(config.endpoint.clone())?);

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 900.0])
            .with_min_inner_size([520.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Tournament Registration",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(RegistrationApp::new(config, transport)))
        }),
    )
    .map_err(|err| anyhow!("Failed to start the registration window: {err}"))
}
