// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Payment screenshot upload area with drag-and-drop and inline preview.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::attachment::{FileAttachment, encode_data_url, guess_mime};

/// Longest preview edge in pixels.
const PREVIEW_MAX: u32 = 256;

/// MVU state for the single upload slot.
#[derive(Default)]
pub struct UploadModel {
    attachment: Option<FileAttachment>,
    preview: Option<egui::TextureHandle>,
    preview_failed: bool,
    drag_hover: bool,
}

impl UploadModel {
    /// The live attachment, valid or not.
    pub fn attachment(&self) -> Option<&FileAttachment> {
        self.attachment.as_ref()
    }

    pub fn is_drag_hover(&self) -> bool {
        self.drag_hover
    }
}

/// Messages emitted by the upload view and its commands.
// Debug omitted because TextureHandle is not Debug.
pub enum UploadMsg {
    RequestPick,
    Picked(PathBuf),
    PickCancelled,
    Inspected(FileAttachment),
    InspectFailed { path: PathBuf, error: String },
    DataUrlRead { path: PathBuf, data_url: String },
    PreviewReady {
        path: PathBuf,
        texture: egui::TextureHandle,
    },
    PreviewFailed { path: PathBuf },
    DragHover(bool),
    Remove,
    Clear,
}

/// Side-effectful commands that can be run off the UI path.
pub enum UploadCommand {
    PickFile,
    InspectFile { path: PathBuf },
    ReadPreview { path: PathBuf, mime: String },
}

/// Outcome the root model reflects onto the screenshot field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadEvent {
    /// The attachment was replaced or removed; re-run the field check.
    AttachmentChanged,
    /// The selected file could not be inspected.
    Failed(String),
}

/// Apply a message to the upload model.
pub fn update(
    model: &mut UploadModel,
    msg: UploadMsg,
    cmds: &mut Vec<UploadCommand>,
) -> Option<UploadEvent> {
    match msg {
        UploadMsg::RequestPick => {
            cmds.push(UploadCommand::PickFile);
            None
        }
        UploadMsg::Picked(path) => {
            model.drag_hover = false;
            cmds.push(UploadCommand::InspectFile { path });
            None
        }
        UploadMsg::PickCancelled => None,
        UploadMsg::Inspected(attachment) => {
            // Rejected files stay selected so the field keeps failing, but are never read.
            if attachment.validate().is_ok() {
                cmds.push(UploadCommand::ReadPreview {
                    path: attachment.path.clone(),
                    mime: attachment.mime.clone(),
                });
            }
            model.attachment = Some(attachment);
            model.preview = None;
            model.preview_failed = false;
            Some(UploadEvent::AttachmentChanged)
        }
        UploadMsg::InspectFailed { path, error } => {
            tracing::warn!(path = %path.display(), %error, "could not inspect selected file");
            // The failed pick replaces whatever was attached before.
            clear(model);
            Some(UploadEvent::Failed(error))
        }
        UploadMsg::DataUrlRead { path, data_url } => {
            if let Some(att) = model.attachment.as_mut().filter(|a| a.path == path) {
                att.data_url = Some(data_url);
            }
            None
        }
        UploadMsg::PreviewReady { path, texture } => {
            if is_current(model, &path) {
                model.preview = Some(texture);
            }
            None
        }
        UploadMsg::PreviewFailed { path } => {
            if is_current(model, &path) {
                model.preview_failed = true;
            }
            None
        }
        UploadMsg::DragHover(hovering) => {
            model.drag_hover = hovering;
            None
        }
        UploadMsg::Remove => {
            clear(model);
            Some(UploadEvent::AttachmentChanged)
        }
        UploadMsg::Clear => {
            clear(model);
            None
        }
    }
}

fn is_current(model: &UploadModel, path: &Path) -> bool {
    model.attachment.as_ref().is_some_and(|a| a.path == path)
}

fn clear(model: &mut UploadModel) {
    model.attachment = None;
    model.preview = None;
    model.preview_failed = false;
    model.drag_hover = false;
}

/// Render the upload area and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &UploadModel) -> Vec<UploadMsg> {
    let mut msgs = Vec::new();

    let visuals = ui.visuals().clone();
    let stroke = if model.drag_hover {
        egui::Stroke::new(2.0, visuals.selection.bg_fill)
    } else {
        visuals.window_stroke()
    };
    let fill = if model.drag_hover {
        visuals.selection.bg_fill.gamma_multiply(0.15)
    } else {
        visuals.panel_fill
    };

    let area = egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .inner_margin(16.0)
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(egui_phosphor::regular::CLOUD_ARROW_UP).size(28.0),
                );
                ui.label("Click to upload or drag and drop");
                ui.label(
                    egui::RichText::new("PNG, JPG or GIF (max 5MB)")
                        .small()
                        .color(egui::Color32::from_gray(120)),
                );
            });
        });

    if area
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
        .clicked()
    {
        msgs.push(UploadMsg::RequestPick);
    }

    if let Some(att) = &model.attachment {
        ui.add_space(8.0);
        render_preview(ui, model, att, &mut msgs);
    }

    msgs
}

fn render_preview(
    ui: &mut egui::Ui,
    model: &UploadModel,
    att: &FileAttachment,
    msgs: &mut Vec<UploadMsg>,
) {
    ui.horizontal(|ui| {
        if let Some(texture) = &model.preview {
            let size = texture.size_vec2();
            let max = 96.0;
            let scale = (max / size.x).min(max / size.y).min(1.0);
            ui.add(egui::Image::new((texture.id(), size * scale)));
        } else {
            let icon = if model.preview_failed {
                egui_phosphor::regular::IMAGE_BROKEN
            } else {
                egui_phosphor::regular::IMAGE
            };
            ui.label(egui::RichText::new(icon).size(48.0));
        }

        ui.vertical(|ui| {
            ui.label(&att.name);
            ui.label(
                egui::RichText::new(format_file_size(att.size))
                    .small()
                    .color(egui::Color32::from_gray(102)),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .button(format!("{} Remove", egui_phosphor::regular::X))
                .on_hover_text("Remove screenshot")
                .clicked()
            {
                msgs.push(UploadMsg::Remove);
            }
        });
    });
}

/// Read size and declared type of a picked or dropped file.
pub(crate) fn inspect_file(path: &Path) -> Result<FileAttachment> {
    let meta = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    Ok(FileAttachment::new(
        path.to_path_buf(),
        guess_mime(path),
        meta.len(),
    ))
}

/// Read the file once, producing both a preview image and its data URL.
pub(crate) fn read_preview(path: &Path, mime: &str) -> Result<(egui::ColorImage, String)> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file {}", path.display()))?;
    let decoded = image::load_from_memory(&bytes)
        .with_context(|| format!("Failed to decode image {}", path.display()))?;
    let fitted = if decoded.width() > PREVIEW_MAX || decoded.height() > PREVIEW_MAX {
        decoded.thumbnail(PREVIEW_MAX, PREVIEW_MAX)
    } else {
        decoded
    };
    let rgba = fitted.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    Ok((image, encode_data_url(mime, &bytes)))
}

/// Human-readable size with up to two decimals, e.g. `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{value:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use std::fs;

    use image::{ImageBuffer, Rgba};
    use tempfile::TempDir;

    use super::*;

    fn png(name: &str) -> FileAttachment {
        FileAttachment::new(PathBuf::from(name), "image/png".into(), 100)
    }

    #[test]
    fn new_selection_replaces_previous_attachment() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(&mut model, UploadMsg::Inspected(png("a.png")), &mut cmds);
        update(
            &mut model,
            UploadMsg::DataUrlRead {
                path: PathBuf::from("a.png"),
                data_url: "data:image/png;base64,AA==".into(),
            },
            &mut cmds,
        );
        update(&mut model, UploadMsg::Inspected(png("b.png")), &mut cmds);

        let att = model.attachment().unwrap();
        assert_eq!(att.name, "b.png");
        assert!(att.data_url.is_none());
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn stale_preview_read_is_discarded() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(&mut model, UploadMsg::Inspected(png("old.png")), &mut cmds);
        update(&mut model, UploadMsg::Inspected(png("new.png")), &mut cmds);
        update(
            &mut model,
            UploadMsg::DataUrlRead {
                path: PathBuf::from("old.png"),
                data_url: "data:image/png;base64,AA==".into(),
            },
            &mut cmds,
        );
        update(
            &mut model,
            UploadMsg::PreviewFailed {
                path: PathBuf::from("old.png"),
            },
            &mut cmds,
        );

        assert!(model.attachment().unwrap().data_url.is_none());
        assert!(!model.preview_failed);
    }

    #[test]
    fn picked_file_is_inspected_off_thread() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(&mut model, UploadMsg::DragHover(true), &mut cmds);
        let event = update(
            &mut model,
            UploadMsg::Picked(PathBuf::from("drop.gif")),
            &mut cmds,
        );

        assert!(event.is_none());
        assert!(!model.is_drag_hover());
        assert!(matches!(
            cmds.as_slice(),
            [UploadCommand::InspectFile { path }] if path == Path::new("drop.gif")
        ));
    }

    #[test]
    fn inspect_failure_clears_attachment() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(&mut model, UploadMsg::Inspected(png("good.png")), &mut cmds);

        let event = update(
            &mut model,
            UploadMsg::InspectFailed {
                path: PathBuf::from("locked.png"),
                error: "permission denied".into(),
            },
            &mut cmds,
        );

        assert_eq!(event, Some(UploadEvent::Failed("permission denied".into())));
        assert!(model.attachment().is_none());
    }

    #[test]
    fn remove_reports_change_but_clear_does_not() {
        let mut model = UploadModel::default();
        let mut cmds = Vec::new();
        update(&mut model, UploadMsg::Inspected(png("a.png")), &mut cmds);
        assert_eq!(
            update(&mut model, UploadMsg::Remove, &mut cmds),
            Some(UploadEvent::AttachmentChanged)
        );

        update(&mut model, UploadMsg::Inspected(png("a.png")), &mut cmds);
        assert_eq!(update(&mut model, UploadMsg::Clear, &mut cmds), None);
        assert!(model.attachment().is_none());
    }

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn large_images_are_shrunk_for_preview() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("wide.png");
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(1024, 512, Rgba([0, 0, 255, 255]));
        img.save(&path).unwrap();

        let (preview, data_url) = read_preview(&path, "image/png").unwrap();

        assert_eq!(preview.size, [256, 128]);
        assert!(data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn undecodable_file_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fake.png");
        fs::write(&path, b"not an image").unwrap();

        assert!(read_preview(&path, "image/png").is_err());
    }
}
