use iced::widget::{column, row};
use iced::{Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

// Declare the application modules
mod error;
mod pipeline;
mod ui;

use error::StudioError;
use pipeline::decoder::GenerationOutcome;
use pipeline::prompt::{Category, StylePreset};
use pipeline::{run_generation, GenerationRequest};

/// An uploaded product photo held in memory for the session.
#[derive(Debug, Clone)]
pub struct ProductImage {
    /// Decoded raster, re-encoded to JPEG at generation time
    pub pixels: image::DynamicImage,
    /// Original bytes wrapped for the on-screen preview
    pub preview: iced::widget::image::Handle,
    /// Filename shown under the preview
    pub filename: String,
}

/// Main application state
struct StudioApp {
    /// API key for the generation service; never rendered or logged
    credential: String,
    /// Whether the key came from GEMINI_API_KEY at startup
    credential_from_env: bool,
    /// Current upload, replaced wholesale by a new one
    upload: Option<ProductImage>,
    /// Selected product category
    category: Category,
    /// Selected style preset
    preset: StylePreset,
    /// Free-form instruction, pre-filled by non-Custom presets
    instruction: String,
    /// True while a generation is in flight
    busy: bool,
    /// Most recent outcome; no history is kept
    result: Option<GenerationOutcome>,
    /// Most recent error line, if any
    error: Option<String>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the upload button
    PickImage,
    /// User edited the masked API key field
    CredentialChanged(String),
    /// User picked a product category
    CategorySelected(Category),
    /// User picked a style preset
    PresetSelected(StylePreset),
    /// User edited the instruction field
    InstructionChanged(String),
    /// User pressed the Generate action
    Generate,
    /// Background generation finished
    GenerationFinished(Result<GenerationOutcome, StudioError>),
    /// User asked to save the generated image
    SaveImage,
}

impl StudioApp {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let credential = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let credential_from_env = !credential.is_empty();
        if credential_from_env {
            println!("🔑 API key loaded from environment");
        }

        (
            StudioApp {
                credential,
                credential_from_env,
                upload: None,
                category: Category::Ring,
                preset: StylePreset::Custom,
                instruction: String::new(),
                busy: false,
                result: None,
                error: None,
                status: "Upload a product photo to begin.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickImage => {
                if self.busy {
                    return Task::none();
                }

                let file = FileDialog::new()
                    .set_title("Select Product Photo")
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_file();

                if let Some(path) = file {
                    self.load_upload(path);
                }

                Task::none()
            }

            Message::CredentialChanged(value) => {
                self.credential = value;
                Task::none()
            }

            Message::CategorySelected(category) => {
                self.category = category;
                Task::none()
            }

            Message::PresetSelected(preset) => {
                self.preset = preset;
                // A non-Custom preset always replaces the instruction,
                // even over user edits; Custom leaves the field alone.
                if let Some(text) = preset.instruction() {
                    self.instruction = text.to_string();
                }
                Task::none()
            }

            Message::InstructionChanged(value) => {
                self.instruction = value;
                Task::none()
            }

            Message::Generate => {
                if self.busy {
                    return Task::none();
                }

                // Without an upload the action is a no-op.
                let Some(upload) = &self.upload else {
                    return Task::none();
                };

                if self.credential.trim().is_empty() {
                    self.error = Some(StudioError::MissingCredential.to_string());
                    return Task::none();
                }

                self.busy = true;
                self.error = None;
                self.result = None;
                self.status = "⏳ Generating try-on image...".to_string();

                let request = GenerationRequest {
                    image: upload.pixels.clone(),
                    category: self.category,
                    instruction: self.instruction.clone(),
                    credential: self.credential.clone(),
                };

                Task::perform(run_generation(request), Message::GenerationFinished)
            }

            Message::GenerationFinished(result) => {
                self.busy = false;

                match result {
                    Ok(outcome) => {
                        self.status = match &outcome {
                            GenerationOutcome::Image { .. } => {
                                println!("✅ Try-on image received");
                                "✅ Image generated.".to_string()
                            }
                            GenerationOutcome::Text(_) => "Model answered with text.".to_string(),
                        };
                        self.result = Some(outcome);
                    }
                    Err(err) => {
                        eprintln!("❌ Generation failed: {err}");
                        self.error = Some(err.to_string());
                        self.status = "Generation failed.".to_string();
                    }
                }

                Task::none()
            }

            Message::SaveImage => {
                if let Some(GenerationOutcome::Image { bytes, mime_type }) = &self.result {
                    let target = FileDialog::new()
                        .set_title("Save Generated Image")
                        .set_file_name(download_filename(mime_type))
                        .save_file();

                    if let Some(path) = target {
                        match std::fs::write(&path, bytes) {
                            Ok(()) => {
                                self.status = format!("💾 Saved to {}", path.display());
                            }
                            Err(e) => {
                                self.error = Some(format!("Could not save file: {e}"));
                            }
                        }
                    }
                }

                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let right = column![
            ui::controls_panel(
                &self.credential,
                self.credential_from_env,
                self.category,
                self.preset,
                &self.instruction,
                self.busy,
                self.upload.is_some(),
            ),
            ui::result_panel(self.result.as_ref(), self.error.as_deref(), &self.status),
        ]
        .spacing(10)
        .width(Length::FillPortion(1));

        row![ui::intake_panel(self.upload.as_ref()), right]
            .spacing(20)
            .padding(20)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Read and decode an uploaded file, replacing the current upload.
    fn load_upload(&mut self, path: PathBuf) {
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.error = Some(format!("Could not read file: {e}"));
                return;
            }
        };

        match image::load_from_memory(&bytes) {
            Ok(pixels) => {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                println!(
                    "📷 Loaded {} ({}x{})",
                    filename,
                    pixels.width(),
                    pixels.height()
                );

                self.upload = Some(ProductImage {
                    pixels,
                    preview: iced::widget::image::Handle::from_bytes(bytes),
                    filename,
                });
                self.result = None;
                self.error = None;
                self.status = "Ready to generate.".to_string();
            }
            Err(e) => {
                self.error = Some(format!("Could not decode image: {e}"));
            }
        }
    }
}

/// Suggested download filename, extension matching the image mime-type.
fn download_filename(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "jewelry_gen.png",
        "image/webp" => "jewelry_gen.webp",
        _ => "jewelry_gen.jpg",
    }
}

fn main() -> iced::Result {
    iced::application("Jewelry Try-On Studio", StudioApp::update, StudioApp::view)
        .theme(StudioApp::theme)
        .centered()
        .run_with(StudioApp::new)
}
