/// View-building helpers for the studio surface
///
/// One screen, two columns: the left column handles image intake and
/// preview, the right column holds the selectors, the instruction field
/// and the Generate action, with the most recent result (or error line)
/// rendered underneath. All widgets emit `Message`s handled in main.rs.
use iced::widget::{button, column, container, image as picture, pick_list, text, text_input};
use iced::{Alignment, Element, Length};

use crate::pipeline::decoder::GenerationOutcome;
use crate::pipeline::prompt::{Category, StylePreset};
use crate::{Message, ProductImage};

/// Left column: upload button and product photo preview.
pub fn intake_panel(upload: Option<&ProductImage>) -> Element<'_, Message> {
    let mut panel = column![
        text("Product Photo").size(20),
        button("Upload Product Photo")
            .on_press(Message::PickImage)
            .padding(10),
    ]
    .spacing(15)
    .align_x(Alignment::Start);

    match upload {
        Some(product) => {
            panel = panel.push(
                picture(product.preview.clone())
                    .width(Length::Fill)
                    .height(Length::FillPortion(3)),
            );
            panel = panel.push(text(&product.filename).size(14));
        }
        None => {
            panel = panel.push(text("No image uploaded yet (jpg / jpeg / png).").size(14));
        }
    }

    container(panel.width(Length::FillPortion(1)))
        .padding(10)
        .into()
}

/// Right column: credential, selectors, instruction and the primary action.
pub fn controls_panel<'a>(
    credential: &'a str,
    credential_from_env: bool,
    category: Category,
    preset: StylePreset,
    instruction: &'a str,
    busy: bool,
    can_generate: bool,
) -> Element<'a, Message> {
    let key_hint = if credential_from_env {
        "API Key (loaded from GEMINI_API_KEY)"
    } else {
        "API Key"
    };

    let generate_label = if busy { "Generating..." } else { "Generate Try-On" };

    let panel = column![
        text("Try-On Settings").size(20),
        text_input(key_hint, credential)
            .on_input(Message::CredentialChanged)
            .secure(true)
            .padding(8),
        text("Category").size(14),
        pick_list(&Category::ALL[..], Some(category), Message::CategorySelected),
        text("Style Preset").size(14),
        pick_list(&StylePreset::ALL[..], Some(preset), Message::PresetSelected),
        text("Instruction").size(14),
        text_input("Describe the shot you want...", instruction)
            .on_input(Message::InstructionChanged)
            .padding(8),
        button(generate_label)
            .on_press_maybe((!busy && can_generate).then_some(Message::Generate))
            .padding(10),
    ]
    .spacing(12)
    .width(Length::FillPortion(1));

    container(panel).padding(10).into()
}

/// Outcome area: the generated image with its download affordance, the
/// text-fallback warning, or a single error line. The credential never
/// appears here; errors are redacted upstream.
pub fn result_panel<'a>(
    result: Option<&'a GenerationOutcome>,
    error: Option<&'a str>,
    status: &'a str,
) -> Element<'a, Message> {
    let mut panel = column![].spacing(10);

    if let Some(message) = error {
        panel = panel.push(text(message).size(14).style(text::danger));
    }

    match result {
        Some(GenerationOutcome::Image { bytes, .. }) => {
            let handle = picture::Handle::from_bytes(bytes.clone());
            panel = panel.push(
                picture(handle)
                    .width(Length::Fill)
                    .height(Length::FillPortion(2)),
            );
            panel = panel.push(
                button("Save Image")
                    .on_press(Message::SaveImage)
                    .padding(8),
            );
        }
        Some(GenerationOutcome::Text(reply)) => {
            panel = panel.push(
                text("⚠️ Model replied with text instead of image")
                    .size(14)
                    .style(text::danger),
            );
            panel = panel.push(text(reply).size(14));
        }
        None => {}
    }

    panel = panel.push(text(status).size(13));

    container(panel).padding(10).into()
}
