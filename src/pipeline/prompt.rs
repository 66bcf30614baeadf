/// Prompt composition for the generation request
///
/// The prompt sent to the service is assembled from three pieces: the
/// product category (rendered verbatim, localized label included), a
/// fixed rubric stating the try-on requirements in priority order, and
/// the user's free-form instruction. Composition is deterministic:
/// the same inputs always produce the same string.
use std::fmt;

/// The fixed rubric. Order matters: preserving the product design comes
/// before everything else, then the synthesized model, then the look.
const RUBRIC: &str = "\
Requirements, in priority order:
1. Preserve the jewelry product shown in the attached photo exactly as it is. \
Do not redesign, reshape, recolor, or re-texture it in any way.
2. Generate a realistic human model wearing this exact product in a natural pose.
3. The final image must look like high-end fashion photography.";

/// Build the prompt string for one generation attempt.
///
/// An empty instruction is legal; the rubric alone still communicates
/// the task. A non-empty instruction is appended verbatim.
pub fn compose_prompt(category: Category, instruction: &str) -> String {
    let mut prompt = format!(
        "Virtual try-on photo for a jewelry product.\nProduct category: {}.\n{}",
        category, RUBRIC
    );
    if !instruction.is_empty() {
        prompt.push_str("\nStyle direction: ");
        prompt.push_str(instruction);
    }
    prompt
}

/// Product category. Purely descriptive; only influences the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Ring,
    Necklace,
    Pendant,
    WalletChain,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Ring,
        Category::Necklace,
        Category::Pendant,
        Category::WalletChain,
    ];

    /// Display label, including the Thai parenthetical used in the shop.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Ring => "Ring (แหวน)",
            Category::Necklace => "Necklace (สร้อยคอ)",
            Category::Pendant => "Pendant (จี้)",
            Category::WalletChain => "Wallet Chain (โซ่กระเป๋า)",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named instruction template offered to accelerate user input.
///
/// Selecting a non-Custom preset pre-fills the instruction field with
/// its fixed text; the user may edit freely afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StylePreset {
    Custom,
    LuxuryHandModel,
    StreetwearVibe,
    MinimalistSkinTone,
}

impl StylePreset {
    pub const ALL: [StylePreset; 4] = [
        StylePreset::Custom,
        StylePreset::LuxuryHandModel,
        StylePreset::StreetwearVibe,
        StylePreset::MinimalistSkinTone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StylePreset::Custom => "Custom",
            StylePreset::LuxuryHandModel => "Luxury Hand Model (Studio Light)",
            StylePreset::StreetwearVibe => "Streetwear Vibe",
            StylePreset::MinimalistSkinTone => "Minimalist Skin Tone",
        }
    }

    /// The fixed default instruction for this preset, or `None` for Custom.
    pub fn instruction(&self) -> Option<&'static str> {
        match self {
            StylePreset::Custom => None,
            StylePreset::LuxuryHandModel => Some(
                "An elegant hand with perfectly manicured nails wearing the product, \
                 dramatic studio lighting, luxury jewelry advertisement style",
            ),
            StylePreset::StreetwearVibe => Some(
                "A stylish young model wearing the product with an urban streetwear \
                 outfit, city street backdrop, editorial fashion photography",
            ),
            StylePreset::MinimalistSkinTone => Some(
                "The product worn against bare skin, minimalist aesthetic, soft \
                 natural light, neutral beige background",
            ),
        }
    }
}

impl fmt::Display for StylePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
