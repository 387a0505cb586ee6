use std::borrow::Cow;
use std::collections::HashMap;

use crate::foundation::error::{KineoError, KineoResult};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct TextBrush;

/// A shaped single-line run ready to be filled.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrush>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

struct RegisteredFamily {
    name: String,
    font: vello_cpu::peniko::FontData,
}

/// Parley-backed layout over a fixed set of caller-supplied fonts.
///
/// Family lookups are case-insensitive; unknown families fall back to the first registered font.
pub(crate) struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    families: Vec<RegisteredFamily>,
    by_name: HashMap<String, usize>,
}

impl TextEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register every family contained in `font_bytes` and return their names.
    pub(crate) fn register_font(&mut self, font_bytes: Vec<u8>) -> KineoResult<Vec<String>> {
        let registered = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.clone()), None);
        if registered.is_empty() {
            return Err(KineoError::validation("no font families registered from font bytes"));
        }
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        let mut names = Vec::new();
        for (id, _) in registered {
            let Some(name) = self.font_ctx.collection.family_name(id).map(str::to_owned) else {
                continue;
            };
            let key = name.to_lowercase();
            if !self.by_name.contains_key(&key) {
                self.by_name.insert(key, self.families.len());
                self.families.push(RegisteredFamily {
                    name: name.clone(),
                    font: font.clone(),
                });
            }
            names.push(name);
        }
        Ok(names)
    }

    pub(crate) fn has_fonts(&self) -> bool {
        !self.families.is_empty()
    }

    /// Shape `text` with the closest registered family. `None` when no font is registered.
    pub(crate) fn shape(&mut self, text: &str, family: &str, size: f32, weight: u16) -> Option<ShapedText> {
        let idx = self
            .by_name
            .get(&family.to_lowercase())
            .copied()
            .unwrap_or(0);
        let fam = self.families.get(idx)?;
        let family_name = fam.name.clone();
        let font = fam.font.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrush));
        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Some(ShapedText { layout, font })
    }
}
