//! Templated text for analyzed lines.

use crate::{
    traits::Interpreter,
    types::{CurvatureClass, Depth, LengthClass, LineCategory, ShapeDescriptor},
};

/// Assembles a few fixed sentences from the length class and descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateInterpreter;

impl TemplateInterpreter {
    fn subject(category: LineCategory) -> &'static str {
        match category {
            LineCategory::Life => "vitality",
            LineCategory::Heart => "emotional expression",
            LineCategory::Head => "thinking style",
            LineCategory::Fate => "sense of direction",
            LineCategory::Unknown => "character",
        }
    }

    fn length_sentence(category: LineCategory, length: LengthClass) -> String {
        let subject = Self::subject(category);
        match length {
            LengthClass::Long => format!("A long {category} line suggests strong {subject}."),
            LengthClass::Medium => format!("A medium {category} line suggests balanced {subject}."),
            LengthClass::Short => format!("A short {category} line suggests focused {subject}."),
        }
    }
}

impl Interpreter for TemplateInterpreter {
    fn interpret(&self, category: LineCategory, length: LengthClass, descriptor: &ShapeDescriptor) -> String {
        let mut sentences = vec![Self::length_sentence(category, length)];

        if !descriptor.valid {
            return sentences.join(" ");
        }

        match descriptor.depth {
            Depth::Deep => sentences.push("The line is deep and clearly marked.".to_string()),
            Depth::Faint => sentences.push("The line is faint.".to_string()),
            Depth::Medium => {}
        }

        match descriptor.curvature {
            CurvatureClass::Wavy => sentences.push("Its wavy course points to changeable phases.".to_string()),
            CurvatureClass::Curved => sentences.push("It follows a gentle curve.".to_string()),
            CurvatureClass::Straight => sentences.push("It runs mostly straight.".to_string()),
            CurvatureClass::Unknown => {}
        }

        if descriptor.breaks > 0 {
            sentences.push(format!("{} break(s) mark points of change.", descriptor.breaks));
        }

        let branches = descriptor.branches;
        if branches.upward > branches.downward {
            sentences.push("Rising branches outnumber falling ones.".to_string());
        } else if branches.downward > branches.upward {
            sentences.push("Falling branches outnumber rising ones.".to_string());
        }
        if branches.forks > 0 {
            sentences.push(format!("{} fork(s) along the line.", branches.forks));
        }

        sentences.join(" ")
    }
}
