//! Annotated text shown in the viewer.

use relations_overlay_core::TargetId;
use serde::{Deserialize, Serialize};

/// A run of text, optionally covered by an annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Text(String),
    Annotation {
        id: TargetId,
        text: String,
        /// Entity type, shown next to the text in the relations panel.
        label: String,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotatedDocument {
    pub title: String,
    pub paragraphs: Vec<Vec<Segment>>,
}

impl AnnotatedDocument {
    /// Text and label of the annotation with the given id.
    pub fn annotation(&self, id: TargetId) -> Option<(&str, &str)> {
        self.paragraphs.iter().flatten().find_map(|segment| match segment {
            Segment::Annotation {
                id: seg_id,
                text,
                label,
            } if *seg_id == id => Some((text.as_str(), label.as_str())),
            _ => None,
        })
    }

    /// Panel caption for an annotation, e.g. `Bristol (PLACE)`.
    pub fn caption(&self, id: TargetId) -> String {
        match self.annotation(id) {
            Some((text, label)) => format!("{text} ({label})"),
            None => format!("#{}", id.0),
        }
    }

    pub fn annotation_count(&self) -> usize {
        self.paragraphs
            .iter()
            .flatten()
            .filter(|segment| matches!(segment, Segment::Annotation { .. }))
            .count()
    }
}

/// A directed relation created by finishing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub from: TargetId,
    pub to: TargetId,
}

fn text(s: &str) -> Segment {
    Segment::Text(s.to_string())
}

fn annotation(id: u64, s: &str, label: &str) -> Segment {
    Segment::Annotation {
        id: TargetId(id),
        text: s.to_string(),
        label: label.to_string(),
    }
}

/// Create a sample document for demonstration.
pub fn create_sample_document() -> AnnotatedDocument {
    AnnotatedDocument {
        title: "Letter from the harbour master".to_string(),
        paragraphs: vec![
            vec![
                text("In the spring of 1843 "),
                annotation(1, "Captain Elias Ward", "PERSON"),
                text(" sailed the brig "),
                annotation(2, "Margaret", "SHIP"),
                text(" out of "),
                annotation(3, "Bristol", "PLACE"),
                text(", bound for the trading posts along the coast of "),
                annotation(4, "Newfoundland", "PLACE"),
                text("."),
            ],
            vec![
                text("His first mate, "),
                annotation(5, "Thomas Hale", "PERSON"),
                text(", kept the log after the captain fell ill near "),
                annotation(6, "St. John's", "PLACE"),
                text(". The cargo of salt and canvas was sold to "),
                annotation(7, "the Hudson merchants", "ORG"),
                text(" at a loss."),
            ],
            vec![
                text("The harbour master noted that "),
                annotation(8, "Ward", "PERSON"),
                text(" returned alone in the autumn, and that the "),
                annotation(9, "Margaret", "SHIP"),
                text(" was never registered again."),
            ],
        ],
    }
}
