//! Built-in WCAG 2.1 success-criteria catalog
//!
//! Single source of truth for seeding new reports and attaching display
//! names to listings. Levels A and AA cover the usual ACR scope; AAA
//! criteria arrive through audit intake when a product opts into them.

use crate::models::WcagLevel;

/// One catalog row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub level: WcagLevel,
}

/// WCAG 2.1 Level A and AA success criteria, in criterion-id order
pub const WCAG_21: &[CatalogEntry] = &[
    CatalogEntry { id: "1.1.1", name: "Non-text Content", level: WcagLevel::A },
    CatalogEntry { id: "1.2.1", name: "Audio-only and Video-only (Prerecorded)", level: WcagLevel::A },
    CatalogEntry { id: "1.2.2", name: "Captions (Prerecorded)", level: WcagLevel::A },
    CatalogEntry { id: "1.2.3", name: "Audio Description or Media Alternative (Prerecorded)", level: WcagLevel::A },
    CatalogEntry { id: "1.2.4", name: "Captions (Live)", level: WcagLevel::AA },
    CatalogEntry { id: "1.2.5", name: "Audio Description (Prerecorded)", level: WcagLevel::AA },
    CatalogEntry { id: "1.3.1", name: "Info and Relationships", level: WcagLevel::A },
    CatalogEntry { id: "1.3.2", name: "Meaningful Sequence", level: WcagLevel::A },
    CatalogEntry { id: "1.3.3", name: "Sensory Characteristics", level: WcagLevel::A },
    CatalogEntry { id: "1.3.4", name: "Orientation", level: WcagLevel::AA },
    CatalogEntry { id: "1.3.5", name: "Identify Input Purpose", level: WcagLevel::AA },
    CatalogEntry { id: "1.4.1", name: "Use of Color", level: WcagLevel::A },
    CatalogEntry { id: "1.4.2", name: "Audio Control", level: WcagLevel::A },
    CatalogEntry { id: "1.4.3", name: "Contrast (Minimum)", level: WcagLevel::AA },
    CatalogEntry { id: "1.4.4", name: "Resize Text", level: WcagLevel::AA },
    CatalogEntry { id: "1.4.5", name: "Images of Text", level: WcagLevel::AA },
    CatalogEntry { id: "1.4.10", name: "Reflow", level: WcagLevel::AA },
    CatalogEntry { id: "1.4.11", name: "Non-text Contrast", level: WcagLevel::AA },
    CatalogEntry { id: "1.4.12", name: "Text Spacing", level: WcagLevel::AA },
    CatalogEntry { id: "1.4.13", name: "Content on Hover or Focus", level: WcagLevel::AA },
    CatalogEntry { id: "2.1.1", name: "Keyboard", level: WcagLevel::A },
    CatalogEntry { id: "2.1.2", name: "No Keyboard Trap", level: WcagLevel::A },
    CatalogEntry { id: "2.1.4", name: "Character Key Shortcuts", level: WcagLevel::A },
    CatalogEntry { id: "2.2.1", name: "Timing Adjustable", level: WcagLevel::A },
    CatalogEntry { id: "2.2.2", name: "Pause, Stop, Hide", level: WcagLevel::A },
    CatalogEntry { id: "2.3.1", name: "Three Flashes or Below Threshold", level: WcagLevel::A },
    CatalogEntry { id: "2.4.1", name: "Bypass Blocks", level: WcagLevel::A },
    CatalogEntry { id: "2.4.2", name: "Page Titled", level: WcagLevel::A },
    CatalogEntry { id: "2.4.3", name: "Focus Order", level: WcagLevel::A },
    CatalogEntry { id: "2.4.4", name: "Link Purpose (In Context)", level: WcagLevel::A },
    CatalogEntry { id: "2.4.5", name: "Multiple Ways", level: WcagLevel::AA },
    CatalogEntry { id: "2.4.6", name: "Headings and Labels", level: WcagLevel::AA },
    CatalogEntry { id: "2.4.7", name: "Focus Visible", level: WcagLevel::AA },
    CatalogEntry { id: "2.5.1", name: "Pointer Gestures", level: WcagLevel::A },
    CatalogEntry { id: "2.5.2", name: "Pointer Cancellation", level: WcagLevel::A },
    CatalogEntry { id: "2.5.3", name: "Label in Name", level: WcagLevel::A },
    CatalogEntry { id: "2.5.4", name: "Motion Actuation", level: WcagLevel::A },
    CatalogEntry { id: "3.1.1", name: "Language of Page", level: WcagLevel::A },
    CatalogEntry { id: "3.1.2", name: "Language of Parts", level: WcagLevel::AA },
    CatalogEntry { id: "3.2.1", name: "On Focus", level: WcagLevel::A },
    CatalogEntry { id: "3.2.2", name: "On Input", level: WcagLevel::A },
    CatalogEntry { id: "3.2.3", name: "Consistent Navigation", level: WcagLevel::AA },
    CatalogEntry { id: "3.2.4", name: "Consistent Identification", level: WcagLevel::AA },
    CatalogEntry { id: "3.3.1", name: "Error Identification", level: WcagLevel::A },
    CatalogEntry { id: "3.3.2", name: "Labels or Instructions", level: WcagLevel::A },
    CatalogEntry { id: "3.3.3", name: "Error Suggestion", level: WcagLevel::AA },
    CatalogEntry { id: "3.3.4", name: "Error Prevention (Legal, Financial, Data)", level: WcagLevel::AA },
    CatalogEntry { id: "4.1.1", name: "Parsing", level: WcagLevel::A },
    CatalogEntry { id: "4.1.2", name: "Name, Role, Value", level: WcagLevel::A },
    CatalogEntry { id: "4.1.3", name: "Status Messages", level: WcagLevel::AA },
];

/// Look up a catalog entry by criterion id
pub fn lookup(criterion_id: &str) -> Option<&'static CatalogEntry> {
    WCAG_21.iter().find(|e| e.id == criterion_id)
}
