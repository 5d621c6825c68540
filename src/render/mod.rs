//! Plain-text rendering of matches, analyses and clinician reports. No I/O.

pub mod formatter;
pub mod guidance;
pub mod report;

pub use formatter::{
    confidence_label, render, render_analysis, render_disease, render_follow_ups, urgency_banner,
    Rendered,
};
pub use guidance::local_guidance;
pub use report::format_medical_report;
