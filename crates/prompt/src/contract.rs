//! Section headers shared by the prompt template and the response parser.
//!
//! The composer asks the model to emit these headers and the parser splits
//! on them, so any template change must keep both literals intact.

/// Header introducing the free-text answer.
pub const ANSWER_HEADER: &str = "Answer:";

/// Header introducing the numbered recommendation list.
pub const RESOURCES_HEADER: &str = "Recommended Resources:";

/// Separator between a recommended title and its link.
pub const LINK_SEPARATOR: &str = " - ";

/// Check that a template emits both section headers, in order.
pub fn template_honours_contract(template: &str) -> bool {
    match (template.find(ANSWER_HEADER), template.rfind(RESOURCES_HEADER)) {
        (Some(answer), Some(resources)) => answer < resources,
        _ => false,
    }
}
