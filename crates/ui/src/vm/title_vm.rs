use services::QuizVariant;

/// Window title; the extended quiz says so.
#[must_use]
pub fn window_title(variant: QuizVariant) -> &'static str {
    match variant {
        QuizVariant::Standard => "Clinical Trials Adventure",
        QuizVariant::Extended => "Clinical Trials Adventure: Extended Edition",
    }
}
