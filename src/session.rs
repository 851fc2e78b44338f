use crate::report::AnalysisReport;

/// UI languages the presentation layer can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    /// Pick a language from a locale string such as `fr-FR` or `en`.
    /// Anything that is not French falls back to English.
    pub fn from_locale(locale: &str) -> Self {
        match locale.get(..2) {
            Some(prefix) if prefix.eq_ignore_ascii_case("fr") => Language::Fr,
            _ => Language::En,
        }
    }
}

/// Presentation-side state for one visitor.
///
/// Owns at most one live report; a new one replaces the prior. The
/// in-flight flag is the "disable resubmission while loading" state, so a
/// session never has more than one outstanding analysis. Language is
/// explicit configuration handed in at startup, updated only through
/// [`set_language`](Self::set_language).
#[derive(Debug, Default)]
pub struct Session {
    language: Language,
    report: Option<AnalysisReport>,
    in_flight: bool,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            report: None,
            in_flight: false,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Mark an analysis as started. Returns false when one is already
    /// outstanding, in which case the caller must not submit.
    pub fn begin_analysis(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Clear the loading state. A successful result replaces the current
    /// report; a failure leaves the prior state intact.
    pub fn finish_analysis(&mut self, outcome: Option<AnalysisReport>) {
        self.in_flight = false;
        if let Some(report) = outcome {
            self.report = Some(report);
        }
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
