/// Fixed words the section renderers put on secondary lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLabels {
    pub technologies: &'static str,
    pub keywords: &'static str,
    pub main_skill: &'static str,
}

pub const SV: SectionLabels = SectionLabels {
    technologies: "Teknik",
    keywords: "Nyckelord",
    main_skill: "Huvudkompetens",
};

pub const EN: SectionLabels = SectionLabels {
    technologies: "Technologies",
    keywords: "Keywords",
    main_skill: "Core competency",
};

/// Labels for a normalised locale. Anything but `en` gets the Swedish set,
/// matching the default template language.
pub fn for_locale(locale: &str) -> &'static SectionLabels {
    match locale {
        "en" => &EN,
        _ => &SV,
    }
}
