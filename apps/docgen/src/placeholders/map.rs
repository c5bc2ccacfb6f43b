use serde::Serialize;

use crate::models::ResumeData;

use super::labels::SectionLabels;
use super::sections::{
    render_certificates, render_competencies, render_educations, render_employers,
    render_languages, render_other, render_work_experiences,
};
use super::{
    token, CERTIFICATES, COMPETENCIES, EDUCATIONS, EMPLOYERS, LANGUAGES, NAME, OTHER, SUMMARY,
    TITLE, WORK_EXPERIENCES,
};

/// Token → replacement text. Keys are unique ignoring ASCII case, and iteration
/// follows insertion order so substitution is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplacementMap {
    entries: Vec<(String, String)>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value for `key`. An existing key (in any case) keeps its slot.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&key))
        {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the full replacement map for one résumé. Pure: equal input, equal map.
pub fn build_replacement_map(resume: &ResumeData, labels: &SectionLabels) -> ReplacementMap {
    let scalar = |v: Option<&str>| v.unwrap_or_default().to_string();

    let mut map = ReplacementMap::new();
    map.insert(token(NAME), scalar(resume.name()));
    map.insert(token(TITLE), scalar(resume.title()));
    map.insert(token(SUMMARY), scalar(resume.summary.as_deref()));

    map.insert(token(EDUCATIONS), render_educations(resume.educations.as_deref()));
    map.insert(
        token(WORK_EXPERIENCES),
        render_work_experiences(resume.work_experiences.as_deref(), labels),
    );
    map.insert(token(EMPLOYERS), render_employers(resume.employers.as_deref()));
    map.insert(
        token(COMPETENCIES),
        render_competencies(resume.competencies.as_deref(), labels),
    );
    map.insert(token(CERTIFICATES), render_certificates(resume.certificates.as_deref()));
    map.insert(token(LANGUAGES), render_languages(resume.languages.as_deref()));
    map.insert(token(OTHER), render_other(resume.other.as_deref()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Competency, PersonalInformation};
    use crate::placeholders::labels::{EN, SV};
    use crate::placeholders::TEXT_KEYS;

    fn sample() -> ResumeData {
        ResumeData {
            personal_info: Some(PersonalInformation {
                name: Some("Jane Doe".into()),
                title: Some("Engineer".into()),
                image_base64: None,
            }),
            summary: Some("  Keeps whitespace as given.  ".into()),
            competencies: Some(vec![Competency {
                name: Some("Rust".into()),
                is_main_skill: true,
                ..Default::default()
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn test_fixed_key_set_in_order() {
        let map = build_replacement_map(&ResumeData::default(), &SV);
        let keys: Vec<&str> = map.keys().collect();
        let expected: Vec<String> = TEXT_KEYS.iter().map(|k| token(k)).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_empty_resume_maps_every_key_to_empty() {
        let map = build_replacement_map(&ResumeData::default(), &SV);
        assert_eq!(map.len(), TEXT_KEYS.len());
        assert!(map.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_values_from_resume() {
        let map = build_replacement_map(&sample(), &EN);
        assert_eq!(map.get("|name|"), Some("Jane Doe"));
        assert_eq!(map.get("|NAME|"), Some("Jane Doe"));
        assert_eq!(map.get("|summary|"), Some("  Keeps whitespace as given.  "));
        assert_eq!(map.get("|competencies|"), Some("• Rust [Core competency]"));
        assert_eq!(map.get("|photo|"), None);
    }

    #[test]
    fn test_building_twice_is_identical() {
        let resume = sample();
        assert_eq!(
            build_replacement_map(&resume, &SV),
            build_replacement_map(&resume, &SV)
        );
    }

    #[test]
    fn test_insert_is_case_insensitive_and_keeps_slot() {
        let mut map = ReplacementMap::new();
        map.insert("|a|", "1");
        map.insert("|b|", "2");
        map.insert("|A|", "3");
        let pairs: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(pairs, vec![("|a|", "3"), ("|b|", "2")]);
    }
}
