//! Section renderers: one list of records in, one multi-line text block out.
//!
//! Each record becomes a bullet line; secondary text (descriptions, keyword
//! lists) follows as indented continuation lines. Blank fields are left out of
//! every join, so a line never carries a dangling separator. Lines end in a
//! single `\n` and the block has no trailing whitespace.

use crate::models::resume::{Certificate, Competency, Education, Employer, Language, WorkExperience};

use super::labels::SectionLabels;

const BULLET: &str = "• ";
const INDENT: &str = "  ";
const DASH: &str = " – ";
const RANGE: &str = "–";
const ALTERNATIVES: &str = " | ";

pub fn render_educations(items: Option<&[Education]>) -> String {
    render(items, |e| {
        let main = join(DASH, [value(&e.title).or(value(&e.degree)), value(&e.institution)]);
        let when = join(
            ALTERNATIVES,
            [
                join(RANGE, [value(&e.start_date), value(&e.end_date)]).as_deref(),
                value(&e.period),
            ],
        );
        Item::new(with_parenthetical(main, when.as_deref()))
    })
}

pub fn render_work_experiences(items: Option<&[WorkExperience]>, labels: &SectionLabels) -> String {
    render(items, |w| {
        let role = value(&w.position).or(value(&w.experience));
        let main = join(DASH, [role, value(&w.company_name)]);
        let dates = join(RANGE, [value(&w.start_date), value(&w.end_date)]);
        Item::new(with_parenthetical(main, dates.as_deref()))
            .continued(w.description.as_deref())
            .labelled(labels.technologies, value(&w.technologies))
    })
}

pub fn render_employers(items: Option<&[Employer]>) -> String {
    render(items, |e| {
        let main = join(DASH, [value(&e.company), value(&e.position)]);
        Item::new(with_parenthetical(main, value(&e.period)))
    })
}

pub fn render_competencies(items: Option<&[Competency]>, labels: &SectionLabels) -> String {
    render(items, |c| {
        let level = value(&c.level).map(|l| format!("({l})"));
        let named = join(" ", [value(&c.name), level.as_deref()]);
        let mut main = join(DASH, [named.as_deref(), value(&c.skill_category)]);
        if c.is_main_skill {
            main = main.map(|m| format!("{m} [{}]", labels.main_skill));
        }

        let keywords: Vec<&str> = c
            .keywords
            .iter()
            .flatten()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .collect();
        let keywords = (!keywords.is_empty()).then(|| keywords.join(", "));

        Item::new(main).labelled(labels.keywords, keywords.as_deref())
    })
}

pub fn render_certificates(items: Option<&[Certificate]>) -> String {
    render(items, |c| Item::new(join(DASH, [value(&c.name), value(&c.institution)])))
}

pub fn render_languages(items: Option<&[Language]>) -> String {
    render(items, |l| {
        let main = join(DASH, [value(&l.name), value(&l.level)]);
        Item::new(with_parenthetical(main, value(&l.fluency)))
    })
}

pub fn render_other(items: Option<&[Option<String>]>) -> String {
    render(items, |s| Item::new(value(s).map(str::to_string)))
}

// ────────────────────────────────────────────────────────────────────────────
// Building blocks
// ────────────────────────────────────────────────────────────────────────────

/// One bullet: a head line plus indented continuation lines.
struct Item {
    head: Option<String>,
    continuation: Vec<String>,
}

impl Item {
    fn new(head: Option<String>) -> Self {
        Self {
            head,
            continuation: Vec::new(),
        }
    }

    /// Free text, one continuation line per non-blank source line.
    fn continued(mut self, text: Option<&str>) -> Self {
        self.continuation.extend(lines(text).map(str::to_string));
        self
    }

    /// `Label: text`, with any further source lines under it.
    fn labelled(mut self, label: &str, text: Option<&str>) -> Self {
        let mut source = lines(text);
        if let Some(first) = source.next() {
            self.continuation.push(format!("{label}: {first}"));
            self.continuation.extend(source.map(str::to_string));
        }
        self
    }

    fn write_to(self, out: &mut String) {
        let mut rest = self.continuation.into_iter();
        // A record with secondary text only promotes it to the bullet line.
        let Some(head) = self.head.or_else(|| rest.next()) else {
            return;
        };
        out.push_str(BULLET);
        out.push_str(&head);
        out.push('\n');
        for line in rest {
            out.push_str(INDENT);
            out.push_str(&line);
            out.push('\n');
        }
    }
}

fn render<T>(items: Option<&[T]>, item: impl Fn(&T) -> Item) -> String {
    let mut out = String::new();
    for record in items.unwrap_or_default() {
        item(record).write_to(&mut out);
    }
    out.trim_end().to_string()
}

/// Trimmed field, `None` when absent or blank.
fn value(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn join<'a>(separator: &str, parts: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    let parts: Vec<&str> = parts.into_iter().flatten().collect();
    (!parts.is_empty()).then(|| parts.join(separator))
}

fn with_parenthetical(main: Option<String>, aside: Option<&str>) -> Option<String> {
    match (main, aside) {
        (Some(main), Some(aside)) => Some(format!("{main} ({aside})")),
        (Some(main), None) => Some(main),
        (None, aside) => aside.map(|a| format!("({a})")),
    }
}

fn lines(text: Option<&str>) -> impl Iterator<Item = &str> {
    text.unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
}
