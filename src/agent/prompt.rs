//! Prompt object model.
//!
//! A prompt is an ordered list of titled sections. Each section may carry a
//! body paragraph, bullet points and nested subsections. The platform accepts
//! the structured form directly (`pom`); the Markdown form is for humans.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A titled block of prompt text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptSection {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subsections: Vec<PromptSection>,
}

impl PromptSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the body paragraph.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Append bullet points.
    pub fn bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets.extend(bullets.into_iter().map(Into::into));
        self
    }

    /// Append a nested subsection.
    pub fn subsection(mut self, section: PromptSection) -> Self {
        self.subsections.push(section);
        self
    }

    fn write_markdown(&self, out: &mut String, level: usize) {
        out.push_str(&"#".repeat(level.min(6)));
        out.push(' ');
        out.push_str(&self.title);
        out.push_str("\n\n");

        if !self.body.is_empty() {
            out.push_str(&self.body);
            out.push_str("\n\n");
        }

        if !self.bullets.is_empty() {
            for bullet in &self.bullets {
                out.push_str("- ");
                out.push_str(bullet);
                out.push('\n');
            }
            out.push('\n');
        }

        for sub in &self.subsections {
            sub.write_markdown(out, level + 1);
        }
    }
}

/// Ordered collection of prompt sections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prompt {
    sections: Vec<PromptSection>,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_section(&mut self, section: PromptSection) {
        self.sections.push(section);
    }

    pub fn sections(&self) -> &[PromptSection] {
        &self.sections
    }

    /// Find a section by title.
    pub fn section(&self, title: &str) -> Option<&PromptSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Structured form, as embedded in SWML.
    pub fn to_pom(&self) -> Value {
        Value::Array(
            self.sections
                .iter()
                .map(|s| serde_json::to_value(s).unwrap_or(Value::Null))
                .collect(),
        )
    }

    /// Render as Markdown, top-level sections as `##` headings.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            section.write_markdown(&mut out, 2);
        }
        out.trim_end().to_string()
    }
}

impl FromIterator<PromptSection> for Prompt {
    fn from_iter<I: IntoIterator<Item = PromptSection>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}
