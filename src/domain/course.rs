//! Courses and their sections.

use serde::{Deserialize, Serialize};

use super::lesson::Lesson;
use super::level::Level;
use super::project::Project;
use super::quiz::Quiz;

/// Top-level content unit (e.g. "CSS", "SQL")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Identifier, unique within a catalog
    pub id: String,

    /// Display title
    pub title: String,

    /// Short summary shown on the course card
    #[serde(default)]
    pub description: String,

    /// Icon reference understood by the front-end
    #[serde(default)]
    pub icon: String,

    /// Color token understood by the front-end
    #[serde(default)]
    pub color: String,

    /// Sections in display order
    pub sections: Vec<Section>,

    /// Summary lesson counter as authored; the catalog recomputes it
    #[serde(default)]
    pub total_lessons: u32,

    /// Author estimate of the time needed to finish the course
    pub estimated_hours: u32,
}

impl Course {
    /// Create a course with no sections
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: String::new(),
            color: String::new(),
            sections: Vec::new(),
            total_lessons: 0,
            estimated_hours: 0,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the author-supplied summary counters
    pub fn with_summary(mut self, total_lessons: u32, estimated_hours: u32) -> Self {
        self.total_lessons = total_lessons;
        self.estimated_hours = estimated_hours;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Look up a section by ID
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Iterate over every lesson in display order
    pub fn lessons(&self) -> impl Iterator<Item = &Lesson> {
        self.sections.iter().flat_map(|s| s.lessons.iter())
    }

    /// Number of lessons actually present in the tree
    pub fn lesson_count(&self) -> usize {
        self.lessons().count()
    }

    /// Number of quiz questions across all sections
    pub fn question_count(&self) -> usize {
        self.sections
            .iter()
            .filter_map(|s| s.quiz.as_ref())
            .map(|q| q.questions.len())
            .sum()
    }

    /// Number of projects across all sections
    pub fn project_count(&self) -> usize {
        self.sections.iter().map(|s| s.projects.len()).sum()
    }

    /// Sum of parseable lesson durations, in minutes
    pub fn lesson_minutes(&self) -> u32 {
        self.lessons().filter_map(Lesson::duration_minutes).sum()
    }

    /// Lowest and highest section level, if the course has sections
    pub fn level_span(&self) -> Option<(Level, Level)> {
        let min = self.sections.iter().map(|s| s.level).min()?;
        let max = self.sections.iter().map(|s| s.level).max()?;
        Some((min, max))
    }

    /// Whether the author-supplied lesson counter matches the tree
    pub fn has_lesson_drift(&self) -> bool {
        self.total_lessons as usize != self.lesson_count()
    }
}

/// A difficulty-leveled grouping of lessons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Identifier, unique within its course
    pub id: String,

    pub title: String,

    pub level: Level,

    /// Lessons in display order
    pub lessons: Vec<Lesson>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Quiz>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>, level: Level) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            level,
            lessons: Vec::new(),
            quiz: None,
            projects: Vec::new(),
        }
    }

    pub fn with_lesson(mut self, lesson: Lesson) -> Self {
        self.lessons.push(lesson);
        self
    }

    pub fn with_quiz(mut self, quiz: Quiz) -> Self {
        self.quiz = Some(quiz);
        self
    }

    pub fn with_project(mut self, project: Project) -> Self {
        self.projects.push(project);
        self
    }

    /// Look up a lesson by ID
    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == id)
    }
}
