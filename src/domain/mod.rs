//! Content schema for the course library.
//!
//! The tree is strictly compositional:
//! - Course → Section (ordered)
//! - Section → Lesson (ordered), optional Quiz, Projects
//! - Lesson → LessonBody (text, markdown or subtopics)
//! - Subtopic → CodeLesson

pub mod course;
pub mod lesson;
pub mod level;
pub mod project;
pub mod quiz;

// Re-export commonly used types
pub use course::{Course, Section};
pub use lesson::{CodeLesson, Lesson, LessonBody, Subtopic};
pub use level::Level;
pub use project::Project;
pub use quiz::{Question, Quiz, MIN_OPTIONS};
