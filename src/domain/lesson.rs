//! Lessons and their bodies.
//!
//! A lesson body is exactly one of plain text, markdown or a list of
//! subtopics. Consumers match on [`LessonBody`] and handle every variant.

use serde::{Deserialize, Serialize};

/// A single teachable unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    /// Identifier, unique within its section
    pub id: String,

    /// Display title
    pub title: String,

    /// Free-text duration as authored ("15 min", "1 hour")
    pub duration: String,

    /// Lesson content
    pub body: LessonBody,
}

impl Lesson {
    /// Create a new lesson
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration: impl Into<String>,
        body: LessonBody,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration: duration.into(),
            body,
        }
    }

    /// Best-effort duration in minutes, parsed from the free-text field.
    ///
    /// Ranges resolve to their upper bound. Returns `None` when no
    /// number with a recognizable unit is present.
    pub fn duration_minutes(&self) -> Option<u32> {
        parse_duration_minutes(&self.duration)
    }
}

/// Content of a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LessonBody {
    /// Flat prose
    Text(String),

    /// Raw markdown, rendered by the presentation layer
    Markdown(String),

    /// Structured breakdown into subtopics
    Subtopics(Vec<Subtopic>),
}

impl LessonBody {
    /// Tags accepted in the `kind` field of a serialized body
    pub const KINDS: &'static [&'static str] = &["text", "markdown", "subtopics"];

    /// Plain text body
    pub fn text(content: impl Into<String>) -> Self {
        LessonBody::Text(content.into())
    }

    /// Markdown body
    pub fn markdown(content: impl Into<String>) -> Self {
        LessonBody::Markdown(content.into())
    }

    /// Subtopic body
    pub fn subtopics(subtopics: Vec<Subtopic>) -> Self {
        LessonBody::Subtopics(subtopics)
    }

    /// Serialized tag of this variant
    pub fn kind(&self) -> &'static str {
        match self {
            LessonBody::Text(_) => "text",
            LessonBody::Markdown(_) => "markdown",
            LessonBody::Subtopics(_) => "subtopics",
        }
    }

    /// True when the populated variant carries no content
    pub fn is_empty(&self) -> bool {
        match self {
            LessonBody::Text(s) | LessonBody::Markdown(s) => s.trim().is_empty(),
            LessonBody::Subtopics(subtopics) => subtopics.is_empty(),
        }
    }
}

/// A named sub-unit of a lesson
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtopic {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub code_lessons: Vec<CodeLesson>,
}

impl Subtopic {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            code_lessons: Vec::new(),
        }
    }

    /// Attach a code example
    pub fn with_code(mut self, code_lesson: CodeLesson) -> Self {
        self.code_lessons.push(code_lesson);
        self
    }
}

/// An illustrative code snippet with explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeLesson {
    pub title: String,

    /// Source snippet, kept verbatim
    pub code: String,

    pub explanation: String,

    /// Image URL or placeholder token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CodeLesson {
    pub fn new(
        title: impl Into<String>,
        code: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            code: code.into(),
            explanation: explanation.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

enum Token {
    Number(f64),
    Word(String),
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut number = String::new();
    let mut word = String::new();

    let flush = |number: &mut String, word: &mut String, tokens: &mut Vec<Token>| {
        if !number.is_empty() {
            if let Ok(n) = number.parse::<f64>() {
                tokens.push(Token::Number(n));
            }
            number.clear();
        }
        if !word.is_empty() {
            tokens.push(Token::Word(std::mem::take(word)));
        }
    };

    for c in text.chars() {
        if c.is_ascii_digit() || (c == '.' && !number.is_empty()) {
            if !word.is_empty() {
                flush(&mut number, &mut word, &mut tokens);
            }
            number.push(c);
        } else if c.is_alphabetic() {
            if !number.is_empty() {
                flush(&mut number, &mut word, &mut tokens);
            }
            word.extend(c.to_lowercase());
        } else {
            flush(&mut number, &mut word, &mut tokens);
        }
    }
    flush(&mut number, &mut word, &mut tokens);

    tokens
}

fn unit_minutes(word: &str) -> Option<f64> {
    match word {
        "h" | "hr" | "hrs" | "hour" | "hours" => Some(60.0),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(1.0),
        _ => None,
    }
}

fn parse_duration_minutes(text: &str) -> Option<u32> {
    let mut total = 0.0;
    let mut pending: Option<f64> = None;
    let mut matched = false;

    for token in tokenize(text) {
        match token {
            // A later number replaces an earlier one, so "20-30 min" is 30
            Token::Number(n) => pending = Some(n),
            Token::Word(w) => {
                if let Some(factor) = unit_minutes(&w) {
                    if let Some(n) = pending.take() {
                        total += n * factor;
                        matched = true;
                    }
                }
            }
        }
    }

    if matched {
        Some(total.round() as u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson_with_duration(duration: &str) -> Lesson {
        Lesson::new("l", "L", duration, LessonBody::text("x"))
    }

    #[test]
    fn test_duration_minutes() {
        assert_eq!(lesson_with_duration("15 min").duration_minutes(), Some(15));
        assert_eq!(lesson_with_duration("1 hour").duration_minutes(), Some(60));
        assert_eq!(lesson_with_duration("1h 30m").duration_minutes(), Some(90));
        assert_eq!(lesson_with_duration("1.5 hours").duration_minutes(), Some(90));
        assert_eq!(lesson_with_duration("20-30 min").duration_minutes(), Some(30));
        assert_eq!(lesson_with_duration("20 to 30 Minutes").duration_minutes(), Some(30));
        assert_eq!(lesson_with_duration("self-paced").duration_minutes(), None);
        assert_eq!(lesson_with_duration("").duration_minutes(), None);
    }

    #[test]
    fn test_body_serializes_with_kind_tag() {
        let body = LessonBody::markdown("# Title");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kind"], "markdown");
        assert_eq!(json["value"], "# Title");

        let body = LessonBody::subtopics(vec![Subtopic::new("Selectors", "Picking elements")]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kind"], "subtopics");
        assert_eq!(json["value"][0]["codeLessons"], serde_json::json!([]));
    }

    #[test]
    fn test_body_is_empty() {
        assert!(LessonBody::text("   ").is_empty());
        assert!(LessonBody::subtopics(Vec::new()).is_empty());
        assert!(!LessonBody::markdown("content").is_empty());
    }

    #[test]
    fn test_code_lesson_image_omitted_when_absent() {
        let code = CodeLesson::new("Hello", "print('hi')", "Prints a greeting");
        let json = serde_json::to_value(&code).unwrap();
        assert!(json.get("image").is_none());

        let code = code.with_image("[diagram]");
        let json = serde_json::to_value(&code).unwrap();
        assert_eq!(json["image"], "[diagram]");
    }
}
