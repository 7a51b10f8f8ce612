//! Git course.

use crate::domain::{
    CodeLesson, Course, Lesson, LessonBody, Level, Project, Question, Quiz, Section, Subtopic,
};
use crate::library::AssetLoader;
use crate::schema::ContentError;

pub const ID: &str = "git";

pub fn course(loader: &dyn AssetLoader) -> Result<Course, ContentError> {
    Ok(Course::new(
        ID,
        "Git",
        "Track changes, branch safely and collaborate through pull requests.",
    )
    .with_icon("git-branch")
    .with_color("red")
    .with_summary(5, 5)
    .with_section(essentials())
    .with_section(collaboration(loader)?))
}

fn essentials() -> Section {
    Section::new("essentials", "Git Essentials", Level::Basic)
        .with_lesson(Lesson::new(
            "why-version-control",
            "Why Version Control?",
            "10 min",
            LessonBody::text(
                "Version control records every change to your files, who made it and \
                 why. You can return to any earlier state, work on features in isolation \
                 and combine work from many people without emailing zip files around.",
            ),
        ))
        .with_lesson(Lesson::new(
            "first-commit",
            "Your First Commit",
            "20 min",
            LessonBody::subtopics(vec![
                Subtopic::new(
                    "The three areas",
                    "Working tree, staging area (index) and repository.",
                )
                .with_code(
                    CodeLesson::new(
                        "Init, stage, commit",
                        "git init\ngit add index.html\ngit commit -m \"Add home page\"",
                        "git add moves changes into the staging area; git commit records them.",
                    )
                    .with_image("[diagram: working tree -> index -> repository]"),
                ),
                Subtopic::new("Inspecting history", "git status, git diff and git log.")
                    .with_code(CodeLesson::new(
                        "Compact log",
                        "git log --oneline --graph --decorate",
                        "Shows one line per commit with branch pointers drawn as a graph.",
                    )),
            ]),
        ))
        .with_lesson(Lesson::new(
            "undoing",
            "Undoing Changes",
            "15 min",
            LessonBody::text(
                "git restore <file> discards working tree changes; git restore --staged \
                 <file> unstages them. git commit --amend rewrites the last commit, and \
                 git revert <commit> creates a new commit that undoes an old one without \
                 rewriting history, which is the safe choice on shared branches.",
            ),
        ))
        .with_quiz(Quiz::new(
            "essentials-quiz",
            "Essentials Quiz",
            vec![
                Question::new(
                    "q1",
                    "Which command moves changes into the staging area?",
                    ["git commit", "git add", "git push", "git stage-all"],
                    1,
                ),
                Question::new(
                    "q2",
                    "Which command safely undoes a commit on a shared branch?",
                    ["git reset --hard", "git revert", "git commit --amend"],
                    1,
                ),
            ],
        ))
}

fn collaboration(loader: &dyn AssetLoader) -> Result<Section, ContentError> {
    Ok(Section::new("collaboration", "Branching and Collaboration", Level::Intermediate)
        .with_lesson(Lesson::new(
            "branching",
            "Branching and Merging",
            "30 min",
            LessonBody::markdown(loader.load_lesson_body("git/branching.md")?),
        ))
        .with_lesson(Lesson::new(
            "remotes",
            "Remotes and Pull Requests",
            "25 min",
            LessonBody::text(
                "A remote is another copy of the repository, usually named origin. git \
                 fetch downloads new commits, git pull fetches and merges, and git push \
                 uploads your branch. On hosted platforms a pull request proposes merging \
                 your branch and gives reviewers a place to comment.",
            ),
        ))
        .with_quiz(Quiz::new(
            "collaboration-quiz",
            "Collaboration Quiz",
            vec![Question::new(
                "q1",
                "Which flag deletes a branch even if it is unmerged?",
                ["-d", "-D", "--prune", "-m"],
                1,
            )],
        ))
        .with_project(Project::new(
            "team-workflow",
            "Team Workflow",
            "With a partner, each create a feature branch on a shared repository, \
             open pull requests and resolve one deliberate merge conflict.",
            "Both pull requests are merged and git log --graph shows both branches \
             joining main.",
        )))
}
