//! Domain entities - the core business objects.

mod tutorial;

pub use tutorial::{NewTutorial, Tutorial, TutorialChanges, TutorialFilter, TutorialId};
