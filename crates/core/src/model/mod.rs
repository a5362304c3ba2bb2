mod mode;
mod question;

pub use mode::QuizMode;
pub use question::Question;
