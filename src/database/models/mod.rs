pub mod teacher;
pub mod student;
pub mod lesson_template;
pub mod lesson_instance;

pub use teacher::*;
pub use student::*;
pub use lesson_template::*;
pub use lesson_instance::*;
