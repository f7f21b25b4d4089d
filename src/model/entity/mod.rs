mod user;
pub use user::{UserEntity, UserEntityCreate};

mod course;
pub use course::{Course, CourseCreate, CourseWithStatusRow};

mod lesson;
pub use lesson::{Lesson, LessonCreate};

mod question;
pub use question::{Question, QuestionCreate};

mod choice;
pub use choice::{Choice, ChoiceCreate};

mod enrollment;
pub use enrollment::{Enrollment, EnrollmentMode};

mod submission;
pub use submission::{Submission, SubmissionCreate};
