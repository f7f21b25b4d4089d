use clap::{Parser, Subcommand};
use onlinecourse::error::{AppError, AppResult};
use onlinecourse::model::entity::{
    Choice,
    ChoiceCreate,
    Course,
    CourseCreate,
    Lesson,
    LessonCreate,
    Question,
    QuestionCreate,
    UserEntity,
    UserEntityCreate,
};
use onlinecourse::model::{CrudRepository, DatabaseError, DbConnection, ModelManager};

#[derive(Parser, Debug)]
#[command(about = "CLI tool for filling the course catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply pending database migrations
    Migrate,

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Manage courses
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },

    /// Manage lessons
    Lesson {
        #[command(subcommand)]
        action: LessonCommands,
    },

    /// Manage exam questions
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },

    /// Manage question choices
    Choice {
        #[command(subcommand)]
        action: ChoiceCommands,
    },
}

/// User management
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
    },
}

/// Course management
#[derive(Subcommand, Debug)]
pub enum CourseCommands {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
    },
}

/// Lesson management
#[derive(Subcommand, Debug)]
pub enum LessonCommands {
    Add {
        /// Course title to attach the lesson to
        #[arg(long)]
        course_title: String,
        #[arg(long)]
        title: String,
        /// Path to a Markdown file with lesson content
        #[arg(long)]
        file: String,
        #[arg(long, default_value_t = 0)]
        order_index: i32,
    },
}

/// Question management
#[derive(Subcommand, Debug)]
pub enum QuestionCommands {
    Add {
        /// Course title to attach the question to
        #[arg(long)]
        course_title: String,
        #[arg(long)]
        text: String,
        /// Points earned by a fully correct answer
        #[arg(long, default_value_t = 1)]
        grade: i32,
    },
}

/// Choice management
#[derive(Subcommand, Debug)]
pub enum ChoiceCommands {
    Add {
        /// Question text to attach the choice to
        #[arg(long)]
        question_text: String,
        #[arg(long)]
        text: String,
        #[arg(long, default_value_t = false)]
        is_correct: bool,
    },
}

async fn find_id(mm: &ModelManager, query: &'static str, key: &str) -> AppResult<i64> {
    let id = sqlx::query_scalar(query)
        .bind(key)
        .fetch_one(mm.executor())
        .await
        .map_err(DatabaseError::SqlxError)?;
    Ok(id)
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    let args = Cli::parse();

    let database_url = std::env::var(onlinecourse::config::DATABASE_URL_ENV)
        .map_err(|e| AppError::IoError(std::io::Error::other(format!("DATABASE_URL: {e}"))))?;
    let db_con = DbConnection::connect(&database_url)?;
    let mm = ModelManager::new(db_con.clone());

    match args.command {
        Commands::Migrate => {
            db_con.migrate().await?;
            println!("Migrations applied");
        }

        Commands::User { action } => match action {
            UserCommands::Add { username, password, first_name, last_name } => {
                let user = UserEntity::create(
                    &mm,
                    UserEntityCreate {
                        username,
                        password_hash: onlinecourse::auth::hash_password(&password)?,
                        first_name,
                        last_name,
                    },
                )
                .await?;
                println!("User created: {} ({})", user.username(), user.id());
            }
        },

        Commands::Course { action } => match action {
            CourseCommands::Add { title, description } => {
                let course = Course::create(&mm, CourseCreate { title, description }).await?;
                println!("Course created: {} ({})", course.title(), course.id());
            }
        },

        Commands::Lesson { action } => match action {
            LessonCommands::Add { course_title, title, file, order_index } => {
                let course_id =
                    find_id(&mm, "SELECT id FROM courses WHERE title = $1", &course_title).await?;

                let content = std::fs::read_to_string(file)?;
                let lesson = Lesson::create(
                    &mm,
                    LessonCreate {
                        course_id,
                        title,
                        content,
                        order_index: Some(order_index),
                    },
                )
                .await?;
                println!("Lesson created: {} ({})", lesson.title(), lesson.id());
            }
        },

        Commands::Question { action } => match action {
            QuestionCommands::Add { course_title, text, grade } => {
                let course_id =
                    find_id(&mm, "SELECT id FROM courses WHERE title = $1", &course_title).await?;

                let question = Question::create(
                    &mm,
                    QuestionCreate {
                        course_id,
                        question_text: text,
                        grade,
                    },
                )
                .await?;
                println!("Question created: {:?}", question);
            }
        },

        Commands::Choice { action } => match action {
            ChoiceCommands::Add { question_text, text, is_correct } => {
                let question_id = find_id(
                    &mm,
                    "SELECT id FROM questions WHERE question_text = $1",
                    &question_text,
                )
                .await?;

                Choice::create(
                    &mm,
                    ChoiceCreate {
                        question_id,
                        choice_text: text,
                        is_correct: Some(is_correct),
                    },
                )
                .await?;

                for choice in Choice::find_all_by_question(&mm, question_id).await? {
                    let mark = if choice.is_correct() { "x" } else { " " };
                    println!("[{mark}] {} {}", choice.id(), choice.choice_text());
                }
            }
        },
    }

    Ok(())
}
