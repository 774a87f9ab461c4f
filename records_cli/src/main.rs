use anyhow::Result;
/// Records CLI - terminal frontend for the academic records API
///
/// Create, look up, list and delete categories, careers and students.
use clap::{Parser, Subcommand};
use records_cli::prompt::{confirm, pick};
use records_cli::render::{render_card, render_table};
use records_cli::{ApiClient, DEFAULT_BASE_URL};
use records_core::{CareerDraft, CategoryDraft, StudentDraft};
use std::io::{self, StdinLock, Stdout};

#[derive(Parser)]
#[command(name = "records-cli")]
#[command(about = "Academic Records - categories, careers and students", long_about = None)]
struct Cli {
    /// Base URL of the records API
    #[arg(long, env = "RECORDS_API_URL", default_value = DEFAULT_BASE_URL)]
    url: String,

    /// Shared bearer token
    #[arg(long, env = "RECORDS_API_KEY", default_value = "12345ABCDEF", hide_env_values = true)]
    api_key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage careers
    Career {
        #[command(subcommand)]
        action: CareerAction,
    },
    /// Manage students
    Student {
        #[command(subcommand)]
        action: StudentAction,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Register a new category
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Show one category
    Get { id: u64 },
    /// Delete a category (refused while careers belong to it)
    Delete {
        id: u64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List all categories
    List,
}

#[derive(Subcommand)]
enum CareerAction {
    /// Register a new career; without --category a category is picked from the list
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
    },
    /// Show one career
    Get { id: u64 },
    /// Delete a career (refused while students are enrolled)
    Delete {
        id: u64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// List all careers
    List,
}

#[derive(Subcommand)]
enum StudentAction {
    /// Register a new student; without --career a career is picked from the list
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        career: Option<String>,
    },
    /// Show one student
    Get { id: u64 },
    /// Delete a student
    Delete {
        id: u64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
        /// Career table to refresh afterwards
        #[arg(short, long)]
        career: Option<String>,
    },
    /// List the students of one career
    List {
        #[arg(short, long)]
        career: Option<String>,
    },
}

/// Terminal handles shared by the command handlers
struct Console {
    input: StdinLock<'static>,
    output: Stdout,
}

impl Console {
    fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        confirm(&mut self.input, &mut self.output, question)
    }

    fn pick(&mut self, label: &str, options: Vec<String>) -> Result<String> {
        pick(&mut self.input, &mut self.output, label, &options)
    }
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));

    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url, &cli.api_key)?;
    let mut console = Console::new();

    match cli.command {
        Commands::Category { action } => run_category(&client, &mut console, action),
        Commands::Career { action } => run_career(&client, &mut console, action),
        Commands::Student { action } => run_student(&client, &mut console, action),
    }
}

fn run_category(client: &ApiClient, console: &mut Console, action: CategoryAction) -> Result<()> {
    match action {
        CategoryAction::Create { name, description } => {
            let draft = CategoryDraft {
                name: Some(name),
                description,
            };
            let category = client.create_category(&draft)?;
            println!("Category registered (ID {}).\n", category.id);
            show_categories(client)?;
        }
        CategoryAction::Get { id } => {
            let category = client.get_category(id)?;
            println!("{}", render_card("Category", &category));
        }
        CategoryAction::Delete { id, yes } => {
            if !yes && !console.confirm(&format!("Delete category ID {}?", id))? {
                println!("Cancelled.");
                return Ok(());
            }
            println!("{}\n", client.delete_category(id)?);
            show_categories(client)?;
        }
        CategoryAction::List => show_categories(client)?,
    }
    Ok(())
}

fn run_career(client: &ApiClient, console: &mut Console, action: CareerAction) -> Result<()> {
    match action {
        CareerAction::Create {
            name,
            category,
            duration,
            description,
            emoji,
        } => {
            let category = match category {
                Some(category) => category,
                None => {
                    let names = client.list_categories()?.into_iter().map(|c| c.name).collect();
                    console.pick("category", names)?
                }
            };
            let draft = CareerDraft {
                name: Some(name),
                duration,
                description,
                category: Some(category),
                emoji,
            };
            let career = client.create_career(&draft)?;
            println!("Career registered (ID {}).\n", career.id);
            show_careers(client)?;
        }
        CareerAction::Get { id } => {
            let career = client.get_career(id)?;
            println!("{}", render_card("Career", &career));
        }
        CareerAction::Delete { id, yes } => {
            if !yes && !console.confirm(&format!("Delete career ID {}?", id))? {
                println!("Cancelled.");
                return Ok(());
            }
            println!("{}\n", client.delete_career(id)?);
            show_careers(client)?;
        }
        CareerAction::List => show_careers(client)?,
    }
    Ok(())
}

fn run_student(client: &ApiClient, console: &mut Console, action: StudentAction) -> Result<()> {
    match action {
        StudentAction::Create { name, career } => {
            let career = match career {
                Some(career) => career,
                None => pick_career(client, console)?,
            };
            let student = client.create_student(&StudentDraft::new(&name, &career))?;
            println!("Student registered (ID {}).\n", student.id);
            show_students(client, &career)?;
        }
        StudentAction::Get { id } => {
            let student = client.get_student(id)?;
            println!("{}", render_card("Student", &student));
        }
        StudentAction::Delete { id, yes, career } => {
            if !yes && !console.confirm(&format!("Delete student ID {}?", id))? {
                println!("Cancelled.");
                return Ok(());
            }
            println!("{}", client.delete_student(id)?);
            if let Some(career) = career {
                println!();
                show_students(client, &career)?;
            }
        }
        StudentAction::List { career } => {
            let career = match career {
                Some(career) => career,
                None => pick_career(client, console)?,
            };
            show_students(client, &career)?;
        }
    }
    Ok(())
}

fn pick_career(client: &ApiClient, console: &mut Console) -> Result<String> {
    let names = client.list_careers()?.into_iter().map(|c| c.name).collect();
    console.pick("career", names)
}

fn show_categories(client: &ApiClient) -> Result<()> {
    println!("{}", render_table("Categories", &client.list_categories()?));
    Ok(())
}

fn show_careers(client: &ApiClient) -> Result<()> {
    println!("{}", render_table("Careers", &client.list_careers()?));
    Ok(())
}

fn show_students(client: &ApiClient, career: &str) -> Result<()> {
    let title = format!("Students in {}", career);
    println!("{}", render_table(&title, &client.students_by_career(career)?));
    Ok(())
}
