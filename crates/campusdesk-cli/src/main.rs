use anyhow::Context;
use campusdesk_cli::seeder::{self, SeedConfig};
use campusdesk_config::{DatabaseConfig, EncryptionConfig};
use campusdesk_crypto::FieldCipher;
use campusdesk_db::{PgPool, init_db_pool, run_migrations};
use campusdesk_observability::init_basic_console_logging;
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusdesk-cli")]
#[command(about = "Campusdesk CLI - Administrative tools for Campusdesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending database migrations
    Migrate,
    /// Seed the database with fake institutions, students, staff and vacancies
    Seed {
        /// Number of institutions to create
        #[arg(short = 'i', long, default_value = "5")]
        institutions: usize,

        /// Number of facilities per institution
        #[arg(long, default_value = "4")]
        facilities: usize,

        /// Number of faculties per institution
        #[arg(long, default_value = "3")]
        faculties: usize,

        /// Number of departments per faculty
        #[arg(long, default_value = "2")]
        departments: usize,

        /// Number of programs per department
        #[arg(long, default_value = "2")]
        programs: usize,

        /// Number of students per institution
        #[arg(long, default_value = "50")]
        students: usize,

        /// Number of payments per student
        #[arg(long, default_value = "2")]
        payments: usize,

        /// Number of staff per institution
        #[arg(long, default_value = "10")]
        staff: usize,

        /// Number of vacancies per institution
        #[arg(long, default_value = "2")]
        vacancies: usize,
    },
    /// Delete all institutional data (keeps mirrored users)
    Clear {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    if let Err(e) = init_basic_console_logging() {
        eprintln!("Logging unavailable: {}", e);
    }

    let cli = Cli::parse();

    let result = match connect().await {
        Ok(pool) => match cli.command {
            Commands::Migrate => handle_migrate(&pool).await,
            Commands::Seed {
                institutions,
                facilities,
                faculties,
                departments,
                programs,
                students,
                payments,
                staff,
                vacancies,
            } => {
                let config = SeedConfig::new(institutions)
                    .with_facilities(facilities)
                    .with_faculties(faculties)
                    .with_departments(departments)
                    .with_programs(programs)
                    .with_students(students)
                    .with_payments(payments)
                    .with_staff(staff)
                    .with_vacancies(vacancies);
                handle_seed(&pool, config).await
            }
            Commands::Clear { yes } => handle_clear(&pool, yes).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    init_db_pool(&config)
        .await
        .context("Failed to connect to database")
}

async fn handle_migrate(pool: &PgPool) -> anyhow::Result<()> {
    println!("📦 Applying migrations...");
    run_migrations(pool)
        .await
        .context("Failed to apply migrations")?;
    println!("✅ Database is up to date");
    Ok(())
}

async fn handle_seed(pool: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let encryption =
        EncryptionConfig::from_env().context("FIELD_ENCRYPTION_KEY is missing or invalid")?;
    let cipher = FieldCipher::from_config(&encryption);

    println!("\n🌱 Starting database seeding...");
    println!("   Institutions: {}", config.institutions);
    println!(
        "   Per institution: {} facilities, {} faculties, {} students, {} staff, {} vacancies",
        config.facilities_per_institution,
        config.faculties_per_institution,
        config.students_per_institution,
        config.staff_per_institution,
        config.vacancies_per_institution
    );
    println!(
        "   Per faculty: {} departments, each with {} programs",
        config.departments_per_faculty, config.programs_per_department
    );
    println!("   Payments per student: {}\n", config.payments_per_student);

    let summary = seeder::seed_all(pool, &cipher, &config)
        .await
        .context("Seeding failed")?;

    println!("\n📊 Summary:");
    println!("   Institutions:   {}", summary.institutions);
    println!("   Facilities:     {}", summary.facilities);
    println!("   Faculties:      {}", summary.faculties);
    println!("   Departments:    {}", summary.departments);
    println!("   Programs:       {}", summary.programs);
    println!("   Fee structures: {}", summary.fee_structures);
    println!("   Users:          {}", summary.users);
    println!("   Students:       {}", summary.students);
    println!("   Payments:       {}", summary.payments);
    println!("   Staff:          {}", summary.staff);
    println!("   Vacancies:      {}", summary.vacancies);
    Ok(())
}

async fn handle_clear(pool: &PgPool, yes: bool) -> anyhow::Result<()> {
    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete all institutions, students, staff and related records?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Aborted");
            return Ok(());
        }
    }

    let deleted = seeder::clear_all(pool).await.context("Clearing failed")?;
    println!("✅ Cleared {} top-level records", deleted);
    Ok(())
}
