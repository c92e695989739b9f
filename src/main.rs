use std::path::PathBuf;

use anyhow::Context;
use booking_records::config::Config;
use booking_records::engine::local_today;
use booking_records::{export, report, Booking, BookingStore, MemoryStore, PgStore, QueryEngine};
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use serde::Serialize;

#[derive(Parser)]
#[command(name = "booking-records")]
#[command(about = "Booking records query and dashboard tool", long_about = None)]
struct Cli {
    /// Use an in-process store seeded with random bookings instead of Postgres
    #[arg(long, global = true)]
    memory: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BookingArgs {
    #[arg(long)]
    booking_id: Option<String>,
    #[arg(long)]
    customer_name: Option<String>,
    #[arg(long)]
    hotel_name: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    check_in_date: Option<String>,
    #[arg(long)]
    check_out_date: Option<String>,
}

impl From<BookingArgs> for Booking {
    fn from(args: BookingArgs) -> Self {
        Booking {
            id: None,
            booking_id: args.booking_id,
            customer_name: args.customer_name,
            hotel_name: args.hotel_name,
            status: args.status,
            check_in_date: args.check_in_date,
            check_out_date: args.check_out_date,
            created_at: None,
        }
    }
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    hotel: Option<String>,
    #[arg(long)]
    from: Option<String>,
    #[arg(long)]
    to: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// List every booking
    List,
    /// Show one booking
    Get { id: String },
    /// Create a booking
    Create {
        #[command(flatten)]
        booking: BookingArgs,
    },
    /// Replace a booking
    Update {
        id: String,
        #[command(flatten)]
        booking: BookingArgs,
    },
    /// Replace a booking (same full replace as update)
    Edit {
        id: String,
        #[command(flatten)]
        booking: BookingArgs,
    },
    /// Delete a booking
    Delete { id: String },
    /// Bookings whose status contains the pattern
    ByStatus {
        #[arg(long)]
        status: Option<String>,
    },
    /// Bookings whose hotel name contains the pattern
    ByHotel {
        #[arg(long)]
        hotel: Option<String>,
    },
    /// Bookings created within a date range
    ByDate {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Bookings created on one day
    ByDay {
        #[arg(long)]
        date: Option<String>,
    },
    /// Bookings checking in today or later
    Upcoming,
    /// One page of bookings
    Paged {
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        page: i64,
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        page_size: i64,
    },
    /// Bookings matching every given filter, newest first
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Booking counts per status
    StatusCount,
    /// Booking counts per hotel
    HotelCount,
    /// Booking counts per creation day
    Trend,
    /// Total, confirmed, pending and cancelled counts
    DashboardSummary,
    /// Summary plus every chart
    DashboardData,
    /// Insert random bookings
    Generate {
        #[arg(long, default_value_t = 50, allow_negative_numbers = true)]
        count: i64,
    },
    /// Write the dashboard as a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[arg(long, default_value_t = 14)]
        trend_days: usize,
    },
    /// Export filtered bookings to CSV
    Export {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value = "bookings.csv")]
        out: PathBuf,
    },
}

const MEMORY_SEED: i64 = 50;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();

    if cli.memory {
        let engine = QueryEngine::new(MemoryStore::new());
        engine.generate_random(MEMORY_SEED).await?;
        return run(&engine, cli.command).await;
    }

    let config = Config::from_env()?;
    let store = PgStore::connect(config.database_url()?, config.max_connections)
        .await
        .context("failed to connect to Postgres")?;
    log::info!("connected to Postgres");

    if let Commands::InitDb = cli.command {
        store.migrate().await?;
        println!("Schema ready.");
        return Ok(());
    }

    run(&QueryEngine::new(store), cli.command).await
}

async fn run<S: BookingStore>(engine: &QueryEngine<S>, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::InitDb => {
            println!("In-memory store needs no schema.");
        }
        Commands::List => print_json(&engine.get_all().await?)?,
        Commands::Get { id } => match engine.get_by_id(&id).await? {
            Some(booking) => print_json(&booking)?,
            None => println!("Booking not found"),
        },
        Commands::Create { booking } => {
            let stored = engine.create(booking.into()).await?;
            print_json(&stored)?;
            println!("Booking created successfully");
        }
        Commands::Update { id, booking } => {
            if engine.update(&id, booking.into()).await? {
                println!("Booking updated successfully");
            } else {
                println!("Booking not found");
            }
        }
        Commands::Edit { id, booking } => {
            if engine.update(&id, booking.into()).await? {
                println!("Booking edited successfully");
            } else {
                println!("Booking not found");
            }
        }
        Commands::Delete { id } => {
            if engine.get_by_id(&id).await?.is_none() {
                println!("Booking not found");
            } else {
                engine.delete(&id).await?;
                println!("Booking deleted successfully");
            }
        }
        Commands::ByStatus { status } => print_json(&engine.by_status(status.as_deref()).await?)?,
        Commands::ByHotel { hotel } => print_json(&engine.by_hotel(hotel.as_deref()).await?)?,
        Commands::ByDate { from, to } => {
            print_json(&engine.by_date_range(from.as_deref(), to.as_deref()).await?)?
        }
        Commands::ByDay { date } => print_json(&engine.by_day(date.as_deref()).await?)?,
        Commands::Upcoming => print_json(&engine.upcoming_check_ins().await?)?,
        Commands::Paged { page, page_size } => {
            print_json(&engine.paginated(page, page_size).await?)?
        }
        Commands::Filter { filter } => {
            let bookings = engine
                .combined(
                    filter.status.as_deref(),
                    filter.hotel.as_deref(),
                    filter.from.as_deref(),
                    filter.to.as_deref(),
                )
                .await?;
            print_json(&bookings)?;
        }
        Commands::StatusCount => print_json(&engine.status_count().await)?,
        Commands::HotelCount => print_json(&engine.hotel_count().await)?,
        Commands::Trend => print_json(&engine.trend().await)?,
        Commands::DashboardSummary => print_json(&engine.dashboard_summary().await)?,
        Commands::DashboardData => print_json(&engine.dashboard_data().await)?,
        Commands::Generate { count } => {
            engine.generate_random(count).await?;
            println!("{count} random bookings inserted successfully");
        }
        Commands::Report { out, trend_days } => {
            let data = engine.dashboard_data().await;
            let report = report::build_report(&data, local_today(), trend_days);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { filter, out } => {
            let bookings = engine
                .combined(
                    filter.status.as_deref(),
                    filter.hotel.as_deref(),
                    filter.from.as_deref(),
                    filter.to.as_deref(),
                )
                .await?;
            export::export_to_path(&out, &bookings)?;
            println!("Exported {} bookings to {}.", bookings.len(), out.display());
        }
    }

    Ok(())
}
