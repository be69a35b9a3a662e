//! CLI for recording and browsing shift bookings.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use booking_tracker::classify::Classification;
use booking_tracker::error::BookingError;
use booking_tracker::models::{
    Booking, BookingDraft, BookingId, BookingTab, DailySummary, NaiveDate, Shift,
};
use booking_tracker::storage::{FileStorage, Storage};
use booking_tracker::store::BookingStore;
use clap::{Args, Parser, Subcommand};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};
use owo_colors::OwoColorize;

/// Environment variable overriding the storage directory.
const DATA_DIR_ENV: &str = "BOOKING_TRACKER_DATA_DIR";

/// Booking tracker — record day/night bookings and track payments.
#[derive(Debug, Parser)]
#[command(name = "bookings", version, about)]
struct Cli {
    /// Override the storage directory (default: $BOOKING_TRACKER_DATA_DIR,
    /// then the XDG data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Record a new booking.
    Add(AddArgs),
    /// List upcoming (active) or past (expired) bookings.
    List {
        /// Which view to show: `active` or `expired`.
        #[arg(long, default_value = "active")]
        tab: BookingTab,
    },
    /// Show bookings scheduled for today.
    Today,
    /// Set the advance payment of a booking.
    Pay {
        /// Booking identifier.
        id: String,
        /// New advance amount.
        #[arg(value_parser = parse_amount)]
        amount: f64,
    },
    /// Delete a booking.
    Delete {
        /// Booking identifier.
        id: String,
    },
    /// Show payment totals for a date.
    Summary {
        /// Date to summarize (YYYY-MM-DD, default: today).
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
}

/// Arguments for the `add` subcommand.
#[derive(Debug, Args)]
struct AddArgs {
    /// Booking date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,
    /// Shift: `day` or `night`.
    #[arg(long)]
    shift: Shift,
    /// Pickup address.
    #[arg(long)]
    pickup: String,
    /// Drop-off address.
    #[arg(long = "drop")]
    drop_address: String,
    /// Total price.
    #[arg(long, value_parser = parse_amount)]
    total: f64,
    /// Amount paid in advance.
    #[arg(long, value_parser = parse_amount, default_value = "0")]
    advance: f64,
}

impl AddArgs {
    /// Converts the arguments into a booking draft.
    fn into_draft(self) -> BookingDraft {
        BookingDraft {
            date: self.date,
            shift: self.shift,
            pickup_address: self.pickup,
            drop_address: self.drop_address,
            total_payment: self.total,
            advance_payment: self.advance,
        }
    }
}

/// Parses a date string in `YYYY-MM-DD` format for clap.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|err| format!("{err}"))
}

/// Parses a non-negative, finite monetary amount for clap.
fn parse_amount(s: &str) -> Result<f64, String> {
    let amount: f64 = s.parse().map_err(|err| format!("{err}"))?;
    if !amount.is_finite() || amount < 0.0_f64 {
        return Err(format!("amount must be a non-negative number, got {s}"));
    }
    Ok(amount)
}

/// Picks the storage directory: flag, then environment, then XDG default.
fn resolve_data_dir(
    flag: Option<PathBuf>,
    env_value: Option<String>,
) -> booking_tracker::error::Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    match env_value {
        Some(val) if !val.is_empty() => Ok(PathBuf::from(val)),
        _ => FileStorage::default_dir(),
    }
}

/// Runs the CLI, returning an appropriate exit code.
fn run() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let _dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let storage = match resolve_data_dir(cli.data_dir, std::env::var(DATA_DIR_ENV).ok())
        .and_then(FileStorage::new)
    {
        Ok(storage) => storage,
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to initialize storage: {err}",
                "error:".red().bold()
            )?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut store = BookingStore::open(storage);
    dispatch(&mut store, cli.command)
}

/// Dispatches to the appropriate subcommand handler.
fn dispatch<S: Storage>(store: &mut BookingStore<S>, command: Command) -> io::Result<ExitCode> {
    match command {
        Command::Add(args) => cmd_add(store, args),
        Command::List { tab } => {
            print_tab(&mut io::stdout().lock(), &store.classify_today(), tab)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Today => {
            print_today(&mut io::stdout().lock(), &store.classify_today())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Pay { id, amount } => cmd_pay(store, &BookingId::new(id), amount),
        Command::Delete { id } => cmd_delete(store, &BookingId::new(id)),
        Command::Summary { date } => {
            let day = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            print_summary(&mut io::stdout().lock(), day, &store.summary_for(day))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Executes the `add` subcommand.
fn cmd_add<S: Storage>(store: &mut BookingStore<S>, args: AddArgs) -> io::Result<ExitCode> {
    match store.add(args.into_draft()) {
        Ok(booking) => {
            let mut out = io::stdout().lock();
            writeln!(out, "{} {}", "Booking added:".green().bold(), booking.id)?;
            print_bookings_table(&mut out, "New booking", &[booking])?;
            Ok(ExitCode::SUCCESS)
        }
        Err(BookingError::SlotConflict { date, shift }) => {
            print_booking_full(&mut io::stderr().lock(), date, shift)?;
            Ok(ExitCode::FAILURE)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to save booking: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `pay` subcommand.
fn cmd_pay<S: Storage>(
    store: &mut BookingStore<S>,
    id: &BookingId,
    amount: f64,
) -> io::Result<ExitCode> {
    match store.update_advance_payment(id, amount) {
        Ok(Some(booking)) => {
            let mut out = io::stdout().lock();
            if booking.is_overpaid() {
                writeln!(
                    out,
                    "{} advance {:.2} exceeds total {:.2}",
                    "warning:".yellow().bold(),
                    booking.advance_payment,
                    booking.total_payment
                )?;
            }
            print_bookings_table(&mut out, "Updated booking", &[booking])?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(None) => {
            writeln!(
                io::stdout().lock(),
                "{}",
                format_args!("No booking with id {id}.").dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to update payment: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Executes the `delete` subcommand.
fn cmd_delete<S: Storage>(store: &mut BookingStore<S>, id: &BookingId) -> io::Result<ExitCode> {
    match store.delete(id) {
        Ok(true) => {
            writeln!(io::stdout().lock(), "{} {id}", "Deleted".green().bold())?;
            Ok(ExitCode::SUCCESS)
        }
        Ok(false) => {
            writeln!(
                io::stdout().lock(),
                "{}",
                format_args!("No booking with id {id}.").dimmed()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            writeln!(
                io::stderr().lock(),
                "{} failed to delete booking: {err}",
                "error:".red().bold()
            )?;
            Ok(ExitCode::FAILURE)
        }
    }
}

// ── Output formatting ────────────────────────────────────────────────

/// Prints the "booking full" notice for an occupied slot.
fn print_booking_full<W: Write>(out: &mut W, date: NaiveDate, shift: Shift) -> io::Result<()> {
    writeln!(out, "{}", "Booking full".red().bold())?;
    writeln!(
        out,
        "  The {} shift on {} is already booked. Pick another date or shift.",
        shift.bold(),
        date.bold()
    )
}

/// Prints the view selected by `tab`.
fn print_tab<W: Write>(out: &mut W, views: &Classification, tab: BookingTab) -> io::Result<()> {
    let title = match tab {
        BookingTab::Active => "Upcoming Bookings",
        BookingTab::Expired => "Booking History",
    };
    print_bookings_table(out, title, views.tab(tab))?;
    if tab == BookingTab::Active && views.notification_count() > 0 {
        writeln!(
            out,
            "{}",
            format_args!("{} trip(s) today", views.notification_count()).yellow()
        )?;
    }
    Ok(())
}

/// Prints today's bookings and their payment totals.
fn print_today<W: Write>(out: &mut W, views: &Classification) -> io::Result<()> {
    print_bookings_table(out, "Today's Trips", &views.today)?;
    if !views.today.is_empty() {
        let summary = views.today_summary();
        writeln!(
            out,
            "{} {:.2}   {} {:.2}",
            "Revenue:".bold(),
            summary.total_revenue,
            "Due:".bold(),
            summary.total_due
        )?;
    }
    Ok(())
}

/// Prints payment totals for one date.
fn print_summary<W: Write>(out: &mut W, date: NaiveDate, summary: &DailySummary) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        "Summary".green().bold(),
        format_args!("({date})").dimmed()
    )?;
    writeln!(out)?;

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Bookings").fg(Color::Cyan),
        Cell::new("Revenue").fg(Color::Cyan),
        Cell::new("Collected").fg(Color::Cyan),
        Cell::new("Due").fg(Color::Cyan),
    ]);
    _ = table.add_row(vec![
        Cell::new(summary.total_bookings),
        Cell::new(format!("{:.2}", summary.total_revenue)),
        Cell::new(format!("{:.2}", summary.total_collected())),
        due_cell(summary.total_due),
    ]);
    writeln!(out, "{table}")
}

/// Prints bookings in a table.
fn print_bookings_table<W: Write>(out: &mut W, title: &str, bookings: &[Booking]) -> io::Result<()> {
    if bookings.is_empty() {
        writeln!(out, "{}", "No bookings found.".dimmed())?;
        return Ok(());
    }

    let mut table = Table::new();
    _ = table.load_preset(UTF8_FULL);
    _ = table.set_header(vec![
        Cell::new("Date").fg(Color::Cyan),
        Cell::new("Shift").fg(Color::Cyan),
        Cell::new("Pickup").fg(Color::Cyan),
        Cell::new("Drop").fg(Color::Cyan),
        Cell::new("Total").fg(Color::Cyan),
        Cell::new("Advance").fg(Color::Cyan),
        Cell::new("Due").fg(Color::Cyan),
        Cell::new("ID").fg(Color::Cyan),
    ]);

    for booking in bookings {
        let shift_cell = match booking.shift {
            Shift::Day => Cell::new(booking.shift).fg(Color::Yellow),
            Shift::Night => Cell::new(booking.shift).fg(Color::Blue),
        };
        _ = table.add_row(vec![
            Cell::new(booking.date),
            shift_cell,
            Cell::new(&booking.pickup_address),
            Cell::new(&booking.drop_address),
            Cell::new(format!("{:.2}", booking.total_payment)),
            Cell::new(format!("{:.2}", booking.advance_payment)),
            due_cell(booking.due_payment),
            Cell::new(&booking.id).fg(Color::DarkGrey),
        ]);
    }

    writeln!(
        out,
        "{} {}",
        title.green().bold(),
        format_args!("({})", bookings.len()).dimmed()
    )?;
    writeln!(out)?;
    writeln!(out, "{table}")?;
    Ok(())
}

/// Formats a due amount, red while anything is outstanding.
fn due_cell(due: f64) -> Cell {
    if due > 0.0_f64 {
        Cell::new(format!("{due:.2}")).fg(Color::Red)
    } else {
        Cell::new(format!("{due:.2}")).fg(Color::Green)
    }
}

/// Entry point.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            // Last-resort error output — if stderr itself failed, nothing
            // we can do.
            let _ignored = writeln!(io::stderr(), "fatal I/O error: {err}");
            ExitCode::FAILURE
        }
    }
}
