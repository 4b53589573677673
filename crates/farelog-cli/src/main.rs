use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use farelog_core::{
    build_schedule, popular_destinations, reference_number, total_revenue, validate_name,
    BookingSession, RouteChoice, SystemConfig, TicketIdGenerator,
};
use farelog_error::{FareError, Result};
use farelog_inventory::RouteInventory;
use farelog_store::{BookingStore, CheckpointFile, FeedbackLog, LoyaltyLedger};
use farelog_types::limits::{MAX_COMMENT_BYTES, MAX_RATING, MAX_SEATS};
use farelog_types::{
    BookingRecord, BookingStage, FeedbackRecord, SeatNumber, TicketCategory, TicketId,
    TransportMode,
};
use tracing::info;

const BOOKINGS_FILE: &str = "bookings.dat";
const PARTIAL_FILE: &str = "partial.dat";
const PROGRESS_FILE: &str = "progress.dat";
const FEEDBACK_FILE: &str = "feedbacks.dat";
const LOYALTY_FILE: &str = "points.dat";

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    data_dir: PathBuf,
    show_help: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let exit_code = run(std::env::args_os(), &mut input, &mut stdout, &mut stderr);
    drop(input);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run<I, R, W, E>(args: I, input: &mut R, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            let _ = write_usage(err);
            return 2;
        }
    };

    if options.show_help {
        if write_usage(out).is_err() {
            return 1;
        }
        return 0;
    }

    let mut app = match App::open(&options.data_dir) {
        Ok(app) => app,
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            return 1;
        }
    };

    app.run_menu(input, out, err)
}

fn parse_args<I>(args: I) -> std::result::Result<CliOptions, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    let mut data_dir: Option<PathBuf> = None;
    let mut show_help = false;

    for argument in iter {
        let arg = argument.to_string_lossy();
        let arg_str = arg.as_ref();

        match arg_str {
            "-h" | "--help" => {
                show_help = true;
            }
            _ => {
                if arg_str.starts_with('-') {
                    return Err(format!("unknown option `{arg_str}`"));
                }
                if data_dir.is_some() {
                    return Err(String::from(
                        "too many positional arguments; expected at most one data directory",
                    ));
                }
                data_dir = Some(PathBuf::from(argument));
            }
        }
    }

    Ok(CliOptions {
        data_dir: data_dir.unwrap_or_else(|| PathBuf::from(".")),
        show_help,
    })
}

fn write_usage<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Usage: farelog [DATA_DIR]\n\
         \n\
         Interactive ticket reservation desk. Bookings, saved progress,\n\
         feedback, and loyalty points are kept as flat files under\n\
         DATA_DIR (default: the current directory).\n",
    )
}

fn prompt_line<R, W>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

fn parse_yes_no(line: &str) -> Option<bool> {
    match line.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

fn parse_mode(line: &str) -> Option<TransportMode> {
    match line.to_ascii_lowercase().as_str() {
        "bus" => Some(TransportMode::Bus),
        "train" => Some(TransportMode::Train),
        _ => None,
    }
}

fn parse_category(line: &str) -> Option<TicketCategory> {
    match line.to_ascii_lowercase().as_str() {
        "standard" => Some(TicketCategory::Standard),
        "vip" => Some(TicketCategory::Vip),
        _ => None,
    }
}

/// How an interactive booking flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowOutcome {
    Committed,
    Paused,
    Abandoned,
    Eof,
}

enum ResumeDecision {
    Resume(BookingSession),
    Fresh,
    Eof,
}

/// Reads one line inside the booking flow; `pause` at any prompt
/// saves a checkpoint and leaves the flow.
macro_rules! step {
    ($self:expr, $session:expr, $input:expr, $out:expr, $prompt:expr) => {
        match prompt_line($input, $out, $prompt)? {
            None => return Ok(FlowOutcome::Eof),
            Some(line) if line.eq_ignore_ascii_case("pause") => {
                $self.partial.save(&$session.pause())?;
                writeln!($out, "Progress saved. Book tickets again later to resume.")?;
                return Ok(FlowOutcome::Paused);
            }
            Some(line) => line,
        }
    };
}

struct App {
    config: SystemConfig,
    store: BookingStore,
    partial: CheckpointFile,
    progress: CheckpointFile,
    feedback: FeedbackLog,
    ledger: LoyaltyLedger,
    inventory: RouteInventory,
    ids: TicketIdGenerator,
}

impl App {
    fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        let store = BookingStore::new(data_dir.join(BOOKINGS_FILE));
        let mut inventory = RouteInventory::default();
        let records = store.scan()?;
        inventory.seed(&records)?;
        info!(
            data_dir = %data_dir.display(),
            bookings = records.len(),
            routes = inventory.route_count(),
            "inventory seeded"
        );

        Ok(Self {
            config: SystemConfig::default(),
            store,
            partial: CheckpointFile::new(data_dir.join(PARTIAL_FILE)),
            progress: CheckpointFile::new(data_dir.join(PROGRESS_FILE)),
            feedback: FeedbackLog::new(data_dir.join(FEEDBACK_FILE)),
            ledger: LoyaltyLedger::new(data_dir.join(LOYALTY_FILE)),
            inventory,
            ids: TicketIdGenerator::new(),
        })
    }

    fn run_menu<R, W, E>(&mut self, input: &mut R, out: &mut W, err: &mut E) -> i32
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        loop {
            if write_menu(out).is_err() {
                return 1;
            }
            let choice = match prompt_line(input, out, "Choice: ") {
                Ok(Some(choice)) => choice,
                Ok(None) => return 0,
                Err(_) => return 1,
            };

            let outcome = match choice.as_str() {
                "1" => self.show_schedule(out),
                "2" => match self.book(input, out) {
                    Ok(FlowOutcome::Eof) => return 0,
                    Ok(_) => Ok(()),
                    Err(error) => Err(error),
                },
                "3" => self.view_bookings(input, out),
                "4" => self.search(input, out),
                "5" => self.modify(input, out),
                "6" => self.cancel(input, out),
                "7" => self.reports(out),
                "8" => self.view_feedback(out),
                "9" => self.loyalty_lookup(input, out),
                "10" => write_faq(out).map_err(FareError::from),
                "11" => {
                    return match self.save_and_exit(out) {
                        Ok(()) => 0,
                        Err(error) => {
                            let _ = writeln!(err, "error: {error}");
                            1
                        }
                    };
                }
                "12" => {
                    return match self.discard_and_exit(out) {
                        Ok(()) => 0,
                        Err(error) => {
                            let _ = writeln!(err, "error: {error}");
                            1
                        }
                    };
                }
                "13" => return 0,
                _ => {
                    let _ = writeln!(out, "Please choose a number between 1 and 13.");
                    Ok(())
                }
            };

            if let Err(error) = outcome {
                if error.is_user_error() {
                    let _ = writeln!(out, "{error}");
                } else {
                    let _ = writeln!(err, "error: {error}");
                }
            }
        }
    }

    fn show_schedule<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Date        Route                     Standard / VIP   Status")?;
        for row in build_schedule(&self.config) {
            writeln!(
                out,
                "{}  {:>9} -> {:<9}  Rs. {:>4} / {:>4}   {}",
                row.date,
                row.origin,
                row.destination,
                row.standard_fare,
                row.vip_fare,
                if row.available { "available" } else { "sold out" },
            )?;
        }
        Ok(())
    }

    fn book<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<FlowOutcome>
    where
        R: BufRead,
        W: Write,
    {
        let mut session = match self.offer_resume(input, out)? {
            ResumeDecision::Resume(session) => session,
            ResumeDecision::Fresh => BookingSession::new(),
            ResumeDecision::Eof => return Ok(FlowOutcome::Eof),
        };
        self.booking_flow(&mut session, input, out)
    }

    fn offer_resume<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<ResumeDecision>
    where
        R: BufRead,
        W: Write,
    {
        let saved = match self.partial.load()? {
            Some(checkpoint) => Some(checkpoint),
            None => self.progress.load()?,
        };
        let Some(checkpoint) = saved else {
            return Ok(ResumeDecision::Fresh);
        };

        let who = if checkpoint.booking.name.is_empty() {
            String::from("an unnamed passenger")
        } else {
            format!("'{}'", checkpoint.booking.name)
        };
        writeln!(out, "A saved booking for {who} is waiting ({}).", checkpoint.stage)?;
        loop {
            let Some(line) = prompt_line(input, out, "Resume it? (y/n): ")? else {
                return Ok(ResumeDecision::Eof);
            };
            match parse_yes_no(&line) {
                Some(true) => {
                    // Re-claim seats the paused booking already holds;
                    // only committed records reach the seed scan.
                    if checkpoint.stage >= BookingStage::RouteSelected
                        && checkpoint.stage < BookingStage::Committed
                    {
                        let booking = &checkpoint.booking;
                        self.inventory.ensure_route(&booking.origin, &booking.destination)?;
                        for seat in booking.assigned_seats() {
                            self.inventory.book_seat(&booking.origin, &booking.destination, seat);
                        }
                    }
                    return Ok(ResumeDecision::Resume(BookingSession::resume(checkpoint)));
                }
                Some(false) => {
                    // Release any seats the discarded booking still
                    // holds in this run's inventory; on a fresh run
                    // the route is unknown and freeing is a no-op.
                    if checkpoint.stage >= BookingStage::RouteSelected
                        && checkpoint.stage < BookingStage::Committed
                    {
                        let booking = &checkpoint.booking;
                        for seat in booking.assigned_seats() {
                            self.inventory.free_seat(&booking.origin, &booking.destination, seat);
                        }
                    }
                    self.partial.clear()?;
                    self.progress.clear()?;
                    return Ok(ResumeDecision::Fresh);
                }
                None => writeln!(out, "Please answer y or n.")?,
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn booking_flow<R, W>(
        &mut self,
        session: &mut BookingSession,
        input: &mut R,
        out: &mut W,
    ) -> Result<FlowOutcome>
    where
        R: BufRead,
        W: Write,
    {
        if session.stage() == BookingStage::Empty {
            let ticket_id = session.identify(&mut self.ids)?;
            writeln!(out, "Your ticket id is {ticket_id}.")?;
        }

        while session.stage() == BookingStage::Identified {
            let name = step!(self, session, input, out, "Passenger name: ");
            match session.set_name(&name) {
                Ok(()) => {}
                Err(error) if error.is_user_error() => writeln!(out, "{error}")?,
                Err(error) => return Err(error),
            }
        }

        while session.stage() == BookingStage::NamedTraveler {
            let origin = step!(self, session, input, out, "Origin city: ");
            let destination = step!(self, session, input, out, "Destination city: ");
            let travelers_line = step!(self, session, input, out, "Number of travelers: ");
            let Ok(travelers) = travelers_line.parse::<u8>() else {
                writeln!(out, "Please enter a number.")?;
                continue;
            };
            let mode_line = step!(self, session, input, out, "Mode (bus/train): ");
            let Some(mode) = parse_mode(&mode_line) else {
                writeln!(out, "Please enter 'bus' or 'train'.")?;
                continue;
            };
            let category_line = step!(self, session, input, out, "Category (standard/vip): ");
            let Some(category) = parse_category(&category_line) else {
                writeln!(out, "Please enter 'standard' or 'vip'.")?;
                continue;
            };
            let return_line = step!(self, session, input, out, "Return ticket? (y/n): ");
            let Some(return_ticket) = parse_yes_no(&return_line) else {
                writeln!(out, "Please answer y or n.")?;
                continue;
            };

            let choice = RouteChoice {
                origin,
                destination,
                travelers,
                mode,
                category,
                return_ticket,
            };
            match session.select_route(&self.config, &mut self.inventory, &choice) {
                Ok(()) => {}
                Err(error) if error.is_user_error() => writeln!(out, "{error}")?,
                Err(error) => return Err(error),
            }
        }

        if session.stage() == BookingStage::RouteSelected {
            let origin = session.booking().origin.clone();
            let destination = session.booking().destination.clone();
            if let Some(map) = self.inventory.available_seats(&origin, &destination) {
                let free: Vec<String> =
                    map.available_seats().map(|s| s.to_string()).collect();
                writeln!(
                    out,
                    "{} of {MAX_SEATS} seats available on {origin} -> {destination}: {}",
                    map.available_count(),
                    free.join(" "),
                )?;
            }

            while session.booking().seat_count() < session.booking().travelers {
                let next = session.booking().seat_count() + 1;
                let line = step!(self, session, input, out, &format!("Seat for traveler {next}: "));
                let Ok(raw) = line.parse::<u8>() else {
                    writeln!(out, "Please enter a seat number.")?;
                    continue;
                };
                let Some(seat) = SeatNumber::new(raw) else {
                    writeln!(out, "Seat must be between 1 and {MAX_SEATS}.")?;
                    continue;
                };
                match session.assign_seat(&mut self.inventory, seat) {
                    Ok(()) => writeln!(out, "Seat {seat} confirmed.")?,
                    Err(error) if error.is_user_error() => writeln!(out, "{error}")?,
                    Err(error) => return Err(error),
                }
            }

            loop {
                write_summary(out, session.booking())?;
                let line = step!(self, session, input, out, "Confirm booking? (y/n): ");
                match parse_yes_no(&line) {
                    Some(true) => break,
                    Some(false) => {
                        session.release_seats(&mut self.inventory);
                        self.partial.clear()?;
                        self.progress.clear()?;
                        writeln!(out, "Booking abandoned; seats released.")?;
                        return Ok(FlowOutcome::Abandoned);
                    }
                    None => writeln!(out, "Please answer y or n.")?,
                }
            }

            loop {
                let code = step!(self, session, input, out, "Promo code (blank for none): ");
                let promo = if code.is_empty() { None } else { Some(code.as_str()) };
                match session.price(&self.config, promo) {
                    Ok(price) => {
                        writeln!(out, "Fare: Rs. {price}")?;
                        break;
                    }
                    Err(error) if error.is_user_error() => writeln!(out, "{error}")?,
                    Err(error) => return Err(error),
                }
            }
        }

        if session.stage() == BookingStage::Priced {
            let name = session.booking().name.clone();
            let balance = self.ledger.points_for(&name)?;
            if balance > 0 {
                loop {
                    let line = step!(
                        self,
                        session,
                        input,
                        out,
                        &format!("Redeem loyalty points, 0-{balance}: ")
                    );
                    let Ok(points) = line.parse::<u32>() else {
                        writeln!(out, "Please enter a number.")?;
                        continue;
                    };
                    if points == 0 {
                        break;
                    }
                    match self.ledger.debit(&name, points) {
                        Ok(_) => {
                            let discount = self.config.loyalty.redemption_value(points);
                            let price = session.apply_discount(discount)?;
                            writeln!(out, "{points} point(s) redeemed; fare is now Rs. {price}.")?;
                            break;
                        }
                        Err(error) if error.is_user_error() => writeln!(out, "{error}")?,
                        Err(error) => return Err(error),
                    }
                }
            }

            let record = session.commit(&self.store)?.clone();
            self.partial.clear()?;
            self.progress.clear()?;
            write_receipt(out, &record)?;
            if let Some(points) = self.config.loyalty.points_earned(record.price) {
                let new_balance = self.ledger.credit(&record.name, points)?;
                writeln!(out, "Earned {points} loyalty point(s); balance {new_balance}.")?;
            }
            self.collect_feedback(input, out, &record)?;
        }

        Ok(FlowOutcome::Committed)
    }

    fn collect_feedback<R, W>(
        &mut self,
        input: &mut R,
        out: &mut W,
        record: &BookingRecord,
    ) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let Some(line) =
            prompt_line(input, out, "Rate your experience 1-5 (blank to skip): ")?
        else {
            return Ok(());
        };
        if line.is_empty() {
            return Ok(());
        }
        let rating = match line.parse::<u8>() {
            Ok(rating) if (1..=MAX_RATING).contains(&rating) => rating,
            _ => {
                writeln!(out, "Skipping feedback; ratings run 1 through {MAX_RATING}.")?;
                return Ok(());
            }
        };
        let comment = loop {
            let Some(line) = prompt_line(input, out, "Comment: ")? else {
                return Ok(());
            };
            if line.len() <= MAX_COMMENT_BYTES {
                break line;
            }
            writeln!(
                out,
                "Comments are limited to {MAX_COMMENT_BYTES} bytes; yours is {}.",
                line.len()
            )?;
        };
        self.feedback.append(&FeedbackRecord {
            ticket_id: record.ticket_id,
            name: record.name.clone(),
            rating,
            comment,
        })?;
        writeln!(out, "Thanks for the feedback.")?;
        Ok(())
    }

    fn view_bookings<R, W>(&self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let Some(filter) = prompt_line(input, out, "Show (all/bus/train): ")? else {
            return Ok(());
        };
        let mode = match filter.to_ascii_lowercase().as_str() {
            "" | "all" => None,
            "bus" => Some(TransportMode::Bus),
            "train" => Some(TransportMode::Train),
            other => {
                writeln!(out, "Unknown filter '{other}'; expected all, bus, or train.")?;
                return Ok(());
            }
        };

        let records = self.store.scan()?;
        let mut shown = 0_usize;
        for record in records
            .iter()
            .filter(|r| mode.map_or(true, |m| r.mode == m))
        {
            write_booking_line(out, record)?;
            shown += 1;
        }
        if shown == 0 {
            writeln!(out, "No bookings to show.")?;
        }
        Ok(())
    }

    fn search<R, W>(&self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let Some(kind) = prompt_line(input, out, "Search by (id/name): ")? else {
            return Ok(());
        };
        match kind.to_ascii_lowercase().as_str() {
            "id" => {
                let Some(line) = prompt_line(input, out, "Ticket id: ")? else {
                    return Ok(());
                };
                let Ok(raw) = line.parse::<u32>() else {
                    writeln!(out, "Please enter a numeric ticket id.")?;
                    return Ok(());
                };
                match self.store.find(TicketId::new(raw))? {
                    Some(record) => write_booking_line(out, &record)?,
                    None => writeln!(out, "No booking found for ticket {raw}.")?,
                }
            }
            "name" => {
                let Some(name) = prompt_line(input, out, "Passenger name: ")? else {
                    return Ok(());
                };
                let records = self.store.scan()?;
                let mut shown = 0_usize;
                for record in records
                    .iter()
                    .filter(|r| r.name.eq_ignore_ascii_case(&name))
                {
                    write_booking_line(out, record)?;
                    shown += 1;
                }
                if shown == 0 {
                    writeln!(out, "No bookings found for '{name}'.")?;
                }
            }
            other => writeln!(out, "Unknown search '{other}'; expected id or name.")?,
        }
        Ok(())
    }

    fn modify<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let Some(line) = prompt_line(input, out, "Ticket id: ")? else {
            return Ok(());
        };
        let Ok(raw) = line.parse::<u32>() else {
            writeln!(out, "Please enter a numeric ticket id.")?;
            return Ok(());
        };
        let Some(name) = prompt_line(input, out, "New passenger name: ")? else {
            return Ok(());
        };
        let name = validate_name(&name)?.to_owned();

        if self.store.modify(TicketId::new(raw), |record| {
            record.name = name.clone();
        })? {
            writeln!(out, "Booking {raw} updated.")?;
        } else {
            writeln!(out, "No booking found for ticket {raw}.")?;
        }
        Ok(())
    }

    fn cancel<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let Some(line) = prompt_line(input, out, "Ticket id: ")? else {
            return Ok(());
        };
        let Ok(raw) = line.parse::<u32>() else {
            writeln!(out, "Please enter a numeric ticket id.")?;
            return Ok(());
        };
        if self.store.cancel(TicketId::new(raw))? {
            self.reload_inventory()?;
            writeln!(out, "Booking {raw} cancelled; seats released.")?;
        } else {
            writeln!(out, "No booking found for ticket {raw}.")?;
        }
        Ok(())
    }

    fn reload_inventory(&mut self) -> Result<()> {
        let records = self.store.scan()?;
        self.inventory = RouteInventory::default();
        self.inventory.seed(&records)
    }

    fn reports<W: Write>(&self, out: &mut W) -> Result<()> {
        let records = self.store.scan()?;
        writeln!(out, "Total bookings: {}", records.len())?;
        writeln!(out, "Total revenue:  Rs. {}", total_revenue(&records))?;
        let counts = popular_destinations(&records, &self.config.cities);
        if counts.is_empty() {
            writeln!(out, "No destinations booked yet.")?;
        } else {
            writeln!(out, "Bookings by destination:")?;
            for entry in counts {
                writeln!(out, "  {}: {}", entry.city, entry.bookings)?;
            }
        }
        Ok(())
    }

    fn view_feedback<W: Write>(&self, out: &mut W) -> Result<()> {
        let records = self.feedback.scan()?;
        if records.is_empty() {
            writeln!(out, "No feedback yet.")?;
            return Ok(());
        }
        for record in records {
            writeln!(
                out,
                "#{} {} rated {}/{MAX_RATING}: {}",
                record.ticket_id, record.name, record.rating, record.comment,
            )?;
        }
        Ok(())
    }

    fn loyalty_lookup<R, W>(&self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: BufRead,
        W: Write,
    {
        let Some(name) = prompt_line(input, out, "Passenger name: ")? else {
            return Ok(());
        };
        let points = self.ledger.points_for(&name)?;
        writeln!(
            out,
            "{name} has {points} loyalty point(s), worth Rs. {}.",
            self.config.loyalty.redemption_value(points),
        )?;
        Ok(())
    }

    fn save_and_exit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if let Some(checkpoint) = self.partial.load()? {
            self.progress.save(&checkpoint)?;
            self.partial.clear()?;
            writeln!(out, "Progress saved. Goodbye.")?;
        } else {
            writeln!(out, "Nothing in progress. Goodbye.")?;
        }
        Ok(())
    }

    fn discard_and_exit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.partial.clear()?;
        self.progress.clear()?;
        writeln!(out, "Saved progress discarded. Goodbye.")?;
        Ok(())
    }
}

fn write_menu<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "\n==== farelog ticket desk ====\n\
          1. View timetable\n\
          2. Book tickets\n\
          3. View bookings\n\
          4. Search bookings\n\
          5. Modify a booking\n\
          6. Cancel a booking\n\
          7. Reports\n\
          8. View feedback\n\
          9. Loyalty points\n\
         10. FAQ\n\
         11. Save progress and exit\n\
         12. Exit without saving\n\
         13. Exit",
    )
}

fn write_summary<W>(out: &mut W, record: &BookingRecord) -> io::Result<()>
where
    W: Write,
{
    let seats: Vec<String> = record.assigned_seats().map(|s| s.to_string()).collect();
    writeln!(
        out,
        "Booking {}: {} travelling {} -> {}{} by {} ({}), seat(s) {}",
        record.ticket_id,
        record.name,
        record.origin,
        record.destination,
        if record.return_ticket { " and back" } else { "" },
        record.mode,
        record.category,
        seats.join(", "),
    )
}

fn write_booking_line<W>(out: &mut W, record: &BookingRecord) -> io::Result<()>
where
    W: Write,
{
    let seats: Vec<String> = record.assigned_seats().map(|s| s.to_string()).collect();
    writeln!(
        out,
        "#{} {}: {} -> {} ({}, {}, seat(s) {}, Rs. {})",
        record.ticket_id,
        record.name,
        record.origin,
        record.destination,
        record.mode,
        record.category,
        seats.join(", "),
        record.price,
    )
}

fn write_receipt<W>(out: &mut W, record: &BookingRecord) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "----- Receipt -----")?;
    writeln!(out, "Reference: {}", reference_number(record.ticket_id))?;
    writeln!(out, "Ticket:    {}", record.ticket_id)?;
    writeln!(out, "Passenger: {}", record.name)?;
    writeln!(
        out,
        "Route:     {} -> {}{}",
        record.origin,
        record.destination,
        if record.return_ticket { " (return)" } else { "" },
    )?;
    writeln!(out, "Travel:    {} / {}", record.mode, record.category)?;
    let seats: Vec<String> = record.assigned_seats().map(|s| s.to_string()).collect();
    writeln!(out, "Seats:     {}", seats.join(", "))?;
    writeln!(out, "Fare:      Rs. {}", record.price)?;
    writeln!(out, "-------------------")
}

fn write_faq<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Q: How do I pause a booking?\n\
         A: Type 'pause' at any prompt while booking; resume it from\n\
            the Book tickets menu.\n\
         Q: How do loyalty points work?\n\
         A: Fares above Rs. 1800 earn 10 points; each point is worth\n\
            Rs. 100 on a later booking.\n\
         Q: Can I get a refund?\n\
         A: Cancel the booking from the menu; seats are released\n\
            immediately.\n\
         Q: Which promo codes are accepted?\n\
         A: Ask the ticket desk for current codes; enter one at the\n\
            promo prompt while booking.",
    )
}
