use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use rahalah_client::{
    display_stars, ChatBackend, ChatReply, ChatRequest, CheckConnectionUseCase, CheckResult,
    FlightResult, HotelResult, HttpChatBackend, Mode, PlaceResult,
};

#[derive(Parser)]
#[command(name = "rahalah-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backend base URL; overrides the RAHALAH_API_URL environment variable
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Chat {
        message: String,

        #[arg(short, long)]
        mode: Option<String>,

        #[arg(short, long)]
        session: Option<String>,

        /// Print the raw response payload instead of the rendered reply
        #[arg(long)]
        raw: bool,
    },

    Health,

    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let backend = match cli.api_url {
        Some(url) => HttpChatBackend::new(url),
        None => HttpChatBackend::from_env(),
    };

    match cli.command {
        Commands::Chat {
            message,
            mode,
            session,
            raw,
        } => {
            let mode = mode
                .map(|raw_mode| {
                    Mode::parse(&raw_mode).ok_or_else(|| {
                        anyhow!("unknown mode '{raw_mode}' (expected flight, hotel, or trip)")
                    })
                })
                .transpose()?;

            let mut request = ChatRequest::new(message).with_conversation_id(session);
            if let Some(mode) = mode {
                request = request.with_mode(mode);
            }

            let response = backend.send_chat_message(&request).await?;

            if raw {
                println!("{}", serde_json::to_string_pretty(response.as_value())?);
            } else {
                print_reply(&response.reply());
            }
        }

        Commands::Health => {
            let payload = backend.health_check().await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }

        Commands::Check => {
            println!("Checking backend at {}\n", backend.base_url());
            let use_case = CheckConnectionUseCase::new(Arc::new(backend));
            let results = use_case.execute().await;
            if !print_check_report(&results) {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn print_reply(reply: &ChatReply) {
    if !reply.response().is_empty() {
        println!("{}", reply.response());
    }

    let results = reply.search_results();
    if !results.flight().is_empty() {
        println!("\nFlights:");
        for flight in results.flight() {
            print_flight(flight);
        }
    }
    if !results.hotel().is_empty() {
        println!("\nHotels:");
        for hotel in results.hotel() {
            print_hotel(hotel);
        }
    }
    if !results.place().is_empty() {
        println!("\nPlaces:");
        for place in results.place() {
            print_place(place);
        }
    }

    if let Some(session_id) = reply.session_id() {
        println!("\nSession: {session_id}");
    }
}

fn print_flight(flight: &FlightResult) {
    println!("  {}", flight.airline().unwrap_or("Unknown Airline"));
    println!(
        "    {} to {}, {}",
        flight.origin().unwrap_or("Origin"),
        flight.destination().unwrap_or("Destination"),
        flight.duration().unwrap_or("N/A")
    );
    println!(
        "    Departs {} | Arrives {} | Stops: {}",
        flight.departure_time().unwrap_or("N/A"),
        flight.arrival_time().unwrap_or("N/A"),
        flight.stops()
    );
    println!("    Price: {}", flight.display_price());
    if let Some(link) = flight.booking_link() {
        println!("    Book: {link}");
    }
}

fn print_hotel(hotel: &HotelResult) {
    println!("  {}", hotel.title().unwrap_or("Unknown Hotel"));
    let stars = display_stars(hotel.rating_stars());
    if !stars.is_empty() {
        println!("    Rating: {stars}");
    }
    println!("    Location: {}", hotel.display_location());
    if !hotel.amenities().is_empty() {
        println!("    Amenities: {}", hotel.amenities().join(", "));
    }
    println!("    Price: {}", hotel.display_price());
    if let Some(link) = hotel.booking_link() {
        println!("    Book: {link}");
    }
}

fn print_place(place: &PlaceResult) {
    println!("  {}", place.title().unwrap_or("Unknown Attraction"));
    let stars = display_stars(place.rating_stars());
    if !stars.is_empty() {
        println!("    Rating: {stars} ({} reviews)", place.rating_count());
    }
    println!("    Address: {}", place.address().unwrap_or("N/A"));
    if !place.categories().is_empty() {
        println!("    Categories: {}", place.categories().join(", "));
    }
    if let Some(phone) = place.phone() {
        println!("    Phone: {phone}");
    }
    if let Some(website) = place.website() {
        println!("    Website: {website}");
    }
    if !place.hours().is_empty() {
        println!("    Hours:");
        for window in place.hours() {
            println!(
                "      {}: {} - {}",
                window.day().unwrap_or("N/A"),
                window.open().unwrap_or("?"),
                window.close().unwrap_or("?")
            );
        }
    }
}

fn print_check_report(results: &[CheckResult]) -> bool {
    for result in results {
        let status = if result.passed() { "PASS" } else { "FAIL" };
        println!(
            "[{status}] {} ({} ms): {}",
            result.name(),
            result.elapsed().as_millis(),
            result.detail()
        );
    }

    let passed = results.iter().filter(|r| r.passed()).count();
    println!("\n{passed}/{} checks passed", results.len());
    passed == results.len()
}
