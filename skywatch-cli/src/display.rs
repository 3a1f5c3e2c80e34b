//! Terminal rendering: the single place UI states become visible output.
//!
//! Each panel of the dashboard (welcome, loading indicator, weather card,
//! error banner) is one arm of [`render`].

use chrono::Local;
use skywatch_core::UiState;

/// Map a UI state onto the terminal. Pure projection of state to output;
/// no decisions are made here.
pub fn render(state: &UiState) {
    match state {
        UiState::Idle => welcome(),
        UiState::Loading => println!("Fetching weather data..."),
        UiState::Displaying(reading) => {
            let card = skywatch_core::render(reading);
            println!();
            println!("  {}", card.place);
            println!("  {}", date_header());
            println!();
            println!("  {}  (feels like {})", card.temperature, card.feels_like);
            println!("  {}", card.description);
            println!("  icon: {}", card.icon_url);
            println!();
            println!("  Humidity    {}", card.humidity);
            println!("  Wind        {}", card.wind);
            println!("  Pressure    {}", card.pressure);
            println!("  Visibility  {}", card.visibility);
            println!("  Sunrise     {}", card.sunrise);
            println!("  Sunset      {}", card.sunset);
            println!();
        }
        UiState::Error(message) => eprintln!("! {message}"),
    }
}

fn welcome() {
    println!();
    println!("  skywatch — {}", date_header());
    println!("  Search for a city or use your current location.");
    println!();
}

fn date_header() -> String {
    Local::now().format("%A, %B %-d, %Y, %I:%M %p").to_string()
}
