//! Visit booking commands

use chrono::{NaiveDate, NaiveTime};

use super::{output, CliError, CliState};
use crate::services::BookingServiceError;

pub async fn slots(state: &CliState, date: NaiveDate) -> Result<(), CliError> {
    let slots = state.booking.available_slots(date).await?;
    print!("{}", output::render_slots(date, &slots));
    Ok(())
}

/// Walk the booking wizard with the given answers
///
/// Without `time` the free hours are listed and the command fails so the
/// visitor can pick one.
pub async fn book(
    state: &CliState,
    date: NaiveDate,
    time: Option<NaiveTime>,
    guests: u32,
) -> Result<(), CliError> {
    let mut wizard = state.booking.wizard();
    state.booking.choose_date(&mut wizard, date).await?;

    let time = match time {
        Some(time) => time,
        None => {
            print!("{}", output::render_slots(date, wizard.slots()));
            return Err(BookingServiceError::NoTimeSelected.into());
        }
    };
    wizard.select_time(time)?;
    wizard.set_guests(guests);
    if wizard.guests() != guests {
        println!("Liczba osób ograniczona do {}.", wizard.guests());
    }
    wizard.confirm_guests();
    let party = wizard.guests();

    let confirmation = state.booking.submit(&mut wizard).await?;
    println!(
        "Rezerwacja przyjęta: {} godz. {}, liczba osób: {}.",
        date.format("%Y-%m-%d"),
        time.format("%H:%M"),
        party
    );
    if !confirmation.trim().is_empty() {
        println!("{}", confirmation.trim());
    }
    Ok(())
}

pub async fn reservations(state: &CliState) -> Result<(), CliError> {
    let reservations = state.booking.my_reservations().await?;
    print!("{}", output::render_reservations(&reservations));
    Ok(())
}
