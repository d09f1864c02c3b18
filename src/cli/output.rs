//! Plain-text rendering of API data
//!
//! Every function returns the complete text, ending with a newline.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::models::{Donation, Exhibit, Exhibition, Reservation, TimeSlot, User};
use crate::services::DailySchedule;

const DATE_FORMAT: &str = "%d.%m.%Y";

pub fn render_user(user: &User) -> String {
    let mut out = format!("{} <{}>\n", user.display_name(), user.email);
    if user.is_admin() {
        out.push_str("Rola: administrator\n");
    }
    out
}

/// One line per exhibit
pub fn render_exhibits(exhibits: &[Exhibit]) -> String {
    if exhibits.is_empty() {
        return "Brak eksponatów spełniających kryteria.\n".to_string();
    }
    let mut out = String::new();
    for exhibit in exhibits {
        let _ = writeln!(
            out,
            "#{:<4} {} ({}) [{}]",
            exhibit.id,
            exhibit.name,
            year_or_dash(&exhibit.production_year),
            exhibit.category.label()
        );
    }
    out
}

pub fn render_exhibit(exhibit: &Exhibit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", exhibit.name);
    let _ = writeln!(out, "Kategoria: {}", exhibit.category.label());
    let _ = writeln!(out, "Rok produkcji: {}", year_or_dash(&exhibit.production_year));
    if !exhibit.image_url.is_empty() {
        let _ = writeln!(out, "Zdjęcie: {}", abbreviate(&exhibit.image_url));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", exhibit.description);
    out
}

pub fn render_exhibitions(exhibitions: &[Exhibition]) -> String {
    if exhibitions.is_empty() {
        return "Brak wystaw.\n".to_string();
    }
    let mut out = String::new();
    for exhibition in exhibitions {
        let _ = writeln!(
            out,
            "#{:<4} {} ({} eksponatów)",
            exhibition.id,
            exhibition.name,
            exhibition.exhibits.len()
        );
    }
    out
}

/// Exhibition with its exhibits in curated order
pub fn render_exhibition(exhibition: &Exhibition) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", exhibition.name);
    let _ = writeln!(out, "{}", exhibition.description);
    let _ = writeln!(out);
    out.push_str(&render_exhibits(&exhibition.exhibits));
    out
}

pub fn render_slots(date: NaiveDate, slots: &[TimeSlot]) -> String {
    let mut out = format!("Godziny zwiedzania {}:\n", date.format(DATE_FORMAT));
    if slots.is_empty() {
        out.push_str("  brak terminów\n");
        return out;
    }
    for slot in slots {
        let state = if slot.available { "wolne" } else { "zajęte" };
        let _ = writeln!(out, "  {}  {}", slot.time.format("%H:%M"), state);
    }
    out
}

pub fn render_reservations(reservations: &[Reservation]) -> String {
    if reservations.is_empty() {
        return "Nie masz jeszcze żadnych rezerwacji.\n".to_string();
    }
    let mut out = String::new();
    for r in reservations {
        let _ = writeln!(
            out,
            "{} {}  osób: {}",
            r.visit_date.format(DATE_FORMAT),
            r.visit_time.format("%H:%M"),
            r.number_of_guests
        );
    }
    out
}

/// Daily visitor list for the front desk
pub fn render_schedule(schedule: &DailySchedule) -> String {
    let mut out = format!("Rezerwacje na {}:\n", schedule.date.format(DATE_FORMAT));
    if schedule.is_empty() {
        out.push_str("  brak rezerwacji\n");
        return out;
    }
    for r in &schedule.reservations {
        let _ = writeln!(
            out,
            "  {}  {:<24} {:<28} osób: {}",
            r.visit_time.format("%H:%M"),
            r.visitor_name(),
            r.user_email,
            r.number_of_guests
        );
    }
    let _ = writeln!(
        out,
        "Razem: {} rezerwacji, {} osób",
        schedule.reservations.len(),
        schedule.total_guests()
    );
    out
}

pub fn render_donations(donations: &[Donation]) -> String {
    if donations.is_empty() {
        return "Brak zgłoszonych darowizn.\n".to_string();
    }
    let mut out = String::new();
    for d in donations {
        let _ = write!(out, "#{:<4} {} [{}]", d.id, d.item_name, d.status.label());
        if !d.donor_email.is_empty() {
            let _ = write!(out, " od {}", d.donor_email);
        }
        if let Some(created_at) = d.created_at {
            let _ = write!(out, " {}", created_at.format(DATE_FORMAT));
        }
        out.push('\n');
        if !d.description.is_empty() {
            let _ = writeln!(out, "      {}", d.description);
        }
    }
    out
}

fn year_or_dash(year: &str) -> &str {
    if year.trim().is_empty() {
        "-"
    } else {
        year
    }
}

// data: URLs run to hundreds of kilobytes
fn abbreviate(url: &str) -> String {
    if url.starts_with("data:") {
        let header = url.split(',').next().unwrap_or(url);
        format!("{},…", header)
    } else {
        url.to_string()
    }
}
