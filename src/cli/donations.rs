//! Donation commands for visitors

use super::{output, CliError, CliState};
use crate::models::DonationInput;

pub async fn donate(
    state: &CliState,
    item_name: String,
    description: String,
    image: Option<String>,
) -> Result<(), CliError> {
    let image_url = match image {
        Some(image) => state.media.resolve(&image).await?,
        None => String::new(),
    };
    let donation = state
        .donations
        .submit(DonationInput {
            item_name,
            description,
            image_url,
        })
        .await?;
    println!(
        "Dziękujemy! Zgłoszenie #{} ({}) czeka na decyzję kuratora.",
        donation.id, donation.item_name
    );
    Ok(())
}

pub async fn mine(state: &CliState) -> Result<(), CliError> {
    let donations = state.donations.mine().await?;
    print!("{}", output::render_donations(&donations));
    Ok(())
}
