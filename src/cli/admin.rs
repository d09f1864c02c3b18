//! Curator commands
//!
//! All of these run behind the admin capability check in `cli::run`.

use super::{
    output, AdminCommands, CliError, CliState, ExhibitArgs, ExhibitChanges, ExhibitionArgs,
    ExhibitionChanges,
};
use crate::models::{ExhibitInput, ExhibitSearchCriteria};
use crate::services::{admin_search, ExhibitionDraft};

pub async fn run(state: &CliState, command: AdminCommands) -> Result<(), CliError> {
    match command {
        AdminCommands::Donations { all } => donations(state, all).await,
        AdminCommands::Accept { id } => {
            state.donations.accept(id).await?;
            println!("Darowizna #{} przyjęta.", id);
            Ok(())
        }
        AdminCommands::Reject { id } => {
            state.donations.reject(id).await?;
            println!("Darowizna #{} odrzucona.", id);
            Ok(())
        }
        AdminCommands::Exhibits {
            search,
            category,
            year,
        } => {
            let criteria = ExhibitSearchCriteria {
                name: None,
                category,
                production_year: year,
            };
            exhibits(state, &criteria, search.as_deref().unwrap_or_default()).await
        }
        AdminCommands::AddExhibit(args) => add_exhibit(state, args).await,
        AdminCommands::UpdateExhibit { id, changes } => update_exhibit(state, id, changes).await,
        AdminCommands::DeleteExhibit { id } => {
            state.exhibits.delete(id).await?;
            println!("Eksponat #{} usunięty.", id);
            Ok(())
        }
        AdminCommands::Exhibitions => {
            let exhibitions = state.exhibitions.list().await?;
            print!("{}", output::render_exhibitions(&exhibitions));
            Ok(())
        }
        AdminCommands::AddExhibition(args) => add_exhibition(state, args).await,
        AdminCommands::UpdateExhibition { id, changes } => {
            update_exhibition(state, id, changes).await
        }
        AdminCommands::DeleteExhibition { id } => {
            state.exhibitions.delete(id).await?;
            println!("Wystawa #{} usunięta.", id);
            Ok(())
        }
        AdminCommands::Schedule { date } => {
            let schedule = state.schedule.for_date(date).await?;
            print!("{}", output::render_schedule(&schedule));
            Ok(())
        }
    }
}

async fn donations(state: &CliState, all: bool) -> Result<(), CliError> {
    let donations = if all {
        state.donations.all(None).await?
    } else {
        state.donations.pending().await?
    };
    print!("{}", output::render_donations(&donations));
    Ok(())
}

async fn exhibits(
    state: &CliState,
    criteria: &ExhibitSearchCriteria,
    term: &str,
) -> Result<(), CliError> {
    let exhibits = admin_search(&state.exhibits.list(criteria).await?, term);
    println!("Baza eksponatów ({})", exhibits.len());
    print!("{}", output::render_exhibits(&exhibits));
    Ok(())
}

async fn add_exhibit(state: &CliState, args: ExhibitArgs) -> Result<(), CliError> {
    let input = ExhibitInput {
        name: args.name,
        description: args.description,
        production_year: args.year,
        image_url: state.media.resolve(&args.image).await?,
        category: args.category,
    };
    let exhibit = state.exhibits.create(input).await?;
    println!("Dodano eksponat #{}: {}", exhibit.id, exhibit.name);
    Ok(())
}

async fn update_exhibit(state: &CliState, id: i64, changes: ExhibitChanges) -> Result<(), CliError> {
    let current = state.exhibits.get(id).await?;
    let mut input = ExhibitInput::from(&current);
    if let Some(name) = changes.name {
        input.name = name;
    }
    if let Some(description) = changes.description {
        input.description = description;
    }
    if let Some(year) = changes.year {
        input.production_year = year;
    }
    if let Some(category) = changes.category {
        input.category = category;
    }
    if let Some(image) = changes.image {
        input.image_url = state.media.resolve(&image).await?;
    }

    let exhibit = state.exhibits.update(id, input).await?;
    println!("Zaktualizowano eksponat #{}: {}", exhibit.id, exhibit.name);
    Ok(())
}

async fn add_exhibition(state: &CliState, args: ExhibitionArgs) -> Result<(), CliError> {
    let mut draft = ExhibitionDraft::new();
    draft.name = args.name;
    draft.description = args.description;
    draft.background_image_url = state.media.resolve(&args.background).await?;
    for id in args.exhibits {
        draft.select(id);
    }

    let exhibition = state.exhibitions.create(&draft).await?;
    println!(
        "Utworzono wystawę #{}: {} ({} eksponatów)",
        exhibition.id,
        exhibition.name,
        exhibition.exhibits.len()
    );
    Ok(())
}

async fn update_exhibition(
    state: &CliState,
    id: i64,
    changes: ExhibitionChanges,
) -> Result<(), CliError> {
    let current = state.exhibitions.get(id).await?;
    let mut draft = ExhibitionDraft::from_exhibition(&current);
    if let Some(name) = changes.name {
        draft.name = name;
    }
    if let Some(description) = changes.description {
        draft.description = description;
    }
    if let Some(background) = changes.background {
        draft.background_image_url = state.media.resolve(&background).await?;
    }
    for exhibit_id in changes.toggle {
        draft.toggle(exhibit_id);
    }

    let exhibition = state.exhibitions.update(id, &draft).await?;
    println!(
        "Zaktualizowano wystawę #{}: {} ({} eksponatów)",
        exhibition.id,
        exhibition.name,
        exhibition.exhibits.len()
    );
    Ok(())
}
