//! Catalog and exhibition browsing

use super::{output, CatalogArgs, CliError, CliState};
use crate::services::CatalogQuery;

pub async fn browse(state: &CliState, args: CatalogArgs) -> Result<(), CliError> {
    let query = CatalogQuery {
        search: args.search,
        category: args.category,
        sort: args.sort,
    };
    let exhibits = state.catalog.browse(&query).await?;
    print!("{}", output::render_exhibits(&exhibits));
    Ok(())
}

pub async fn exhibit(state: &CliState, id: i64) -> Result<(), CliError> {
    let exhibit = state.catalog.exhibit(id).await?;
    print!("{}", output::render_exhibit(&exhibit));
    Ok(())
}

pub async fn exhibitions(state: &CliState, id: Option<i64>) -> Result<(), CliError> {
    match id {
        Some(id) => {
            let exhibition = state.exhibitions.get(id).await?;
            print!("{}", output::render_exhibition(&exhibition));
        }
        None => {
            let exhibitions = state.exhibitions.list().await?;
            print!("{}", output::render_exhibitions(&exhibitions));
        }
    }
    Ok(())
}
