//! Account commands

use super::{output, CliError, CliState};
use crate::models::RegisterRequest;

pub async fn login(state: &CliState, email: &str, password: &str) -> Result<(), CliError> {
    let user = state.auth.login(email, password).await?;
    println!("Zalogowano jako {} ({}).", user.display_name(), user.email);
    if user.is_admin() {
        println!("Konto administratora.");
    }
    Ok(())
}

pub async fn register(
    state: &CliState,
    first_name: String,
    last_name: String,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let response = state
        .auth
        .register(RegisterRequest {
            first_name,
            last_name,
            email,
            password,
        })
        .await?;
    println!(
        "{}",
        response
            .message
            .unwrap_or_else(|| "Konto zostało utworzone.".to_string())
    );
    println!("Możesz się teraz zalogować.");
    Ok(())
}

pub fn logout(state: &CliState) -> Result<(), CliError> {
    state.auth.logout()?;
    println!("Wylogowano.");
    Ok(())
}

pub fn whoami(state: &CliState) -> Result<(), CliError> {
    match state.auth.current_user() {
        Some(user) => print!("{}", output::render_user(&user)),
        None => println!("Nie jesteś zalogowany."),
    }
    Ok(())
}
