//! Interactive terminal front end.

use std::io::{self, BufRead, Write};

use console::style;
use serde_json::Value;

use super::portal::{Location, Portal};
use crate::backend::session::Tenant;
use crate::utils::Error;

const MENU_LEN: usize = 10;

/// Runs the main menu until the user exits or input ends.
pub async fn run_interactive(portal: &mut Portal) -> anyhow::Result<()> {
    let options: [&str; MENU_LEN] = [
        "Choose role",
        "Admin login",
        "Admin logout",
        "Resident login",
        "Resident logout",
        "Navigate to a path",
        "List evacuation areas",
        "Find nearest evacuation areas",
        "Show resident dashboard",
        "Exit",
    ];

    println!("{}", style("Evacuation Portal").bold().green());
    report(portal.navigate("/"));

    loop {
        let state = portal.auth_state();
        println!(
            "\n{} admin: {}, resident: {}",
            style("Session").dim(),
            signed_in(state.admin_authenticated),
            signed_in(state.resident_authenticated)
        );
        println!("What would you like to do?");
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let outcome = match prompt(&format!("Enter your choice (1-{})", options.len())) {
            Ok(answer) => handle(portal, answer.parse::<usize>().unwrap_or(0)).await,
            Err(e) => Err(e),
        };
        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

/// Runs one menu entry. `Ok(false)` ends the session.
async fn handle(portal: &mut Portal, choice: usize) -> io::Result<bool> {
    match choice {
        1 => choose_role(portal)?,
        2 => {
            let (email, password) = credentials()?;
            report(portal.login_admin(&email, &password).await);
        }
        3 => report(portal.logout_admin()),
        4 => {
            let (email, password) = credentials()?;
            report(portal.login_resident(&email, &password).await);
        }
        5 => report(portal.logout_resident().await),
        6 => {
            let path = prompt("Path")?;
            report(portal.navigate(&path));
        }
        7 => list_areas(portal).await,
        8 => nearest_areas(portal).await?,
        9 => {
            let result = portal.resident().dashboard.load_overview().await;
            match result {
                Ok(overview) => {
                    print_json("Dashboard", &overview.dashboard);
                    print_json("Evacuation info", &overview.evacuation_info);
                    print_json("Alerts", &overview.alerts);
                }
                Err(e) => print_error(&e),
            }
            follow(portal);
        }
        10 => {
            println!("Goodbye!");
            return Ok(false);
        }
        _ => println!("Invalid selection. Please enter 1-{MENU_LEN}."),
    }
    Ok(true)
}

fn choose_role(portal: &mut Portal) -> io::Result<()> {
    report(portal.navigate("/choose-role"));
    println!("  1. Administrator");
    println!("  2. Resident");
    let tenant = match prompt("Enter your choice")?.as_str() {
        "1" => Tenant::Admin,
        "2" => Tenant::Resident,
        _ => {
            println!("Invalid selection");
            return Ok(());
        }
    };
    report(portal.navigate(tenant.login_path()));
    Ok(())
}

async fn list_areas(portal: &mut Portal) {
    let result = portal.admin().evacuation_areas.get_all().await;
    match result {
        Ok(Value::Array(areas)) if areas.is_empty() => println!("No evacuation areas"),
        Ok(Value::Array(areas)) => {
            println!("{}", style("Evacuation areas:").bold());
            for area in &areas {
                println!("  {}. {}", field(area, "id"), field(area, "name"));
            }
        }
        Ok(other) => print_json("Evacuation areas", &other),
        Err(e) => print_error(&e),
    }
    follow(portal);
}

async fn nearest_areas(portal: &mut Portal) -> io::Result<()> {
    let latitude = prompt("Latitude")?.parse::<f64>();
    let longitude = prompt("Longitude")?.parse::<f64>();
    let (Ok(latitude), Ok(longitude)) = (latitude, longitude) else {
        println!("{}", style("Coordinates must be numbers").yellow());
        return Ok(());
    };

    let result = if portal.auth_state().is_authenticated(Tenant::Resident) {
        portal
            .resident()
            .evacuation
            .get_nearest_areas(latitude, longitude)
            .await
    } else {
        portal
            .admin()
            .evacuation_areas
            .get_nearest_areas(latitude, longitude)
            .await
    };
    match result {
        Ok(areas) => print_json("Nearest areas", &areas),
        Err(e) => print_error(&e),
    }
    follow(portal);
    Ok(())
}

/// Moves to a login page if a request just tore the session down.
fn follow(portal: &mut Portal) {
    match portal.follow_forced() {
        Ok(Some(location)) => print_location(location),
        Ok(None) => {}
        Err(e) => print_error(&e),
    }
}

fn report(result: Result<&Location, Error>) {
    match result {
        Ok(location) => print_location(location),
        Err(e) => print_error(&e),
    }
}

fn print_location(location: &Location) {
    let views = location
        .views
        .iter()
        .map(|view| view.id)
        .collect::<Vec<_>>()
        .join(" > ");
    println!("{} {} [{}]", style("At").cyan(), style(&location.path).bold(), views);
}

fn print_error(error: &Error) {
    println!("{} {error}", style("Error:").red());
}

fn print_json(title: &str, value: &Value) {
    println!("{}", style(title).bold());
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(_) => println!("{value}"),
    }
}

fn signed_in(flag: bool) -> console::StyledObject<&'static str> {
    if flag {
        style("signed in").green()
    } else {
        style("signed out").dim()
    }
}

fn credentials() -> io::Result<(String, String)> {
    Ok((prompt("Email")?, prompt("Password")?))
}

fn field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    read_answer(&mut io::stdin().lock())
}

/// Reads one trimmed line. Closed input is `UnexpectedEof`.
fn read_answer(reader: &mut impl BufRead) -> io::Result<String> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Cursor;

    #[test]
    fn closed_input_ends_the_menu() {
        let err = read_answer(&mut Cursor::new("")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn answers_are_trimmed_and_blank_lines_are_not_eof() {
        let mut input = Cursor::new("  3 \n\n");
        assert_eq!(read_answer(&mut input).unwrap(), "3");
        assert_eq!(read_answer(&mut input).unwrap(), "");
        assert!(read_answer(&mut input).is_err());
    }

    #[test]
    fn area_fields_tolerate_any_shape() {
        let area = json!({"id": "A-1", "name": null});
        assert_eq!(field(&area, "id"), "A-1");
        assert_eq!(field(&area, "name"), "-");
        assert_eq!(field(&json!({"id": 7}), "id"), "7");
    }
}
