use super::*;

#[test]
fn parses_db_ping_command() {
    let cli =
        Cli::try_parse_from(["profiledb-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["profiledb-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["profiledb-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_ingest_with_path() {
    let cli = Cli::try_parse_from(["profiledb-cli", "ingest", "data/profiles.xlsx"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Ingest { ref path, dry_run: false })
            if path == std::path::Path::new("data/profiles.xlsx")
    ));
}

#[test]
fn parses_ingest_dry_run() {
    let cli =
        Cli::try_parse_from(["profiledb-cli", "ingest", "profiles.xlsx", "--dry-run"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Ingest { dry_run: true, .. })
    ));
}

#[test]
fn ingest_requires_path() {
    assert!(Cli::try_parse_from(["profiledb-cli", "ingest"]).is_err());
}

#[test]
fn parses_profiles_list() {
    let cli = Cli::try_parse_from(["profiledb-cli", "profiles", "list"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Profiles {
            command: ProfilesCommands::List
        })
    ));
}

#[test]
fn parses_profiles_search_fragment() {
    let cli = Cli::try_parse_from(["profiledb-cli", "profiles", "search", "ali"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Profiles {
            command: ProfilesCommands::Search { ref fragment }
        }) if fragment == "ali"
    ));
}

#[test]
fn search_requires_fragment() {
    assert!(Cli::try_parse_from(["profiledb-cli", "profiles", "search"]).is_err());
}
