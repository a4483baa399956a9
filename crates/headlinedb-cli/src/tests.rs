use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["headlinedb", "db", "ping"]).expect("expected valid cli args");

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
        Cli::try_parse_from(["headlinedb", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["headlinedb"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_import_with_path() {
    let cli = Cli::try_parse_from(["headlinedb", "import", "data/headlines.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Import { ref path }) if path == &PathBuf::from("data/headlines.csv")
    ));
}

#[test]
fn import_requires_a_path() {
    assert!(Cli::try_parse_from(["headlinedb", "import"]).is_err());
}

#[test]
fn parses_annotate() {
    let cli = Cli::try_parse_from(["headlinedb", "annotate"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Annotate)));
}

#[test]
fn top_entities_defaults_to_one_hundred() {
    let cli = Cli::try_parse_from(["headlinedb", "top-entities"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::TopEntities { limit: 100 })
    ));
}

#[test]
fn top_entities_accepts_limit() {
    let cli = Cli::try_parse_from(["headlinedb", "top-entities", "--limit", "5"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::TopEntities { limit: 5 })));
}

#[test]
fn top_entities_rejects_negative_limit() {
    assert!(Cli::try_parse_from(["headlinedb", "top-entities", "--limit", "-1"]).is_err());
}

#[test]
fn parses_lookup_with_multi_word_entity() {
    let cli = Cli::try_parse_from(["headlinedb", "lookup", "Tim Cook"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Lookup { ref entity }) if entity == "Tim Cook"
    ));
}

#[test]
fn runs_defaults_to_twenty() {
    let cli = Cli::try_parse_from(["headlinedb", "runs"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Runs { limit: 20 })));
}
