use clap::{value_parser, Arg, ArgAction, Command};

pub fn arg_parser() -> Command {
    Command::new("tomesearch")
        .about("Search a book catalog by title, author or identifier")
        .subcommand_required(true)
        .subcommand(
            Command::new("search")
                .about("Search editions, one result per work")
                .arg(Arg::new("query").required(true).num_args(1..))
                .arg(
                    Arg::new("min-confidence")
                        .long("min-confidence")
                        .help("Only keep text matches ranked above this")
                        .value_parser(value_parser!(f32)),
                )
                .arg(
                    Arg::new("first")
                        .long("first")
                        .help("Only print the best match")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("user")
                        .long("user")
                        .help("Search the shelves of this user, every edition")
                        .value_parser(value_parser!(i32)),
                ),
        )
        .subcommand(
            Command::new("isbn")
                .about("Look up editions by ISBN-10 or ISBN-13")
                .arg(Arg::new("isbn").required(true)),
        )
        .subcommand(Command::new("config").about("Print the default configuration"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn verify() {
        arg_parser().debug_assert();
    }

    #[test]
    fn search_joins_words() {
        let matches = arg_parser()
            .try_get_matches_from(["tomesearch", "search", "harry", "potter", "--first"])
            .unwrap();
        let (name, matches) = matches.subcommand().unwrap();
        assert_eq!(name, "search");
        let query = matches
            .get_many::<String>("query")
            .unwrap()
            .map(String::as_str)
            .collect::<Vec<&str>>()
            .join(" ");
        assert_eq!(query, "harry potter");
        assert!(matches.get_flag("first"));
        assert_eq!(matches.get_one::<i32>("user"), None);
    }

    #[test]
    fn search_options() {
        let matches = arg_parser()
            .try_get_matches_from([
                "tomesearch",
                "search",
                "dune",
                "--min-confidence",
                "0.2",
                "--user",
                "3",
            ])
            .unwrap();
        let (_, matches) = matches.subcommand().unwrap();
        assert_eq!(matches.get_one::<f32>("min-confidence"), Some(&0.2));
        assert_eq!(matches.get_one::<i32>("user"), Some(&3));
    }
}
