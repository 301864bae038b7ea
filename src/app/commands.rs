use crate::utils::error::{CartError, Result};

pub const HELP_TEXT: &str = "\
Commands:
  add <domain>...    add domains to the cart and check their availability
  delete <domain>    remove a domain (alias: rm)
  clear              empty the cart
  prune              remove every domain that is not available
  best               keep only the best domains (.com > .app > .xyz, shorter first)
  copy               print the cart as a comma separated list
  list               show the cart (alias: ls)
  json               print the cart as JSON
  status             show progress towards a purchasable cart
  purchase           purchase the cart once every required domain is available
  help               show this message
  quit               leave (alias: exit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Vec<String>),
    Delete(String),
    Clear,
    Prune,
    Best,
    Copy,
    List,
    Json,
    Status,
    Purchase,
    Help,
    Quit,
}

impl Command {
    /// 空白行回傳 `Ok(None)`
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut words = line.split_whitespace();
        let Some(keyword) = words.next() else {
            return Ok(None);
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        let command = match keyword.to_lowercase().as_str() {
            "add" => {
                if args.is_empty() {
                    return Err(missing(keyword, "at least one domain"));
                }
                Command::Add(args)
            }
            "delete" | "rm" => match args.as_slice() {
                [domain] => Command::Delete(domain.clone()),
                _ => return Err(missing(keyword, "exactly one domain")),
            },
            "clear" => Command::Clear,
            "prune" => Command::Prune,
            "best" => Command::Best,
            "copy" => Command::Copy,
            "list" | "ls" => Command::List,
            "json" => Command::Json,
            "status" => Command::Status,
            "purchase" => Command::Purchase,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => {
                return Err(CartError::UnknownCommand {
                    input: keyword.to_string(),
                })
            }
        };

        Ok(Some(command))
    }
}

fn missing(command: &str, expected: &str) -> CartError {
    CartError::MissingArgument {
        command: command.to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_with_several_domains() {
        assert_eq!(
            Command::parse("add a.com  b.xyz").unwrap(),
            Some(Command::Add(vec!["a.com".to_string(), "b.xyz".to_string()]))
        );
    }

    #[test]
    fn test_parse_is_case_insensitive_on_keyword() {
        assert_eq!(Command::parse("  LIST ").unwrap(), Some(Command::List));
        assert_eq!(
            Command::parse("RM Example.com").unwrap(),
            Some(Command::Delete("Example.com".to_string()))
        );
    }

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t").unwrap(), None);
    }

    #[test]
    fn test_parse_missing_arguments() {
        assert!(matches!(
            Command::parse("add"),
            Err(CartError::MissingArgument { .. })
        ));
        assert!(matches!(
            Command::parse("delete a.com b.com"),
            Err(CartError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(matches!(
            Command::parse("checkout"),
            Err(CartError::UnknownCommand { ref input }) if input == "checkout"
        ));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Command::parse("ls").unwrap(), Some(Command::List));
        assert_eq!(Command::parse("exit").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("?").unwrap(), Some(Command::Help));
    }
}
