//! Command line tokenization and the closed set of verbs.

use crate::error::{Error, Result};

/// One user-facing verb with its parsed arguments.
///
/// Index arguments stay as the raw token so execution can distinguish
/// "not a number" from "out of range".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `lf`: list the folder/label catalog.
    ListFolders,
    /// `lm`: list threads in the current folder or label.
    ListEmails,
    /// `cd <index|name>`: enter a folder or label.
    EnterFolder(String),
    /// `o <index>`: open a listed thread in the editor.
    Open(String),
    /// `c`: edit the draft file.
    Compose,
    /// `s`: send the draft.
    SendDraft,
    /// `ar <index>`: archive a listed thread.
    Archive(String),
    /// `! <index>`: report a listed thread as spam.
    ReportSpam(String),
    /// `wait <name>...`: poll folders/labels until new mail arrives.
    Wait(Vec<String>),
    /// `help`: print the verb summary.
    Help,
    /// `q`: quit.
    Quit,
}

/// Help text printed by the `help` command.
pub const HELP: &str = "\
lf              - List folders
lm              - List e-mails
cd <num>|<name> - Go inside the folder indicated by `num'
                  (as shown by lf) or by the folder's name
o <num>         - Open e-mail of the number `num' indicated
                  when `lm' was executed
c               - Edit draft file
s               - Send draft
ar <num>        - Archive thread number `num'
! <num>         - Report thread number `num' as spam
wait <name>...  - Wait until new mail arrives in one of the
                  named folders/labels, then enter and list it
help            - Prints this message
q               - Quit (c-d also works)";

impl Command {
    /// Parses one input line into a command.
    ///
    /// Blank lines parse to `None` so the loop can re-prompt silently.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCommand`] for an unrecognized verb and
    /// [`Error::Usage`] for a recognized verb missing its argument.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Ok(None);
        };
        let rest: Vec<String> = tokens.map(str::to_string).collect();

        let command = match verb {
            "lf" => Self::ListFolders,
            "lm" => Self::ListEmails,
            "cd" => Self::EnterFolder(required(verb, &rest, "a number or name")?),
            "o" => Self::Open(required(verb, &rest, "a number")?),
            "c" => Self::Compose,
            "s" => Self::SendDraft,
            "ar" => Self::Archive(required(verb, &rest, "a number")?),
            "!" => Self::ReportSpam(required(verb, &rest, "a number")?),
            "wait" => {
                if rest.is_empty() {
                    return Err(Error::Usage(
                        "wait expects one or more folder/label names".to_string(),
                    ));
                }
                Self::Wait(rest)
            }
            "help" => Self::Help,
            "q" => Self::Quit,
            other => return Err(Error::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}

/// Joins the argument tokens of a single-argument verb.
fn required(verb: &str, rest: &[String], what: &str) -> Result<String> {
    if rest.is_empty() {
        return Err(Error::Usage(format!("{verb} expects {what} as parameter")));
    }
    Ok(rest.join(""))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_verbs() {
        assert_eq!(Command::parse("lf").unwrap(), Some(Command::ListFolders));
        assert_eq!(Command::parse("lm").unwrap(), Some(Command::ListEmails));
        assert_eq!(Command::parse("q").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("help").unwrap(), Some(Command::Help));
    }

    #[test]
    fn test_parse_with_argument() {
        assert_eq!(
            Command::parse("cd 2").unwrap(),
            Some(Command::EnterFolder("2".to_string()))
        );
        assert_eq!(
            Command::parse("o 0").unwrap(),
            Some(Command::Open("0".to_string()))
        );
        assert_eq!(
            Command::parse("! 3").unwrap(),
            Some(Command::ReportSpam("3".to_string()))
        );
    }

    #[test]
    fn test_parse_wait_names() {
        assert_eq!(
            Command::parse("wait inbox work").unwrap(),
            Some(Command::Wait(vec![
                "inbox".to_string(),
                "work".to_string()
            ]))
        );
    }

    #[test]
    fn test_blank_line_is_none() {
        assert!(Command::parse("").unwrap().is_none());
        assert!(Command::parse("   ").unwrap().is_none());
    }

    #[test]
    fn test_missing_argument_is_usage_error() {
        assert!(matches!(Command::parse("cd"), Err(Error::Usage(_))));
        assert!(matches!(Command::parse("wait"), Err(Error::Usage(_))));
    }

    #[test]
    fn test_unknown_verb() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(matches!(err, Error::UnknownCommand(_)));
        // the offending verb shows up in the one-line report
        assert_eq!(err.to_string(), "unknown command 'frobnicate' (try 'help')");
    }

    #[test]
    fn test_extra_whitespace_tolerated() {
        assert_eq!(
            Command::parse("  cd   inbox  ").unwrap(),
            Some(Command::EnterFolder("inbox".to_string()))
        );
    }
}
