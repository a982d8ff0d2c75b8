//! Command templates for the external extraction tools.
//!
//! A template is a command line whose words may contain `{file}` or `{dir}`
//! placeholders, e.g. `npx documentation build {dir} -f json`. Words are split
//! on whitespace; single quotes, double quotes and backslashes group words the
//! way a POSIX shell does, but nothing else is interpreted (no variables,
//! globs or pipes).

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    program: String,
    args: Vec<String>,
}

impl CommandTemplate {
    /// Parse a template; `None` if it names no program or leaves a quote open.
    pub fn parse(template: &str) -> Option<Self> {
        let mut words = split_words(template)?.into_iter();
        let program = words.next()?;
        Some(CommandTemplate {
            program,
            args: words.collect(),
        })
    }

    /// Build a command with every `{key}` replaced by its value.
    pub fn command(&self, vars: &[(&str, &str)]) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(self.args.iter().map(|arg| substitute(arg, vars)));
        cmd
    }

    /// Command line with placeholders filled in, for error messages.
    pub fn display_with(&self, vars: &[(&str, &str)]) -> String {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().map(|arg| substitute(arg, vars)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_with(&[]))
    }
}

fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '\'' => break,
                        c => word.push(c),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next()? {
                        '"' => break,
                        '\\' => match chars.next()? {
                            c @ ('"' | '\\') => word.push(c),
                            c => {
                                word.push('\\');
                                word.push(c);
                            }
                        },
                        c => word.push(c),
                    }
                }
            }
            '\\' => {
                in_word = true;
                word.push(chars.next()?);
            }
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                in_word = true;
                word.push(c);
            }
        }
    }
    if in_word {
        words.push(word);
    }
    Some(words)
}

fn substitute(arg: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(arg.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_program_and_args() {
        let t = CommandTemplate::parse("npx documentation build {dir} -f json").unwrap();
        assert_eq!(t.program, "npx");
        assert_eq!(t.args, ["documentation", "build", "{dir}", "-f", "json"]);
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(CommandTemplate::parse("   ").is_none());
    }

    #[test]
    fn quotes_group_words() {
        let t = CommandTemplate::parse(r#"node "/opt/my tools/docgen.js" --label 'a b' {file}"#).unwrap();
        assert_eq!(t.program, "node");
        assert_eq!(t.args, ["/opt/my tools/docgen.js", "--label", "a b", "{file}"]);
    }

    #[test]
    fn backslash_escapes_outside_single_quotes() {
        let t = CommandTemplate::parse(r#"cat my\ dir/{file} "say \"hi\"" 'c:\x'"#).unwrap();
        assert_eq!(t.program, "cat");
        assert_eq!(t.args, ["my dir/{file}", "say \"hi\"", "c:\\x"]);
    }

    #[test]
    fn empty_quotes_are_an_argument() {
        let t = CommandTemplate::parse("sh -c ''").unwrap();
        assert_eq!(t.args, ["-c", ""]);
    }

    #[test]
    fn unbalanced_quote_is_rejected() {
        assert!(CommandTemplate::parse("node 'docgen.js").is_none());
        assert!(CommandTemplate::parse("node docgen.js\\").is_none());
    }

    #[test]
    fn placeholders_are_substituted() {
        let t = CommandTemplate::parse("node docgen.js --name={file} {dir}").unwrap();
        assert_eq!(
            t.display_with(&[("file", "MapView.tsx"), ("dir", "src")]),
            "node docgen.js --name=MapView.tsx src"
        );
    }

    #[test]
    fn unknown_placeholders_are_kept() {
        let t = CommandTemplate::parse("cat {other}").unwrap();
        assert_eq!(t.display_with(&[("file", "x")]), "cat {other}");
        assert_eq!(t.to_string(), "cat {other}");
    }
}
