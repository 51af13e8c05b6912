use std::borrow::Cow;
use std::fmt;

/// One runtime invocation as a program plus argument vector.
///
/// Arguments are handed to the process verbatim; nothing is ever routed
/// through a shell. The `Display` form quotes every argument containing
/// anything outside a small safe set, so it can be pasted back into a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeCommand {
    program: String,
    args: Vec<String>,
}

impl RuntimeCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// First argument, e.g. `build`, `run` or `rm` for a container runtime.
    pub fn subcommand(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ',' | '.' | '_' | '+' | ':' | '@' | '/' | '-' | '=')
}

fn display_word(word: &str) -> Cow<'_, str> {
    if !word.is_empty() && word.chars().all(is_safe_char) {
        Cow::Borrowed(word)
    } else {
        shell_words::quote(word)
    }
}

impl fmt::Display for RuntimeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&display_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", display_word(arg))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_collects_arguments_in_order() {
        let cmd = RuntimeCommand::new("docker")
            .arg("rm")
            .args(["-f", "c1"]);
        assert_eq!(cmd.program(), "docker");
        assert_eq!(cmd.get_args(), ["rm", "-f", "c1"]);
        assert_eq!(cmd.subcommand(), Some("rm"));
        assert_eq!(cmd.argv(), vec!["docker", "rm", "-f", "c1"]);
    }

    #[test]
    fn display_is_plain_for_simple_words() {
        let cmd = RuntimeCommand::new("docker").args([
            "build",
            "--network=host",
            "-t",
            "x:1",
            "-f",
            ".",
            "/srv/project",
        ]);
        assert_eq!(
            cmd.to_string(),
            "docker build --network=host -t x:1 -f . /srv/project"
        );
    }

    #[test]
    fn display_quotes_words_with_spaces() {
        let cmd = RuntimeCommand::new("docker").args(["run", "-v", "/my project:/app"]);
        let shown = cmd.to_string();
        assert!(shown.starts_with("docker run -v "));
        assert!(shown.contains("'/my project:/app'"), "{shown}");
        assert_eq!(
            shell_words::split(&shown).unwrap(),
            vec!["docker", "run", "-v", "/my project:/app"]
        );
    }

    #[test]
    fn injection_attempts_stay_a_single_argument() {
        let cmd = RuntimeCommand::new("docker").args(["rm", "-f", "c1; rm -rf /"]);
        assert_eq!(cmd.get_args().len(), 3);
        let words = shell_words::split(&cmd.to_string()).unwrap();
        assert_eq!(words.len(), 4);
        assert_eq!(words[3], "c1; rm -rf /");
    }

    #[test]
    fn display_quotes_redirection_and_globs() {
        let cmd = RuntimeCommand::new("docker").args(["rm", "-f", "c1>out", "a*b", "~x", "#c"]);
        let shown = cmd.to_string();
        assert_eq!(shown, "docker rm -f 'c1>out' 'a*b' '~x' '#c'");
        assert_eq!(
            shell_words::split(&shown).unwrap(),
            vec!["docker", "rm", "-f", "c1>out", "a*b", "~x", "#c"]
        );
    }

    #[test]
    fn display_quotes_empty_argument() {
        let cmd = RuntimeCommand::new("docker").args(["run", ""]);
        assert_eq!(cmd.to_string(), "docker run ''");
    }

    #[test]
    fn no_subcommand_without_args() {
        assert_eq!(RuntimeCommand::new("docker").subcommand(), None);
    }
}
