use crate::registry::CommandRegistry;

/// Result of completing the current input against known command names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    NoMatch,
    /// Text to append to the input.
    DirectMatch(String),
    /// Every matching name, sorted, when no further extension is possible.
    MultiMatch(Vec<String>),
}

/// Shell completer for tab completion.
pub struct ShellCompleter<'r> {
    registry: &'r CommandRegistry,
}

impl<'r> ShellCompleter<'r> {
    pub fn new(registry: &'r CommandRegistry) -> Self {
        Self { registry }
    }

    /// Completes `prefix` as a command name.
    ///
    /// A single match completes the whole word plus a trailing space. Several
    /// matches are extended up to their longest common prefix, and only when
    /// that adds nothing are the candidates themselves returned.
    pub fn complete(&self, prefix: &str) -> CompletionOutcome {
        if prefix.is_empty() {
            return CompletionOutcome::NoMatch;
        }

        let matches: Vec<&str> = self.registry.names_with_prefix(prefix).collect();
        match matches.as_slice() {
            [] => CompletionOutcome::NoMatch,
            [only] => CompletionOutcome::DirectMatch(format!("{} ", &only[prefix.len()..])),
            [first, rest @ ..] => {
                let common = rest
                    .iter()
                    .fold(*first, |common, name| common_prefix(common, name));
                if common.len() > prefix.len() {
                    CompletionOutcome::DirectMatch(common[prefix.len()..].to_string())
                } else {
                    CompletionOutcome::MultiMatch(matches.iter().map(|m| m.to_string()).collect())
                }
            }
        }
    }
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i);
    &a[..end]
}
