/// Tokenizes shell input into a vector of words.
///
/// Handles single and double quotes and backslash escapes. Only a plain space
/// outside of quotes separates words; unterminated quotes are accepted and
/// whatever was collected so far becomes the last word.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single_quote = false;
    let mut in_double_quote = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' if !in_double_quote => in_single_quote = !in_single_quote,
            '"' if !in_single_quote => in_double_quote = !in_double_quote,
            '\\' if !in_single_quote => match chars.peek() {
                // Inside double quotes only `\` and `"` are escapable.
                Some(&next) if in_double_quote => {
                    if next == '\\' || next == '"' {
                        chars.next();
                        current.push(next);
                    } else {
                        current.push(c);
                    }
                }
                Some(&next) => {
                    chars.next();
                    current.push(next);
                }
                None => current.push(c),
            },
            ' ' if !in_single_quote && !in_double_quote => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(current);
    }

    tokens
}
