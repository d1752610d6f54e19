//! Splitting `--key=value` context variables out of the command line

/// Command line with context variables removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Arguments left for the option parser, program name included
    pub args: Vec<String>,
    /// `--key=value` pairs in command-line order
    pub variables: Vec<(String, String)>,
}

/// Separate `--key=value` arguments whose key is not one of `known_flags`.
///
/// Known options (with or without `=`), bare `--flag` forms and everything
/// after a `--` terminator are left for the option parser, which rejects
/// anything it does not recognise.
pub fn split_context_args<I, S>(args: I, known_flags: &[&str]) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut invocation = Invocation::default();
    let mut terminated = false;

    for arg in args.into_iter().map(Into::into) {
        if terminated {
            invocation.args.push(arg);
            continue;
        }
        if arg == "--" {
            terminated = true;
            invocation.args.push(arg);
            continue;
        }

        match parse_variable(&arg) {
            Some((key, value)) if !known_flags.contains(&key) => {
                invocation
                    .variables
                    .push((key.to_string(), value.to_string()));
            }
            _ => invocation.args.push(arg),
        }
    }

    invocation
}

fn parse_variable(arg: &str) -> Option<(&str, &str)> {
    let rest = arg.strip_prefix("--")?;
    let (key, value) = rest.split_once('=')?;
    if key.is_empty() || key.starts_with('-') {
        return None;
    }
    Some((key, value))
}
